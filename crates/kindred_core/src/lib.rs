//! Person filter rules and relationship queries over a genealogy graph.
//! Rules are evaluated against a read-only `GenealogyDb` view.

pub mod db;
pub mod filter;
pub mod graph;
pub mod logging;
pub mod model;
pub mod rules;
pub mod service;

pub use db::{DbError, DbResult, GenealogyDb, GraphSnapshot, MemoryDb, Parents};
pub use filter::{GenericFilter, LogicalOp, Rule, RuleArgs, RuleDescriptor, RuleError, RuleRegistry};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::citation::{Citation, Source};
pub use model::event::{Date, Event, EventKind};
pub use model::family::{ChildRef, ChildRelation, Family};
pub use model::person::{Gender, Name, Person};
pub use model::Handle;
pub use service::{FilterService, FilterServiceError, FilterServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
