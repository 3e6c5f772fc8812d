//! Rule contract, filter composition and rule registry.
//!
//! # Responsibility
//! - Define the `Rule` capability set (`prepare`, `matches`, `reset`).
//! - Compose rules with boolean logic and scan the population once.
//! - Map rule names plus positional string arguments to rule instances.
//!
//! # Invariants
//! - Constructing a known rule never fails, whatever its arguments.
//! - `prepare` runs exactly once per rule before the population scan and
//!   prepared scope is discarded when the scan ends.

pub mod generic;
pub mod registry;
pub mod rule;

pub use generic::{GenericFilter, LogicalOp};
pub use registry::{RuleDescriptor, RuleError, RuleRegistry};
pub use rule::{Predicate, PredicateRule, Rule, RuleArgs, ScopeBuilder, ScopeRule};
