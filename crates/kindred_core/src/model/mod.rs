//! Genealogical domain model consumed by the rule engine.
//!
//! # Responsibility
//! - Define the person/family/event/citation records the filters read.
//! - Keep records plain data: no back-pointers, only handle references.
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil `Handle`.
//! - Cross-record references are handles and may dangle; readers treat a
//!   dangling handle as a graph boundary, never as an error.

pub mod citation;
pub mod event;
pub mod family;
pub mod person;

use uuid::Uuid;

/// Opaque stable identifier of any record in the graph.
///
/// Distinct from the human-readable ID (`I0044`) shown to users.
pub type Handle = Uuid;
