//! Built-in person rules.
//!
//! # Responsibility
//! - Implement the attribute rules (single-person checks) and the graph
//!   traversal rules (closures, components, paths) behind `Rule`.
//! - Install them into a `RuleRegistry` under their stable names.
//!
//! # Invariants
//! - Blank, unknown or irregular arguments make a rule match nobody; the one
//!   documented exception is `HasSourceOf("")` (people without citations).
//! - Traversal rules do all graph work in `prepare`.

mod citations;
mod events;
mod family;
mod general;
mod names;
mod relationship;

use crate::db::GenealogyDb;
use crate::filter::{RuleArgs, RuleRegistry};
use crate::model::person::Person;

pub use general::RegExpIdOf;

pub(crate) fn install(registry: &mut RuleRegistry) {
    general::install(registry);
    names::install(registry);
    events::install(registry);
    family::install(registry);
    citations::install(registry);
    relationship::install(registry);
}

/// Resolves the person whose stable ID is argument `index`.
fn target_person<'a>(db: &'a dyn GenealogyDb, args: &RuleArgs, index: usize) -> Option<&'a Person> {
    args.get(index).and_then(|id| db.person_by_id(id))
}
