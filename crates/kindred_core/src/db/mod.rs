//! Graph access layer: read-only view over people, families and their records.
//!
//! # Responsibility
//! - Define the `GenealogyDb` contract every rule evaluates against.
//! - Provide neighbor navigation (parents, children, spouses) on top of
//!   plain handle lookups.
//!
//! # Invariants
//! - Lookups by unknown or malformed handle/ID return `None`, never an error.
//! - `people()` yields every person exactly once, in a stable order.
//! - The view is never mutated while a filter is being applied.

use crate::model::citation::{Citation, Source};
use crate::model::event::Event;
use crate::model::family::Family;
use crate::model::person::Person;
use crate::model::Handle;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;

pub use memory::{GraphSnapshot, MemoryDb};

pub type DbResult<T> = Result<T, DbError>;

/// Integrity errors raised while building an in-memory graph.
///
/// Dangling references are not errors; only identity clashes are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    NilHandle {
        kind: &'static str,
        id: String,
    },
    DuplicateHandle {
        kind: &'static str,
        handle: Handle,
    },
    DuplicateId {
        kind: &'static str,
        id: String,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilHandle { kind, id } => write!(f, "{kind} `{id}` has a nil handle"),
            Self::DuplicateHandle { kind, handle } => {
                write!(f, "{kind} handle already present: {handle}")
            }
            Self::DuplicateId { kind, id } => write!(f, "{kind} id already present: {id}"),
        }
    }
}

impl Error for DbError {}

/// Father and mother of a person's main parent family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parents<'a> {
    pub father: Option<&'a Person>,
    pub mother: Option<&'a Person>,
}

/// Read-only data access contract consumed by filters and rules.
pub trait GenealogyDb {
    fn person(&self, handle: Handle) -> Option<&Person>;
    fn family(&self, handle: Handle) -> Option<&Family>;
    fn event(&self, handle: Handle) -> Option<&Event>;
    fn citation(&self, handle: Handle) -> Option<&Citation>;
    fn source(&self, handle: Handle) -> Option<&Source>;
    /// Looks a person up by human-readable ID (`I0044`).
    fn person_by_id(&self, id: &str) -> Option<&Person>;
    /// Looks a source up by human-readable ID (`S0001`).
    fn source_by_id(&self, id: &str) -> Option<&Source>;
    /// Every person, in a stable but otherwise unspecified order.
    fn people(&self) -> Box<dyn Iterator<Item = &Person> + '_>;
    /// Every family, in a stable but otherwise unspecified order.
    fn families(&self) -> Box<dyn Iterator<Item = &Family> + '_>;
    fn person_count(&self) -> usize;
    /// Externally designated home person.
    fn default_person_handle(&self) -> Option<Handle>;
    /// Externally maintained, ordered bookmark list.
    fn bookmarks(&self) -> &[Handle];

    /// Families where `person` is a child, each once. Dangling family handles
    /// are skipped.
    fn parent_families_of(&self, person: &Person) -> Vec<&Family> {
        resolve_families(self, &person.parent_families)
    }

    /// Distinct families where `person` is father or mother.
    fn families_as_spouse(&self, person: &Person) -> Vec<&Family> {
        resolve_families(self, &person.families)
    }

    /// Parents recorded in the main parent family.
    fn parents_of(&self, person: &Person) -> Parents<'_> {
        let Some(family) = person
            .main_parent_family()
            .and_then(|handle| self.family(handle))
        else {
            return Parents::default();
        };
        Parents {
            father: family.father.and_then(|handle| self.person(handle)),
            mother: family.mother.and_then(|handle| self.person(handle)),
        }
    }

    /// Partners across every spousal family, deduplicated, in family order.
    fn spouses_of(&self, person: &Person) -> Vec<&Person> {
        let mut spouses: Vec<&Person> = Vec::new();
        for family in self.families_as_spouse(person) {
            let Some(spouse) = family
                .spouse_of(person.handle)
                .and_then(|handle| self.person(handle))
            else {
                continue;
            };
            if !spouses.iter().any(|known| known.handle == spouse.handle) {
                spouses.push(spouse);
            }
        }
        spouses
    }

    /// Other children of every parent family, deduplicated, in family order.
    fn siblings_of(&self, person: &Person) -> Vec<&Person> {
        let mut siblings: Vec<&Person> = Vec::new();
        for family in self.parent_families_of(person) {
            for sibling in self.children_of(family) {
                if sibling.handle != person.handle
                    && !siblings.iter().any(|known| known.handle == sibling.handle)
                {
                    siblings.push(sibling);
                }
            }
        }
        siblings
    }

    /// Children of `family` in recorded order. Dangling child refs are skipped.
    fn children_of(&self, family: &Family) -> Vec<&Person> {
        family
            .child_handles()
            .filter_map(|handle| self.person(handle))
            .collect()
    }
}

fn resolve_families<'a, D: GenealogyDb + ?Sized>(db: &'a D, handles: &[Handle]) -> Vec<&'a Family> {
    let mut families: Vec<&Family> = Vec::new();
    for family in handles.iter().filter_map(|handle| db.family(*handle)) {
        if !families.iter().any(|known| known.handle == family.handle) {
            families.push(family);
        }
    }
    families
}
