//! Person record and name parts.

use super::Handle;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Recorded gender of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

/// One name of a person.
///
/// Blank strings mean "not recorded".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Name {
    pub given: String,
    pub surname: String,
    pub nickname: String,
}

impl Name {
    pub fn new(given: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            given: given.into(),
            surname: surname.into(),
            nickname: String::new(),
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = nickname.into();
        self
    }

    /// Returns whether given name or surname is missing.
    pub fn is_incomplete(&self) -> bool {
        self.given.trim().is_empty() || self.surname.trim().is_empty()
    }

    pub fn has_nickname(&self) -> bool {
        !self.nickname.trim().is_empty()
    }
}

/// Person record as exposed by the graph access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub handle: Handle,
    /// Human-readable stable ID, e.g. `I0044`.
    pub id: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub primary_name: Name,
    #[serde(default)]
    pub alternate_names: Vec<Name>,
    /// Families this person is a child of; the first one is the main family.
    #[serde(default)]
    pub parent_families: Vec<Handle>,
    /// Families this person is a father/mother (spouse) in.
    #[serde(default)]
    pub families: Vec<Handle>,
    /// All event references, including birth and death.
    #[serde(default)]
    pub events: Vec<Handle>,
    #[serde(default)]
    pub birth: Option<Handle>,
    #[serde(default)]
    pub death: Option<Handle>,
    #[serde(default)]
    pub citations: Vec<Handle>,
    #[serde(default)]
    pub private: bool,
}

impl Person {
    /// Creates a person with a generated handle and no relations.
    pub fn new(id: impl Into<String>, gender: Gender, primary_name: Name) -> Self {
        Self::with_handle(Uuid::new_v4(), id, gender, primary_name)
    }

    /// Creates a person with a caller-provided handle.
    pub fn with_handle(
        handle: Handle,
        id: impl Into<String>,
        gender: Gender,
        primary_name: Name,
    ) -> Self {
        Self {
            handle,
            id: id.into(),
            gender,
            primary_name,
            alternate_names: Vec::new(),
            parent_families: Vec::new(),
            families: Vec::new(),
            events: Vec::new(),
            birth: None,
            death: None,
            citations: Vec::new(),
            private: false,
        }
    }

    /// Iterates the primary name followed by the alternate names.
    pub fn names(&self) -> impl Iterator<Item = &Name> {
        std::iter::once(&self.primary_name).chain(self.alternate_names.iter())
    }

    /// Main parent family, if any.
    pub fn main_parent_family(&self) -> Option<Handle> {
        self.parent_families.first().copied()
    }
}
