//! Family record: one couple (either partner optional) and their children.

use super::Handle;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Relation of a child to one parent of the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildRelation {
    #[default]
    Birth,
    Adopted,
    Stepchild,
    Sponsored,
    Foster,
    Unknown,
}

/// Reference from a family to one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRef {
    pub person: Handle,
    #[serde(default)]
    pub father_relation: ChildRelation,
    #[serde(default)]
    pub mother_relation: ChildRelation,
}

impl ChildRef {
    /// Birth child of both parents.
    pub fn birth(person: Handle) -> Self {
        Self {
            person,
            father_relation: ChildRelation::Birth,
            mother_relation: ChildRelation::Birth,
        }
    }

    /// Adopted by both parents.
    pub fn adopted(person: Handle) -> Self {
        Self {
            person,
            father_relation: ChildRelation::Adopted,
            mother_relation: ChildRelation::Adopted,
        }
    }

    pub fn is_adopted(&self) -> bool {
        self.father_relation == ChildRelation::Adopted
            || self.mother_relation == ChildRelation::Adopted
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub handle: Handle,
    pub id: String,
    #[serde(default)]
    pub father: Option<Handle>,
    #[serde(default)]
    pub mother: Option<Handle>,
    /// Ordered child references.
    #[serde(default)]
    pub children: Vec<ChildRef>,
    #[serde(default)]
    pub events: Vec<Handle>,
}

impl Family {
    pub fn new(id: impl Into<String>, father: Option<Handle>, mother: Option<Handle>) -> Self {
        Self {
            handle: Uuid::new_v4(),
            id: id.into(),
            father,
            mother,
            children: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: ChildRef) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_event(mut self, event: Handle) -> Self {
        self.events.push(event);
        self
    }

    /// Father and mother handles that are present.
    pub fn parents(&self) -> impl Iterator<Item = Handle> {
        self.father.into_iter().chain(self.mother)
    }

    pub fn child_handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.children.iter().map(|child| child.person)
    }

    pub fn is_missing_parent(&self) -> bool {
        self.father.is_none() || self.mother.is_none()
    }

    /// The other partner of `person`, when `person` is father or mother.
    pub fn spouse_of(&self, person: Handle) -> Option<Handle> {
        if self.father == Some(person) {
            self.mother
        } else if self.mother == Some(person) {
            self.father
        } else {
            None
        }
    }
}
