//! Sources and the citations people hold against them.

use super::Handle;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub handle: Handle,
    /// Human-readable stable ID, e.g. `S0001`.
    pub id: String,
    #[serde(default)]
    pub title: String,
}

impl Source {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            handle: Uuid::new_v4(),
            id: id.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub handle: Handle,
    pub id: String,
    pub source: Handle,
    #[serde(default)]
    pub page: String,
}

impl Citation {
    pub fn new(id: impl Into<String>, source: Handle) -> Self {
        Self {
            handle: Uuid::new_v4(),
            id: id.into(),
            source,
            page: String::new(),
        }
    }
}
