//! Arena-backed in-memory graph.
//!
//! # Invariants
//! - People and families live in insertion-ordered `Vec`s; handle and ID
//!   indices point into them.
//! - Handles and human-readable IDs are unique per record kind.
//! - `add_family` records back-references on member people already present.

use super::{DbError, DbResult, GenealogyDb};
use crate::model::citation::{Citation, Source};
use crate::model::event::{Event, EventKind};
use crate::model::family::Family;
use crate::model::person::Person;
use crate::model::Handle;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Plain record lists used to move a whole graph in and out of `MemoryDb`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSnapshot {
    pub people: Vec<Person>,
    pub families: Vec<Family>,
    pub events: Vec<Event>,
    pub sources: Vec<Source>,
    pub citations: Vec<Citation>,
    pub default_person: Option<Handle>,
    pub bookmarks: Vec<Handle>,
}

/// In-memory `GenealogyDb` implementation.
#[derive(Debug, Default)]
pub struct MemoryDb {
    people: Vec<Person>,
    families: Vec<Family>,
    events: HashMap<Handle, Event>,
    sources: Vec<Source>,
    citations: HashMap<Handle, Citation>,
    person_index: HashMap<Handle, usize>,
    person_ids: HashMap<String, usize>,
    family_index: HashMap<Handle, usize>,
    family_ids: HashMap<String, usize>,
    source_index: HashMap<Handle, usize>,
    source_ids: HashMap<String, usize>,
    default_person: Option<Handle>,
    bookmarks: Vec<Handle>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from snapshot records without rewriting back-references.
    ///
    /// # Errors
    /// - Returns `DbError` on nil handles or duplicate handles/IDs.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> DbResult<Self> {
        let mut db = Self::new();
        for person in snapshot.people {
            db.add_person(person)?;
        }
        for family in snapshot.families {
            db.insert_family(family)?;
        }
        for event in snapshot.events {
            db.add_event(event)?;
        }
        for source in snapshot.sources {
            db.add_source(source)?;
        }
        for citation in snapshot.citations {
            db.add_citation(citation)?;
        }
        db.default_person = snapshot.default_person;
        db.bookmarks = snapshot.bookmarks;

        info!(
            "event=graph_load module=db status=ok people={} families={} events={}",
            db.people.len(),
            db.families.len(),
            db.events.len()
        );
        Ok(db)
    }

    /// Copies every record out into a snapshot, people and families in
    /// insertion order, other records sorted by ID.
    pub fn to_snapshot(&self) -> GraphSnapshot {
        let mut events = self.events.values().cloned().collect::<Vec<_>>();
        events.sort_by(|a, b| a.id.cmp(&b.id));
        let mut citations = self.citations.values().cloned().collect::<Vec<_>>();
        citations.sort_by(|a, b| a.id.cmp(&b.id));

        GraphSnapshot {
            people: self.people.clone(),
            families: self.families.clone(),
            events,
            sources: self.sources.clone(),
            citations,
            default_person: self.default_person,
            bookmarks: self.bookmarks.clone(),
        }
    }

    pub fn add_person(&mut self, person: Person) -> DbResult<Handle> {
        ensure_handle("person", &person.id, person.handle)?;
        if self.person_index.contains_key(&person.handle) {
            return Err(DbError::DuplicateHandle {
                kind: "person",
                handle: person.handle,
            });
        }
        if self.person_ids.contains_key(person.id.as_str()) {
            return Err(DbError::DuplicateId {
                kind: "person",
                id: person.id,
            });
        }

        let handle = person.handle;
        let slot = self.people.len();
        self.person_index.insert(handle, slot);
        self.person_ids.insert(person.id.clone(), slot);
        self.people.push(person);
        Ok(handle)
    }

    /// Adds a family and links it from its father, mother and children.
    pub fn add_family(&mut self, family: Family) -> DbResult<Handle> {
        let parents = family.parents().collect::<Vec<_>>();
        let children = family.child_handles().collect::<Vec<_>>();
        let handle = self.insert_family(family)?;

        for parent in parents {
            if let Some(person) = self.person_mut(parent) {
                if !person.families.contains(&handle) {
                    person.families.push(handle);
                }
            }
        }
        for child in children {
            if let Some(person) = self.person_mut(child) {
                if !person.parent_families.contains(&handle) {
                    person.parent_families.push(handle);
                }
            }
        }
        Ok(handle)
    }

    pub fn add_event(&mut self, event: Event) -> DbResult<Handle> {
        ensure_handle("event", &event.id, event.handle)?;
        if self.events.contains_key(&event.handle) {
            return Err(DbError::DuplicateHandle {
                kind: "event",
                handle: event.handle,
            });
        }
        let handle = event.handle;
        self.events.insert(handle, event);
        Ok(handle)
    }

    pub fn add_source(&mut self, source: Source) -> DbResult<Handle> {
        ensure_handle("source", &source.id, source.handle)?;
        if self.source_index.contains_key(&source.handle) {
            return Err(DbError::DuplicateHandle {
                kind: "source",
                handle: source.handle,
            });
        }
        if self.source_ids.contains_key(source.id.as_str()) {
            return Err(DbError::DuplicateId {
                kind: "source",
                id: source.id,
            });
        }

        let handle = source.handle;
        let slot = self.sources.len();
        self.source_index.insert(handle, slot);
        self.source_ids.insert(source.id.clone(), slot);
        self.sources.push(source);
        Ok(handle)
    }

    pub fn add_citation(&mut self, citation: Citation) -> DbResult<Handle> {
        ensure_handle("citation", &citation.id, citation.handle)?;
        if self.citations.contains_key(&citation.handle) {
            return Err(DbError::DuplicateHandle {
                kind: "citation",
                handle: citation.handle,
            });
        }
        let handle = citation.handle;
        self.citations.insert(handle, citation);
        Ok(handle)
    }

    /// Attaches an already added event to a person's event list.
    ///
    /// Birth and death events also become the person's birth/death reference
    /// when none is set yet. Returns `false` when the person is unknown.
    pub fn attach_event(&mut self, person: Handle, event: Handle) -> bool {
        let kind = self.events.get(&event).map(|event| event.kind);
        let Some(person) = self.person_mut(person) else {
            return false;
        };
        if !person.events.contains(&event) {
            person.events.push(event);
        }
        match kind {
            Some(EventKind::Birth) if person.birth.is_none() => {
                person.birth = Some(event);
            }
            Some(EventKind::Death) if person.death.is_none() => {
                person.death = Some(event);
            }
            _ => {}
        }
        true
    }

    /// Adds a citation reference to a person. Returns `false` when the person is unknown.
    pub fn attach_citation(&mut self, person: Handle, citation: Handle) -> bool {
        let Some(person) = self.person_mut(person) else {
            return false;
        };
        if !person.citations.contains(&citation) {
            person.citations.push(citation);
        }
        true
    }

    pub fn set_default_person(&mut self, handle: Option<Handle>) {
        self.default_person = handle;
    }

    pub fn set_bookmarks(&mut self, bookmarks: Vec<Handle>) {
        self.bookmarks = bookmarks;
    }

    fn insert_family(&mut self, family: Family) -> DbResult<Handle> {
        ensure_handle("family", &family.id, family.handle)?;
        if self.family_index.contains_key(&family.handle) {
            return Err(DbError::DuplicateHandle {
                kind: "family",
                handle: family.handle,
            });
        }
        if self.family_ids.contains_key(family.id.as_str()) {
            return Err(DbError::DuplicateId {
                kind: "family",
                id: family.id,
            });
        }

        let handle = family.handle;
        let slot = self.families.len();
        self.family_index.insert(handle, slot);
        self.family_ids.insert(family.id.clone(), slot);
        self.families.push(family);
        Ok(handle)
    }

    fn person_mut(&mut self, handle: Handle) -> Option<&mut Person> {
        let slot = *self.person_index.get(&handle)?;
        self.people.get_mut(slot)
    }
}

impl GenealogyDb for MemoryDb {
    fn person(&self, handle: Handle) -> Option<&Person> {
        self.person_index
            .get(&handle)
            .and_then(|slot| self.people.get(*slot))
    }

    fn family(&self, handle: Handle) -> Option<&Family> {
        self.family_index
            .get(&handle)
            .and_then(|slot| self.families.get(*slot))
    }

    fn event(&self, handle: Handle) -> Option<&Event> {
        self.events.get(&handle)
    }

    fn citation(&self, handle: Handle) -> Option<&Citation> {
        self.citations.get(&handle)
    }

    fn source(&self, handle: Handle) -> Option<&Source> {
        self.source_index
            .get(&handle)
            .and_then(|slot| self.sources.get(*slot))
    }

    fn person_by_id(&self, id: &str) -> Option<&Person> {
        self.person_ids
            .get(id)
            .and_then(|slot| self.people.get(*slot))
    }

    fn source_by_id(&self, id: &str) -> Option<&Source> {
        self.source_ids
            .get(id)
            .and_then(|slot| self.sources.get(*slot))
    }

    fn people(&self) -> Box<dyn Iterator<Item = &Person> + '_> {
        Box::new(self.people.iter())
    }

    fn families(&self) -> Box<dyn Iterator<Item = &Family> + '_> {
        Box::new(self.families.iter())
    }

    fn person_count(&self) -> usize {
        self.people.len()
    }

    fn default_person_handle(&self) -> Option<Handle> {
        self.default_person
    }

    fn bookmarks(&self) -> &[Handle] {
        &self.bookmarks
    }
}

fn ensure_handle(kind: &'static str, id: &str, handle: Handle) -> DbResult<()> {
    if handle.is_nil() {
        return Err(DbError::NilHandle {
            kind,
            id: id.to_string(),
        });
    }
    Ok(())
}
