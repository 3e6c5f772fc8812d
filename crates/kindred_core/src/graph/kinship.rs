//! Kinship index and ancestor/descendant closures.
//!
//! # Invariants
//! - Family membership is the union of what the family records (father,
//!   mother, child refs) and what people record (`families`,
//!   `parent_families`); a link stored on only one side still counts.
//! - Kin edges are undirected: parent and child, the partners of a family,
//!   and the children of a family with no partner at all.
//! - Parent and child lists hold resolved people only, each once.

use crate::db::GenealogyDb;
use crate::model::Handle;
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Default)]
struct Members {
    partners: Vec<Handle>,
    children: Vec<Handle>,
}

/// Symmetric adjacency of the whole population, built in one pass.
#[derive(Debug, Clone, Default)]
pub struct KinshipIndex {
    people: Vec<Handle>,
    known: HashSet<Handle>,
    parents: HashMap<Handle, Vec<Handle>>,
    children: HashMap<Handle, Vec<Handle>>,
    neighbors: HashMap<Handle, Vec<Handle>>,
    /// Child -> partnerless families it belongs to.
    sibling_groups: HashMap<Handle, Vec<Handle>>,
    /// Partnerless family -> its children.
    group_children: HashMap<Handle, Vec<Handle>>,
}

impl KinshipIndex {
    pub fn build(db: &dyn GenealogyDb) -> Self {
        let mut index = Self::default();
        for person in db.people() {
            if index.known.insert(person.handle) {
                index.people.push(person.handle);
            }
        }

        let mut order = Vec::new();
        let mut members: HashMap<Handle, Members> = HashMap::new();
        for family in db.families() {
            let entry = members.entry(family.handle).or_insert_with(|| {
                order.push(family.handle);
                Members::default()
            });
            for partner in family.parents() {
                push_known(&index.known, &mut entry.partners, partner);
            }
            for child in family.child_handles() {
                push_known(&index.known, &mut entry.children, child);
            }
        }
        for person in db.people() {
            for handle in &person.families {
                if let Some(entry) = members.get_mut(handle) {
                    push_known(&index.known, &mut entry.partners, person.handle);
                }
            }
            for handle in &person.parent_families {
                if let Some(entry) = members.get_mut(handle) {
                    push_known(&index.known, &mut entry.children, person.handle);
                }
            }
        }

        for family in order {
            let Some(group) = members.get(&family) else {
                continue;
            };
            index.link_family(family, group);
        }
        index
    }

    fn link_family(&mut self, family: Handle, group: &Members) {
        for (i, a) in group.partners.iter().enumerate() {
            for b in &group.partners[i + 1..] {
                self.link_neighbors(*a, *b);
            }
        }
        for partner in &group.partners {
            for child in &group.children {
                if partner == child {
                    continue;
                }
                push_unique(self.parents.entry(*child).or_default(), *partner);
                push_unique(self.children.entry(*partner).or_default(), *child);
                self.link_neighbors(*partner, *child);
            }
        }
        if group.partners.is_empty() && !group.children.is_empty() {
            for (i, a) in group.children.iter().enumerate() {
                push_unique(self.sibling_groups.entry(*a).or_default(), family);
                for b in &group.children[i + 1..] {
                    self.link_neighbors(*a, *b);
                }
            }
            self.group_children.insert(family, group.children.clone());
        }
    }

    fn link_neighbors(&mut self, a: Handle, b: Handle) {
        if a == b {
            return;
        }
        push_unique(self.neighbors.entry(a).or_default(), b);
        push_unique(self.neighbors.entry(b).or_default(), a);
    }

    /// Whether `handle` is a person of the indexed graph.
    pub fn contains(&self, handle: Handle) -> bool {
        self.known.contains(&handle)
    }

    /// Every indexed person, in population order.
    pub fn people(&self) -> &[Handle] {
        &self.people
    }

    pub fn parents(&self, handle: Handle) -> &[Handle] {
        self.parents.get(&handle).map_or(&[], Vec::as_slice)
    }

    pub fn children(&self, handle: Handle) -> &[Handle] {
        self.children.get(&handle).map_or(&[], Vec::as_slice)
    }

    /// Every person one kin edge away from `handle`.
    pub fn neighbors(&self, handle: Handle) -> &[Handle] {
        self.neighbors.get(&handle).map_or(&[], Vec::as_slice)
    }

    /// Partnerless families `handle` is a child of.
    pub fn sibling_groups(&self, handle: Handle) -> &[Handle] {
        self.sibling_groups.get(&handle).map_or(&[], Vec::as_slice)
    }

    /// Children of a partnerless family; empty for any other handle.
    pub fn group_children(&self, family: Handle) -> &[Handle] {
        self.group_children.get(&family).map_or(&[], Vec::as_slice)
    }
}

/// Strict ancestor closure of `start` over every parent edge.
pub fn ancestors(index: &KinshipIndex, start: Handle) -> HashSet<Handle> {
    closure(index, start, KinshipIndex::parents)
}

/// Strict descendant closure of `start` over every child edge.
pub fn descendants(index: &KinshipIndex, start: Handle) -> HashSet<Handle> {
    closure(index, start, KinshipIndex::children)
}

/// `seeds` plus everyone descending from any of them.
pub fn descendants_inclusive(
    index: &KinshipIndex,
    seeds: impl IntoIterator<Item = Handle>,
) -> HashSet<Handle> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    for seed in seeds {
        if index.contains(seed) && visited.insert(seed) {
            queue.push_back(seed);
        }
    }

    while let Some(current) = queue.pop_front() {
        for child in index.children(current) {
            if visited.insert(*child) {
                queue.push_back(*child);
            }
        }
    }
    visited
}

fn closure(
    index: &KinshipIndex,
    start: Handle,
    step: fn(&KinshipIndex, Handle) -> &[Handle],
) -> HashSet<Handle> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for next in step(index, current) {
            if *next != start && visited.insert(*next) {
                queue.push_back(*next);
            }
        }
    }
    visited
}

fn push_known(known: &HashSet<Handle>, out: &mut Vec<Handle>, handle: Handle) {
    if known.contains(&handle) {
        push_unique(out, handle);
    }
}

fn push_unique(out: &mut Vec<Handle>, handle: Handle) {
    if !out.contains(&handle) {
        out.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::{ancestors, descendants, KinshipIndex};
    use crate::db::{GraphSnapshot, MemoryDb};
    use crate::model::family::{ChildRef, Family};
    use crate::model::person::{Gender, Name, Person};
    use crate::model::Handle;
    use std::collections::HashSet;

    fn add(db: &mut MemoryDb, id: &str) -> Handle {
        db.add_person(Person::new(id, Gender::Unknown, Name::new("A", "B")))
            .unwrap()
    }

    #[test]
    fn closures_follow_all_parent_families() {
        let mut db = MemoryDb::new();
        let grand = add(&mut db, "I1");
        let birth_father = add(&mut db, "I2");
        let adoptive_mother = add(&mut db, "I3");
        let child = add(&mut db, "I4");
        db.add_family(Family::new("F1", Some(grand), None).with_child(ChildRef::birth(birth_father)))
            .unwrap();
        db.add_family(Family::new("F2", Some(birth_father), None).with_child(ChildRef::birth(child)))
            .unwrap();
        db.add_family(Family::new("F3", None, Some(adoptive_mother)).with_child(ChildRef::adopted(child)))
            .unwrap();

        let index = KinshipIndex::build(&db);
        assert_eq!(
            ancestors(&index, child),
            HashSet::from([grand, birth_father, adoptive_mother])
        );
        assert_eq!(descendants(&index, grand), HashSet::from([birth_father, child]));
        assert!(ancestors(&index, grand).is_empty());
    }

    #[test]
    fn cyclic_parent_edges_terminate_and_exclude_start() {
        let mut db = MemoryDb::new();
        let a = add(&mut db, "I1");
        let b = add(&mut db, "I2");
        db.add_family(Family::new("F1", Some(a), None).with_child(ChildRef::birth(b)))
            .unwrap();
        db.add_family(Family::new("F2", Some(b), None).with_child(ChildRef::birth(a)))
            .unwrap();

        let index = KinshipIndex::build(&db);
        assert_eq!(ancestors(&index, a), HashSet::from([b]));
        assert_eq!(descendants(&index, a), HashSet::from([b]));
    }

    #[test]
    fn parentless_siblings_are_neighbors_and_grouped() {
        let mut db = MemoryDb::new();
        let a = add(&mut db, "I1");
        let b = add(&mut db, "I2");
        let family = db
            .add_family(
                Family::new("F1", None, None)
                    .with_child(ChildRef::birth(a))
                    .with_child(ChildRef::birth(b)),
            )
            .unwrap();

        let index = KinshipIndex::build(&db);
        assert_eq!(index.neighbors(a), &[b]);
        assert_eq!(index.sibling_groups(a), &[family]);
        assert_eq!(index.group_children(family), &[a, b]);
        assert!(index.parents(a).is_empty());
    }

    #[test]
    fn links_recorded_on_one_side_only_are_symmetric() {
        let father = Person::new("P", Gender::Male, Name::new("Pa", "X"));
        let child = Person::new("C", Gender::Unknown, Name::new("Cy", "X"));
        let mut mother = Person::new("M", Gender::Female, Name::new("Ma", "X"));
        let family = Family::new("F1", Some(father.handle), None)
            .with_child(ChildRef::birth(child.handle));
        mother.families.push(family.handle);
        let (father_handle, child_handle, mother_handle) = (father.handle, child.handle, mother.handle);

        let db = MemoryDb::from_snapshot(GraphSnapshot {
            people: vec![father, child, mother],
            families: vec![family],
            ..GraphSnapshot::default()
        })
        .unwrap();

        let index = KinshipIndex::build(&db);
        assert_eq!(index.parents(child_handle), &[father_handle, mother_handle]);
        assert_eq!(index.children(father_handle), &[child_handle]);
        assert!(index.neighbors(child_handle).contains(&father_handle));
        assert!(index.neighbors(father_handle).contains(&mother_handle));
    }
}
