//! Graph traversal rules.
//!
//! Each rule builds a fresh kinship index and its whole matching set in
//! `prepare`, then answers `matches` by set lookup.

use super::target_person;
use crate::db::GenealogyDb;
use crate::filter::{RuleArgs, RuleDescriptor, RuleRegistry};
use crate::graph::{
    ancestors, connected_component, descendants, descendants_inclusive, duplicated_ancestors,
    shortest_path_union, KinshipComponents, KinshipIndex,
};
use crate::model::Handle;
use std::collections::HashSet;

const DISCONNECTED: RuleDescriptor =
    RuleDescriptor::new("Disconnected", 0, "People with no recorded relatives");
const HAS_COMMON_ANCESTOR_WITH: RuleDescriptor = RuleDescriptor::new(
    "HasCommonAncestorWith",
    1,
    "People sharing an ancestor with <person>",
);
const IS_RELATED_WITH: RuleDescriptor =
    RuleDescriptor::new("IsRelatedWith", 1, "People related to <person>");
const IS_DUPLICATED_ANCESTOR_OF: RuleDescriptor = RuleDescriptor::new(
    "IsDuplicatedAncestorOf",
    1,
    "Ancestors appearing more than once in the tree of <person>",
);
const RELATIONSHIP_PATH_BETWEEN_BOOKMARKS: RuleDescriptor = RuleDescriptor::new(
    "RelationshipPathBetweenBookmarks",
    0,
    "People on the shortest relationship paths between bookmarked people",
);
const IS_ANCESTOR_OF: RuleDescriptor = RuleDescriptor::new(
    "IsAncestorOf",
    2,
    "Ancestors of <person>, including them when <inclusive> is 1",
);
const IS_DESCENDANT_OF: RuleDescriptor = RuleDescriptor::new(
    "IsDescendantOf",
    2,
    "Descendants of <person>, including them when <inclusive> is 1",
);

pub(super) fn install(registry: &mut RuleRegistry) {
    registry.insert_scope(DISCONNECTED, disconnected);
    registry.insert_scope(HAS_COMMON_ANCESTOR_WITH, has_common_ancestor_with);
    registry.insert_scope(IS_RELATED_WITH, |db, args| {
        target_person(db, args, 0)
            .map(|target| connected_component(&KinshipIndex::build(db), target.handle))
            .unwrap_or_default()
    });
    registry.insert_scope(IS_DUPLICATED_ANCESTOR_OF, |db, args| {
        target_person(db, args, 0)
            .map(|target| duplicated_ancestors(&KinshipIndex::build(db), target.handle))
            .unwrap_or_default()
    });
    registry.insert_scope(RELATIONSHIP_PATH_BETWEEN_BOOKMARKS, |db, _| {
        shortest_path_union(&KinshipIndex::build(db), db.bookmarks())
    });
    registry.insert_scope(IS_ANCESTOR_OF, |db, args| {
        closure_with_target(db, args, ancestors)
    });
    registry.insert_scope(IS_DESCENDANT_OF, |db, args| {
        closure_with_target(db, args, descendants)
    });
}

fn disconnected(db: &dyn GenealogyDb, _args: &RuleArgs) -> HashSet<Handle> {
    let index = KinshipIndex::build(db);
    let components = KinshipComponents::build(&index);
    index
        .people()
        .iter()
        .copied()
        .filter(|handle| components.is_isolated(*handle))
        .collect()
}

/// Everyone whose inclusive ancestor closure meets the target's.
///
/// A family with no partner on record stands in as a shared ancestor of
/// its children. Anyone descending from (or equal to) a member of the
/// target's inclusive closure, or from a child of such a family, qualifies.
/// The target itself only when it has an ancestor of either kind: a person
/// alone shares no ancestor with themselves.
fn has_common_ancestor_with(db: &dyn GenealogyDb, args: &RuleArgs) -> HashSet<Handle> {
    let Some(target) = target_person(db, args, 0) else {
        return HashSet::new();
    };
    let index = KinshipIndex::build(db);
    let target_ancestors = ancestors(&index, target.handle);

    let mut seeds = target_ancestors.clone();
    seeds.insert(target.handle);
    let group_children = seeds
        .iter()
        .flat_map(|handle| index.sibling_groups(*handle))
        .flat_map(|family| index.group_children(*family))
        .copied()
        .collect::<Vec<_>>();
    let has_ancestor = !target_ancestors.is_empty() || !group_children.is_empty();
    seeds.extend(group_children);

    let mut related = descendants_inclusive(&index, seeds);
    if !has_ancestor {
        related.remove(&target.handle);
    }
    related
}

fn closure_with_target(
    db: &dyn GenealogyDb,
    args: &RuleArgs,
    closure: fn(&KinshipIndex, Handle) -> HashSet<Handle>,
) -> HashSet<Handle> {
    let Some(target) = target_person(db, args, 0) else {
        return HashSet::new();
    };
    let mut scope = closure(&KinshipIndex::build(db), target.handle);
    if args.flag(1) {
        scope.insert(target.handle);
    } else {
        scope.remove(&target.handle);
    }
    scope
}
