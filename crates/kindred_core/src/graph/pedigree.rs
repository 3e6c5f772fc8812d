//! Pedigree collapse: ancestors reached along more than one line.

use super::kinship::KinshipIndex;
use crate::model::Handle;
use log::warn;
use std::collections::{HashMap, HashSet, VecDeque};

/// Ancestors of `root` reachable by at least two distinct upward parent paths.
///
/// Path counts are propagated in topological order over the ancestor DAG and
/// saturate at 2, so the walk stays linear in the ancestor count even where
/// lines merge many times. Ancestors that sit on or above a parent-edge cycle
/// cannot be ordered; they are left out and reported.
pub fn duplicated_ancestors(index: &KinshipIndex, root: Handle) -> HashSet<Handle> {
    let mut in_degree: HashMap<Handle, usize> = HashMap::new();
    let mut queue = VecDeque::new();
    if !index.contains(root) {
        return HashSet::new();
    }
    in_degree.insert(root, 0);
    queue.push_back(root);

    while let Some(current) = queue.pop_front() {
        for parent in index.parents(current) {
            let seen = in_degree.contains_key(parent);
            *in_degree.entry(*parent).or_insert(0) += 1;
            if !seen {
                queue.push_back(*parent);
            }
        }
    }

    let mut paths: HashMap<Handle, u8> = HashMap::from([(root, 1)]);
    let mut ready = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(handle, _)| *handle)
        .collect::<VecDeque<_>>();
    let mut resolved = 0usize;

    while let Some(current) = ready.pop_front() {
        resolved += 1;
        let current_paths = paths.get(&current).copied().unwrap_or(0);
        for parent in index.parents(current) {
            let entry = paths.entry(*parent).or_insert(0);
            *entry = entry.saturating_add(current_paths).min(2);
            if let Some(degree) = in_degree.get_mut(parent) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push_back(*parent);
                }
            }
        }
    }

    if resolved < in_degree.len() {
        warn!(
            "event=pedigree_cycle module=graph status=partial unresolved={}",
            in_degree.len() - resolved
        );
    }

    // Only ancestors whose counts were fully resolved are trusted.
    in_degree
        .iter()
        .filter(|(handle, degree)| **handle != root && **degree == 0)
        .filter(|(handle, _)| paths.get(*handle).is_some_and(|count| *count >= 2))
        .map(|(handle, _)| *handle)
        .collect()
}
