//! Connected components of the kinship graph.

use super::kinship::KinshipIndex;
use crate::model::Handle;
use std::collections::{HashMap, HashSet, VecDeque};

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut cursor = x;
        while self.parent[cursor] != root {
            let next = self.parent[cursor];
            self.parent[cursor] = root;
            cursor = next;
        }
        root
    }

    fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return;
        }
        if self.rank[rx] < self.rank[ry] {
            self.parent[rx] = ry;
        } else if self.rank[rx] > self.rank[ry] {
            self.parent[ry] = rx;
        } else {
            self.parent[ry] = rx;
            self.rank[rx] += 1;
        }
    }
}

/// Partition of the whole population into kinship components.
///
/// Built in one pass over the kinship index, so it agrees with
/// [`connected_component`] on every edge.
#[derive(Debug, Clone, Default)]
pub struct KinshipComponents {
    component_of: HashMap<Handle, usize>,
    sizes: Vec<usize>,
}

impl KinshipComponents {
    pub fn build(index: &KinshipIndex) -> Self {
        let handles = index.people();
        let slot_of = handles
            .iter()
            .enumerate()
            .map(|(slot, handle)| (*handle, slot))
            .collect::<HashMap<_, _>>();

        let mut uf = UnionFind::new(handles.len());
        for (slot, handle) in handles.iter().enumerate() {
            for neighbor in index.neighbors(*handle) {
                if let Some(&other) = slot_of.get(neighbor) {
                    uf.union(slot, other);
                }
            }
        }

        let mut root_to_component = HashMap::new();
        let mut sizes = Vec::new();
        let mut component_of = HashMap::with_capacity(handles.len());
        for (slot, handle) in handles.iter().enumerate() {
            let root = uf.find(slot);
            let component = *root_to_component.entry(root).or_insert_with(|| {
                sizes.push(0);
                sizes.len() - 1
            });
            sizes[component] += 1;
            component_of.insert(*handle, component);
        }

        Self {
            component_of,
            sizes,
        }
    }

    pub fn component_of(&self, handle: Handle) -> Option<usize> {
        self.component_of.get(&handle).copied()
    }

    /// Size of the component holding `handle`; 0 for unknown handles.
    pub fn size_of(&self, handle: Handle) -> usize {
        self.component_of(handle)
            .and_then(|component| self.sizes.get(component).copied())
            .unwrap_or(0)
    }

    pub fn is_isolated(&self, handle: Handle) -> bool {
        self.size_of(handle) == 1
    }
}

/// Everyone reachable from `start` over kin edges, `start` included.
///
/// Empty when `start` is not a known person.
pub fn connected_component(index: &KinshipIndex, start: Handle) -> HashSet<Handle> {
    let mut visited = HashSet::new();
    if !index.contains(start) {
        return visited;
    }
    visited.insert(start);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for neighbor in index.neighbors(current) {
            if visited.insert(*neighbor) {
                queue.push_back(*neighbor);
            }
        }
    }
    visited
}
