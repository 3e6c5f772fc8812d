//! Relationship traversals over the graph access layer.
//!
//! # Responsibility
//! - Build one symmetric kinship index per query and derive
//!   ancestor/descendant closures, connected components, shortest
//!   relationship paths and pedigree collapse from it.
//!
//! # Invariants
//! - Every traversal is iterative and guarded by a visited set; a cycle in
//!   parent edges never loops or overflows the stack.
//! - Dangling handles are dropped when the index is built.
//! - Closures are computed fresh per call; nothing is cached here.

pub mod components;
pub mod kinship;
pub mod paths;
pub mod pedigree;

pub use components::{connected_component, KinshipComponents};
pub use kinship::{ancestors, descendants, descendants_inclusive, KinshipIndex};
pub use paths::{bfs_distances, shortest_path_union};
pub use pedigree::duplicated_ancestors;
