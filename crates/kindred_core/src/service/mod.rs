//! Use-case services over a genealogy graph.

pub mod filter_service;

pub use filter_service::{FilterService, FilterServiceError, FilterServiceResult};
