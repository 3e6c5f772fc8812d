//! Filter evaluation facade.
//!
//! # Responsibility
//! - Pair one read-only graph with one rule registry.
//! - Provide name-based entry points for callers that do not hold rules.
//!
//! # Invariants
//! - The service never mutates the graph it evaluates against.
//! - ID results are sorted for stable output.

use crate::db::GenealogyDb;
use crate::filter::{GenericFilter, Rule, RuleError, RuleRegistry};
use crate::model::Handle;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FilterServiceResult<T> = Result<T, FilterServiceError>;

/// Errors surfaced by the filter facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterServiceError {
    Rule(RuleError),
}

impl Display for FilterServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rule(err) => write!(f, "rule construction failed: {err}"),
        }
    }
}

impl Error for FilterServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rule(err) => Some(err),
        }
    }
}

impl From<RuleError> for FilterServiceError {
    fn from(value: RuleError) -> Self {
        Self::Rule(value)
    }
}

/// Evaluates rules and filters against one graph.
pub struct FilterService<D: GenealogyDb> {
    db: D,
    registry: RuleRegistry,
}

impl<D: GenealogyDb> FilterService<D> {
    /// Creates a service with every built-in rule registered.
    pub fn new(db: D) -> Self {
        Self::with_registry(db, RuleRegistry::with_builtin_rules())
    }

    pub fn with_registry(db: D, registry: RuleRegistry) -> Self {
        Self { db, registry }
    }

    pub fn db(&self) -> &D {
        &self.db
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Constructs a registered rule by name.
    ///
    /// # Errors
    /// - Returns `FilterServiceError::Rule` when `name` is not registered.
    pub fn construct_rule(&self, name: &str, args: &[String]) -> FilterServiceResult<Box<dyn Rule>> {
        Ok(self.registry.construct_rule(name, args)?)
    }

    /// Applies `filter` to every person in the graph.
    pub fn evaluate(&self, filter: &mut GenericFilter) -> HashSet<Handle> {
        filter.apply(&self.db)
    }

    /// Applies `filter` and returns the stable IDs of the matches, sorted.
    pub fn evaluate_ids(&self, filter: &mut GenericFilter) -> Vec<String> {
        let matched = self.evaluate(filter);
        self.sorted_ids(&matched)
    }

    /// Builds a single-rule filter from a name and evaluates it.
    ///
    /// # Errors
    /// - Returns `FilterServiceError::Rule` when `name` is not registered.
    pub fn evaluate_rule(&self, name: &str, args: &[String]) -> FilterServiceResult<HashSet<Handle>> {
        let rule = self.construct_rule(name, args)?;
        let mut filter = GenericFilter::new(name.trim());
        filter.add_rule(rule);
        Ok(self.evaluate(&mut filter))
    }

    /// Same as `evaluate_rule`, returning sorted stable IDs.
    ///
    /// # Errors
    /// - Returns `FilterServiceError::Rule` when `name` is not registered.
    pub fn evaluate_rule_ids(&self, name: &str, args: &[String]) -> FilterServiceResult<Vec<String>> {
        let matched = self.evaluate_rule(name, args)?;
        Ok(self.sorted_ids(&matched))
    }

    fn sorted_ids(&self, handles: &HashSet<Handle>) -> Vec<String> {
        let mut ids = handles
            .iter()
            .filter_map(|handle| self.db.person(*handle))
            .map(|person| person.id.clone())
            .collect::<Vec<_>>();
        ids.sort();
        ids
    }
}
