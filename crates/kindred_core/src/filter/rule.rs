//! The rule contract and the two generic rule shapes built on it.

use crate::db::GenealogyDb;
use crate::model::person::Person;
use crate::model::Handle;
use log::debug;
use std::collections::HashSet;
use std::time::Instant;

/// A person predicate evaluated by a filter.
///
/// Lifecycle: unprepared -> `prepare` -> `matches` (any number of times) ->
/// `reset`. Rules never self-initialize inside `matches`; an unprepared
/// scope-holding rule matches nobody.
pub trait Rule: Send {
    /// Registry name, e.g. `IsRelatedWith`.
    fn name(&self) -> &'static str;

    /// Positional arguments the rule was constructed with.
    fn args(&self) -> &RuleArgs;

    /// Builds per-query scope. Called once per filter application.
    fn prepare(&mut self, _db: &dyn GenealogyDb) {}

    /// Must be a pure function of (graph, person, prepared scope).
    fn matches(&self, db: &dyn GenealogyDb, person: &Person) -> bool;

    /// Drops per-query scope.
    fn reset(&mut self) {}
}

/// Positional string arguments of one rule instance.
///
/// Missing arguments read as blank; blank arguments read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleArgs {
    values: Vec<String>,
}

impl RuleArgs {
    /// Keeps exactly `arity` values, padding with blanks or dropping extras.
    pub fn new(values: &[String], arity: usize) -> Self {
        let mut values = values.iter().take(arity).cloned().collect::<Vec<_>>();
        values.resize(arity, String::new());
        Self { values }
    }

    /// Trimmed argument at `index`, or `None` when blank or missing.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values
            .get(index)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Boolean switch argument: `1`, `true` or `yes`.
    pub fn flag(&self, index: usize) -> bool {
        matches!(
            self.get(index).map(str::to_ascii_lowercase).as_deref(),
            Some("1" | "true" | "yes")
        )
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Stateless per-person check.
pub type Predicate = fn(&dyn GenealogyDb, &Person, &RuleArgs) -> bool;

/// Rule that needs no preparation: a named predicate plus its arguments.
pub struct PredicateRule {
    name: &'static str,
    args: RuleArgs,
    predicate: Predicate,
}

impl PredicateRule {
    pub fn new(name: &'static str, args: RuleArgs, predicate: Predicate) -> Self {
        Self {
            name,
            args,
            predicate,
        }
    }
}

impl Rule for PredicateRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn args(&self) -> &RuleArgs {
        &self.args
    }

    fn matches(&self, db: &dyn GenealogyDb, person: &Person) -> bool {
        (self.predicate)(db, person, &self.args)
    }
}

/// Computes the full matching set once per query.
pub type ScopeBuilder = fn(&dyn GenealogyDb, &RuleArgs) -> HashSet<Handle>;

/// Rule whose matches are precomputed in `prepare` as a handle set.
///
/// Used by every graph traversal rule: the closure, partition or path set is
/// built once and each candidate is a set lookup.
pub struct ScopeRule {
    name: &'static str,
    args: RuleArgs,
    builder: ScopeBuilder,
    scope: Option<HashSet<Handle>>,
}

impl ScopeRule {
    pub fn new(name: &'static str, args: RuleArgs, builder: ScopeBuilder) -> Self {
        Self {
            name,
            args,
            builder,
            scope: None,
        }
    }

    pub fn is_prepared(&self) -> bool {
        self.scope.is_some()
    }
}

impl Rule for ScopeRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn args(&self) -> &RuleArgs {
        &self.args
    }

    fn prepare(&mut self, db: &dyn GenealogyDb) {
        let started_at = Instant::now();
        let scope = (self.builder)(db, &self.args);
        debug!(
            "event=rule_prepare module=rules rule={} scope={} duration_ms={}",
            self.name,
            scope.len(),
            started_at.elapsed().as_millis()
        );
        self.scope = Some(scope);
    }

    fn matches(&self, _db: &dyn GenealogyDb, person: &Person) -> bool {
        self.scope
            .as_ref()
            .is_some_and(|scope| scope.contains(&person.handle))
    }

    fn reset(&mut self) {
        self.scope = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{Rule, RuleArgs, ScopeRule};
    use crate::db::{GenealogyDb, MemoryDb};
    use crate::model::person::{Gender, Name, Person};
    use std::collections::HashSet;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn args_pad_and_truncate_to_arity() {
        let args = RuleArgs::new(&strings(&["I0001", "extra"]), 1);
        assert_eq!(args.len(), 1);
        assert_eq!(args.get(0), Some("I0001"));

        let args = RuleArgs::new(&[], 2);
        assert_eq!(args.len(), 2);
        assert_eq!(args.get(0), None);
        assert_eq!(args.get(1), None);
    }

    #[test]
    fn blank_argument_reads_as_none() {
        let args = RuleArgs::new(&strings(&["   ", "1"]), 2);
        assert_eq!(args.get(0), None);
        assert!(args.flag(1));
        assert!(!args.flag(0));
    }

    #[test]
    fn scope_rule_matches_nobody_until_prepared() {
        let mut db = MemoryDb::new();
        let handle = db
            .add_person(Person::new("I1", Gender::Male, Name::new("A", "B")))
            .unwrap();
        let mut rule = ScopeRule::new("Everyone", RuleArgs::default(), |db, _| {
            db.people().map(|person| person.handle).collect::<HashSet<_>>()
        });
        let person = db.person(handle).unwrap().clone();

        assert!(!rule.matches(&db, &person));
        rule.prepare(&db);
        assert!(rule.is_prepared());
        assert!(rule.matches(&db, &person));
        rule.reset();
        assert!(!rule.matches(&db, &person));
    }
}
