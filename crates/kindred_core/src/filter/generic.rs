//! Boolean composition of rules and the population scan.

use super::rule::Rule;
use crate::db::GenealogyDb;
use crate::model::person::Person;
use crate::model::Handle;
use log::info;
use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use std::time::Instant;

/// How per-rule verdicts combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicalOp {
    /// Every rule must match.
    #[default]
    And,
    /// At least one rule must match.
    Or,
    /// Exactly one rule must match.
    One,
}

impl LogicalOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::One => "one",
        }
    }

    /// Parses `and|or|one`, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "one" => Some(Self::One),
            _ => None,
        }
    }
}

struct FilterRule {
    rule: Box<dyn Rule>,
    invert: bool,
}

impl FilterRule {
    fn check(&self, db: &dyn GenealogyDb, person: &Person) -> bool {
        self.rule.matches(db, person) != self.invert
    }
}

/// Ordered rule list with one combination mode.
///
/// A filter with no rules matches everyone (before whole-filter inversion).
#[derive(Default)]
pub struct GenericFilter {
    name: String,
    logical_op: LogicalOp,
    invert: bool,
    rules: Vec<FilterRule>,
}

impl GenericFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_logical_op(mut self, logical_op: LogicalOp) -> Self {
        self.logical_op = logical_op;
        self
    }

    /// Inverts the composed verdict.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn add_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(FilterRule {
            rule,
            invert: false,
        });
    }

    /// Adds a rule whose own verdict is negated before composition.
    pub fn add_inverted_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(FilterRule { rule, invert: true });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logical_op(&self) -> LogicalOp {
        self.logical_op
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|entry| entry.rule.name()).collect()
    }

    /// Evaluates the filter over the whole population.
    ///
    /// Returns the handles of matching people; order carries no meaning.
    pub fn apply(&mut self, db: &dyn GenealogyDb) -> HashSet<Handle> {
        self.run(db, db.people())
    }

    /// Evaluates the filter over the given people only. Unknown handles are skipped.
    pub fn apply_to(&mut self, db: &dyn GenealogyDb, candidates: &[Handle]) -> HashSet<Handle> {
        let people = candidates.iter().filter_map(|handle| db.person(*handle));
        self.run(db, Box::new(people))
    }

    fn run<'a>(
        &mut self,
        db: &'a dyn GenealogyDb,
        people: Box<dyn Iterator<Item = &'a Person> + 'a>,
    ) -> HashSet<Handle> {
        let started_at = Instant::now();
        for entry in &mut self.rules {
            entry.rule.prepare(db);
        }

        let mut scanned = 0usize;
        let mut matched = HashSet::new();
        for person in people {
            scanned += 1;
            if self.check(db, person) {
                matched.insert(person.handle);
            }
        }

        for entry in &mut self.rules {
            entry.rule.reset();
        }

        info!(
            "event=filter_apply module=filter status=ok op={} rules={} scanned={} matched={} duration_ms={}",
            self.logical_op.as_str(),
            self.rules.len(),
            scanned,
            matched.len(),
            started_at.elapsed().as_millis()
        );
        matched
    }

    fn check(&self, db: &dyn GenealogyDb, person: &Person) -> bool {
        let verdict = if self.rules.is_empty() {
            true
        } else {
            match self.logical_op {
                LogicalOp::And => self.rules.iter().all(|entry| entry.check(db, person)),
                LogicalOp::Or => self.rules.iter().any(|entry| entry.check(db, person)),
                LogicalOp::One => {
                    self.rules
                        .iter()
                        .filter(|entry| entry.check(db, person))
                        .take(2)
                        .count()
                        == 1
                }
            }
        };
        verdict != self.invert
    }
}

impl Debug for GenericFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericFilter")
            .field("name", &self.name)
            .field("logical_op", &self.logical_op)
            .field("invert", &self.invert)
            .field("rules", &self.rule_names())
            .finish()
    }
}
