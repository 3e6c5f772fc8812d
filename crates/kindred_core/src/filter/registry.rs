//! Rule registry: rule name + positional arguments -> rule instance.

use super::rule::{Predicate, PredicateRule, Rule, RuleArgs, ScopeBuilder, ScopeRule};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Static description of one registered rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescriptor {
    /// Stable rule name, e.g. `HasCommonAncestorWith`.
    pub name: &'static str,
    /// User-facing one-line description.
    pub description: &'static str,
    /// Number of positional arguments the rule reads.
    pub arity: usize,
}

impl RuleDescriptor {
    pub const fn new(name: &'static str, arity: usize, description: &'static str) -> Self {
        Self {
            name,
            description,
            arity,
        }
    }
}

type RuleBuilder = Box<dyn Fn(RuleArgs) -> Box<dyn Rule> + Send + Sync>;

struct RegistryEntry {
    descriptor: RuleDescriptor,
    build: RuleBuilder,
}

/// Rule construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// No rule is registered under this name.
    UnknownRule(String),
    /// A rule with this name is already registered.
    DuplicateRule(String),
}

impl Display for RuleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRule(name) => write!(f, "unknown filter rule: {name}"),
            Self::DuplicateRule(name) => write!(f, "filter rule already registered: {name}"),
        }
    }
}

impl Error for RuleError {}

/// Name-indexed rule constructors.
#[derive(Default)]
pub struct RuleRegistry {
    entries: BTreeMap<&'static str, RegistryEntry>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in person rule.
    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::new();
        crate::rules::install(&mut registry);
        registry
    }

    /// Registers a custom rule constructor.
    pub fn register(
        &mut self,
        descriptor: RuleDescriptor,
        build: impl Fn(RuleArgs) -> Box<dyn Rule> + Send + Sync + 'static,
    ) -> Result<(), RuleError> {
        if self.entries.contains_key(descriptor.name) {
            return Err(RuleError::DuplicateRule(descriptor.name.to_string()));
        }
        self.insert(descriptor, Box::new(build));
        Ok(())
    }

    /// Constructs a rule by name.
    ///
    /// Arguments are padded or truncated to the rule's arity; blank, unknown or
    /// irregular values make the rule match nobody at evaluation time.
    ///
    /// # Errors
    /// - Returns `RuleError::UnknownRule` when `name` is not registered.
    pub fn construct_rule(&self, name: &str, args: &[String]) -> Result<Box<dyn Rule>, RuleError> {
        let normalized = name.trim();
        let entry = self
            .entries
            .get(normalized)
            .ok_or_else(|| RuleError::UnknownRule(normalized.to_string()))?;
        Ok((entry.build)(RuleArgs::new(args, entry.descriptor.arity)))
    }

    pub fn descriptor(&self, name: &str) -> Option<&RuleDescriptor> {
        self.entries.get(name.trim()).map(|entry| &entry.descriptor)
    }

    /// Sorted rule names.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert_predicate(&mut self, descriptor: RuleDescriptor, predicate: Predicate) {
        let name = descriptor.name;
        self.insert(
            descriptor,
            Box::new(move |args: RuleArgs| -> Box<dyn Rule> {
                Box::new(PredicateRule::new(name, args, predicate))
            }),
        );
    }

    pub(crate) fn insert_scope(&mut self, descriptor: RuleDescriptor, builder: ScopeBuilder) {
        let name = descriptor.name;
        self.insert(
            descriptor,
            Box::new(move |args: RuleArgs| -> Box<dyn Rule> {
                Box::new(ScopeRule::new(name, args, builder))
            }),
        );
    }

    pub(crate) fn insert(&mut self, descriptor: RuleDescriptor, build: RuleBuilder) {
        self.entries
            .insert(descriptor.name, RegistryEntry { descriptor, build });
    }
}
