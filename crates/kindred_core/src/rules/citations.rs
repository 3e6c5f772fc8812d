//! Source citation rules.

use crate::db::GenealogyDb;
use crate::filter::{RuleArgs, RuleDescriptor, RuleRegistry};
use crate::model::Handle;
use std::collections::HashSet;

const HAS_SOURCE_OF: RuleDescriptor = RuleDescriptor::new(
    "HasSourceOf",
    1,
    "People with the <source>; an empty source selects people without citations",
);

pub(super) fn install(registry: &mut RuleRegistry) {
    registry.insert_scope(HAS_SOURCE_OF, has_source_of);
}

fn has_source_of(db: &dyn GenealogyDb, args: &RuleArgs) -> HashSet<Handle> {
    let Some(source_id) = args.get(0) else {
        return db
            .people()
            .filter(|person| person.citations.is_empty())
            .map(|person| person.handle)
            .collect();
    };
    let Some(source) = db.source_by_id(source_id) else {
        return HashSet::new();
    };

    db.people()
        .filter(|person| {
            person
                .citations
                .iter()
                .filter_map(|handle| db.citation(*handle))
                .any(|citation| citation.source == source.handle)
        })
        .map(|person| person.handle)
        .collect()
}
