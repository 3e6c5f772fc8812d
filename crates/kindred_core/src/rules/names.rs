//! Name-based rules.

use crate::db::GenealogyDb;
use crate::filter::{RuleArgs, RuleDescriptor, RuleRegistry};
use crate::model::person::Person;

const HAS_ALTERNATE_NAME: RuleDescriptor =
    RuleDescriptor::new("HasAlternateName", 0, "People with an alternate name");
const HAS_NICKNAME: RuleDescriptor = RuleDescriptor::new("HasNickname", 0, "People with a nickname");
const INCOMPLETE_NAMES: RuleDescriptor = RuleDescriptor::new(
    "IncompleteNames",
    0,
    "People with a name missing the given name or the surname",
);
const SEARCH_NAME: RuleDescriptor = RuleDescriptor::new(
    "SearchName",
    1,
    "People with a name containing <text>, ignoring case",
);

pub(super) fn install(registry: &mut RuleRegistry) {
    registry.insert_predicate(HAS_ALTERNATE_NAME, |_, person, _| {
        !person.alternate_names.is_empty()
    });
    registry.insert_predicate(HAS_NICKNAME, |_, person, _| {
        person.names().any(|name| name.has_nickname())
    });
    registry.insert_predicate(INCOMPLETE_NAMES, |_, person, _| {
        person.names().any(|name| name.is_incomplete())
    });
    registry.insert_predicate(SEARCH_NAME, search_name);
}

fn search_name(_db: &dyn GenealogyDb, person: &Person, args: &RuleArgs) -> bool {
    let Some(needle) = args.get(0).map(str::to_lowercase) else {
        return false;
    };
    person.names().any(|name| {
        [&name.given, &name.surname, &name.nickname]
            .iter()
            .any(|part| part.to_lowercase().contains(needle.as_str()))
    })
}
