//! Identity, gender, privacy and bookmark rules.

use crate::db::GenealogyDb;
use crate::filter::{Rule, RuleArgs, RuleDescriptor, RuleRegistry};
use crate::model::person::{Gender, Person};
use regex::Regex;

const EVERYONE: RuleDescriptor = RuleDescriptor::new("Everyone", 0, "Every person in the database");
const IS_MALE: RuleDescriptor = RuleDescriptor::new("IsMale", 0, "Males");
const IS_FEMALE: RuleDescriptor = RuleDescriptor::new("IsFemale", 0, "Females");
const HAS_UNKNOWN_GENDER: RuleDescriptor =
    RuleDescriptor::new("HasUnknownGender", 0, "People with unknown gender");
const PEOPLE_PRIVATE: RuleDescriptor =
    RuleDescriptor::new("PeoplePrivate", 0, "People marked private");
const PEOPLE_PUBLIC: RuleDescriptor =
    RuleDescriptor::new("PeoplePublic", 0, "People not marked private");
const IS_BOOKMARKED: RuleDescriptor =
    RuleDescriptor::new("IsBookmarked", 0, "Bookmarked people");
const IS_DEFAULT_PERSON: RuleDescriptor =
    RuleDescriptor::new("IsDefaultPerson", 0, "The home person");
const HAS_ID_OF: RuleDescriptor = RuleDescriptor::new("HasIdOf", 1, "Person with <Id>");
const REGEXP_ID_OF: RuleDescriptor = RuleDescriptor::new(
    "RegExpIdOf",
    1,
    "People with IDs matching the <regular expression>",
);

pub(super) fn install(registry: &mut RuleRegistry) {
    registry.insert_predicate(EVERYONE, |_, _, _| true);
    registry.insert_predicate(IS_MALE, |_, person, _| person.gender == Gender::Male);
    registry.insert_predicate(IS_FEMALE, |_, person, _| person.gender == Gender::Female);
    registry.insert_predicate(HAS_UNKNOWN_GENDER, |_, person, _| {
        person.gender == Gender::Unknown
    });
    registry.insert_predicate(PEOPLE_PRIVATE, |_, person, _| person.private);
    registry.insert_predicate(PEOPLE_PUBLIC, |_, person, _| !person.private);
    registry.insert_predicate(IS_BOOKMARKED, |db, person, _| {
        db.bookmarks().contains(&person.handle)
    });
    registry.insert_predicate(IS_DEFAULT_PERSON, |db, person, _| {
        db.default_person_handle() == Some(person.handle)
    });
    registry.insert_predicate(HAS_ID_OF, has_id_of);
    registry.insert(
        REGEXP_ID_OF,
        Box::new(|args: RuleArgs| -> Box<dyn Rule> { Box::new(RegExpIdOf::new(args)) }),
    );
}

fn has_id_of(_db: &dyn GenealogyDb, person: &Person, args: &RuleArgs) -> bool {
    args.get(0).is_some_and(|id| id == person.id)
}

/// Matches people whose stable ID matches a regular expression.
///
/// The pattern is compiled once at construction; an empty or invalid pattern
/// leaves the rule without a matcher and it matches nobody.
pub struct RegExpIdOf {
    args: RuleArgs,
    pattern: Option<Regex>,
}

impl RegExpIdOf {
    pub fn new(args: RuleArgs) -> Self {
        let pattern = args.get(0).and_then(|raw| Regex::new(raw).ok());
        Self { args, pattern }
    }
}

impl Rule for RegExpIdOf {
    fn name(&self) -> &'static str {
        REGEXP_ID_OF.name
    }

    fn args(&self) -> &RuleArgs {
        &self.args
    }

    fn matches(&self, _db: &dyn GenealogyDb, person: &Person) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(&person.id))
    }
}

#[cfg(test)]
mod tests {
    use super::RegExpIdOf;
    use crate::db::MemoryDb;
    use crate::filter::{Rule, RuleArgs};
    use crate::model::person::{Gender, Name, Person};

    fn args(value: &str) -> RuleArgs {
        RuleArgs::new(&[value.to_string()], 1)
    }

    #[test]
    fn regexp_id_matches_and_invalid_pattern_matches_nobody() {
        let db = MemoryDb::new();
        let person = Person::new("I0107", Gender::Male, Name::new("A", "B"));

        assert!(RegExpIdOf::new(args("^I01")).matches(&db, &person));
        assert!(!RegExpIdOf::new(args("^I02")).matches(&db, &person));
        assert!(!RegExpIdOf::new(args("(unclosed")).matches(&db, &person));
        assert!(!RegExpIdOf::new(args("")).matches(&db, &person));
    }
}
