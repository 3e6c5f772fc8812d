//! Event completeness rules.

use crate::db::GenealogyDb;
use crate::filter::{RuleDescriptor, RuleRegistry};
use crate::model::person::Person;
use crate::model::Handle;

const NO_BIRTHDATE: RuleDescriptor =
    RuleDescriptor::new("NoBirthdate", 0, "People without a known birth date");
const NO_DEATHDATE: RuleDescriptor =
    RuleDescriptor::new("NoDeathdate", 0, "People without a known death date");
const PERSON_WITH_INCOMPLETE_EVENT: RuleDescriptor = RuleDescriptor::new(
    "PersonWithIncompleteEvent",
    0,
    "People with an event missing a date or a place",
);
const FAMILY_WITH_INCOMPLETE_EVENT: RuleDescriptor = RuleDescriptor::new(
    "FamilyWithIncompleteEvent",
    0,
    "People with a family event missing a date or a place",
);

pub(super) fn install(registry: &mut RuleRegistry) {
    registry.insert_predicate(NO_BIRTHDATE, |db, person, _| {
        !has_usable_date(db, person.birth)
    });
    registry.insert_predicate(NO_DEATHDATE, |db, person, _| {
        !has_usable_date(db, person.death)
    });
    registry.insert_predicate(PERSON_WITH_INCOMPLETE_EVENT, |db, person, _| {
        person_event_handles(person)
            .filter_map(|handle| db.event(handle))
            .any(|event| event.is_incomplete())
    });
    registry.insert_predicate(FAMILY_WITH_INCOMPLETE_EVENT, |db, person, _| {
        db.families_as_spouse(person)
            .iter()
            .flat_map(|family| family.events.iter())
            .filter_map(|handle| db.event(*handle))
            .any(|event| event.is_incomplete())
    });
}

/// Missing reference, dangling reference, no date and a year-less date all
/// count as "no usable date".
fn has_usable_date(db: &dyn GenealogyDb, event: Option<Handle>) -> bool {
    event
        .and_then(|handle| db.event(handle))
        .is_some_and(|event| event.has_usable_date())
}

/// The person's event list plus birth/death references not already listed.
fn person_event_handles(person: &Person) -> impl Iterator<Item = Handle> + '_ {
    let extra = [person.birth, person.death]
        .into_iter()
        .flatten()
        .filter(move |handle| !person.events.contains(handle));
    person.events.iter().copied().chain(extra)
}
