//! Rules over a person's family memberships.

use crate::db::GenealogyDb;
use crate::filter::{RuleArgs, RuleDescriptor, RuleRegistry};
use crate::model::person::Person;

const MISSING_PARENT: RuleDescriptor = RuleDescriptor::new(
    "MissingParent",
    0,
    "People without parents, or with a parent family missing a father or a mother",
);
const MULTIPLE_MARRIAGES: RuleDescriptor =
    RuleDescriptor::new("MultipleMarriages", 0, "People with more than one spouse family");
const NEVER_MARRIED: RuleDescriptor =
    RuleDescriptor::new("NeverMarried", 0, "People with no spouse family");
const HAVE_CHILDREN: RuleDescriptor =
    RuleDescriptor::new("HaveChildren", 0, "People with children");
const HAVE_ALT_FAMILIES: RuleDescriptor =
    RuleDescriptor::new("HaveAltFamilies", 0, "Adopted people");

pub(super) fn install(registry: &mut RuleRegistry) {
    registry.insert_predicate(MISSING_PARENT, missing_parent);
    registry.insert_predicate(MULTIPLE_MARRIAGES, |db, person, _| {
        db.families_as_spouse(person).len() > 1
    });
    registry.insert_predicate(NEVER_MARRIED, |db, person, _| {
        db.families_as_spouse(person).is_empty()
    });
    registry.insert_predicate(HAVE_CHILDREN, |db, person, _| {
        db.families_as_spouse(person)
            .iter()
            .any(|family| !family.children.is_empty())
    });
    registry.insert_predicate(HAVE_ALT_FAMILIES, have_alt_families);
}

fn missing_parent(db: &dyn GenealogyDb, person: &Person, _args: &RuleArgs) -> bool {
    let families = db.parent_families_of(person);
    families.is_empty() || families.iter().any(|family| family.is_missing_parent())
}

fn have_alt_families(db: &dyn GenealogyDb, person: &Person, _args: &RuleArgs) -> bool {
    db.parent_families_of(person).iter().any(|family| {
        family
            .children
            .iter()
            .any(|child| child.person == person.handle && child.is_adopted())
    })
}
