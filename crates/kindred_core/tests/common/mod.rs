//! Shared family graph for integration tests.
//!
//! Layout (stable IDs):
//! - F01 I01 Walter + I02 Ruth -> I05 George, I06 Alice
//! - F02 I03 Harold + I04 Edna -> I07 Mary
//! - F03 I05 George + I07 Mary -> I09 Tom (adopted), I10 Lucy
//! - F04 I08 Frank + I06 Alice -> I11 Ben
//! - F05 I11 Ben + I10 Lucy -> I12 Sam (cousin marriage)
//! - F06 I08 Frank + I13 Grace (no children)
//! - F07 I16 Xavier + I17 Yvonne (no children, no ancestors)
//! - F08 no parents -> I18 Pat, I19 Quinn
//! - I14 Otto (private) and I15 Nobody have no relatives.
//!
//! Bookmarks are I09 and I11; the default person is I12.

#![allow(dead_code)]

use kindred_core::{
    ChildRef, Citation, Date, Event, EventKind, Family, FilterService, Gender, Handle, MemoryDb,
    Name, Person, Source,
};
use std::collections::HashSet;
use uuid::Uuid;

pub const PEOPLE: usize = 19;

fn add(db: &mut MemoryDb, person: Person) -> Handle {
    db.add_person(person).expect("fixture person should insert")
}

fn person(id: &str, gender: Gender, given: &str, surname: &str) -> Person {
    Person::new(id, gender, Name::new(given, surname))
}

fn family(
    db: &mut MemoryDb,
    id: &str,
    father: Option<Handle>,
    mother: Option<Handle>,
    children: &[ChildRef],
) -> Handle {
    let mut family = Family::new(id, father, mother);
    for child in children {
        family = family.with_child(*child);
    }
    db.add_family(family).expect("fixture family should insert")
}

pub fn fixture() -> MemoryDb {
    let mut db = MemoryDb::new();

    let walter = add(&mut db, person("I01", Gender::Male, "Walter", "Ashby"));
    let mut ruth = person("I02", Gender::Female, "Ruth", "Ashby");
    ruth.birth = Some(Uuid::new_v4());
    let ruth = add(&mut db, ruth);
    let harold = add(
        &mut db,
        Person::new("I03", Gender::Male, Name::new("Harold", "Cole").with_nickname("Harry")),
    );
    let edna = add(&mut db, person("I04", Gender::Female, "Edna", "Cole"));
    let george = add(&mut db, person("I05", Gender::Male, "George", "Ashby"));
    let mut alice = person("I06", Gender::Female, "Alice", "Ashby");
    alice
        .alternate_names
        .push(Name::new("Alice", "Webb").with_nickname("Ally"));
    let alice = add(&mut db, alice);
    let mary = add(&mut db, person("I07", Gender::Female, "Mary", "Ashby"));
    let frank = add(&mut db, person("I08", Gender::Male, "Frank", "Webb"));
    let tom = add(&mut db, person("I09", Gender::Male, "Tom", "Ashby"));
    let lucy = add(&mut db, person("I10", Gender::Female, "Lucy", "Webb"));
    let ben = add(&mut db, person("I11", Gender::Male, "Ben", "Webb"));
    let sam = add(&mut db, person("I12", Gender::Unknown, "Sam", "Webb"));
    let grace = add(&mut db, person("I13", Gender::Female, "Grace", "Webb"));
    let mut otto = person("I14", Gender::Male, "Otto", "Lind");
    otto.private = true;
    add(&mut db, otto);
    add(&mut db, person("I15", Gender::Unknown, "", "Nobody"));
    let xavier = add(&mut db, person("I16", Gender::Male, "Xavier", "Moss"));
    let yvonne = add(&mut db, person("I17", Gender::Female, "Yvonne", "Moss"));
    let pat = add(&mut db, person("I18", Gender::Unknown, "Pat", ""));
    let quinn = add(&mut db, person("I19", Gender::Female, "Quinn", "Vale"));

    let wedding = db
        .add_event(Event::new("E05", EventKind::Marriage).with_date(Date::year(1925)))
        .expect("fixture event should insert");
    db.add_family(
        Family::new("F01", Some(walter), Some(ruth))
            .with_child(ChildRef::birth(george))
            .with_child(ChildRef::birth(alice))
            .with_event(wedding),
    )
    .expect("fixture family should insert");
    family(&mut db, "F02", Some(harold), Some(edna), &[ChildRef::birth(mary)]);
    family(
        &mut db,
        "F03",
        Some(george),
        Some(mary),
        &[ChildRef::adopted(tom), ChildRef::birth(lucy)],
    );
    family(&mut db, "F04", Some(frank), Some(alice), &[ChildRef::birth(ben)]);
    family(&mut db, "F05", Some(ben), Some(lucy), &[ChildRef::birth(sam)]);
    family(&mut db, "F06", Some(frank), Some(grace), &[]);
    family(&mut db, "F07", Some(xavier), Some(yvonne), &[]);
    family(
        &mut db,
        "F08",
        None,
        None,
        &[ChildRef::birth(pat), ChildRef::birth(quinn)],
    );

    let walter_birth = db
        .add_event(
            Event::new("E01", EventKind::Birth)
                .with_date(Date::year(1900))
                .with_place("Leeds"),
        )
        .expect("fixture event should insert");
    let walter_death = db
        .add_event(Event::new("E02", EventKind::Death).with_date(Date::year(1970)))
        .expect("fixture event should insert");
    let george_birth = db
        .add_event(
            Event::new("E03", EventKind::Birth)
                .with_date(Date {
                    year: None,
                    month: Some(4),
                    day: None,
                })
                .with_place("Hull"),
        )
        .expect("fixture event should insert");
    let tom_birth = db
        .add_event(
            Event::new("E04", EventKind::Birth)
                .with_date(Date::ymd(1960, 5, 1))
                .with_place("York"),
        )
        .expect("fixture event should insert");
    db.attach_event(walter, walter_birth);
    db.attach_event(walter, walter_death);
    db.attach_event(george, george_birth);
    db.attach_event(tom, tom_birth);

    let register = db
        .add_source(Source::new("S01", "Parish register"))
        .expect("fixture source should insert");
    db.add_source(Source::new("S02", "Census"))
        .expect("fixture source should insert");
    let citation = db
        .add_citation(Citation::new("C01", register))
        .expect("fixture citation should insert");
    db.attach_citation(walter, citation);
    db.attach_citation(george, citation);

    db.set_bookmarks(vec![tom, ben]);
    db.set_default_person(Some(sam));
    db
}

pub fn handle_of(db: &MemoryDb, id: &str) -> Handle {
    use kindred_core::GenealogyDb;
    db.person_by_id(id)
        .map(|person| person.handle)
        .expect("fixture id should exist")
}

pub fn sorted_ids(db: &MemoryDb, handles: &HashSet<Handle>) -> Vec<String> {
    use kindred_core::GenealogyDb;
    let mut ids = handles
        .iter()
        .map(|handle| {
            db.person(*handle)
                .map(|person| person.id.clone())
                .expect("matched handle should resolve")
        })
        .collect::<Vec<_>>();
    ids.sort();
    ids
}

pub fn rule_ids(service: &FilterService<MemoryDb>, name: &str, args: &[&str]) -> Vec<String> {
    let args = args.iter().map(|arg| arg.to_string()).collect::<Vec<_>>();
    service
        .evaluate_rule_ids(name, &args)
        .expect("rule should be registered")
}

pub fn assert_rule_matches_ids(
    service: &FilterService<MemoryDb>,
    name: &str,
    args: &[&str],
    expected: &[&str],
) {
    assert_eq!(rule_ids(service, name, args), expected, "rule {name}{args:?}");
}

pub fn assert_rule_matches_count(
    service: &FilterService<MemoryDb>,
    name: &str,
    args: &[&str],
    expected: usize,
) {
    assert_eq!(
        rule_ids(service, name, args).len(),
        expected,
        "rule {name}{args:?}"
    );
}
