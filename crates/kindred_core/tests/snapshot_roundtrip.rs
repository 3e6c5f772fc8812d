mod common;

use common::{fixture, rule_ids};
use kindred_core::{FilterService, GenealogyDb, GraphSnapshot, MemoryDb};
use std::io::Write;

#[test]
fn snapshot_survives_json_file_roundtrip() {
    let db = fixture();
    let snapshot = db.to_snapshot();

    let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
    let json = serde_json::to_string_pretty(&snapshot).expect("snapshot should serialize");
    file.write_all(json.as_bytes())
        .expect("snapshot should be written");

    let raw = std::fs::read_to_string(file.path()).expect("snapshot should be readable");
    let restored: GraphSnapshot = serde_json::from_str(&raw).expect("snapshot should parse");
    assert_eq!(restored, snapshot);

    let restored = MemoryDb::from_snapshot(restored).expect("snapshot should load");
    assert_eq!(restored.person_count(), db.person_count());
    assert_eq!(restored.bookmarks(), db.bookmarks());

    let original = FilterService::new(db);
    let reloaded = FilterService::new(restored);
    for (rule, args) in [
        ("IsDuplicatedAncestorOf", vec!["I12"]),
        ("RelationshipPathBetweenBookmarks", Vec::new()),
        ("FamilyWithIncompleteEvent", Vec::new()),
        ("HasSourceOf", vec!["S01"]),
    ] {
        assert_eq!(
            rule_ids(&original, rule, &args),
            rule_ids(&reloaded, rule, &args),
            "{rule} must agree after reload"
        );
    }
}

#[test]
fn snapshot_with_duplicate_ids_is_rejected() {
    let mut snapshot = fixture().to_snapshot();
    let mut twin = snapshot.people[0].clone();
    twin.handle = uuid::Uuid::new_v4();
    snapshot.people.push(twin);

    assert!(MemoryDb::from_snapshot(snapshot).is_err());
}

#[test]
fn minimal_json_snapshot_uses_defaults() {
    let raw = r#"{
        "people": [
            {
                "handle": "6f1c2f4e-7d2a-4c55-9a0e-3f1f2b1d9a01",
                "id": "I1",
                "primary_name": { "given": "Ada", "surname": "Byron" }
            }
        ]
    }"#;
    let snapshot: GraphSnapshot = serde_json::from_str(raw).expect("snapshot should parse");
    let service = FilterService::new(MemoryDb::from_snapshot(snapshot).expect("should load"));

    assert_eq!(rule_ids(&service, "HasUnknownGender", &[]), vec!["I1"]);
    assert_eq!(rule_ids(&service, "Disconnected", &[]), vec!["I1"]);
}
