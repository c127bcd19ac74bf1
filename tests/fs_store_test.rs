use nodevault::error::VaultError;
use nodevault::model::{Record, Timestamp};
use nodevault::store::fs::{FileStore, DATA_FILENAME};
use nodevault::store::DataStore;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    (dir, store)
}

fn insert(store: &mut FileStore, name: &str, value: &str) -> Record {
    let id = store.next_id().unwrap();
    let record = Record::new(id, name.to_string(), value.to_string());
    store.insert_record(&record).unwrap();
    record
}

#[test]
fn test_missing_file_is_an_empty_vault() {
    let (_dir, store) = setup();
    assert!(store.list_records().unwrap().is_empty());
    assert_eq!(store.next_id().unwrap(), 1);
}

#[test]
fn test_records_survive_a_new_store_instance() {
    let (dir, mut store) = setup();
    let alice = insert(&mut store, "Alice", "x1");
    let bob = insert(&mut store, "Bob", "x2");

    let reopened = FileStore::new(dir.path().to_path_buf());
    let records = reopened.list_records().unwrap();

    assert_eq!(records, vec![alice.clone(), bob]);
    assert_eq!(reopened.get_record(alice.id).unwrap(), Some(alice));
    assert_eq!(reopened.get_record(99).unwrap(), None);
}

#[test]
fn test_replace_keeps_position_and_created() {
    let (_dir, mut store) = setup();
    let alice = insert(&mut store, "Alice", "x1");
    insert(&mut store, "Bob", "x2");

    let mut changed = alice.clone();
    changed.name = "Alicia".to_string();
    assert!(store.replace_record(&changed).unwrap());

    let records = store.list_records().unwrap();
    assert_eq!(records[0].name, "Alicia");
    assert_eq!(records[0].created, alice.created);

    let ghost = Record::new(42, "Ghost".to_string(), String::new());
    assert!(!store.replace_record(&ghost).unwrap());
    assert_eq!(store.list_records().unwrap().len(), 2);
}

#[test]
fn test_deleted_newest_id_is_not_reused() {
    let (dir, mut store) = setup();
    insert(&mut store, "Alice", "x1");
    let bob = insert(&mut store, "Bob", "x2");

    assert!(store.delete_record(bob.id).unwrap());
    assert!(!store.delete_record(bob.id).unwrap());

    let reopened = FileStore::new(dir.path().to_path_buf());
    assert_eq!(reopened.next_id().unwrap(), 3);
}

#[test]
fn test_loads_legacy_bare_array() {
    let (dir, store) = setup();
    let legacy = r#"[
        {"id": 1, "name": "Alice", "value": "x1", "created": "2024-01-01T10:00:00.000Z"},
        {"id": 4, "name": "Bob", "value": "x2", "created": "not a date"},
        {"id": 2, "name": "Carol", "value": "x3"}
    ]"#;
    fs::write(dir.path().join(DATA_FILENAME), legacy).unwrap();

    let records = store.list_records().unwrap();

    assert_eq!(records.len(), 3);
    assert!(records[0].created_at().is_some());
    assert_eq!(
        records[1].created,
        Some(Timestamp::Invalid("not a date".to_string()))
    );
    assert_eq!(records[2].created, None);
    assert_eq!(store.next_id().unwrap(), 5);
}

#[test]
fn test_unparsable_timestamp_survives_a_save() {
    let (dir, mut store) = setup();
    let legacy = r#"[{"id": 1, "name": "Alice", "value": "x1", "created": "someday"}]"#;
    fs::write(dir.path().join(DATA_FILENAME), legacy).unwrap();

    insert(&mut store, "Bob", "x2");

    let content = fs::read_to_string(dir.path().join(DATA_FILENAME)).unwrap();
    assert!(content.contains("\"someday\""));
    assert!(content.contains("\"last_id\": 2"));
}

#[test]
fn test_no_temp_files_left_behind() {
    let (dir, mut store) = setup();
    insert(&mut store, "Alice", "x1");
    insert(&mut store, "Bob", "x2");
    store.delete_record(1).unwrap();

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_corrupt_file_is_a_serialization_error() {
    let (dir, mut store) = setup();
    fs::write(dir.path().join(DATA_FILENAME), "{ not json").unwrap();

    assert!(matches!(
        store.list_records(),
        Err(VaultError::Serialization(_))
    ));

    let record = Record::new(1, "Alice".to_string(), String::new());
    assert!(store.insert_record(&record).is_err());
    let content = fs::read_to_string(dir.path().join(DATA_FILENAME)).unwrap();
    assert_eq!(content, "{ not json");
}

#[test]
fn test_exhausted_id_space_is_an_error() {
    let (dir, mut store) = setup();
    let legacy = r#"[{"id": 18446744073709551615, "name": "Last", "value": "x"}]"#;
    fs::write(dir.path().join(DATA_FILENAME), legacy).unwrap();

    assert_eq!(store.list_records().unwrap().len(), 1);
    assert!(matches!(store.next_id(), Err(VaultError::Store(_))));

    // Deleting the record does not make its id, or any wrapped id, available
    assert!(store.delete_record(u64::MAX).unwrap());
    assert!(matches!(store.next_id(), Err(VaultError::Store(_))));
}
