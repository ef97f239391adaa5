//! Integration tests for callsheet-store
//!
//! These tests cover the insert/list/get cycle for canonical records.

use callsheet_domain::{CanonicalRecord, RecordId, RecordStore};
use callsheet_store::SqliteStore;

fn sample_record(name: &str) -> CanonicalRecord {
    CanonicalRecord {
        caller_name: name.to_string(),
        caller_email: format!("{}@example.com", name.to_lowercase()),
        caller_number: "+1 555 0100".to_string(),
        call_timing: "10:00 - 10:15".to_string(),
        brief_summary: "Asked about opening hours.".to_string(),
        detailed_summary: "The caller asked about weekend opening hours.".to_string(),
        questions_asked: vec!["Are you open Sunday?".to_string()],
        action_items: vec!["Email the schedule".to_string(), "Call back Monday".to_string()],
    }
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
    assert_eq!(store.unwrap().count().unwrap(), 0);
}

#[test]
fn test_insert_and_get() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let record = sample_record("Jane");

    let id = store.insert(record.clone()).unwrap();

    let stored = store.get(id).unwrap().expect("record should exist");
    assert_eq!(stored.id, id);
    assert_eq!(stored.record, record);
    assert!(stored.received_at > 0);
}

#[test]
fn test_empty_record_roundtrip() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let id = store.insert(CanonicalRecord::default()).unwrap();

    let stored = store.get(id).unwrap().unwrap();
    assert!(stored.record.is_empty());
    assert!(stored.record.questions_asked.is_empty());
}

#[test]
fn test_get_unknown_id() {
    let store = SqliteStore::new(":memory:").unwrap();
    assert!(store.get(RecordId::new()).unwrap().is_none());
}

#[test]
fn test_list_most_recent_first() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let first = store.insert(sample_record("Alice")).unwrap();
    let second = store.insert(sample_record("Bob")).unwrap();
    let third = store.insert(sample_record("Carol")).unwrap();

    let listed = store.list(10, 0).unwrap();
    let ids: Vec<RecordId> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![third, second, first]);
    assert_eq!(listed[0].record.caller_name, "Carol");
}

#[test]
fn test_list_limit_and_skip() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    for name in ["A", "B", "C", "D", "E"] {
        store.insert(sample_record(name)).unwrap();
    }

    let page: Vec<String> = store
        .list(2, 1)
        .unwrap()
        .into_iter()
        .map(|r| r.record.caller_name)
        .collect();
    assert_eq!(page, vec!["D", "C"]);

    assert!(store.list(10, 5).unwrap().is_empty());
    assert_eq!(store.list(0, 0).unwrap().len(), 0);
    assert_eq!(store.count().unwrap(), 5);
}

#[test]
fn test_list_fields_keep_order() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let record = CanonicalRecord {
        action_items: vec!["z".to_string(), "a".to_string(), "m".to_string()],
        ..Default::default()
    };

    let id = store.insert(record).unwrap();

    let stored = store.get(id).unwrap().unwrap();
    assert_eq!(stored.record.action_items, vec!["z", "a", "m"]);
}

#[test]
fn test_records_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("callsheet.db");

    let id = {
        let mut store = SqliteStore::new(&path).unwrap();
        store.insert(sample_record("Jane")).unwrap()
    };

    let store = SqliteStore::new(&path).unwrap();
    let stored = store.get(id).unwrap().expect("record should survive reopen");
    assert_eq!(stored.record.caller_name, "Jane");
    assert_eq!(store.count().unwrap(), 1);
}
