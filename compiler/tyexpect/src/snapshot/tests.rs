use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::CountingStore;

#[test]
fn test_in_memory_store_round_trip() {
    let mut store = InMemorySnapshotStore::new();
    assert!(store.is_empty());
    assert_eq!(store.read("a.ts", "Foo"), None);

    store.write("a.ts", "Foo", "number").unwrap();
    assert_eq!(store.read("a.ts", "Foo"), Some("number".to_string()));
    assert_eq!(store.read("b.ts", "Foo"), None);

    store.write("a.ts", "Foo", "string").unwrap();
    assert_eq!(store.read("a.ts", "Foo"), Some("string".to_string()));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_in_memory_store_keeps_files_apart() {
    let mut store = InMemorySnapshotStore::new();
    store.write("a.ts", "Foo", "number").unwrap();
    store.write("b.ts", "Foo", "string").unwrap();
    store.write("b.ts", "Bar", "boolean").unwrap();

    assert_eq!(store.read("a.ts", "Foo"), Some("number".to_string()));
    assert_eq!(store.read("b.ts", "Foo"), Some("string".to_string()));
    assert_eq!(store.read("a.ts", "Bar"), None);
    assert_eq!(store.len(), 3);
}

#[test]
fn test_edit_is_empty_and_pure() {
    let update = SnapshotUpdate::new("a.ts", "Foo", "number");
    let edit = update.edit();

    assert!(edit.is_noop());
    assert_eq!(edit, update.edit());
    assert!(!update.is_applied());
}

#[test]
fn test_apply_writes_exactly_once() {
    let mut store = CountingStore::default();
    let mut update = SnapshotUpdate::new("a.ts", "Foo", "number");

    assert!(update.apply(&mut store).unwrap());
    assert!(!update.apply(&mut store).unwrap());
    let _ = update.edit();

    assert_eq!(store.writes, 1);
    assert!(update.is_applied());
    assert_eq!(store.inner.read("a.ts", "Foo"), Some("number".to_string()));
}

#[test]
fn test_failed_write_stays_pending() {
    let mut store = CountingStore {
        fail: true,
        ..CountingStore::default()
    };
    let mut update = SnapshotUpdate::new("a.ts", "Foo", "number");

    let err = update.apply(&mut store).unwrap_err();
    assert!(matches!(err, SnapshotError::Rejected { .. }));
    assert!(!update.is_applied());

    store.fail = false;
    assert!(update.apply(&mut store).unwrap());
    assert_eq!(store.writes, 1);
}

#[test]
fn test_error_display() {
    let err = SnapshotError::Rejected {
        file_name: "a.ts".to_string(),
        name: "Foo".to_string(),
        reason: "read-only".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "cannot write snapshot `Foo` for `a.ts`: read-only"
    );
}
