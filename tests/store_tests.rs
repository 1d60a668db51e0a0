//! Integration tests for the JsonVault store engine.

use std::fs;

use jsonvault::store::{Document, Store, StoreOptions};
use jsonvault::StoreError;
use serde_json::json;
use tempfile::TempDir;

/// Helper: create a temporary store file path inside a fresh temp dir.
fn store_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("s.enc");
    (dir, path)
}

// ---------------------------------------------------------------------------
// Creation and re-opening
// ---------------------------------------------------------------------------

#[test]
fn open_creates_empty_store() {
    let (_dir, path) = store_path();

    let store = Store::open(&path, "p1").expect("create store");
    assert!(path.exists());

    let doc = store.dump().unwrap();
    assert_eq!(doc, Document::default());

    // The file is hex text, not JSON.
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.bytes().all(|b| b.is_ascii_hexdigit()));
}

#[test]
fn reopen_with_same_passphrase() {
    let (_dir, path) = store_path();

    let mut store = Store::open(&path, "p1").unwrap();
    store.set("a", "1").unwrap();
    drop(store);

    let store = Store::open(&path, "p1").expect("reopen");
    assert_eq!(store.get("a").unwrap(), Some(json!("1")));
}

#[test]
fn reopen_with_wrong_passphrase_is_invalid_key() {
    let (_dir, path) = store_path();
    Store::open(&path, "p1").unwrap();

    let result = Store::open(&path, "p2");
    assert!(matches!(result, Err(StoreError::InvalidKey(_))));
}

#[test]
fn with_options_uses_given_path() {
    let (_dir, path) = store_path();
    let store = Store::with_options(StoreOptions::new("p1").path(&path)).unwrap();
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn corrupted_file_fails_reads() {
    let (_dir, path) = store_path();
    let store = Store::open(&path, "p1").unwrap();

    let mut raw = fs::read_to_string(&path).unwrap().into_bytes();
    let last = raw.len() - 1;
    raw[last] = if raw[last] == b'0' { b'1' } else { b'0' };
    fs::write(&path, &raw).unwrap();

    assert!(matches!(store.get("a"), Err(StoreError::DecryptionFailed)));
    assert!(matches!(Store::open(&path, "p1"), Err(StoreError::InvalidKey(_))));
}

// ---------------------------------------------------------------------------
// get / set
// ---------------------------------------------------------------------------

#[test]
fn concrete_scenario() {
    let (_dir, path) = store_path();
    let mut store = Store::open(&path, "p1").unwrap();

    store.set("a", "1").unwrap();
    store.set_in("col", "b", "2").unwrap();

    assert_eq!(store.get("a").unwrap(), Some(json!("1")));
    assert_eq!(store.get_in("col", "b").unwrap(), Some(json!("2")));
    assert_eq!(store.get("col").unwrap(), Some(json!({ "b": "2" })));
    assert_eq!(store.get("missing").unwrap(), None);
}

#[test]
fn roundtrip_arbitrary_json_values() {
    let (_dir, path) = store_path();
    let mut store = Store::open(&path, "p1").unwrap();

    let values = [
        json!(null),
        json!(true),
        json!(-12.5),
        json!("unicode ✓ text"),
        json!([1, "two", { "three": 3 }]),
        json!({ "nested": { "deep": [null, false] } }),
    ];

    for (i, value) in values.iter().enumerate() {
        let key = format!("k{i}");
        store.set(&key, value).unwrap();
        store.set_in("col", &key, value).unwrap();
    }

    for (i, value) in values.iter().enumerate() {
        let key = format!("k{i}");
        assert_eq!(store.get(&key).unwrap().as_ref(), Some(value));
        assert_eq!(store.get_in("col", &key).unwrap().as_ref(), Some(value));
    }
}

#[test]
fn set_accepts_serializable_structs() {
    #[derive(serde::Serialize)]
    struct Endpoint {
        host: String,
        port: u16,
    }

    let (_dir, path) = store_path();
    let mut store = Store::open(&path, "p1").unwrap();
    store
        .set("endpoint", Endpoint { host: "localhost".into(), port: 5432 })
        .unwrap();

    assert_eq!(
        store.get("endpoint").unwrap(),
        Some(json!({ "host": "localhost", "port": 5432 }))
    );
}

#[test]
fn missing_collection_returns_none() {
    let (_dir, path) = store_path();
    let mut store = Store::open(&path, "p1").unwrap();
    store.set("plain", 1).unwrap();

    assert_eq!(store.get_in("nope", "k").unwrap(), None);
    assert_eq!(store.get_in("plain", "k").unwrap(), None);
}

#[test]
fn empty_key_is_invalid_argument() {
    let (_dir, path) = store_path();
    let mut store = Store::open(&path, "p1").unwrap();

    assert!(matches!(store.set("", 1), Err(StoreError::InvalidArgument(_))));
    assert!(matches!(store.set_in("", "k", 1), Err(StoreError::InvalidArgument(_))));
}

#[test]
fn collection_name_cannot_collide_with_plain_key() {
    let (_dir, path) = store_path();
    let mut store = Store::open(&path, "p1").unwrap();
    store.set("name", "value").unwrap();

    let result = store.set_in("name", "k", 1);
    assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
    assert_eq!(store.get("name").unwrap(), Some(json!("value")));
}

#[test]
fn same_passphrase_stores_share_key() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.enc");
    let b = dir.path().join("b.enc");

    let mut store_a = Store::open(&a, "shared").unwrap();
    store_a.set("x", 1).unwrap();
    Store::open(&b, "shared").unwrap();

    // Unsalted derivation: b's file content is readable under a's key.
    fs::copy(&a, &b).unwrap();
    let store_b = Store::open(&b, "shared").unwrap();
    assert_eq!(store_b.get("x").unwrap(), Some(json!(1)));
}

// ---------------------------------------------------------------------------
// keys / remove
// ---------------------------------------------------------------------------

#[test]
fn keys_and_remove() {
    let (_dir, path) = store_path();
    let mut store = Store::open(&path, "p1").unwrap();
    store.set("z", 1).unwrap();
    store.set("a", 2).unwrap();
    store.set_in("col", "k", 3).unwrap();

    assert_eq!(store.keys(None).unwrap(), vec!["a", "col", "z"]);
    assert_eq!(store.keys(Some("col")).unwrap(), vec!["k"]);

    assert_eq!(store.remove("z").unwrap(), Some(json!(1)));
    assert_eq!(store.remove_in("col", "k").unwrap(), Some(json!(3)));
    assert_eq!(store.get("z").unwrap(), None);
    assert_eq!(store.get("col").unwrap(), Some(json!({})));
}

// ---------------------------------------------------------------------------
// dump / import / delete
// ---------------------------------------------------------------------------

#[test]
fn dump_and_import_between_stores() {
    let dir = TempDir::new().unwrap();
    let mut source = Store::open(dir.path().join("src.enc"), "one").unwrap();
    source.set("a", "1").unwrap();
    source.set_in("col", "b", [1, 2, 3]).unwrap();

    let dump = source.dump().unwrap();

    let mut target = Store::open(dir.path().join("dst.enc"), "two").unwrap();
    target.set("stale", true).unwrap();
    target.import(&dump).unwrap();

    assert_eq!(target.dump().unwrap(), dump);
    assert_eq!(target.get("stale").unwrap(), None);
}

#[test]
fn delete_removes_file_and_reports_missing() {
    let (_dir, path) = store_path();
    let store = Store::open(&path, "p1").unwrap();

    store.delete().unwrap();
    assert!(!path.exists());

    assert!(matches!(store.delete(), Err(StoreError::StoreNotFound(_))));
    assert!(matches!(store.get("a"), Err(StoreError::StoreNotFound(_))));
}

// ---------------------------------------------------------------------------
// check_key
// ---------------------------------------------------------------------------

#[test]
fn check_key_reports_correctness() {
    let (_dir, path) = store_path();

    // Absent file: any passphrase may create it.
    assert!(Store::check_key(&path, "anything").unwrap());

    Store::open(&path, "p1").unwrap();
    assert!(Store::check_key(&path, "p1").unwrap());
    assert!(!Store::check_key(&path, "p2").unwrap());
}
