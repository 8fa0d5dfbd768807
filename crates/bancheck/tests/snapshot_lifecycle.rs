//! End-to-end snapshot lifecycle tests against real snapshot files.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use bancheck::format::unwrap_storage;
use bancheck::{
    accept_all, json, verify, BancheckError, Formatter, Options, SnapshotStore, Tests,
    UpdateMode, Value,
};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn snapshot_path(temp: &TempDir) -> PathBuf {
    temp.path().join("bancheck").join("snapshots.snap")
}

fn options(temp: &TempDir) -> Options {
    Options::new().with_snapshot_path(snapshot_path(temp))
}

fn stored(temp: &TempDir) -> Vec<(String, String)> {
    let store = SnapshotStore::open(snapshot_path(temp), UpdateMode::RecordNew).unwrap();
    store
        .names()
        .map(|name| (name.to_string(), store.get(name).unwrap().to_string()))
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_accept_on_empty_store() {
    let temp = TempDir::new().unwrap();
    let report = accept_all(&Tests::new().with("foo", 42), &options(&temp)).unwrap();

    assert_eq!(report.passes.len(), 1);
    assert_eq!(report.passes["foo"], "42");
    assert_eq!(stored(&temp), vec![("foo".to_string(), "42".to_string())]);
}

#[test]
fn test_verify_matching_value() {
    let temp = TempDir::new().unwrap();
    accept_all(&Tests::new().with("foo", 42), &options(&temp)).unwrap();

    let report = verify(&Tests::new().with("foo", 42), &options(&temp)).unwrap();
    assert_eq!(report.passes["foo"], "42");
    assert!(report.fails.is_empty());
    assert!(report.is_success());
}

#[test]
fn test_verify_mismatching_value() {
    let temp = TempDir::new().unwrap();
    accept_all(&Tests::new().with("foo", 42), &options(&temp)).unwrap();

    let report = verify(&Tests::new().with("foo", 43), &options(&temp)).unwrap();
    assert!(report.passes.is_empty());
    let fail = &report.fails["foo"];
    assert_eq!(fail.expected, "42");
    assert_eq!(fail.actual, "43");
    assert!(!fail.diff.is_empty());
    assert!(fail.diff.contains("42"));
    assert!(fail.diff.contains("43"));
    // comparison leaves the stored value alone
    assert_eq!(stored(&temp), vec![("foo".to_string(), "42".to_string())]);
}

#[test]
fn test_invalid_tests_touch_nothing() {
    let temp = TempDir::new().unwrap();
    let opts = json!({ "snapshotPath": snapshot_path(&temp) });

    let err = json::accept_all(&serde_json::Value::Null, Some(&opts)).unwrap_err();
    assert!(matches!(err, BancheckError::InvalidArgument { .. }));
    assert!(!snapshot_path(&temp).exists());
    assert!(!temp.path().join("bancheck").exists());
}

#[test]
fn test_invalid_options_touch_nothing() {
    let temp = TempDir::new().unwrap();
    let err = json::verify(&json!({ "foo": 1 }), Some(&json!([1, 2]))).unwrap_err();
    assert!(matches!(err, BancheckError::InvalidArgument { .. }));
    assert!(!temp.path().join("bancheck").exists());
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_accept_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let tests = Tests::new()
        .with("obj", Value::object([("b", 1), ("a", 2)]))
        .with("text", "multi\nline");

    let first = accept_all(&tests, &options(&temp)).unwrap();
    let after_first = fs::read_to_string(snapshot_path(&temp)).unwrap();
    let second = accept_all(&tests, &options(&temp)).unwrap();
    let after_second = fs::read_to_string(snapshot_path(&temp)).unwrap();

    assert_eq!(first.passes, second.passes);
    assert_eq!(after_first, after_second);
    assert_eq!(second.summary.matched, 2);
    assert_eq!(second.summary.added, 0);
}

#[test]
fn test_new_name_always_passes_under_verify() {
    let temp = TempDir::new().unwrap();
    accept_all(&Tests::new().with("old", 1), &options(&temp)).unwrap();

    for (i, value) in [
        Value::Null,
        Value::from("x"),
        Value::array([1, 2]),
        Value::error("bad"),
    ]
    .into_iter()
    .enumerate()
    {
        let name = format!("new-{i}");
        let report = verify(&Tests::new().with(name.as_str(), value), &options(&temp)).unwrap();
        assert!(report.passes.contains_key(&name));
        assert!(report.fails.is_empty());
    }
}

#[test]
fn test_equality_is_exact_serialized_text() {
    let temp = TempDir::new().unwrap();
    let formatter = Formatter::new();
    let original = Value::object([("n", Value::Float(1.0))]);
    accept_all(&Tests::new().with("v", original), &options(&temp)).unwrap();

    // Int(1) and Float(1.0) print the same, so they compare equal
    let same = Value::object([("n", Value::Int(1))]);
    let report = verify(&Tests::new().with("v", same.clone()), &options(&temp)).unwrap();
    assert_eq!(report.passes["v"], formatter.serialize_plain(&same));

    let different = Value::object([("n", Value::Float(1.5))]);
    let report = verify(&Tests::new().with("v", different.clone()), &options(&temp)).unwrap();
    let fail = &report.fails["v"];
    assert_eq!(fail.expected, "Object {\n  \"n\": 1,\n}");
    assert_eq!(fail.actual, formatter.serialize_plain(&different));
}

#[test]
fn test_wrap_round_trip_through_file() {
    let temp = TempDir::new().unwrap();
    let formatter = Formatter::new();
    let value = Value::map([("k", Value::set(["a\r\nb"]))]);
    accept_all(&Tests::new().with("m", value.clone()), &options(&temp)).unwrap();

    let entries = stored(&temp);
    assert_eq!(unwrap_storage(&entries[0].1), formatter.serialize_plain(&value));
    assert!(!entries[0].1.contains('\r'));
}

#[test]
fn test_accept_prunes_unchecked_entries() {
    let temp = TempDir::new().unwrap();
    accept_all(&Tests::new().with("a", 1).with("b", 2), &options(&temp)).unwrap();

    let report = accept_all(&Tests::new().with("a", 1), &options(&temp)).unwrap();
    assert_eq!(report.summary.removed, 1);
    assert_eq!(stored(&temp), vec![("a".to_string(), "1".to_string())]);
}

#[test]
fn test_verify_keeps_stale_entries() {
    let temp = TempDir::new().unwrap();
    accept_all(&Tests::new().with("a", 1).with("b", 2), &options(&temp)).unwrap();

    let report = verify(&Tests::new().with("a", 1), &options(&temp)).unwrap();
    assert!(report.is_success());
    assert_eq!(
        stored(&temp),
        vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string())
        ]
    );
}

#[test]
fn test_accept_with_no_tests_removes_file() {
    let temp = TempDir::new().unwrap();
    accept_all(&Tests::new().with("a", 1), &options(&temp)).unwrap();
    assert!(snapshot_path(&temp).exists());

    let report = accept_all(&Tests::new(), &options(&temp)).unwrap();
    assert!(report.passes.is_empty());
    assert!(!snapshot_path(&temp).exists());
}

// ============================================================================
// Persistence failures
// ============================================================================

#[test]
fn test_corrupt_snapshot_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = snapshot_path(&temp);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[not, a, mapping]").unwrap();

    let err = verify(&Tests::new().with("a", 1), &options(&temp)).unwrap_err();
    assert!(err.is_persistence_failure());
    // file left as it was
    assert_eq!(fs::read_to_string(&path).unwrap(), "[not, a, mapping]");
}

#[test]
fn test_json_round_trip_with_default_options_path() {
    let temp = TempDir::new().unwrap();
    let opts = json!({ "snapshot_path": snapshot_path(&temp) });

    let accepted = json::accept_all(&json!({ "cfg": { "debug": true, "level": 3 } }), Some(&opts))
        .unwrap();
    assert_eq!(
        accepted.passes["cfg"],
        "Object {\n  \"debug\": true,\n  \"level\": 3,\n}"
    );

    let verified =
        json::verify(&json!({ "cfg": { "debug": false, "level": 3 } }), Some(&opts)).unwrap();
    let fail = &verified.fails["cfg"];
    assert!(fail.diff.contains("-  \"debug\": true,"));
    assert!(fail.diff.contains("+  \"debug\": false,"));
}
