//! End-to-end baseline and check scenarios through the public API

use super::test_utils::Fixture;
use fsguard::error::ApiError;
use fsguard::types::{ChangeEvent, ChangeKind};
use std::fs;

#[test]
fn test_unchanged_tree_reports_nothing_and_writes_no_log() {
    let fx = Fixture::new();
    fx.write("a.txt", "alpha");
    fx.write("sub/b.txt", "beta");

    let checker = fx.checker();
    assert_eq!(checker.create_baseline(fx.root()).unwrap().file_count, 2);

    let outcome = checker.check_integrity(fx.root()).unwrap();
    assert!(outcome.events.is_empty());
    assert_eq!(outcome.summary.unchanged, 2);
    assert!(!fx.log_path().exists());
}

#[test]
fn test_combined_changes() {
    let fx = Fixture::new();
    fx.write("keep.txt", "keep");
    fx.write("edit.txt", "v1");
    fx.write("drop.txt", "drop");

    let checker = fx.checker();
    checker.create_baseline(fx.root()).unwrap();

    fx.write("edit.txt", "v2");
    fx.remove("drop.txt");
    fx.write("nested/added.txt", "new");

    let outcome = checker.check_integrity(fx.root()).unwrap();
    assert_eq!(
        outcome.events,
        vec![
            ChangeEvent::deleted("drop.txt"),
            ChangeEvent::modified("edit.txt"),
            ChangeEvent::new_file("nested/added.txt"),
        ]
    );
    assert_eq!(outcome.summary.unchanged, 1);
    assert_eq!(outcome.summary.changed(), 3);

    let log = fs::read_to_string(fx.log_path()).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(" - [DELETED] drop.txt"));
    assert!(lines[1].ends_with(" - [MODIFIED] edit.txt"));
    assert!(lines[2].ends_with(" - [NEW] nested/added.txt"));
}

#[test]
fn test_touch_without_content_change_is_not_modified() {
    let fx = Fixture::new();
    fx.write("same.txt", "content");
    let checker = fx.checker();
    checker.create_baseline(fx.root()).unwrap();

    // Rewrite identical bytes; only mtime changes
    fx.write("same.txt", "content");
    assert!(checker.check_integrity(fx.root()).unwrap().events.is_empty());
}

#[test]
fn test_check_does_not_update_baseline() {
    let fx = Fixture::new();
    fx.write("a.txt", "1");
    let checker = fx.checker();
    checker.create_baseline(fx.root()).unwrap();

    fx.write("a.txt", "2");
    let first = checker.check_integrity(fx.root()).unwrap();
    let second = checker.check_integrity(fx.root()).unwrap();
    assert_eq!(first.events, second.events);
    assert_eq!(fs::read_to_string(fx.log_path()).unwrap().lines().count(), 2);
}

#[test]
fn test_rebaseline_accepts_current_state() {
    let fx = Fixture::new();
    fx.write("a.txt", "1");
    let checker = fx.checker();
    checker.create_baseline(fx.root()).unwrap();

    fx.write("a.txt", "2");
    checker.create_baseline(fx.root()).unwrap();
    assert!(checker.check_integrity(fx.root()).unwrap().events.is_empty());
}

#[test]
fn test_missing_baseline_fails_without_log() {
    let fx = Fixture::new();
    fx.write("a.txt", "1");

    let err = fx.checker().check_integrity(fx.root()).unwrap_err();
    assert!(matches!(err, ApiError::MissingBaseline(_)));
    assert!(!fx.log_path().exists());
}

#[test]
fn test_corrupt_baseline_fails_without_log() {
    let fx = Fixture::new();
    fx.write("a.txt", "1");
    fs::write(fx.state.path().join("baseline.json"), "[1, 2").unwrap();

    let err = fx.checker().check_integrity(fx.root()).unwrap_err();
    assert!(matches!(err, ApiError::CorruptBaseline { .. }));
    assert!(!fx.log_path().exists());
}

#[test]
fn test_empty_directory_baseline_then_new_file() {
    let fx = Fixture::new();
    let checker = fx.checker();
    assert_eq!(checker.create_baseline(fx.root()).unwrap().file_count, 0);

    fx.write("first.txt", "hello");
    let outcome = checker.check_integrity(fx.root()).unwrap();
    assert_eq!(outcome.events.len(), 1);
    assert_eq!(outcome.events[0].kind, ChangeKind::New);
}

#[test]
fn test_everything_deleted() {
    let fx = Fixture::new();
    fx.write("a.txt", "a");
    fx.write("b.txt", "b");
    let checker = fx.checker();
    checker.create_baseline(fx.root()).unwrap();

    fx.remove("a.txt");
    fx.remove("b.txt");
    let outcome = checker.check_integrity(fx.root()).unwrap();
    assert!(outcome.events.iter().all(|e| e.kind == ChangeKind::Deleted));
    assert_eq!(outcome.summary.deleted, 2);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped_and_reported() {
    use std::os::unix::fs::PermissionsExt;

    let fx = Fixture::new();
    fx.write("ok.txt", "fine");
    fx.write("locked.txt", "secret");
    let locked = fx.root().join("locked.txt");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits
    if fs::read(&locked).is_ok() {
        return;
    }

    let outcome = fx.checker().create_baseline(fx.root()).unwrap();
    assert_eq!(outcome.file_count, 1);
    assert_eq!(outcome.issues.len(), 1);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}

#[test]
fn test_legacy_flat_baseline_checks_clean_and_detects_tampering() {
    use fsguard::tree::hasher::{digest_bytes, HashAlgorithm};
    use std::collections::BTreeMap;

    let fx = Fixture::new();
    fx.write("hello.txt", "hello");

    // Directory typed with a trailing slash, keys joined onto it
    let typed = format!("{}/", fx.root().display());
    let document: BTreeMap<String, String> = [(
        format!("{}hello.txt", typed),
        digest_bytes(HashAlgorithm::Sha256, b"hello").to_hex(),
    )]
    .into_iter()
    .collect();
    fs::write(
        fx.state.path().join("baseline.json"),
        serde_json::to_string(&document).unwrap(),
    )
    .unwrap();

    let checker = fx.checker();
    let typed_root = std::path::PathBuf::from(&typed);
    assert!(checker.check_integrity(&typed_root).unwrap().events.is_empty());
    assert!(!fx.log_path().exists());

    fx.write("hello.txt", "changed");
    fx.write("extra.txt", "new");
    let outcome = checker.check_integrity(&typed_root).unwrap();
    assert_eq!(
        outcome.events,
        vec![
            ChangeEvent::new_file("extra.txt"),
            ChangeEvent::modified("hello.txt"),
        ]
    );
}
