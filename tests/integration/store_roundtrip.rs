//! Baseline store and change log persistence

use fsguard::error::StorageError;
use fsguard::store::{Baseline, BaselineStore, ChangeLog, JsonBaselineStore};
use fsguard::tree::hasher::{digest_bytes, HashAlgorithm};
use fsguard::types::{ChangeEvent, PathKey, Snapshot};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_snapshot() -> Snapshot {
    [
        (PathKey::from("a.txt"), digest_bytes(HashAlgorithm::Sha256, b"a")),
        (PathKey::from("dir/b.txt"), digest_bytes(HashAlgorithm::Sha256, b"b")),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_save_then_load_preserves_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonBaselineStore::new(temp_dir.path().join("baseline.json"));
    assert!(!store.exists());

    let baseline = Baseline::new(HashAlgorithm::Sha256, PathBuf::from("/srv"), sample_snapshot());
    store.save(&baseline).unwrap();
    assert!(store.exists());

    let loaded = store.load().unwrap();
    assert_eq!(loaded.snapshot, baseline.snapshot);
    assert_eq!(loaded.algorithm, HashAlgorithm::Sha256);
    assert_eq!(loaded.root, Some(PathBuf::from("/srv")));
}

#[test]
fn test_save_overwrites_previous_baseline() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonBaselineStore::new(temp_dir.path().join("baseline.json"));
    store
        .save(&Baseline::new(HashAlgorithm::Sha256, PathBuf::from("/a"), sample_snapshot()))
        .unwrap();
    store
        .save(&Baseline::new(HashAlgorithm::Blake3, PathBuf::from("/b"), Snapshot::new()))
        .unwrap();

    let loaded = store.load().unwrap();
    assert!(loaded.snapshot.is_empty());
    assert_eq!(loaded.algorithm, HashAlgorithm::Blake3);
}

#[test]
fn test_flat_legacy_document_loads() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("baseline.json");
    let digest = digest_bytes(HashAlgorithm::Sha256, b"a").to_hex();
    fs::write(&path, format!("{{\"a.txt\": \"{}\"}}", digest)).unwrap();

    let loaded = JsonBaselineStore::new(&path).load().unwrap();
    assert_eq!(loaded.algorithm, HashAlgorithm::Sha256);
    assert!(loaded.root.is_none());
    assert_eq!(loaded.snapshot.get(&PathKey::from("a.txt")).unwrap().to_hex(), digest);
}

#[test]
fn test_missing_and_corrupt_are_distinct() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("baseline.json");
    let store = JsonBaselineStore::new(&path);
    assert!(matches!(store.load(), Err(StorageError::MissingBaseline(_))));

    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(store.load(), Err(StorageError::Serialization { .. })));
}

#[test]
fn test_change_log_appends_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let log = ChangeLog::new(temp_dir.path().join("integrity_log.txt"));

    log.append(&[ChangeEvent::new_file("a")]).unwrap();
    log.append(&[]).unwrap();
    log.append(&[ChangeEvent::modified("b"), ChangeEvent::deleted("c")]).unwrap();

    let lines = log.read_lines().unwrap();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(" - [NEW] a"));
    assert!(lines[1].ends_with(" - [MODIFIED] b"));
    assert!(lines[2].ends_with(" - [DELETED] c"));
}
