//! Property-based tests for baseline persistence

use fsguard::store::{Baseline, BaselineStore, JsonBaselineStore};
use fsguard::tree::hasher::HashAlgorithm;
use fsguard::types::{FileDigest, PathKey, Snapshot};
use proptest::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Keys with spaces, quotes, backslashes and non-ASCII text
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ._/\"\\\\'é漢🙂-]{1,16}"
}

fn snapshot_strategy() -> impl Strategy<Value = Vec<(String, [u8; 32])>> {
    prop::collection::vec((key_strategy(), any::<[u8; 32]>()), 0..16)
}

/// Saving then loading gives back the same snapshot, whatever its keys and digests
#[test]
fn test_save_load_roundtrip_property() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonBaselineStore::new(temp_dir.path().join("baseline.json"));
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(snapshot_strategy(), any::<bool>()),
            |(entries, use_blake3)| {
                let snapshot: Snapshot = entries
                    .into_iter()
                    .map(|(k, d)| (PathKey::new(k), FileDigest::from_bytes(d)))
                    .collect();
                let algorithm = if use_blake3 {
                    HashAlgorithm::Blake3
                } else {
                    HashAlgorithm::Sha256
                };
                let baseline = Baseline::new(algorithm, PathBuf::from("/srv/data"), snapshot);

                store.save(&baseline).unwrap();
                let loaded = store.load().unwrap();

                prop_assert_eq!(&loaded.snapshot, &baseline.snapshot);
                prop_assert_eq!(loaded.algorithm, algorithm);
                prop_assert_eq!(loaded.root, baseline.root);
                Ok(())
            },
        )
        .unwrap();
}
