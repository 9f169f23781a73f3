//! Property-based tests for diff classification and digest determinism

use fsguard::diff::{diff, summarize};
use fsguard::tree::hasher::{digest_bytes, digest_reader, HashAlgorithm};
use fsguard::types::{ChangeKind, FileDigest, PathKey, Snapshot};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn snapshot_strategy() -> impl Strategy<Value = BTreeMap<String, u8>> {
    prop::collection::btree_map("[a-d]{1,2}(/[a-d]{1,2})?", 0u8..4, 0..12)
}

fn to_snapshot(entries: &BTreeMap<String, u8>) -> Snapshot {
    entries
        .iter()
        .map(|(k, v)| (PathKey::new(k.clone()), FileDigest::from_bytes([*v; 32])))
        .collect()
}

/// Diffing a snapshot against itself yields nothing
#[test]
fn test_self_diff_is_empty_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&snapshot_strategy(), |entries| {
            let snapshot = to_snapshot(&entries);
            prop_assert!(diff(&snapshot, &snapshot).is_empty());
            Ok(())
        })
        .unwrap();
}

/// Each path lands in exactly the class the key sets and digests dictate
#[test]
fn test_classification_matches_set_algebra_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(snapshot_strategy(), snapshot_strategy()),
            |(before, after)| {
                let events = diff(&to_snapshot(&before), &to_snapshot(&after));

                let old_keys: BTreeSet<_> = before.keys().cloned().collect();
                let new_keys: BTreeSet<_> = after.keys().cloned().collect();
                let expected_new: BTreeSet<_> = new_keys.difference(&old_keys).cloned().collect();
                let expected_deleted: BTreeSet<_> =
                    old_keys.difference(&new_keys).cloned().collect();
                let expected_modified: BTreeSet<_> = old_keys
                    .intersection(&new_keys)
                    .filter(|k| before[*k] != after[*k])
                    .cloned()
                    .collect();

                let of_kind = |kind: ChangeKind| -> BTreeSet<String> {
                    events
                        .iter()
                        .filter(|e| e.kind == kind)
                        .map(|e| e.path.as_str().to_string())
                        .collect()
                };
                prop_assert_eq!(of_kind(ChangeKind::New), expected_new);
                prop_assert_eq!(of_kind(ChangeKind::Deleted), expected_deleted);
                prop_assert_eq!(of_kind(ChangeKind::Modified), expected_modified);

                // One event per path, in path order
                let paths: Vec<&str> = events.iter().map(|e| e.path.as_str()).collect();
                let mut sorted = paths.clone();
                sorted.sort();
                sorted.dedup();
                prop_assert_eq!(paths, sorted);

                let summary = summarize(&to_snapshot(&before), &events);
                prop_assert_eq!(
                    summary.unchanged + summary.modified + summary.deleted,
                    before.len()
                );
                Ok(())
            },
        )
        .unwrap();
}

/// Streaming in chunks gives the one-shot digest, for both algorithms
#[test]
fn test_streaming_digest_matches_one_shot_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(any::<u8>(), 0..10_000), any::<bool>()),
            |(content, use_blake3)| {
                let algorithm = if use_blake3 {
                    HashAlgorithm::Blake3
                } else {
                    HashAlgorithm::Sha256
                };
                let streamed = digest_reader(algorithm, content.as_slice()).unwrap();
                prop_assert_eq!(streamed, digest_bytes(algorithm, &content));
                Ok(())
            },
        )
        .unwrap();
}
