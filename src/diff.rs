//! Diff Engine
//!
//! Compares a baseline snapshot with a fresh one and classifies every path that
//! differs. Pure: no I/O, same inputs always give the same events in the same order.

use crate::types::{ChangeEvent, ChangeKind, DiffSummary, Snapshot};

/// Classify the differences between `baseline` and `current`.
///
/// - in baseline, missing from current: [`ChangeKind::Deleted`]
/// - in both with different digests: [`ChangeKind::Modified`]
/// - only in current: [`ChangeKind::New`]
///
/// Unchanged paths produce nothing. Events are sorted by path, then kind.
pub fn diff(baseline: &Snapshot, current: &Snapshot) -> Vec<ChangeEvent> {
    let mut events = Vec::new();

    for (path, old_digest) in baseline.iter() {
        match current.get(path) {
            None => events.push(ChangeEvent::new(ChangeKind::Deleted, path.clone())),
            Some(new_digest) if new_digest != old_digest => {
                events.push(ChangeEvent::new(ChangeKind::Modified, path.clone()))
            }
            Some(_) => {}
        }
    }

    for path in current.keys() {
        if !baseline.contains(path) {
            events.push(ChangeEvent::new(ChangeKind::New, path.clone()));
        }
    }

    events.sort_by(|a, b| a.path.cmp(&b.path).then(a.kind.cmp(&b.kind)));
    events
}

/// Tally a diff result. `events` should come from `diff(baseline, current)`;
/// for any other list `unchanged` bottoms out at zero.
pub fn summarize(baseline: &Snapshot, events: &[ChangeEvent]) -> DiffSummary {
    let mut summary = DiffSummary::default();
    for event in events {
        match event.kind {
            ChangeKind::New => summary.new += 1,
            ChangeKind::Modified => summary.modified += 1,
            ChangeKind::Deleted => summary.deleted += 1,
        }
    }
    summary.unchanged = baseline
        .len()
        .saturating_sub(summary.modified)
        .saturating_sub(summary.deleted);
    summary
}
