//! Baseline Store
//!
//! Persists the last known-good [`Snapshot`] and the append-only change log.

pub mod baseline;
pub mod changelog;

pub use baseline::JsonBaselineStore;
pub use changelog::ChangeLog;

use crate::error::StorageError;
use crate::tree::hasher::HashAlgorithm;
use crate::types::{PathKey, Snapshot};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// A persisted snapshot plus where and how it was taken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub algorithm: HashAlgorithm,
    /// Canonical root the snapshot was taken from (None for legacy baselines)
    pub root: Option<PathBuf>,
    /// Creation time (None for legacy baselines)
    pub created_at: Option<DateTime<Utc>>,
    pub snapshot: Snapshot,
}

impl Baseline {
    pub fn new(algorithm: HashAlgorithm, root: PathBuf, snapshot: Snapshot) -> Self {
        Self {
            algorithm,
            root: Some(root),
            created_at: Some(Utc::now()),
            snapshot,
        }
    }
}

impl Baseline {
    /// Baselines written by earlier tooling carry no root or timestamp.
    pub fn is_legacy(&self) -> bool {
        self.root.is_none()
    }

    /// Make legacy keys relative to the directory they were recorded under.
    ///
    /// Legacy documents key each file by the scanned directory as it was typed,
    /// joined with the file's path (`data/sub/a.txt`). Each key is stripped of the
    /// first of `dirs` that prefixes it; keys matching none are kept unchanged.
    /// Versioned baselines are returned as-is.
    pub fn rebase_legacy(self, dirs: &[PathBuf]) -> Self {
        if !self.is_legacy() {
            return self;
        }
        let prefixes: Vec<String> = dirs.iter().filter_map(|d| legacy_prefix(d)).collect();
        let snapshot = self
            .snapshot
            .iter()
            .map(|(key, digest)| {
                let key = legacy_separators(key.as_str());
                let rebased = prefixes
                    .iter()
                    .find_map(|prefix| key.strip_prefix(prefix.as_str()))
                    .filter(|rest| !rest.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| key.clone());
                (PathKey::new(rebased), *digest)
            })
            .collect();
        Self { snapshot, ..self }
    }
}

/// Legacy keys use the platform separator; PathKeys always use `/`.
fn legacy_separators(key: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        key.to_string()
    } else {
        key.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// `data/` and `data` both prefix keys as `data/`; `/` prefixes them as `/`.
fn legacy_prefix(dir: &Path) -> Option<String> {
    let dir = legacy_separators(dir.to_str()?);
    let trimmed = dir.trim_end_matches('/');
    Some(format!("{}/", trimmed))
}

/// Baseline persistence interface
///
/// `load` must distinguish "no baseline yet" ([`StorageError::MissingBaseline`]) from
/// a baseline that covers zero files.
pub trait BaselineStore {
    /// Replace any existing baseline with `baseline`.
    fn save(&self, baseline: &Baseline) -> Result<(), StorageError>;

    fn load(&self) -> Result<Baseline, StorageError>;

    fn exists(&self) -> bool;

    /// Human-readable location, used in messages.
    fn location(&self) -> PathBuf;
}
