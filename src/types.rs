//! Core data types shared by the scanner, store and diff engine.

use crate::error::StorageError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Length in bytes of every digest this crate produces.
pub const DIGEST_LEN: usize = 32;

/// Content digest of a single file (256 bits, compared by exact equality).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileDigest([u8; DIGEST_LEN]);

impl FileDigest {
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex form, as stored in the baseline file.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a hex digest. Rejects non-hex input and wrong lengths.
    pub fn from_hex(s: &str) -> Result<Self, StorageError> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| StorageError::InvalidDigest(format!("{}: {}", s, e)))?;
        let arr: [u8; DIGEST_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            StorageError::InvalidDigest(format!(
                "{}: expected {} bytes, got {}",
                s,
                DIGEST_LEN,
                v.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// First eight hex characters, for compact display.
    pub fn short(&self) -> String {
        self.to_hex()[..8].to_string()
    }
}

impl fmt::Debug for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileDigest({})", self.to_hex())
    }
}

impl fmt::Display for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for FileDigest {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for FileDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FileDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        FileDigest::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Canonical identity of a file within a scanned tree.
///
/// Root-relative and `/`-separated, names kept byte-for-byte; see [`crate::tree::path::path_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathKey(String);

impl PathKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PathKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Full observed state of a tree at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<PathKey, FileDigest>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the previous digest for that key if any.
    pub fn insert(&mut self, key: PathKey, digest: FileDigest) -> Option<FileDigest> {
        self.entries.insert(key, digest)
    }

    pub fn get(&self, key: &PathKey) -> Option<&FileDigest> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &PathKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in PathKey order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathKey, &FileDigest)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &PathKey> {
        self.entries.keys()
    }
}

impl FromIterator<(PathKey, FileDigest)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (PathKey, FileDigest)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Classification of a single difference between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    New,
    Modified,
    Deleted,
}

impl ChangeKind {
    /// Tag written to the change log, e.g. `[MODIFIED]`.
    pub fn tag(&self) -> &'static str {
        match self {
            ChangeKind::New => "[NEW]",
            ChangeKind::Modified => "[MODIFIED]",
            ChangeKind::Deleted => "[DELETED]",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub path: PathKey,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, path: PathKey) -> Self {
        Self { kind, path }
    }

    pub fn new_file(path: impl Into<String>) -> Self {
        Self::new(ChangeKind::New, PathKey::new(path))
    }

    pub fn modified(path: impl Into<String>) -> Self {
        Self::new(ChangeKind::Modified, PathKey::new(path))
    }

    pub fn deleted(path: impl Into<String>) -> Self {
        Self::new(ChangeKind::Deleted, PathKey::new(path))
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.tag(), self.path)
    }
}

/// A file or directory that could not be read during a scan.
///
/// Scans skip these and keep going; callers decide how to surface them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanIssue {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Counts produced alongside a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub unchanged: usize,
    pub new: usize,
    pub modified: usize,
    pub deleted: usize,
}

impl DiffSummary {
    pub fn changed(&self) -> usize {
        self.new + self.modified + self.deleted
    }

    pub fn is_clean(&self) -> bool {
        self.changed() == 0
    }
}
