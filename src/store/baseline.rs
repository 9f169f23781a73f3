//! JSON file persistence for baselines

use crate::error::StorageError;
use crate::store::{Baseline, BaselineStore};
use crate::tree::hasher::HashAlgorithm;
use crate::types::{FileDigest, PathKey, Snapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Current on-disk document version
const BASELINE_VERSION: u32 = 1;

/// On-disk document (version 1).
#[derive(Debug, Serialize, Deserialize)]
struct BaselineDocument {
    version: u32,
    algorithm: HashAlgorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    root: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    files: Snapshot,
}

/// Either the versioned document or the bare `{ path: sha256hex }` map written by
/// earlier tooling.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredBaseline {
    Versioned(BaselineDocument),
    Legacy(BTreeMap<String, String>),
}

/// Baseline store backed by a single pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonBaselineStore {
    path: PathBuf,
}

impl JsonBaselineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn serialization_error(&self, message: impl Into<String>) -> StorageError {
        StorageError::Serialization {
            path: self.path.clone(),
            message: message.into(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "baseline".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl BaselineStore for JsonBaselineStore {
    /// Write to a sibling temp file, then rename over the target so a crash
    /// never leaves a half-written baseline behind.
    fn save(&self, baseline: &Baseline) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let document = BaselineDocument {
            version: BASELINE_VERSION,
            algorithm: baseline.algorithm,
            root: baseline.root.clone(),
            created_at: baseline.created_at,
            files: baseline.snapshot.clone(),
        };
        let mut serialized = serde_json::to_vec_pretty(&document)
            .map_err(|e| self.serialization_error(e.to_string()))?;
        serialized.push(b'\n');

        let temp_path = self.temp_path();
        fs::write(&temp_path, &serialized)?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::IoError(e)
        })?;

        debug!(
            path = %self.path.display(),
            files = baseline.snapshot.len(),
            "Baseline written"
        );
        Ok(())
    }

    fn load(&self) -> Result<Baseline, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::MissingBaseline(self.path.clone()));
            }
            Err(e) => return Err(StorageError::IoError(e)),
        };

        let stored: StoredBaseline = serde_json::from_slice(&bytes).map_err(|e| {
            self.serialization_error(format!(
                "not a baseline document ({}); digests must be {}-character hex",
                e,
                crate::types::DIGEST_LEN * 2
            ))
        })?;

        match stored {
            StoredBaseline::Versioned(document) => {
                if document.version != BASELINE_VERSION {
                    return Err(self.serialization_error(format!(
                        "unsupported baseline version {}",
                        document.version
                    )));
                }
                Ok(Baseline {
                    algorithm: document.algorithm,
                    root: document.root,
                    created_at: document.created_at,
                    snapshot: document.files,
                })
            }
            StoredBaseline::Legacy(entries) => {
                warn!(
                    path = %self.path.display(),
                    "Loading legacy baseline without metadata; assuming sha256"
                );
                let mut snapshot = Snapshot::new();
                for (path, hex_digest) in entries {
                    let digest = FileDigest::from_hex(&hex_digest)
                        .map_err(|e| self.serialization_error(e.to_string()))?;
                    snapshot.insert(PathKey::new(path), digest);
                }
                Ok(Baseline {
                    algorithm: HashAlgorithm::Sha256,
                    root: None,
                    created_at: None,
                    snapshot,
                })
            }
        }
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
