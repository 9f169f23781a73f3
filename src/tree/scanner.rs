//! Tree scanner: walk a root and hash every regular file into a Snapshot

use crate::error::ApiError;
use crate::tree::hasher::{self, HashAlgorithm};
use crate::tree::path::{canonicalize_root, path_key};
use crate::tree::walker::{Walker, WalkerConfig};
use crate::types::{ScanIssue, Snapshot};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, trace, warn};

/// Everything a single scan observed
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Canonical root that was scanned
    pub root: PathBuf,
    pub algorithm: HashAlgorithm,
    pub snapshot: Snapshot,
    /// Files and directories that were skipped because they could not be read
    pub issues: Vec<ScanIssue>,
}

/// Scanner turning a directory tree into a [`Snapshot`]
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    algorithm: HashAlgorithm,
    walker_config: WalkerConfig,
    exclude: Vec<PathBuf>,
}

impl Scanner {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
    }

    /// Set walker config (symlinks, ignore patterns, depth)
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Skip these files even when they live inside the scanned root.
    ///
    /// Paths that do not exist yet are fine; they are compared after canonicalizing
    /// their parent directory.
    pub fn with_exclusions(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.exclude = paths.into_iter().map(|p| resolve_exclusion(&p)).collect();
        self
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Scan `root` and hash every regular file beneath it.
    ///
    /// The root is checked once up front; a missing root or a non-directory fails
    /// before any work is done. Individual unreadable files are recorded in
    /// [`ScanReport::issues`] and do not abort the scan.
    #[instrument(skip(self), fields(root = %root.display(), algorithm = %self.algorithm))]
    pub fn scan(&self, root: &Path) -> Result<ScanReport, ApiError> {
        let start = Instant::now();
        let root = canonicalize_root(root)?;
        if !root.is_dir() {
            return Err(ApiError::NotADirectory(root));
        }
        info!("Starting scan");

        let walk = Walker::with_config(root.clone(), self.walker_config.clone()).walk();
        debug!(file_count = walk.files.len(), "Walked filesystem");

        let mut snapshot = Snapshot::new();
        let mut issues = walk.issues;

        for file in walk.files {
            if self.exclude.iter().any(|excluded| excluded == &file) {
                debug!(path = %file.display(), "Skipping excluded file");
                continue;
            }
            let Some(key) = path_key(&root, &file) else {
                warn!(path = %file.display(), "Skipping file with non-UTF-8 name");
                issues.push(ScanIssue {
                    path: file,
                    reason: "file name is not valid UTF-8; not tracked".to_string(),
                });
                continue;
            };
            if snapshot.contains(&key) {
                warn!(path = %file.display(), key = %key, "Path key collision");
                issues.push(ScanIssue {
                    path: file,
                    reason: format!("path key collision with already recorded {}", key),
                });
                continue;
            }
            match hasher::digest_file(self.algorithm, &file) {
                Ok(digest) => {
                    trace!(path = %key, digest = %digest, "Hashed file");
                    snapshot.insert(key, digest);
                }
                Err(e) => {
                    warn!(path = %file.display(), error = %e, "Skipping unreadable file");
                    issues.push(ScanIssue {
                        path: file,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            files = snapshot.len(),
            issues = issues.len(),
            duration_ms = start.elapsed().as_millis(),
            "Scan completed"
        );

        Ok(ScanReport {
            root,
            algorithm: self.algorithm,
            snapshot,
            issues,
        })
    }
}

/// Make an exclusion path comparable with walker output (absolute, symlinks resolved).
fn resolve_exclusion(path: &Path) -> PathBuf {
    if let Ok(canonical) = dunce::canonicalize(path) {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            dunce::canonicalize(parent)
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}
