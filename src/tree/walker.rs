//! Filesystem walker for enumerating regular files under a root

use crate::tree::path::normalize_path_string;
use crate::types::ScanIssue;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Filesystem walker configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false, avoids cycles)
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Component names (".git") or root-relative prefixes ("logs/archive") to skip
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
}

/// Result of a walk: regular files plus anything that could not be visited
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    /// Regular files, sorted by path
    pub files: Vec<PathBuf>,
    pub issues: Vec<ScanIssue>,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the tree and collect regular files.
    ///
    /// Directories are descended into but not returned. Symlinks (unless followed),
    /// sockets, FIFOs and device nodes are left out. Entries that cannot be read are
    /// recorded as issues and the walk carries on.
    pub fn walk(&self) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .into_iter()
            .filter_entry(|entry| !self.should_ignore(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    let reason = if e.loop_ancestor().is_some() {
                        "symlink cycle detected".to_string()
                    } else {
                        e.to_string()
                    };
                    warn!(path = %path.display(), %reason, "Skipping unreadable entry");
                    outcome.issues.push(ScanIssue { path, reason });
                    continue;
                }
            };

            // With follow_links, file_type() already reflects the link target
            if entry.file_type().is_file() {
                outcome.files.push(entry.into_path());
            } else if !entry.file_type().is_dir() {
                debug!(path = %entry.path().display(), "Skipping non-regular entry");
            }
        }

        outcome.files.sort();
        outcome
    }

    /// Check if an entry should be ignored based on ignore patterns
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if self.config.ignore_patterns.is_empty() || entry.depth() == 0 {
            return false;
        }
        let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());

        // Patterns are typed by hand; compare NFC forms so either spelling matches
        self.config.ignore_patterns.iter().any(|pattern| {
            let pattern = normalize_path_string(pattern);
            if pattern.contains('/') {
                let relative = normalize_path_string(&relative.to_string_lossy());
                Path::new(&relative).starts_with(&pattern)
            } else {
                relative.components().any(|component| match component {
                    Component::Normal(name) => {
                        normalize_path_string(&name.to_string_lossy()) == pattern
                    }
                    _ => false,
                })
            }
        })
    }
}
