//! Core entry points: create a baseline, check a tree against it.
//!
//! The checker owns no global state. Storage locations and scan behaviour come
//! from the [`FsguardConfig`] it is built with.

use crate::config::FsguardConfig;
use crate::diff;
use crate::error::ApiError;
use crate::store::{Baseline, BaselineStore, ChangeLog, JsonBaselineStore};
use crate::tree::hasher::HashAlgorithm;
use crate::tree::scanner::Scanner;
use crate::tree::walker::WalkerConfig;
use crate::types::{ChangeEvent, DiffSummary, ScanIssue};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Result of a baseline operation
#[derive(Debug, Clone, Serialize)]
pub struct BaselineOutcome {
    pub root: PathBuf,
    pub algorithm: HashAlgorithm,
    pub file_count: usize,
    pub baseline_path: PathBuf,
    pub issues: Vec<ScanIssue>,
}

/// Result of an integrity check
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub root: PathBuf,
    pub algorithm: HashAlgorithm,
    /// Root recorded in the baseline, when known
    pub baseline_root: Option<PathBuf>,
    pub baseline_created_at: Option<DateTime<Utc>>,
    pub events: Vec<ChangeEvent>,
    pub summary: DiffSummary,
    pub issues: Vec<ScanIssue>,
    pub log_path: PathBuf,
}

impl CheckOutcome {
    pub fn has_changes(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Baseline/check orchestration over a store, a change log and a scanner
pub struct IntegrityChecker {
    store: Box<dyn BaselineStore>,
    change_log: ChangeLog,
    algorithm: HashAlgorithm,
    walker_config: WalkerConfig,
    exclusions: Vec<PathBuf>,
}

impl IntegrityChecker {
    /// Build a checker that stores its baseline and change log where `config` says.
    pub fn new(config: &FsguardConfig) -> Self {
        let store = JsonBaselineStore::new(config.storage.baseline_file.clone());
        Self::with_store(Box::new(store), config)
    }

    /// Build a checker over a caller-provided baseline store.
    pub fn with_store(store: Box<dyn BaselineStore>, config: &FsguardConfig) -> Self {
        let exclusions = vec![store.location(), config.storage.log_file.clone()];
        Self {
            store,
            change_log: ChangeLog::new(config.storage.log_file.clone()),
            algorithm: config.scan.algorithm,
            walker_config: config.scan.walker_config(),
            exclusions,
        }
    }

    pub fn baseline_location(&self) -> PathBuf {
        self.store.location()
    }

    pub fn change_log(&self) -> &ChangeLog {
        &self.change_log
    }

    fn scanner(&self, algorithm: HashAlgorithm) -> Scanner {
        Scanner::new(algorithm)
            .with_walker_config(self.walker_config.clone())
            .with_exclusions(self.exclusions.iter().cloned())
    }

    /// Scan `root` and replace the stored baseline with the result.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn create_baseline(&self, root: &Path) -> Result<BaselineOutcome, ApiError> {
        let report = self.scanner(self.algorithm).scan(root)?;
        let file_count = report.snapshot.len();

        let baseline = Baseline::new(report.algorithm, report.root.clone(), report.snapshot);
        self.store.save(&baseline)?;

        info!(
            files = file_count,
            issues = report.issues.len(),
            baseline = %self.store.location().display(),
            "Baseline created"
        );

        Ok(BaselineOutcome {
            root: report.root,
            algorithm: report.algorithm,
            file_count,
            baseline_path: self.store.location(),
            issues: report.issues,
        })
    }

    /// Compare `root` against the stored baseline and append any changes to the log.
    ///
    /// The baseline is loaded before anything else: with no baseline (or a corrupt
    /// one) this fails without scanning and without touching the change log.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn check_integrity(&self, root: &Path) -> Result<CheckOutcome, ApiError> {
        let baseline = self.store.load()?;

        if baseline.algorithm != self.algorithm {
            info!(
                baseline_algorithm = %baseline.algorithm,
                configured_algorithm = %self.algorithm,
                "Using the baseline's hash algorithm for this check"
            );
        }

        let report = self.scanner(baseline.algorithm).scan(root)?;

        let baseline = if baseline.is_legacy() {
            info!("Rebasing legacy baseline keys on the checked directory");
            baseline.rebase_legacy(&[root.to_path_buf(), report.root.clone()])
        } else {
            baseline
        };

        if let Some(baseline_root) = &baseline.root {
            if baseline_root != &report.root {
                warn!(
                    baseline_root = %baseline_root.display(),
                    checked_root = %report.root.display(),
                    "Checked directory differs from the baseline's directory"
                );
            }
        }

        let events = diff::diff(&baseline.snapshot, &report.snapshot);
        let summary = diff::summarize(&baseline.snapshot, &events);
        self.change_log.append(&events)?;

        info!(
            unchanged = summary.unchanged,
            new = summary.new,
            modified = summary.modified,
            deleted = summary.deleted,
            issues = report.issues.len(),
            "Integrity check completed"
        );

        Ok(CheckOutcome {
            root: report.root,
            algorithm: baseline.algorithm,
            baseline_root: baseline.root,
            baseline_created_at: baseline.created_at,
            events,
            summary,
            issues: report.issues,
            log_path: self.change_log.path().to_path_buf(),
        })
    }

    /// Load the stored baseline for inspection.
    pub fn show_baseline(&self) -> Result<Baseline, ApiError> {
        Ok(self.store.load()?)
    }
}
