//! Append-only change log
//!
//! One line per change event: `<local timestamp> - [KIND] <path>`.
//! The file is only ever opened in append mode.

use crate::error::StorageError;
use crate::types::ChangeEvent;
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone)]
pub struct ChangeLog {
    path: PathBuf,
}

impl ChangeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line per event, stamped with the current local time.
    ///
    /// An empty slice leaves the file untouched (it is not even created).
    pub fn append(&self, events: &[ChangeEvent]) -> Result<(), StorageError> {
        self.append_at(events, Local::now())
    }

    /// Append with an explicit timestamp shared by every line.
    pub fn append_at(
        &self,
        events: &[ChangeEvent],
        at: DateTime<Local>,
    ) -> Result<(), StorageError> {
        if events.is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        let stamp = at.format(TIMESTAMP_FORMAT);
        for event in events {
            writeln!(writer, "{} - {}", stamp, event)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// All lines currently in the log (empty if the log does not exist).
    pub fn read_lines(&self) -> Result<Vec<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}
