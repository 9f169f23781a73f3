//! CLI presentation: turn outcomes into text or JSON for stdout.

use crate::api::{BaselineOutcome, CheckOutcome};
use crate::error::ApiError;
use crate::store::Baseline;
use crate::types::{ChangeKind, ScanIssue};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::fmt::Write;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to render JSON: {}", e)))
}

fn paint_tag(kind: ChangeKind, color: bool) -> String {
    if !color {
        return kind.tag().to_string();
    }
    match kind {
        ChangeKind::New => kind.tag().green().to_string(),
        ChangeKind::Modified => kind.tag().yellow().to_string(),
        ChangeKind::Deleted => kind.tag().red().to_string(),
    }
}

fn push_issues(out: &mut String, issues: &[ScanIssue], color: bool) {
    if issues.is_empty() {
        return;
    }
    let heading = format!("Skipped {} unreadable path(s):", issues.len());
    if color {
        let _ = writeln!(out, "{}", heading.bright_red());
    } else {
        let _ = writeln!(out, "{}", heading);
    }
    for issue in issues {
        let _ = writeln!(out, "  {}", issue);
    }
}

pub fn format_baseline_created(outcome: &BaselineOutcome, color: bool) -> String {
    let mut out = String::new();
    push_issues(&mut out, &outcome.issues, color);
    let line = format!(
        "Baseline created: {} file(s) under {} hashed with {}, saved to {}",
        outcome.file_count,
        outcome.root.display(),
        outcome.algorithm,
        outcome.baseline_path.display()
    );
    if color {
        out.push_str(&line.green().to_string());
    } else {
        out.push_str(&line);
    }
    out
}

pub fn format_check_text(outcome: &CheckOutcome, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Checking integrity of {}", outcome.root.display());

    for event in &outcome.events {
        let _ = writeln!(out, "{} {}", paint_tag(event.kind, color), event.path);
    }
    push_issues(&mut out, &outcome.issues, color);

    let summary = &outcome.summary;
    if summary.is_clean() {
        let line = format!(
            "No changes detected ({} file(s) unchanged).",
            summary.unchanged
        );
        if color {
            out.push_str(&line.green().to_string());
        } else {
            out.push_str(&line);
        }
    } else {
        let _ = write!(
            out,
            "Integrity check complete: {} new, {} modified, {} deleted, {} unchanged. Results appended to {}",
            summary.new,
            summary.modified,
            summary.deleted,
            summary.unchanged,
            outcome.log_path.display()
        );
    }
    out
}

pub fn format_check_json(outcome: &CheckOutcome) -> Result<String, ApiError> {
    to_json(outcome)
}

pub fn format_baseline_table(baseline: &Baseline) -> String {
    let mut out = String::new();
    let root = baseline
        .root
        .as_ref()
        .map(|r| r.display().to_string())
        .unwrap_or_else(|| "(unknown)".to_string());
    let created = baseline
        .created_at
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "(unknown)".to_string());
    let _ = writeln!(out, "Root:      {}", root);
    let _ = writeln!(out, "Created:   {}", created);
    let _ = writeln!(out, "Algorithm: {}", baseline.algorithm);
    let _ = writeln!(out, "Files:     {}", baseline.snapshot.len());

    if baseline.snapshot.is_empty() {
        return out.trim_end().to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Path", "Digest"]);
    for (path, digest) in baseline.snapshot.iter() {
        table.add_row(vec![path.to_string(), digest.to_hex()]);
    }
    out.push_str(&table.to_string());
    out
}

pub fn format_baseline_json(baseline: &Baseline) -> Result<String, ApiError> {
    to_json(&serde_json::json!({
        "algorithm": baseline.algorithm,
        "root": baseline.root,
        "created_at": baseline.created_at,
        "files": baseline.snapshot,
    }))
}

/// Render change log lines, optionally only the last `tail` of them.
pub fn format_log_lines(lines: &[String], tail: Option<usize>) -> String {
    if lines.is_empty() {
        return "Change log is empty.".to_string();
    }
    let start = tail.map(|n| lines.len().saturating_sub(n)).unwrap_or(0);
    lines[start..].join("\n")
}
