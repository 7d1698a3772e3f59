//! Processing reports
//!
//! Per-run record of what happened to every file and unit. Nothing is
//! swallowed: every skip and failure ends up here with a reason.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::descriptor::UnitKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UnitStatus {
    Succeeded,
    Skipped { reason: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitOutcome {
    pub unit: String,
    pub kind: UnitKind,
    #[serde(flatten)]
    pub status: UnitStatus,
}

impl UnitOutcome {
    pub fn succeeded(unit: &str, kind: UnitKind) -> Self {
        Self {
            unit: unit.to_string(),
            kind,
            status: UnitStatus::Succeeded,
        }
    }

    pub fn skipped(unit: &str, kind: UnitKind, reason: impl Into<String>) -> Self {
        Self {
            unit: unit.to_string(),
            kind,
            status: UnitStatus::Skipped {
                reason: reason.into(),
            },
        }
    }

    pub fn failed(unit: &str, kind: UnitKind, reason: impl Into<String>) -> Self {
        Self {
            unit: unit.to_string(),
            kind,
            status: UnitStatus::Failed {
                reason: reason.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// Edits applied and written back
    Written { edits: usize },
    /// Nothing to change
    Unchanged,
    /// Edits computed but not written
    DryRun { edits: usize },
    /// File changed on disk since it was parsed
    Stale,
    /// Edits could not be applied or written
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub status: FileStatus,
    pub units: Vec<UnitOutcome>,
}

impl FileReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, FileStatus::Failed { .. } | FileStatus::Stale)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseFailure {
    pub path: String,
    pub message: String,
}

/// Outcome of one Manager run
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingReport {
    pub directive: String,
    pub strategy: String,
    pub files: Vec<FileReport>,
    pub parse_failures: Vec<ParseFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ProcessingReport {
    pub fn new(directive: impl Into<String>, strategy: impl Into<String>) -> Self {
        Self {
            directive: directive.into(),
            strategy: strategy.into(),
            files: Vec::new(),
            parse_failures: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    fn units(&self) -> impl Iterator<Item = &UnitOutcome> {
        self.files.iter().flat_map(|f| f.units.iter())
    }

    pub fn succeeded_units(&self) -> usize {
        self.units()
            .filter(|u| u.status == UnitStatus::Succeeded)
            .count()
    }

    pub fn skipped_units(&self) -> usize {
        self.units()
            .filter(|u| matches!(u.status, UnitStatus::Skipped { .. }))
            .count()
    }

    pub fn failed_units(&self) -> usize {
        self.units()
            .filter(|u| matches!(u.status, UnitStatus::Failed { .. }))
            .count()
    }

    pub fn failed_files(&self) -> usize {
        self.files.iter().filter(|f| f.is_failed()).count()
    }

    pub fn written_files(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Written { .. }))
            .count()
    }

    /// True when every file parsed and every write went through
    pub fn is_success(&self) -> bool {
        self.parse_failures.is_empty() && self.failed_files() == 0
    }

    pub fn file(&self, path: &str) -> Option<&FileReport> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} files ({} written, {} failed, {} unparsed); units: {} succeeded, {} skipped, {} failed",
            self.files.len(),
            self.written_files(),
            self.failed_files(),
            self.parse_failures.len(),
            self.succeeded_units(),
            self.skipped_units(),
            self.failed_units()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = ProcessingReport::new("fill", "simple");
        report.files.push(FileReport {
            path: "a.py".to_string(),
            status: FileStatus::Written { edits: 1 },
            units: vec![
                UnitOutcome::succeeded("a", UnitKind::Module),
                UnitOutcome::skipped("foo", UnitKind::Function, "already documented"),
            ],
        });
        report.files.push(FileReport {
            path: "b.py".to_string(),
            status: FileStatus::Failed {
                reason: "disk full".to_string(),
            },
            units: vec![UnitOutcome::failed("b", UnitKind::Module, "boom")],
        });

        assert_eq!(report.succeeded_units(), 1);
        assert_eq!(report.skipped_units(), 1);
        assert_eq!(report.failed_units(), 1);
        assert_eq!(report.failed_files(), 1);
        assert_eq!(report.written_files(), 1);
        assert!(!report.is_success());
        assert!(report.file("a.py").is_some());
    }

    #[test]
    fn test_parse_failure_marks_run_unsuccessful() {
        let mut report = ProcessingReport::new("clear", "base");
        assert!(report.is_success());
        report.parse_failures.push(ParseFailure {
            path: "bad.py".to_string(),
            message: "syntax error".to_string(),
        });
        assert!(!report.is_success());
    }

    #[test]
    fn test_unit_outcome_serializes_flat() {
        let outcome = UnitOutcome::skipped("foo", UnitKind::Function, "inline body");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "inline body");
        assert_eq!(json["kind"], "function");
    }
}
