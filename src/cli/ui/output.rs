use console::style;

use crate::agent::{AgentReport, ArtifactStatus};
use crate::types::{FileReport, FileStatus, ProcessingReport, UnitStatus};

pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// Suppress everything but errors
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    pub fn header(&self, message: &str) {
        if !self.quiet {
            println!("\n{}", style(message).bold().underlined());
        }
    }

    pub fn section(&self, message: &str) {
        if !self.quiet {
            println!("\n{}", style(message).bold());
            println!("{}", "─".repeat(40));
        }
    }

    pub fn file(&self, file: &FileReport) {
        match &file.status {
            FileStatus::Written { edits } => {
                self.success(&format!("{} ({} edits)", file.path, edits))
            }
            FileStatus::DryRun { edits } => {
                self.info(&format!("{} ({} edits, not written)", file.path, edits))
            }
            FileStatus::Unchanged => {}
            FileStatus::Stale => {
                self.error(&format!("{}: changed on disk during the run", file.path))
            }
            FileStatus::Failed { reason } => self.error(&format!("{}: {}", file.path, reason)),
        }

        for unit in &file.units {
            if let UnitStatus::Failed { reason } = &unit.status {
                self.warning(&format!("  {} {}: {}", unit.kind, unit.unit, reason));
            }
        }
    }

    pub fn processing_report(&self, report: &ProcessingReport) {
        self.section(&format!(
            "Docstrings ({}, {})",
            report.directive, report.strategy
        ));
        for file in &report.files {
            self.file(file);
        }
        for failure in &report.parse_failures {
            self.error(&format!("{}: {}", failure.path, failure.message));
        }
        self.info(&report.summary());
    }

    pub fn artifact(&self, operation: &str, status: &ArtifactStatus) {
        match status {
            ArtifactStatus::Written { paths } if paths.len() == 1 => {
                self.success(&format!("{}: {}", operation, paths[0]))
            }
            ArtifactStatus::Written { paths } => {
                self.success(&format!("{}: {} files", operation, paths.len()))
            }
            ArtifactStatus::Preserved { path } => {
                self.info(&format!("{}: kept existing {}", operation, path))
            }
            ArtifactStatus::Failed { reason } => {
                self.error(&format!("{}: {}", operation, reason))
            }
        }
    }

    pub fn agent_report(&self, report: &AgentReport) {
        self.section("Artifacts");
        for op in &report.operations {
            self.artifact(op.operation, &op.status);
        }
        if let Some(docstrings) = &report.docstrings {
            self.processing_report(docstrings);
        } else {
            for failure in &report.parse_failures {
                self.error(&format!("{}: {}", failure.path, failure.message));
            }
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
