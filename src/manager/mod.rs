//! Docstring Manager
//!
//! Runs an [`Editor`] over every unit of every parsed module and writes each
//! file at most once. Units are visited in a fixed order (module, classes with
//! their methods, top-level functions) so reports and output are deterministic.
//!
//! ## Failure handling
//!
//! - A generation failure fails the unit; with `skip_on_error = false` the
//!   remaining units of that file are skipped as well.
//! - A file that changed on disk since it was parsed is reported stale and left alone.
//! - A write failure fails that file; processing continues with the next one.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::ai::provider::SharedProvider;
use crate::analyzer::parser::{ParseOutcome, content_hash};
use crate::config::{DocstringConfig, ManagerStrategy};
use crate::editor::{BaseEditor, CustomEditor, EditContext, EditOutcome, Editor, apply_edits};
use crate::types::{
    DocError, Directive, FileReport, FileStatus, ModuleDescriptor, ProcessingReport, Result,
    UnitOutcome, UnitStatus,
};

pub struct Manager {
    strategy: ManagerStrategy,
    editor: Arc<dyn Editor>,
    skip_on_error: bool,
    dry_run: bool,
}

impl Manager {
    /// Pure text splicing; clears docstrings by default
    pub fn base() -> Self {
        Self::with_editor(ManagerStrategy::Base, Arc::new(BaseEditor::new()))
    }

    /// Placeholder docstrings; fills by default
    pub fn simple() -> Self {
        Self::with_editor(ManagerStrategy::Simple, Arc::new(BaseEditor::new()))
    }

    /// Generated docstrings; fills by default
    pub fn custom(provider: SharedProvider, timeout: Duration, language: &str) -> Self {
        Self::with_editor(
            ManagerStrategy::Custom,
            Arc::new(CustomEditor::new(provider, timeout).with_language(language)),
        )
    }

    pub fn with_editor(strategy: ManagerStrategy, editor: Arc<dyn Editor>) -> Self {
        Self {
            strategy,
            editor,
            skip_on_error: true,
            dry_run: false,
        }
    }

    /// Build the manager described by `config`.
    ///
    /// The custom strategy needs a provider; the others ignore it.
    pub fn from_config(
        config: &DocstringConfig,
        provider: Option<SharedProvider>,
        timeout: Duration,
    ) -> Result<Self> {
        let manager = match config.strategy {
            ManagerStrategy::Base => Self::base(),
            ManagerStrategy::Simple => Self::simple(),
            ManagerStrategy::Custom => {
                let provider = provider.ok_or_else(|| {
                    DocError::Config(
                        "the custom strategy needs a text-generation provider".to_string(),
                    )
                })?;
                Self::custom(provider, timeout, &config.language)
            }
        };
        Ok(manager.with_skip_on_error(config.skip_on_error))
    }

    pub fn with_skip_on_error(mut self, skip_on_error: bool) -> Self {
        self.skip_on_error = skip_on_error;
        self
    }

    /// Compute edits without writing files
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn strategy(&self) -> ManagerStrategy {
        self.strategy
    }

    /// Process a whole parse outcome; parse failures are carried into the report
    pub async fn process_outcome(
        &self,
        outcome: &ParseOutcome,
        directive: Option<&Directive>,
    ) -> ProcessingReport {
        let mut report = self.process(&outcome.modules, directive).await;
        report.parse_failures = outcome.failures.clone();
        report
    }

    /// Apply `directive` (or the strategy default) to every module
    pub async fn process(
        &self,
        modules: &[ModuleDescriptor],
        directive: Option<&Directive>,
    ) -> ProcessingReport {
        let default = self.strategy.default_directive();
        let directive = directive.unwrap_or(&default);

        info!(
            "Processing {} modules ({} strategy, directive {})",
            modules.len(),
            self.strategy,
            directive
        );

        let mut report = ProcessingReport::new(directive.to_string(), self.strategy.to_string());
        for module in modules {
            let file_report = self.process_module(module, directive).await;
            if let FileStatus::Failed { reason } = &file_report.status {
                warn!("{}: {}", file_report.path, reason);
            }
            report.files.push(file_report);
        }
        report.finish();

        info!("{}", report.summary());
        report
    }

    async fn process_module(&self, module: &ModuleDescriptor, directive: &Directive) -> FileReport {
        let path = module.relative_path.as_str();
        let failed = |reason: String| FileReport {
            path: path.to_string(),
            status: FileStatus::Failed { reason },
            units: Vec::new(),
        };

        let source = match std::fs::read_to_string(&module.path) {
            Ok(source) => source,
            Err(e) => return failed(format!("cannot re-read file: {}", e)),
        };
        if content_hash(&source) != module.content_hash {
            warn!("{} changed since it was parsed, skipping", path);
            return FileReport {
                path: path.to_string(),
                status: FileStatus::Stale,
                units: Vec::new(),
            };
        }

        let mut edits = Vec::new();
        let mut units = Vec::new();
        let mut aborted = false;

        for unit in module.units() {
            if aborted {
                units.push(UnitOutcome::skipped(
                    unit.name,
                    unit.kind,
                    "skipped after an earlier generation failure",
                ));
                continue;
            }

            let ctx = EditContext {
                source: &source,
                path,
                unit,
            };
            match self.editor.edit(&ctx, directive).await {
                Ok(EditOutcome::Edit(edit)) => {
                    debug!("{}: edit for {} {}", path, unit.kind, unit.name);
                    edits.push(edit);
                    units.push(UnitOutcome::succeeded(unit.name, unit.kind));
                }
                Ok(EditOutcome::Unchanged(reason)) => {
                    units.push(UnitOutcome::skipped(unit.name, unit.kind, reason));
                }
                Err(e) => {
                    warn!("{}: {} {} failed: {}", path, unit.kind, unit.name, e);
                    aborted = e.is_generation() && !self.skip_on_error;
                    units.push(UnitOutcome::failed(unit.name, unit.kind, e.to_string()));
                }
            }
        }

        let status = if edits.is_empty() {
            FileStatus::Unchanged
        } else {
            match apply_edits(path, &source, &edits) {
                Err(e) => FileStatus::Failed {
                    reason: e.to_string(),
                },
                Ok(_) if self.dry_run => FileStatus::DryRun { edits: edits.len() },
                Ok(text) => match std::fs::write(&module.path, text) {
                    Ok(()) => {
                        info!("Updated {} ({} edits)", path, edits.len());
                        FileStatus::Written { edits: edits.len() }
                    }
                    Err(e) => FileStatus::Failed {
                        reason: DocError::write(path, e).to_string(),
                    },
                },
            }
        };

        // Edits of a failed file were discarded, so none of its units went through
        if let FileStatus::Failed { reason } = &status {
            for outcome in units
                .iter_mut()
                .filter(|u| u.status == UnitStatus::Succeeded)
            {
                outcome.status = UnitStatus::Failed {
                    reason: reason.clone(),
                };
            }
        }

        FileReport {
            path: path.to_string(),
            status,
            units,
        }
    }
}
