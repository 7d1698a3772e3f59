//! Docstring Command
//!
//! Apply a directive to every docstring of a project.
//!
//! Usage:
//!   docweave docstring <path> [--directive fill] [--strategy custom] [--language zh] [--dry-run]

use std::path::PathBuf;

use tracing::info;

use crate::analyzer::parser::ProjectParser;
use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, LlmOverrides, block_on};
use crate::config::ManagerStrategy;
use crate::manager::Manager;
use crate::types::{Directive, Result};

#[derive(Debug, Clone)]
pub struct DocstringOptions {
    pub path: PathBuf,
    pub directive: Option<Directive>,
    pub strategy: Option<ManagerStrategy>,
    /// Language generated docstrings are written in
    pub language: Option<String>,
    pub dry_run: bool,
    pub json: bool,
}

/// Returns whether every file parsed and every write went through
pub fn run(options: DocstringOptions, overrides: &LlmOverrides, output: &Output) -> Result<bool> {
    let mut ctx = CommandContext::load(&options.path, overrides)?;
    if let Some(strategy) = options.strategy {
        ctx.config.docstring.strategy = strategy;
    }
    if let Some(language) = options.language {
        ctx.config.docstring.language = language;
    }

    let docstring = &ctx.config.docstring;
    let provider = match docstring.strategy {
        ManagerStrategy::Custom => Some(ctx.provider()?),
        _ => None,
    };
    let manager = Manager::from_config(docstring, provider, ctx.timeout())?
        .with_dry_run(options.dry_run);

    let directive = match options.directive {
        Some(directive) => directive,
        None => docstring.directive()?,
    };

    let outcome = ProjectParser::new(&ctx.config.scan)?.parse(&ctx.root)?;
    info!(
        "Applying {} to {} modules under {}",
        directive,
        outcome.modules.len(),
        ctx.root.display()
    );

    let report = block_on(manager.process_outcome(&outcome, Some(&directive)))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output.processing_report(&report);
    }
    Ok(report.is_success())
}
