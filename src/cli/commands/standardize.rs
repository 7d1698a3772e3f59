//! Standardize Command
//!
//! Bring a project to a documented baseline in one pass.
//!
//! Usage:
//!   docweave standardize <path> [--no-docstrings] [--no-mkdocs]

use std::path::PathBuf;

use crate::agent::GitAgent;
use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, LlmOverrides, block_on};
use crate::types::Result;

#[derive(Debug, Clone)]
pub struct StandardizeOptions {
    pub path: PathBuf,
    pub docstrings: bool,
    pub mkdocs: bool,
}

pub fn run(options: StandardizeOptions, overrides: &LlmOverrides, output: &Output) -> Result<bool> {
    let ctx = CommandContext::load(&options.path, overrides)?;

    // Without a provider the agent reports generation-backed steps as failed
    let provider = if ctx.config.docstring.strategy.uses_generation() || options.mkdocs {
        ctx.optional_provider()
    } else {
        None
    };

    output.header(&format!("Standardizing {}", ctx.root.display()));
    let mut agent = GitAgent::new(&ctx.root, ctx.config, provider)?;
    let report = block_on(agent.standardize_project(options.docstrings, options.mkdocs))?;

    output.agent_report(&report);
    if report.is_success() {
        output.success("Project standardization completed");
    }
    Ok(report.is_success())
}
