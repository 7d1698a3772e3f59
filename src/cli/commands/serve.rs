//! Serve Command
//!
//! Preview the generated MkDocs site with `mkdocs serve`.
//!
//! Usage:
//!   docweave serve <path> [--port 8333]

use std::path::Path;

use crate::agent::GitAgent;
use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, LlmOverrides, block_on};
use crate::types::Result;

pub fn run(
    path: &Path,
    port: Option<u16>,
    overrides: &LlmOverrides,
    output: &Output,
) -> Result<bool> {
    let ctx = CommandContext::load(path, overrides)?;
    let port = port.unwrap_or(ctx.config.agent.serve_port);

    let agent = GitAgent::new(&ctx.root, ctx.config, None)?;
    output.info(&format!(
        "Serving {} on http://localhost:{} (Ctrl-C to stop)",
        ctx.root.display(),
        port
    ));
    block_on(agent.serve_mkdocs(port))??;
    Ok(true)
}
