//! Generate Command
//!
//! Render project artifacts from the parsed source tree.
//!
//! Usage:
//!   docweave generate <path> [--readme] [--requirements] [--gitignore] [--mkdocs] [--language bilingual]

use std::path::PathBuf;

use crate::agent::{AgentReport, GitAgent};
use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, LlmOverrides, block_on};
use crate::config::DocLanguage;
use crate::types::Result;

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub path: PathBuf,
    pub readme: bool,
    pub requirements: bool,
    pub gitignore: bool,
    pub mkdocs: bool,
    pub language: Option<DocLanguage>,
}

impl GenerateOptions {
    /// No artifact flag means every artifact
    fn all(&self) -> bool {
        !(self.readme || self.requirements || self.gitignore || self.mkdocs)
    }
}

pub fn run(options: GenerateOptions, overrides: &LlmOverrides, output: &Output) -> Result<bool> {
    let mut ctx = CommandContext::load(&options.path, overrides)?;
    if let Some(language) = options.language {
        ctx.config.agent.language = language;
    }

    let all = options.all();

    // Only bilingual MkDocs pages use the provider, and they fall back to copies
    let translate =
        (all || options.mkdocs) && ctx.config.agent.language == DocLanguage::Bilingual;
    let provider = if translate {
        ctx.optional_provider()
    } else {
        None
    };

    let agent = GitAgent::new(&ctx.root, ctx.config, provider)?;
    let mut report = AgentReport::default();

    if all || options.requirements {
        report.record("requirements", agent.generate_requirements());
    }
    if all || options.gitignore {
        report.record("gitignore", agent.generate_gitignore());
    }
    if all || options.readme {
        report.record("readme", agent.generate_readme());
    }
    if all || options.mkdocs {
        report.record("mkdocs", block_on(agent.generate_mkdocs())?);
    }
    report.parse_failures = agent.outcome().failures.clone();

    output.agent_report(&report);
    Ok(report.is_success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_single_flag_generates_only_that_artifact() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.py"), "import requests\n").unwrap();

        let ok = run(
            GenerateOptions {
                path: dir.path().to_path_buf(),
                requirements: true,
                ..Default::default()
            },
            &LlmOverrides::default(),
            &Output::new().quiet(true),
        )
        .unwrap();

        assert!(ok);
        assert_eq!(
            fs::read_to_string(dir.path().join("requirements.txt")).unwrap(),
            "requests\n"
        );
        assert!(!dir.path().join("README.md").exists());
        assert!(!dir.path().join("mkdocs.yml").exists());
    }

    #[test]
    fn test_no_flag_generates_everything() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.py"), "def main():\n    pass\n").unwrap();

        let ok = run(
            GenerateOptions {
                path: dir.path().to_path_buf(),
                ..Default::default()
            },
            &LlmOverrides::default(),
            &Output::new().quiet(true),
        )
        .unwrap();

        assert!(ok);
        for artifact in ["README.md", "requirements.txt", ".gitignore", "mkdocs.yml"] {
            assert!(dir.path().join(artifact).is_file(), "{} missing", artifact);
        }
    }
}
