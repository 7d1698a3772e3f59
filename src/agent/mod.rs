//! Project Documentation Agent
//!
//! [`GitAgent`] brings a Python project up to a documented baseline: it runs
//! the docstring manager and renders README, requirements, `.gitignore` and a
//! MkDocs site from the parsed project.
//!
//! Every operation recomputes its artifact from the current parser output and
//! overwrites the target, so repeated runs on an unchanged project produce the
//! same files. Operations are independent; [`GitAgent::standardize_project`]
//! records a failure in one and carries on with the rest.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut agent = GitAgent::new(&root, config, Some(provider))?;
//! let report = agent.standardize_project(true, true).await;
//! if !report.is_success() {
//!     std::process::exit(1);
//! }
//! ```

pub mod mkdocs;
pub mod templates;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use tokio::process::Command;
use tracing::{info, warn};

use crate::ai::prompt::PromptTemplates;
use crate::ai::provider::SharedProvider;
use crate::ai::response::clean_markdown;
use crate::ai::timeout::complete_bounded;
use crate::analyzer::parser::{ParseOutcome, ProjectParser, project_name};
use crate::analyzer::project::{self, ModuleDigest, ProjectProfile};
use crate::config::{Config, DocLanguage};
use crate::manager::Manager;
use crate::types::{DocError, Directive, ParseFailure, ProcessingReport, Result};

use self::mkdocs::{MkDocsConfig, api_page_path};
use self::templates::{Labels, ReadmeContext};

pub const README: &str = "README.md";
pub const REQUIREMENTS: &str = "requirements.txt";
pub const GITIGNORE: &str = ".gitignore";
pub const MKDOCS_CONFIG: &str = "mkdocs.yml";
pub const DOCS_DIR: &str = "docs";

/// What an artifact operation did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArtifactStatus {
    /// Files written, relative to the project root
    Written { paths: Vec<String> },
    /// Target already existed and `preserve_existing` is set
    Preserved { path: String },
    Failed { reason: String },
}

impl ArtifactStatus {
    fn written(paths: impl IntoIterator<Item = String>) -> Self {
        Self::Written {
            paths: paths.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    pub operation: &'static str,
    #[serde(flatten)]
    pub status: ArtifactStatus,
}

/// Outcome of [`GitAgent::standardize_project`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgentReport {
    pub operations: Vec<OperationReport>,
    pub docstrings: Option<ProcessingReport>,
    /// Files the final parse could not read
    pub parse_failures: Vec<ParseFailure>,
}

impl AgentReport {
    pub fn record(&mut self, operation: &'static str, result: Result<ArtifactStatus>) {
        let status = result.unwrap_or_else(|e| {
            warn!("{} failed: {}", operation, e);
            ArtifactStatus::Failed {
                reason: e.to_string(),
            }
        });
        self.operations.push(OperationReport { operation, status });
    }

    pub fn operation(&self, name: &str) -> Option<&ArtifactStatus> {
        self.operations
            .iter()
            .find(|o| o.operation == name)
            .map(|o| &o.status)
    }

    pub fn failed_operations(&self) -> impl Iterator<Item = &OperationReport> {
        self.operations
            .iter()
            .filter(|o| matches!(o.status, ArtifactStatus::Failed { .. }))
    }

    pub fn is_success(&self) -> bool {
        self.failed_operations().next().is_none()
            && self.parse_failures.is_empty()
            && self.docstrings.as_ref().is_none_or(|r| r.is_success())
    }
}

pub struct GitAgent {
    root: PathBuf,
    project_name: String,
    config: Config,
    provider: Option<SharedProvider>,
    parser: ProjectParser,
    outcome: ParseOutcome,
}

impl GitAgent {
    /// Parse the project at `root`.
    ///
    /// Fails with a parse error when `root` does not exist or cannot be read.
    pub fn new(root: &Path, config: Config, provider: Option<SharedProvider>) -> Result<Self> {
        let parser = ProjectParser::new(&config.scan)?;
        let outcome = parser.parse(root)?;
        let root = root.canonicalize()?;

        info!(
            "Parsed {} modules under {} ({} failures)",
            outcome.modules.len(),
            root.display(),
            outcome.failures.len()
        );

        Ok(Self {
            project_name: project_name(&root),
            root,
            config,
            provider,
            parser,
            outcome,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn language(&self) -> DocLanguage {
        self.config.agent.language
    }

    pub fn outcome(&self) -> &ParseOutcome {
        &self.outcome
    }

    /// Re-parse the project, e.g. after docstrings were rewritten
    pub fn refresh(&mut self) -> Result<()> {
        self.outcome = self.parser.parse(&self.root)?;
        Ok(())
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.llm.timeout_secs)
    }

    fn labels(&self) -> Labels {
        Labels::for_language(self.language().primary())
    }

    fn digests(&self) -> Vec<ModuleDigest> {
        project::digests(&self.outcome.modules)
    }

    /// `Preserved` when the target exists and existing artifacts are kept
    fn preserved(&self, relative: &str) -> Option<ArtifactStatus> {
        (self.config.agent.preserve_existing && self.root.join(relative).exists()).then(|| {
            info!("{} already exists, keeping it", relative);
            ArtifactStatus::Preserved {
                path: relative.to_string(),
            }
        })
    }

    fn write(&self, relative: &str, content: &str) -> Result<String> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| DocError::write(relative, e))?;
        }
        fs::write(&path, content).map_err(|e| DocError::write(relative, e))?;
        Ok(relative.to_string())
    }

    pub fn generate_readme(&self) -> Result<ArtifactStatus> {
        if let Some(status) = self.preserved(README) {
            return Ok(status);
        }

        let digests = self.digests();
        let tree = project::module_tree(&self.outcome.modules);
        let profile = ProjectProfile::detect(&self.root);
        let content = templates::readme(&ReadmeContext {
            project_name: &self.project_name,
            module_tree: &tree,
            digests: &digests,
            profile: &profile,
            labels: self.labels(),
        });

        let path = self.write(README, &content)?;
        info!("Generated {}", README);
        Ok(ArtifactStatus::written([path]))
    }

    pub fn generate_requirements(&self) -> Result<ArtifactStatus> {
        if let Some(status) = self.preserved(REQUIREMENTS) {
            return Ok(status);
        }

        let distributions = project::requirements(&self.outcome.modules);
        let path = self.write(REQUIREMENTS, &templates::requirements(&distributions))?;
        info!(
            "Generated {} ({} distributions)",
            REQUIREMENTS,
            distributions.len()
        );
        Ok(ArtifactStatus::written([path]))
    }

    pub fn generate_gitignore(&self) -> Result<ArtifactStatus> {
        if let Some(status) = self.preserved(GITIGNORE) {
            return Ok(status);
        }

        let profile = ProjectProfile::detect(&self.root);
        let path = self.write(GITIGNORE, &templates::gitignore(&profile))?;
        info!("Generated {}", GITIGNORE);
        Ok(ArtifactStatus::written([path]))
    }

    /// Write `mkdocs.yml` and the pages under `docs/<lang>/`.
    ///
    /// Bilingual projects get Chinese pages under `docs/zh` and their English
    /// translation under `docs/en`; without a provider the pages are copied.
    pub async fn generate_mkdocs(&self) -> Result<ArtifactStatus> {
        if let Some(status) = self.preserved(MKDOCS_CONFIG) {
            return Ok(status);
        }

        let language = self.language();
        let labels = self.labels();
        let digests = self.digests();
        let tree = project::module_tree(&self.outcome.modules);

        let mut pages = vec![(
            "index.md".to_string(),
            mkdocs::index_page(
                &self.project_name,
                templates::project_summary(&self.project_name, &digests),
                &tree,
                &digests,
                labels,
            ),
        )];
        for module in &self.outcome.modules {
            pages.push((
                api_page_path(&module.module_name),
                mkdocs::module_page(module, labels),
            ));
        }

        let primary_dir = format!("{}/{}", DOCS_DIR, language.primary());
        let mut written = Vec::with_capacity(pages.len() * 2 + 1);
        for (page, content) in &pages {
            written.push(self.write(&format!("{}/{}", primary_dir, page), content)?);
        }

        let module_names: Vec<String> = self
            .outcome
            .modules
            .iter()
            .map(|m| m.module_name.clone())
            .collect();
        let mut config = MkDocsConfig::new(
            &self.project_name,
            &primary_dir,
            &self.config.agent.theme,
            Labels::for_language("en"),
            &module_names,
        );

        if language == DocLanguage::Bilingual {
            for (page, content) in &pages {
                let translated = self.translate_page(page, content).await;
                written.push(self.write(&format!("{}/en/{}", DOCS_DIR, page), &translated)?);
            }
            config = config.bilingual();
        }

        written.push(self.write(MKDOCS_CONFIG, &config.to_yaml()?)?);
        info!("Generated MkDocs site ({} files)", written.len());
        Ok(ArtifactStatus::written(written))
    }

    /// English version of a page; the original text when no provider is
    /// configured or translation fails
    async fn translate_page(&self, page: &str, content: &str) -> String {
        let Some(provider) = &self.provider else {
            return content.to_string();
        };

        let prompt = PromptTemplates::translate_markdown("en")
            .text(content)
            .build();
        match complete_bounded(provider.as_ref(), &prompt, self.timeout()).await {
            Ok(response) => match clean_markdown(&response.content) {
                Some(text) => text,
                None => {
                    warn!("Empty translation for {}, copying the original", page);
                    content.to_string()
                }
            },
            Err(e) => {
                warn!("Translating {} failed ({}), copying the original", page, e);
                content.to_string()
            }
        }
    }

    /// Run the docstring manager over the parsed project.
    ///
    /// `directive` defaults to the configured one. The project is re-parsed
    /// afterwards so later artifacts see the new docstrings.
    pub async fn generate_docstrings(
        &mut self,
        directive: Option<&Directive>,
        dry_run: bool,
    ) -> Result<ProcessingReport> {
        let manager = Manager::from_config(
            &self.config.docstring,
            self.provider.clone(),
            self.timeout(),
        )?
        .with_dry_run(dry_run);

        let configured = self.config.docstring.directive()?;
        let directive = directive.unwrap_or(&configured);
        let report = manager.process_outcome(&self.outcome, Some(directive)).await;

        if !dry_run && report.written_files() > 0 {
            self.refresh()?;
        }
        Ok(report)
    }

    /// Run `mkdocs serve` on `0.0.0.0:<port>` until the server exits or
    /// Ctrl-C is received. The child process is killed on the way out.
    pub async fn serve_mkdocs(&self, port: u16) -> Result<()> {
        let config = self.root.join(MKDOCS_CONFIG);
        if !self.root.join(DOCS_DIR).is_dir() || !config.is_file() {
            return Err(DocError::Config(format!(
                "{} or {}/ not found in {}; run `docweave generate --mkdocs` first",
                MKDOCS_CONFIG,
                DOCS_DIR,
                self.root.display()
            )));
        }

        let mut child = Command::new("mkdocs")
            .arg("serve")
            .arg("-f")
            .arg(&config)
            .arg("-a")
            .arg(format!("0.0.0.0:{}", port))
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DocError::Process(format!("failed to start mkdocs: {}. Is it installed?", e))
            })?;
        info!("MkDocs server started, visit http://localhost:{}", port);

        let exited = tokio::select! {
            status = child.wait() => Some(status?),
            _ = tokio::signal::ctrl_c() => None,
        };

        match exited {
            Some(status) if status.success() => Ok(()),
            Some(status) => Err(DocError::Process(format!(
                "mkdocs serve exited with {}",
                status
            ))),
            None => {
                info!("Stopping MkDocs server");
                child.kill().await?;
                Ok(())
            }
        }
    }

    /// Requirements, gitignore, docstrings (optional), README, MkDocs (optional)
    pub async fn standardize_project(
        &mut self,
        gen_docstrings: bool,
        gen_mkdocs: bool,
    ) -> AgentReport {
        let mut report = AgentReport::default();

        report.record("requirements", self.generate_requirements());
        report.record("gitignore", self.generate_gitignore());

        if gen_docstrings {
            match self.generate_docstrings(None, false).await {
                Ok(docstrings) => report.docstrings = Some(docstrings),
                Err(e) => report.record("docstrings", Err(e)),
            }
        }

        report.record("readme", self.generate_readme());
        if gen_mkdocs {
            report.record("mkdocs", self.generate_mkdocs().await);
        }

        report.parse_failures = self.outcome.failures.clone();
        info!("Project standardization completed");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::testing::FnProvider;
    use crate::config::ManagerStrategy;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("shop")).unwrap();
        fs::write(
            root.join("shop/__init__.py"),
            "\"\"\"Tiny shop backend.\"\"\"\n",
        )
        .unwrap();
        fs::write(
            root.join("shop/cart.py"),
            "import json\nimport requests\nimport yaml\nfrom .models import Item\n\n\nclass Cart:\n    def total(self):\n        return 0\n\n\ndef checkout(cart):\n    return cart.total()\n",
        )
        .unwrap();
        fs::write(
            root.join("shop/models.py"),
            "class Item:\n    \"\"\"A sellable item.\"\"\"\n",
        )
        .unwrap();
        dir
    }

    fn config(language: DocLanguage, strategy: ManagerStrategy) -> Config {
        let mut config = Config::default();
        config.agent.language = language;
        config.docstring.strategy = strategy;
        config
    }

    #[test]
    fn test_missing_root_is_parse_error_without_output() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");

        let result = GitAgent::new(&missing, Config::default(), None);
        assert!(matches!(result, Err(DocError::Parse { .. })));
        assert!(!missing.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_readme_is_idempotent() {
        let dir = project();
        let agent = GitAgent::new(dir.path(), Config::default(), None).unwrap();

        agent.generate_readme().unwrap();
        let first = fs::read_to_string(dir.path().join(README)).unwrap();
        agent.generate_readme().unwrap();
        let second = fs::read_to_string(dir.path().join(README)).unwrap();

        assert_eq!(first, second);
        assert!(first.contains("Tiny shop backend."));
        assert!(first.contains("- shop/\n  - cart\n  - models\n"));
        assert!(first.contains("- `class Item`: A sellable item."));
    }

    #[test]
    fn test_requirements_exclude_stdlib_and_local_modules() {
        let dir = project();
        let agent = GitAgent::new(dir.path(), Config::default(), None).unwrap();
        agent.generate_requirements().unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join(REQUIREMENTS)).unwrap(),
            "PyYAML\nrequests\n"
        );
    }

    #[test]
    fn test_preserve_existing_keeps_artifacts() {
        let dir = project();
        fs::write(dir.path().join(GITIGNORE), "custom\n").unwrap();

        let mut config = Config::default();
        config.agent.preserve_existing = true;
        let agent = GitAgent::new(dir.path(), config, None).unwrap();

        assert_eq!(
            agent.generate_gitignore().unwrap(),
            ArtifactStatus::Preserved {
                path: GITIGNORE.to_string()
            }
        );
        assert_eq!(
            fs::read_to_string(dir.path().join(GITIGNORE)).unwrap(),
            "custom\n"
        );
    }

    #[tokio::test]
    async fn test_mkdocs_single_language() {
        let dir = project();
        let agent = GitAgent::new(
            dir.path(),
            config(DocLanguage::En, ManagerStrategy::Simple),
            None,
        )
        .unwrap();

        agent.generate_mkdocs().await.unwrap();
        let root = dir.path();
        assert!(root.join("docs/en/index.md").is_file());
        assert!(root.join("docs/en/api/shop.cart.md").is_file());
        assert!(!root.join("docs/zh").exists());

        let yaml = fs::read_to_string(root.join(MKDOCS_CONFIG)).unwrap();
        let parsed: MkDocsConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.docs_dir, "docs/en");
        assert!(parsed.plugins.is_empty());
    }

    #[tokio::test]
    async fn test_mkdocs_bilingual_copies_without_provider() {
        let dir = project();
        let agent = GitAgent::new(
            dir.path(),
            config(DocLanguage::Bilingual, ManagerStrategy::Simple),
            None,
        )
        .unwrap();

        agent.generate_mkdocs().await.unwrap();
        let root = dir.path();
        let zh = fs::read_to_string(root.join("docs/zh/index.md")).unwrap();
        let en = fs::read_to_string(root.join("docs/en/index.md")).unwrap();
        assert_eq!(zh, en);
        assert!(zh.contains("## 项目结构"));

        let parsed: MkDocsConfig =
            serde_yaml::from_str(&fs::read_to_string(root.join(MKDOCS_CONFIG)).unwrap()).unwrap();
        assert_eq!(parsed.docs_dir, "docs");
        assert_eq!(parsed.plugins.len(), 2);
    }

    #[tokio::test]
    async fn test_mkdocs_bilingual_translates_with_provider() {
        let dir = project();
        let provider = Arc::new(FnProvider::new(|prompt: &str| {
            assert!(prompt.contains("English"));
            Ok("# Translated\n".to_string())
        }));
        let agent = GitAgent::new(
            dir.path(),
            config(DocLanguage::Bilingual, ManagerStrategy::Simple),
            Some(provider.clone()),
        )
        .unwrap();

        agent.generate_mkdocs().await.unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("docs/en/api/shop.models.md")).unwrap(),
            "# Translated\n"
        );
        // index plus one page per module
        assert_eq!(provider.calls(), 4);
    }

    #[tokio::test]
    async fn test_standardize_project_end_to_end() {
        let dir = project();
        let mut agent = GitAgent::new(
            dir.path(),
            config(DocLanguage::En, ManagerStrategy::Simple),
            None,
        )
        .unwrap();

        let report = agent.standardize_project(true, true).await;
        assert!(report.is_success(), "{:?}", report);
        let names: Vec<&str> = report.operations.iter().map(|o| o.operation).collect();
        assert_eq!(names, vec!["requirements", "gitignore", "readme", "mkdocs"]);

        let docstrings = report.docstrings.as_ref().unwrap();
        assert_eq!(docstrings.failed_units(), 0);
        assert!(docstrings.written_files() >= 1);

        // README is rendered from the re-parsed, now documented project
        let readme = fs::read_to_string(dir.path().join(README)).unwrap();
        assert!(readme.contains("- `def checkout(cart)`: Function `checkout(cart)`."));
    }

    #[tokio::test]
    async fn test_custom_strategy_without_provider_fails_only_docstrings() {
        let dir = project();
        let mut agent = GitAgent::new(
            dir.path(),
            config(DocLanguage::En, ManagerStrategy::Custom),
            None,
        )
        .unwrap();

        let report = agent.standardize_project(true, false).await;
        assert!(!report.is_success());
        assert!(matches!(
            report.operation("docstrings"),
            Some(ArtifactStatus::Failed { .. })
        ));
        assert!(dir.path().join(README).is_file());
        assert!(dir.path().join(REQUIREMENTS).is_file());
    }

    #[tokio::test]
    async fn test_serve_requires_generated_site() {
        let dir = project();
        let agent = GitAgent::new(
            dir.path(),
            config(DocLanguage::En, ManagerStrategy::Base),
            None,
        )
        .unwrap();

        let err = agent.serve_mkdocs(8333).await.unwrap_err();
        assert!(matches!(err, DocError::Config(_)));
        assert!(err.to_string().contains("mkdocs.yml"));

        // A config file alone is not enough
        std::fs::write(dir.path().join(MKDOCS_CONFIG), "site_name: x\n").unwrap();
        assert!(matches!(
            agent.serve_mkdocs(8333).await,
            Err(DocError::Config(_))
        ));
    }
}
