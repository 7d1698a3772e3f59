//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/docweave/config.toml)
//! 3. Project config (<root>/.docweave.toml)
//! 4. Environment variables (DOCWEAVE_* prefix, `__` between keys)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{DocError, Result};

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = ".docweave.toml";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load(project_root: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project config
        let project_path = Self::project_config_path(project_root.unwrap_or(Path::new(".")));
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // Merge environment variables (e.g., DOCWEAVE_LLM__MODEL -> llm.model)
        figment = figment.merge(Env::prefixed("DOCWEAVE_").split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| DocError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| DocError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/docweave/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("docweave"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to a project's config file
    pub fn project_config_path(root: &Path) -> PathBuf {
        root.join(PROJECT_CONFIG_FILE)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Effective configuration as TOML or pretty JSON
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| DocError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the commented default config. Existing files are kept unless `force`.
    pub fn init(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            info!("Config exists: {}", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, Self::default_config())?;
        info!("Created config: {}", path.display());
        Ok(true)
    }

    /// Default config content (TOML)
    fn default_config() -> String {
        r#"# docweave Configuration
# Global file: ~/.config/docweave/config.toml
# Project file: <project>/.docweave.toml (overrides global)
# Environment: DOCWEAVE_<SECTION>__<KEY>, e.g. DOCWEAVE_LLM__MODEL

version = "1.0"

# Text-generation provider
[llm]
provider = "openai"          # openai (any compatible endpoint) | ollama
model = "gpt-4o-mini"
# api_base = "https://api.deepseek.com/v1"
timeout_secs = 120
temperature = 0.2
max_tokens = 1024

# Docstring processing
[docstring]
strategy = "custom"          # base | simple | custom
# directive = "fill"         # clear | fill | polish | translate:<lang>
language = "en"
skip_on_error = true

# Source scanning
[scan]
exclude = ["migrations/**"]
max_file_size = 1048576

# README / MkDocs generation
[agent]
language = "en"              # zh | en | bilingual
preserve_existing = false
theme = "material"
serve_port = 8333            # docweave serve
"#
        .to_string()
    }
}
