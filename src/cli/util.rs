//! CLI Common Utilities
//!
//! Shared setup for command handlers: project root resolution, config loading
//! with command-line overrides, provider construction and the async runtime.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::runtime::Runtime;
use tracing::{debug, warn};

use crate::ai::provider::{ProviderConfig, SharedProvider, create_provider};
use crate::config::{Config, ConfigLoader};
use crate::types::{DocError, Result};

/// Provider settings given on the command line
#[derive(Debug, Clone, Default)]
pub struct LlmOverrides {
    pub provider: Option<String>,
    pub model: Option<String>,
}

impl LlmOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(provider) = &self.provider {
            config.llm.provider = provider.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
    }
}

/// Command execution context
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Canonical project root
    pub root: PathBuf,
    pub config: Config,
}

impl CommandContext {
    /// Resolve `path` and load the configuration that applies to it.
    ///
    /// A missing root is a parse error; nothing is created.
    pub fn load(path: &Path, overrides: &LlmOverrides) -> Result<Self> {
        let root = path.canonicalize().map_err(|e| {
            DocError::parse(
                path.display().to_string(),
                format!("cannot read project root: {}", e),
            )
        })?;

        let mut config = ConfigLoader::load(Some(&root))?;
        overrides.apply(&mut config);
        config.validate()?;
        debug!("Loaded config for {}", root.display());

        Ok(Self { root, config })
    }

    /// Bound on a single text-generation call
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.llm.timeout_secs)
    }

    /// Provider from the effective config; errors when it cannot be built
    pub fn provider(&self) -> Result<SharedProvider> {
        create_provider(&ProviderConfig::from(&self.config.llm))
    }

    /// Provider when one can be built, `None` (with a warning) otherwise
    pub fn optional_provider(&self) -> Option<SharedProvider> {
        match self.provider() {
            Ok(provider) => Some(provider),
            Err(e) => {
                warn!("Text generation unavailable: {}", e);
                None
            }
        }
    }
}

/// Run a future to completion on a fresh runtime
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = Runtime::new()?;
    Ok(runtime.block_on(future))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_replace_provider_and_model() {
        let mut config = Config::default();
        LlmOverrides {
            provider: Some("ollama".to_string()),
            model: Some("qwen2.5".to_string()),
        }
        .apply(&mut config);
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.model, "qwen2.5");
    }

    #[test]
    fn test_missing_root_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let result = CommandContext::load(&dir.path().join("missing"), &LlmOverrides::default());
        assert!(matches!(result, Err(DocError::Parse { .. })));
    }

    #[test]
    fn test_unknown_provider_is_optional() {
        let dir = TempDir::new().unwrap();
        let mut context = CommandContext::load(dir.path(), &LlmOverrides::default()).unwrap();
        context.config.llm.provider = "nonexistent".to_string();
        assert!(context.provider().is_err());
        assert!(context.optional_provider().is_none());
    }
}
