//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/docweave/) and project (.docweave.toml) level configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{DocError, Directive, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Text-generation provider settings
    pub llm: LlmConfig,

    /// Docstring processing settings
    pub docstring: DocstringConfig,

    /// Source scanning settings
    pub scan: ScanConfig,

    /// Artifact generation settings
    pub agent: AgentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: LlmConfig::default(),
            docstring: DocstringConfig::default(),
            scan: ScanConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `DocError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(DocError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(DocError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(DocError::Config(
                "LLM max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.scan.max_file_size == 0 {
            return Err(DocError::Config(
                "scan max_file_size must be greater than 0".to_string(),
            ));
        }

        self.docstring.directive()?;

        if self.docstring.language.trim().is_empty() {
            return Err(DocError::Config(
                "docstring language must not be empty".to_string(),
            ));
        }

        if self.agent.serve_port == 0 {
            return Err(DocError::Config(
                "agent serve_port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: "openai" (any OpenAI-compatible endpoint) or "ollama"
    pub provider: String,

    /// Model name
    pub model: String,

    /// Custom endpoint (e.g. https://api.deepseek.com/v1)
    pub api_base: Option<String>,

    /// API key. Never serialized; prefer the provider's env var.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Temperature for generation (0.0 = deterministic)
    pub temperature: f32,

    /// Maximum tokens per docstring
    pub max_tokens: usize,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_base: None,
            api_key: None,
            timeout_secs: crate::constants::network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.2,
            max_tokens: 1024,
        }
    }
}

// =============================================================================
// Docstring Configuration
// =============================================================================

/// How the manager treats units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ManagerStrategy {
    /// Pure text splicing, default directive `clear`
    Base,
    /// Placeholder docstrings, default directive `fill`
    Simple,
    /// Generated docstrings, default directive `fill`
    #[default]
    Custom,
}

impl ManagerStrategy {
    pub fn default_directive(&self) -> Directive {
        match self {
            Self::Base => Directive::Clear,
            Self::Simple | Self::Custom => Directive::Fill,
        }
    }

    /// Whether units are routed through the text-generation provider
    pub fn uses_generation(&self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl fmt::Display for ManagerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Simple => write!(f, "simple"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for ManagerStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "base" => Ok(Self::Base),
            "simple" => Ok(Self::Simple),
            "custom" => Ok(Self::Custom),
            _ => Err(format!(
                "Unknown strategy: {}. Valid values: base, simple, custom",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocstringConfig {
    /// Manager strategy
    pub strategy: ManagerStrategy,

    /// Directive override (`clear`, `fill`, `polish`, `translate:<lang>`).
    /// Unset means the strategy's default.
    pub directive: Option<String>,

    /// Language generated docstrings are written in
    pub language: String,

    /// Keep going after a generation failure (the unit is reported failed)
    pub skip_on_error: bool,
}

impl Default for DocstringConfig {
    fn default() -> Self {
        Self {
            strategy: ManagerStrategy::default(),
            directive: None,
            language: crate::constants::docstring::DEFAULT_LANGUAGE.to_string(),
            skip_on_error: true,
        }
    }
}

impl DocstringConfig {
    /// Effective directive: the configured override or the strategy default
    pub fn directive(&self) -> Result<Directive> {
        match &self.directive {
            Some(raw) => raw.parse().map_err(DocError::Config),
            None => Ok(self.strategy.default_directive()),
        }
    }
}

// =============================================================================
// Scan Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Glob patterns (relative to the project root) to exclude
    pub exclude: Vec<String>,

    /// Maximum file size in bytes
    pub max_file_size: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["migrations/**".to_string()],
            max_file_size: crate::constants::scan::MAX_FILE_SIZE,
        }
    }
}

// =============================================================================
// Agent Configuration
// =============================================================================

/// Documentation language for generated artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocLanguage {
    Zh,
    #[default]
    En,
    /// Chinese pages plus their English translation
    Bilingual,
}

impl DocLanguage {
    /// Language the primary pages are written in
    pub fn primary(&self) -> &'static str {
        match self {
            Self::Zh | Self::Bilingual => "zh",
            Self::En => "en",
        }
    }
}

impl fmt::Display for DocLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zh => write!(f, "zh"),
            Self::En => write!(f, "en"),
            Self::Bilingual => write!(f, "bilingual"),
        }
    }
}

impl FromStr for DocLanguage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zh" => Ok(Self::Zh),
            "en" => Ok(Self::En),
            "bilingual" => Ok(Self::Bilingual),
            _ => Err(format!(
                "Unknown documentation language: {}. Valid values: zh, en, bilingual",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Language of README and MkDocs pages
    pub language: DocLanguage,

    /// Leave artifacts that already exist untouched
    pub preserve_existing: bool,

    /// MkDocs theme name
    pub theme: String,

    /// Port `docweave serve` binds the MkDocs dev server to
    pub serve_port: u16,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            language: DocLanguage::default(),
            preserve_existing: false,
            theme: "material".to_string(),
            serve_port: 8333,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
