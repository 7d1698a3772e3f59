//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//! Generation failures carry a category so callers can decide whether a
//! single retry is worthwhile.
//!
//! ## Failure Domains
//!
//! - **Parse**: unreadable or unparseable source file (skip file, report)
//! - **Generation**: text-generation service failure (skip unit, report)
//! - **Write**: filesystem write failure (abort that file, report)
//!
//! Only an unreadable project root aborts a run.

use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories for generation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited - wait then retry
    RateLimit,
    /// Authentication failed - fail fast, don't retry
    Auth,
    /// Network/connectivity issues - retry once
    Network,
    /// Provider unavailable
    Unavailable,
    /// Invalid request - don't retry, fix request
    BadRequest,
    /// Provider answered with nothing usable
    EmptyResponse,
    /// Temporary server issues - retry once
    Transient,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimit => "RATE_LIMIT",
            Self::Auth => "AUTH",
            Self::Network => "NETWORK",
            Self::Unavailable => "UNAVAILABLE",
            Self::BadRequest => "BAD_REQUEST",
            Self::EmptyResponse => "EMPTY_RESPONSE",
            Self::Transient => "TRANSIENT",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Check if this category is worth a single retry
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimit | Self::Network | Self::Transient | Self::EmptyResponse
        )
    }

    /// Get recommended retry delay for this category
    pub fn recommended_delay(&self) -> Duration {
        match self {
            Self::RateLimit => Duration::from_secs(10),
            Self::Network => Duration::from_secs(2),
            Self::Transient => Duration::from_secs(1),
            _ => Duration::from_millis(200),
        }
    }
}

// =============================================================================
// LLM Error
// =============================================================================

/// Generation error with category, context, and retry hints
#[derive(Debug, Clone)]
pub struct LlmError {
    /// Error category for retry decisions
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
    /// Suggested wait time before retry (if applicable)
    pub retry_after: Option<Duration>,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
            retry_after: None,
        }
    }

    /// Create error with provider context
    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
            retry_after: None,
        }
    }

    /// Add suggested retry delay
    pub fn retry_after(mut self, duration: Duration) -> Self {
        self.retry_after = Some(duration);
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.category.is_retryable()
    }

    /// Get recommended retry delay
    pub fn recommended_delay(&self) -> Duration {
        self.retry_after
            .unwrap_or_else(|| self.category.recommended_delay())
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Message fragments checked in order; the first category with a hit wins
const MESSAGE_RULES: &[(ErrorCategory, &[&str])] = &[
    (
        ErrorCategory::RateLimit,
        &["rate limit", "429", "too many requests", "quota exceeded"],
    ),
    (
        ErrorCategory::Auth,
        &["auth", "401", "403", "api key", "unauthorized"],
    ),
    (
        ErrorCategory::Network,
        &["network", "connection", "dns", "timed out", "timeout"],
    ),
    (
        ErrorCategory::Unavailable,
        &["503", "502", "500", "service unavailable", "not found"],
    ),
    (ErrorCategory::BadRequest, &["400", "bad request", "invalid"]),
    (ErrorCategory::EmptyResponse, &["empty", "no content"]),
    (ErrorCategory::Transient, &["temporary", "overloaded", "retry"]),
];

/// Classifies provider failures into categories
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify a free-form provider message
    pub fn classify(message: &str, provider: &str) -> LlmError {
        let lower = message.to_lowercase();
        let category = MESSAGE_RULES
            .iter()
            .find(|(_, needles)| needles.iter().any(|n| lower.contains(n)))
            .map_or(ErrorCategory::Unknown, |(category, _)| *category);

        let err = LlmError::with_provider(category, message, provider);
        if category == ErrorCategory::RateLimit {
            err.retry_after(category.recommended_delay())
        } else {
            err
        }
    }

    /// Classify HTTP status code directly (more accurate than string matching)
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> LlmError {
        match status {
            429 => LlmError::with_provider(ErrorCategory::RateLimit, message, provider)
                .retry_after(ErrorCategory::RateLimit.recommended_delay()),
            401 | 403 => LlmError::with_provider(ErrorCategory::Auth, message, provider),
            400 => LlmError::with_provider(ErrorCategory::BadRequest, message, provider),
            500 | 502 | 503 | 504 => {
                LlmError::with_provider(ErrorCategory::Transient, message, provider)
            }
            404 => LlmError::with_provider(ErrorCategory::Unavailable, message, provider),
            _ => LlmError::with_provider(ErrorCategory::Unknown, message, provider),
        }
    }

    /// Classify a DocError raised on the generation path
    pub fn classify_doc_error(err: &DocError, provider: &str) -> LlmError {
        match err {
            DocError::Generation(llm_err) => llm_err.clone(),
            DocError::LlmApi(msg) => Self::classify(msg, provider),
            DocError::Timeout { .. } => {
                LlmError::with_provider(ErrorCategory::Network, err.to_string(), provider)
            }
            DocError::Json(_) => {
                LlmError::with_provider(ErrorCategory::EmptyResponse, err.to_string(), provider)
            }
            _ => LlmError::with_provider(ErrorCategory::Unknown, err.to_string(), provider),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum DocError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // -------------------------------------------------------------------------
    // Generation Errors
    // -------------------------------------------------------------------------
    /// Structured generation error with category and retry hints
    #[error("Generation error: {0}")]
    Generation(LlmError),

    /// Raw provider API error (classified on demand)
    #[error("LLM API error: {0}")]
    LlmApi(String),

    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Parse error in {path}: {message}")]
    Parse { message: String, path: String },

    #[error("Write error in {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Edit conflict in {path}: {message}")]
    EditConflict { path: String, message: String },

    #[error("Config error: {0}")]
    Config(String),

    /// External tool (mkdocs) failed to start or exited with an error
    #[error("Process error: {0}")]
    Process(String),
}

impl From<LlmError> for DocError {
    fn from(err: LlmError) -> Self {
        DocError::Generation(err)
    }
}

pub type Result<T> = std::result::Result<T, DocError>;

impl DocError {
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from the text-generation path
    pub fn is_generation(&self) -> bool {
        matches!(
            self,
            Self::Generation(_) | Self::LlmApi(_) | Self::Timeout { .. }
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
