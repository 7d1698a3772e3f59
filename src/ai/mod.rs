//! AI Integration Layer
//!
//! Text-generation providers, prompt templates and helpers for bounded calls.

pub mod prompt;
pub mod provider;
pub mod response;
pub mod timeout;

pub use prompt::{PromptBuilder, PromptSection, PromptTemplates};
pub use provider::{
    LlmProvider, LlmResponse, OllamaProvider, OpenAiProvider, ProviderConfig, SharedProvider,
    TokenUsage, create_provider,
};
pub use response::{clean_docstring, clean_markdown};
pub use timeout::{complete_bounded, with_timeout};
