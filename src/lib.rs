//! docweave - Docstring and Project Documentation Generator
//!
//! Keeps a Python project's documentation in shape: docstrings are cleared,
//! filled, polished or translated in place, and README, requirements,
//! `.gitignore` and a MkDocs site are rendered from the parsed source tree.
//!
//! ## Core Features
//!
//! - **Tree-sitter parsing**: module/class/function descriptors with exact spans
//! - **Span-based editing**: all edits for a file applied back-to-front, one write per file
//! - **Pluggable generation**: OpenAI-compatible and Ollama providers, bounded retries
//! - **Project artifacts**: deterministic README, requirements, `.gitignore`, MkDocs
//!
//! ## Quick Start
//!
//! ```ignore
//! use docweave::{ConfigLoader, GitAgent};
//!
//! let config = ConfigLoader::load(Some(&root))?;
//! let mut agent = GitAgent::new(&root, config, None)?;
//! let report = agent.standardize_project(true, true).await;
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: file scanning, Python parsing, project analysis
//! - [`editor`]: per-unit docstring edits
//! - [`manager`]: runs an editor across a project and writes files
//! - [`agent`]: project-level artifacts
//! - [`ai`]: text-generation providers and prompts
//! - [`config`]: layered configuration

pub mod agent;
pub mod ai;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod editor;
pub mod manager;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{Config, ConfigLoader, DocLanguage, ManagerStrategy};
pub use types::{DocError, Directive, ErrorCategory, ProcessingReport, Result};

pub use agent::{AgentReport, GitAgent};
pub use analyzer::{ParseOutcome, ProjectParser};
pub use editor::{BaseEditor, CustomEditor, Editor};
pub use manager::Manager;

pub use ai::{LlmProvider, LlmResponse, SharedProvider, create_provider};
