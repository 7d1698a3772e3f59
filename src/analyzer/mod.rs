//! Code Analyzer Module
//!
//! - File scanning with gitignore support
//! - Python parsing into module/class/function descriptors
//! - Project-level views (module tree, digests, requirements, profile)

pub mod parser;
pub mod project;
pub mod scanner;

pub use parser::{ParseOutcome, ProjectParser};
pub use project::{ModuleDigest, ProjectProfile, module_tree, requirements};
