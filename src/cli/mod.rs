//! Command-line interface
//!
//! Command handlers return whether the run fully succeeded; the binary turns
//! that into the exit code.

pub mod commands;
pub mod ui;
pub mod util;

pub use ui::Output;
pub use util::{CommandContext, LlmOverrides};
