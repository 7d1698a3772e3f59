//! Docstring Editors
//!
//! An editor turns one unit plus a [`Directive`] into at most one text edit.
//! Editors never touch the filesystem; the manager collects their edits and
//! writes each file once.
//!
//! - [`BaseEditor`]: pure text splicing with placeholder docstrings
//! - [`CustomEditor`]: docstring text produced by a text-generation provider

mod base;
mod custom;
pub mod render;
pub mod splice;

pub use base::BaseEditor;
pub use custom::CustomEditor;
pub use splice::apply_edits;

use async_trait::async_trait;
use serde::Serialize;

use crate::analyzer::parser::{Parser, PythonParser, SourceFile};
use crate::types::{Directive, Result, Span, UnitKind, UnitRef};

/// Replace `span` with `replacement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub span: Span,
    pub replacement: String,
    /// Label of the unit the edit belongs to
    pub unit: String,
}

impl TextEdit {
    pub fn new(span: Span, replacement: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
            unit: unit.into(),
        }
    }
}

/// What an editor decided for one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Edit(TextEdit),
    /// Nothing to do; the reason ends up in the report
    Unchanged(String),
}

impl EditOutcome {
    pub fn unchanged(reason: impl Into<String>) -> Self {
        Self::Unchanged(reason.into())
    }
}

/// One unit together with the file text it was parsed from
#[derive(Debug, Clone, Copy)]
pub struct EditContext<'a> {
    pub source: &'a str,
    /// Relative path, for messages
    pub path: &'a str,
    pub unit: UnitRef<'a>,
}

impl<'a> EditContext<'a> {
    /// Source text of the unit (the whole file for modules)
    pub fn unit_source(&self) -> &'a str {
        self.unit.span.slice(self.source)
    }
}

#[async_trait]
pub trait Editor: Send + Sync {
    /// Compute the edit carrying out `directive` on `ctx.unit`
    async fn edit(&self, ctx: &EditContext<'_>, directive: &Directive) -> Result<EditOutcome>;

    fn name(&self) -> &'static str;

    /// Apply `directive` to a standalone piece of source.
    ///
    /// The first class or function in `unit_text` is edited (the module when
    /// there is none) and the resulting text returned.
    async fn apply(&self, unit_text: &str, directive: &Directive) -> Result<String> {
        let file = SourceFile::in_memory("unit", unit_text);
        let module = PythonParser::new()?.parse(&file)?;
        let units = module.units();

        let Some(unit) = units
            .iter()
            .find(|u| u.kind != UnitKind::Module)
            .or_else(|| units.first())
            .copied()
        else {
            return Ok(unit_text.to_string());
        };

        let ctx = EditContext {
            source: unit_text,
            path: &file.relative_path,
            unit,
        };
        match self.edit(&ctx, directive).await? {
            EditOutcome::Edit(edit) => apply_edits(&file.relative_path, unit_text, &[edit]),
            EditOutcome::Unchanged(_) => Ok(unit_text.to_string()),
        }
    }
}
