use async_trait::async_trait;

use super::render;
use super::{EditContext, EditOutcome, Editor, TextEdit};
use crate::analyzer::parser::docstring::{clean, literal_content};
use crate::constants::docstring::QUOTES;
use crate::types::{Directive, DocstringSlot, Result, Span};

/// Text-splicing editor; never calls a generator
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseEditor;

impl BaseEditor {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous core of [`Editor::edit`]
    pub fn edit_unit(&self, ctx: &EditContext<'_>, directive: &Directive) -> EditOutcome {
        match directive {
            Directive::Clear => clear(ctx),
            Directive::Fill => insert(ctx, &placeholder(ctx)),
            Directive::Polish => polish(ctx),
            Directive::Translate { .. } => {
                EditOutcome::unchanged("translation needs a text generator")
            }
        }
    }
}

#[async_trait]
impl Editor for BaseEditor {
    async fn edit(&self, ctx: &EditContext<'_>, directive: &Directive) -> Result<EditOutcome> {
        Ok(self.edit_unit(ctx, directive))
    }

    fn name(&self) -> &'static str {
        "base"
    }
}

pub(super) fn label(ctx: &EditContext<'_>) -> String {
    format!("{} {}", ctx.unit.kind, ctx.unit.name)
}

pub(super) fn placeholder(ctx: &EditContext<'_>) -> String {
    render::placeholder(ctx.unit.kind, ctx.unit.signature)
}

/// Remove the docstring lines; a docstring that is the whole body becomes `pass`
pub(super) fn clear(ctx: &EditContext<'_>) -> EditOutcome {
    match ctx.unit.slot {
        DocstringSlot::Existing {
            lines: Some(lines),
            indent,
            sole_statement,
            ..
        } => {
            let replacement = if *sole_statement {
                let newline = if lines.slice(ctx.source).ends_with('\n') {
                    "\n"
                } else {
                    ""
                };
                format!("{}pass{}", indent, newline)
            } else {
                String::new()
            };
            EditOutcome::Edit(TextEdit::new(*lines, replacement, label(ctx)))
        }
        DocstringSlot::Existing { lines: None, .. } => {
            EditOutcome::unchanged("docstring shares its line with other code")
        }
        _ => EditOutcome::unchanged("no docstring"),
    }
}

/// Insert a new docstring with `body` (unescaped) where none exists
pub(super) fn insert(ctx: &EditContext<'_>, body: &str) -> EditOutcome {
    match ctx.unit.slot {
        DocstringSlot::Missing { insert_at, indent } => EditOutcome::Edit(TextEdit::new(
            Span::at(*insert_at),
            render::block(body, indent),
            label(ctx),
        )),
        DocstringSlot::Existing { .. } => EditOutcome::unchanged("already documented"),
        DocstringSlot::Inline => EditOutcome::unchanged("body shares the signature line"),
    }
}

/// Replace an existing docstring literal with `body` (unescaped)
pub(super) fn replace(ctx: &EditContext<'_>, body: &str) -> EditOutcome {
    match ctx.unit.slot {
        DocstringSlot::Existing {
            literal, indent, ..
        } => {
            let new_literal = render::literal("", &render::escape(body), indent);
            if new_literal == literal.slice(ctx.source) {
                return EditOutcome::unchanged("docstring unchanged");
            }
            EditOutcome::Edit(TextEdit::new(*literal, new_literal, label(ctx)))
        }
        DocstringSlot::Missing { .. } => insert(ctx, body),
        DocstringSlot::Inline => EditOutcome::unchanged("body shares the signature line"),
    }
}

/// Normalize an existing docstring in place (acts as fill when absent)
fn polish(ctx: &EditContext<'_>) -> EditOutcome {
    let DocstringSlot::Existing {
        literal, indent, ..
    } = ctx.unit.slot
    else {
        return insert(ctx, &placeholder(ctx));
    };

    let text = literal.slice(ctx.source);
    let Some(content) = literal_content(text) else {
        return EditOutcome::unchanged("unsupported string literal");
    };
    let quote_at = text.find(['"', '\'']).unwrap_or(0);
    let prefix = &text[..quote_at];

    let normalized = render::tidy(&clean(content));
    // Escapes inside `"""` literals are kept verbatim; other quote styles are re-escaped
    let body = if text[quote_at..].starts_with(QUOTES) {
        render::guard_end(&normalized)
    } else {
        render::escape(&normalized)
    };

    let new_literal = render::literal(prefix, &body, indent);
    if new_literal == text {
        return EditOutcome::unchanged("already normalized");
    }
    EditOutcome::Edit(TextEdit::new(*literal, new_literal, label(ctx)))
}
