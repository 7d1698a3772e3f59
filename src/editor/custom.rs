use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::base::{clear, insert, replace};
use super::{EditContext, EditOutcome, Editor};
use crate::ai::prompt::PromptTemplates;
use crate::ai::provider::SharedProvider;
use crate::ai::response::clean_docstring;
use crate::ai::timeout::complete_bounded;
use crate::constants::docstring::{DEFAULT_LANGUAGE, MAX_CONTEXT_CHARS};
use crate::types::{Directive, DocError, DocstringSlot, ErrorCategory, LlmError, Result};

/// Editor whose docstring text comes from a text-generation provider
pub struct CustomEditor {
    provider: SharedProvider,
    language: String,
    timeout: Duration,
}

impl CustomEditor {
    pub fn new(provider: SharedProvider, timeout: Duration) -> Self {
        Self {
            provider,
            language: DEFAULT_LANGUAGE.to_string(),
            timeout,
        }
    }

    /// Language generated docstrings are written in
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn build_prompt(&self, ctx: &EditContext<'_>, directive: &Directive) -> String {
        let unit = &ctx.unit;
        let mut builder =
            PromptTemplates::docstring(unit.kind, unit.signature, directive, &self.language)
                .context_item("File", ctx.path);

        if let Some(existing) = unit.docstring.filter(|d| !d.trim().is_empty()) {
            builder = builder.section("Existing docstring", existing);
        }

        builder
            .code("python", truncate(ctx.unit_source(), MAX_CONTEXT_CHARS))
            .build()
    }

    async fn generate(&self, ctx: &EditContext<'_>, directive: &Directive) -> Result<String> {
        let prompt = self.build_prompt(ctx, directive);
        debug!("Generating docstring for {} {}", ctx.unit.kind, ctx.unit.name);

        let response = complete_bounded(self.provider.as_ref(), &prompt, self.timeout).await?;

        clean_docstring(&response.content).ok_or_else(|| {
            DocError::Generation(LlmError::with_provider(
                ErrorCategory::EmptyResponse,
                format!("no usable docstring for {}", ctx.unit.name),
                self.provider.name(),
            ))
        })
    }
}

#[async_trait]
impl Editor for CustomEditor {
    async fn edit(&self, ctx: &EditContext<'_>, directive: &Directive) -> Result<EditOutcome> {
        let slot = ctx.unit.slot;
        match directive {
            Directive::Clear => return Ok(clear(ctx)),
            Directive::Fill if slot.is_existing() => {
                return Ok(EditOutcome::unchanged("already documented"));
            }
            Directive::Translate { .. } if !slot.is_existing() => {
                return Ok(EditOutcome::unchanged("no docstring to translate"));
            }
            _ => {}
        }
        if matches!(slot, DocstringSlot::Inline) {
            return Ok(EditOutcome::unchanged("body shares the signature line"));
        }

        let body = self.generate(ctx, directive).await?;
        Ok(match slot {
            DocstringSlot::Existing { .. } => replace(ctx, &body),
            _ => insert(ctx, &body),
        })
    }

    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Longest prefix of `text` within `max_chars` bytes, cut at a char boundary
fn truncate(text: &str, max_chars: usize) -> &str {
    if text.len() <= max_chars {
        return text;
    }
    let mut end = max_chars;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::testing::FnProvider;
    use std::sync::Arc;

    fn editor(provider: SharedProvider) -> CustomEditor {
        CustomEditor::new(provider, Duration::from_secs(5)).with_language("en")
    }

    #[tokio::test]
    async fn test_fill_uses_generated_text() {
        let provider = Arc::new(FnProvider::new(|prompt: &str| {
            assert!(prompt.contains("def add(a, b)"));
            Ok("```\nAdd two numbers.\n\nReturns:\n    The sum.\n```".to_string())
        }));
        let out = editor(provider.clone())
            .apply("def add(a, b):\n    return a + b\n", &Directive::Fill)
            .await
            .unwrap();

        assert_eq!(
            out,
            "def add(a, b):\n    \"\"\"Add two numbers.\n\n    Returns:\n        The sum.\n    \"\"\"\n    return a + b\n"
        );
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_translate_replaces_existing_literal() {
        let provider = Arc::new(FnProvider::new(|prompt: &str| {
            assert!(prompt.contains("Existing docstring"));
            assert!(prompt.contains("Simplified Chinese"));
            Ok("返回输入值。".to_string())
        }));
        let directive = Directive::Translate {
            language: "zh".to_string(),
        };
        let out = editor(provider)
            .apply("def f(x):\n    \"\"\"Return x.\"\"\"\n    return x\n", &directive)
            .await
            .unwrap();
        assert_eq!(out, "def f(x):\n    \"\"\"返回输入值。\"\"\"\n    return x\n");
    }

    #[tokio::test]
    async fn test_fill_skips_documented_without_calling_provider() {
        let provider = Arc::new(FnProvider::new(|_: &str| Ok("unused".to_string())));
        let source = "def f():\n    \"\"\"Doc.\"\"\"\n";
        let out = editor(provider.clone())
            .apply(source, &Directive::Fill)
            .await
            .unwrap();
        assert_eq!(out, source);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_generation_is_generation_error() {
        let provider = Arc::new(FnProvider::new(|_: &str| {
            Ok("<think>nothing to say</think>".to_string())
        }));
        let err = editor(provider)
            .apply("def f():\n    return 1\n", &Directive::Fill)
            .await
            .unwrap_err();
        assert!(err.is_generation());
    }

    #[tokio::test]
    async fn test_clear_does_not_generate() {
        let provider = Arc::new(FnProvider::new(|_: &str| Ok("unused".to_string())));
        let out = editor(provider.clone())
            .apply("def f():\n    \"\"\"Doc.\"\"\"\n    return 1\n", &Directive::Clear)
            .await
            .unwrap();
        assert_eq!(out, "def f():\n    return 1\n");
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        assert_eq!(truncate("héllo", 2), "h");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
