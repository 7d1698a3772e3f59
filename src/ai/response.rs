//! Generated Text Cleanup
//!
//! Providers wrap answers in reasoning blocks, markdown fences or literal
//! quotes. These helpers strip that wrapping so only the payload remains.

use regex::Regex;
use std::sync::LazyLock;

/// Reasoning blocks emitted by thinking models: `<think>...</think>`
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static THINK_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

/// A whole answer wrapped in one fenced block
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```[A-Za-z0-9_+-]*[ \t]*\r?\n(.*?)\r?\n?```$").unwrap());

/// Remove `<think>` blocks (and an unterminated trailing one)
pub fn strip_reasoning(text: &str) -> String {
    let stripped = THINK_BLOCK_RE.replace_all(text, "");
    match stripped.find("<think>") {
        Some(open) => stripped[..open].to_string(),
        None => stripped.into_owned(),
    }
}

/// Unwrap an answer that is entirely one fenced code block
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    FENCE_RE
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Cleaned docstring body, or `None` when nothing usable is left
pub fn clean_docstring(raw: &str) -> Option<String> {
    let text = strip_code_fence(&strip_reasoning(raw));
    let mut body = text.trim();

    for quote in ["\"\"\"", "'''"] {
        if let Some(inner) = body
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            body = inner.trim();
            break;
        }
        // `r"""` prefixes from models that answer with a literal
        if let Some(inner) = body
            .strip_prefix('r')
            .and_then(|rest| rest.strip_prefix(quote))
            .and_then(|rest| rest.strip_suffix(quote))
        {
            body = inner.trim();
            break;
        }
    }

    let lines: Vec<&str> = body.lines().map(str::trim_end).collect();
    let cleaned = crate::analyzer::parser::docstring::clean(&lines.join("\n"));
    (!cleaned.trim().is_empty()).then_some(cleaned)
}

/// Cleaned markdown document (reasoning and an outer fence removed)
pub fn clean_markdown(raw: &str) -> Option<String> {
    let text = strip_code_fence(&strip_reasoning(raw));
    let text = text.trim();
    (!text.is_empty()).then(|| format!("{}\n", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_reasoning() {
        assert_eq!(
            strip_reasoning("<think>\nhmm\n</think>\nAnswer").trim(),
            "Answer"
        );
        assert_eq!(strip_reasoning("Answer<think>never closed"), "Answer");
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```python\nReturn x.\n```"), "Return x.");
        assert_eq!(strip_code_fence("plain text"), "plain text");
    }

    #[test]
    fn test_clean_docstring_removes_wrapping() {
        let raw = "<think>reasoning</think>\n```\n\"\"\"Return the sum.\n\n    Args:\n        a: left\n\"\"\"\n```";
        assert_eq!(
            clean_docstring(raw).as_deref(),
            Some("Return the sum.\n\nArgs:\n    a: left")
        );
    }

    #[test]
    fn test_clean_docstring_empty_is_none() {
        assert_eq!(clean_docstring("<think>only thoughts</think>"), None);
        assert_eq!(clean_docstring("\"\"\"   \"\"\""), None);
    }

    #[test]
    fn test_clean_markdown() {
        assert_eq!(
            clean_markdown("```markdown\n# Title\n\nBody\n```").as_deref(),
            Some("# Title\n\nBody\n")
        );
        assert_eq!(clean_markdown("  "), None);
    }
}
