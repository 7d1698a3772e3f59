//! Docstring literal rendering

use crate::constants::docstring::QUOTES;
use crate::types::UnitKind;

/// Escape text so it can sit between triple double quotes.
///
/// Embedded `"""` is escaped, and a trailing quote or dangling backslash is
/// kept from merging with the closing quotes.
pub fn escape(body: &str) -> String {
    guard_end(&body.replace(QUOTES, "\\\"\\\"\\\""))
}

/// Keep the last character of an already-escaped body from merging with the
/// closing `"""`.
pub fn guard_end(body: &str) -> String {
    let mut escaped = body.to_string();

    let trailing_backslashes = escaped.chars().rev().take_while(|c| *c == '\\').count();
    if trailing_backslashes % 2 == 1 {
        escaped.push('\\');
    } else if escaped.ends_with('"') {
        let before_quote = escaped[..escaped.len() - 1]
            .chars()
            .rev()
            .take_while(|c| *c == '\\')
            .count();
        if before_quote % 2 == 0 {
            escaped.insert(escaped.len() - 1, '\\');
        }
    }
    escaped
}

/// Collapse runs of blank lines and trim trailing whitespace on every line
pub fn tidy(body: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in body.lines().map(str::trim_end) {
        if line.is_empty() && lines.last().is_some_and(|l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// The docstring literal (quotes included) for an already escaped body.
///
/// Continuation lines get `indent`; a multi-line docstring closes on its own
/// line.
pub fn literal(prefix: &str, body: &str, indent: &str) -> String {
    let mut lines = body.lines();
    let first = lines.next().unwrap_or("").trim();
    let rest: Vec<&str> = lines.collect();

    if rest.is_empty() {
        return format!("{prefix}{QUOTES}{first}{QUOTES}");
    }

    let mut out = format!("{prefix}{QUOTES}{first}\n");
    for line in rest {
        if !line.trim().is_empty() {
            out.push_str(indent);
            out.push_str(line);
        }
        out.push('\n');
    }
    out.push_str(indent);
    out.push_str(QUOTES);
    out
}

/// A complete docstring statement to insert at a line start
pub fn block(body: &str, indent: &str) -> String {
    format!("{}{}\n", indent, literal("", &escape(body), indent))
}

/// Placeholder text for an undocumented unit: ``Function `foo(x)`.``
pub fn placeholder(kind: UnitKind, signature: &str) -> String {
    let mut name = signature.trim();
    for keyword in ["async ", "def ", "class "] {
        name = name.strip_prefix(keyword).unwrap_or(name).trim_start();
    }
    format!("{} `{}`.", kind.label(), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        assert_eq!(
            placeholder(UnitKind::Function, "def foo(x)"),
            "Function `foo(x)`."
        );
        assert_eq!(
            placeholder(UnitKind::Method, "async def fetch(self, url)"),
            "Method `fetch(self, url)`."
        );
        assert_eq!(
            placeholder(UnitKind::Class, "class Greeter(Base)"),
            "Class `Greeter(Base)`."
        );
        assert_eq!(placeholder(UnitKind::Module, "pkg.util"), "Module `pkg.util`.");
    }

    #[test]
    fn test_block_single_line() {
        assert_eq!(block("Return x.", "    "), "    \"\"\"Return x.\"\"\"\n");
    }

    #[test]
    fn test_block_multi_line() {
        assert_eq!(
            block("Return x.\n\nArgs:\n    x: value", "    "),
            "    \"\"\"Return x.\n\n    Args:\n        x: value\n    \"\"\"\n"
        );
    }

    #[test]
    fn test_escape_embedded_quotes() {
        assert_eq!(escape("use \"\"\" here"), "use \\\"\\\"\\\" here");
        assert_eq!(escape("say \"hi\""), "say \"hi\\\"");
        assert_eq!(escape("path\\"), "path\\\\");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_guard_end_keeps_existing_escapes() {
        assert_eq!(guard_end("say \\\"hi\\\""), "say \\\"hi\\\"");
        assert_eq!(guard_end("a \\\\"), "a \\\\");
        assert_eq!(guard_end("ends \\"), "ends \\\\");
        assert_eq!(guard_end("say \"hi\""), "say \"hi\\\"");
    }

    #[test]
    fn test_tidy_collapses_blank_runs() {
        assert_eq!(tidy("Line.   \n\n\n\nMore.\n\n"), "Line.\n\nMore.");
    }
}
