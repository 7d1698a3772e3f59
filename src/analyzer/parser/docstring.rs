//! Docstring literal handling
//!
//! Extracts the text of a Python string literal and normalizes it the way
//! `inspect.cleandoc` does.

/// Content of a docstring literal, or `None` when the literal cannot be a
/// docstring (bytes and f-strings are not).
pub fn literal_content(literal: &str) -> Option<&str> {
    let quote_at = literal.find(['"', '\''])?;
    let prefix = &literal[..quote_at];
    if prefix
        .chars()
        .any(|c| matches!(c.to_ascii_lowercase(), 'b' | 'f'))
    {
        return None;
    }

    let body = &literal[quote_at..];
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if body.len() >= quote.len() * 2 && body.starts_with(quote) && body.ends_with(quote) {
            return Some(&body[quote.len()..body.len() - quote.len()]);
        }
    }
    None
}

/// Normalize docstring text: strip the first line, dedent the remaining lines
/// by their common indentation and drop leading/trailing blank lines.
pub fn clean(raw: &str) -> String {
    let mut lines = raw.lines();
    let first = lines.next().unwrap_or("").trim();
    let rest: Vec<&str> = lines.collect();

    let margin = rest
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(rest.len() + 1);
    cleaned.push(first.to_string());
    for line in rest {
        let stripped = line.get(margin..).unwrap_or_else(|| line.trim_start());
        cleaned.push(stripped.trim_end().to_string());
    }

    while cleaned.first().is_some_and(|l| l.is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|l| l.is_empty()) {
        cleaned.pop();
    }

    cleaned.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_content_quotes() {
        assert_eq!(literal_content("\"\"\"Hello.\"\"\""), Some("Hello."));
        assert_eq!(literal_content("'''Hi'''"), Some("Hi"));
        assert_eq!(literal_content("\"short\""), Some("short"));
        assert_eq!(literal_content("r\"\"\"raw \\d\"\"\""), Some("raw \\d"));
        assert_eq!(literal_content("\"\"\"\"\"\""), Some(""));
    }

    #[test]
    fn test_literal_content_rejects_bytes_and_fstrings() {
        assert_eq!(literal_content("b\"data\""), None);
        assert_eq!(literal_content("f\"{x}\""), None);
        assert_eq!(literal_content("Rb'''x'''"), None);
    }

    #[test]
    fn test_clean_dedents_body() {
        let raw = "Summary line.\n\n        Args:\n            x: value\n        ";
        assert_eq!(clean(raw), "Summary line.\n\nArgs:\n    x: value");
    }

    #[test]
    fn test_clean_strips_blank_edges() {
        assert_eq!(clean("\n    Text here.\n    "), "Text here.");
        assert_eq!(clean(""), "");
    }
}
