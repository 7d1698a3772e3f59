use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::types::{DocError, ModuleDescriptor, Result, Span};

/// A source file handed to a parser
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// `/`-separated path relative to the project root
    pub relative_path: String,
    pub module_name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(
        path: impl Into<PathBuf>,
        relative_path: impl Into<String>,
        module_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            relative_path: relative_path.into(),
            module_name: module_name.into(),
            content: content.into(),
        }
    }

    /// In-memory source, used for single-unit edits and tests
    pub fn in_memory(module_name: &str, content: &str) -> Self {
        Self::new(
            PathBuf::from(format!("{}.py", module_name)),
            format!("{}.py", module_name),
            module_name,
            content,
        )
    }
}

pub trait Parser: Send + Sync {
    fn parse(&self, file: &SourceFile) -> Result<ModuleDescriptor>;
    fn language(&self) -> &'static str;
}

/// SHA-256 of a file's text, hex encoded
pub fn content_hash(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

/// Extract text content from a tree-sitter node.
/// Returns empty string if extraction fails (with debug logging).
#[inline]
pub fn get_node_text<'a>(node: tree_sitter::Node, content: &'a [u8]) -> &'a str {
    node.utf8_text(content).unwrap_or_else(|e| {
        tracing::debug!(
            "UTF-8 extraction failed at {}:{}-{}:{}: {}",
            node.start_position().row + 1,
            node.start_position().column,
            node.end_position().row + 1,
            node.end_position().column,
            e
        );
        ""
    })
}

#[inline]
pub fn node_span(node: tree_sitter::Node) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

/// Create a tree-sitter parser for the given language.
pub fn create_ts_parser<L: Into<tree_sitter::Language>>(
    language: L,
    lang_name: &str,
) -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.into())
        .map_err(|e| DocError::Parse {
            message: format!("Failed to set {} language: {}", lang_name, e),
            path: String::new(),
        })?;
    Ok(parser)
}

/// Byte offset of the start of the line containing `offset`
pub fn line_start(content: &str, offset: usize) -> usize {
    content[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Byte offset just past the newline ending the line containing `offset`,
/// or the end of the text for the last line
pub fn line_end_inclusive(content: &str, offset: usize) -> usize {
    content[offset..]
        .find('\n')
        .map(|i| offset + i + 1)
        .unwrap_or(content.len())
}

/// Leading whitespace of the line containing `offset`
pub fn line_indent(content: &str, offset: usize) -> &str {
    let start = line_start(content, offset);
    let line = &content[start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

/// Dotted module name for a `/`-separated relative path.
///
/// `pkg/sub/mod.py` becomes `pkg.sub.mod`; `pkg/__init__.py` becomes `pkg`.
/// A root-level `__init__.py` takes the project name.
pub fn module_name_for(relative_path: &str, project_name: &str) -> String {
    let without_ext = relative_path.strip_suffix(".py").unwrap_or(relative_path);
    let mut parts: Vec<&str> = without_ext.split('/').filter(|p| !p.is_empty()).collect();
    if parts.last() == Some(&"__init__") {
        parts.pop();
    }
    if parts.is_empty() {
        project_name.to_string()
    } else {
        parts.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_name_for() {
        assert_eq!(module_name_for("pkg/sub/mod.py", "proj"), "pkg.sub.mod");
        assert_eq!(module_name_for("pkg/__init__.py", "proj"), "pkg");
        assert_eq!(module_name_for("__init__.py", "proj"), "proj");
        assert_eq!(module_name_for("main.py", "proj"), "main");
    }

    #[test]
    fn test_line_helpers() {
        let text = "def f():\n    pass\n";
        let pass_at = text.find("pass").unwrap();
        assert_eq!(line_start(text, pass_at), 9);
        assert_eq!(line_end_inclusive(text, pass_at), text.len());
        assert_eq!(line_indent(text, pass_at), "    ");
        assert_eq!(line_indent(text, 0), "");
    }

    #[test]
    fn test_content_hash_is_stable() {
        assert_eq!(content_hash("abc"), content_hash("abc"));
        assert_ne!(content_hash("abc"), content_hash("abd"));
        assert_eq!(content_hash("").len(), 64);
    }
}
