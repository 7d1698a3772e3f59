//! Source structure descriptors
//!
//! In-memory representation of the modules, classes and functions found in a
//! project. Produced once per run by the parser and read-only afterwards.

use std::path::PathBuf;

use serde::Serialize;

/// Half-open byte range `[start, end)` into a file's source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} after end {}", start, end);
        Self { start, end }
    }

    /// Zero-width span used as an insertion point
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Two spans conflict when applying both would be ambiguous.
    ///
    /// Insertions at the same offset conflict, as does an insertion strictly
    /// inside a removed range.
    pub fn overlaps(&self, other: &Span) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => self.start == other.start,
            (true, false) => other.start < self.start && self.start < other.end,
            (false, true) => self.start < other.start && other.start < self.end,
            (false, false) => self.start < other.end && other.start < self.end,
        }
    }

    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start..self.end).unwrap_or("")
    }
}

/// Where a unit's docstring lives, or where one would be inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DocstringSlot {
    /// A docstring literal exists.
    Existing {
        /// The string literal itself, quotes included
        literal: Span,
        /// Whole lines occupied by the docstring statement, newline included.
        /// `None` when the literal shares a line with other code.
        lines: Option<Span>,
        /// Indentation of the docstring line
        indent: String,
        /// The docstring is the only statement of its block; removing it
        /// must leave a `pass` behind.
        sole_statement: bool,
    },
    /// No docstring; a new one goes at `insert_at` (a line start).
    Missing { insert_at: usize, indent: String },
    /// Body shares the signature line, nothing can be inserted.
    Inline,
}

impl DocstringSlot {
    pub fn is_existing(&self) -> bool {
        matches!(self, Self::Existing { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Module,
    Class,
    Function,
    Method,
}

impl UnitKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Module => "Module",
            Self::Class => "Class",
            Self::Function => "Function",
            Self::Method => "Method",
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

/// A function or method definition
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDescriptor {
    pub name: String,
    /// Dotted path inside the module, e.g. `Parser.parse`
    pub qualified_name: String,
    /// Header text up to (excluding) the trailing colon
    pub signature: String,
    pub is_async: bool,
    pub docstring: Option<String>,
    pub slot: DocstringSlot,
    /// Whole definition, decorators excluded
    pub span: Span,
}

/// A class definition and its methods
#[derive(Debug, Clone, Serialize)]
pub struct ClassDescriptor {
    pub name: String,
    pub signature: String,
    pub docstring: Option<String>,
    pub slot: DocstringSlot,
    pub span: Span,
    pub methods: Vec<FunctionDescriptor>,
}

/// An import statement target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRef {
    /// Dotted module path as written (leading dots stripped for relative imports)
    pub module: String,
    pub relative: bool,
}

impl ImportRef {
    /// First component of the module path (`yaml` for `yaml.loader`)
    pub fn top_level(&self) -> &str {
        self.module.split('.').next().unwrap_or(&self.module)
    }
}

/// One parsed source file
#[derive(Debug, Clone, Serialize)]
pub struct ModuleDescriptor {
    pub path: PathBuf,
    /// Path relative to the project root, `/`-separated
    pub relative_path: String,
    /// Dotted module name (`pkg.sub.mod`; packages use their `__init__` name)
    pub module_name: String,
    pub docstring: Option<String>,
    pub slot: DocstringSlot,
    pub classes: Vec<ClassDescriptor>,
    pub functions: Vec<FunctionDescriptor>,
    pub imports: Vec<ImportRef>,
    /// SHA-256 of the parsed text, hex encoded
    pub content_hash: String,
    /// Length of the whole file
    pub len: usize,
}

/// Borrowed view of one documentable unit
#[derive(Debug, Clone, Copy)]
pub struct UnitRef<'a> {
    pub kind: UnitKind,
    /// Dotted name relative to the module (module units use the module name)
    pub name: &'a str,
    pub signature: &'a str,
    pub docstring: Option<&'a str>,
    pub slot: &'a DocstringSlot,
    pub span: Span,
}

impl ModuleDescriptor {
    /// Units in processing order: module, each class followed by its methods,
    /// then top-level functions.
    pub fn units(&self) -> Vec<UnitRef<'_>> {
        let mut units = Vec::with_capacity(1 + self.classes.len() + self.functions.len());

        units.push(UnitRef {
            kind: UnitKind::Module,
            name: &self.module_name,
            signature: &self.module_name,
            docstring: self.docstring.as_deref(),
            slot: &self.slot,
            span: Span::new(0, self.len),
        });

        for class in &self.classes {
            units.push(UnitRef {
                kind: UnitKind::Class,
                name: &class.name,
                signature: &class.signature,
                docstring: class.docstring.as_deref(),
                slot: &class.slot,
                span: class.span,
            });
            for method in &class.methods {
                units.push(method.as_unit(UnitKind::Method));
            }
        }

        for function in &self.functions {
            units.push(function.as_unit(UnitKind::Function));
        }

        units
    }

    pub fn unit_count(&self) -> usize {
        1 + self.functions.len()
            + self
                .classes
                .iter()
                .map(|c| 1 + c.methods.len())
                .sum::<usize>()
    }

    /// First line of the module docstring, if any
    pub fn summary(&self) -> Option<&str> {
        first_line(self.docstring.as_deref())
    }
}

impl FunctionDescriptor {
    fn as_unit(&self, kind: UnitKind) -> UnitRef<'_> {
        UnitRef {
            kind,
            name: &self.qualified_name,
            signature: &self.signature,
            docstring: self.docstring.as_deref(),
            slot: &self.slot,
            span: self.span,
        }
    }

    pub fn summary(&self) -> Option<&str> {
        first_line(self.docstring.as_deref())
    }
}

impl ClassDescriptor {
    pub fn summary(&self) -> Option<&str> {
        first_line(self.docstring.as_deref())
    }
}

fn first_line(doc: Option<&str>) -> Option<&str> {
    doc.and_then(|d| d.lines().map(str::trim).find(|l| !l.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_overlap_rules() {
        let a = Span::new(10, 20);
        assert!(a.overlaps(&Span::new(15, 25)));
        assert!(!a.overlaps(&Span::new(20, 30)));
        assert!(a.overlaps(&Span::at(15)));
        assert!(!a.overlaps(&Span::at(10)));
        assert!(!a.overlaps(&Span::at(20)));
        assert!(Span::at(5).overlaps(&Span::at(5)));
        assert!(!Span::at(5).overlaps(&Span::at(6)));
    }

    #[test]
    fn test_import_top_level() {
        let import = ImportRef {
            module: "yaml.loader".to_string(),
            relative: false,
        };
        assert_eq!(import.top_level(), "yaml");
    }

    #[test]
    fn test_first_line_skips_blank_lines() {
        assert_eq!(first_line(Some("\n\n  Hello.\nMore")), Some("Hello."));
        assert_eq!(first_line(Some("   \n")), None);
        assert_eq!(first_line(None), None);
    }
}
