//! Python Parser Module
//!
//! Tree-sitter based extraction of module, class and function descriptors.
//!
//! ## Project parsing
//!
//! ```rust,ignore
//! use docweave::analyzer::parser::ProjectParser;
//!
//! let outcome = ProjectParser::new(&config.scan)?.parse(project_root)?;
//! for failure in &outcome.failures {
//!     eprintln!("{}: {}", failure.path, failure.message);
//! }
//! ```

pub mod docstring;
pub mod python;
pub mod traits;

pub use python::PythonParser;
pub use traits::{Parser, SourceFile, content_hash, module_name_for};

use std::path::Path;

use crate::analyzer::scanner::FileScanner;
use crate::config::ScanConfig;
use crate::types::{DocError, ModuleDescriptor, ParseFailure, Result};

/// Result of parsing a whole project
#[derive(Debug, Default)]
pub struct ParseOutcome {
    /// One descriptor per parsed file, in scan order
    pub modules: Vec<ModuleDescriptor>,
    /// Files that were skipped because they could not be decoded or parsed
    pub failures: Vec<ParseFailure>,
}

impl ParseOutcome {
    pub fn module(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.module_name == name)
    }
}

/// Scans a project root and parses every Python file it finds
pub struct ProjectParser {
    parser: PythonParser,
    exclude: Vec<String>,
    max_file_size: u64,
}

impl ProjectParser {
    pub fn new(scan: &ScanConfig) -> Result<Self> {
        Ok(Self {
            parser: PythonParser::new()?,
            exclude: scan.exclude.clone(),
            max_file_size: scan.max_file_size,
        })
    }

    /// Parse all source files under `root`.
    ///
    /// A missing or unreadable root is fatal; individual files that fail to
    /// decode or parse are recorded in [`ParseOutcome::failures`].
    pub fn parse(&self, root: &Path) -> Result<ParseOutcome> {
        let root = root.canonicalize().map_err(|e| {
            DocError::parse(
                root.display().to_string(),
                format!("cannot read project root: {}", e),
            )
        })?;

        let project_name = project_name(&root);
        let files = FileScanner::new(&root)
            .with_exclude(&self.exclude)
            .with_max_file_size(self.max_file_size)
            .scan()?;

        tracing::debug!("Parsing {} Python files under {}", files.len(), root.display());

        let mut outcome = ParseOutcome::default();
        for file in files {
            let content = match std::fs::read(&file.path).map(String::from_utf8) {
                Ok(Ok(content)) => content,
                Ok(Err(_)) => {
                    outcome.failures.push(ParseFailure {
                        path: file.relative_path,
                        message: "file is not valid UTF-8".to_string(),
                    });
                    continue;
                }
                Err(e) => {
                    outcome.failures.push(ParseFailure {
                        path: file.relative_path,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let module_name = module_name_for(&file.relative_path, &project_name);
            let source = SourceFile::new(&file.path, &file.relative_path, module_name, content);

            match self.parser.parse(&source) {
                Ok(module) => outcome.modules.push(module),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", file.relative_path, e);
                    let message = match e {
                        DocError::Parse { message, .. } => message,
                        other => other.to_string(),
                    };
                    outcome.failures.push(ParseFailure {
                        path: file.relative_path,
                        message,
                    });
                }
            }
        }

        Ok(outcome)
    }
}

/// Directory name of the project root
pub fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parser() -> ProjectParser {
        ProjectParser::new(&ScanConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_project_modules_in_order() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("pkg/__init__.py"), "\"\"\"Package.\"\"\"\n").unwrap();
        fs::write(dir.path().join("pkg/util.py"), "def helper():\n    pass\n").unwrap();
        fs::write(dir.path().join("app.py"), "import pkg\n").unwrap();

        let outcome = parser().parse(dir.path()).unwrap();
        let names: Vec<&str> = outcome
            .modules
            .iter()
            .map(|m| m.module_name.as_str())
            .collect();
        assert_eq!(names, vec!["app", "pkg", "pkg.util"]);
        assert!(outcome.failures.is_empty());
        assert_eq!(
            outcome.module("pkg").unwrap().docstring.as_deref(),
            Some("Package.")
        );
    }

    #[test]
    fn test_invalid_files_are_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("broken.py"), "def oops(:\n").unwrap();
        fs::write(dir.path().join("latin.py"), [0x23, 0x20, 0xe9, 0x0a]).unwrap();

        let outcome = parser().parse(dir.path()).unwrap();
        assert_eq!(outcome.modules.len(), 1);
        assert_eq!(outcome.modules[0].module_name, "good");

        let failed: Vec<&str> = outcome.failures.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(failed, vec!["broken.py", "latin.py"]);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result = parser().parse(&dir.path().join("nope"));
        assert!(matches!(result, Err(DocError::Parse { .. })));
    }
}
