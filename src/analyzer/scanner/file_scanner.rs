use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::constants::scan::{MAX_FILE_SIZE, SKIP_DIRS, SKIP_FILES};
use crate::types::{DocError, Result};

pub struct FileScanner {
    root: PathBuf,
    exclude: Vec<glob::Pattern>,
    max_file_size: u64,
}

impl FileScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            exclude: vec![],
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Glob patterns matched against the `/`-separated relative path.
    /// Invalid patterns are logged and ignored.
    pub fn with_exclude(mut self, patterns: &[String]) -> Self {
        self.exclude = patterns
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!("Ignoring invalid exclude pattern '{}': {}", p, e);
                    None
                }
            })
            .collect();
        self
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Python source files under the root, sorted by relative path
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        if !self.root.is_dir() {
            return Err(DocError::parse(
                self.root.display().to_string(),
                "project root does not exist or is not a directory",
            ));
        }

        let mut files: Vec<ScannedFile> = self
            .walk()
            .filter(|path| path.extension().is_some_and(|e| e == "py"))
            .filter(|path| !is_skipped_file(path))
            .filter_map(|path| {
                let relative_path = self.relative(&path)?;
                if self.is_excluded(&relative_path) {
                    return None;
                }
                let size = path.metadata().ok()?.len();
                if size > self.max_file_size {
                    tracing::debug!("Skipping {} ({} bytes)", relative_path, size);
                    return None;
                }
                Some(ScannedFile {
                    path,
                    relative_path,
                    size,
                })
            })
            .collect();

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }

    /// File extensions present in the project (lowercase, without the dot)
    pub fn extensions(&self) -> BTreeSet<String> {
        self.walk()
            .filter_map(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_lowercase())
            })
            .collect()
    }

    fn walk(&self) -> impl Iterator<Item = PathBuf> {
        WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .require_git(false)
            .follow_links(false) // Security: prevent symlink traversal attacks
            .filter_entry(|entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir && entry.depth() > 0 && is_skipped_dir(entry.file_name()))
            })
            .build()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(|entry| entry.into_path())
    }

    fn relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        Some(parts.join("/"))
    }

    fn is_excluded(&self, relative_path: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(relative_path))
    }
}

fn is_skipped_dir(name: &std::ffi::OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || SKIP_DIRS.contains(&name.as_ref())
}

fn is_skipped_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| SKIP_FILES.contains(&n))
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// `/`-separated path relative to the scan root
    pub relative_path: String,
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn relative_paths(scanner: &FileScanner) -> Vec<String> {
        scanner
            .scan()
            .unwrap()
            .into_iter()
            .map(|f| f.relative_path)
            .collect()
    }

    #[test]
    fn test_scan_skips_tooling_and_hidden_dirs() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "pkg/__init__.py", "");
        touch(root, "pkg/core.py", "x = 1\n");
        touch(root, "main.py", "");
        touch(root, "setup.py", "");
        touch(root, "tests/test_core.py", "");
        touch(root, "docs/conf.py", "");
        touch(root, ".venv/lib/site.py", "");
        touch(root, "pkg/__pycache__/core.py", "");
        touch(root, "README.md", "");

        assert_eq!(
            relative_paths(&FileScanner::new(root)),
            vec!["main.py", "pkg/__init__.py", "pkg/core.py"]
        );
    }

    #[test]
    fn test_scan_honors_gitignore_without_repo() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, ".gitignore", "generated/\n");
        touch(root, "generated/out.py", "");
        touch(root, "app.py", "");

        assert_eq!(relative_paths(&FileScanner::new(root)), vec!["app.py"]);
    }

    #[test]
    fn test_scan_applies_exclude_and_size_limit() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "keep.py", "a = 1\n");
        touch(root, "migrations/0001.py", "");
        touch(root, "big.py", &"#".repeat(64));

        let scanner = FileScanner::new(root)
            .with_exclude(&["migrations/**".to_string()])
            .with_max_file_size(32);
        assert_eq!(relative_paths(&scanner), vec!["keep.py"]);
    }

    #[test]
    fn test_scan_missing_root_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let result = FileScanner::new(dir.path().join("absent")).scan();
        assert!(matches!(result, Err(DocError::Parse { .. })));
    }

    #[test]
    fn test_extensions_profile() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "app.py", "");
        touch(root, "web/index.JS", "");
        let extensions = FileScanner::new(root).extensions();
        assert!(extensions.contains("py"));
        assert!(extensions.contains("js"));
    }
}
