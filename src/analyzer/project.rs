//! Project Structure Analysis
//!
//! Derives project-level views from parser output: the dotted module tree,
//! per-module documentation digests, third-party requirements and a coarse
//! project profile used to pick `.gitignore` sections.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Serialize;

use super::scanner::FileScanner;
use crate::constants::python::{distribution_name, is_stdlib};
use crate::types::ModuleDescriptor;

/// Documentation digest of one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDigest {
    pub name: String,
    pub relative_path: String,
    pub summary: Option<String>,
    pub classes: Vec<MemberDigest>,
    pub functions: Vec<MemberDigest>,
}

/// A class or function entry in a digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberDigest {
    pub name: String,
    pub signature: String,
    pub summary: Option<String>,
    /// Method signatures (classes only)
    pub methods: Vec<String>,
}

impl ModuleDigest {
    pub fn from_module(module: &ModuleDescriptor) -> Self {
        Self {
            name: module.module_name.clone(),
            relative_path: module.relative_path.clone(),
            summary: module.summary().map(str::to_string),
            classes: module
                .classes
                .iter()
                .map(|c| MemberDigest {
                    name: c.name.clone(),
                    signature: c.signature.clone(),
                    summary: c.summary().map(str::to_string),
                    methods: c
                        .methods
                        .iter()
                        .filter(|m| !m.name.starts_with('_') || m.name == "__init__")
                        .map(|m| m.signature.clone())
                        .collect(),
                })
                .collect(),
            functions: module
                .functions
                .iter()
                .filter(|f| !f.name.starts_with('_'))
                .map(|f| MemberDigest {
                    name: f.name.clone(),
                    signature: f.signature.clone(),
                    summary: f.summary().map(str::to_string),
                    methods: Vec::new(),
                })
                .collect(),
        }
    }

    /// True when the module exposes nothing worth an API entry
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty()
    }
}

/// Digests for every module, in parse order
pub fn digests(modules: &[ModuleDescriptor]) -> Vec<ModuleDigest> {
    modules.iter().map(ModuleDigest::from_module).collect()
}

#[derive(Debug, Default)]
struct TreeNode {
    children: BTreeMap<String, TreeNode>,
}

/// Render the dotted module names as an indented tree.
///
/// Packages end with `/`:
///
/// ```text
/// - app
/// - pkg/
///   - util
/// ```
pub fn module_tree(modules: &[ModuleDescriptor]) -> String {
    let mut root = TreeNode::default();
    for module in modules {
        let mut node = &mut root;
        for part in module.module_name.split('.') {
            node = node.children.entry(part.to_string()).or_default();
        }
    }

    let mut out = String::new();
    render_tree(&root, 0, &mut out);
    out
}

fn render_tree(node: &TreeNode, depth: usize, out: &mut String) {
    for (name, child) in &node.children {
        let suffix = if child.children.is_empty() { "" } else { "/" };
        out.push_str(&format!("{}- {}{}\n", "  ".repeat(depth), name, suffix));
        render_tree(child, depth + 1, out);
    }
}

/// Third-party distributions imported by the project.
///
/// Standard library modules, relative imports and the project's own
/// top-level modules are excluded. The result is sorted and deduplicated.
pub fn requirements(modules: &[ModuleDescriptor]) -> Vec<String> {
    let local: BTreeSet<&str> = modules
        .iter()
        .filter_map(|m| m.module_name.split('.').next())
        .collect();

    let mut seen = BTreeSet::new();
    let mut out: Vec<String> = modules
        .iter()
        .flat_map(|m| m.imports.iter())
        .filter(|import| !import.relative && !import.module.is_empty())
        .filter(|import| {
            let top = import.top_level();
            !is_stdlib(top) && !local.contains(top)
        })
        .map(|import| distribution_name(&import.module))
        .filter(|name| seen.insert(name.to_lowercase()))
        .collect();

    out.sort_by_key(|name| name.to_lowercase());
    out
}

/// What kinds of files a project contains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectProfile {
    /// File extensions present (lowercase, without the dot)
    pub extensions: BTreeSet<String>,
    pub has_setup_py: bool,
    pub has_requirements: bool,
    pub has_tests: bool,
}

impl ProjectProfile {
    pub fn detect(root: &Path) -> Self {
        Self {
            extensions: FileScanner::new(root).extensions(),
            has_setup_py: root.join("setup.py").is_file(),
            has_requirements: root.join("requirements.txt").is_file(),
            has_tests: root.join("tests").is_dir() || root.join("test").is_dir(),
        }
    }

    pub fn has_any(&self, extensions: &[&str]) -> bool {
        extensions.iter().any(|e| self.extensions.contains(*e))
    }

    pub fn has_node(&self) -> bool {
        self.has_any(&["js", "jsx", "ts", "tsx", "mjs", "cjs"])
    }

    pub fn has_rust(&self) -> bool {
        self.has_any(&["rs"])
    }

    pub fn has_java(&self) -> bool {
        self.has_any(&["java", "kt", "gradle"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parser::{Parser, PythonParser, SourceFile};
    use std::fs;
    use tempfile::TempDir;

    fn module(name: &str, content: &str) -> ModuleDescriptor {
        PythonParser::new()
            .unwrap()
            .parse(&SourceFile::in_memory(name, content))
            .unwrap()
    }

    #[test]
    fn test_module_tree_rendering() {
        let modules = vec![
            module("app", ""),
            module("pkg", ""),
            module("pkg.util", ""),
            module("pkg.io.reader", ""),
        ];
        assert_eq!(
            module_tree(&modules),
            "- app\n- pkg/\n  - io/\n    - reader\n  - util\n"
        );
    }

    #[test]
    fn test_requirements_filters_stdlib_local_and_relative() {
        let modules = vec![
            module(
                "app",
                "import os\nimport yaml\nimport requests.adapters\nfrom pkg import util\nfrom . import sibling\nfrom PIL import Image\nimport requests\n",
            ),
            module("pkg.util", "import numpy as np\nfrom .base import Base\n"),
        ];
        assert_eq!(
            requirements(&modules),
            vec!["numpy", "Pillow", "PyYAML", "requests"]
        );
    }

    #[test]
    fn test_digest_uses_first_docstring_lines() {
        let m = module(
            "shapes",
            "\"\"\"Geometry helpers.\n\nMore text.\n\"\"\"\n\n\nclass Circle:\n    \"\"\"A circle.\"\"\"\n\n    def __init__(self, r):\n        self.r = r\n\n    def _secret(self):\n        pass\n\n    def area(self):\n        return 3.14 * self.r ** 2\n\n\ndef unit():\n    return Circle(1)\n\n\ndef _private():\n    pass\n",
        );
        let digest = ModuleDigest::from_module(&m);
        assert_eq!(digest.summary.as_deref(), Some("Geometry helpers."));
        assert_eq!(digest.classes.len(), 1);
        assert_eq!(digest.classes[0].summary.as_deref(), Some("A circle."));
        assert_eq!(
            digest.classes[0].methods,
            vec!["def __init__(self, r)", "def area(self)"]
        );
        assert_eq!(digest.functions.len(), 1);
        assert_eq!(digest.functions[0].signature, "def unit()");
    }

    #[test]
    fn test_profile_detection() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("setup.py"), "").unwrap();
        fs::write(dir.path().join("app.py"), "").unwrap();
        fs::create_dir_all(dir.path().join("web")).unwrap();
        fs::write(dir.path().join("web/index.ts"), "").unwrap();
        fs::create_dir_all(dir.path().join("tests")).unwrap();

        let profile = ProjectProfile::detect(dir.path());
        assert!(profile.has_setup_py);
        assert!(!profile.has_requirements);
        assert!(profile.has_tests);
        assert!(profile.has_node());
        assert!(!profile.has_rust());
        assert!(profile.extensions.contains("py"));
    }
}
