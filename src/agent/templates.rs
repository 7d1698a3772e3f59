//! Static templates for README, requirements and `.gitignore`
//!
//! Everything here is a pure function of parser output, so rendering the same
//! project twice yields identical text.

use crate::analyzer::project::{MemberDigest, ModuleDigest, ProjectProfile};

/// Headings and fixed phrases in one documentation language
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub structure: &'static str,
    pub modules: &'static str,
    pub module: &'static str,
    pub summary: &'static str,
    pub api: &'static str,
    pub classes: &'static str,
    pub functions: &'static str,
    pub installation: &'static str,
    pub usage: &'static str,
    pub home: &'static str,
    pub api_reference: &'static str,
    pub no_summary: &'static str,
    pub no_api: &'static str,
}

const EN: Labels = Labels {
    structure: "Project Structure",
    modules: "Modules",
    module: "Module",
    summary: "Summary",
    api: "API Overview",
    classes: "Classes",
    functions: "Functions",
    installation: "Installation",
    usage: "Usage",
    home: "Home",
    api_reference: "API Reference",
    no_summary: "No description yet.",
    no_api: "This module has no public classes or functions.",
};

const ZH: Labels = Labels {
    structure: "项目结构",
    modules: "模块",
    module: "模块",
    summary: "简介",
    api: "API 概览",
    classes: "类",
    functions: "函数",
    installation: "安装",
    usage: "使用方法",
    home: "首页",
    api_reference: "API 参考",
    no_summary: "暂无描述。",
    no_api: "该模块没有公开的类或函数。",
};

impl Labels {
    /// Labels for a language tag; anything but Chinese falls back to English
    pub fn for_language(tag: &str) -> Self {
        if tag.to_lowercase().starts_with("zh") {
            ZH
        } else {
            EN
        }
    }
}

/// Inputs for the README
pub struct ReadmeContext<'a> {
    pub project_name: &'a str,
    pub module_tree: &'a str,
    pub digests: &'a [ModuleDigest],
    pub profile: &'a ProjectProfile,
    pub labels: Labels,
}

/// One-paragraph description of the project.
///
/// Taken from the module named after the project, else the first top-level
/// module with a docstring.
pub fn project_summary<'a>(project_name: &str, digests: &'a [ModuleDigest]) -> Option<&'a str> {
    digests
        .iter()
        .find(|d| d.name == project_name && d.summary.is_some())
        .or_else(|| {
            digests
                .iter()
                .find(|d| !d.name.contains('.') && d.summary.is_some())
        })
        .and_then(|d| d.summary.as_deref())
}

pub fn readme(ctx: &ReadmeContext<'_>) -> String {
    let labels = ctx.labels;
    let mut out = format!("# {}\n\n", ctx.project_name);

    match project_summary(ctx.project_name, ctx.digests) {
        Some(summary) => out.push_str(&format!("{}\n\n", summary)),
        None => out.push_str(&format!("{}\n\n", labels.no_summary)),
    }

    out.push_str(&format!(
        "## {}\n\n```text\n{}```\n\n",
        labels.structure, ctx.module_tree
    ));

    out.push_str(&format!(
        "## {}\n\n| {} | {} |\n| --- | --- |\n",
        labels.modules, labels.module, labels.summary
    ));
    for digest in ctx.digests {
        out.push_str(&format!(
            "| `{}` | {} |\n",
            digest.name,
            digest.summary.as_deref().unwrap_or("").replace('|', "\\|")
        ));
    }
    out.push('\n');

    let documented: Vec<&ModuleDigest> = ctx.digests.iter().filter(|d| !d.is_empty()).collect();
    if !documented.is_empty() {
        out.push_str(&format!("## {}\n\n", labels.api));
        for digest in documented {
            out.push_str(&format!("### `{}`\n\n", digest.name));
            for class in &digest.classes {
                out.push_str(&member_line(class));
                for method in &class.methods {
                    out.push_str(&format!("  - `{}`\n", method));
                }
            }
            for function in &digest.functions {
                out.push_str(&member_line(function));
            }
            out.push('\n');
        }
    }

    out.push_str(&format!("## {}\n\n```bash\n", labels.installation));
    if ctx.profile.has_setup_py {
        out.push_str("pip install .\n");
    }
    out.push_str("pip install -r requirements.txt\n```\n\n");

    out.push_str(&format!("## {}\n\n{}", labels.usage, usage(ctx.digests)));
    out
}

fn member_line(member: &MemberDigest) -> String {
    match &member.summary {
        Some(summary) => format!("- `{}`: {}\n", member.signature, summary),
        None => format!("- `{}`\n", member.signature),
    }
}

fn usage(digests: &[ModuleDigest]) -> String {
    const ENTRY_POINTS: &[&str] = &["__main__", "main", "app", "cli", "run"];

    let entry = ENTRY_POINTS.iter().find_map(|name| {
        digests
            .iter()
            .find(|d| d.name == *name || d.name.ends_with(&format!(".{}", name)))
    });
    if let Some(entry) = entry {
        let command = if entry.name.ends_with("__main__") {
            let package = entry.name.trim_end_matches(".__main__");
            format!("python -m {}", package)
        } else {
            format!("python {}", entry.relative_path)
        };
        return format!("```bash\n{}\n```\n", command);
    }

    match digests.iter().find(|d| !d.is_empty()) {
        Some(digest) => {
            let names: Vec<&str> = digest
                .classes
                .iter()
                .chain(digest.functions.iter())
                .map(|m| m.name.as_str())
                .take(3)
                .collect();
            format!(
                "```python\nfrom {} import {}\n```\n",
                digest.name,
                names.join(", ")
            )
        }
        None => String::new(),
    }
}

/// `requirements.txt` body, one distribution per line
pub fn requirements(distributions: &[String]) -> String {
    distributions
        .iter()
        .map(|d| format!("{}\n", d))
        .collect()
}

const PYTHON_IGNORE: &str = "__pycache__/
*.py[cod]
*$py.class
*.so
.Python
*.egg-info/
.eggs/
.pytest_cache/
.mypy_cache/
.ruff_cache/
.tox/
.coverage
htmlcov/
site/
";

const NODE_IGNORE: &str = "node_modules/
npm-debug.log*
yarn-error.log*
.npm/
";

const RUST_IGNORE: &str = "target/
**/*.rs.bk
";

const JAVA_IGNORE: &str = "*.class
*.jar
.gradle/
out/
";

const IDE_IGNORE: &str = ".idea/
.vscode/
*.swp
*.swo
";

const OS_IGNORE: &str = ".DS_Store
Thumbs.db
desktop.ini
";

const BUILD_IGNORE: &str = "build/
dist/
*.log
.cache/
";

const ENV_IGNORE: &str = ".env
.env.*
.venv/
venv/
env/
";

/// `.gitignore` sections chosen by the project profile
pub fn gitignore(profile: &ProjectProfile) -> String {
    let mut sections = vec![("Python", PYTHON_IGNORE)];
    if profile.has_node() {
        sections.push(("Node", NODE_IGNORE));
    }
    if profile.has_rust() {
        sections.push(("Rust", RUST_IGNORE));
    }
    if profile.has_java() {
        sections.push(("Java", JAVA_IGNORE));
    }
    sections.extend([
        ("IDE", IDE_IGNORE),
        ("OS", OS_IGNORE),
        ("Build and cache", BUILD_IGNORE),
        ("Environment", ENV_IGNORE),
    ]);

    sections
        .iter()
        .map(|(title, body)| format!("# {}\n{}", title, body))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(name: &str, summary: Option<&str>, functions: &[&str]) -> ModuleDigest {
        ModuleDigest {
            name: name.to_string(),
            relative_path: format!("{}.py", name.replace('.', "/")),
            summary: summary.map(str::to_string),
            classes: Vec::new(),
            functions: functions
                .iter()
                .map(|f| MemberDigest {
                    name: f.to_string(),
                    signature: format!("def {}()", f),
                    summary: None,
                    methods: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_readme_sections() {
        let digests = vec![
            digest("tool", Some("Command line tool."), &[]),
            digest("tool.core", None, &["run"]),
        ];
        let profile = ProjectProfile::default();
        let text = readme(&ReadmeContext {
            project_name: "tool",
            module_tree: "- tool/\n  - core\n",
            digests: &digests,
            profile: &profile,
            labels: Labels::for_language("en"),
        });

        assert!(text.starts_with("# tool\n\nCommand line tool.\n\n"));
        assert!(text.contains("```text\n- tool/\n  - core\n```"));
        assert!(text.contains("| `tool.core` |  |\n"));
        assert!(text.contains("### `tool.core`\n\n- `def run()`\n"));
        assert!(text.contains("from tool.core import run"));
        assert!(!text.contains("pip install .\n"));
    }

    #[test]
    fn test_readme_chinese_labels_and_entry_point() {
        let digests = vec![digest("main", None, &[])];
        let profile = ProjectProfile {
            has_setup_py: true,
            ..Default::default()
        };
        let text = readme(&ReadmeContext {
            project_name: "demo",
            module_tree: "- main\n",
            digests: &digests,
            profile: &profile,
            labels: Labels::for_language("zh"),
        });
        assert!(text.contains("## 项目结构"));
        assert!(text.contains("暂无描述。"));
        assert!(text.contains("python main.py"));
        assert!(text.contains("pip install .\n"));
    }

    #[test]
    fn test_gitignore_sections_follow_profile() {
        let plain = gitignore(&ProjectProfile::default());
        assert!(plain.starts_with("# Python\n__pycache__/"));
        assert!(!plain.contains("node_modules/"));
        assert!(plain.contains("# Environment\n.env\n"));

        let mut profile = ProjectProfile::default();
        profile.extensions.insert("ts".to_string());
        profile.extensions.insert("rs".to_string());
        let mixed = gitignore(&profile);
        assert!(mixed.contains("# Node\nnode_modules/"));
        assert!(mixed.contains("# Rust\ntarget/"));
        assert!(!mixed.contains("# Java"));
    }

    #[test]
    fn test_requirements_lines() {
        assert_eq!(
            requirements(&["PyYAML".to_string(), "requests".to_string()]),
            "PyYAML\nrequests\n"
        );
        assert_eq!(requirements(&[]), "");
    }
}
