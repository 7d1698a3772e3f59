//! MkDocs site generation
//!
//! `mkdocs.yml` is modelled with serde types and written through serde_yaml.
//! Pages are rendered from module descriptors: one home page plus one API
//! page per module.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::templates::Labels;
use crate::analyzer::project::ModuleDigest;
use crate::types::{ModuleDescriptor, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MkDocsConfig {
    pub site_name: String,
    pub site_description: String,
    pub docs_dir: String,
    pub theme: Theme,
    pub nav: Vec<BTreeMap<String, NavItem>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Plugin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub palette: Palette,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub text: String,
    pub code: String,
}

/// A nav entry: a page path or a titled section of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavItem {
    Page(String),
    Section(Vec<BTreeMap<String, NavItem>>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Plugin {
    Named(String),
    I18n { i18n: I18nPlugin },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct I18nPlugin {
    pub docs_structure: String,
    pub languages: Vec<I18nLanguage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct I18nLanguage {
    pub locale: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub default: bool,
    pub name: String,
    pub build: bool,
}

impl MkDocsConfig {
    /// Single-language site rooted at `docs_dir`
    pub fn new(
        site_name: &str,
        docs_dir: &str,
        theme: &str,
        labels: Labels,
        modules: &[String],
    ) -> Self {
        let api: Vec<BTreeMap<String, NavItem>> = modules
            .iter()
            .map(|m| single(m, NavItem::Page(api_page_path(m))))
            .collect();

        Self {
            site_name: site_name.to_string(),
            site_description: format!("API documentation for {}", site_name),
            docs_dir: docs_dir.to_string(),
            theme: Theme {
                name: theme.to_string(),
                palette: Palette {
                    primary: "indigo".to_string(),
                    accent: "pink".to_string(),
                },
                font: Font {
                    text: "Roboto".to_string(),
                    code: "Roboto Mono".to_string(),
                },
            },
            nav: vec![
                single(labels.home, NavItem::Page("index.md".to_string())),
                single(labels.api_reference, NavItem::Section(api)),
            ],
            plugins: Vec::new(),
        }
    }

    /// Switch to a bilingual layout: `docs/en` (default) and `docs/zh`
    pub fn bilingual(mut self) -> Self {
        self.docs_dir = "docs".to_string();
        self.plugins = vec![
            Plugin::Named("search".to_string()),
            Plugin::I18n {
                i18n: I18nPlugin {
                    docs_structure: "folder".to_string(),
                    languages: vec![
                        I18nLanguage {
                            locale: "en".to_string(),
                            default: true,
                            name: "English".to_string(),
                            build: true,
                        },
                        I18nLanguage {
                            locale: "zh".to_string(),
                            default: false,
                            name: "简体中文".to_string(),
                            build: true,
                        },
                    ],
                },
            },
        ];
        self
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn single(key: &str, item: NavItem) -> BTreeMap<String, NavItem> {
    BTreeMap::from([(key.to_string(), item)])
}

/// Page path of a module, relative to the language folder
pub fn api_page_path(module_name: &str) -> String {
    format!("api/{}.md", module_name)
}

/// Home page: project summary, structure and links to every API page
pub fn index_page(
    project_name: &str,
    summary: Option<&str>,
    module_tree: &str,
    digests: &[ModuleDigest],
    labels: Labels,
) -> String {
    let mut out = format!(
        "# {}\n\n{}\n\n## {}\n\n```text\n{}```\n\n## {}\n\n",
        project_name,
        summary.unwrap_or(labels.no_summary),
        labels.structure,
        module_tree,
        labels.api_reference
    );
    for digest in digests {
        match &digest.summary {
            Some(s) => out.push_str(&format!(
                "- [`{}`]({}): {}\n",
                digest.name,
                api_page_path(&digest.name),
                s
            )),
            None => out.push_str(&format!(
                "- [`{}`]({})\n",
                digest.name,
                api_page_path(&digest.name)
            )),
        }
    }
    out
}

/// API page for one module, with full docstrings
pub fn module_page(module: &ModuleDescriptor, labels: Labels) -> String {
    let mut out = format!("# `{}`\n\n", module.module_name);
    out.push_str(&format!(
        "{}\n\n",
        module.docstring.as_deref().unwrap_or(labels.no_summary).trim()
    ));

    let classes: Vec<_> = module
        .classes
        .iter()
        .filter(|c| !c.name.starts_with('_'))
        .collect();
    let functions: Vec<_> = module
        .functions
        .iter()
        .filter(|f| !f.name.starts_with('_'))
        .collect();

    if classes.is_empty() && functions.is_empty() {
        out.push_str(&format!("{}\n", labels.no_api));
        return out;
    }

    if !classes.is_empty() {
        out.push_str(&format!("## {}\n\n", labels.classes));
        for class in classes {
            out.push_str(&format!("### `{}`\n\n", class.name));
            push_signature(&mut out, &class.signature);
            push_doc(&mut out, class.docstring.as_deref());
            for method in class
                .methods
                .iter()
                .filter(|m| !m.name.starts_with('_') || m.name == "__init__")
            {
                out.push_str(&format!("#### `{}.{}`\n\n", class.name, method.name));
                push_signature(&mut out, &method.signature);
                push_doc(&mut out, method.docstring.as_deref());
            }
        }
    }

    if !functions.is_empty() {
        out.push_str(&format!("## {}\n\n", labels.functions));
        for function in functions {
            out.push_str(&format!("### `{}`\n\n", function.name));
            push_signature(&mut out, &function.signature);
            push_doc(&mut out, function.docstring.as_deref());
        }
    }

    out
}

fn push_signature(out: &mut String, signature: &str) {
    out.push_str(&format!("```python\n{}\n```\n\n", signature));
}

fn push_doc(out: &mut String, doc: Option<&str>) {
    if let Some(doc) = doc.map(str::trim).filter(|d| !d.is_empty()) {
        out.push_str(&format!("{}\n\n", doc));
    }
}
