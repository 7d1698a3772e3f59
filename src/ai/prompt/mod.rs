//! Prompt Builder System
//!
//! Standardized prompt construction for provider calls.
//! Sections render in insertion order so identical inputs give identical prompts.

use std::fmt::Write;

use crate::types::{Directive, UnitKind};

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Role definition with expertise area
    Role { expertise: String, task: String },
    /// Numbered objectives
    Objectives(Vec<String>),
    /// Ordered key-value pairs
    Context(Vec<(String, String)>),
    /// Raw text section with optional header
    Text {
        header: Option<String>,
        content: String,
    },
    /// Code block with language
    Code { language: String, content: String },
    /// Focus enforcement with restrictions
    Focus {
        target: String,
        restrictions: Vec<String>,
    },
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role definition section
    pub fn role(mut self, expertise: &str, task: &str) -> Self {
        self.sections.push(PromptSection::Role {
            expertise: expertise.to_string(),
            task: task.to_string(),
        });
        self
    }

    pub fn objectives(mut self, objectives: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Objectives(
            objectives.into_iter().map(String::from).collect(),
        ));
        self
    }

    /// Add a context item, appending to the existing context section
    pub fn context_item(mut self, key: &str, value: &str) -> Self {
        let entry = (key.to_string(), value.to_string());
        match self.sections.iter_mut().find_map(|s| match s {
            PromptSection::Context(items) => Some(items),
            _ => None,
        }) {
            Some(items) => items.push(entry),
            None => self.sections.push(PromptSection::Context(vec![entry])),
        }
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.to_string(),
        });
        self
    }

    pub fn text(mut self, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: None,
            content: content.to_string(),
        });
        self
    }

    pub fn code(mut self, language: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Code {
            language: language.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Add focus enforcement section
    pub fn focus(mut self, target: &str, restrictions: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Focus {
            target: target.to_string(),
            restrictions: restrictions.into_iter().map(String::from).collect(),
        });
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            // Writing into a String cannot fail.
            let _ = section.render(&mut out);
        }
        out.trim_end().to_string()
    }
}

impl PromptSection {
    fn render(&self, out: &mut String) -> std::fmt::Result {
        match self {
            Self::Role { expertise, task } => writeln!(
                out,
                "<ROLE>\nYou are an expert {expertise} specializing in {task}.\n</ROLE>\n"
            ),
            Self::Objectives(objectives) => {
                writeln!(out, "<OBJECTIVES>")?;
                for (n, objective) in objectives.iter().enumerate() {
                    writeln!(out, "{}. {objective}", n + 1)?;
                }
                writeln!(out, "</OBJECTIVES>\n")
            }
            Self::Context(items) => {
                writeln!(out, "# Context\n")?;
                for (key, value) in items {
                    writeln!(out, "**{key}**: {value}")?;
                }
                writeln!(out)
            }
            Self::Text { header, content } => {
                if let Some(header) = header {
                    writeln!(out, "# {header}\n")?;
                }
                writeln!(out, "{content}\n")
            }
            Self::Code { language, content } => {
                writeln!(out, "```{language}\n{content}\n```\n")
            }
            Self::Focus {
                target,
                restrictions,
            } => {
                writeln!(out, "<FOCUS>\nIMPORTANT: Focus EXCLUSIVELY on: {target}")?;
                for restriction in restrictions {
                    writeln!(out, "- {restriction}")?;
                }
                writeln!(out, "</FOCUS>\n")
            }
        }
    }
}

/// Human-readable language name for prompts
pub fn language_name(tag: &str) -> &str {
    match tag.to_lowercase().as_str() {
        "en" | "english" => "English",
        "zh" | "zh-cn" | "chinese" => "Simplified Chinese",
        "ja" => "Japanese",
        "ko" => "Korean",
        "de" => "German",
        "fr" => "French",
        "es" => "Spanish",
        _ => tag,
    }
}

/// Preset prompt templates
pub struct PromptTemplates;

impl PromptTemplates {
    /// Prompt for writing, polishing or translating one docstring
    pub fn docstring(
        kind: UnitKind,
        signature: &str,
        directive: &Directive,
        language: &str,
    ) -> PromptBuilder {
        let (task, objectives): (&str, Vec<&str>) = match directive {
            Directive::Translate { .. } => (
                "translating Python docstrings",
                vec![
                    "Translate the existing docstring faithfully",
                    "Keep section headers (Args, Returns, Raises) and parameter names unchanged",
                    "Preserve the line structure of the original",
                ],
            ),
            Directive::Polish => (
                "editing Python docstrings",
                vec![
                    "Rewrite the docstring so it is accurate for the code shown",
                    "Start with a one-line summary ending in a period",
                    "Document parameters, return value and raised exceptions when present",
                ],
            ),
            _ => (
                "writing Python docstrings",
                vec![
                    "Write a Google-style docstring for the code shown",
                    "Start with a one-line summary ending in a period",
                    "Document parameters, return value and raised exceptions when present",
                ],
            ),
        };

        let target_language = match directive {
            Directive::Translate { language } => language.as_str(),
            _ => language,
        };

        PromptBuilder::new()
            .role("Python developer", task)
            .objectives(objectives)
            .context_item("Unit", &format!("{} `{}`", kind.label(), signature))
            .context_item("Language", language_name(target_language))
            .focus(
                signature,
                vec![
                    "Answer with the docstring text ONLY",
                    "Do NOT include triple quotes, code fences or the signature",
                    "Do NOT describe code you cannot see",
                ],
            )
    }

    /// Prompt for translating a markdown page
    pub fn translate_markdown(target_language: &str) -> PromptBuilder {
        PromptBuilder::new()
            .role("technical translator", "software documentation")
            .objectives(vec![
                &format!(
                    "Translate the markdown document into {}",
                    language_name(target_language)
                ),
                "Keep markdown structure, links and code blocks unchanged",
                "Do not translate identifiers, module paths or code",
            ])
            .focus(
                "the document below",
                vec!["Answer with the translated markdown ONLY"],
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_prompt() {
        let prompt = PromptBuilder::new()
            .role("code analyst", "Python documentation")
            .objectives(vec!["Analyze code", "Generate docs"])
            .build();

        assert!(prompt.contains("<ROLE>"));
        assert!(prompt.contains("1. Analyze code"));
        assert!(prompt.contains("2. Generate docs"));
    }

    #[test]
    fn test_context_items_keep_order() {
        let prompt = PromptBuilder::new()
            .context_item("Project", "docweave")
            .context_item("Language", "Python")
            .build();

        let project = prompt.find("**Project**: docweave").unwrap();
        let language = prompt.find("**Language**: Python").unwrap();
        assert!(project < language);
        assert_eq!(prompt.matches("# Context").count(), 1);
    }

    #[test]
    fn test_docstring_template() {
        let prompt = PromptTemplates::docstring(
            UnitKind::Function,
            "def foo(x)",
            &Directive::Fill,
            "zh",
        )
        .code("python", "def foo(x):\n    return x")
        .build();

        assert!(prompt.contains("Function `def foo(x)`"));
        assert!(prompt.contains("Simplified Chinese"));
        assert!(prompt.contains("```python"));
    }

    #[test]
    fn test_translate_directive_overrides_language() {
        let prompt = PromptTemplates::docstring(
            UnitKind::Method,
            "def run(self)",
            &Directive::Translate {
                language: "en".to_string(),
            },
            "zh",
        )
        .build();
        assert!(prompt.contains("translating Python docstrings"));
        assert!(prompt.contains("**Language**: English"));
    }
}
