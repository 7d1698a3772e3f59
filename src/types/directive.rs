//! Docstring transformation directives

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The requested docstring transformation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Directive {
    /// Remove existing docstrings
    Clear,
    /// Add docstrings to undocumented units
    Fill,
    /// Rewrite existing docstrings (fills when absent)
    Polish,
    /// Translate existing docstrings into `language`
    Translate { language: String },
}

impl Directive {
    /// Build a directive from its name plus the optional target language
    pub fn from_parts(name: &str, language: Option<&str>) -> Result<Self, String> {
        match name.to_lowercase().as_str() {
            "clear" => Ok(Self::Clear),
            "fill" => Ok(Self::Fill),
            "polish" => Ok(Self::Polish),
            "translate" => {
                let language = language
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .ok_or_else(|| "translate requires a target language".to_string())?;
                Ok(Self::Translate {
                    language: language.to_string(),
                })
            }
            _ => Err(format!(
                "Unknown directive '{}'. Valid values: clear, fill, polish, translate",
                name
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Fill => "fill",
            Self::Polish => "polish",
            Self::Translate { .. } => "translate",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translate { language } => write!(f, "translate:{}", language),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Directive {
    type Err = String;

    /// Accepts `clear`, `fill`, `polish` and `translate:<lang>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((name, language)) => Self::from_parts(name, Some(language)),
            None => Self::from_parts(s, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directives() {
        assert_eq!("clear".parse::<Directive>().unwrap(), Directive::Clear);
        assert_eq!("FILL".parse::<Directive>().unwrap(), Directive::Fill);
        assert_eq!(
            "translate:en".parse::<Directive>().unwrap(),
            Directive::Translate {
                language: "en".to_string()
            }
        );
    }

    #[test]
    fn test_translate_requires_language() {
        assert!("translate".parse::<Directive>().is_err());
        assert!(Directive::from_parts("translate", Some("  ")).is_err());
        assert!("rewrite".parse::<Directive>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let directive = Directive::Translate {
            language: "zh".to_string(),
        };
        assert_eq!(directive.to_string(), "translate:zh");
        assert_eq!(directive.to_string().parse::<Directive>().unwrap(), directive);
    }
}
