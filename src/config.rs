use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};
use crate::token::TokenKind;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeConfig,
    pub page: PageConfig,
    pub font: FontConfig,
    pub html: HtmlConfig,
}

/// Colors for highlighted code, one per token kind.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    pub keyword: String,
    pub string: String,
    pub number: String,
    pub comment: String,
    pub function_name: String,
    pub property: String,
    pub operator: String,
    pub punctuation: String,
    pub identifier: String,
    pub constant: String,
    pub whitespace: String,
    pub code_background: String,
    pub italic_comments: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            keyword: "#225edf".to_string(),
            string: "#34d399".to_string(),
            number: "#fbbf24".to_string(),
            comment: "#8b949e".to_string(),
            function_name: "#38bdf8".to_string(),
            property: "#a78bfa".to_string(),
            operator: "#fb7185".to_string(),
            punctuation: "#8b949e".to_string(),
            identifier: "#e6edf3".to_string(),
            constant: "#fb923c".to_string(),
            whitespace: "#e6edf3".to_string(),
            code_background: "#0d1117".to_string(),
            italic_comments: true,
        }
    }
}

impl ThemeConfig {
    /// Get the color for a token kind.
    pub fn color(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Keyword => &self.keyword,
            TokenKind::String => &self.string,
            TokenKind::Number => &self.number,
            TokenKind::Comment => &self.comment,
            TokenKind::FunctionName => &self.function_name,
            TokenKind::Property => &self.property,
            TokenKind::Operator => &self.operator,
            TokenKind::Punctuation => &self.punctuation,
            TokenKind::Identifier => &self.identifier,
            TokenKind::Constant => &self.constant,
            TokenKind::Whitespace => &self.whitespace,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
}

/// Body font for the Typst output. Code runs stay in `raw` fonts either way.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub sans: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HtmlConfig {
    pub class_prefix: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            class_prefix: "tok-".to_string(),
        }
    }
}

impl Config {
    /// The defaults shipped in `default_config.toml`.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if the file is missing.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::compiled_default());
            }
            Err(source) => {
                return Err(Error::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
