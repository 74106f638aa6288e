use serde::Serialize;

use crate::token::Token;
use crate::tokenizer::tokenize;

/// Fence languages whose code is run through the tokenizer
pub const HIGHLIGHT_LANGUAGES: &[&str] = &["javascript", "js", "typescript", "ts", "jsx", "tsx"];

/// Inline text runs with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "kebab-case")]
pub enum Span {
    Text(String),
    Bold(String),
    #[serde(rename = "inline-code")]
    Code(String),
}

impl Span {
    pub fn text(&self) -> &str {
        match self {
            Span::Text(text) | Span::Bold(text) | Span::Code(text) => text,
        }
    }
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub ordered: bool,
    pub content: Vec<Span>,
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// Block-level elements parsed from the markdown subset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Block {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        content: Vec<Span>,
    },
    List(List),
    CodeBlock {
        language: Option<String>,
        content: String,
    },
}

impl Block {
    /// Highlight tokens for a code block in a recognized language.
    ///
    /// Returns `None` for other blocks and for code blocks whose language is
    /// missing or not one of [`HIGHLIGHT_LANGUAGES`].
    pub fn code_tokens(&self) -> Option<Vec<Token>> {
        match self {
            Block::CodeBlock {
                language: Some(lang),
                content,
            } if is_highlightable(lang) => Some(tokenize(content)),
            _ => None,
        }
    }
}

pub fn is_highlightable(language: &str) -> bool {
    HIGHLIGHT_LANGUAGES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(language))
}
