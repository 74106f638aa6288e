use std::fmt;

use serde::Serialize;

/// Lexical class of a highlighted token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Keyword,
    String,
    Number,
    Comment,
    FunctionName,
    /// Part of the color table; the tokenizer does not resolve properties
    Property,
    Operator,
    Punctuation,
    Identifier,
    Constant,
    /// Whitespace runs and any character no other rule claims
    Whitespace,
}

impl TokenKind {
    pub const ALL: [TokenKind; 11] = [
        TokenKind::Keyword,
        TokenKind::String,
        TokenKind::Number,
        TokenKind::Comment,
        TokenKind::FunctionName,
        TokenKind::Property,
        TokenKind::Operator,
        TokenKind::Punctuation,
        TokenKind::Identifier,
        TokenKind::Constant,
        TokenKind::Whitespace,
    ];

    /// Stable name used for CSS classes, JSON output and config keys.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Comment => "comment",
            TokenKind::FunctionName => "function-name",
            TokenKind::Property => "property",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Identifier => "identifier",
            TokenKind::Constant => "constant",
            TokenKind::Whitespace => "whitespace",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified slice of source text. `text` is exactly what was consumed,
/// delimiters included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}
