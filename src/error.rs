use std::path::PathBuf;

use thiserror::Error;

/// Errors from the I/O-facing layers around the parser and tokenizer
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid front matter: {0}")]
    FrontMatter(#[from] toml::de::Error),

    #[error("front matter opened with +++ but never closed")]
    UnclosedFrontMatter,

    #[error("invalid post {}: {source}", path.display())]
    Post {
        path: PathBuf,
        source: Box<Error>,
    },

    #[error("Typst compilation failed: {0}")]
    Typst(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("mail transport failed: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
