mod block;
mod catalog;
mod config;
mod contact;
mod error;
mod html;
mod parser;
mod post;
mod token;
mod tokenizer;
mod typst;

pub use block::{Block, HIGHLIGHT_LANGUAGES, List, ListItem, Span, is_highlightable};
pub use catalog::{ALL_CATEGORIES, Catalog};
pub use config::{Config, HtmlConfig, PageConfig, ThemeConfig};
pub use contact::{ContactEmail, ContactRequest, MailTransport, SubmitOutcome, submit};
pub use error::{Error, Result};
pub use html::tokens_to_html;
pub use parser::parse_inline;
pub use post::{Author, Post, PostMeta};
pub use token::{Token, TokenKind};
pub use tokenizer::tokenize;

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Parse markdown text into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Alias of [`parse`].
pub fn parse_markdown(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert markdown to Typst markup using default config.
pub fn markdown_to_typst(markdown: &str) -> String {
    markdown_to_typst_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to Typst markup with custom config.
pub fn markdown_to_typst_with_config(markdown: &str, config: &Config) -> String {
    let blocks = parse(markdown);
    typst::blocks_to_typst(&blocks, config)
}

/// Convert markdown to an HTML fragment using default config.
pub fn markdown_to_html(markdown: &str) -> String {
    markdown_to_html_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to an HTML fragment with custom config.
pub fn markdown_to_html_with_config(markdown: &str, config: &Config) -> String {
    let blocks = parse(markdown);
    html::blocks_to_html(&blocks, config)
}

/// Render already-parsed blocks to Typst markup.
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    typst::blocks_to_typst(blocks, config)
}

/// Render already-parsed blocks to HTML.
pub fn blocks_to_html(blocks: &[Block], config: &Config) -> String {
    html::blocks_to_html(blocks, config)
}

/// Convert markdown to PDF bytes using default config.
pub fn markdown_to_pdf(markdown: &str) -> Result<Vec<u8>> {
    markdown_to_pdf_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to PDF bytes with custom config.
pub fn markdown_to_pdf_with_config(markdown: &str, config: &Config) -> Result<Vec<u8>> {
    blocks_to_pdf(&parse(markdown), config)
}

/// Compile blocks to PDF bytes through Typst.
pub fn blocks_to_pdf(blocks: &[Block], config: &Config) -> Result<Vec<u8>> {
    use typst_library::layout::PagedDocument;

    let typst_content = typst::blocks_to_typst(blocks, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    tracing::debug!(blocks = blocks.len(), "compiling typst document");
    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Typst(format!("{:?}", e)))?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{:?}", e)))
}
