use crate::block::{Block, List, Span};
use crate::config::Config;
use crate::token::{Token, TokenKind};

/// Convert blocks to an HTML fragment.
///
/// Highlighted tokens become `<span class="{prefix}{kind}">`, with the prefix
/// taken from `[html] class_prefix`; whitespace is written bare.
pub fn blocks_to_html(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();
    for block in blocks {
        emit_block(block, config, &mut out);
    }
    out
}

/// Render tokens as a highlighted `<pre><code>` element.
pub fn tokens_to_html(tokens: &[Token], language: Option<&str>, config: &Config) -> String {
    let mut out = String::new();
    highlighted_code(tokens, language, &config.html.class_prefix, &mut out);
    out
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { level, text } => {
            out.push_str(&format!("<h{level}>"));
            escape(text, out);
            out.push_str(&format!("</h{level}>\n"));
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, out);
            out.push_str("</p>\n");
        }
        Block::List(list) => list_to_html(list, out),
        Block::CodeBlock { language, content } => match block.code_tokens() {
            Some(tokens) => {
                highlighted_code(&tokens, language.as_deref(), &config.html.class_prefix, out)
            }
            None => {
                open_pre(language.as_deref(), out);
                escape(content, out);
                out.push_str("</code></pre>\n");
            }
        },
    }
}

fn open_pre(language: Option<&str>, out: &mut String) {
    match language {
        Some(lang) => {
            out.push_str("<pre data-language=\"");
            escape(lang, out);
            out.push_str("\"><code>");
        }
        None => out.push_str("<pre><code>"),
    }
}

fn highlighted_code(tokens: &[Token], language: Option<&str>, prefix: &str, out: &mut String) {
    open_pre(language, out);
    for token in tokens {
        if token.kind == TokenKind::Whitespace {
            escape(&token.text, out);
            continue;
        }
        out.push_str("<span class=\"");
        escape(prefix, out);
        out.push_str(token.kind.name());
        out.push_str("\">");
        escape(&token.text, out);
        out.push_str("</span>");
    }
    out.push_str("</code></pre>\n");
}

fn spans_to_html(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Text(text) => escape(text, out),
            Span::Bold(text) => {
                out.push_str("<strong>");
                escape(text, out);
                out.push_str("</strong>");
            }
            Span::Code(text) => {
                out.push_str("<code>");
                escape(text, out);
                out.push_str("</code>");
            }
        }
    }
}

fn list_to_html(list: &List, out: &mut String) {
    let tag = if list.ordered { "ol" } else { "ul" };
    out.push_str(&format!("<{tag}>\n"));
    for item in &list.items {
        out.push_str("<li>");
        spans_to_html(&item.content, out);
        out.push_str("</li>\n");
    }
    out.push_str(&format!("</{tag}>\n"));
}

pub(crate) fn escape(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
