use crate::block::{Block, List, Span};
use crate::config::{Config, ThemeConfig};
use crate::token::{Token, TokenKind};

// The only sans-serif family among the embedded fonts
const SANS_FONT: &str = "DejaVu Sans Mono";

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }
    if config.font.sans {
        out.push_str("#set text(font: \"");
        out.push_str(SANS_FONT);
        out.push_str("\")\n");
    }
    out.push('\n');

    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];

        match block {
            Block::Heading { .. } => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                emit_block(block, config, &mut out);

                if i + 1 < blocks.len() {
                    i += 1;
                    emit_block(&blocks[i], config, &mut out);
                }
                out.push_str("]\n\n");
            }
            _ => {
                emit_block(block, config, &mut out);
            }
        }

        i += 1;
    }

    out
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { level, text } => {
            for _ in 0..*level {
                out.push('=');
            }
            out.push(' ');
            escape_markup(text, out);
            out.push_str("\n\n");
        }
        Block::Paragraph { content } => {
            spans_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::CodeBlock { language, content } => match block.code_tokens() {
            Some(tokens) => highlighted_code(&tokens, &config.theme, out),
            None => plain_code(language.as_deref(), content, out),
        },
        Block::List(list) => {
            // Keep small lists together, let large ones break
            if list.items.len() <= 5 {
                out.push_str("#block(breakable: false)[\n");
                list_to_typst(list, out);
                out.push_str("]\n\n");
            } else {
                list_to_typst(list, out);
                out.push('\n');
            }
        }
    }
}

fn plain_code(language: Option<&str>, content: &str, out: &mut String) {
    // Fence must be longer than any backtick run inside the code
    let longest_run = content
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run.max(2) + 1);

    out.push_str("#block(breakable: false)[\n");
    out.push_str(&fence);
    if let Some(lang) = language {
        out.push_str(lang);
    }
    out.push('\n');
    out.push_str(content);
    if !content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&fence);
    out.push_str("\n]\n\n");
}

fn highlighted_code(tokens: &[Token], theme: &ThemeConfig, out: &mut String) {
    out.push_str("#block(fill: rgb(\"");
    out.push_str(&theme.code_background);
    out.push_str("\"), inset: 8pt, radius: 4pt, width: 100%, breakable: false)[\n");

    for token in tokens {
        for (n, segment) in token.text.split('\n').enumerate() {
            if n > 0 {
                out.push_str("#linebreak()");
            }
            if segment.is_empty() {
                continue;
            }
            out.push_str("#text(fill: rgb(\"");
            out.push_str(theme.color(token.kind));
            out.push_str("\"), ");
            if token.kind == TokenKind::Comment && theme.italic_comments {
                out.push_str("style: \"italic\", ");
            }
            out.push_str("raw(\"");
            escape_string(segment, out);
            out.push_str("\"))");
        }
    }

    out.push_str("\n]\n\n");
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for (i, span) in spans.iter().enumerate() {
        match span {
            Span::Text(text) if i == 0 => line_start_text(text, out),
            Span::Text(text) => escape_markup(text, out),
            Span::Bold(text) => {
                out.push('*');
                escape_markup(text, out);
                out.push('*');
            }
            Span::Code(text) => {
                // Trailing `;` ends the expression so following text stays markup
                out.push_str("#raw(\"");
                escape_string(text, out);
                out.push_str("\");");
            }
        }
    }
}

/// Escape text at the start of a line, where `=`, `+`, `-` or `1.` after
/// optional indentation would start a heading, list or enum.
fn line_start_text(text: &str, out: &mut String) {
    let body = text.trim_start();
    out.push_str(&text[..text.len() - body.len()]);

    if body.starts_with(['=', '+', '-']) {
        out.push('\\');
        escape_markup(body, out);
        return;
    }

    let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 && body[digits..].starts_with('.') {
        out.push_str(&body[..digits]);
        out.push_str("\\.");
        escape_markup(&body[digits + 1..], out);
        return;
    }

    escape_markup(body, out);
}

/// Escape special Typst markup characters
fn escape_markup(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

/// Escape text for a Typst string literal
fn escape_string(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '\\' | '"' => {
                out.push('\\');
                out.push(ch);
            }
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
}

fn list_to_typst(list: &List, out: &mut String) {
    let prefix = if list.ordered { "+" } else { "-" };

    for item in &list.items {
        out.push_str(prefix);
        out.push(' ');
        spans_to_typst(&item.content, out);
        out.push('\n');
    }
}
