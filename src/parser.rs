use crate::block::{Block, List, ListItem, Span};

/// Parse the markdown subset into a list of blocks.
///
/// Lines are classified one at a time: fences, headings (`#` to `###`),
/// `- ` and `1. ` list items, blank lines and paragraphs. The parser is total;
/// an unterminated fence becomes a code block holding the rest of the input.
pub fn parse(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut state = ParseState::default();

    for line in markdown.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        process_line(line, &mut state, &mut blocks);
    }

    if let Some(code) = state.code.take() {
        blocks.push(code.finish());
    }
    state.flush_list(&mut blocks);

    blocks
}

#[derive(Default)]
struct ParseState {
    // Open fence, if any
    code: Option<CodeBuilder>,

    // Open list, if any
    list: Option<List>,
}

struct CodeBuilder {
    language: Option<String>,
    content: String,
}

impl CodeBuilder {
    fn finish(self) -> Block {
        Block::CodeBlock {
            language: self.language,
            content: trim_blank_lines(&self.content).to_string(),
        }
    }
}

impl ParseState {
    fn flush_list(&mut self, blocks: &mut Vec<Block>) {
        if let Some(list) = self.list.take() {
            if !list.items.is_empty() {
                blocks.push(Block::List(list));
            }
        }
    }

    fn push_item(&mut self, ordered: bool, text: &str, blocks: &mut Vec<Block>) {
        if self.list.as_ref().is_some_and(|list| list.ordered != ordered) {
            self.flush_list(blocks);
        }
        let list = self.list.get_or_insert_with(|| List {
            ordered,
            items: Vec::new(),
        });
        list.items.push(ListItem {
            ordered,
            content: parse_inline(text),
        });
    }
}

fn process_line(line: &str, state: &mut ParseState, blocks: &mut Vec<Block>) {
    // Fence toggle
    if let Some(info) = line.trim().strip_prefix("```") {
        state.flush_list(blocks);
        match state.code.take() {
            Some(code) => blocks.push(code.finish()),
            None => {
                let info = info.trim();
                state.code = Some(CodeBuilder {
                    language: (!info.is_empty()).then(|| info.to_string()),
                    content: String::new(),
                });
            }
        }
        return;
    }

    if let Some(code) = state.code.as_mut() {
        code.content.push_str(line);
        code.content.push('\n');
        return;
    }

    // Headings
    if let Some((level, text)) = heading(line) {
        state.flush_list(blocks);
        blocks.push(Block::Heading {
            level,
            text: text.to_string(),
        });
        return;
    }

    // List items
    if let Some(text) = line.strip_prefix("- ") {
        state.push_item(false, text, blocks);
        return;
    }
    if let Some(text) = ordered_item(line) {
        state.push_item(true, text, blocks);
        return;
    }

    state.flush_list(blocks);
    if line.trim().is_empty() {
        return;
    }

    blocks.push(Block::Paragraph {
        content: parse_inline(line),
    });
}

fn heading(line: &str) -> Option<(u8, &str)> {
    [("# ", 1), ("## ", 2), ("### ", 3)]
        .into_iter()
        .find_map(|(prefix, level)| line.strip_prefix(prefix).map(|text| (level, text)))
}

/// Remainder of a `^\d+\.\s` list line, marker and one whitespace char removed.
fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    let sep = rest.chars().next().filter(|c| c.is_whitespace())?;
    Some(&rest[sep.len_utf8()..])
}

/// Drop whole blank lines at both ends, keeping the first line's indentation.
fn trim_blank_lines(code: &str) -> &str {
    let mut start = 0;
    for line in code.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    code[start..].trim_end()
}

/// Parse inline formatting (inline code and bold) into spans.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if let Some((code, rest)) = delimited(remaining, "`") {
            spans.push(Span::Code(code.to_string()));
            remaining = rest;
            continue;
        }

        if let Some((bold, rest)) = delimited(remaining, "**") {
            spans.push(Span::Bold(bold.to_string()));
            remaining = rest;
            continue;
        }

        match next_marker(remaining) {
            None => {
                spans.push(Span::Text(remaining.to_string()));
                break;
            }
            Some(0) => {
                // Marker that did not open a span; step over one char
                let len = remaining.chars().next().map_or(1, char::len_utf8);
                spans.push(Span::Text(remaining[..len].to_string()));
                remaining = &remaining[len..];
            }
            Some(at) => {
                spans.push(Span::Text(remaining[..at].to_string()));
                remaining = &remaining[at..];
            }
        }
    }

    spans
}

/// `marker content marker` at the start of `text`, content non-empty.
fn delimited<'a>(text: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let body = text.strip_prefix(marker)?;
    let end = body.find(marker)?;
    if end == 0 {
        return None;
    }
    Some((&body[..end], &body[end + marker.len()..]))
}

fn next_marker(text: &str) -> Option<usize> {
    match (text.find('`'), text.find("**")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    fn item(ordered: bool, s: &str) -> ListItem {
        ListItem {
            ordered,
            content: vec![text(s)],
        }
    }

    #[test]
    fn heading_levels() {
        assert_eq!(
            parse("## Title\n"),
            vec![Block::Heading {
                level: 2,
                text: "Title".to_string()
            }]
        );
        assert_eq!(
            parse("# A\n### C"),
            vec![
                Block::Heading {
                    level: 1,
                    text: "A".to_string()
                },
                Block::Heading {
                    level: 3,
                    text: "C".to_string()
                },
            ]
        );
    }

    #[test]
    fn deeper_headings_are_paragraphs() {
        assert_eq!(
            parse("#### four"),
            vec![Block::Paragraph {
                content: vec![text("#### four")]
            }]
        );
        assert_eq!(
            parse("#nospace"),
            vec![Block::Paragraph {
                content: vec![text("#nospace")]
            }]
        );
    }

    #[test]
    fn blank_line_closes_list() {
        assert_eq!(
            parse("- a\n- b\n\nparagraph"),
            vec![
                Block::List(List {
                    ordered: false,
                    items: vec![item(false, "a"), item(false, "b")],
                }),
                Block::Paragraph {
                    content: vec![text("paragraph")]
                },
            ]
        );
    }

    #[test]
    fn list_type_switch_starts_new_list() {
        assert_eq!(
            parse("- a\n1. b"),
            vec![
                Block::List(List {
                    ordered: false,
                    items: vec![item(false, "a")],
                }),
                Block::List(List {
                    ordered: true,
                    items: vec![item(true, "b")],
                }),
            ]
        );
    }

    #[test]
    fn ordered_items_strip_marker() {
        assert_eq!(
            parse("1. one\n12.\ttwo"),
            vec![Block::List(List {
                ordered: true,
                items: vec![item(true, "one"), item(true, "two")],
            })]
        );
        assert_eq!(ordered_item("1.x"), None);
        assert_eq!(ordered_item(". x"), None);
        assert_eq!(ordered_item("3.  x"), Some(" x"));
    }

    #[test]
    fn blank_line_splits_same_type_lists() {
        assert_eq!(
            parse("- a\n\n- b"),
            vec![
                Block::List(List {
                    ordered: false,
                    items: vec![item(false, "a")],
                }),
                Block::List(List {
                    ordered: false,
                    items: vec![item(false, "b")],
                }),
            ]
        );
    }

    #[test]
    fn paragraph_and_heading_close_list() {
        let blocks = parse("- a\ntext\n- b\n## H");
        assert_eq!(blocks.len(), 4);
        assert!(matches!(blocks[0], Block::List(_)));
        assert!(matches!(blocks[1], Block::Paragraph { .. }));
        assert!(matches!(blocks[2], Block::List(_)));
        assert!(matches!(blocks[3], Block::Heading { level: 2, .. }));
    }

    #[test]
    fn code_fence() {
        assert_eq!(
            parse("```ts\nconst x=1\n```"),
            vec![Block::CodeBlock {
                language: Some("ts".to_string()),
                content: "const x=1".to_string(),
            }]
        );
    }

    #[test]
    fn code_fence_trims_blank_lines_only() {
        assert_eq!(
            parse("```\n\n  indented\n\n  - not a list\n\n```"),
            vec![Block::CodeBlock {
                language: None,
                content: "  indented\n\n  - not a list".to_string(),
            }]
        );
    }

    #[test]
    fn fence_closes_open_list() {
        let blocks = parse("- a\n```js\nx\n```\n- b");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], Block::List(_)));
        assert!(matches!(blocks[1], Block::CodeBlock { .. }));
        assert!(matches!(blocks[2], Block::List(_)));
    }

    #[test]
    fn indented_fence_is_recognized() {
        let blocks = parse("  ```bash\nnpm i\n  ```");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: Some("bash".to_string()),
                content: "npm i".to_string(),
            }]
        );
    }

    #[test]
    fn unterminated_fence_consumes_rest() {
        assert_eq!(
            parse("intro\n```js\nlet a\n# not heading"),
            vec![
                Block::Paragraph {
                    content: vec![text("intro")]
                },
                Block::CodeBlock {
                    language: Some("js".to_string()),
                    content: "let a\n# not heading".to_string(),
                },
            ]
        );
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(
            parse("# Title\r\n\r\n- a\r\n"),
            vec![
                Block::Heading {
                    level: 1,
                    text: "Title".to_string()
                },
                Block::List(List {
                    ordered: false,
                    items: vec![item(false, "a")],
                }),
            ]
        );
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n  \n\t\n").is_empty());
    }

    #[test]
    fn inline_formatting() {
        assert_eq!(
            parse_inline("Use `foo()` and **bold**"),
            vec![
                text("Use "),
                Span::Code("foo()".to_string()),
                text(" and "),
                Span::Bold("bold".to_string()),
            ]
        );
    }

    #[test]
    fn unterminated_inline_degrades_to_text() {
        assert_eq!(
            parse_inline("a `b"),
            vec![text("a "), text("`"), text("b")]
        );
        assert_eq!(
            parse_inline("**open"),
            vec![text("*"), text("*open")]
        );
        assert_eq!(parse_inline("``"), vec![text("`"), text("`")]);
    }

    #[test]
    fn single_star_is_plain() {
        assert_eq!(parse_inline("a * b"), vec![text("a * b")]);
    }

    #[test]
    fn bold_runs_to_first_closing_marker() {
        assert_eq!(
            parse_inline("**a*b** c"),
            vec![Span::Bold("a*b".to_string()), text(" c")]
        );
    }

    #[test]
    fn list_item_inline_content() {
        let blocks = parse("- **Fast**: `12ms`");
        let Block::List(list) = &blocks[0] else {
            panic!("expected list, got {:?}", blocks[0]);
        };
        assert_eq!(
            list.items[0].content,
            vec![
                Span::Bold("Fast".to_string()),
                text(": "),
                Span::Code("12ms".to_string()),
            ]
        );
    }
}
