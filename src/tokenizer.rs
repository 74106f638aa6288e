use crate::token::{Token, TokenKind};

const KEYWORDS: &[&str] = &[
    "const",
    "let",
    "var",
    "function",
    "return",
    "if",
    "else",
    "for",
    "while",
    "do",
    "switch",
    "case",
    "break",
    "continue",
    "try",
    "catch",
    "finally",
    "throw",
    "async",
    "await",
    "import",
    "export",
    "from",
    "default",
    "class",
    "extends",
    "new",
    "this",
    "super",
    "static",
    "get",
    "set",
    "typeof",
    "instanceof",
    "in",
    "of",
    "void",
    "delete",
    "yield",
];

const CONSTANTS: &[&str] = &["true", "false", "null", "undefined", "NaN", "Infinity"];

fn is_operator(ch: char) -> bool {
    matches!(
        ch,
        '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|' | '^' | '~' | '?' | ':'
    )
}

fn is_punctuation(ch: char) -> bool {
    matches!(ch, '{' | '}' | '[' | ']' | '(' | ')' | ';' | ',' | '.')
}

fn is_number_char(ch: char) -> bool {
    ch.is_ascii_hexdigit() || matches!(ch, '.' | 'x' | 'X')
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

/// Split JavaScript/TypeScript-flavoured source into highlight tokens.
///
/// Never fails: anything unrecognized falls through to a one-character
/// whitespace-class token, and unterminated strings or block comments run to
/// the end of input. Concatenating the token texts yields `source` again.
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source).run()
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Byte length of the leading run of `rest` whose chars satisfy `pred`.
    fn run_len(&self, pred: impl Fn(char) -> bool) -> usize {
        let rest = self.rest();
        rest.find(|c: char| !pred(c)).unwrap_or(rest.len())
    }

    fn emit(&mut self, kind: TokenKind, len: usize) {
        let text = &self.src[self.pos..self.pos + len];
        self.tokens.push(Token::new(kind, text));
        self.pos += len;
    }

    // Whitespace runs follow `char::is_whitespace`, which differs from what
    // JavaScript treats as whitespace: U+FEFF is not whitespace here and comes
    // out as a one-char fallback token instead of joining the run.
    fn run(mut self) -> Vec<Token> {
        while let Some(ch) = self.peek() {
            let rest = self.rest();

            if ch.is_whitespace() {
                let len = self.run_len(char::is_whitespace);
                self.emit(TokenKind::Whitespace, len);
            } else if rest.starts_with("//") {
                let len = rest.find('\n').unwrap_or(rest.len());
                self.emit(TokenKind::Comment, len);
            } else if rest.starts_with("/*") {
                let len = rest[2..]
                    .find("*/")
                    .map(|end| 2 + end + 2)
                    .unwrap_or(rest.len());
                self.emit(TokenKind::Comment, len);
            } else if matches!(ch, '"' | '\'' | '`') {
                let len = string_len(rest, ch);
                self.emit(TokenKind::String, len);
            } else if ch.is_ascii_digit()
                || (ch == '.' && self.peek_second().is_some_and(|c| c.is_ascii_digit()))
            {
                let len = self.run_len(is_number_char);
                self.emit(TokenKind::Number, len);
            } else if is_ident_start(ch) {
                let len = self.run_len(is_ident_char);
                let kind = classify_identifier(&rest[..len], &rest[len..]);
                self.emit(kind, len);
            } else if is_operator(ch) {
                let len = self.run_len(is_operator);
                self.emit(TokenKind::Operator, len);
            } else if is_punctuation(ch) {
                self.emit(TokenKind::Punctuation, 1);
            } else {
                self.emit(TokenKind::Whitespace, ch.len_utf8());
            }
        }

        self.tokens
    }
}

/// Heuristic classification, no symbol resolution: call position makes a
/// function name, SCREAMING_CASE makes a constant.
fn classify_identifier(ident: &str, after: &str) -> TokenKind {
    if CONSTANTS.contains(&ident) {
        TokenKind::Constant
    } else if KEYWORDS.contains(&ident) {
        TokenKind::Keyword
    } else if after.trim_start().starts_with('(') {
        TokenKind::FunctionName
    } else if ident.len() > 1 && ident == ident.to_ascii_uppercase() {
        TokenKind::Constant
    } else {
        TokenKind::Identifier
    }
}

/// Byte length of the string literal at the start of `rest`, opened by `quote`.
fn string_len(rest: &str, quote: char) -> usize {
    let mut chars = rest.char_indices().skip(1);
    while let Some((idx, ch)) = chars.next() {
        if ch == '\\' {
            if chars.next().is_none() {
                break;
            }
        } else if ch == quote {
            return idx + ch.len_utf8();
        }
    }
    rest.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn kinds(source: &str) -> Vec<(TokenKind, std::string::String)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    fn tok(kind: TokenKind, text: &str) -> (TokenKind, std::string::String) {
        (kind, text.to_string())
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn byte_order_mark_is_a_fallback_token() {
        assert_eq!(
            kinds("\u{feff} x"),
            vec![
                tok(Whitespace, "\u{feff}"),
                tok(Whitespace, " "),
                tok(Identifier, "x"),
            ]
        );
    }

    #[test]
    fn declaration() {
        assert_eq!(
            kinds("const x = 1;"),
            vec![
                tok(Keyword, "const"),
                tok(Whitespace, " "),
                tok(Identifier, "x"),
                tok(Whitespace, " "),
                tok(Operator, "="),
                tok(Whitespace, " "),
                tok(Number, "1"),
                tok(Punctuation, ";"),
            ]
        );
    }

    #[test]
    fn function_name_needs_call_position() {
        assert_eq!(kinds("foo()")[0], tok(FunctionName, "foo"));
        assert_eq!(kinds("foo  (1)")[0], tok(FunctionName, "foo"));
        assert_eq!(kinds("foo;")[0], tok(Identifier, "foo"));
    }

    #[test]
    fn constants() {
        assert_eq!(kinds("true")[0], tok(Constant, "true"));
        assert_eq!(kinds("NaN")[0], tok(Constant, "NaN"));
        assert_eq!(kinds("MAX_SIZE")[0], tok(Constant, "MAX_SIZE"));
        // single uppercase letters stay identifiers
        assert_eq!(kinds("X")[0], tok(Identifier, "X"));
        // constant set wins over the call heuristic
        assert_eq!(kinds("null()")[0], tok(Constant, "null"));
        // keywords win over call position too
        assert_eq!(kinds("if (a)")[0], tok(Keyword, "if"));
    }

    #[test]
    fn whitespace_run_is_one_token() {
        assert_eq!(kinds("\n    \t")[0], tok(Whitespace, "\n    \t"));
    }

    #[test]
    fn line_comment_stops_before_newline() {
        assert_eq!(
            kinds("// hi\nx"),
            vec![
                tok(Comment, "// hi"),
                tok(Whitespace, "\n"),
                tok(Identifier, "x"),
            ]
        );
    }

    #[test]
    fn block_comments() {
        assert_eq!(
            kinds("/* a */b"),
            vec![tok(Comment, "/* a */"), tok(Identifier, "b")]
        );
        assert_eq!(kinds("/*/ x"), vec![tok(Comment, "/*/ x")]);
        assert_eq!(kinds("/**/"), vec![tok(Comment, "/**/")]);
    }

    #[test]
    fn strings_and_escapes() {
        assert_eq!(kinds(r#""a\"b" c"#)[0], tok(String, r#""a\"b""#));
        assert_eq!(kinds("'it'")[0], tok(String, "'it'"));
        assert_eq!(kinds("`tmpl ${x}`")[0], tok(String, "`tmpl ${x}`"));
        assert_eq!(kinds("\"open"), vec![tok(String, "\"open")]);
        assert_eq!(kinds("'tail\\"), vec![tok(String, "'tail\\")]);
    }

    #[test]
    fn numbers_are_permissive() {
        assert_eq!(kinds("0xFF")[0], tok(Number, "0xFF"));
        assert_eq!(kinds(".5")[0], tok(Number, ".5"));
        assert_eq!(kinds("1e10")[0], tok(Number, "1e10"));
        // hex letters glue onto a leading digit
        assert_eq!(kinds("1abc")[0], tok(Number, "1abc"));
        assert_eq!(kinds(".x")[0], tok(Punctuation, "."));
    }

    #[test]
    fn operators_combine_punctuation_does_not() {
        assert_eq!(
            kinds("a === b"),
            vec![
                tok(Identifier, "a"),
                tok(Whitespace, " "),
                tok(Operator, "==="),
                tok(Whitespace, " "),
                tok(Identifier, "b"),
            ]
        );
        assert_eq!(kinds("=>")[0], tok(Operator, "=>"));
        assert_eq!(
            kinds("({"),
            vec![tok(Punctuation, "("), tok(Punctuation, "{")]
        );
    }

    #[test]
    fn unknown_characters_fall_back() {
        assert_eq!(
            kinds("@é#"),
            vec![tok(Whitespace, "@"), tok(Whitespace, "é"), tok(Whitespace, "#")]
        );
    }

    #[test]
    fn method_call_chain() {
        let tokens = kinds("infiner.chat.create({ model: 'gpt' })");
        assert_eq!(tokens[0], tok(Identifier, "infiner"));
        assert_eq!(tokens[2], tok(Identifier, "chat"));
        assert_eq!(tokens[4], tok(FunctionName, "create"));
        assert!(tokens.contains(&tok(String, "'gpt'")));
    }
}
