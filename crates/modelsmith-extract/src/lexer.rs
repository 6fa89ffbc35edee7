//! Tokenizer for TypeScript-like source text.
//!
//! The tokenizer is deliberately shallow: it knows identifiers, string and
//! template literals, numbers, the `@` decorator sigil and single-character
//! punctuation. Everything else (operators, regex literals, JSX) degrades into
//! punctuation tokens, which is enough for the class scanner to find
//! declarations and balance brackets.
//!
//! # Totality
//!
//! [`tokenize`] accepts any string. Unterminated comments and literals consume
//! to the end of their line (for quoted strings) or the end of input (for
//! templates and block comments). Every token's `text` is exactly
//! `&src[start..end]`, and tokens never overlap.

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword (`class`, `async`, `Review`, `$ref`)
    Ident,
    /// Single- or double-quoted string, quotes included
    Str,
    /// Backtick template literal, backticks included
    Template,
    Number,
    /// The decorator sigil `@`
    At,
    /// Any other single character
    Punct,
}

/// A token borrowed from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the first character
    pub start: usize,
}

impl<'a> Token<'a> {
    /// Byte offset one past the last character
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn is_ident(&self, name: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == name
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct && self.text.starts_with(c)
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind, TokenKind::Str | TokenKind::Template)
    }

    /// Contents of a string or template literal without its quotes
    pub fn string_value(&self) -> Option<&'a str> {
        if !self.is_string() {
            return None;
        }
        let quote = self.text.chars().next()?;
        let inner = &self.text[quote.len_utf8()..];
        Some(inner.strip_suffix(quote).unwrap_or(inner))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn scan_while(src: &str, from: usize, pred: impl Fn(char) -> bool) -> usize {
    src[from..]
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(src.len(), |(offset, _)| from + offset)
}

/// End offset of a literal opened by `quote` at `from`
fn scan_string(src: &str, from: usize, quote: char) -> usize {
    let mut chars = src[from + 1..].char_indices();
    while let Some((offset, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\n' if quote != '`' => return from + 1 + offset,
            c if c == quote => return from + 1 + offset + 1,
            _ => {}
        }
    }
    src.len()
}

/// Split source text into tokens, skipping whitespace and comments.
///
/// ```
/// use modelsmith_extract::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize("@Column('text') // note\nbody: string;");
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(tokens[1].text, "Column");
/// assert_eq!(tokens[3].string_value(), Some("text"));
/// assert_eq!(kinds[0], TokenKind::At);
/// assert_eq!(tokens.len(), 9);
/// ```
pub fn tokenize(src: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(c) = src[pos..].chars().next() {
        let start = pos;
        let after = pos + c.len_utf8();
        let next = src[after..].chars().next();

        let kind = match c {
            c if c.is_whitespace() => {
                pos = after;
                continue;
            }
            '/' if next == Some('/') => {
                pos = src[pos..].find('\n').map_or(src.len(), |n| pos + n);
                continue;
            }
            '/' if next == Some('*') => {
                pos = src[pos + 2..]
                    .find("*/")
                    .map_or(src.len(), |n| pos + 2 + n + 2);
                continue;
            }
            '\'' | '"' => {
                pos = scan_string(src, pos, c);
                TokenKind::Str
            }
            '`' => {
                pos = scan_string(src, pos, c);
                TokenKind::Template
            }
            '@' => {
                pos = after;
                TokenKind::At
            }
            c if c.is_ascii_digit() => {
                pos = scan_while(src, pos, |c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
                TokenKind::Number
            }
            c if is_ident_start(c) => {
                pos = scan_while(src, after, is_ident_continue);
                TokenKind::Ident
            }
            _ => {
                pos = after;
                TokenKind::Punct
            }
        };

        tokens.push(Token {
            kind,
            text: &src[start..pos],
            start,
        });
    }

    tokens
}

fn is_open(token: &Token<'_>) -> bool {
    token.kind == TokenKind::Punct && matches!(token.text, "(" | "[" | "{")
}

fn is_close(token: &Token<'_>) -> bool {
    token.kind == TokenKind::Punct && matches!(token.text, ")" | "]" | "}")
}

/// Index of the bracket closing the one at `open`, counting all bracket kinds.
///
/// Returns `None` when `open` is not an opening bracket or input ends first.
pub fn find_close(tokens: &[Token<'_>], open: usize) -> Option<usize> {
    if !tokens.get(open).is_some_and(is_open) {
        return None;
    }

    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        if is_open(token) {
            depth += 1;
        } else if is_close(token) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Whether a line break separates the end of `prev` from the start of `next`
pub fn line_break_between(src: &str, prev: &Token<'_>, next: &Token<'_>) -> bool {
    src.get(prev.end()..next.start)
        .is_some_and(|gap| gap.contains('\n'))
}
