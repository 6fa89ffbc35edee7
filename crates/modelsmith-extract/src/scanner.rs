//! Class scanner over the token stream.
//!
//! Recognizes just enough TypeScript structure for extraction:
//!
//! - class declarations (`export class Name<T> extends Base implements I { ... }`)
//!   with the decorators that precede them
//! - members: properties (`name?: Type;`, `name = init`) and methods
//!   (`async name(params): Ret { ... }`) with their decorator runs
//! - parameter lists with parameter decorators (`@Body() dto: CreateDto`)
//! - `interface Name { ... }` and `type Name = { ... }` bodies
//!
//! A decorator run always ends at the member it decorates, so a marker can
//! never be attributed to the following member.

use crate::lexer::{Token, TokenKind, find_close, line_break_between, tokenize};
use std::ops::Range;

const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "readonly",
    "static",
    "abstract",
    "override",
    "declare",
    "accessor",
];

/// A decorator invocation such as `@Column({ type: 'text' })`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorator {
    /// Decorator name, dotted if qualified (`Reflect.metadata`)
    pub name: String,

    /// Raw text between the parentheses, `None` for a bare `@Name`
    pub args: Option<String>,

    /// Byte offset of the `@`
    pub start: usize,
}

impl Decorator {
    /// Tokens of the argument list
    pub fn arg_tokens(&self) -> Vec<Token<'_>> {
        self.args.as_deref().map(tokenize).unwrap_or_default()
    }

    /// Recorded form: `Name` or `Name(args)` with whitespace collapsed
    pub fn render(&self) -> String {
        match &self.args {
            None => self.name.clone(),
            Some(args) => {
                let args = args.split_whitespace().collect::<Vec<_>>().join(" ");
                format!("{}({args})", self.name)
            }
        }
    }

    /// Leading string literal argument: `@Entity('reviews')` → `reviews`
    pub fn first_string_arg(&self) -> Option<String> {
        self.arg_tokens()
            .first()
            .and_then(|t| t.string_value())
            .map(str::to_string)
    }

    /// Leading numeric argument: `@MinLength(3)` → `3`
    pub fn first_number_arg(&self) -> Option<i64> {
        let tokens = self.arg_tokens();
        match tokens.as_slice() {
            [sign, n, ..] if sign.is_punct('-') && n.kind == TokenKind::Number => {
                n.text.parse::<i64>().ok().map(|v| -v)
            }
            [n, ..] if n.kind == TokenKind::Number => n.text.parse().ok(),
            _ => None,
        }
    }

    /// Leading identifier argument: `@UseGuards(JwtAuthGuard)` → `JwtAuthGuard`
    pub fn first_ident_arg(&self) -> Option<String> {
        self.arg_tokens()
            .first()
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text.to_string())
    }

    fn option_value(&self, key: &str) -> Option<String> {
        let tokens = self.arg_tokens();
        tokens.windows(3).find_map(|w| {
            let key_matches = w[0].is_ident(key) || w[0].string_value() == Some(key);
            if key_matches && w[1].is_punct(':') {
                Some(w[2].string_value().unwrap_or(w[2].text).to_string())
            } else {
                None
            }
        })
    }

    /// String option: `{ name: 'user_id' }`
    pub fn option_str(&self, key: &str) -> Option<String> {
        self.option_value(key)
    }

    /// Literal boolean option: `{ nullable: true }`
    pub fn option_bool(&self, key: &str) -> Option<bool> {
        match self.option_value(key)?.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Numeric option: `{ length: 100 }`
    pub fn option_number(&self, key: &str) -> Option<u32> {
        self.option_value(key)?.parse().ok()
    }

    /// Target of a type thunk: `() => Product` or `type => Product`
    pub fn thunk_target(&self) -> Option<String> {
        let tokens = self.arg_tokens();
        let arrow = tokens
            .windows(2)
            .position(|w| w[0].is_punct('=') && w[1].is_punct('>'))?;
        tokens
            .get(arrow + 2)
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text.to_string())
    }
}

/// A class or interface property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,

    /// Declared with `?`
    pub optional: bool,

    /// Declared type text, empty when the property has no annotation
    pub type_text: String,

    pub decorators: Vec<Decorator>,

    /// Byte offset of the name
    pub start: usize,
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub optional: bool,
    pub type_text: String,
    pub decorators: Vec<Decorator>,
}

/// A class method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub is_async: bool,
    pub params: Vec<Param>,
    pub decorators: Vec<Decorator>,

    /// Byte offset of the name
    pub start: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Property(Property),
    Method(Method),
}

impl Member {
    pub fn decorators(&self) -> &[Decorator] {
        match self {
            Member::Property(p) => &p.decorators,
            Member::Method(m) => &m.decorators,
        }
    }
}

/// A class declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub exported: bool,

    /// Raw `extends` clause, e.g. `PartialType(CreateReviewDto)`
    pub extends: Option<String>,

    pub decorators: Vec<Decorator>,
    pub members: Vec<Member>,

    /// Byte range of the body between the braces
    pub body: Range<usize>,
}

impl ClassDecl {
    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d.name == name)
    }

    pub fn decorator(&self, name: &str) -> Option<&Decorator> {
        self.decorators.iter().find(|d| d.name == name)
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.members.iter().filter_map(|m| match m {
            Member::Property(p) => Some(p),
            Member::Method(_) => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(m) => Some(m),
            Member::Property(_) => None,
        })
    }
}

/// Tokenized source with structural queries
pub struct Scanner<'a> {
    src: &'a str,
    tokens: Vec<Token<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            tokens: tokenize(src),
        }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    fn token(&self, i: usize) -> Option<&Token<'a>> {
        self.tokens.get(i)
    }

    fn is_punct_at(&self, i: usize, c: char) -> bool {
        self.token(i).is_some_and(|t| t.is_punct(c))
    }

    fn is_kind_at(&self, i: usize, kind: TokenKind) -> bool {
        self.token(i).is_some_and(|t| t.kind == kind)
    }

    /// Close of the bracket at `open`, or the last token if unbalanced
    fn close_or_end(&self, open: usize) -> usize {
        find_close(&self.tokens, open).unwrap_or(self.tokens.len())
    }

    /// Source text covering tokens `from..to`
    fn text_between(&self, from: usize, to: usize) -> String {
        match (self.token(from), to.checked_sub(1).and_then(|last| self.token(last))) {
            (Some(first), Some(last)) if from < to => {
                self.src[first.start..last.end()].trim().to_string()
            }
            _ => String::new(),
        }
    }

    /// Parse the decorator whose `@` is at `at`.
    ///
    /// Returns the decorator and the index of the first token after it.
    pub fn parse_decorator(&self, at: usize) -> Option<(Decorator, usize)> {
        let start = self.token(at).filter(|t| t.kind == TokenKind::At)?.start;
        let mut j = at + 1;
        let mut name = self.token(j).filter(|t| t.kind == TokenKind::Ident)?.text.to_string();
        j += 1;

        while self.is_punct_at(j, '.') && self.is_kind_at(j + 1, TokenKind::Ident) {
            name.push('.');
            name.push_str(self.tokens[j + 1].text);
            j += 2;
        }

        let mut args = None;
        if self.is_punct_at(j, '(') {
            let open_end = self.tokens[j].end();
            let close = self.close_or_end(j);
            let args_end = self.token(close).map_or(self.src.len(), |t| t.start);
            args = Some(self.src[open_end..args_end].to_string());
            j = close + 1;
        }

        Some((Decorator { name, args, start }, j))
    }

    /// Every class declaration in the file, in source order
    pub fn classes(&self) -> Vec<ClassDecl> {
        let mut classes = Vec::new();
        let mut pending = Vec::new();
        let mut exported = false;
        let mut i = 0;

        while let Some(token) = self.token(i) {
            if token.kind == TokenKind::At {
                if let Some((decorator, next)) = self.parse_decorator(i) {
                    pending.push(decorator);
                    i = next;
                } else {
                    i += 1;
                }
                continue;
            }

            if token.is_ident("export") {
                exported = true;
                i += 1;
                continue;
            }

            if token.is_ident("default") || token.is_ident("abstract") || token.is_ident("declare")
            {
                i += 1;
                continue;
            }

            if token.is_ident("class") && self.is_kind_at(i + 1, TokenKind::Ident) {
                let decorators = std::mem::take(&mut pending);
                if let Some((class, next)) = self.parse_class(i, decorators, exported) {
                    classes.push(class);
                    i = next;
                } else {
                    i += 1;
                }
                exported = false;
                continue;
            }

            pending.clear();
            exported = false;
            i += 1;
        }

        classes
    }

    fn parse_class(
        &self,
        at: usize,
        decorators: Vec<Decorator>,
        exported: bool,
    ) -> Option<(ClassDecl, usize)> {
        let name = self.token(at + 1)?.text.to_string();
        let mut j = at + 2;

        if self.is_punct_at(j, '<') {
            j = self.skip_angles(j);
        }

        let mut extends = None;
        if self.token(j).is_some_and(|t| t.is_ident("extends")) {
            let from = j + 1;
            let mut k = from;
            while let Some(t) = self.token(k) {
                if t.is_punct('{') || t.is_ident("implements") {
                    break;
                }
                k = if t.is_punct('(') || t.is_punct('[') {
                    self.close_or_end(k) + 1
                } else if t.is_punct('<') {
                    self.skip_angles(k)
                } else {
                    k + 1
                };
            }
            let text = self.text_between(from, k.min(self.tokens.len()));
            if !text.is_empty() {
                extends = Some(text);
            }
            j = k;
        }

        while self.token(j).is_some_and(|t| !t.is_punct('{')) {
            j += 1;
        }
        let open = j;
        self.token(open)?;
        let close = self.close_or_end(open);

        let body_start = self.tokens[open].end();
        let body_end = self.token(close).map_or(self.src.len(), |t| t.start);

        let class = ClassDecl {
            name,
            exported,
            extends,
            decorators,
            members: self.members(open + 1, close),
            body: body_start..body_end,
        };

        Some((class, close + 1))
    }

    /// Index after a balanced `<...>` starting at `open`
    fn skip_angles(&self, open: usize) -> usize {
        let mut depth = 0usize;
        let mut i = open;
        while let Some(t) = self.token(i) {
            if t.is_punct('<') {
                depth += 1;
            } else if t.is_punct('>') && !self.is_punct_at(i.wrapping_sub(1), '=') {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + 1;
                }
            } else if t.is_punct('{') || t.is_punct(';') {
                return i;
            }
            i += 1;
        }
        i
    }

    /// Whether a line break before token `i` starts a new statement
    fn ends_statement_before(&self, i: usize) -> bool {
        let (Some(prev), Some(next)) = (i.checked_sub(1).and_then(|p| self.token(p)), self.token(i))
        else {
            return true;
        };
        if !line_break_between(self.src, prev, next) {
            return false;
        }
        let prev_complete = prev.kind != TokenKind::Punct
            || prev.is_punct(')')
            || prev.is_punct(']')
            || prev.is_punct('}');
        let next_starts =
            matches!(next.kind, TokenKind::Ident | TokenKind::At | TokenKind::Str);
        prev_complete && next_starts
    }

    /// Index of the token ending a type annotation that starts at `from`
    fn type_end(&self, from: usize, to: usize) -> usize {
        let mut angle = 0usize;
        let mut i = from;
        while i < to {
            let Some(t) = self.token(i) else { break };
            if i > from && angle == 0 && self.ends_statement_before(i) {
                return i;
            }
            if t.is_punct('(') || t.is_punct('[') || t.is_punct('{') {
                i = self.close_or_end(i) + 1;
                continue;
            }
            if t.is_punct('<') {
                angle += 1;
            } else if t.is_punct('>') {
                if !self.is_punct_at(i.wrapping_sub(1), '=') {
                    angle = angle.saturating_sub(1);
                }
            } else if angle == 0 {
                let arrow = t.is_punct('=') && self.is_punct_at(i + 1, '>');
                let terminator = t.is_punct(';')
                    || t.is_punct(',')
                    || t.is_punct(')')
                    || t.is_punct('}')
                    || (t.is_punct('=') && !arrow)
                    || t.kind == TokenKind::At;
                if terminator {
                    return i;
                }
            }
            i += 1;
        }
        i.min(to)
    }

    /// Index after an initializer expression starting at `from`
    fn expression_end(&self, from: usize, to: usize) -> usize {
        let mut i = from;
        while i < to {
            let Some(t) = self.token(i) else { break };
            if i > from && self.ends_statement_before(i) {
                return i;
            }
            if t.is_punct(';') {
                return i + 1;
            }
            if t.is_punct('(') || t.is_punct('[') || t.is_punct('{') {
                i = self.close_or_end(i) + 1;
                continue;
            }
            i += 1;
        }
        i.min(to)
    }

    /// Members between token indices `from` and `to` (a class or interface body)
    pub fn members(&self, from: usize, to: usize) -> Vec<Member> {
        let mut members = Vec::new();
        let mut pending: Vec<Decorator> = Vec::new();
        let mut is_async = false;
        let mut i = from;

        while i < to {
            let Some(token) = self.token(i) else { break };

            if token.kind == TokenKind::At {
                match self.parse_decorator(i) {
                    Some((decorator, next)) => {
                        pending.push(decorator);
                        i = next;
                    }
                    None => i += 1,
                }
                continue;
            }

            let followed_by_name = self.is_kind_at(i + 1, TokenKind::Ident)
                || self.is_kind_at(i + 1, TokenKind::Str)
                || self.is_punct_at(i + 1, '*');
            if token.kind == TokenKind::Ident && followed_by_name {
                if token.text == "async" {
                    is_async = true;
                    i += 1;
                    continue;
                }
                if MODIFIERS.contains(&token.text) || token.text == "get" || token.text == "set" {
                    i += 1;
                    continue;
                }
            }
            if token.is_punct('*') {
                i += 1;
                continue;
            }

            let is_name = token.kind == TokenKind::Ident || token.kind == TokenKind::Str;
            if !is_name {
                pending.clear();
                is_async = false;
                i += 1;
                continue;
            }

            let name = token.string_value().unwrap_or(token.text).to_string();
            let start = token.start;
            let decorators = std::mem::take(&mut pending);
            let mut k = i + 1;
            let mut optional = false;
            if self.is_punct_at(k, '?') || self.is_punct_at(k, '!') {
                optional = self.is_punct_at(k, '?');
                k += 1;
            }
            if self.is_punct_at(k, '<') {
                k = self.skip_angles(k);
            }

            let next = match self.token(k) {
                Some(t) if t.is_punct('(') => {
                    let close = self.close_or_end(k);
                    let params = self.params(k, close);
                    members.push(Member::Method(Method {
                        name,
                        is_async,
                        params,
                        decorators,
                        start,
                    }));
                    self.method_end(close + 1, to)
                }
                Some(t) if t.is_punct(':') => {
                    let end = self.type_end(k + 1, to);
                    members.push(Member::Property(Property {
                        name,
                        optional,
                        type_text: self.text_between(k + 1, end),
                        decorators,
                        start,
                    }));
                    self.property_end(end, to)
                }
                Some(t) if t.is_punct('=') || t.is_punct(';') || t.is_punct(',') => {
                    members.push(Member::Property(Property {
                        name,
                        optional,
                        type_text: String::new(),
                        decorators,
                        start,
                    }));
                    self.property_end(k, to)
                }
                _ => k,
            };

            is_async = false;
            i = next.max(i + 1);
        }

        members
    }

    fn property_end(&self, at: usize, to: usize) -> usize {
        match self.token(at) {
            Some(t) if t.is_punct('=') => self.expression_end(at + 1, to),
            Some(t) if t.is_punct(';') || t.is_punct(',') => at + 1,
            _ => at,
        }
    }

    /// Index after a method's return type and body
    fn method_end(&self, after_params: usize, to: usize) -> usize {
        let mut m = after_params;
        if self.is_punct_at(m, ':') {
            let mut angle = 0usize;
            m += 1;
            while m < to {
                let Some(t) = self.token(m) else { break };
                if t.is_punct('<') {
                    angle += 1;
                } else if t.is_punct('>') && !self.is_punct_at(m - 1, '=') {
                    angle = angle.saturating_sub(1);
                } else if angle == 0 && (t.is_punct('{') || t.is_punct(';')) {
                    break;
                } else if t.is_punct('(') || t.is_punct('[') || (angle > 0 && t.is_punct('{')) {
                    m = self.close_or_end(m) + 1;
                    continue;
                }
                m += 1;
            }
        }
        match self.token(m) {
            Some(t) if t.is_punct('{') => self.close_or_end(m) + 1,
            Some(t) if t.is_punct(';') => m + 1,
            _ => m,
        }
    }

    /// Parameters of the list opened at `open` and closed at `close`
    pub fn params(&self, open: usize, close: usize) -> Vec<Param> {
        let mut params = Vec::new();
        let mut segment_start = open + 1;
        let mut i = open + 1;

        while i <= close {
            let at_end = i >= close || self.token(i).is_none();
            if at_end || self.is_punct_at(i, ',') {
                let end = i.min(close);
                if let Some(param) = self.param(segment_start, end) {
                    params.push(param);
                }
                if at_end {
                    break;
                }
                segment_start = i + 1;
                i += 1;
                continue;
            }
            if self.is_punct_at(i, '(') || self.is_punct_at(i, '[') || self.is_punct_at(i, '{') {
                i = self.close_or_end(i) + 1;
            } else if self.is_punct_at(i, '<') {
                i = self.skip_angles(i);
            } else {
                i += 1;
            }
        }

        params
    }

    fn param(&self, from: usize, to: usize) -> Option<Param> {
        let mut decorators = Vec::new();
        let mut i = from;

        while i < to && self.is_kind_at(i, TokenKind::At) {
            let (decorator, next) = self.parse_decorator(i)?;
            decorators.push(decorator);
            i = next;
        }
        while i < to
            && self
                .token(i)
                .is_some_and(|t| MODIFIERS.contains(&t.text) && self.is_kind_at(i + 1, TokenKind::Ident))
        {
            i += 1;
        }
        while i < to && self.is_punct_at(i, '.') {
            i += 1;
        }

        let name_token = self.token(i).filter(|_| i < to)?;
        let name = if name_token.is_punct('{') || name_token.is_punct('[') {
            let close = self.close_or_end(i).min(to.saturating_sub(1));
            let text = self.text_between(i, close + 1);
            i = close + 1;
            text
        } else {
            i += 1;
            name_token.text.to_string()
        };

        let mut optional = false;
        if self.is_punct_at(i, '?') {
            optional = true;
            i += 1;
        }

        let mut type_text = String::new();
        if i < to && self.is_punct_at(i, ':') {
            let end = self.type_end(i + 1, to);
            type_text = self.text_between(i + 1, end);
            i = end;
        }
        if i < to && self.is_punct_at(i, '=') {
            optional = true;
        }

        Some(Param {
            name,
            optional,
            type_text,
            decorators,
        })
    }

    /// Members of `interface Name { ... }` or `type Name = { ... }`
    pub fn object_type(&self, name: &str) -> Option<Vec<Member>> {
        let at = self.tokens.windows(2).position(|w| {
            (w[0].is_ident("interface") || w[0].is_ident("type")) && w[1].is_ident(name)
        })?;

        let mut j = at + 2;
        while let Some(t) = self.token(j) {
            if t.is_punct('{') {
                let close = self.close_or_end(j);
                return Some(self.members(j + 1, close));
            }
            if t.is_punct(';') {
                return None;
            }
            j += 1;
        }
        None
    }
}

/// Scan a source file for class declarations
pub fn scan_classes(src: &str) -> Vec<ClassDecl> {
    Scanner::new(src).classes()
}
