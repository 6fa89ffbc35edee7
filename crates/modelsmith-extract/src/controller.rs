//! Controller and endpoint extraction.
//!
//! The base route comes from the class-level `@Controller('x')` marker. Every
//! HTTP-method marker inside the class body (`@Get`, `@Post`, `@Put`,
//! `@Patch`, `@Delete`, `@Options`, `@Head`) becomes one [`Endpoint`].
//!
//! # Handler resolution
//!
//! The handler is searched in a lookahead window that starts after the marker
//! and ends at the next HTTP-method marker or [`HANDLER_WINDOW`] bytes,
//! whichever comes first. Three tiers are tried in order:
//!
//! 1. `async name(...)` whose parameter list contains a binding marker
//! 2. `name(...)` whose parameter list contains a binding marker
//! 3. the first `name(` that is not a control-flow keyword and is not
//!    preceded by `.`, `=` or `@`
//!
//! A method whose decorator run contains the marker is taken directly when it
//! starts inside the window. The token tiers only apply otherwise, and they
//! never look inside decorator argument lists, so `@UseGuards(AuthGuard('jwt'))`
//! cannot be mistaken for the handler.
//!
//! If every tier fails the handler is [`UNKNOWN_HANDLER`]. Resolution never
//! fails and never panics.

use crate::lexer::{Token, TokenKind, find_close};
use crate::scanner::{ClassDecl, Decorator, Method, Param, Scanner};
use modelsmith_core::model::{Controller, Endpoint, HttpMethod, UNKNOWN_HANDLER};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use tracing::debug;

/// Maximum lookahead, in bytes, when resolving a handler
pub const HANDLER_WINDOW: usize = 2000;

const BINDING_MARKERS: &[&str] = &["Param", "Body", "Query", "Request", "Req", "Response", "Res"];

const CONTROL_FLOW: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "function", "await", "typeof", "new",
    "super", "throw", "do", "else", "try", "delete", "void", "yield", "instanceof", "in", "of",
];

#[allow(clippy::expect_used)]
static ROUTE_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("route param regex should be valid")
});

#[allow(clippy::expect_used)]
static DUPLICATE_SLASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/{2,}").expect("slash regex should be valid"));

/// Extract the controller declared in one source file.
///
/// Returns `None` when the file has no `@Controller` class.
pub fn extract_controller(src: &str) -> Option<Controller> {
    let scanner = Scanner::new(src);
    let classes = scanner.classes();
    let class = classes.iter().find(|c| c.has_decorator("Controller"))?;

    let base_route = class
        .decorator("Controller")
        .and_then(|d| d.first_string_arg().or_else(|| d.option_str("path")))
        .unwrap_or_default()
        .trim_matches('/')
        .to_string();

    let decorators = class
        .decorators
        .iter()
        .filter(|d| d.name != "Controller")
        .map(Decorator::render)
        .collect();

    let markers = markers(&scanner, class);
    let endpoints = markers
        .iter()
        .enumerate()
        .map(|(n, marker)| {
            let next_marker = markers.get(n + 1).map(|m| m.decorator.start);
            let window_end = window_end(&scanner, marker, next_marker);
            endpoint(&scanner, class, &base_route, marker, window_end)
        })
        .collect::<Vec<Endpoint>>();

    debug!(
        controller = %class.name,
        base_route = %base_route,
        endpoints = endpoints.len(),
        "controller extracted"
    );

    Some(Controller {
        name: class.name.clone(),
        base_route,
        decorators,
        endpoints,
        path: None,
    })
}

/// An HTTP-method marker inside a class body
struct Marker {
    method: HttpMethod,
    decorator: Decorator,
    /// Index of the first token after the marker
    next: usize,
}

fn markers(scanner: &Scanner<'_>, class: &ClassDecl) -> Vec<Marker> {
    let tokens = scanner.tokens();
    let mut markers = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::At || !class.body.contains(&token.start) {
            continue;
        }
        let Some(method) = tokens.get(i + 1).and_then(|t| {
            (t.kind == TokenKind::Ident)
                .then(|| HttpMethod::from_decorator(t.text))
                .flatten()
        }) else {
            continue;
        };
        if let Some((decorator, next)) = scanner.parse_decorator(i) {
            markers.push(Marker {
                method,
                decorator,
                next,
            });
        }
    }

    markers
}

/// Token index where the lookahead window of `marker` ends
fn window_end(scanner: &Scanner<'_>, marker: &Marker, next_marker: Option<usize>) -> usize {
    let tokens = scanner.tokens();
    let marker_end = marker
        .next
        .checked_sub(1)
        .and_then(|last| tokens.get(last))
        .map_or(marker.decorator.start, Token::end);

    let mut limit = marker_end.saturating_add(HANDLER_WINDOW);
    if let Some(next) = next_marker {
        limit = limit.min(next);
    }

    tokens
        .iter()
        .enumerate()
        .skip(marker.next)
        .find(|(_, t)| t.start >= limit)
        .map_or(tokens.len(), |(i, _)| i)
}

fn endpoint(
    scanner: &Scanner<'_>,
    class: &ClassDecl,
    base_route: &str,
    marker: &Marker,
    window_end: usize,
) -> Endpoint {
    let tokens = scanner.tokens();
    let route_arg = marker
        .decorator
        .first_string_arg()
        .or_else(|| marker.decorator.option_str("path"))
        .unwrap_or_default();
    let route = join_route(base_route, &route_arg);

    // a method that owns the marker inside the window is the handler
    let owner = owning_method(class, marker)
        .filter(|m| tokens.get(window_end).is_none_or(|t| m.start < t.start));
    let (handler_name, params) = match owner {
        Some(method) => (method.name.clone(), method.params.clone()),
        None => {
            let handler = resolve_handler(tokens, marker.next, window_end);
            let name = handler
                .and_then(|h| tokens.get(h))
                .map_or_else(|| UNKNOWN_HANDLER.to_string(), |t| t.text.to_string());
            if handler.is_none() {
                debug!(route = %route, "no handler found for marker");
            }
            let params = handler
                .map(|h| {
                    let open = h + 1;
                    let close = find_close(tokens, open).unwrap_or(tokens.len());
                    scanner.params(open, close)
                })
                .unwrap_or_default();
            (name, params)
        }
    };

    let run = decorator_run(scanner, class, marker);
    let status_code = run
        .iter()
        .find(|d| d.name == "HttpCode")
        .and_then(http_code);
    let decorators = run
        .iter()
        .filter(|d| HttpMethod::from_decorator(&d.name).is_none())
        .map(Decorator::render)
        .collect();

    let mut path_params = route_params(&route);
    for param in &params {
        let named = param
            .decorators
            .iter()
            .find(|d| d.name == "Param")
            .and_then(Decorator::first_string_arg);
        if let Some(name) = named {
            if !path_params.contains(&name) {
                path_params.push(name);
            }
        }
    }

    let mut query_params = Vec::new();
    let mut query_param_type_name = None;
    let mut body_dto_name = None;
    for param in &params {
        for decorator in &param.decorators {
            match decorator.name.as_str() {
                "Body" if decorator.first_string_arg().is_none() => {
                    body_dto_name = body_dto_name.or_else(|| type_name(param));
                }
                "Query" => match decorator.first_string_arg() {
                    Some(name) => query_params.push(name),
                    None => {
                        query_param_type_name = query_param_type_name.or_else(|| type_name(param))
                    }
                },
                _ => {}
            }
        }
    }

    Endpoint {
        http_method: marker.method,
        route,
        handler_name,
        path_params,
        query_param_type_name,
        query_params,
        body_dto_name,
        decorators,
        status_code,
    }
}

/// Decorators sharing the marker's run, including the marker itself
fn decorator_run(scanner: &Scanner<'_>, class: &ClassDecl, marker: &Marker) -> Vec<Decorator> {
    if let Some(method) = owning_method(class, marker) {
        return method.decorators.clone();
    }

    // no method owns the marker; take the decorators that directly follow it
    let mut run = vec![marker.decorator.clone()];
    let mut i = marker.next;
    while let Some((decorator, next)) = scanner.parse_decorator(i) {
        run.push(decorator);
        i = next;
    }
    run
}

/// Method whose decorator run contains the marker
fn owning_method<'c>(class: &'c ClassDecl, marker: &Marker) -> Option<&'c Method> {
    class.methods().find(|m| {
        m.decorators
            .iter()
            .any(|d| d.start == marker.decorator.start)
    })
}

/// Resolve the handler name token for a marker.
///
/// Searches tokens `from..to` and returns the index of the name token, which
/// is always followed by `(`.
pub fn resolve_handler(tokens: &[Token<'_>], from: usize, to: usize) -> Option<usize> {
    let to = to.min(tokens.len());
    let args = decorator_args(tokens, from, to);
    let candidates = || {
        (from..to).filter(|&i| is_call_name(tokens, i) && !args.iter().any(|span| span.contains(&i)))
    };

    let tier_async = candidates().find(|&i| {
        i > 0 && tokens[i - 1].is_ident("async") && has_binding_marker(tokens, i + 1)
    });
    if tier_async.is_some() {
        return tier_async;
    }

    let tier_binding = candidates().find(|&i| has_binding_marker(tokens, i + 1));
    if tier_binding.is_some() {
        return tier_binding;
    }

    candidates().next()
}

/// Token spans of decorator argument lists (`@UseGuards(AuthGuard('jwt'))`)
/// starting in `from..to`
fn decorator_args(tokens: &[Token<'_>], from: usize, to: usize) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut i = from;
    while i < to {
        if tokens[i].kind != TokenKind::At {
            i += 1;
            continue;
        }
        let mut name = i + 1;
        while tokens.get(name).is_some_and(|t| t.kind == TokenKind::Ident)
            && tokens.get(name + 1).is_some_and(|t| t.is_punct('.'))
        {
            name += 2;
        }
        let open = name + 1;
        let is_call = tokens.get(name).is_some_and(|t| t.kind == TokenKind::Ident)
            && tokens.get(open).is_some_and(|t| t.is_punct('('));
        if !is_call {
            i += 1;
            continue;
        }
        let close = find_close(tokens, open).unwrap_or(tokens.len());
        spans.push(open..close + 1);
        i = close + 1;
    }
    spans
}

/// `name(` not preceded by `.`, `=` or `@`, and not a keyword
fn is_call_name(tokens: &[Token<'_>], i: usize) -> bool {
    let Some(token) = tokens.get(i) else {
        return false;
    };
    if token.kind != TokenKind::Ident || CONTROL_FLOW.contains(&token.text) {
        return false;
    }
    if !tokens.get(i + 1).is_some_and(|t| t.is_punct('(')) {
        return false;
    }
    let preceded_by_access = i
        .checked_sub(1)
        .and_then(|p| tokens.get(p))
        .is_some_and(|p| p.is_punct('.') || p.is_punct('=') || p.kind == TokenKind::At);
    !preceded_by_access
}

/// Whether the argument list opened at `open` contains a binding marker
fn has_binding_marker(tokens: &[Token<'_>], open: usize) -> bool {
    let close = find_close(tokens, open).unwrap_or(tokens.len());
    tokens
        .get(open..close)
        .unwrap_or_default()
        .windows(2)
        .any(|w| {
            w[0].kind == TokenKind::At
                && w[1].kind == TokenKind::Ident
                && (BINDING_MARKERS.contains(&w[1].text) || w[1].text.starts_with("Upload"))
        })
}

/// `/` + base + `/` + route with duplicate slashes collapsed.
///
/// A trailing slash is dropped unless the whole route is `/`.
pub fn join_route(base: &str, route: &str) -> String {
    let joined = format!("/{base}/{route}");
    let collapsed = DUPLICATE_SLASHES.replace_all(&joined, "/");
    match collapsed.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => collapsed.into_owned(),
    }
}

/// `:name` segments of a route, in order
pub fn route_params(route: &str) -> Vec<String> {
    ROUTE_PARAM
        .captures_iter(route)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Named type of a bound parameter: `CreateReviewDto`, not `string` or `{ ... }`
fn type_name(param: &Param) -> Option<String> {
    let ty = param.type_text.trim();
    let ty = ty.strip_suffix("[]").unwrap_or(ty);
    let starts_upper = ty.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    let is_ident = ty.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    (starts_upper && is_ident).then(|| ty.to_string())
}

fn http_code(decorator: &Decorator) -> Option<u16> {
    if let Some(code) = decorator.first_number_arg() {
        return u16::try_from(code).ok();
    }
    let args = decorator.args.as_deref()?.trim();
    let constant = args.strip_prefix("HttpStatus.")?;
    Some(match constant {
        "OK" => 200,
        "CREATED" => 201,
        "ACCEPTED" => 202,
        "NO_CONTENT" => 204,
        "MOVED_PERMANENTLY" => 301,
        "FOUND" => 302,
        "BAD_REQUEST" => 400,
        "UNAUTHORIZED" => 401,
        "FORBIDDEN" => 403,
        "NOT_FOUND" => 404,
        "CONFLICT" => 409,
        _ => return None,
    })
}

#[cfg(test)]
#[path = "controller/controller_tests.rs"]
mod controller_tests;
