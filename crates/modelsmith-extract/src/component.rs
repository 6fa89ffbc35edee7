//! Frontend component and hook extraction.
//!
//! Recognized declarations:
//!
//! - `export function Name(...)` and `export default function Name(...)`
//! - `export const Name = (...) => ...`, optionally typed (`: FC<NameProps>`)
//!
//! PascalCase names are components; their props come from
//! `interface NameProps { ... }` or `type NameProps = { ... }` in the same file,
//! or from the type annotating the first parameter. Names of the form
//! `useSomething` are hooks, and a hook's props are its parameters.

use crate::lexer::{Token, TokenKind, find_close};
use crate::scanner::{Member, Param, Scanner};
use modelsmith_core::model::{Component, ComponentKind, Prop};

/// Extract the first component or hook exported by a file.
pub fn extract_component(src: &str) -> Option<Component> {
    extract_components(src).into_iter().next()
}

/// Extract every exported component and hook of a file, in source order.
pub fn extract_components(src: &str) -> Vec<Component> {
    let scanner = Scanner::new(src);
    let tokens = scanner.tokens();
    let mut components = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if !token.is_ident("export") {
            continue;
        }
        let Some(decl) = declaration(tokens, i + 1) else {
            continue;
        };
        let Some(kind) = kind_of(decl.name) else {
            continue;
        };

        let params = decl
            .params_open
            .map(|open| {
                let close = find_close(tokens, open).unwrap_or(tokens.len());
                scanner.params(open, close)
            })
            .unwrap_or_default();

        let props = match kind {
            ComponentKind::Hook => params.iter().map(param_prop).collect(),
            ComponentKind::Component => {
                component_props(&scanner, decl.name, decl.annotation, &params)
            }
        };

        components.push(Component {
            name: decl.name.to_string(),
            kind,
            props,
            path: None,
        });
    }

    components
}

struct Declaration<'a> {
    name: &'a str,
    /// Generic argument of a `const` annotation: `FC<ButtonProps>` → `ButtonProps`
    annotation: Option<&'a str>,
    /// Index of the `(` opening the parameter list
    params_open: Option<usize>,
}

/// Parse the declaration that follows an `export` keyword at `from`
fn declaration<'a>(tokens: &[Token<'a>], from: usize) -> Option<Declaration<'a>> {
    let mut i = from;
    if tokens.get(i)?.is_ident("default") {
        i += 1;
    }
    if tokens.get(i)?.is_ident("async") {
        i += 1;
    }

    let keyword = tokens.get(i)?;
    let name = tokens.get(i + 1).filter(|t| t.kind == TokenKind::Ident)?;

    if keyword.is_ident("function") {
        let open = i + 2;
        let params_open = tokens.get(open).filter(|t| t.is_punct('(')).map(|_| open);
        return Some(Declaration {
            name: name.text,
            annotation: None,
            params_open,
        });
    }

    if !keyword.is_ident("const") {
        return None;
    }

    let mut j = i + 2;
    let mut annotation = None;
    if tokens.get(j).is_some_and(|t| t.is_punct(':')) {
        while let Some(t) = tokens.get(j) {
            if t.is_punct('=') {
                break;
            }
            if t.is_punct('<') {
                annotation = tokens
                    .get(j + 1)
                    .filter(|n| n.kind == TokenKind::Ident)
                    .map(|n| n.text);
            }
            j += 1;
        }
    }
    if !tokens.get(j).is_some_and(|t| t.is_punct('=')) {
        return None;
    }

    // look through `async`, `function Name` and wrappers like `memo(` or `React.forwardRef(`
    let mut k = j + 1;
    let mut params_open = None;
    for _ in 0..8 {
        let Some(t) = tokens.get(k) else { break };
        if t.is_punct('(') {
            params_open = Some(k);
            break;
        }
        if t.kind != TokenKind::Ident {
            break;
        }
        let next = tokens.get(k + 1);
        if next.is_some_and(|n| n.is_punct('.')) {
            k += 2;
        } else if next.is_some_and(|n| n.is_punct('(')) && wraps_function(tokens, k + 2) {
            k += 2;
        } else {
            k += 1;
        }
    }

    Some(Declaration {
        name: name.text,
        annotation,
        params_open,
    })
}

/// Whether the argument at `i` starts a function (`(props) =>`, `function`, `async`)
fn wraps_function(tokens: &[Token<'_>], i: usize) -> bool {
    tokens
        .get(i)
        .is_some_and(|t| t.is_punct('(') || t.is_ident("function") || t.is_ident("async"))
}

fn kind_of(name: &str) -> Option<ComponentKind> {
    let first = name.chars().next()?;
    if let Some(rest) = name.strip_prefix("use") {
        if rest.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            return Some(ComponentKind::Hook);
        }
    }
    // PascalCase, not a SCREAMING_CASE constant
    let pascal = first.is_ascii_uppercase()
        && name.chars().any(|c| c.is_ascii_lowercase())
        && !name.contains('_');
    pascal.then_some(ComponentKind::Component)
}

fn param_prop(param: &Param) -> Prop {
    Prop {
        name: param.name.clone(),
        ty: param.type_text.clone(),
        optional: param.optional,
    }
}

fn component_props(
    scanner: &Scanner<'_>,
    name: &str,
    annotation: Option<&str>,
    params: &[Param],
) -> Vec<Prop> {
    let conventional = format!("{name}Props");
    let param_type = params
        .first()
        .map(|p| p.type_text.as_str())
        .filter(|ty| !ty.is_empty() && ty.chars().all(|c| c.is_alphanumeric() || c == '_'));

    let members = [Some(conventional.as_str()), annotation, param_type]
        .into_iter()
        .flatten()
        .find_map(|ty| scanner.object_type(ty))
        .unwrap_or_default();

    members
        .into_iter()
        .map(|member| match member {
            Member::Property(p) => Prop {
                name: p.name,
                ty: p.type_text,
                optional: p.optional,
            },
            Member::Method(m) => Prop {
                name: m.name,
                ty: "function".to_string(),
                optional: false,
            },
        })
        .collect()
}
