//! Registration of generated modules in the application module.
//!
//! Two text insertions, both required:
//!
//! 1. the import line, on the line after the configured anchor import
//! 2. the module class, at the start of the first `imports: [` array
//!
//! Registration is best-effort. Every way it can fail is a [`Registration`]
//! variant; the caller turns those into soft warnings.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

#[allow(clippy::expect_used)]
static IMPORTS_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bimports\s*:\s*\[").expect("imports array regex should be valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// New content of the application module
    Registered(String),
    AlreadyRegistered,
    AnchorNotFound,
    ImportsArrayNotFound,
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Registration::Registered(_) => "registered",
            Registration::AlreadyRegistered => "module is already registered",
            Registration::AnchorNotFound => "anchor import not found",
            Registration::ImportsArrayNotFound => "no `imports: [` array found",
        })
    }
}

/// Compute the registered form of `source`.
pub fn register_module(source: &str, anchor: &str, class_name: &str, import_line: &str) -> Registration {
    if contains_word(source, class_name) {
        return Registration::AlreadyRegistered;
    }

    let Some(anchor_start) = source.find(anchor) else {
        return Registration::AnchorNotFound;
    };
    let anchor_end = anchor_start + anchor.len();
    let import_at = source[anchor_end..]
        .find('\n')
        .map_or(source.len(), |i| anchor_end + i + 1);

    let Some(array) = IMPORTS_ARRAY
        .find_iter(source)
        .find(|m| m.start() >= import_at)
    else {
        return Registration::ImportsArrayNotFound;
    };

    let line_start = source[..array.start()].rfind('\n').map_or(0, |i| i + 1);
    let indent: String = source[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();

    let mut out = String::with_capacity(source.len() + import_line.len() + class_name.len() + 16);
    out.push_str(&source[..import_at]);
    out.push_str(import_line);
    out.push('\n');
    out.push_str(&source[import_at..array.end()]);
    out.push_str(&format!("\n{indent}  {class_name},"));
    out.push_str(&source[array.end()..]);

    Registration::Registered(out)
}

/// Whether `word` occurs in `source` delimited by non-identifier characters
fn contains_word(source: &str, word: &str) -> bool {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$';
    source.match_indices(word).any(|(i, _)| {
        let before = source[..i].chars().next_back();
        let after = source[i + word.len()..].chars().next();
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    })
}
