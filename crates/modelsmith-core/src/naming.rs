//! Naming convention utilities for code generation.
//!
//! All conversions are pure functions of their input.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `order-item`, `order_item`, `orderItem` | [`to_pascal_case`] | `OrderItem` |
//! | `OrderItem` | [`to_camel_case`] | `orderItem` |
//! | `OrderItem` | [`to_kebab_case`] | `order-item` |
//! | `OrderItem` | [`to_snake_case`] | `order_item` |
//! | `OrderItem` | [`route_segment`] | `order-items` |
//! | `category` | [`pluralize`] | `categories` |
//! | `Review` | [`table_name`] | `reviews` |

use crate::error::{ModelsmithError, ModelsmithResult};

/// Split an identifier into words on `-`, `_`, whitespace and case humps.
///
/// ```
/// use modelsmith_core::naming::words;
///
/// assert_eq!(words("orderItem"), vec!["order", "Item"]);
/// assert_eq!(words("HTTPServer"), vec!["HTTP", "Server"]);
/// assert_eq!(words("order-item_v2"), vec!["order", "item", "v2"]);
/// ```
pub fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '_' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // "orderItem" splits before I; "HTTPServer" splits before the S
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use modelsmith_core::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

fn title_word(word: &str) -> String {
    capitalize(&word.to_lowercase())
}

/// Convert a name to PascalCase (class names).
///
/// ```
/// use modelsmith_core::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("order-item"), "OrderItem");
/// assert_eq!(to_pascal_case("OrderItem"), "OrderItem");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    words(s).iter().map(|w| title_word(w)).collect()
}

/// Convert a name to camelCase (variable and property names).
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Convert a name to kebab-case (file and folder names).
pub fn to_kebab_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Convert a name to snake_case (database column names).
pub fn to_snake_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// English pluralization by suffix rules.
///
/// ```
/// use modelsmith_core::naming::pluralize;
///
/// assert_eq!(pluralize("review"), "reviews");
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("day"), "days");
/// assert_eq!(pluralize("address"), "addresses");
/// ```
pub fn pluralize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    let lower = s.to_lowercase();
    if let Some(stem) = s.strip_suffix('y') {
        let before_y = stem.chars().last();
        if before_y.is_some_and(|c| !"aeiouAEIOU".contains(c)) {
            return format!("{stem}ies");
        }
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{s}es");
    }
    format!("{s}s")
}

/// Inverse of [`pluralize`] for the same suffix rules.
///
/// ```
/// use modelsmith_core::naming::singularize;
///
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("addresses"), "address");
/// assert_eq!(singularize("reviews"), "review");
/// assert_eq!(singularize("status"), "status");
/// ```
pub fn singularize(s: &str) -> String {
    let lower = s.to_lowercase();
    if let Some(stem) = s.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["sses", "xes", "zes", "ches", "shes"] {
        if lower.ends_with(suffix) {
            return s.get(..s.len() - 2).unwrap_or(s).to_string();
        }
    }
    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return s.to_string();
    }
    match s.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => s.to_string(),
    }
}

/// Plural kebab-case route segment and module folder name for an entity.
pub fn route_segment(entity: &str) -> String {
    pluralize(&to_kebab_case(entity))
}

/// Default table name: the pluralized lowercase entity name.
pub fn table_name(entity: &str) -> String {
    pluralize(&entity.to_lowercase())
}

/// Validate a user-supplied resource name and return it in PascalCase.
///
/// Accepts letters, digits, `-` and `_`, starting with a letter.
pub fn resource_name(raw: &str) -> ModelsmithResult<String> {
    let trimmed = raw.trim();
    let starts_with_letter = trimmed.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !starts_with_letter || !valid_chars {
        return Err(ModelsmithError::InvalidName(format!(
            "'{raw}' must start with a letter and contain only letters, digits, '-' or '_'"
        )));
    }

    Ok(to_pascal_case(trimmed))
}
