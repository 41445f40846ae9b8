//! Identifier-to-database naming transform.
//!
//! Converts PascalCase / camelCase Rust identifiers into lowercase,
//! underscore-separated database identifiers, splitting acronym boundaries
//! (`HTTPServer` -> `http_server`), and pluralizes table names by appending
//! a trailing `s`.

/// Convert an identifier to snake_case.
///
/// An underscore is inserted before a character when:
/// - it is uppercase and the immediately preceding character is lowercase, or
/// - it is uppercase, the immediately following character is lowercase, and
///   at least one character has already been emitted.
pub(crate) fn to_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (idx, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && !out.is_empty() {
            let after_lower = chars[idx - 1].is_lowercase();
            let before_lower = chars.get(idx + 1).is_some_and(|n| n.is_lowercase());
            if after_lower || before_lower {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// Derive a table name from a type name: snake_case plus a trailing `s`.
///
/// Pluralization is naive (no irregular plurals).
pub(crate) fn table_name(type_name: &str) -> String {
    let mut name = to_snake_case(type_name);
    name.push('s');
    name
}
