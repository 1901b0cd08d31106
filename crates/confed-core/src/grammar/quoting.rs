//! Quoted-string helpers.
//!
//! Quoting matters twice: once while parsing (a quoted value may contain
//! characters the bare value class forbids) and once while replacing (a value
//! that was quoted keeps its quote characters).

use super::config::GrammarConfig;

/// Returns the quote character if `text` is a complete `"..."` or `'...'` string.
pub fn quote_char(text: &str) -> Option<char> {
    let first = text.chars().next()?;
    if (first == '"' || first == '\'') && text.len() >= 2 && text.ends_with(first) {
        Some(first)
    } else {
        None
    }
}

/// Strips one pair of enclosing quotes, if present.
pub fn unquote(text: &str) -> &str {
    match quote_char(text) {
        Some(_) => &text[1..text.len() - 1],
        None => text,
    }
}

/// Renders `value` so that it parses back as a single value token.
///
/// Values made only of legal value characters are returned unchanged, as are
/// values that already arrive quoted.  Anything else is wrapped in double
/// quotes, or single quotes when the value itself contains a double quote.
/// A value holding both quote characters is double-quoted with its double
/// quotes backslash-escaped.
pub fn quote_if_needed(value: &str, config: &GrammarConfig) -> String {
    let bare_ok = !value.is_empty()
        && value.chars().all(|c| config.is_value_char(c))
        && value.trim() == value;
    if bare_ok || quote_char(value).is_some() {
        return value.to_string();
    }
    match (value.contains('"'), value.contains('\'')) {
        (true, false) => format!("'{value}'"),
        (true, true) => format!("\"{}\"", value.replace('"', "\\\"")),
        _ => format!("\"{value}\""),
    }
}
