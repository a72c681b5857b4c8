//! Literal cooking helpers.
//!
//! Numeric literal text may contain `_` separators and interior whitespace;
//! both are stripped before parsing. String literal text arrives with its
//! surrounding quotes and raw `\"` / `\'` escape sequences.

use subjekt_ir::Span;

use crate::LexError;

/// Strip `_` separators and whitespace from numeric literal text.
fn normalize_number(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .collect()
}

/// Parse integer literal text.
pub(crate) fn parse_int_literal(text: &str, span: Span) -> Result<i64, LexError> {
    normalize_number(text)
        .parse::<i64>()
        .map_err(|_| LexError::new(format!("integer literal `{text}` out of range"), span))
}

/// Parse float literal text.
pub(crate) fn parse_float_literal(text: &str, span: Span) -> Result<f64, LexError> {
    normalize_number(text)
        .parse::<f64>()
        .map_err(|_| LexError::new(format!("malformed float literal `{text}`"), span))
}

/// Cook a quoted string literal: drop the surrounding quotes and process
/// `\"` and `\'` escapes. Any other backslash sequence is kept literally.
pub(crate) fn cook_string(text: &str) -> String {
    let inner = &text[1..text.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(q @ ('"' | '\'')) => out.push(q),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
