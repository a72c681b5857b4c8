//! Parse error type.

use std::fmt;

use subjekt_diagnostic::Diagnostic;
use subjekt_ir::{Span, Token};
use subjekt_lexer::LexError;

/// Error produced while parsing an expression source.
///
/// Positional: the span points at the offending token (or character, for
/// lexer-level failures).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    /// Error for an unexpected token.
    pub(crate) fn unexpected(expected: &str, found: Token) -> Self {
        ParseError::new(
            format!("expected {expected}, found {}", found.kind.describe()),
            found.span,
        )
    }

    /// Wrap a lexer error.
    pub(crate) fn from_lex(err: LexError) -> Self {
        ParseError::new(err.message, err.span)
    }

    /// Convert to an error diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.message.clone()).with_span(self.span)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.message, self.span)
    }
}

impl std::error::Error for ParseError {}
