//! Type inference error.

use std::fmt;

use subjekt_diagnostic::Diagnostic;
use subjekt_ir::{Span, ValueType};

/// Error produced by the type inference pass: a failed hint check, an
/// unbound identifier, or a non-constant slice bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeError {
    pub message: String,
    pub span: Option<Span>,
}

impl TypeError {
    /// Create a type error.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        TypeError {
            message: message.into(),
            span: Some(span),
        }
    }

    /// A parameter whose bound type contradicts the active hint.
    pub(crate) fn hint_mismatch(
        parameter: &str,
        expected: ValueType,
        found: ValueType,
        span: Span,
    ) -> Self {
        TypeError::new(
            format!(
                "parameter `{parameter}` is {} where {} was expected",
                found.name(),
                expected.name()
            ),
            span,
        )
    }

    /// An identifier with no binding in the context.
    pub(crate) fn unbound(name: &str, span: Span) -> Self {
        TypeError::new(format!("parameter `{name}` is not bound in this context"), span)
    }

    /// Convert to an error diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.message.clone());
        match self.span {
            Some(span) => diag.with_span(span),
            None => diag,
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{} (at {})", self.message, span),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for TypeError {}
