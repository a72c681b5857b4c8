//! Evaluation error taxonomy and factory constructors.
//!
//! One struct covers every evaluation-phase failure; the [`EvalErrorKind`]
//! distinguishes expected user errors (an unresolved symbol, a failed cast)
//! from broken engine invariants ([`EvalErrorKind::Internal`]), which signal
//! an engine bug, not user error. Prefer the factory functions over
//! hand-writing messages so wording stays in one place.

use std::fmt;

use subjekt_diagnostic::Diagnostic;
use subjekt_ir::{BinaryOp, Span, UnaryOp, ValueType};

use crate::Value;

/// Structured error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Unresolvable parameter/macro/function/slice reference.
    SymbolNotFound {
        name: String,
        /// Arity for call references; `None` for parameters and slices.
        arity: Option<usize>,
    },
    /// Failed cast, type-hint mismatch, or incompatible comparison.
    Type,
    /// Integer division/modulo by zero, overflow, or a zero slice step.
    Arithmetic,
    /// Normalized single-subscript index out of range.
    IndexOutOfBounds,
    /// Operator applied to operand kinds it does not support.
    Unsupported,
    /// Broken engine invariant; a bug in the engine, not in user input.
    Internal,
}

/// Evaluation error.
///
/// Synchronous and scoped to one context/one expression resolution; the
/// engine never retries and never recovers internally.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
    pub span: Option<Span>,
}

/// Result alias for evaluation-phase functions.
pub type EvalResult = Result<Value, EvalError>;

impl EvalError {
    /// Create an error from a kind and message.
    pub fn new(kind: EvalErrorKind, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            message: message.into(),
            span: None,
        }
    }

    /// Attach the source position where the error occurred.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Whether this error marks a broken engine invariant.
    pub fn is_internal(&self) -> bool {
        self.kind == EvalErrorKind::Internal
    }

    /// Convert to an error diagnostic for report-and-continue callers.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.message.clone());
        match self.span {
            Some(span) => diag.with_span(span),
            None => diag,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{} (at {})", self.message, span),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for EvalError {}

// Factory constructors

/// Unresolvable symbol reference. `arity` is set for call references.
pub fn symbol_not_found(name: impl Into<String>, arity: Option<usize>) -> EvalError {
    let name = name.into();
    let message = match arity {
        Some(arity) => format!("unresolved call `{name}` with {arity} argument(s)"),
        None => format!("unresolved symbol `{name}`"),
    };
    EvalError::new(EvalErrorKind::SymbolNotFound { name, arity }, message)
}

/// Integer division by zero.
pub fn division_by_zero() -> EvalError {
    EvalError::new(EvalErrorKind::Arithmetic, "division by zero")
}

/// Integer modulo by zero.
pub fn modulo_by_zero() -> EvalError {
    EvalError::new(EvalErrorKind::Arithmetic, "modulo by zero")
}

/// Integer overflow in the named operation.
pub fn integer_overflow(op: &str) -> EvalError {
    EvalError::new(EvalErrorKind::Arithmetic, format!("integer overflow in {op}"))
}

/// Zero slice step.
pub fn zero_slice_step() -> EvalError {
    EvalError::new(EvalErrorKind::Arithmetic, "slice step cannot be zero")
}

/// Failed value cast.
pub fn cast_failed(value: &Value, target: ValueType) -> EvalError {
    EvalError::new(
        EvalErrorKind::Type,
        format!(
            "cannot cast {} `{value}` to {}",
            value.type_name(),
            target.name()
        ),
    )
}

/// Generic type error with a pre-built message.
pub fn type_error(message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::Type, message)
}

/// Ordering comparison between incompatible kinds.
pub fn incomparable(left: &Value, right: &Value) -> EvalError {
    EvalError::new(
        EvalErrorKind::Type,
        format!(
            "cannot compare {} with {}",
            left.type_name(),
            right.type_name()
        ),
    )
}

/// Binary operator applied to operand kinds it does not support.
pub fn unsupported_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::new(
        EvalErrorKind::Unsupported,
        format!(
            "operator `{}` not supported between {} and {}",
            op.as_symbol(),
            left.type_name(),
            right.type_name()
        ),
    )
}

/// Unary operator applied to a non-numeric operand.
pub fn non_numeric_unary(op: UnaryOp, operand: &Value) -> EvalError {
    EvalError::new(
        EvalErrorKind::Unsupported,
        format!(
            "unary `{}` requires a numeric operand, got {}",
            op.as_symbol(),
            operand.type_name()
        ),
    )
}

/// Single-subscript index out of range after normalization.
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::new(
        EvalErrorKind::IndexOutOfBounds,
        format!("index {index} out of bounds for {len} value(s)"),
    )
}

/// Broken engine invariant.
pub fn internal(message: impl Into<String>) -> EvalError {
    let message = message.into();
    EvalError::new(
        EvalErrorKind::Internal,
        format!("internal engine error: {message}"),
    )
}
