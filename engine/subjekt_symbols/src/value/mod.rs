//! Runtime values.
//!
//! `Value` is the tagged scalar flowing through every evaluation: four
//! concrete kinds plus an opaque object kind for values produced by
//! registered functions. Casting, equality and ordering laws live here;
//! binary arithmetic dispatch lives with the evaluator.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use subjekt_ir::ValueType;

use crate::errors::{cast_failed, incomparable, integer_overflow, EvalError, EvalResult};

/// A tagged scalar value.
#[derive(Clone)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Opaque value produced by a registered function. Compares equal only
    /// to itself (same allocation); casts always fail.
    Object(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Create an integer value.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// Create a float value.
    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create an opaque object value.
    #[inline]
    pub fn object(value: impl Any + Send + Sync) -> Self {
        Value::Object(Arc::new(value))
    }

    /// The type tag of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Str(_) => ValueType::String,
            Value::Int(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::Bool(_) => ValueType::Boolean,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Display name of this value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    /// Cast to another scalar kind.
    ///
    /// Parses/reformats across String/Int/Float/Boolean. Boolean parsing
    /// from String is strict (`"true"`/`"false"` only); Float→Integer
    /// truncates; numeric↔Boolean casts fail. Failure is a type error.
    pub fn cast(&self, target: ValueType) -> EvalResult {
        match (self, target) {
            // Identity casts
            (Value::Str(_) | Value::Int(_) | Value::Float(_) | Value::Bool(_), t)
                if self.value_type() == t =>
            {
                Ok(self.clone())
            }

            (Value::Int(n), ValueType::String) => Ok(Value::string(n.to_string())),
            (Value::Int(n), ValueType::Float) => {
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "Int→Float cast is lossy by definition"
                )]
                let f = *n as f64;
                Ok(Value::Float(f))
            }

            (Value::Float(f), ValueType::String) => Ok(Value::string(f.to_string())),
            (Value::Float(f), ValueType::Integer) if f.is_finite() => {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "Float→Int cast truncates by definition"
                )]
                let n = f.trunc() as i64;
                Ok(Value::Int(n))
            }
            (Value::Float(_), ValueType::Integer) => Err(cast_failed(self, target)),

            (Value::Bool(b), ValueType::String) => Ok(Value::string(if *b {
                "true"
            } else {
                "false"
            })),

            (Value::Str(s), ValueType::Integer) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| cast_failed(self, target)),
            (Value::Str(s), ValueType::Float) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| cast_failed(self, target)),
            (Value::Str(s), ValueType::Boolean) => match s.as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(cast_failed(self, target)),
            },

            _ => Err(cast_failed(self, target)),
        }
    }

    /// Ordering comparison.
    ///
    /// Numeric kinds compare through Float; strings compare
    /// lexicographically; booleans order `false < true`. Any other pairing
    /// fails with a type error (unlike `eq`, which returns `false`).
    pub fn try_compare(&self, other: &Value) -> Result<Ordering, EvalError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
            _ => {
                let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) else {
                    return Err(incomparable(self, other));
                };
                a.partial_cmp(&b).ok_or_else(|| incomparable(self, other))
            }
        }
    }

    /// Unary minus. Numeric-only; integer negation is checked.
    pub fn neg(&self) -> EvalResult {
        match self {
            Value::Int(n) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("negation")),
            Value::Float(f) => Ok(Value::Float(-f)),
            _ => Err(crate::errors::non_numeric_unary(
                subjekt_ir::UnaryOp::Neg,
                self,
            )),
        }
    }

    /// Numeric view of this value, if it has one.
    #[expect(
        clippy::cast_precision_loss,
        reason = "numeric normalization through Float is lossy by definition"
    )]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// Equality normalizes numeric kinds to Float before comparing; String only
/// equals String; Boolean only equals Boolean; heterogeneous comparisons are
/// `false`, not an error.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                match (self.as_f64(), other.as_f64()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Object(_) => f.write_str("<object>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Object(_) => f.write_str("Object(<opaque>)"),
        }
    }
}
