//! Discovery-time symbol references.
//!
//! These exist before any context does: discovery walks parsed expressions
//! and records what they reference, the permutation engine resolves each
//! reference against the symbol table and expands it into an axis.

use std::fmt::Write as _;

/// A symbol reference found in a template expression.
///
/// Slice and index bounds are stored already const-folded to integers, so a
/// reference is a pure description independent of any context.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolvableSymbol {
    /// Bare identifier referencing a declared parameter.
    Parameter(String),
    /// Call referencing a macro `(name, arg_count)` or a registered
    /// function `name`.
    Call { name: String, arg_count: usize },
    /// Qualified call `module.name(...)`; module separation is a naming
    /// convention over the same symbol space.
    QualifiedCall {
        module: String,
        name: String,
        arg_count: usize,
    },
    /// Range subscript over a declared parameter's values.
    Slice {
        parameter: String,
        start: Option<i64>,
        end: Option<i64>,
        step: i64,
    },
    /// Single subscript over a declared parameter's values.
    Index { parameter: String, index: i64 },
}

impl ResolvableSymbol {
    /// Stable axis key for parameter-like symbols.
    ///
    /// The key is a deterministic function of the reference, so repeated
    /// identical slices collapse to one axis instead of multiplying the
    /// permutation product. Calls have no axis key of their own: macro axes
    /// are keyed by `(id, arg_count)` and functions contribute no axis.
    pub fn axis_key(&self) -> Option<String> {
        match self {
            ResolvableSymbol::Parameter(id) => Some(id.clone()),
            ResolvableSymbol::Slice {
                parameter,
                start,
                end,
                step,
            } => {
                let mut key = String::with_capacity(parameter.len() + 8);
                key.push_str(parameter);
                key.push('[');
                if let Some(start) = start {
                    let _ = write!(key, "{start}");
                }
                key.push(':');
                if let Some(end) = end {
                    let _ = write!(key, "{end}");
                }
                key.push(':');
                let _ = write!(key, "{step}");
                key.push(']');
                Some(key)
            }
            ResolvableSymbol::Index { parameter, index } => Some(format!("{parameter}[{index}]")),
            ResolvableSymbol::Call { .. } | ResolvableSymbol::QualifiedCall { .. } => None,
        }
    }

    /// The fully-qualified call name, joining module and member for
    /// qualified calls.
    pub fn call_name(&self) -> Option<String> {
        match self {
            ResolvableSymbol::Call { name, .. } => Some(name.clone()),
            ResolvableSymbol::QualifiedCall { module, name, .. } => {
                Some(format!("{module}.{name}"))
            }
            _ => None,
        }
    }
}
