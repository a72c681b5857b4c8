//! Declared symbols: parameters, macros, and registered functions.

use std::fmt;
use std::sync::Arc;

use crate::errors::EvalResult;
use crate::{Resolvable, Value};

/// A declared parameter: an identifier and its ordered, immutable values.
///
/// Each value is one entry on the parameter's combinatorial axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub id: String,
    pub values: Vec<Value>,
}

impl Parameter {
    /// Declare a parameter.
    pub fn new(id: impl Into<String>, values: Vec<Value>) -> Self {
        Parameter {
            id: id.into(),
            values,
        }
    }
}

/// A declared macro: an identifier, its argument identifiers, and one or
/// more template bodies (overloads).
///
/// Identity is `(id, arg_count)`: two macros with the same id but different
/// arity are distinct symbols. Each body is one entry on the macro's
/// combinatorial axis.
#[derive(Clone, Debug)]
pub struct Macro {
    pub id: String,
    pub args: Vec<String>,
    pub bodies: Vec<Resolvable>,
}

impl Macro {
    /// Declare a macro.
    pub fn new(id: impl Into<String>, args: Vec<String>, bodies: Vec<Resolvable>) -> Self {
        Macro {
            id: id.into(),
            args,
            bodies,
        }
    }

    /// Number of arguments; half of this macro's identity.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

/// A registered function: an identifier and a pure `&[Value] -> Value`.
///
/// Functions are registered programmatically only, never deserialized, and
/// contribute identically to every context instead of multiplying the
/// permutation product.
#[derive(Clone)]
pub struct SubjektFunction {
    id: String,
    run: Arc<dyn Fn(&[Value]) -> EvalResult + Send + Sync>,
}

impl SubjektFunction {
    /// Register a function under an identifier.
    pub fn new(
        id: impl Into<String>,
        run: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        SubjektFunction {
            id: id.into(),
            run: Arc::new(run),
        }
    }

    /// The function's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Invoke with already-evaluated argument values.
    pub fn call(&self, args: &[Value]) -> EvalResult {
        (self.run)(args)
    }
}

impl fmt::Debug for SubjektFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubjektFunction")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn macro_identity_is_id_and_arity() {
        let m = Macro::new("m", vec!["x".to_owned(), "y".to_owned()], vec![]);
        assert_eq!(m.arg_count(), 2);
    }

    #[test]
    fn functions_run_on_evaluated_values() {
        let double = SubjektFunction::new("double", |args| {
            let Some(Value::Int(n)) = args.first() else {
                return Err(crate::type_error("double expects one integer"));
            };
            Ok(Value::int(n * 2))
        });
        assert_eq!(double.id(), "double");
        assert_eq!(double.call(&[Value::int(21)]).unwrap(), Value::int(42));
        assert!(double.call(&[Value::string("x")]).is_err());
    }
}
