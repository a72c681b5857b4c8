//! Umbrella error over the engine phases.

use std::fmt;

use subjekt_parse::ParseError;
use subjekt_symbols::EvalError;
use subjekt_types::TypeError;

/// Any failure from the compile-discover-enumerate-resolve pipeline.
///
/// Each variant is scoped to one phase; callers decide whether to abort,
/// skip the offending context, or report and continue.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    Parse(ParseError),
    Type(TypeError),
    Eval(EvalError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Parse(err) => write!(f, "parse error: {err}"),
            EngineError::Type(err) => write!(f, "type error: {err}"),
            EngineError::Eval(err) => write!(f, "evaluation error: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Parse(err) => Some(err),
            EngineError::Type(err) => Some(err),
            EngineError::Eval(err) => Some(err),
        }
    }
}

impl From<ParseError> for EngineError {
    fn from(err: ParseError) -> Self {
        EngineError::Parse(err)
    }
}

impl From<TypeError> for EngineError {
    fn from(err: TypeError) -> Self {
        EngineError::Type(err)
    }
}

impl From<EvalError> for EngineError {
    fn from(err: EvalError) -> Self {
        EngineError::Eval(err)
    }
}
