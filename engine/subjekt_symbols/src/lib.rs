//! Value system and symbol model for the Subjekt expression engine.
//!
//! This crate holds everything that exists independently of any single
//! expression evaluation:
//! - [`Value`], the tagged scalar with its casting and comparison laws
//! - the declared symbols ([`Parameter`], [`Macro`], [`SubjektFunction`])
//!   and the immutable [`SymbolTable`] cataloguing them
//! - [`Context`], one concrete binding of every referenced symbol, plus the
//!   [`DefinedParameter`]/[`DefinedMacro`] bound choices inside it
//! - [`Resolvable`], a template pre-scanned into a formattable skeleton and
//!   pre-parsed expression slots
//! - [`ResolvableSymbol`], the discovery-time symbol references
//! - the [`EvalError`] taxonomy shared by evaluation-phase code
//!
//! Everything here is declared once and outlives every [`Context`]; contexts
//! are created purely, consumed by one evaluation pass, then discarded.

mod context;
mod errors;
mod resolvable;
mod resolvable_symbol;
mod symbol;
mod table;
mod value;

pub use context::{Context, DefinedMacro, DefinedParameter};
pub use errors::{
    cast_failed, division_by_zero, incomparable, index_out_of_bounds, integer_overflow, internal,
    modulo_by_zero, non_numeric_unary, symbol_not_found, type_error, unsupported_binary,
    zero_slice_step, EvalError, EvalErrorKind, EvalResult,
};
pub use resolvable::{Resolvable, TemplateDelimiters};
pub use resolvable_symbol::ResolvableSymbol;
pub use symbol::{Macro, Parameter, SubjektFunction};
pub use table::SymbolTable;
pub use value::Value;
