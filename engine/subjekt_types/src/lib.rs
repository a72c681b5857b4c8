//! Type inference for the Subjekt expression engine.
//!
//! One pass per `(tree, context)` pair threads an expected-type hint
//! downward (casts push their target, slice bounds expect Integer) while
//! inferring types bottom-up into a [`TypeMap`] parallel to the arena. The
//! tree itself stays immutable; evaluation trusts the map and never
//! re-infers.
//!
//! The restricted integer-only const evaluator for slice bounds also lives
//! here: bound expressions are checked and folded at this stage, before any
//! context exists.

mod bounds;
mod error;
mod infer;
mod type_map;

pub use bounds::{const_int_bound, resolve_slice_symbol};
pub use error::TypeError;
pub use infer::infer_types;
pub use type_map::TypeMap;
