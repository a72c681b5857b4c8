//! Evaluator, slice engine, symbol discovery and permutation engine.
//!
//! The execution half of the Subjekt expression engine. Everything here is
//! synchronous, single-threaded and purely functional over immutable input:
//! one [`Context`](subjekt_symbols::Context) in, one
//! [`Value`](subjekt_symbols::Value) (or error) out, with no shared mutable
//! state anywhere — sibling contexts can safely be resolved concurrently by
//! callers, and a failure in one context never corrupts another.

mod discover;
mod exec;
mod operators;
mod permute;
mod slice;

pub use discover::{collect_symbols, discover, slice_bindings, SliceBindings};
pub use exec::{evaluate, resolve};
pub use operators::{evaluate_binary, evaluate_unary};
pub use permute::enumerate_contexts;
pub use slice::{index, slice};
