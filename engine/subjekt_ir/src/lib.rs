//! Subjekt IR - Intermediate Representation Types
//!
//! This crate contains the core data structures for the Subjekt expression
//! engine:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Tokens and `TokenList` for lexer output
//! - Expression nodes and the arena they live in
//! - `ValueType`, the scalar type tag shared by every phase
//!
//! # Design Philosophy
//!
//! - **Intern identifiers**: strings become `Name(u32)` for O(1) equality
//! - **Flatten the tree**: no `Box<Expr>`, children are `ExprId(u32)` indices
//! - **Immutable once built**: inferred types and slice resolutions live in
//!   parallel maps produced by later passes, never in the nodes themselves
//!
//! Nodes that contain floats store them as `u64` bits for `Eq`/`Hash`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
mod expr;
mod expr_id;
mod interner;
mod name;
mod operators;
mod span;
mod token;
mod value_type;

pub use arena::ExprArena;
pub use expr::{Expr, ExprKind, ExprTree};
pub use expr_id::{ExprId, ExprRange};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use operators::{BinaryOp, UnaryOp};
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
pub use value_type::ValueType;
