//! Arena allocation for expressions.
//!
//! Expressions live in one contiguous `Vec`; argument lists are flattened
//! into a side array addressed by `ExprRange`. Indexing with an id from a
//! different arena is an engine bug and panics.

use crate::{Expr, ExprId, ExprRange};

/// Contiguous storage for the nodes of one parsed expression.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    arg_lists: Vec<ExprId>,
}

impl ExprArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, returning its id.
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let id = u32::try_from(self.exprs.len()).unwrap_or(u32::MAX);
        self.exprs.push(expr);
        ExprId::new(id)
    }

    /// Get an expression by id.
    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Flatten a list of argument ids into the side array.
    pub fn alloc_args(&mut self, args: &[ExprId]) -> ExprRange {
        let start = u32::try_from(self.arg_lists.len()).unwrap_or(u32::MAX);
        let len = u16::try_from(args.len()).unwrap_or(u16::MAX);
        self.arg_lists.extend_from_slice(args);
        ExprRange::new(start, len)
    }

    /// Resolve an `ExprRange` to its argument ids.
    #[inline]
    pub fn args(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.arg_lists[start..start + range.len()]
    }

    /// Number of allocated expressions.
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Whether the arena holds no expressions.
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}
