//! Expression nodes.
//!
//! All children are arena indices, not boxes. A node records only what the
//! parser saw plus its span; inferred types and resolved slice axes are
//! produced by later passes into parallel maps, keeping the tree immutable
//! and shareable across repeated evaluations against different contexts.

use std::fmt;

use crate::{BinaryOp, ExprArena, ExprId, ExprRange, Name, SharedInterner, Span, UnaryOp, ValueType};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression variants.
///
/// Floats are stored as bits for `Eq`/`Hash`; use [`ExprKind::float`] and
/// [`ExprKind::float_value`] to convert.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer literal: `42`
    Int(i64),

    /// Float literal: `3.14` (stored as bits for `Hash`)
    Float(u64),

    /// String literal (interned, escapes already processed)
    Str(Name),

    /// Parameter reference
    Ident(Name),

    /// Call: `name(args...)` — a macro or registered function
    Call { name: Name, args: ExprRange },

    /// Qualified call: `module.name(args...)`
    ///
    /// Module separation is a naming convention over the same symbol space,
    /// not a distinct mechanism.
    DotCall {
        module: Name,
        name: Name,
        args: ExprRange,
    },

    /// Binary operation: `left op right`
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// Unary operation: `op operand`
    Unary { op: UnaryOp, operand: ExprId },

    /// Prefix cast: `(int)x`, `(float)x`, `(string)x`
    Cast { target: ValueType, operand: ExprId },

    /// Range subscript: `param[start:end:step]`
    ///
    /// Omitted bounds point at [`ExprKind::EndOfSlice`] nodes; the bounds
    /// themselves are always valid ids.
    RangeSlice {
        param: Name,
        start: ExprId,
        end: ExprId,
        step: ExprId,
    },

    /// Single subscript: `param[index]`
    SingleSlice { param: Name, index: ExprId },

    /// Marker for an omitted slice bound.
    EndOfSlice,
}

impl ExprKind {
    /// Build a float literal from its numeric value.
    #[inline]
    pub fn float(value: f64) -> Self {
        ExprKind::Float(value.to_bits())
    }

    /// Recover the numeric value of a [`ExprKind::Float`] node.
    ///
    /// Returns `None` for any other variant.
    #[inline]
    pub fn float_value(&self) -> Option<f64> {
        match self {
            ExprKind::Float(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }
}

/// One parsed expression: arena, root node, and the interner that owns every
/// `Name` inside it.
///
/// Trees are immutable after parsing; the same tree is evaluated against many
/// contexts.
#[derive(Clone, Debug)]
pub struct ExprTree {
    pub arena: ExprArena,
    pub root: ExprId,
    pub interner: SharedInterner,
}

impl ExprTree {
    /// Resolve an interned name to its string content.
    #[inline]
    pub fn name(&self, name: Name) -> &'static str {
        self.interner.resolve(name)
    }

    /// The root expression node.
    #[inline]
    pub fn root_expr(&self) -> &Expr {
        self.arena.get(self.root)
    }
}
