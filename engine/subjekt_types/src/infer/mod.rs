//! The type inference pass.

use subjekt_diagnostic::{Diagnostic, Diagnostics};
use subjekt_ir::{BinaryOp, ExprId, ExprKind, ExprTree, ValueType};
use subjekt_symbols::Context;
use tracing::trace;

use crate::bounds::resolve_slice_symbol;
use crate::{TypeError, TypeMap};

/// Infer a type for every node of `tree` under one fixed context.
///
/// Threads an expected-type hint downward (casts push their target to their
/// operand; slice bounds and steps expect Integer) while inferring
/// bottom-up. Calls and qualified calls adopt the active hint or default to
/// String — the default is reported as a warning diagnostic, never an
/// error. The pass completes for every reachable node before evaluation
/// begins; evaluation trusts the returned map and never re-infers.
pub fn infer_types(
    tree: &ExprTree,
    ctx: &Context,
    diags: &mut Diagnostics,
) -> Result<TypeMap, TypeError> {
    let mut visitor = TypeVisitor {
        tree,
        ctx,
        diags,
        map: TypeMap::with_capacity(tree.arena.len()),
    };
    let root_ty = visitor.infer(tree.root, None)?;
    trace!(root = ?root_ty, nodes = tree.arena.len(), "type inference complete");
    Ok(visitor.map)
}

/// Whether a binding of type `actual` satisfies an expected-type hint.
///
/// Numeric subsumption only: `Number` accepts both concrete numeric kinds
/// and `Float` accepts `Integer`; everything else must match exactly.
fn hint_accepts(expected: ValueType, actual: ValueType) -> bool {
    expected == actual
        || (expected == ValueType::Number && actual.is_numeric())
        || (expected == ValueType::Float && actual == ValueType::Integer)
}

struct TypeVisitor<'a> {
    tree: &'a ExprTree,
    ctx: &'a Context,
    diags: &'a mut Diagnostics,
    map: TypeMap,
}

impl TypeVisitor<'_> {
    fn infer(&mut self, id: ExprId, hint: Option<ValueType>) -> Result<ValueType, TypeError> {
        let expr = *self.tree.arena.get(id);
        let ty = match expr.kind {
            ExprKind::Int(_) => ValueType::Integer,
            ExprKind::Float(_) => ValueType::Float,
            ExprKind::Str(_) => ValueType::String,
            ExprKind::EndOfSlice => ValueType::Integer,

            ExprKind::Ident(name) => {
                let id_str = self.tree.name(name);
                let Some(bound) = self.ctx.lookup_parameter(id_str) else {
                    return Err(TypeError::unbound(id_str, expr.span));
                };
                let actual = bound.value.value_type();
                if let Some(expected) = hint {
                    if !hint_accepts(expected, actual) {
                        return Err(TypeError::hint_mismatch(id_str, expected, actual, expr.span));
                    }
                }
                actual
            }

            ExprKind::Unary { operand, .. } => self.infer(operand, hint)?,

            ExprKind::Binary { op, left, right } => {
                let l = self.infer(left, hint)?;
                let r = self.infer(right, hint)?;
                binary_result_type(op, l, r)
            }

            ExprKind::Cast { target, operand } => {
                self.infer(operand, Some(target))?;
                target
            }

            ExprKind::Call { name, args } | ExprKind::DotCall { name, args, .. } => {
                for arg in self.tree.arena.args(args) {
                    self.infer(*arg, None)?;
                }
                match hint {
                    Some(expected) => expected,
                    None => {
                        self.diags.add(
                            Diagnostic::warning(format!(
                                "call `{}` has no expected type; defaulting to string",
                                self.tree.name(name)
                            ))
                            .with_span(expr.span),
                        );
                        ValueType::String
                    }
                }
            }

            ExprKind::RangeSlice {
                start, end, step, ..
            } => {
                self.infer(start, Some(ValueType::Integer))?;
                self.infer(end, Some(ValueType::Integer))?;
                self.infer(step, Some(ValueType::Integer))?;
                self.slice_axis_type(id, expr.span)?
            }

            ExprKind::SingleSlice { index, .. } => {
                self.infer(index, Some(ValueType::Integer))?;
                self.slice_axis_type(id, expr.span)?
            }
        };
        self.map.set(id, ty);
        Ok(ty)
    }

    /// Type of a slice node: the type of its bound axis value in the
    /// context. The axis key is recomputed here deterministically from the
    /// const-folded bounds.
    fn slice_axis_type(
        &self,
        id: ExprId,
        span: subjekt_ir::Span,
    ) -> Result<ValueType, TypeError> {
        let symbol = resolve_slice_symbol(self.tree, id)
            .map_err(|err| TypeError::new(err.message, err.span.unwrap_or(span)))?;
        let Some(key) = symbol.axis_key() else {
            return Err(TypeError::new("slice symbol has no axis key", span));
        };
        match self.ctx.lookup_parameter(&key) {
            Some(bound) => Ok(bound.value.value_type()),
            None => Err(TypeError::unbound(&key, span)),
        }
    }
}

/// Result type of a binary operation from its operand types:
/// concatenation is String; division or any Float operand makes Float; any
/// Integer operand makes Integer; otherwise the generic Number.
fn binary_result_type(op: BinaryOp, left: ValueType, right: ValueType) -> ValueType {
    if op == BinaryOp::Concat {
        ValueType::String
    } else if op == BinaryOp::Div || left == ValueType::Float || right == ValueType::Float {
        ValueType::Float
    } else if left == ValueType::Integer || right == ValueType::Integer {
        ValueType::Integer
    } else {
        ValueType::Number
    }
}
