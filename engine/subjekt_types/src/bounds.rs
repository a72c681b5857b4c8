//! Restricted integer-only const evaluator for slice bounds.
//!
//! Slice axes must be known before any context exists, so bound
//! sub-expressions are folded here at discovery time. Accepted nodes:
//! integer literals, casts to integer (over literals), unary `+`/`-`, and
//! the integer-producing binary operators. Identifiers and calls are
//! rejected: a bound that depends on a binding is not a constant axis.
//! `/` is rejected outright since division always produces a float.

use subjekt_ir::{BinaryOp, ExprId, ExprKind, ExprTree, UnaryOp, ValueType};
use subjekt_symbols::{
    integer_overflow, internal, modulo_by_zero, type_error, EvalError, ResolvableSymbol,
};

/// Fold one slice bound. `None` means the bound was omitted.
pub fn const_int_bound(tree: &ExprTree, id: ExprId) -> Result<Option<i64>, EvalError> {
    if tree.arena.get(id).kind == ExprKind::EndOfSlice {
        return Ok(None);
    }
    const_int_expr(tree, id).map(Some)
}

fn const_int_expr(tree: &ExprTree, id: ExprId) -> Result<i64, EvalError> {
    let expr = tree.arena.get(id);
    match expr.kind {
        ExprKind::Int(value) => Ok(value),

        ExprKind::Unary { op, operand } => {
            let value = const_int_expr(tree, operand)?;
            match op {
                UnaryOp::Neg => value
                    .checked_neg()
                    .ok_or_else(|| integer_overflow("negation").with_span(expr.span)),
                UnaryOp::Plus => Ok(value),
            }
        }

        ExprKind::Binary { op, left, right } => {
            let l = const_int_expr(tree, left)?;
            let r = const_int_expr(tree, right)?;
            let overflow = |name| move || integer_overflow(name).with_span(expr.span);
            match op {
                BinaryOp::Add => l.checked_add(r).ok_or_else(overflow("addition")),
                BinaryOp::Sub => l.checked_sub(r).ok_or_else(overflow("subtraction")),
                BinaryOp::Mul => l.checked_mul(r).ok_or_else(overflow("multiplication")),
                BinaryOp::Mod => {
                    if r == 0 {
                        Err(modulo_by_zero().with_span(expr.span))
                    } else {
                        l.checked_rem(r).ok_or_else(overflow("remainder"))
                    }
                }
                BinaryOp::Div => Err(type_error(
                    "slice bounds must be integers; `/` always produces a float",
                )
                .with_span(expr.span)),
                BinaryOp::Concat => {
                    Err(type_error("slice bounds must be integers, not strings")
                        .with_span(expr.span))
                }
            }
        }

        ExprKind::Cast { target, operand } => const_int_cast(tree, operand, target, expr.span),

        ExprKind::Ident(name) => Err(type_error(format!(
            "slice bounds must be constant; parameter `{}` is not allowed here",
            tree.name(name)
        ))
        .with_span(expr.span)),

        ExprKind::Call { name, .. } | ExprKind::DotCall { name, .. } => Err(type_error(format!(
            "slice bounds must be constant; call `{}` is not allowed here",
            tree.name(name)
        ))
        .with_span(expr.span)),

        ExprKind::Float(_) | ExprKind::Str(_) => {
            Err(type_error("slice bounds must be integer-typed").with_span(expr.span))
        }

        ExprKind::RangeSlice { .. } | ExprKind::SingleSlice { .. } => {
            Err(type_error("nested slicing is unsupported").with_span(expr.span))
        }

        ExprKind::EndOfSlice => Err(internal("end-of-slice marker outside a slice bound")
            .with_span(expr.span)),
    }
}

/// Fold `(int)…` over a literal; any other cast target is non-integer.
fn const_int_cast(
    tree: &ExprTree,
    operand: ExprId,
    target: ValueType,
    span: subjekt_ir::Span,
) -> Result<i64, EvalError> {
    if target != ValueType::Integer {
        return Err(
            type_error(format!("slice bounds must be integers, not {}", target.name()))
                .with_span(span),
        );
    }
    let inner = tree.arena.get(operand);
    match inner.kind {
        ExprKind::Float(bits) => {
            let f = f64::from_bits(bits);
            #[expect(
                clippy::cast_possible_truncation,
                reason = "Float→Int cast truncates by definition"
            )]
            let n = f.trunc() as i64;
            Ok(n)
        }
        ExprKind::Str(name) => tree
            .name(name)
            .trim()
            .parse::<i64>()
            .map_err(|_| {
                type_error(format!("cannot cast `{}` to integer", tree.name(name)))
                    .with_span(inner.span)
            }),
        _ => const_int_expr(tree, operand),
    }
}

/// Const-fold the bounds of a `RangeSlice`/`SingleSlice` node into its
/// [`ResolvableSymbol`]. Any other node kind is a broken invariant.
pub fn resolve_slice_symbol(tree: &ExprTree, id: ExprId) -> Result<ResolvableSymbol, EvalError> {
    let expr = tree.arena.get(id);
    match expr.kind {
        ExprKind::RangeSlice {
            param,
            start,
            end,
            step,
        } => Ok(ResolvableSymbol::Slice {
            parameter: tree.name(param).to_owned(),
            start: const_int_bound(tree, start)?,
            end: const_int_bound(tree, end)?,
            step: const_int_bound(tree, step)?.unwrap_or(1),
        }),
        ExprKind::SingleSlice { param, index } => {
            let index = const_int_bound(tree, index)?
                .ok_or_else(|| internal("single subscript with no index").with_span(expr.span))?;
            Ok(ResolvableSymbol::Index {
                parameter: tree.name(param).to_owned(),
                index,
            })
        }
        _ => Err(internal("slice resolution on a non-slice node").with_span(expr.span)),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use subjekt_ir::SharedInterner;

    fn fold(source: &str) -> Result<ResolvableSymbol, EvalError> {
        let interner = SharedInterner::new();
        let tree = subjekt_parse::parse(source, &interner).unwrap();
        resolve_slice_symbol(&tree, tree.root)
    }

    #[test]
    fn folds_constant_bounds() {
        let sym = fold("arr[1 + 1:2 * 3:-1]").unwrap();
        assert_eq!(
            sym,
            ResolvableSymbol::Slice {
                parameter: "arr".to_owned(),
                start: Some(2),
                end: Some(6),
                step: -1,
            }
        );
    }

    #[test]
    fn omitted_bounds_fold_to_none_and_default_step() {
        let sym = fold("arr[::2]").unwrap();
        assert_eq!(
            sym,
            ResolvableSymbol::Slice {
                parameter: "arr".to_owned(),
                start: None,
                end: None,
                step: 2,
            }
        );
        let sym = fold("arr[1:]").unwrap();
        assert_eq!(
            sym,
            ResolvableSymbol::Slice {
                parameter: "arr".to_owned(),
                start: Some(1),
                end: None,
                step: 1,
            }
        );
    }

    #[test]
    fn folds_single_subscripts_and_casts() {
        assert_eq!(
            fold("arr[-1]").unwrap(),
            ResolvableSymbol::Index {
                parameter: "arr".to_owned(),
                index: -1,
            }
        );
        assert_eq!(
            fold("arr[(int)2.9]").unwrap(),
            ResolvableSymbol::Index {
                parameter: "arr".to_owned(),
                index: 2,
            }
        );
        assert_eq!(
            fold("arr[(int)\"3\"]").unwrap(),
            ResolvableSymbol::Index {
                parameter: "arr".to_owned(),
                index: 3,
            }
        );
    }

    #[test]
    fn rejects_non_constant_bounds() {
        assert!(fold("arr[n:]").is_err());
        assert!(fold("arr[f(1):]").is_err());
    }

    #[test]
    fn rejects_non_integer_bounds() {
        assert!(fold("arr[1.5:]").is_err());
        assert!(fold("arr[\"a\":]").is_err());
        assert!(fold("arr[4/2:]").is_err());
        assert!(fold("arr[(float)1:]").is_err());
    }

    #[test]
    fn modulo_in_bounds_is_checked() {
        assert_eq!(
            fold("arr[7 % 3:]").unwrap(),
            ResolvableSymbol::Slice {
                parameter: "arr".to_owned(),
                start: Some(1),
                end: None,
                step: 1,
            }
        );
        assert!(fold("arr[1 % 0:]").is_err());
    }
}
