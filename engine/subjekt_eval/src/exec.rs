//! Postorder evaluation of one tree against one fixed context.

use subjekt_diagnostic::Diagnostics;
use subjekt_ir::{ExprId, ExprKind, ExprRange, ExprTree, Name, Span};
use subjekt_symbols::{
    internal, symbol_not_found, type_error, Context, DefinedParameter, EvalError, EvalResult,
    Resolvable, Value,
};
use subjekt_types::{infer_types, TypeMap};

use crate::discover::{slice_bindings, SliceBindings};
use crate::operators::{evaluate_binary, evaluate_unary};

/// Evaluate a tree to one [`Value`] for one fixed context.
///
/// Requires the two-pass contract: `types` must come from a completed
/// inference pass over the same tree (evaluation trusts it and never
/// re-infers), and `slices` must hold the resolved axis key for every slice
/// node — a slice node without one is a broken engine invariant.
pub fn evaluate(
    tree: &ExprTree,
    types: &TypeMap,
    slices: &SliceBindings,
    ctx: &Context,
) -> EvalResult {
    if types.get(tree.root).is_none() {
        return Err(internal("evaluation started before type inference"));
    }
    let evaluator = Evaluator { tree, slices, ctx };
    evaluator.eval(tree.root)
}

/// Resolve a template against one context: evaluate each unique expression
/// slot (inference first, then evaluation), then format the results into
/// the skeleton. Warnings from inference land in `diags`.
pub fn resolve(
    resolvable: &Resolvable,
    ctx: &Context,
    diags: &mut Diagnostics,
) -> Result<String, EvalError> {
    let mut slot_values = Vec::with_capacity(resolvable.sources().len());
    for tree in resolvable.trees() {
        let bindings = slice_bindings(tree)?;
        let types = infer_types(tree, ctx, diags)
            .map_err(|err| match err.span {
                Some(span) => type_error(err.message).with_span(span),
                None => type_error(err.message),
            })?;
        let value = evaluate(tree, &types, &bindings, ctx)?;
        slot_values.push(value.to_string());
    }
    resolvable.format(&slot_values)
}

struct Evaluator<'a> {
    tree: &'a ExprTree,
    slices: &'a SliceBindings,
    ctx: &'a Context,
}

impl Evaluator<'_> {
    /// Evaluate one node.
    ///
    /// Wrapped in `ensure_sufficient_stack`: macro bodies re-enter the
    /// pipeline, and macro self-recursion is unguarded by design.
    fn eval(&self, id: ExprId) -> EvalResult {
        subjekt_stack::ensure_sufficient_stack(|| self.eval_inner(id))
    }

    fn eval_inner(&self, id: ExprId) -> EvalResult {
        let expr = self.tree.arena.get(id);
        match expr.kind {
            ExprKind::Int(value) => Ok(Value::int(value)),
            ExprKind::Float(bits) => Ok(Value::float(f64::from_bits(bits))),
            ExprKind::Str(name) => Ok(Value::string(self.tree.name(name))),

            ExprKind::Ident(name) => {
                let id_str = self.tree.name(name);
                match self.ctx.lookup_parameter(id_str) {
                    Some(bound) => Ok(bound.value.clone()),
                    None => Err(symbol_not_found(id_str, None).with_span(expr.span)),
                }
            }

            ExprKind::Call { name, args } => self.eval_call(None, name, args, expr.span),
            ExprKind::DotCall { module, name, args } => {
                self.eval_call(Some(module), name, args, expr.span)
            }

            ExprKind::Cast { target, operand } => {
                let value = self.eval(operand)?;
                value.cast(target).map_err(|err| err.with_span(expr.span))
            }

            ExprKind::Unary { op, operand } => {
                let value = self.eval(operand)?;
                evaluate_unary(op, value).map_err(|err| with_span_if_missing(err, expr.span))
            }

            ExprKind::Binary { op, left, right } => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                evaluate_binary(l, r, op).map_err(|err| with_span_if_missing(err, expr.span))
            }

            // Slice nodes were resolved to one concrete axis by the
            // permutation engine; evaluation just returns the bound value.
            ExprKind::RangeSlice { .. } | ExprKind::SingleSlice { .. } => {
                let Some(key) = self.slices.get(&id) else {
                    return Err(
                        internal("slice node missing its resolved axis").with_span(expr.span)
                    );
                };
                match self.ctx.lookup_parameter(key) {
                    Some(bound) => Ok(bound.value.clone()),
                    None => Err(internal(format!("slice axis `{key}` not bound in context"))
                        .with_span(expr.span)),
                }
            }

            ExprKind::EndOfSlice => {
                Err(internal("end-of-slice marker evaluated").with_span(expr.span))
            }
        }
    }

    /// Calls resolve to a bound macro first, then a registered function.
    ///
    /// Macro call: evaluate arguments in the caller's context, layer a
    /// child context where argument bindings shadow same-named parameters,
    /// resolve the macro's single bound body inside it, and return the
    /// formatted string. Function call: pass the evaluated values straight
    /// through.
    fn eval_call(
        &self,
        module: Option<Name>,
        name: Name,
        args: ExprRange,
        span: Span,
    ) -> EvalResult {
        let full_name = match module {
            Some(module) => format!("{}.{}", self.tree.name(module), self.tree.name(name)),
            None => self.tree.name(name).to_owned(),
        };
        let arg_ids = self.tree.arena.args(args);

        if let Some(bound) = self.ctx.lookup_macro(&full_name, arg_ids.len()) {
            let bound = bound.clone();
            let mut bindings = Vec::with_capacity(arg_ids.len());
            for (arg_name, arg_id) in bound.args.iter().zip(arg_ids) {
                bindings.push(DefinedParameter::new(arg_name.clone(), self.eval(*arg_id)?));
            }
            let child = self.ctx.layered(bindings);
            // Nested inference warnings are not propagated to the outer
            // collector; the caller's own pass already reported its slots.
            let mut diags = Diagnostics::new();
            let formatted = resolve(&bound.body, &child, &mut diags)?;
            return Ok(Value::string(formatted));
        }

        if let Some(function) = self.ctx.lookup_function(&full_name) {
            let mut values = Vec::with_capacity(arg_ids.len());
            for arg_id in arg_ids {
                values.push(self.eval(*arg_id)?);
            }
            return function
                .call(&values)
                .map_err(|err| with_span_if_missing(err, span));
        }

        Err(symbol_not_found(full_name, Some(arg_ids.len())).with_span(span))
    }
}

/// Attach a span to an operator-level error that has none yet.
fn with_span_if_missing(err: EvalError, span: Span) -> EvalError {
    if err.span.is_none() {
        err.with_span(span)
    } else {
        err
    }
}
