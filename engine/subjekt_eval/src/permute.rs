//! The permutation engine.
//!
//! Expands every discovered symbol into its combinatorial axis, groups and
//! deduplicates axes by stable key, and materializes the Cartesian product
//! across all independent axes — one immutable [`Context`] per
//! combination. Enumeration order is unspecified but duplicate-free and
//! exhaustive; callers compare results as sets.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use subjekt_symbols::{
    internal, symbol_not_found, Context, DefinedMacro, DefinedParameter, EvalError, Parameter,
    ResolvableSymbol, SubjektFunction, SymbolTable,
};
use tracing::debug;

use crate::slice;

/// Expansion rules per symbol kind:
/// - a Parameter expands to one axis entry per declared value
/// - a Macro expands to one axis entry per body overload
/// - a Function contributes identically to every context and is not part
///   of the product
/// - a Slice/Index expands to its materialized window, re-expressed as a
///   synthetic parameter axis under its deterministic key
pub fn enumerate_contexts(
    table: &Arc<SymbolTable>,
    symbols: &FxHashSet<ResolvableSymbol>,
) -> Result<Vec<Context>, EvalError> {
    let mut param_axes: FxHashMap<String, Vec<DefinedParameter>> = FxHashMap::default();
    let mut macro_axes: FxHashMap<(String, usize), Vec<DefinedMacro>> = FxHashMap::default();
    let mut functions: Vec<SubjektFunction> = Vec::new();

    for symbol in symbols {
        match symbol {
            ResolvableSymbol::Parameter(id) => {
                let parameter = resolve_parameter(table, id)?;
                let source = Arc::new(parameter.clone());
                param_axes.entry(id.clone()).or_insert_with(|| {
                    source
                        .values
                        .iter()
                        .map(|value| DefinedParameter::from_source(Arc::clone(&source), value.clone()))
                        .collect()
                });
            }

            ResolvableSymbol::Slice {
                parameter,
                start,
                end,
                step,
            } => {
                let declared = resolve_parameter(table, parameter)?;
                let window = slice::slice(&declared.values, *start, *end, *step)?;
                insert_synthetic_axis(&mut param_axes, symbol, declared, window)?;
            }

            ResolvableSymbol::Index { parameter, index } => {
                let declared = resolve_parameter(table, parameter)?;
                let value = slice::index(&declared.values, *index)?;
                insert_synthetic_axis(&mut param_axes, symbol, declared, vec![value])?;
            }

            ResolvableSymbol::Call { arg_count, .. }
            | ResolvableSymbol::QualifiedCall { arg_count, .. } => {
                let name = symbol
                    .call_name()
                    .ok_or_else(|| internal("call symbol without a call name"))?;
                if let Some(mac) = table.resolve_macro(&name, *arg_count) {
                    macro_axes.entry((name, *arg_count)).or_insert_with(|| {
                        mac.bodies
                            .iter()
                            .map(|body| {
                                DefinedMacro::new(mac.id.clone(), mac.args.clone(), body.clone())
                            })
                            .collect()
                    });
                } else if let Some(function) = table.resolve_function(&name) {
                    functions.push(function.clone());
                } else {
                    return Err(symbol_not_found(name, Some(*arg_count)));
                }
            }
        }
    }

    // Stable axis order keeps enumeration reproducible run to run.
    let mut param_axes: Vec<(String, Vec<DefinedParameter>)> = param_axes.into_iter().collect();
    param_axes.sort_by(|a, b| a.0.cmp(&b.0));
    let mut macro_axes: Vec<((String, usize), Vec<DefinedMacro>)> =
        macro_axes.into_iter().collect();
    macro_axes.sort_by(|a, b| a.0.cmp(&b.0));

    let axis_sizes: Vec<usize> = param_axes
        .iter()
        .map(|(_, entries)| entries.len())
        .chain(macro_axes.iter().map(|(_, entries)| entries.len()))
        .collect();
    let total = axis_sizes
        .iter()
        .try_fold(1usize, |acc, len| acc.checked_mul(*len))
        .ok_or_else(|| internal("permutation product overflows"))?;

    debug!(
        parameter_axes = param_axes.len(),
        macro_axes = macro_axes.len(),
        functions = functions.len(),
        contexts = total,
        "enumerating contexts"
    );

    if total == 0 {
        return Ok(Vec::new());
    }

    let mut contexts = Vec::with_capacity(total);
    let mut odometer = vec![0usize; axis_sizes.len()];
    'outer: loop {
        let mut ctx = Context::new(Arc::clone(table));
        for function in &functions {
            ctx = ctx.with_function(function.clone());
        }
        for (axis, (_, entries)) in param_axes.iter().enumerate() {
            ctx = ctx.with_parameter(entries[odometer[axis]].clone());
        }
        for (axis, (_, entries)) in macro_axes.iter().enumerate() {
            ctx = ctx.with_macro(entries[odometer[param_axes.len() + axis]].clone());
        }
        contexts.push(ctx);

        // Advance the odometer; carry right-to-left.
        let mut position = odometer.len();
        loop {
            if position == 0 {
                break 'outer;
            }
            position -= 1;
            odometer[position] += 1;
            if odometer[position] < axis_sizes[position] {
                continue 'outer;
            }
            odometer[position] = 0;
        }
    }

    Ok(contexts)
}

fn resolve_parameter<'t>(
    table: &'t Arc<SymbolTable>,
    id: &str,
) -> Result<&'t Parameter, EvalError> {
    table
        .resolve_parameter(id)
        .ok_or_else(|| symbol_not_found(id.to_owned(), None))
}

/// Re-express a materialized slice window as a synthetic parameter axis
/// keyed deterministically, so repeated identical slices collapse to one
/// axis instead of multiplying the product.
fn insert_synthetic_axis(
    param_axes: &mut FxHashMap<String, Vec<DefinedParameter>>,
    symbol: &ResolvableSymbol,
    declared: &Parameter,
    window: Vec<subjekt_symbols::Value>,
) -> Result<(), EvalError> {
    let key = symbol
        .axis_key()
        .ok_or_else(|| internal("slice symbol without an axis key"))?;
    let source = Arc::new(declared.clone());
    param_axes.entry(key.clone()).or_insert_with(|| {
        window
            .into_iter()
            .map(|value| DefinedParameter::synthetic(key.clone(), Arc::clone(&source), value))
            .collect()
    });
    Ok(())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use subjekt_ir::SharedInterner;
    use subjekt_symbols::{Macro, Resolvable, TemplateDelimiters, Value};

    fn symbols_of(template: &str, table: &SymbolTable) -> FxHashSet<ResolvableSymbol> {
        let interner = SharedInterner::new();
        let resolvable =
            Resolvable::compile(template, &TemplateDelimiters::default(), &interner).unwrap();
        crate::discover(table, &[resolvable]).unwrap()
    }

    fn int_param(id: &str, values: &[i64]) -> Parameter {
        Parameter::new(id, values.iter().copied().map(Value::int).collect())
    }

    #[test]
    fn product_counts_every_independent_axis() {
        let interner = SharedInterner::new();
        let body_a = Resolvable::compile("(${{x}})", &TemplateDelimiters::default(), &interner)
            .unwrap();
        let body_b = Resolvable::compile("{${{x}}}", &TemplateDelimiters::default(), &interner)
            .unwrap();
        let table = Arc::new(
            SymbolTable::new()
                .define_parameter(int_param("a", &[1, 2]))
                .define_parameter(int_param("b", &[10, 20, 30]))
                .define_macro(Macro::new("m", vec!["x".to_owned()], vec![body_a, body_b])),
        );

        let symbols = symbols_of("${{ a + b }} ${{ m(a) }}", &table);
        let contexts = enumerate_contexts(&table, &symbols).unwrap();
        // 2 values * 3 values * 2 bodies
        assert_eq!(contexts.len(), 12);

        // Duplicate-free: every combination is distinct
        let mut seen = std::collections::HashSet::new();
        for ctx in &contexts {
            let a = ctx.lookup_parameter("a").unwrap().value.to_string();
            let b = ctx.lookup_parameter("b").unwrap().value.to_string();
            let body = ctx.lookup_macro("m", 1).unwrap().body.raw().to_owned();
            assert!(seen.insert((a, b, body)), "duplicate context");
        }
    }

    #[test]
    fn functions_do_not_multiply_the_product() {
        let table = Arc::new(
            SymbolTable::new()
                .define_parameter(int_param("a", &[1, 2]))
                .define_function(SubjektFunction::new("f", |args| {
                    Ok(args.first().cloned().unwrap_or(Value::int(0)))
                })),
        );
        let symbols = symbols_of("${{ f(a) }}", &table);
        let contexts = enumerate_contexts(&table, &symbols).unwrap();
        assert_eq!(contexts.len(), 2);
        for ctx in &contexts {
            assert!(ctx.lookup_function("f").is_some());
        }
    }

    #[test]
    fn repeated_identical_slices_collapse_to_one_axis() {
        let table = Arc::new(SymbolTable::new().define_parameter(int_param("arr", &[1, 2, 3, 4])));
        // The same window twice plus the full parameter: 2 axes, not 3
        let symbols = symbols_of("${{ arr[0:2] }} ${{ arr[0:2] }} ${{ arr }}", &table);
        let contexts = enumerate_contexts(&table, &symbols).unwrap();
        // window has 2 entries, arr has 4
        assert_eq!(contexts.len(), 8);
    }

    #[test]
    fn slice_windows_bind_under_their_axis_key() {
        let table = Arc::new(SymbolTable::new().define_parameter(int_param("arr", &[5, 6, 7])));
        let symbols = symbols_of("${{ arr[1:] }}", &table);
        let contexts = enumerate_contexts(&table, &symbols).unwrap();
        assert_eq!(contexts.len(), 2);
        let mut bound: Vec<String> = contexts
            .iter()
            .map(|ctx| ctx.lookup_parameter("arr[1::1]").unwrap().value.to_string())
            .collect();
        bound.sort();
        assert_eq!(bound, vec!["6".to_owned(), "7".to_owned()]);
        // The synthetic axis keeps its back-reference to the declared values
        let source = contexts[0]
            .lookup_parameter("arr[1::1]")
            .unwrap()
            .source
            .clone()
            .unwrap();
        assert_eq!(source.values.len(), 3);
    }

    #[test]
    fn empty_slice_window_yields_no_contexts() {
        let table = Arc::new(SymbolTable::new().define_parameter(int_param("arr", &[1, 2])));
        let symbols = symbols_of("${{ arr[5:] }}", &table);
        let contexts = enumerate_contexts(&table, &symbols).unwrap();
        assert!(contexts.is_empty());
    }

    #[test]
    fn no_axes_yields_the_single_empty_context() {
        let table = Arc::new(SymbolTable::new());
        let symbols = FxHashSet::default();
        let contexts = enumerate_contexts(&table, &symbols).unwrap();
        assert_eq!(contexts.len(), 1);
    }

    #[test]
    fn out_of_range_single_subscript_fails_enumeration() {
        let table = Arc::new(SymbolTable::new().define_parameter(int_param("arr", &[1, 2])));
        let symbols = symbols_of("${{ arr[7] }}", &table);
        assert!(enumerate_contexts(&table, &symbols).is_err());
    }
}
