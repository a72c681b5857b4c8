//! Symbol discovery.
//!
//! Walks parsed expressions collecting every [`ResolvableSymbol`] they
//! reference, resolves each against the symbol table, and recurses into
//! macro bodies to a fixpoint across macros calling macros. Slice bounds
//! are const-folded during the walk; each slice node's resolved axis key is
//! recorded in a [`SliceBindings`] map for the evaluator.

use rustc_hash::{FxHashMap, FxHashSet};
use subjekt_ir::{ExprId, ExprKind, ExprTree};
use subjekt_symbols::{symbol_not_found, EvalError, Resolvable, ResolvableSymbol, SymbolTable};
use subjekt_types::resolve_slice_symbol;
use tracing::debug;

/// `ExprId -> axis key` for the slice nodes of one tree.
///
/// This is the engine-produced companion to the tree: the IR stays
/// immutable, and a slice node whose id is missing from the map at
/// evaluation time is a broken invariant.
pub type SliceBindings = FxHashMap<ExprId, String>;

/// Walk one tree, collecting referenced symbols and slice-axis bindings.
fn analyze_into(
    tree: &ExprTree,
    id: ExprId,
    symbols: &mut FxHashSet<ResolvableSymbol>,
    bindings: &mut SliceBindings,
) -> Result<(), EvalError> {
    let expr = tree.arena.get(id);
    match expr.kind {
        ExprKind::Int(_) | ExprKind::Float(_) | ExprKind::Str(_) | ExprKind::EndOfSlice => {}

        ExprKind::Ident(name) => {
            symbols.insert(ResolvableSymbol::Parameter(tree.name(name).to_owned()));
        }

        ExprKind::Call { name, args } => {
            symbols.insert(ResolvableSymbol::Call {
                name: tree.name(name).to_owned(),
                arg_count: args.len(),
            });
            for arg in tree.arena.args(args) {
                analyze_into(tree, *arg, symbols, bindings)?;
            }
        }

        ExprKind::DotCall { module, name, args } => {
            symbols.insert(ResolvableSymbol::QualifiedCall {
                module: tree.name(module).to_owned(),
                name: tree.name(name).to_owned(),
                arg_count: args.len(),
            });
            for arg in tree.arena.args(args) {
                analyze_into(tree, *arg, symbols, bindings)?;
            }
        }

        ExprKind::Binary { left, right, .. } => {
            analyze_into(tree, left, symbols, bindings)?;
            analyze_into(tree, right, symbols, bindings)?;
        }

        ExprKind::Unary { operand, .. } | ExprKind::Cast { operand, .. } => {
            analyze_into(tree, operand, symbols, bindings)?;
        }

        // Slice bounds are constant by construction (the const evaluator
        // rejects identifiers and calls), so there is nothing to collect
        // inside them.
        ExprKind::RangeSlice { .. } | ExprKind::SingleSlice { .. } => {
            let symbol = resolve_slice_symbol(tree, id)?;
            if let Some(key) = symbol.axis_key() {
                bindings.insert(id, key);
            }
            symbols.insert(symbol);
        }
    }
    Ok(())
}

/// Collect the full set of symbols one tree references.
pub fn collect_symbols(tree: &ExprTree) -> Result<FxHashSet<ResolvableSymbol>, EvalError> {
    let mut symbols = FxHashSet::default();
    let mut bindings = SliceBindings::default();
    analyze_into(tree, tree.root, &mut symbols, &mut bindings)?;
    Ok(symbols)
}

/// Compute the slice-axis bindings for one tree.
pub fn slice_bindings(tree: &ExprTree) -> Result<SliceBindings, EvalError> {
    let mut symbols = FxHashSet::default();
    let mut bindings = SliceBindings::default();
    analyze_into(tree, tree.root, &mut symbols, &mut bindings)?;
    Ok(bindings)
}

/// Whether a macro-body symbol refers to one of the macro's own argument
/// identifiers. Argument references are bound per-call, not free, so they
/// are excluded from discovery.
fn is_argument_reference(symbol: &ResolvableSymbol, args: &[String]) -> bool {
    match symbol {
        ResolvableSymbol::Parameter(id) => args.iter().any(|arg| arg == id),
        _ => false,
    }
}

/// Discover every symbol transitively referenced by a template.
///
/// Each symbol is resolved against `table` (failing with an unresolved
/// reference error carrying identifier and arity if absent). Resolved
/// macros are recursed into — their own bodies may reference further
/// parameters, slices and macros — to a fixpoint across macros calling
/// macros. Visited macros are tracked, so discovery terminates even for
/// self-referential macros; their *evaluation* is what diverges.
pub fn discover(
    table: &SymbolTable,
    resolvables: &[Resolvable],
) -> Result<FxHashSet<ResolvableSymbol>, EvalError> {
    let mut work: Vec<ResolvableSymbol> = Vec::new();
    for resolvable in resolvables {
        for tree in resolvable.trees() {
            work.extend(collect_symbols(tree)?);
        }
    }

    let mut symbols = FxHashSet::default();
    let mut visited_macros: FxHashSet<(String, usize)> = FxHashSet::default();

    while let Some(symbol) = work.pop() {
        if !symbols.insert(symbol.clone()) {
            continue;
        }
        match &symbol {
            ResolvableSymbol::Parameter(id)
            | ResolvableSymbol::Slice { parameter: id, .. }
            | ResolvableSymbol::Index { parameter: id, .. } => {
                if table.resolve_parameter(id).is_none() {
                    return Err(symbol_not_found(id.clone(), None));
                }
            }
            ResolvableSymbol::Call { arg_count, .. }
            | ResolvableSymbol::QualifiedCall { arg_count, .. } => {
                let name = symbol.call_name().unwrap_or_default();
                if let Some(mac) = table.resolve_macro(&name, *arg_count) {
                    if visited_macros.insert((name, *arg_count)) {
                        for body in &mac.bodies {
                            for tree in body.trees() {
                                for found in collect_symbols(tree)? {
                                    if !is_argument_reference(&found, &mac.args) {
                                        work.push(found);
                                    }
                                }
                            }
                        }
                    }
                } else if table.resolve_function(&name).is_none() {
                    return Err(symbol_not_found(name, Some(*arg_count)));
                }
            }
        }
    }

    debug!(symbols = symbols.len(), "symbol discovery complete");
    Ok(symbols)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use subjekt_ir::SharedInterner;
    use subjekt_symbols::{Macro, Parameter, TemplateDelimiters, Value};

    fn compile(template: &str, interner: &SharedInterner) -> Resolvable {
        Resolvable::compile(template, &TemplateDelimiters::default(), interner).unwrap()
    }

    fn param(id: &str) -> Parameter {
        Parameter::new(id, vec![Value::int(1)])
    }

    #[test]
    fn collects_parameters_calls_and_slices() {
        let interner = SharedInterner::new();
        let tree = subjekt_parse::parse("a + m(b, arr[1:3]) .. strings.up(c)", &interner).unwrap();
        let symbols = collect_symbols(&tree).unwrap();

        assert!(symbols.contains(&ResolvableSymbol::Parameter("a".to_owned())));
        assert!(symbols.contains(&ResolvableSymbol::Parameter("b".to_owned())));
        assert!(symbols.contains(&ResolvableSymbol::Parameter("c".to_owned())));
        assert!(symbols.contains(&ResolvableSymbol::Call {
            name: "m".to_owned(),
            arg_count: 2,
        }));
        assert!(symbols.contains(&ResolvableSymbol::QualifiedCall {
            module: "strings".to_owned(),
            name: "up".to_owned(),
            arg_count: 1,
        }));
        assert!(symbols.contains(&ResolvableSymbol::Slice {
            parameter: "arr".to_owned(),
            start: Some(1),
            end: Some(3),
            step: 1,
        }));
        assert_eq!(symbols.len(), 6);
    }

    #[test]
    fn slice_bindings_key_each_slice_node() {
        let interner = SharedInterner::new();
        let tree = subjekt_parse::parse("arr[1:3] .. arr[0]", &interner).unwrap();
        let bindings = slice_bindings(&tree).unwrap();
        assert_eq!(bindings.len(), 2);
        let mut keys: Vec<_> = bindings.values().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["arr[0]".to_owned(), "arr[1:3:1]".to_owned()]);
    }

    #[test]
    fn discovery_recurses_into_macro_bodies() {
        let interner = SharedInterner::new();
        // m's body references p (free) and its own argument x (excluded)
        let body = compile("${{ x }} and ${{ p }}", &interner);
        let table = SymbolTable::new()
            .define_parameter(param("p"))
            .define_parameter(param("q"))
            .define_macro(Macro::new("m", vec!["x".to_owned()], vec![body]));

        let template = compile("${{ m(q) }}", &interner);
        let symbols = discover(&table, &[template]).unwrap();

        assert!(symbols.contains(&ResolvableSymbol::Parameter("p".to_owned())));
        assert!(symbols.contains(&ResolvableSymbol::Parameter("q".to_owned())));
        assert!(!symbols.contains(&ResolvableSymbol::Parameter("x".to_owned())));
        assert!(symbols.contains(&ResolvableSymbol::Call {
            name: "m".to_owned(),
            arg_count: 1,
        }));
    }

    #[test]
    fn discovery_reaches_fixpoint_across_macro_chains() {
        let interner = SharedInterner::new();
        // outer -> inner -> parameter deep
        let table = SymbolTable::new()
            .define_parameter(param("deep"))
            .define_macro(Macro::new(
                "inner",
                vec![],
                vec![compile("${{ deep }}", &interner)],
            ))
            .define_macro(Macro::new(
                "outer",
                vec![],
                vec![compile("${{ inner() }}", &interner)],
            ));

        let template = compile("${{ outer() }}", &interner);
        let symbols = discover(&table, &[template]).unwrap();
        assert!(symbols.contains(&ResolvableSymbol::Parameter("deep".to_owned())));
    }

    #[test]
    fn discovery_terminates_on_self_referential_macros() {
        let interner = SharedInterner::new();
        let table = SymbolTable::new().define_macro(Macro::new(
            "loop_",
            vec![],
            vec![compile("${{ loop_() }}", &interner)],
        ));
        let template = compile("${{ loop_() }}", &interner);
        // Discovery tracks visited macros; only evaluation diverges.
        let symbols = discover(&table, &[template]).unwrap();
        assert_eq!(symbols.len(), 1);
    }

    #[test]
    fn unresolved_references_fail_with_identity() {
        let interner = SharedInterner::new();
        let table = SymbolTable::new();
        let template = compile("${{ ghost }}", &interner);
        let err = discover(&table, &[template]).unwrap_err();
        assert!(err.message.contains("`ghost`"));

        let template = compile("${{ ghost(1, 2) }}", &interner);
        let err = discover(&table, &[template]).unwrap_err();
        assert!(err.message.contains("`ghost`"));
        assert!(err.message.contains('2'));
    }

    #[test]
    fn functions_resolve_without_expanding() {
        let interner = SharedInterner::new();
        let table = SymbolTable::new().define_function(subjekt_symbols::SubjektFunction::new(
            "f",
            |_| Ok(Value::int(0)),
        ));
        let template = compile("${{ f(1) }}", &interner);
        let symbols = discover(&table, &[template]).unwrap();
        assert_eq!(symbols.len(), 1);
    }
}
