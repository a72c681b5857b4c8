//! End-to-end resolution scenarios.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::collections::HashSet;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use subjekt_engine::{
    Diagnostics, EngineError, EvalErrorKind, Macro, Parameter, Resolvable, SharedInterner,
    SymbolTable, Template, TemplateDelimiters, Value,
};

fn int_param(id: &str, values: &[i64]) -> Parameter {
    Parameter::new(id, values.iter().copied().map(Value::int).collect())
}

fn str_param(id: &str, values: &[&str]) -> Parameter {
    Parameter::new(id, values.iter().map(|s| Value::string(*s)).collect())
}

fn resolve_set(template: &str, table: &Arc<SymbolTable>) -> HashSet<String> {
    let template = Template::compile(&[template]).unwrap();
    let mut diags = Diagnostics::new();
    template
        .resolve_all(table, &mut diags)
        .unwrap()
        .into_iter()
        .map(|mut strings| strings.remove(0))
        .collect()
}

#[test]
fn scenario_a_independent_parameter_axes() {
    let table = Arc::new(
        SymbolTable::new()
            .define_parameter(int_param("a", &[1, 2]))
            .define_parameter(int_param("b", &[3])),
    );
    let got = resolve_set("${{ a + b }}", &table);
    let expected: HashSet<String> = ["4", "5"].into_iter().map(str::to_owned).collect();
    assert_eq!(got, expected);
}

#[test]
fn scenario_b_macro_overloads_multiply_with_parameters() {
    let interner = SharedInterner::new();
    let delims = TemplateDelimiters::default();
    let bodies = vec![
        Resolvable::compile("(${{x}})", &delims, &interner).unwrap(),
        Resolvable::compile("{${{x}}}", &delims, &interner).unwrap(),
    ];
    let table = Arc::new(
        SymbolTable::new()
            .define_parameter(str_param("p", &["1", "2"]))
            .define_macro(Macro::new("m", vec!["x".to_owned()], bodies)),
    );
    let got = resolve_set("${{ m(p) }}", &table);
    let expected: HashSet<String> = ["(1)", "{1}", "(2)", "{2}"]
        .into_iter()
        .map(str::to_owned)
        .collect();
    assert_eq!(got, expected);
}

#[test]
fn scenario_c_python_slice_windows() {
    let table = Arc::new(
        SymbolTable::new().define_parameter(str_param("arr", &["a", "b", "c", "d", "e"])),
    );

    let cases: &[(&str, &[&str])] = &[
        ("${{ arr[1:4] }}", &["b", "c", "d"]),
        ("${{ arr[4:0:-1] }}", &["e", "d", "c", "b"]),
        ("${{ arr[-3:-1] }}", &["c", "d"]),
    ];
    for (template, expected) in cases {
        let got = resolve_set(template, &table);
        let expected: HashSet<String> = expected.iter().map(|s| (*s).to_owned()).collect();
        assert_eq!(got, expected, "{template}");
    }
}

#[test]
fn scenario_d_arithmetic_laws() {
    let table = Arc::new(SymbolTable::new());
    assert_eq!(
        resolve_set("${{ \"2\" + 3 }}", &table),
        HashSet::from(["5".to_owned()])
    );
    assert_eq!(
        resolve_set("${{ \"a\" + 3 }}", &table),
        HashSet::from(["a3".to_owned()])
    );
    assert_eq!(
        resolve_set("${{ 7 / 2 }}", &table),
        HashSet::from(["3.5".to_owned()])
    );
    assert_eq!(
        resolve_set("${{ 7 % 3 }}", &table),
        HashSet::from(["1".to_owned()])
    );

    let template = Template::compile(&["${{ 7 / 0 }}"]).unwrap();
    let mut diags = Diagnostics::new();
    let err = template.resolve_all(&table, &mut diags).unwrap_err();
    let EngineError::Eval(err) = err else {
        panic!("expected an evaluation error, got {err}");
    };
    assert_eq!(err.kind, EvalErrorKind::Arithmetic);
}

#[test]
fn repeated_expressions_resolve_once_per_context() {
    let table = Arc::new(SymbolTable::new().define_parameter(int_param("n", &[7])));
    let template = Template::compile(&["${{ n }} = ${{ n }}"]).unwrap();
    assert_eq!(template.resolvables()[0].sources().len(), 1);
    let mut diags = Diagnostics::new();
    let resolved = template.resolve_all(&table, &mut diags).unwrap();
    assert_eq!(resolved, vec![vec!["7 = 7".to_owned()]]);
}

#[test]
fn multiple_templates_share_one_discovery() {
    let table = Arc::new(
        SymbolTable::new()
            .define_parameter(int_param("a", &[1, 2]))
            .define_parameter(int_param("b", &[5])),
    );
    let template = Template::compile(&["${{ a }}", "${{ a + b }}"]).unwrap();
    let mut diags = Diagnostics::new();
    let resolved = template.resolve_all(&table, &mut diags).unwrap();
    assert_eq!(resolved.len(), 2);
    for strings in &resolved {
        assert_eq!(strings.len(), 2);
    }
    let pairs: HashSet<(String, String)> = resolved
        .into_iter()
        .map(|mut strings| (strings.remove(0), strings.remove(0)))
        .collect();
    let expected: HashSet<(String, String)> = [("1", "6"), ("2", "7")]
        .into_iter()
        .map(|(a, b)| (a.to_owned(), b.to_owned()))
        .collect();
    assert_eq!(pairs, expected);
}

#[test]
fn resolution_is_deterministic() {
    let table = Arc::new(
        SymbolTable::new()
            .define_parameter(int_param("a", &[1, 2, 3]))
            .define_parameter(int_param("b", &[10, 20])),
    );
    let template = Template::compile(&["${{ a * b }}"]).unwrap();
    let mut diags = Diagnostics::new();
    let first = template.resolve_all(&table, &mut diags).unwrap();
    let second = template.resolve_all(&table, &mut diags).unwrap();
    assert_eq!(first, second);
}

#[test]
fn parallel_resolution_matches_serial() {
    let interner = SharedInterner::new();
    let delims = TemplateDelimiters::default();
    let bodies = vec![
        Resolvable::compile("[${{x}}]", &delims, &interner).unwrap(),
        Resolvable::compile("<${{x}}>", &delims, &interner).unwrap(),
    ];
    let table = Arc::new(
        SymbolTable::new()
            .define_parameter(int_param("a", &[1, 2, 3]))
            .define_macro(Macro::new("wrap", vec!["x".to_owned()], bodies)),
    );
    let template = Template::compile(&["${{ wrap(a) }}"]).unwrap();

    let mut serial_diags = Diagnostics::new();
    let serial: HashSet<Vec<String>> = template
        .resolve_all(&table, &mut serial_diags)
        .unwrap()
        .into_iter()
        .collect();
    let mut par_diags = Diagnostics::new();
    let parallel: HashSet<Vec<String>> = template
        .resolve_all_par(&table, &mut par_diags)
        .unwrap()
        .into_iter()
        .collect();

    assert_eq!(serial, parallel);
    assert_eq!(serial_diags.warning_count(), par_diags.warning_count());
}

#[test]
fn custom_delimiters_flow_through() {
    let table = Arc::new(SymbolTable::new().define_parameter(int_param("v", &[9])));
    let template =
        Template::compile_with(&["value: <% v %>"], &TemplateDelimiters::new("<%", "%>")).unwrap();
    let mut diags = Diagnostics::new();
    let resolved = template.resolve_all(&table, &mut diags).unwrap();
    assert_eq!(resolved, vec![vec!["value: 9".to_owned()]]);
}

#[test]
fn warnings_report_without_blocking() {
    let table = Arc::new(
        SymbolTable::new().define_function(subjekt_engine::SubjektFunction::new("f", |_| {
            Ok(Value::string("ok"))
        })),
    );
    let template = Template::compile(&["${{ f() }}"]).unwrap();
    let mut diags = Diagnostics::new();
    let resolved = template.resolve_all(&table, &mut diags).unwrap();
    assert_eq!(resolved, vec![vec!["ok".to_owned()]]);
    // The ambiguous-type default is a warning on a separate channel
    assert_eq!(diags.warning_count(), 1);
    assert!(!diags.has_errors());
}
