//! Contexts: one concrete instantiation of every referenced symbol.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{Parameter, Resolvable, SubjektFunction, SymbolTable, Value};

/// One bound parameter choice: the identifier (declared id or synthetic
/// slice-axis key), the single chosen value, and an optional back-reference
/// to the originating declaration.
#[derive(Clone, Debug)]
pub struct DefinedParameter {
    pub parameter_id: String,
    pub value: Value,
    pub source: Option<Arc<Parameter>>,
}

impl DefinedParameter {
    /// Bind a value under an identifier with no originating declaration
    /// (macro argument bindings, tests).
    pub fn new(parameter_id: impl Into<String>, value: Value) -> Self {
        DefinedParameter {
            parameter_id: parameter_id.into(),
            value,
            source: None,
        }
    }

    /// Bind a value chosen from a declared parameter.
    pub fn from_source(source: Arc<Parameter>, value: Value) -> Self {
        DefinedParameter {
            parameter_id: source.id.clone(),
            value,
            source: Some(source),
        }
    }

    /// Bind a value under a synthetic axis key derived from `source`.
    pub fn synthetic(axis_key: impl Into<String>, source: Arc<Parameter>, value: Value) -> Self {
        DefinedParameter {
            parameter_id: axis_key.into(),
            value,
            source: Some(source),
        }
    }
}

/// One bound macro choice: the identifier, its argument identifiers, and
/// the single chosen body.
#[derive(Clone, Debug)]
pub struct DefinedMacro {
    pub macro_id: String,
    pub args: Vec<String>,
    pub body: Resolvable,
}

impl DefinedMacro {
    /// Bind one body of a macro.
    pub fn new(macro_id: impl Into<String>, args: Vec<String>, body: Resolvable) -> Self {
        DefinedMacro {
            macro_id: macro_id.into(),
            args,
            body,
        }
    }

    /// The macro's arity; with the id, its identity.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

/// One concrete instantiation: exactly one value per included parameter,
/// exactly one body per included macro, plus the registered functions and a
/// back-reference to the originating [`SymbolTable`] (slicing must index the
/// original ordered parameter values, not a single bound scalar).
///
/// Contexts are immutable once built; macro calls layer a child context via
/// [`Context::layered`] rather than mutating the parent.
#[derive(Clone, Debug)]
pub struct Context {
    params: FxHashMap<String, DefinedParameter>,
    macros: FxHashMap<(String, usize), DefinedMacro>,
    functions: FxHashMap<String, SubjektFunction>,
    table: Arc<SymbolTable>,
}

impl Context {
    /// Create an empty context over a symbol table.
    pub fn new(table: Arc<SymbolTable>) -> Self {
        Context {
            params: FxHashMap::default(),
            macros: FxHashMap::default(),
            functions: FxHashMap::default(),
            table,
        }
    }

    /// Bind a parameter choice.
    #[must_use]
    pub fn with_parameter(mut self, parameter: DefinedParameter) -> Self {
        self.params.insert(parameter.parameter_id.clone(), parameter);
        self
    }

    /// Bind a macro body choice.
    #[must_use]
    pub fn with_macro(mut self, mac: DefinedMacro) -> Self {
        self.macros
            .insert((mac.macro_id.clone(), mac.arg_count()), mac);
        self
    }

    /// Add a function shared by every sibling context.
    #[must_use]
    pub fn with_function(mut self, function: SubjektFunction) -> Self {
        self.functions.insert(function.id().to_owned(), function);
        self
    }

    /// Look up a bound parameter (or synthetic slice axis) by identifier.
    pub fn lookup_parameter(&self, id: &str) -> Option<&DefinedParameter> {
        self.params.get(id)
    }

    /// Look up a bound macro by identifier and arity.
    pub fn lookup_macro(&self, id: &str, arg_count: usize) -> Option<&DefinedMacro> {
        self.macros.get(&(id.to_owned(), arg_count))
    }

    /// Look up a function: context-local first, then the symbol table.
    pub fn lookup_function(&self, id: &str) -> Option<&SubjektFunction> {
        self.functions
            .get(id)
            .or_else(|| self.table.resolve_function(id))
    }

    /// The originating symbol table.
    pub fn table(&self) -> &Arc<SymbolTable> {
        &self.table
    }

    /// Layer a child context: `bindings` shadow same-named parameters while
    /// macros, functions and the table carry over. Used for macro argument
    /// binding; the parent context is untouched.
    #[must_use]
    pub fn layered(&self, bindings: Vec<DefinedParameter>) -> Context {
        let mut child = self.clone();
        for binding in bindings {
            child.params.insert(binding.parameter_id.clone(), binding);
        }
        child
    }
}
