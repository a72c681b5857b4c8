//! The immutable symbol catalog.

use std::ops::Add;

use rustc_hash::FxHashMap;

use crate::{Macro, Parameter, SubjektFunction};

/// Immutable catalog of declared parameters, macros, and functions.
///
/// Built once through the chainable `define_*` methods (or by merging two
/// tables), then consulted read-only by discovery, inference and
/// evaluation. Macros are keyed by `(id, arg_count)`.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    parameters: FxHashMap<String, Parameter>,
    macros: FxHashMap<(String, usize), Macro>,
    functions: FxHashMap<String, SubjektFunction>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter declaration.
    #[must_use]
    pub fn define_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.insert(parameter.id.clone(), parameter);
        self
    }

    /// Add a macro declaration.
    #[must_use]
    pub fn define_macro(mut self, mac: Macro) -> Self {
        self.macros.insert((mac.id.clone(), mac.arg_count()), mac);
        self
    }

    /// Register a function.
    #[must_use]
    pub fn define_function(mut self, function: SubjektFunction) -> Self {
        self.functions.insert(function.id().to_owned(), function);
        self
    }

    /// Look up a parameter by id.
    pub fn resolve_parameter(&self, id: &str) -> Option<&Parameter> {
        self.parameters.get(id)
    }

    /// Look up a macro by id and arity.
    pub fn resolve_macro(&self, id: &str, arg_count: usize) -> Option<&Macro> {
        self.macros.get(&(id.to_owned(), arg_count))
    }

    /// Look up a function by id.
    pub fn resolve_function(&self, id: &str) -> Option<&SubjektFunction> {
        self.functions.get(id)
    }

    /// Merge two tables; declarations in `other` win on key collisions.
    #[must_use]
    pub fn merge(&self, other: &SymbolTable) -> SymbolTable {
        let mut merged = self.clone();
        merged
            .parameters
            .extend(other.parameters.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
            .macros
            .extend(other.macros.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
            .functions
            .extend(other.functions.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

impl Add for SymbolTable {
    type Output = SymbolTable;

    fn add(self, other: SymbolTable) -> SymbolTable {
        self.merge(&other)
    }
}
