//! Facade over the Subjekt expression engine.
//!
//! Wires the phases into the canonical control flow: parse → discover
//! symbols → resolve against the symbol table → enumerate contexts → for
//! each context, infer types then evaluate then format. [`Template`] is the
//! entry point; the individual phase APIs are re-exported for hosts that
//! drive them directly.
//!
//! Contexts are independent pure values, so batch resolution is
//! embarrassingly parallel: [`Template::resolve_all_par`] fans sibling
//! contexts out over a rayon pool without changing any semantics.

mod error;

pub use error::EngineError;

// Phase APIs, re-exported as the public engine surface.
pub use subjekt_diagnostic::{Diagnostic, Diagnostics, Severity};
pub use subjekt_eval::{
    collect_symbols, discover, enumerate_contexts, evaluate, index, resolve, slice,
    slice_bindings, SliceBindings,
};
pub use subjekt_ir::{ExprTree, SharedInterner, Span, ValueType};
pub use subjekt_parse::{parse, ParseError};
pub use subjekt_symbols::{
    Context, DefinedMacro, DefinedParameter, EvalError, EvalErrorKind, Macro, Parameter,
    Resolvable, ResolvableSymbol, SubjektFunction, SymbolTable, TemplateDelimiters, Value,
};
pub use subjekt_types::{infer_types, TypeError, TypeMap};

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

/// One or more templates compiled together.
///
/// The templates share one interner and one discovery pass: the enumerated
/// contexts cover every symbol any of them references, and resolving one
/// context yields one concrete string per template.
#[derive(Clone, Debug)]
pub struct Template {
    resolvables: Vec<Resolvable>,
}

impl Template {
    /// Compile template strings with the conventional `${{ }}` delimiters.
    pub fn compile(sources: &[&str]) -> Result<Self, EngineError> {
        Self::compile_with(sources, &TemplateDelimiters::default())
    }

    /// Compile template strings with custom delimiters.
    pub fn compile_with(
        sources: &[&str],
        delimiters: &TemplateDelimiters,
    ) -> Result<Self, EngineError> {
        let interner = SharedInterner::new();
        let mut resolvables = Vec::with_capacity(sources.len());
        for source in sources {
            resolvables.push(Resolvable::compile(source, delimiters, &interner)?);
        }
        Ok(Template { resolvables })
    }

    /// The compiled templates.
    pub fn resolvables(&self) -> &[Resolvable] {
        &self.resolvables
    }

    /// Discover every transitively referenced symbol and enumerate the full
    /// duplicate-free set of contexts needed to resolve these templates.
    pub fn contexts(&self, table: &Arc<SymbolTable>) -> Result<Vec<Context>, EngineError> {
        let symbols = discover(table, &self.resolvables)?;
        Ok(enumerate_contexts(table, &symbols)?)
    }

    /// Resolve every template against one context: one string per template.
    pub fn resolve_in(
        &self,
        ctx: &Context,
        diags: &mut Diagnostics,
    ) -> Result<Vec<String>, EngineError> {
        let mut out = Vec::with_capacity(self.resolvables.len());
        for resolvable in &self.resolvables {
            out.push(resolve(resolvable, ctx, diags)?);
        }
        Ok(out)
    }

    /// Enumerate and resolve every context, in order.
    pub fn resolve_all(
        &self,
        table: &Arc<SymbolTable>,
        diags: &mut Diagnostics,
    ) -> Result<Vec<Vec<String>>, EngineError> {
        let contexts = self.contexts(table)?;
        debug!(contexts = contexts.len(), "resolving all contexts");
        let mut out = Vec::with_capacity(contexts.len());
        for ctx in &contexts {
            out.push(self.resolve_in(ctx, diags)?);
        }
        Ok(out)
    }

    /// Enumerate and resolve every context across a rayon pool.
    ///
    /// Semantics match [`Template::resolve_all`]: same result set, and a
    /// failure in one context fails the batch without corrupting any other
    /// context's resolution. Per-context diagnostics are merged into
    /// `diags` afterwards in context order.
    pub fn resolve_all_par(
        &self,
        table: &Arc<SymbolTable>,
        diags: &mut Diagnostics,
    ) -> Result<Vec<Vec<String>>, EngineError> {
        let contexts = self.contexts(table)?;
        debug!(contexts = contexts.len(), "resolving all contexts in parallel");
        let resolved: Vec<Result<(Vec<String>, Diagnostics), EngineError>> = contexts
            .par_iter()
            .map(|ctx| {
                let mut local = Diagnostics::new();
                let strings = self.resolve_in(ctx, &mut local)?;
                Ok((strings, local))
            })
            .collect();

        let mut out = Vec::with_capacity(resolved.len());
        for entry in resolved {
            let (strings, local) = entry?;
            diags.merge(local);
            out.push(strings);
        }
        Ok(out)
    }
}
