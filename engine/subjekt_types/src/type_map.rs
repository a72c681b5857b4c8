//! Inferred types, parallel to the expression arena.

use subjekt_ir::{ExprId, ValueType};

/// `ExprId -> ValueType` map produced by one inference pass.
///
/// Stored as a dense vector indexed by arena position, so IR nodes stay
/// immutable and shareable across repeated evaluations against different
/// contexts.
#[derive(Clone, Debug, Default)]
pub struct TypeMap {
    types: Vec<Option<ValueType>>,
}

impl TypeMap {
    /// Create a map sized for an arena.
    pub fn with_capacity(len: usize) -> Self {
        TypeMap {
            types: vec![None; len],
        }
    }

    /// Record the inferred type of a node.
    pub fn set(&mut self, id: ExprId, ty: ValueType) {
        let index = id.index();
        if index >= self.types.len() {
            self.types.resize(index + 1, None);
        }
        self.types[index] = Some(ty);
    }

    /// The inferred type of a node, if the pass reached it.
    pub fn get(&self, id: ExprId) -> Option<ValueType> {
        self.types.get(id.index()).copied().flatten()
    }
}
