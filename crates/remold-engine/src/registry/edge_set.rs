//! Per-edge transformer set.

use crate::transformer::Transformer;

/// The transformers registered under one edge key.
///
/// Created lazily on first registration for the key, grows monotonically
/// during setup, and is cleared only by a full registry reset. The registry
/// upholds the set's invariants (at most one default, unique names); the set
/// itself only stores and probes.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    transformers: Vec<Transformer>,
}

impl EdgeSet {
    pub(crate) fn push(&mut self, transformer: Transformer) {
        self.transformers.push(transformer);
    }

    /// Returns the number of registered transformers.
    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Returns the transformers in registration order.
    pub fn transformers(&self) -> &[Transformer] {
        &self.transformers
    }

    /// Returns the default transformer, if one is registered.
    pub fn get_default(&self) -> Option<&Transformer> {
        self.transformers.iter().find(|t| t.is_default())
    }

    /// Returns the transformer with the given name, if present.
    pub fn get_by_name(&self, name: &str) -> Option<&Transformer> {
        self.transformers.iter().find(|t| t.name() == name)
    }

    /// Returns every registered transformer name, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.transformers.iter().map(|t| t.name().to_owned()).collect()
    }
}
