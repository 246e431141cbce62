//! Transformer registry.

use std::collections::HashMap;

use crate::error::{RegistryError, RegistryResult};
use crate::graph::TypeGraph;
use crate::transformer::{EdgeKey, Transformer};

use super::edge_set::EdgeSet;

/// Tracing target for registry operations.
const TRACING_TARGET: &str = "remold_engine::registry";

/// Keyed storage of every registered transformer, plus the type graph
/// mirroring the registered edges.
///
/// Lifecycle: construct, register during a setup phase, then resolve against
/// the finished registry; `reset` returns it to the freshly constructed
/// state. Registration takes `&mut self` while lookup takes `&self`, so the
/// borrow checker rules out interleaved writes and reads — concurrent
/// resolutions against a shared `&TransformerRegistry` are pure reads and
/// need no locking.
#[derive(Debug, Default)]
pub struct TransformerRegistry {
    edges: HashMap<EdgeKey, EdgeSet>,
    graph: TypeGraph,
}

impl TransformerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transformer under its edge key.
    ///
    /// Fails when the transformer claims the default slot already taken for
    /// its edge, or when its name collides with a previously registered
    /// transformer on the same edge. Conflicts are fatal to the setup phase;
    /// the registry never silently picks one of the colliding transformers.
    pub fn register(&mut self, transformer: Transformer) -> RegistryResult<()> {
        let key = transformer.key();
        let set = self.edges.entry(key).or_default();

        if transformer.is_default() {
            if let Some(existing) = set.get_default() {
                return Err(RegistryError::DuplicateDefault {
                    from: key.from,
                    to: key.to,
                    existing: existing.name().to_owned(),
                    incoming: transformer.name().to_owned(),
                });
            }
        }

        if set.get_by_name(transformer.name()).is_some() {
            return Err(RegistryError::DuplicateName {
                from: key.from,
                to: key.to,
                name: transformer.name().to_owned(),
            });
        }

        tracing::debug!(
            target: TRACING_TARGET,
            edge = %key,
            name = transformer.name(),
            is_default = transformer.is_default(),
            "Transformer registered"
        );

        set.push(transformer);
        self.graph.add_edge(key);
        Ok(())
    }

    /// Returns the transformer set for an exact edge key.
    ///
    /// No subtype or assignability matching is performed.
    pub fn lookup(&self, key: &EdgeKey) -> Option<&EdgeSet> {
        self.edges.get(key)
    }

    /// Returns the graph of registered edges.
    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    /// Returns the number of distinct edges with at least one transformer.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the total number of registered transformers.
    pub fn transformer_count(&self) -> usize {
        self.edges.values().map(EdgeSet::len).sum()
    }

    /// Returns whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Clears all transformers and graph state back to empty.
    ///
    /// A reset registry is indistinguishable from a freshly constructed one;
    /// intended primarily for test isolation between registration scenarios.
    pub fn reset(&mut self) {
        self.edges.clear();
        self.graph.clear();
        tracing::debug!(target: TRACING_TARGET, "Registry reset");
    }
}
