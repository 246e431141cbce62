//! Type graph runtime representation.

use std::collections::HashMap;

use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};
use remold_core::token::TypeToken;

use crate::transformer::EdgeKey;

/// Directed graph of types connected by at least one registered transformer.
///
/// Vertices are the types appearing as a source or target in any
/// registration; edges are the distinct registered type pairs. The graph is
/// rebuilt additively and never pruned except on full reset. It is owned
/// exclusively by the registry.
///
/// Internally uses petgraph's `DiGraph` with a token-to-index map.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    /// The underlying directed graph.
    graph: DiGraph<TypeToken, ()>,
    /// Mapping from type token to petgraph's NodeIndex.
    indices: HashMap<TypeToken, NodeIndex>,
}

impl TypeGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an edge, creating missing vertices; idempotent for existing
    /// edges.
    pub fn add_edge(&mut self, key: EdgeKey) {
        let from = self.intern(key.from);
        let to = self.intern(key.to);
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Returns whether a type appears as a vertex.
    pub fn contains_vertex(&self, token: TypeToken) -> bool {
        self.indices.contains_key(&token)
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Removes all vertices and edges.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.indices.clear();
    }

    /// Returns the hop-count shortest route between two types.
    ///
    /// The result is the sequence of vertices visited after `from`, ending
    /// with `to`; it is empty when either endpoint is not a vertex, when no
    /// directed route exists, or when `from` and `to` are the same vertex.
    ///
    /// Among equal-length routes the choice follows the underlying traversal
    /// order and is not guaranteed deterministic across equivalent graphs —
    /// callers must not assume a specific route when several tie.
    pub fn shortest_path(&self, from: TypeToken, to: TypeToken) -> Vec<TypeToken> {
        let (Some(&start), Some(&goal)) = (self.indices.get(&from), self.indices.get(&to)) else {
            return Vec::new();
        };

        match astar(&self.graph, start, |n| n == goal, |_| 1usize, |_| 0) {
            Some((_, route)) => route
                .into_iter()
                .skip(1)
                .filter_map(|idx| self.graph.node_weight(idx).copied())
                .collect(),
            None => Vec::new(),
        }
    }

    fn intern(&mut self, token: TypeToken) -> NodeIndex {
        match self.indices.get(&token) {
            Some(&idx) => idx,
            None => {
                let idx = self.graph.add_node(token);
                self.indices.insert(token, idx);
                idx
            }
        }
    }
}
