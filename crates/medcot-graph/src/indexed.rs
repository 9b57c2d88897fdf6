//! petgraph view over a fused graph.
//!
//! Nodes carry their string id, edges carry the position of the original
//! edge in `FusedGraph::edges`, so callers can recover edge order and the
//! full edge record.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};

use medcot_core::models::{Edge, FusedGraph, NodeId};

/// Directed graph with an id → index lookup.
#[derive(Debug, Clone, Default)]
pub struct IndexedGraph {
    pub graph: StableGraph<NodeId, usize, Directed>,
    node_index: HashMap<NodeId, NodeIndex>,
}

impl IndexedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every edge of a fused graph.
    pub fn from_fused(graph: &FusedGraph) -> Self {
        Self::from_fused_filtered(graph, |_| true)
    }

    /// Index only the edges matching `keep`. Nodes appear only as edge endpoints.
    pub fn from_fused_filtered(graph: &FusedGraph, keep: impl Fn(&Edge) -> bool) -> Self {
        let mut indexed = Self::new();
        for (position, edge) in graph.edges().iter().enumerate() {
            if !keep(edge) {
                continue;
            }
            let source = indexed.ensure_node(&edge.source);
            let target = indexed.ensure_node(&edge.target);
            indexed.graph.add_edge(source, target, position);
        }
        indexed
    }

    /// Get or create the node for an id.
    pub fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_index.insert(id.to_string(), idx);
        idx
    }

    pub fn get_node(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the node has at least one outgoing edge.
    pub fn has_outgoing(&self, id: &str) -> bool {
        self.get_node(id).is_some_and(|idx| {
            self.graph
                .edges_directed(idx, Direction::Outgoing)
                .next()
                .is_some()
        })
    }

    /// Outgoing `(edge position, neighbor id)` pairs in original edge order.
    pub fn outgoing(&self, id: &str) -> Vec<(usize, &str)> {
        let Some(idx) = self.get_node(id) else {
            return Vec::new();
        };
        let mut out: Vec<(usize, &str)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .filter_map(|e| {
                self.graph
                    .node_weight(e.target())
                    .map(|neighbor| (*e.weight(), neighbor.as_str()))
            })
            .collect();
        // petgraph yields the most recent edge first.
        out.sort_unstable_by_key(|(position, _)| *position);
        out
    }

    /// Strongly connected components with more than one node, as id lists.
    pub fn cyclic_components(&self) -> Vec<Vec<NodeId>> {
        tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut ids: Vec<NodeId> = scc
                    .into_iter()
                    .filter_map(|idx| self.graph.node_weight(idx).cloned())
                    .collect();
                ids.sort();
                ids
            })
            .collect()
    }
}
