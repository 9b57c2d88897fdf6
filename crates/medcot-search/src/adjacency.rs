//! Intent-filtered adjacency over a fused graph.

use tracing::info;

use medcot_core::intent::Intent;
use medcot_core::models::{Edge, FusedGraph};
use medcot_graph::IndexedGraph;

/// Outgoing edges per source node, restricted to the edge types an intent allows.
pub struct Adjacency<'g> {
    graph: &'g FusedGraph,
    index: IndexedGraph,
    intent: Intent,
}

impl<'g> Adjacency<'g> {
    /// Keep an edge iff its lower-cased type contains an allowed substring.
    /// `Intent::Generic` keeps every edge.
    pub fn build(graph: &'g FusedGraph, intent: Intent) -> Self {
        let index = IndexedGraph::from_fused_filtered(graph, |e| intent.permits(&e.edge_type));
        info!(
            intent = %intent,
            valid_edges = index.edge_count(),
            total_edges = graph.edge_count(),
            "adjacency built"
        );
        Self {
            graph,
            index,
            intent,
        }
    }

    pub fn unconstrained(graph: &'g FusedGraph) -> Self {
        Self::build(graph, Intent::Generic)
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn graph(&self) -> &'g FusedGraph {
        self.graph
    }

    /// Whether the node is a key of the adjacency map (has a kept outgoing edge).
    pub fn contains(&self, id: &str) -> bool {
        self.index.has_outgoing(id)
    }

    /// `(edge, neighbor id)` pairs in edge order.
    pub fn neighbors(&self, id: &str) -> Vec<(&'g Edge, &str)> {
        let edges = self.graph.edges();
        self.index
            .outgoing(id)
            .into_iter()
            .filter_map(|(position, neighbor)| edges.get(position).map(|e| (e, neighbor)))
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.index.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcot_core::models::{Node, Provenance};

    fn graph() -> FusedGraph {
        FusedGraph::from_parts(
            vec![
                Node::new("d", "Drug", "Metformin", Provenance::PrimeKg),
                Node::new("x", "Disease", "CKD", Provenance::PrimeKg),
                Node::new("y", "Disease", "T2D", Provenance::PrimeKg),
            ],
            vec![
                Edge::new("d", "x", "CONTRAINDICATION", Provenance::PrimeKg),
                Edge::new("d", "y", "INDICATION", Provenance::PrimeKg),
            ],
        )
    }

    #[test]
    fn treatment_keeps_indications_only() {
        let g = graph();
        let adj = Adjacency::build(&g, Intent::Treatment);
        let neighbors: Vec<&str> = adj.neighbors("d").into_iter().map(|(_, n)| n).collect();
        assert_eq!(neighbors, vec!["y"]);
        assert_eq!(adj.edge_count(), 1);
    }

    #[test]
    fn generic_keeps_everything_in_order() {
        let g = graph();
        let adj = Adjacency::unconstrained(&g);
        let types: Vec<&str> = adj
            .neighbors("d")
            .into_iter()
            .map(|(e, _)| e.edge_type.as_str())
            .collect();
        assert_eq!(types, vec!["CONTRAINDICATION", "INDICATION"]);
        assert!(adj.contains("d"));
        assert!(!adj.contains("y"));
    }
}
