//! Subgraph fusion.
//!
//! Sources are merged in caller order. The first node seen under an id is
//! kept and later duplicates are discarded without merging attributes. An
//! edge survives only if both of its endpoints are in the fused node set.

use serde::{Deserialize, Serialize};
use tracing::debug;

use medcot_core::models::FusedGraph;

/// Counts of what fusion discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionReport {
    pub sources: usize,
    pub duplicate_nodes: usize,
    pub dropped_edges: usize,
}

/// Merge sources into one deduplicated graph.
pub fn fuse(sources: &[FusedGraph]) -> FusedGraph {
    fuse_with_report(sources).0
}

/// Merge sources and report how many duplicates and dangling edges were discarded.
pub fn fuse_with_report(sources: &[FusedGraph]) -> (FusedGraph, FusionReport) {
    let mut fused = FusedGraph::new();
    let mut report = FusionReport {
        sources: sources.len(),
        ..FusionReport::default()
    };

    for node in sources.iter().flat_map(|s| s.nodes()) {
        if !fused.add_node(node.clone()) {
            report.duplicate_nodes += 1;
        }
    }

    for edge in sources.iter().flat_map(|s| s.edges()) {
        if fused.contains(&edge.source) && fused.contains(&edge.target) {
            fused.add_edge(edge.clone());
        } else {
            report.dropped_edges += 1;
        }
    }

    debug!(
        sources = report.sources,
        nodes = fused.node_count(),
        edges = fused.edge_count(),
        duplicate_nodes = report.duplicate_nodes,
        dropped_edges = report.dropped_edges,
        "subgraphs fused"
    );

    (fused, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcot_core::models::{Edge, Node, Provenance};

    #[test]
    fn empty_input_yields_empty_graph() {
        let (graph, report) = fuse_with_report(&[]);
        assert!(graph.is_empty());
        assert_eq!(report, FusionReport::default());
    }

    #[test]
    fn earlier_source_wins_on_conflict() {
        let local = FusedGraph::from_parts(
            vec![Node::new("D1", "Drug", "Aspirin", Provenance::PrimeKg)],
            Vec::new(),
        );
        let remote = FusedGraph::from_parts(
            vec![Node::new("D1", "Drug", "acetylsalicylic acid", Provenance::AraxKg2)],
            Vec::new(),
        );
        let (graph, report) = fuse_with_report(&[local, remote]);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node("D1").unwrap().provenance, Provenance::PrimeKg);
        assert_eq!(report.duplicate_nodes, 1);
    }

    #[test]
    fn edge_may_connect_nodes_from_different_sources() {
        let a = FusedGraph::from_parts(
            vec![Node::new("A", "Drug", "A", Provenance::PrimeKg)],
            Vec::new(),
        );
        let b = FusedGraph::from_parts(
            vec![Node::new("B", "Disease", "B", Provenance::Psg)],
            vec![
                Edge::new("B", "A", "GROUNDED_IN", Provenance::Psg),
                Edge::new("B", "Z", "GROUNDED_IN", Provenance::Psg),
            ],
        );
        let (graph, report) = fuse_with_report(&[a, b]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(report.dropped_edges, 1);
    }
}
