//! Property tests for medcot-graph fusion.

use proptest::prelude::*;

use medcot_core::models::{Edge, FusedGraph, Node, Provenance};
use medcot_graph::fuse;

fn provenance_strategy() -> impl Strategy<Value = Provenance> {
    prop::sample::select(Provenance::ALL.to_vec())
}

/// A source graph over a small shared id space so duplicates are common.
fn source_strategy() -> impl Strategy<Value = FusedGraph> {
    (
        prop::collection::vec((0..12usize, provenance_strategy()), 0..10),
        prop::collection::vec((0..14usize, 0..14usize), 0..15),
    )
        .prop_map(|(nodes, edges)| {
            let nodes = nodes
                .into_iter()
                .map(|(i, p)| Node::new(format!("n{i}"), "Entity", format!("{p}-{i}"), p))
                .collect();
            let edges = edges
                .into_iter()
                .map(|(s, t)| Edge::new(format!("n{s}"), format!("n{t}"), "RELATED_TO", Provenance::Default))
                .collect();
            FusedGraph::from_parts(nodes, edges)
        })
}

// =============================================================================
// Fusion identity: unique ids, first occurrence wins, edges fully anchored
// =============================================================================
proptest! {
    #[test]
    fn fusion_identity(sources in prop::collection::vec(source_strategy(), 0..5)) {
        let fused = fuse(&sources);

        // Node ids are unique.
        let mut ids: Vec<&str> = fused.nodes().iter().map(|n| n.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);

        // Each node is the first occurrence across sources in order.
        for node in fused.nodes() {
            let first = sources
                .iter()
                .flat_map(|s| s.nodes())
                .find(|n| n.id == node.id);
            prop_assert_eq!(Some(node), first);
        }

        // Every source node id is present.
        for node in sources.iter().flat_map(|s| s.nodes()) {
            prop_assert!(fused.contains(&node.id));
        }

        // Every edge has both endpoints, and every anchored source edge survives in order.
        for edge in fused.edges() {
            prop_assert!(fused.contains(&edge.source) && fused.contains(&edge.target));
        }
        let expected: Vec<&Edge> = sources
            .iter()
            .flat_map(|s| s.edges())
            .filter(|e| fused.contains(&e.source) && fused.contains(&e.target))
            .collect();
        let actual: Vec<&Edge> = fused.edges().iter().collect();
        prop_assert_eq!(actual, expected);
    }
}

proptest! {
    #[test]
    fn fusing_a_fused_graph_is_stable(sources in prop::collection::vec(source_strategy(), 1..4)) {
        let once = fuse(&sources);
        let twice = fuse(std::slice::from_ref(&once));
        prop_assert_eq!(once, twice);
    }
}
