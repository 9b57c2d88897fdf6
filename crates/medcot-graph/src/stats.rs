//! Summary statistics for a fused graph.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use medcot_core::models::FusedGraph;

use crate::indexed::IndexedGraph;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Node count per provenance tag.
    pub provenance: BTreeMap<String, usize>,
    /// Nodes touched by no edge.
    pub isolated_nodes: usize,
    /// Strongly connected components larger than one node.
    pub cyclic_components: usize,
}

impl GraphStats {
    pub fn of(graph: &FusedGraph) -> Self {
        let indexed = IndexedGraph::from_fused(graph);
        let isolated_nodes = graph
            .nodes()
            .iter()
            .filter(|n| indexed.get_node(&n.id).is_none())
            .count();
        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            provenance: graph
                .provenance_breakdown()
                .into_iter()
                .map(|(p, count)| (p.as_tag().to_string(), count))
                .collect(),
            isolated_nodes,
            cyclic_components: indexed.cyclic_components().len(),
        }
    }

    /// JSON form for audit metadata.
    pub fn to_metadata(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
