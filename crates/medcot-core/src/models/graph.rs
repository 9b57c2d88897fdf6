//! Provenance-tagged knowledge graph: nodes, edges, and the fused per-query graph.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::path::PathStep;
use super::provenance::Provenance;
use crate::constants::UNKNOWN_NODE_NAME;

/// Node identifier. Identity across sources is plain string equality.
pub type NodeId = String;

/// A knowledge-graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub provenance: Provenance,
}

impl Node {
    pub fn new(
        id: impl Into<String>,
        node_type: impl Into<String>,
        name: impl Into<String>,
        provenance: Provenance,
    ) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            name: name.into(),
            provenance,
        }
    }
}

/// A directed, typed knowledge-graph edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub edge_type: String,
    #[serde(default)]
    pub provenance: Provenance,
    /// Primary knowledge source reported by a federated lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_source: Option<String>,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        edge_type: impl Into<String>,
        provenance: Provenance,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            edge_type: edge_type.into(),
            provenance,
            remote_source: None,
        }
    }

    pub fn with_remote_source(mut self, remote_source: impl Into<String>) -> Self {
        self.remote_source = Some(remote_source.into());
        self
    }

    /// Human-readable relation: lower-cased, underscores replaced by spaces.
    pub fn edge_text(&self) -> String {
        self.edge_type.to_lowercase().replace('_', " ")
    }
}

/// Serialized shape of a graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct GraphParts {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// A per-query graph: unique nodes in insertion order plus an edge list.
///
/// Node ids are unique; the first node inserted under an id wins. As a
/// container this type does not require edge endpoints to exist, since
/// source subgraphs (e.g. the patient state graph) point into other
/// sources. Fusion is what enforces endpoint presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GraphParts", into = "GraphParts")]
pub struct FusedGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: HashMap<NodeId, usize>,
}

impl FusedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw parts. Duplicate node ids collapse to the first occurrence.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        graph.edges = edges;
        graph
    }

    /// Insert a node unless its id is already present. Returns whether it was inserted.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.index.contains_key(&node.id) {
            return false;
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Keep only the edges matching the predicate, preserving order.
    pub fn retain_edges(&mut self, keep: impl FnMut(&Edge) -> bool) {
        self.edges.retain(keep);
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Display name of a node: its name, or the id itself when unknown.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.node(id).map(|n| n.name.as_str()).unwrap_or(id)
    }

    /// Name used in path renderings; unknown nodes render as "Unknown".
    pub fn path_name(&self, id: &str) -> &str {
        self.node(id)
            .map(|n| n.name.as_str())
            .unwrap_or(UNKNOWN_NODE_NAME)
    }

    /// Total in + out degree of a node.
    pub fn degree(&self, id: &str) -> usize {
        self.edges
            .iter()
            .filter(|e| e.source == id || e.target == id)
            .count()
    }

    /// Node count per provenance source.
    pub fn provenance_breakdown(&self) -> BTreeMap<Provenance, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            *counts.entry(node.provenance).or_insert(0) += 1;
        }
        counts
    }

    /// Render steps as `"A --[rel]--> B B --[rel]--> C"`.
    pub fn describe_path(&self, steps: &[PathStep]) -> String {
        steps
            .iter()
            .map(|s| {
                format!(
                    "{} --[{}]--> {}",
                    self.path_name(&s.source),
                    s.edge_text,
                    self.path_name(&s.target)
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<GraphParts> for FusedGraph {
    fn from(parts: GraphParts) -> Self {
        Self::from_parts(parts.nodes, parts.edges)
    }
}

impl From<FusedGraph> for GraphParts {
    fn from(graph: FusedGraph) -> Self {
        Self {
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }
}
