//! Graph builders for the reference scenarios.

use medcot_core::models::{Edge, FusedGraph, Node, Provenance};

pub const WARFARIN: &str = "DB00682";
pub const ASPIRIN: &str = "DB00945";
pub const HYPERTENSION: &str = "MONDO:0005044";
pub const METFORMIN: &str = "DB00331";
pub const DIABETES: &str = "MONDO:0005148";
pub const KIDNEY_DISEASE: &str = "MONDO:0005300";

pub fn drug(id: &str, name: &str) -> Node {
    Node::new(id, "Drug", name, Provenance::PrimeKg)
}

pub fn disease(id: &str, name: &str) -> Node {
    Node::new(id, "Disease", name, Provenance::PrimeKg)
}

pub fn edge(source: &str, target: &str, edge_type: &str) -> Edge {
    Edge::new(source, target, edge_type, Provenance::PrimeKg)
}

/// Warfarin and Aspirin interacting in both directions, plus one
/// contraindication from Aspirin.
pub fn warfarin_aspirin() -> FusedGraph {
    FusedGraph::from_parts(
        vec![
            drug(WARFARIN, "Warfarin"),
            drug(ASPIRIN, "Aspirin"),
            disease(HYPERTENSION, "Hypertension"),
        ],
        vec![
            edge(WARFARIN, ASPIRIN, "INTERACTS_WITH"),
            edge(ASPIRIN, WARFARIN, "INTERACTS_WITH"),
            edge(ASPIRIN, HYPERTENSION, "CONTRAINDICATION"),
        ],
    )
}

/// A drug connected to diseases only through contraindications.
pub fn contraindication_only() -> FusedGraph {
    FusedGraph::from_parts(
        vec![
            drug(METFORMIN, "Metformin"),
            disease(KIDNEY_DISEASE, "Chronic Kidney Disease"),
            disease(DIABETES, "Type 2 Diabetes"),
        ],
        vec![
            edge(METFORMIN, KIDNEY_DISEASE, "CONTRAINDICATION"),
            edge(KIDNEY_DISEASE, DIABETES, "ASSOCIATED_WITH"),
        ],
    )
}

/// Metformin indicated for diabetes: a single one-hop treatment path.
pub fn single_indication() -> FusedGraph {
    FusedGraph::from_parts(
        vec![drug(METFORMIN, "Metformin"), disease(DIABETES, "Type 2 Diabetes")],
        vec![edge(METFORMIN, DIABETES, "INDICATION")],
    )
}

/// A linear chain `n0 -> n1 -> ... -> n{len-1}` of RELATED_TO edges.
pub fn chain(len: usize) -> FusedGraph {
    let nodes = (0..len)
        .map(|i| Node::new(format!("n{i}"), "Entity", format!("Node {i}"), Provenance::PrimeKg))
        .collect();
    let edges = (1..len)
        .map(|i| edge(&format!("n{}", i - 1), &format!("n{i}"), "RELATED_TO"))
        .collect();
    FusedGraph::from_parts(nodes, edges)
}

/// Graph over `n` nodes from `(source, target, type index)` triples; out of
/// range endpoints are skipped.
pub fn from_triples(n: usize, triples: &[(usize, usize, usize)]) -> FusedGraph {
    const TYPES: [&str; 4] = ["INDICATION", "CONTRAINDICATION", "HAS_SYMPTOM", "RELATED_TO"];
    let nodes = (0..n)
        .map(|i| Node::new(format!("n{i}"), "Entity", format!("Node {i}"), Provenance::PrimeKg))
        .collect();
    let edges = triples
        .iter()
        .filter(|(s, t, _)| *s < n && *t < n)
        .map(|&(s, t, k)| edge(&format!("n{s}"), &format!("n{t}"), TYPES[k % TYPES.len()]))
        .collect();
    FusedGraph::from_parts(nodes, edges)
}
