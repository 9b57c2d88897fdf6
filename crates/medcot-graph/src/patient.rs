//! Patient state graph (PSG).
//!
//! One patient node per query, one observation node per linked mention from
//! the patient context. Observations point into the knowledge graph through
//! `GROUNDED_IN`; those targets come from other sources and are resolved at
//! fusion time.

use medcot_core::models::{Edge, FusedGraph, LinkedEntity, MentionSource, Node, Provenance};

pub const PATIENT_NODE_TYPE: &str = "Patient";
pub const PATIENT_NODE_NAME: &str = "The Patient";
pub const OBSERVATION_NODE_TYPE: &str = "Observation";
pub const PRESENTS_WITH: &str = "PRESENTS_WITH";
pub const GROUNDED_IN: &str = "GROUNDED_IN";

/// First eight characters of the query id, used to namespace PSG node ids.
fn query_prefix(query_id: &str) -> &str {
    match query_id.char_indices().nth(8) {
        Some((end, _)) => &query_id[..end],
        None => query_id,
    }
}

/// Id of the patient node for a query.
pub fn patient_node_id(query_id: &str) -> String {
    format!("PATIENT_{}", query_prefix(query_id))
}

/// Build the patient state graph from linked entities.
///
/// Only mentions sourced from the patient context and linked to a node id
/// produce observations; everything else is skipped.
pub fn build_patient_graph(query_id: &str, observations: &[LinkedEntity]) -> FusedGraph {
    let prefix = query_prefix(query_id);
    let patient_id = patient_node_id(query_id);

    let mut graph = FusedGraph::new();
    graph.add_node(Node::new(
        patient_id.clone(),
        PATIENT_NODE_TYPE,
        PATIENT_NODE_NAME,
        Provenance::Psg,
    ));

    let linked = observations
        .iter()
        .filter(|o| o.source == MentionSource::PatientContext)
        .filter_map(|o| o.node_id.as_deref().map(|id| (o, id)));

    for (n, (observation, target_id)) in linked.enumerate() {
        let event_id = format!("EVT_{prefix}_{n}");
        graph.add_node(Node::new(
            event_id.clone(),
            OBSERVATION_NODE_TYPE,
            observation.mention_text.clone(),
            Provenance::Psg,
        ));
        graph.add_edge(Edge::new(
            patient_id.clone(),
            event_id.clone(),
            PRESENTS_WITH,
            Provenance::Psg,
        ));
        graph.add_edge(Edge::new(event_id, target_id, GROUNDED_IN, Provenance::Psg));
    }

    graph
}
