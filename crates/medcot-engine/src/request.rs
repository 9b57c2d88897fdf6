//! Upstream input for one query.

use serde::{Deserialize, Serialize};

use medcot_core::models::{FusedGraph, LinkedEntity, MentionSource};

/// Everything upstream stages hand over for one query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReasoningRequest {
    pub query_id: String,
    /// Normalized query text.
    pub query_text: String,
    #[serde(default)]
    pub entities: Vec<LinkedEntity>,
    /// Search starting points.
    #[serde(default)]
    pub seed_node_ids: Vec<String>,
    /// Provenance-tagged subgraphs, in merge order.
    #[serde(default)]
    pub subgraphs: Vec<FusedGraph>,
    /// Precomputed query embedding. Computed from the text when absent.
    #[serde(default)]
    pub query_embedding: Option<Vec<f32>>,
    /// Generated answer, if any.
    #[serde(default)]
    pub answer_text: String,
}

impl ReasoningRequest {
    /// A request with a fresh query id.
    pub fn new(query_text: impl Into<String>) -> Self {
        Self {
            query_id: uuid::Uuid::new_v4().to_string(),
            query_text: query_text.into(),
            ..Self::default()
        }
    }

    pub fn with_query_id(mut self, query_id: impl Into<String>) -> Self {
        self.query_id = query_id.into();
        self
    }

    pub fn with_seeds<I, S>(mut self, seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seed_node_ids = seeds.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_entities(mut self, entities: Vec<LinkedEntity>) -> Self {
        self.entities = entities;
        self
    }

    pub fn with_subgraph(mut self, graph: FusedGraph) -> Self {
        self.subgraphs.push(graph);
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.query_embedding = Some(embedding);
        self
    }

    pub fn with_answer_text(mut self, answer_text: impl Into<String>) -> Self {
        self.answer_text = answer_text.into();
        self
    }

    /// Node ids of the entities mentioned in the query itself, followed by
    /// any seed not already listed. Order is preserved, duplicates dropped.
    pub fn query_entity_ids(&self) -> Vec<String> {
        let linked = self
            .entities
            .iter()
            .filter(|e| e.source == MentionSource::Query && e.is_linked())
            .filter_map(|e| e.node_id.as_deref());

        let mut ids: Vec<String> = Vec::new();
        for id in linked.chain(self.seed_node_ids.iter().map(String::as_str)) {
            if !ids.iter().any(|known| known == id) {
                ids.push(id.to_string());
            }
        }
        ids
    }
}
