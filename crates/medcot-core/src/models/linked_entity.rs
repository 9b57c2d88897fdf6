use serde::{Deserialize, Serialize};

use super::provenance::Provenance;

/// Where a mention was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionSource {
    #[default]
    Query,
    PatientContext,
}

/// A recognized mention linked (or not) to a graph node by upstream linking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedEntity {
    pub mention_text: String,
    /// Normalized graph node id, `None` when linking failed.
    pub node_id: Option<String>,
    #[serde(default)]
    pub node_type: String,
    #[serde(default)]
    pub provenance: Provenance,
    #[serde(default)]
    pub source: MentionSource,
}

impl LinkedEntity {
    pub fn is_linked(&self) -> bool {
        self.node_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}
