use serde::{Deserialize, Serialize};

use crate::errors::LookupError;

/// An edge returned by a federated knowledge-graph lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteEdge {
    pub subject_id: String,
    pub subject_name: String,
    pub object_id: String,
    pub object_name: String,
    /// Raw predicate, possibly prefixed (e.g. `biolink:interacts_with`).
    pub predicate: String,
    /// Primary knowledge source attribute, when reported.
    pub primary_source: Option<String>,
}

/// Federated knowledge-graph collaborator.
///
/// Implementations classify failures: `LookupError::Transient` (service busy,
/// timeouts) is retried by the caller, `LookupError::Permanent` is not.
pub trait IFederatedSource: Send + Sync {
    /// Edges connecting two identifiers.
    fn query_pair(
        &self,
        subject: &str,
        object: &str,
        max_results: usize,
    ) -> Result<Vec<RemoteEdge>, LookupError>;

    fn name(&self) -> &str;
}
