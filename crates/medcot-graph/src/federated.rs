//! Federated knowledge-graph lookup with bounded retry.
//!
//! Every unordered pair of identifiers is queried. A pair whose lookup
//! fails after retries contributes nothing; the rest of the subgraph is
//! still returned.

use std::time::Duration;

use tracing::{debug, info, warn};

use medcot_core::config::FederatedConfig;
use medcot_core::errors::LookupError;
use medcot_core::models::{Edge, FusedGraph, Node, Provenance};
use medcot_core::traits::IFederatedSource;

/// Node type given to endpoints discovered through a federated lookup.
pub const EXTERNAL_NODE_TYPE: &str = "ExternalEntity";

/// Predicate used when the remote side reports none.
const FALLBACK_PREDICATE: &str = "RELATED_TO";

/// Fixed-delay retry for fallible lookups.
///
/// Only `LookupError::Transient` is retried. `max_attempts` counts the first
/// try, so a policy with 3 attempts sleeps at most twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&FederatedConfig::default())
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &FederatedConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.retry_delay_ms),
        )
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    /// The closure receives the 1-based attempt number.
    pub fn run<T>(
        &self,
        mut op: impl FnMut(u32) -> Result<T, LookupError>,
    ) -> Result<T, LookupError> {
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "transient lookup failure, retrying"
                    );
                    if !self.delay.is_zero() {
                        std::thread::sleep(self.delay);
                    }
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Strip a namespace prefix (`biolink:interacts_with`) and upper-case.
pub fn normalize_predicate(predicate: &str) -> String {
    let bare = predicate.rsplit(':').next().unwrap_or(predicate).trim();
    if bare.is_empty() {
        FALLBACK_PREDICATE.to_string()
    } else {
        bare.to_uppercase()
    }
}

/// Query every unordered pair of identifiers and assemble an ARAX/KG2 subgraph.
///
/// Fewer than two distinct identifiers yields an empty graph.
pub fn fetch_subgraph(
    source: &dyn IFederatedSource,
    identifiers: &[String],
    policy: &RetryPolicy,
    max_results: usize,
) -> FusedGraph {
    let mut ids: Vec<&str> = Vec::with_capacity(identifiers.len());
    for id in identifiers {
        if !ids.contains(&id.as_str()) {
            ids.push(id.as_str());
        }
    }

    let mut graph = FusedGraph::new();
    if ids.len() < 2 {
        return graph;
    }

    let mut failed_pairs = 0usize;
    for (i, subject) in ids.iter().enumerate() {
        for object in &ids[i + 1..] {
            let result = policy.run(|_| source.query_pair(subject, object, max_results));
            let remote_edges = match result {
                Ok(edges) => edges,
                Err(err) => {
                    warn!(
                        source = source.name(),
                        subject = %subject,
                        object = %object,
                        error = %err,
                        "federated lookup degraded to empty result"
                    );
                    failed_pairs += 1;
                    continue;
                }
            };
            debug!(
                subject = %subject,
                object = %object,
                edges = remote_edges.len(),
                "federated pair resolved"
            );

            for remote in remote_edges {
                graph.add_node(Node::new(
                    remote.subject_id.clone(),
                    EXTERNAL_NODE_TYPE,
                    remote.subject_name,
                    Provenance::AraxKg2,
                ));
                graph.add_node(Node::new(
                    remote.object_id.clone(),
                    EXTERNAL_NODE_TYPE,
                    remote.object_name,
                    Provenance::AraxKg2,
                ));
                let remote_source = remote
                    .primary_source
                    .unwrap_or_else(|| Provenance::AraxKg2.as_tag().to_string());
                graph.add_edge(
                    Edge::new(
                        remote.subject_id,
                        remote.object_id,
                        normalize_predicate(&remote.predicate),
                        Provenance::AraxKg2,
                    )
                    .with_remote_source(remote_source),
                );
            }
        }
    }

    info!(
        source = source.name(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        failed_pairs,
        "federated subgraph fetched"
    );
    graph
}
