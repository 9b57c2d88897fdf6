use serde::{Deserialize, Serialize};

use super::defaults;

/// Federated knowledge-graph lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FederatedConfig {
    /// Whether the federated source is consulted at all.
    pub enabled: bool,
    /// Total attempts per identifier pair (first try included).
    pub max_attempts: u32,
    /// Fixed delay between attempts, in milliseconds.
    pub retry_delay_ms: u64,
    /// Maximum results requested per identifier pair.
    pub max_results: usize,
}

impl Default for FederatedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: defaults::DEFAULT_FEDERATED_MAX_ATTEMPTS,
            retry_delay_ms: defaults::DEFAULT_FEDERATED_RETRY_DELAY_MS,
            max_results: defaults::DEFAULT_FEDERATED_MAX_RESULTS,
        }
    }
}
