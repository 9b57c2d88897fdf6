use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Max entries in the in-memory embedding cache. 0 disables caching.
    pub cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}
