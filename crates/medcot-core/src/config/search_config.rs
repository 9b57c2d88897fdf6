use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::SearchError;

/// Beam search and reranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of partial paths kept per expansion round.
    pub beam_width: usize,
    /// Maximum path length in nodes (hops = length - 1).
    pub max_path_length: usize,
    /// Number of reranked candidates handed to the verifier.
    pub rerank_top_k: usize,
    /// Weight of the cumulative beam score in the combined score.
    pub beam_weight: f64,
    /// Weight of the squashed cross-encoder logit in the combined score.
    pub rerank_weight: f64,
}

impl SearchConfig {
    /// Reject parameters the beam search cannot run with.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.beam_width == 0 {
            return Err(SearchError::ZeroBeamWidth);
        }
        if self.max_path_length < 2 {
            return Err(SearchError::DepthTooShallow {
                depth: self.max_path_length,
            });
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            beam_width: defaults::DEFAULT_BEAM_WIDTH,
            max_path_length: defaults::DEFAULT_MAX_PATH_LENGTH,
            rerank_top_k: defaults::DEFAULT_RERANK_TOP_K,
            beam_weight: defaults::DEFAULT_BEAM_WEIGHT,
            rerank_weight: defaults::DEFAULT_RERANK_WEIGHT,
        }
    }
}
