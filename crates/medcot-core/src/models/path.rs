//! Reasoning paths: steps over the fused graph and scored candidates.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::provenance::Provenance;
use crate::errors::GraphError;

/// One hop of a reasoning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub source: String,
    pub target: String,
    pub edge_type: String,
    /// Lower-cased relation with underscores replaced by spaces.
    pub edge_text: String,
    pub provenance: Provenance,
}

/// A candidate reasoning path with its scores at each pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCandidate {
    pub steps: Vec<PathStep>,
    /// Textual representation, also the deduplication key.
    pub text: String,
    /// Cumulative semantic relevance from the beam search.
    pub beam_score: f64,
    /// Raw cross-encoder logit.
    pub rerank_score: Option<f64>,
    /// `beam_weight * beam_score + rerank_weight * sigmoid(rerank_score)`.
    pub combined_score: Option<f64>,
    /// Calibrated verifier confidence in [0, 1].
    pub verification_confidence: Option<f64>,
}

impl PathCandidate {
    /// Build a candidate, rejecting empty, disconnected, or cyclic step lists.
    pub fn new(
        steps: Vec<PathStep>,
        text: impl Into<String>,
        beam_score: f64,
    ) -> Result<Self, GraphError> {
        let first = steps.first().ok_or(GraphError::EmptyPath)?;

        let mut seen: HashSet<&str> = HashSet::with_capacity(steps.len() + 1);
        seen.insert(first.source.as_str());
        for pair in steps.windows(2) {
            if pair[0].target != pair[1].source {
                return Err(GraphError::DisconnectedPath {
                    from: pair[0].target.clone(),
                    to: pair[1].source.clone(),
                });
            }
        }
        for step in &steps {
            if !seen.insert(step.target.as_str()) {
                return Err(GraphError::CyclicPath {
                    node_id: step.target.clone(),
                });
            }
        }

        Ok(Self {
            steps,
            text: text.into(),
            beam_score,
            rerank_score: None,
            combined_score: None,
            verification_confidence: None,
        })
    }

    /// Number of hops.
    pub fn hop_count(&self) -> usize {
        self.steps.len()
    }

    /// Node ids visited, in order (source of the first step first).
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            ids.push(first.source.as_str());
        }
        ids.extend(self.steps.iter().map(|s| s.target.as_str()));
        ids
    }

    /// Score used for ranking: combined when reranked, beam score otherwise.
    pub fn ranking_score(&self) -> f64 {
        self.combined_score.unwrap_or(self.beam_score)
    }
}
