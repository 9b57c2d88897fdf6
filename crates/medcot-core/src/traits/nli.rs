use serde::{Deserialize, Serialize};

use crate::errors::MedCotResult;

/// Three-class natural-language-inference distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NliDistribution {
    pub contradiction: f64,
    pub neutral: f64,
    pub entailment: f64,
}

impl NliDistribution {
    /// Softmax over raw class logits.
    pub fn from_logits(contradiction: f64, neutral: f64, entailment: f64) -> Self {
        let max = contradiction.max(neutral).max(entailment);
        let (c, n, e) = (
            (contradiction - max).exp(),
            (neutral - max).exp(),
            (entailment - max).exp(),
        );
        let total = c + n + e;
        Self {
            contradiction: c / total,
            neutral: n / total,
            entailment: e / total,
        }
    }
}

/// Natural-language-inference collaborator.
pub trait INliScorer: Send + Sync {
    /// Class distribution for `hypothesis` given `premise`.
    fn predict(&self, premise: &str, hypothesis: &str) -> MedCotResult<NliDistribution>;

    fn name(&self) -> &str;
}
