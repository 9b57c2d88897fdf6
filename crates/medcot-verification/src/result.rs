use serde::{Deserialize, Serialize};

use medcot_core::models::{ConfidenceTier, PathCandidate};

/// Outcome of verifying a set of candidate paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// The selected path, present only when the tier accepts it.
    pub verified_path: Option<PathCandidate>,
    /// Confidence of the best scored path, or 0 when nothing was scored.
    pub confidence: f64,
    pub tier: ConfidenceTier,
    /// Scored candidates in input order, each with `verification_confidence` set.
    pub scored: Vec<PathCandidate>,
    /// Candidates skipped because a step referenced a node missing from the graph.
    pub excluded: usize,
    /// Steps whose entailment fell back to the neutral default.
    pub nli_failures: usize,
}

impl VerificationResult {
    pub fn is_verified(&self) -> bool {
        self.verified_path.is_some()
    }
}
