//! The user-visible result of one query.

use serde::{Deserialize, Serialize};

use medcot_core::errors::MedCotResult;
use medcot_core::intent::Intent;
use medcot_core::models::{
    AuditTrail, ConfidenceTier, DegradationEvent, PathCandidate, PathStep, SafetyAlert,
};

/// Answer text used when nothing could be verified and no other text exists.
pub const ABSTAIN_MESSAGE: &str =
    "No reasoning path could be verified against the knowledge graph with sufficient confidence. \
     Unable to provide a graph-grounded answer.";

/// Always well-formed, even when every stage degraded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningOutcome {
    pub query_id: String,
    pub intent: Intent,
    pub used_fallback: bool,
    /// Reranked candidates, with verifier confidences where they were scored.
    pub candidate_paths: Vec<PathCandidate>,
    /// Steps of the accepted path. Empty unless a path was accepted.
    pub verified_path: Vec<PathStep>,
    pub verified_path_text: Option<String>,
    pub global_confidence: f64,
    pub reasoning_mode: ConfidenceTier,
    pub safety_flags: Vec<SafetyAlert>,
    pub answer_text: String,
    pub degradations: Vec<DegradationEvent>,
    pub audit: AuditTrail,
}

impl ReasoningOutcome {
    pub fn is_abstain(&self) -> bool {
        self.reasoning_mode == ConfidenceTier::Abstain
    }

    pub fn has_verified_path(&self) -> bool {
        !self.verified_path.is_empty()
    }

    /// Pretty JSON for an external audit sink.
    pub fn to_json_pretty(&self) -> MedCotResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
