use serde::{Deserialize, Serialize};

use super::defaults;

/// Path verifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Path to the persisted verifier weights (JSON). Missing file = zero-weight model.
    pub weights_path: Option<String>,
    /// Confidence strictly above this is Graph-Strict.
    pub strict_threshold: f64,
    /// Confidence strictly above this (and not strict) is Cautious.
    pub cautious_threshold: f64,
    /// Entailment probability used when the NLI service fails.
    pub nli_fallback: f64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            weights_path: None,
            strict_threshold: defaults::DEFAULT_STRICT_THRESHOLD,
            cautious_threshold: defaults::DEFAULT_CAUTIOUS_THRESHOLD,
            nli_fallback: defaults::DEFAULT_NLI_FALLBACK,
        }
    }
}
