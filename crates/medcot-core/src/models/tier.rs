use serde::{Deserialize, Serialize};

/// Terminal classification of a query's reasoning outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConfidenceTier {
    /// A verified path with high confidence.
    #[serde(rename = "Graph-Strict")]
    GraphStrict,
    /// A verified path with moderate confidence.
    #[serde(rename = "Cautious")]
    Cautious,
    /// Clinical risk detected among the query entities. Overrides every other tier.
    #[serde(rename = "Safety-Alert")]
    SafetyAlert,
    /// No path accepted.
    #[default]
    #[serde(rename = "Abstain")]
    Abstain,
}

impl ConfidenceTier {
    /// Tier for a verifier confidence. Both thresholds are exclusive lower bounds.
    pub fn from_confidence(confidence: f64, strict_threshold: f64, cautious_threshold: f64) -> Self {
        if confidence > strict_threshold {
            Self::GraphStrict
        } else if confidence > cautious_threshold {
            Self::Cautious
        } else {
            Self::Abstain
        }
    }

    /// Whether a path was accepted under this tier.
    pub fn accepts_path(&self) -> bool {
        matches!(self, Self::GraphStrict | Self::Cautious)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GraphStrict => "Graph-Strict",
            Self::Cautious => "Cautious",
            Self::SafetyAlert => "Safety-Alert",
            Self::Abstain => "Abstain",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
