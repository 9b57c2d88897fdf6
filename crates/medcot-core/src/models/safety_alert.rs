use serde::{Deserialize, Serialize};

/// Category of a safety alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    ClinicalRisk,
}

/// A risk pattern found among the query entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SafetyAlert {
    pub kind: AlertKind,
    pub message: String,
}

impl SafetyAlert {
    pub fn clinical_risk(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::ClinicalRisk,
            message: message.into(),
        }
    }
}
