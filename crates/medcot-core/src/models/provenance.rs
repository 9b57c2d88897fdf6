//! Provenance tags and the static trust table.
//!
//! Provenance names the source a node or edge came from. It orders fusion
//! (first source wins) and feeds the verifier as a trust signal.

use serde::{Deserialize, Serialize};

/// Originating knowledge source of a node or edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Provenance {
    /// Curated local knowledge graph.
    PrimeKg,
    /// Remote federated knowledge graph.
    AraxKg2,
    /// Per-query patient state graph.
    Psg,
    /// Data loaded by the user.
    UserUpload,
    /// Unknown or untagged source.
    #[default]
    Default,
}

impl Provenance {
    pub const ALL: [Provenance; 5] = [
        Self::PrimeKg,
        Self::AraxKg2,
        Self::Psg,
        Self::UserUpload,
        Self::Default,
    ];

    /// Canonical wire tag.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::PrimeKg => "PrimeKG",
            Self::AraxKg2 => "ARAX/KG2",
            Self::Psg => "PSG",
            Self::UserUpload => "User_Upload",
            Self::Default => "DEFAULT",
        }
    }

    /// Lenient tag parsing. Unknown tags map to `Default`.
    pub fn from_tag(tag: &str) -> Self {
        let normalized: String = tag
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "primekg" => Self::PrimeKg,
            "araxkg2" | "arax" | "kg2" => Self::AraxKg2,
            "psg" => Self::Psg,
            "userupload" => Self::UserUpload,
            _ => Self::Default,
        }
    }

    /// Trust weight used as the provenance feature during verification.
    pub fn trust_weight(&self) -> f64 {
        match self {
            Self::Psg => 1.0,
            Self::UserUpload => 0.9,
            Self::PrimeKg => 0.85,
            Self::AraxKg2 => 0.6,
            Self::Default => 0.3,
        }
    }
}

/// Trust weight for a raw provenance tag.
pub fn trust_for_tag(tag: &str) -> f64 {
    Provenance::from_tag(tag).trust_weight()
}

impl From<String> for Provenance {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<&str> for Provenance {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl From<Provenance> for String {
    fn from(p: Provenance) -> Self {
        p.as_tag().to_string()
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}
