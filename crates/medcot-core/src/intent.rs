use serde::{Deserialize, Serialize};

/// Coarse query purpose. Restricts which edge types the path search may traverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Treatment,
    Safety,
    Diagnosis,
    Generic,
}

impl Intent {
    /// All variants, in classification priority order.
    pub const ALL: [Intent; 4] = [
        Self::Treatment,
        Self::Safety,
        Self::Diagnosis,
        Self::Generic,
    ];

    /// Edge-type substrings this intent may traverse (matched against the
    /// lower-cased edge type). Empty means unconstrained.
    pub fn allowed_edge_substrings(&self) -> &'static [&'static str] {
        match self {
            Self::Treatment => &["indication", "treats", "prevents", "mitigates"],
            Self::Safety => &[
                "contraindication",
                "side effect",
                "adverse reaction",
                "risk_of",
                "causes",
                "interacts_with",
            ],
            Self::Diagnosis => &[
                "biomarker",
                "associated_with",
                "has_symptom",
                "presents_with",
            ],
            Self::Generic => &[],
        }
    }

    /// Whether this intent filters edges at all.
    pub fn is_constrained(&self) -> bool {
        !self.allowed_edge_substrings().is_empty()
    }

    /// Whether an edge of the given type may be traversed under this intent.
    pub fn permits(&self, edge_type: &str) -> bool {
        let allowed = self.allowed_edge_substrings();
        if allowed.is_empty() {
            return true;
        }
        let lowered = edge_type.to_lowercase();
        allowed.iter().any(|needle| lowered.contains(needle))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Treatment => "TREATMENT",
            Self::Safety => "SAFETY",
            Self::Diagnosis => "DIAGNOSIS",
            Self::Generic => "GENERIC",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
