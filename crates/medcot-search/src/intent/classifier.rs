//! Keyword-based intent classification.
//!
//! Keyword sets are tested in priority order and the first set with any
//! substring match wins. Matching is on the lower-cased query, so stems
//! like `contraindicat` and `diagnos` cover their inflections.

use medcot_core::intent::Intent;

/// Keyword sets in priority order.
pub const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Treatment,
        &["treat", "cure", "therapy", "manage", "medication", "drug for"],
    ),
    (
        Intent::Safety,
        &["safe", "risk", "contraindicat", "bad", "interaction", "warn", "avoid"],
    ),
    (
        Intent::Diagnosis,
        &["diagnos", "test", "check", "symptom", "sign", "cause"],
    ),
];

/// Classify a query; `Generic` when no keyword matches.
pub fn classify(query: &str) -> Intent {
    IntentClassifier::new().classify(query)
}

/// Classifies queries by keyword presence.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, query: &str) -> Intent {
        self.classify_with_keyword(query)
            .map(|(intent, _)| intent)
            .unwrap_or(Intent::Generic)
    }

    /// The winning intent together with the keyword that selected it.
    pub fn classify_with_keyword(&self, query: &str) -> Option<(Intent, &'static str)> {
        let lower = query.to_lowercase();
        INTENT_KEYWORDS.iter().find_map(|(intent, keywords)| {
            keywords
                .iter()
                .find(|k| lower.contains(*k))
                .map(|k| (*intent, *k))
        })
    }
}
