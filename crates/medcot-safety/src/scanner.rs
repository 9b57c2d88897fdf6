//! Risk-edge pattern matching.
//!
//! Primary pass: qualifying edges with both endpoints among the query
//! entities. Fallback, only when the primary pass finds nothing:
//! contraindication edges touching at least one query entity.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use medcot_core::config::SafetyConfig;
use medcot_core::models::{ConfidenceTier, FusedGraph, SafetyAlert};

use crate::warning::compose_warning;

/// Upper-cased edge-type substrings that mark a risk edge.
pub const RISK_PATTERNS: &[&str] = &[
    "INTERACT",
    "CONTRAINDICAT",
    "ADVERSE",
    "RISK",
    "SIDE_EFFECT",
    "AFFECTS",
];

const GENERAL_WARNING_PATTERN: &str = "CONTRAINDICATION";

/// Result of applying the scanner to a reasoning outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyOutcome {
    pub alerts: Vec<SafetyAlert>,
    pub tier: ConfidenceTier,
    pub answer_text: String,
}

#[derive(Debug, Clone, Default)]
pub struct SafetyScanner {
    config: SafetyConfig,
}

impl SafetyScanner {
    pub fn new(config: SafetyConfig) -> Self {
        Self { config }
    }

    pub fn is_risk_edge(edge_type: &str) -> bool {
        let upper = edge_type.to_uppercase();
        RISK_PATTERNS.iter().any(|p| upper.contains(p))
    }

    /// Alerts for the given query entities. Primary alerts come out in
    /// sorted message order, fallback alerts in edge order.
    pub fn scan(&self, query_entity_ids: &[String], graph: &FusedGraph) -> Vec<SafetyAlert> {
        let ids: HashSet<&str> = query_entity_ids.iter().map(String::as_str).collect();

        let mut direct: BTreeSet<String> = BTreeSet::new();
        for edge in graph.edges() {
            if !Self::is_risk_edge(&edge.edge_type) {
                continue;
            }
            let rel_type = edge.edge_type.to_uppercase();
            if !(ids.contains(edge.source.as_str()) && ids.contains(edge.target.as_str())) {
                continue;
            }
            let source_name = graph.display_name(&edge.source);
            let target_name = graph.display_name(&edge.target);
            if source_name.to_lowercase() == target_name.to_lowercase() {
                continue;
            }
            let (first, second) = if source_name <= target_name {
                (source_name, target_name)
            } else {
                (target_name, source_name)
            };
            direct.insert(format!(
                "Direct Interaction Detected: {first} --[{rel_type}]--> {second}"
            ));
        }

        if !direct.is_empty() {
            info!(alerts = direct.len(), "direct interactions detected");
            return direct.into_iter().map(SafetyAlert::clinical_risk).collect();
        }

        debug!("no direct interactions, looking for general contraindications");
        let general: Vec<SafetyAlert> = graph
            .edges()
            .iter()
            .filter(|e| e.edge_type.to_uppercase().contains(GENERAL_WARNING_PATTERN))
            .filter(|e| ids.contains(e.source.as_str()) || ids.contains(e.target.as_str()))
            .take(self.config.general_warning_cap)
            .map(|e| {
                SafetyAlert::clinical_risk(format!(
                    "General Warning: {} --[{}]--> {}",
                    graph.display_name(&e.source),
                    e.edge_type.to_uppercase(),
                    graph.display_name(&e.target)
                ))
            })
            .collect();
        if !general.is_empty() {
            info!(alerts = general.len(), "general contraindication warnings raised");
        }
        general
    }

    /// Scan and fold the result into a tier and answer text. Any alert
    /// forces `SafetyAlert`; without alerts both pass through unchanged.
    pub fn apply(
        &self,
        query_entity_ids: &[String],
        graph: &FusedGraph,
        tier: ConfidenceTier,
        answer_text: &str,
    ) -> SafetyOutcome {
        let alerts = self.scan(query_entity_ids, graph);
        if alerts.is_empty() {
            return SafetyOutcome {
                alerts,
                tier,
                answer_text: answer_text.to_string(),
            };
        }
        SafetyOutcome {
            answer_text: compose_warning(answer_text, &alerts),
            tier: ConfidenceTier::SafetyAlert,
            alerts,
        }
    }
}
