//! Structured log events for the reasoning pipeline.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

use medcot_core::intent::Intent;
use medcot_core::models::ConfidenceTier;

/// Log the start of a query.
pub fn query_received(query_id: &str, seeds: usize) {
    tracing::info!(
        event = "query_received",
        query_id = %query_id,
        seeds = seeds,
        "query received"
    );
}

/// Log a classified intent.
pub fn intent_classified(query_id: &str, intent: Intent) {
    tracing::info!(
        event = "intent_classified",
        query_id = %query_id,
        intent = intent.as_str(),
        "intent classified"
    );
}

/// Log a completed fusion.
pub fn subgraph_fused(nodes: usize, edges: usize, duplicate_nodes: usize, dropped_edges: usize) {
    tracing::info!(
        event = "subgraph_fused",
        nodes = nodes,
        edges = edges,
        duplicate_nodes = duplicate_nodes,
        dropped_edges = dropped_edges,
        "subgraph fused"
    );
}

/// Log a switch from constrained to unconstrained search.
pub fn fallback_triggered(query_id: &str, intent: Intent) {
    tracing::warn!(
        event = "fallback_triggered",
        query_id = %query_id,
        intent = intent.as_str(),
        "no constrained paths, unconstrained fallback used"
    );
}

/// Log the search result.
pub fn path_search_completed(query_id: &str, candidates: usize, used_fallback: bool, failures: usize) {
    tracing::info!(
        event = "path_search_completed",
        query_id = %query_id,
        candidates = candidates,
        used_fallback = used_fallback,
        failures = failures,
        "path search completed"
    );
}

/// Log the verification result.
pub fn verification_completed(query_id: &str, confidence: f64, tier: ConfidenceTier) {
    tracing::info!(
        event = "verification_completed",
        query_id = %query_id,
        confidence = confidence,
        tier = tier.as_str(),
        "verification completed"
    );
}

/// Log raised safety alerts.
pub fn safety_alert_raised(query_id: &str, alerts: &[String]) {
    tracing::warn!(
        event = "safety_alert_raised",
        query_id = %query_id,
        count = alerts.len(),
        alerts = ?alerts,
        "safety alert raised"
    );
}

/// Log a stage that produced nothing.
pub fn stage_skipped(query_id: &str, step: &str, reason: &str) {
    tracing::info!(
        event = "stage_skipped",
        query_id = %query_id,
        step = %step,
        reason = %reason,
        "stage skipped"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}
