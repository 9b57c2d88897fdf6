//! Tests for medcot-observability.

use medcot_core::config::ObservabilityConfig;
use medcot_core::intent::Intent;
use medcot_core::models::{ConfidenceTier, DegradationEvent};
use medcot_observability::tracing_setup::{events, spans::names};
use medcot_observability::{init_from_config, init_tracing_with_filter, DegradationTracker};

#[test]
fn tracker_keeps_records_in_order() {
    let mut tracker = DegradationTracker::new();
    assert!(tracker.is_empty());
    tracker.record(DegradationEvent::now("nli", "service unavailable", "neutral entailment"));
    tracker.record(DegradationEvent::now("federated", "503", "empty subgraph"));
    tracker.record(DegradationEvent::now("nli", "timeout", "neutral entailment"));

    assert_eq!(tracker.events().len(), 3);
    assert_eq!(tracker.events()[1].component, "federated");
    assert_eq!(tracker.events()[2].failure, "timeout");

    let events = tracker.into_events();
    let components: Vec<&str> = events.iter().map(|e| e.component.as_str()).collect();
    assert_eq!(components, vec!["nli", "federated", "nli"]);
}

#[test]
fn init_is_idempotent_and_events_emit() {
    init_tracing_with_filter("debug");
    init_tracing_with_filter("info");
    init_from_config(&ObservabilityConfig::default());

    events::query_received("q1", 2);
    events::intent_classified("q1", Intent::Safety);
    events::fallback_triggered("q1", Intent::Treatment);
    events::verification_completed("q1", 0.9, ConfidenceTier::GraphStrict);
    events::safety_alert_raised("q1", &["Direct Interaction Detected".to_string()]);

    let span = medcot_observability::reasoning_span!("q1");
    let _guard = span.enter();
    assert_eq!(names::REASONING, "medcot.reasoning");
}
