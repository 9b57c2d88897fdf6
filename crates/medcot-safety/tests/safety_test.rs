//! Integration tests for medcot-safety.

use proptest::prelude::*;

use medcot_core::config::SafetyConfig;
use medcot_core::models::{ConfidenceTier, Edge, FusedGraph, Node, Provenance};
use medcot_safety::{compose_warning, SafetyScanner};
use test_fixtures::graphs;

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Primary pass
// =============================================================================

#[test]
fn warfarin_aspirin_interaction_raises_one_alert() {
    let scanner = SafetyScanner::default();
    let graph = graphs::warfarin_aspirin();
    let outcome = scanner.apply(
        &ids(&[graphs::WARFARIN, graphs::ASPIRIN]),
        &graph,
        ConfidenceTier::GraphStrict,
        "",
    );

    // Both directions collapse into one alert.
    assert_eq!(outcome.alerts.len(), 1);
    assert_eq!(
        outcome.alerts[0].message,
        "Direct Interaction Detected: Aspirin --[INTERACTS_WITH]--> Warfarin"
    );
    assert_eq!(outcome.tier, ConfidenceTier::SafetyAlert);
    assert!(outcome.answer_text.starts_with("**SAFETY WARNING:**\n- Direct"));
}

#[test]
fn primary_alerts_are_sorted_and_deduplicated() {
    let graph = FusedGraph::from_parts(
        vec![
            graphs::drug("c", "Clopidogrel"),
            graphs::drug("w", "Warfarin"),
            graphs::drug("a", "Aspirin"),
        ],
        vec![
            graphs::edge("w", "c", "INTERACTS_WITH"),
            graphs::edge("w", "a", "interacts_with"),
            graphs::edge("a", "w", "INTERACTS_WITH"),
            graphs::edge("a", "w", "ADVERSE_REACTION"),
        ],
    );
    let alerts = SafetyScanner::default().scan(&ids(&["a", "c", "w"]), &graph);
    let messages: Vec<&str> = alerts.iter().map(|a| a.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Direct Interaction Detected: Aspirin --[ADVERSE_REACTION]--> Warfarin",
            "Direct Interaction Detected: Aspirin --[INTERACTS_WITH]--> Warfarin",
            "Direct Interaction Detected: Clopidogrel --[INTERACTS_WITH]--> Warfarin",
        ]
    );
}

#[test]
fn primary_pass_uses_the_risk_edge_rule() {
    let graph = FusedGraph::from_parts(
        vec![graphs::drug("a", "Aspirin"), graphs::drug("b", "Ibuprofen")],
        vec![
            graphs::edge("a", "b", "increases_risk_of"),
            graphs::edge("b", "a", "INDICATION"),
        ],
    );
    assert!(SafetyScanner::is_risk_edge("increases_risk_of"));
    assert!(!SafetyScanner::is_risk_edge("INDICATION"));

    let alerts = SafetyScanner::default().scan(&ids(&["a", "b"]), &graph);
    assert_eq!(alerts.len(), 1);
    assert_eq!(
        alerts[0].message,
        "Direct Interaction Detected: Aspirin --[INCREASES_RISK_OF]--> Ibuprofen"
    );
}

#[test]
fn same_name_pairs_are_ignored() {
    let graph = FusedGraph::from_parts(
        vec![
            graphs::drug("DB00945", "Aspirin"),
            Node::new("CHEBI:15365", "ExternalEntity", "aspirin", Provenance::AraxKg2),
        ],
        vec![graphs::edge("DB00945", "CHEBI:15365", "AFFECTS")],
    );
    let alerts = SafetyScanner::default().scan(&ids(&["DB00945", "CHEBI:15365"]), &graph);
    assert!(alerts.is_empty());
}

#[test]
fn unknown_nodes_are_named_by_id() {
    let graph = FusedGraph::from_parts(
        vec![graphs::drug("w", "Warfarin")],
        vec![Edge::new("w", "CHEBI:1", "INTERACTS_WITH", Provenance::AraxKg2)],
    );
    let alerts = SafetyScanner::default().scan(&ids(&["w", "CHEBI:1"]), &graph);
    assert_eq!(
        alerts[0].message,
        "Direct Interaction Detected: CHEBI:1 --[INTERACTS_WITH]--> Warfarin"
    );
}

// =============================================================================
// Fallback pass
// =============================================================================

#[test]
fn general_warnings_only_without_direct_alerts() {
    let graph = graphs::warfarin_aspirin();
    let alerts = SafetyScanner::default().scan(&ids(&[graphs::ASPIRIN]), &graph);
    assert_eq!(alerts.len(), 1);
    assert_eq!(
        alerts[0].message,
        "General Warning: Aspirin --[CONTRAINDICATION]--> Hypertension"
    );
}

#[test]
fn general_warnings_are_capped_in_edge_order() {
    let mut nodes = vec![graphs::drug("d", "Drug")];
    let mut edges = Vec::new();
    for i in 0..8 {
        nodes.push(graphs::disease(&format!("x{i}"), &format!("Condition {i}")));
        edges.push(graphs::edge("d", &format!("x{i}"), "CONTRAINDICATION"));
    }
    let graph = FusedGraph::from_parts(nodes, edges);

    let alerts = SafetyScanner::default().scan(&ids(&["d"]), &graph);
    assert_eq!(alerts.len(), 5);
    assert!(alerts[0].message.ends_with("Condition 0"));
    assert!(alerts[4].message.ends_with("Condition 4"));

    let scanner = SafetyScanner::new(SafetyConfig {
        general_warning_cap: 2,
    });
    assert_eq!(scanner.scan(&ids(&["d"]), &graph).len(), 2);
}

#[test]
fn no_alerts_leaves_tier_and_text() {
    let outcome = SafetyScanner::default().apply(
        &ids(&[graphs::METFORMIN]),
        &graphs::single_indication(),
        ConfidenceTier::Cautious,
        "Metformin is first line.",
    );
    assert!(outcome.alerts.is_empty());
    assert_eq!(outcome.tier, ConfidenceTier::Cautious);
    assert_eq!(outcome.answer_text, "Metformin is first line.");
}

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn applying_twice_does_not_duplicate_the_block() {
    let scanner = SafetyScanner::default();
    let graph = graphs::warfarin_aspirin();
    let query = ids(&[graphs::WARFARIN, graphs::ASPIRIN]);
    let first = scanner.apply(&query, &graph, ConfidenceTier::Cautious, "Avoid combining.");
    let second = scanner.apply(&query, &graph, first.tier, &first.answer_text);
    assert_eq!(first, second);
    assert_eq!(second.answer_text.matches("**SAFETY WARNING:**").count(), 1);
}

proptest! {
    #[test]
    fn compose_warning_is_idempotent(
        text in ".{0,60}",
        messages in prop::collection::vec("[A-Za-z ]{1,20}", 1..4),
    ) {
        let alerts: Vec<_> = messages
            .into_iter()
            .map(medcot_core::models::SafetyAlert::clinical_risk)
            .collect();
        let once = compose_warning(&text, &alerts);
        let twice = compose_warning(&once, &alerts);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.contains(&text));
    }
}
