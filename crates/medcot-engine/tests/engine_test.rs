//! End-to-end tests for medcot-engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use proptest::prelude::*;

use medcot_core::config::MedCotConfig;
use medcot_core::constants::steps;
use medcot_core::errors::MedCotError;
use medcot_core::intent::Intent;
use medcot_core::models::{AuditStatus, ConfidenceTier, LinkedEntity, MentionSource, Provenance};
use medcot_core::traits::{IEmbeddingProvider, INliScorer};
use medcot_engine::{
    Collaborators, ReasoningEngine, ReasoningRequest, ReasoningServices, SharedServices,
    ABSTAIN_MESSAGE,
};
use medcot_verification::VerifierModel;
use test_fixtures::collaborators::{
    remote_edge, FailingEmbedder, FailingNli, FixedNli, FixedReranker, HashEmbedder,
    ScriptedFederatedSource,
};
use test_fixtures::{fixture_path, graphs};

fn collaborators(nli: impl INliScorer + 'static) -> Collaborators {
    Collaborators::new(
        Arc::new(HashEmbedder::default()),
        Arc::new(FixedReranker::new(0.0)),
        Arc::new(nli),
    )
}

fn config_with_weights(fixture: &str) -> MedCotConfig {
    let mut config = MedCotConfig::default();
    config.verification.weights_path = Some(fixture_path(fixture).display().to_string());
    config
}

fn engine(config: MedCotConfig, collaborators: Collaborators) -> ReasoningEngine {
    let services = ReasoningServices::load(config, collaborators).unwrap();
    ReasoningEngine::new(Arc::new(services))
}

fn status_of(outcome: &medcot_engine::ReasoningOutcome, step: &str) -> AuditStatus {
    outcome.audit.last_for(step).unwrap().status
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn interacting_drugs_raise_a_safety_alert() {
    let engine = engine(
        config_with_weights("verifier/tuned_linear.json"),
        collaborators(FixedNli::new(0.9)),
    );
    let request = ReasoningRequest::new("Can I take warfarin with aspirin?")
        .with_subgraph(graphs::warfarin_aspirin())
        .with_seeds([graphs::WARFARIN, graphs::ASPIRIN]);

    let outcome = engine.reason(&request);

    assert_eq!(outcome.reasoning_mode, ConfidenceTier::SafetyAlert);
    assert_eq!(outcome.safety_flags.len(), 1);
    assert_eq!(
        outcome.safety_flags[0].message,
        "Direct Interaction Detected: Aspirin --[INTERACTS_WITH]--> Warfarin"
    );
    assert!(outcome.answer_text.starts_with("**SAFETY WARNING:**"));
    assert_eq!(status_of(&outcome, steps::SAFETY), AuditStatus::Success);
}

#[test]
fn empty_subgraph_abstains() {
    let engine = engine(MedCotConfig::default(), collaborators(FixedNli::new(0.9)));
    let request = ReasoningRequest::new("What treats hypertension?").with_seeds([graphs::HYPERTENSION]);

    let outcome = engine.reason(&request);

    assert!(outcome.candidate_paths.is_empty());
    assert!(!outcome.has_verified_path());
    assert!(outcome.is_abstain());
    assert_eq!(outcome.global_confidence, 0.0);
    assert_eq!(outcome.answer_text, ABSTAIN_MESSAGE);
    assert_eq!(status_of(&outcome, steps::FUSION), AuditStatus::Skipped);
    assert_eq!(status_of(&outcome, steps::PATH_GENERATION), AuditStatus::Skipped);
    assert_eq!(status_of(&outcome, steps::VERIFICATION), AuditStatus::Skipped);
}

#[test]
fn single_strong_path_is_graph_strict() {
    let engine = engine(
        config_with_weights("verifier/tuned_linear.json"),
        collaborators(FixedNli::new(0.9)),
    );
    let request = ReasoningRequest::new("What is metformin used to treat?")
        .with_subgraph(graphs::single_indication())
        .with_seeds([graphs::METFORMIN]);

    let outcome = engine.reason(&request);

    assert_eq!(outcome.reasoning_mode, ConfidenceTier::GraphStrict);
    assert!((outcome.global_confidence - 0.85).abs() < 1e-6);
    assert_eq!(outcome.verified_path.len(), 1);
    assert_eq!(outcome.verified_path[0].target, graphs::DIABETES);
    assert_eq!(
        outcome.verified_path_text.as_deref(),
        Some("Metformin --[indication]--> Type 2 Diabetes")
    );
    assert!(outcome.safety_flags.is_empty());
    assert_eq!(status_of(&outcome, steps::VERIFICATION), AuditStatus::Success);
}

#[test]
fn treatment_query_over_contraindications_uses_fallback() {
    let engine = engine(MedCotConfig::default(), collaborators(FixedNli::new(0.5)));
    let request = ReasoningRequest::new("What drug is used to treat chronic kidney disease?")
        .with_subgraph(graphs::contraindication_only())
        .with_seeds([graphs::METFORMIN]);

    let outcome = engine.reason(&request);

    assert_eq!(outcome.intent, Intent::Treatment);
    assert!(outcome.used_fallback);
    assert!(!outcome.candidate_paths.is_empty());
    let path_gen = outcome.audit.last_for(steps::PATH_GENERATION).unwrap();
    assert_eq!(path_gen.status, AuditStatus::Success);
    assert_eq!(path_gen.metadata["used_fallback"], true);
    assert_eq!(path_gen.metadata["effective_intent"], "GENERIC");
}

// =============================================================================
// Services
// =============================================================================

#[test]
fn malformed_weights_prevent_construction() {
    let result = ReasoningServices::load(
        config_with_weights("verifier/wrong_shape.json"),
        collaborators(FixedNli::new(0.9)),
    );
    let err = result.err().unwrap();
    assert!(matches!(err, MedCotError::ResourceLoad { .. }));
    assert!(err.is_fatal());
}

#[test]
fn missing_weights_fall_back_to_zero_model_and_abstain() {
    let engine = engine(
        config_with_weights("verifier/does_not_exist.json"),
        collaborators(FixedNli::new(0.9)),
    );
    let request = ReasoningRequest::new("What is metformin used to treat?")
        .with_subgraph(graphs::single_indication())
        .with_seeds([graphs::METFORMIN]);

    let outcome = engine.reason(&request);

    assert!((outcome.global_confidence - 0.5).abs() < 1e-12);
    assert!(outcome.is_abstain());
    assert!(!outcome.has_verified_path());
    assert_eq!(outcome.candidate_paths.len(), 1);
    assert_eq!(outcome.answer_text, ABSTAIN_MESSAGE);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = MedCotConfig::default();
    config.search.beam_width = 0;
    let result = ReasoningServices::load(config, collaborators(FixedNli::new(0.9)));
    assert!(matches!(result.err(), Some(MedCotError::InvalidConfig { .. })));
}

#[test]
fn shared_services_load_once() {
    static SHARED: SharedServices = SharedServices::new();
    assert!(!SHARED.is_initialized());

    let first = SHARED
        .get_or_load(|| ReasoningServices::load(MedCotConfig::default(), collaborators(FixedNli::new(0.9))))
        .unwrap();
    let second = SHARED
        .get_or_load(|| panic!("services loaded twice"))
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let again = ReasoningServices::load(MedCotConfig::default(), collaborators(FixedNli::new(0.9))).unwrap();
    assert!(matches!(
        SHARED.initialize(again),
        Err(MedCotError::ConcurrencyError(_))
    ));
}

#[test]
fn concurrent_first_access_loads_once() {
    let shared = Arc::new(SharedServices::new());
    let loads = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = Arc::clone(&shared);
            let loads = Arc::clone(&loads);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                shared
                    .get_or_load(|| {
                        loads.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(50));
                        ReasoningServices::with_model(
                            MedCotConfig::default(),
                            collaborators(FixedNli::new(0.9)),
                            VerifierModel::zero(),
                        )
                    })
                    .unwrap()
            })
        })
        .collect();

    let services: Vec<Arc<ReasoningServices>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(services.iter().all(|s| Arc::ptr_eq(s, &services[0])));
}

#[test]
fn load_is_retried_after_a_failure() {
    let shared = SharedServices::new();
    assert!(shared
        .get_or_load(|| {
            ReasoningServices::load(
                config_with_weights("verifier/wrong_shape.json"),
                collaborators(FixedNli::new(0.9)),
            )
        })
        .is_err());
    let services = shared
        .get_or_load(|| ReasoningServices::load(MedCotConfig::default(), collaborators(FixedNli::new(0.9))))
        .unwrap();
    assert!(Arc::ptr_eq(&services, &shared.get().unwrap()));
}

#[test]
fn failed_load_leaves_shared_services_empty() {
    let shared = SharedServices::new();
    let result = shared.get_or_load(|| {
        ReasoningServices::load(
            config_with_weights("verifier/wrong_shape.json"),
            collaborators(FixedNli::new(0.9)),
        )
    });
    assert!(result.is_err());
    assert!(shared.get().is_none());
}

// =============================================================================
// Fusion inputs and degradation
// =============================================================================

#[test]
fn federated_edges_feed_the_safety_scan() {
    let source = ScriptedFederatedSource::new(vec![Ok(vec![remote_edge(
        (graphs::WARFARIN, "Warfarin"),
        "biolink:interacts_with",
        (graphs::ASPIRIN, "Aspirin"),
        Some("infores:drugbank"),
    )])]);
    let mut config = MedCotConfig::default();
    config.federated.retry_delay_ms = 0;
    let collaborators = collaborators(FixedNli::new(0.9)).with_federated(Arc::new(source));
    let engine = engine(config, collaborators);

    let request = ReasoningRequest::new("Is warfarin safe with aspirin?")
        .with_seeds([graphs::WARFARIN, graphs::ASPIRIN]);
    let outcome = engine.reason(&request);

    assert_eq!(outcome.reasoning_mode, ConfidenceTier::SafetyAlert);
    assert_eq!(
        outcome.safety_flags[0].message,
        "Direct Interaction Detected: Aspirin --[INTERACTS_WITH]--> Warfarin"
    );
    let fusion = outcome.audit.last_for(steps::FUSION).unwrap();
    assert_eq!(fusion.metadata["federated_edges"], 1);
}

#[test]
fn disabled_federation_is_not_consulted() {
    let source = Arc::new(ScriptedFederatedSource::new(Vec::new()));
    let mut config = MedCotConfig::default();
    config.federated.enabled = false;
    let engine = engine(
        config,
        collaborators(FixedNli::new(0.9)).with_federated(source.clone()),
    );

    let request = ReasoningRequest::new("q").with_seeds([graphs::WARFARIN, graphs::ASPIRIN]);
    engine.reason(&request);

    assert!(source.calls().is_empty());
    assert!(engine.services().federated.is_none());
}

#[test]
fn patient_observations_join_the_fused_graph() {
    let engine = engine(MedCotConfig::default(), collaborators(FixedNli::new(0.9)));
    let request = ReasoningRequest::new("Can I take warfarin with aspirin?")
        .with_query_id("0123456789abcdef")
        .with_subgraph(graphs::warfarin_aspirin())
        .with_entities(vec![LinkedEntity {
            mention_text: "high blood pressure".to_string(),
            node_id: Some(graphs::HYPERTENSION.to_string()),
            node_type: "disease".to_string(),
            provenance: Provenance::PrimeKg,
            source: MentionSource::PatientContext,
        }])
        .with_seeds([graphs::WARFARIN, graphs::ASPIRIN]);

    let outcome = engine.reason(&request);

    let fusion = outcome.audit.last_for(steps::FUSION).unwrap();
    assert_eq!(fusion.metadata["sources"], 2);
    assert_eq!(fusion.metadata["patient_edges"], 2);
    assert_eq!(fusion.metadata["dropped_edges"], 0);
}

#[test]
fn nli_outage_is_recorded_as_degradation() {
    let engine = engine(
        config_with_weights("verifier/tuned_linear.json"),
        collaborators(FailingNli),
    );
    let request = ReasoningRequest::new("What is metformin used to treat?")
        .with_subgraph(graphs::single_indication())
        .with_seeds([graphs::METFORMIN]);

    let outcome = engine.reason(&request);

    assert!(outcome.degradations.iter().any(|d| d.component == "nli"));
    assert_eq!(outcome.candidate_paths.len(), 1);
    assert!(outcome.candidate_paths[0].verification_confidence.is_some());
}

#[test]
fn embedding_outage_skips_path_generation() {
    let engine = engine(
        MedCotConfig::default(),
        Collaborators::new(
            Arc::new(FailingEmbedder::always()),
            Arc::new(FixedReranker::new(0.0)),
            Arc::new(FixedNli::new(0.9)),
        ),
    );
    let precomputed = HashEmbedder::default().embed("What is metformin used to treat?").unwrap();
    let with_embedding = ReasoningRequest::new("What is metformin used to treat?")
        .with_subgraph(graphs::single_indication())
        .with_seeds([graphs::METFORMIN])
        .with_embedding(precomputed);
    let without_embedding = ReasoningRequest::new("What is metformin used to treat?")
        .with_subgraph(graphs::single_indication())
        .with_seeds([graphs::METFORMIN]);

    for request in [with_embedding, without_embedding] {
        let outcome = engine.reason(&request);
        let path_gen = outcome.audit.last_for(steps::PATH_GENERATION).unwrap();
        assert_eq!(path_gen.status, AuditStatus::Skipped);
        assert!(path_gen.metadata["reason"].is_string());
        assert!(outcome.candidate_paths.is_empty());
        assert!(!outcome.used_fallback);
        assert!(outcome.is_abstain());
        assert!(outcome.degradations.iter().any(|d| d.component == "embedding"));
    }
}

#[test]
fn supplied_answer_text_is_kept_on_abstain() {
    let engine = engine(MedCotConfig::default(), collaborators(FixedNli::new(0.9)));
    let request = ReasoningRequest::new("q").with_answer_text("Consult your physician.");
    let outcome = engine.reason(&request);
    assert!(outcome.is_abstain());
    assert_eq!(outcome.answer_text, "Consult your physician.");
}

#[test]
fn outcome_exports_as_json() {
    let engine = engine(MedCotConfig::default(), collaborators(FixedNli::new(0.9)));
    let outcome = engine.reason(&ReasoningRequest::new("q").with_query_id("q-1"));
    let json = outcome.to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["query_id"], "q-1");
    assert_eq!(value["reasoning_mode"], "Abstain");
    assert_eq!(value["audit"]["entries"].as_array().unwrap().len(), 4);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_query_yields_a_complete_audit(query in "[a-zA-Z ?]{0,40}") {
        let engine = engine(MedCotConfig::default(), collaborators(FixedNli::new(0.9)));
        let request = ReasoningRequest::new(query)
            .with_subgraph(graphs::warfarin_aspirin())
            .with_seeds([graphs::WARFARIN]);
        let outcome = engine.reason(&request);

        let steps_seen: Vec<&str> = outcome.audit.entries().iter().map(|e| e.step.as_str()).collect();
        prop_assert_eq!(
            steps_seen,
            vec![steps::FUSION, steps::PATH_GENERATION, steps::VERIFICATION, steps::SAFETY]
        );
        prop_assert!(!outcome.answer_text.is_empty());
        prop_assert!((0.0..=1.0).contains(&outcome.global_confidence));
    }
}
