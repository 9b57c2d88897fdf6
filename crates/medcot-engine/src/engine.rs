//! Per-query orchestration.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use medcot_core::constants::steps;
use medcot_core::intent::Intent;
use medcot_core::models::{AuditStatus, AuditTrail, ConfidenceTier, DegradationEvent, FusedGraph};
use medcot_graph::{build_patient_graph, fetch_subgraph, fuse_with_report, GraphStats};
use medcot_observability::tracing_setup::events;
use medcot_observability::{
    fusion_span, path_search_span, reasoning_span, safety_span, verification_span,
    DegradationTracker,
};
use medcot_search::beam::EMBED_STAGE;
use medcot_search::rerank::RERANK_STAGE;
use medcot_search::SearchReport;
use medcot_verification::VerificationResult;

use crate::outcome::{ReasoningOutcome, ABSTAIN_MESSAGE};
use crate::request::ReasoningRequest;
use crate::services::ReasoningServices;

/// Runs queries against shared services. Cheap to clone.
#[derive(Clone)]
pub struct ReasoningEngine {
    services: Arc<ReasoningServices>,
}

impl ReasoningEngine {
    pub fn new(services: Arc<ReasoningServices>) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &ReasoningServices {
        &self.services
    }

    /// Process one query. Never fails: degraded stages are recorded in the
    /// audit trail and the degradation list.
    pub fn reason(&self, request: &ReasoningRequest) -> ReasoningOutcome {
        let span = reasoning_span!(request.query_id);
        let _guard = span.enter();
        events::query_received(&request.query_id, request.seed_node_ids.len());

        let mut audit = AuditTrail::new();
        let mut tracker = DegradationTracker::new();

        let intent = self.services.search.classify(&request.query_text);
        events::intent_classified(&request.query_id, intent);

        let graph = self.fuse(request, &mut audit);
        let report = self.find_paths(request, &graph, intent, &mut audit, &mut tracker);
        let verification = self.verify(request, &report, &graph, &mut audit, &mut tracker);

        let query_entity_ids = request.query_entity_ids();
        let safety_span = safety_span!(query_entity_ids.len());
        let safety_guard = safety_span.enter();
        let safety = self.services.safety.apply(
            &query_entity_ids,
            &graph,
            verification.tier,
            &request.answer_text,
        );
        let flags: Vec<String> = safety.alerts.iter().map(|a| a.message.clone()).collect();
        if !flags.is_empty() {
            events::safety_alert_raised(&request.query_id, &flags);
        }
        audit.record(
            steps::SAFETY,
            AuditStatus::Success,
            if flags.is_empty() {
                "no clinical risk detected".to_string()
            } else {
                format!("{} safety alert(s) raised", flags.len())
            },
            json!({
                "entities": query_entity_ids,
                "alerts": flags,
                "tier": safety.tier.as_str(),
            }),
        );
        drop(safety_guard);

        let mut answer_text = safety.answer_text;
        if safety.tier == ConfidenceTier::Abstain && answer_text.trim().is_empty() {
            answer_text = ABSTAIN_MESSAGE.to_string();
        }

        let verified_path_text = verification.verified_path.as_ref().map(|p| p.text.clone());
        let verified_path = verification
            .verified_path
            .map(|p| p.steps)
            .unwrap_or_default();
        let candidate_paths = if verification.scored.is_empty() {
            report.candidates
        } else {
            verification.scored
        };

        info!(
            query_id = %request.query_id,
            tier = safety.tier.as_str(),
            confidence = verification.confidence,
            candidates = candidate_paths.len(),
            alerts = safety.alerts.len(),
            degradations = tracker.events().len(),
            "query reasoned"
        );

        ReasoningOutcome {
            query_id: request.query_id.clone(),
            intent,
            used_fallback: report.used_fallback,
            candidate_paths,
            verified_path,
            verified_path_text,
            global_confidence: verification.confidence,
            reasoning_mode: safety.tier,
            safety_flags: safety.alerts,
            answer_text,
            degradations: tracker.into_events(),
            audit,
        }
    }

    /// Local subgraphs first, then the federated lookup, then the patient
    /// state graph. Earlier sources win on node id collisions.
    fn fuse(&self, request: &ReasoningRequest, audit: &mut AuditTrail) -> FusedGraph {
        let mut sources: Vec<FusedGraph> = request.subgraphs.clone();
        let mut federated_edges = 0;

        if let Some(source) = &self.services.federated {
            let ids = request.query_entity_ids();
            let remote = fetch_subgraph(
                source.as_ref(),
                &ids,
                &self.services.retry_policy,
                self.services.config.federated.max_results,
            );
            federated_edges = remote.edge_count();
            if !remote.is_empty() {
                sources.push(remote);
            }
        }

        let patient = build_patient_graph(&request.query_id, &request.entities);
        let patient_edges = patient.edge_count();
        if patient_edges > 0 {
            sources.push(patient);
        }

        let span = fusion_span!(sources.len());
        let _guard = span.enter();
        let (graph, report) = fuse_with_report(&sources);
        events::subgraph_fused(
            graph.node_count(),
            graph.edge_count(),
            report.duplicate_nodes,
            report.dropped_edges,
        );

        let stats = GraphStats::of(&graph);
        let metadata = json!({
            "sources": report.sources,
            "duplicate_nodes": report.duplicate_nodes,
            "dropped_edges": report.dropped_edges,
            "federated_edges": federated_edges,
            "patient_edges": patient_edges,
            "stats": stats.to_metadata(),
        });
        if graph.is_empty() {
            audit.record(steps::FUSION, AuditStatus::Skipped, "no subgraph available", metadata);
        } else {
            audit.record(
                steps::FUSION,
                AuditStatus::Success,
                format!(
                    "fused {} source(s) into {} nodes and {} edges",
                    report.sources,
                    graph.node_count(),
                    graph.edge_count()
                ),
                metadata,
            );
        }
        graph
    }

    fn find_paths(
        &self,
        request: &ReasoningRequest,
        graph: &FusedGraph,
        intent: Intent,
        audit: &mut AuditTrail,
        tracker: &mut DegradationTracker,
    ) -> SearchReport {
        let empty = SearchReport::empty(intent);

        if request.seed_node_ids.is_empty() || graph.edge_count() == 0 {
            let reason = if request.seed_node_ids.is_empty() {
                "no seed entities"
            } else {
                "fused graph has no edges"
            };
            events::stage_skipped(&request.query_id, steps::PATH_GENERATION, reason);
            audit.record(
                steps::PATH_GENERATION,
                AuditStatus::Skipped,
                reason,
                json!({ "intent": intent.as_str(), "seeds": request.seed_node_ids.len() }),
            );
            return empty;
        }

        let query_embedding = match &request.query_embedding {
            Some(embedding) => embedding.clone(),
            None => match self.services.embedder.embed(&request.query_text) {
                Ok(embedding) => embedding,
                Err(e) => {
                    warn!(error = %e, "query embedding failed, path search skipped");
                    tracker.record(DegradationEvent::now(
                        "embedding",
                        e.to_string(),
                        "no candidate paths",
                    ));
                    audit.record(
                        steps::PATH_GENERATION,
                        AuditStatus::Skipped,
                        format!("query embedding unavailable: {e}"),
                        json!({ "reason": "query_embedding_failed", "error": e.to_string() }),
                    );
                    return empty;
                }
            },
        };

        let span = path_search_span!(intent, request.seed_node_ids.len());
        let _guard = span.enter();
        let report = self.services.search.find_paths(
            graph,
            &request.seed_node_ids,
            &request.query_text,
            &query_embedding,
            intent,
        );

        if report.used_fallback {
            events::fallback_triggered(&request.query_id, intent);
        }
        events::path_search_completed(
            &request.query_id,
            report.candidates.len(),
            report.used_fallback,
            report.failures.len(),
        );

        let embed_failures = report.failures.count_for(EMBED_STAGE);
        if embed_failures > 0 {
            tracker.record(DegradationEvent::now(
                "embedding",
                format!("{embed_failures} extension(s) failed to embed"),
                "extensions excluded",
            ));
        }
        let rerank_failures = report.failures.count_for(RERANK_STAGE);
        if rerank_failures > 0 {
            tracker.record(DegradationEvent::now(
                "reranker",
                format!("{rerank_failures} candidate(s) failed to rerank"),
                "candidates excluded",
            ));
        }

        let mut metadata = json!({
            "intent": report.intent.as_str(),
            "effective_intent": report.effective_intent.as_str(),
            "used_fallback": report.used_fallback,
            "beam_candidates": report.beam_candidates,
            "candidates": report.candidates.len(),
            "service_failures": report.failures.len(),
        });
        let (status, message) = if report.all_services_failed() {
            metadata["reason"] = json!("all_services_failed");
            (
                AuditStatus::Skipped,
                format!(
                    "every collaborator call failed ({} of {})",
                    report.failures.len(),
                    report.failures.attempted
                ),
            )
        } else if report.is_empty() {
            (AuditStatus::Skipped, "no candidate paths found".to_string())
        } else {
            (
                AuditStatus::Success,
                format!("{} candidate path(s)", report.candidates.len()),
            )
        };
        audit.record(steps::PATH_GENERATION, status, message, metadata);
        report
    }

    fn verify(
        &self,
        request: &ReasoningRequest,
        report: &SearchReport,
        graph: &FusedGraph,
        audit: &mut AuditTrail,
        tracker: &mut DegradationTracker,
    ) -> VerificationResult {
        if report.candidates.is_empty() {
            events::stage_skipped(&request.query_id, steps::VERIFICATION, "no candidates");
            audit.record(
                steps::VERIFICATION,
                AuditStatus::Skipped,
                "no candidates to verify",
                json!({ "tier": ConfidenceTier::Abstain.as_str() }),
            );
            return VerificationResult::default();
        }

        let span = verification_span!(report.candidates.len());
        let _guard = span.enter();
        let result = self
            .services
            .verifier
            .verify(&report.candidates, graph, &request.query_text);
        events::verification_completed(&request.query_id, result.confidence, result.tier);

        if result.nli_failures > 0 {
            tracker.record(DegradationEvent::now(
                "nli",
                format!("{} entailment call(s) failed", result.nli_failures),
                format!("neutral entailment {}", self.services.config.verification.nli_fallback),
            ));
        }

        audit.record(
            steps::VERIFICATION,
            AuditStatus::Success,
            format!(
                "{} at confidence {:.3}",
                result.tier.as_str(),
                result.confidence
            ),
            json!({
                "confidence": result.confidence,
                "tier": result.tier.as_str(),
                "scored": result.scored.len(),
                "excluded": result.excluded,
                "nli_failures": result.nli_failures,
                "verified_path": result.verified_path.as_ref().map(|p| p.text.as_str()),
            }),
        );
        result
    }
}
