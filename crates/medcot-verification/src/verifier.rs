//! PathVerifier: per-path features → fixed model → confidence → tier.

use std::sync::Arc;

use tracing::{debug, info, warn};

use medcot_core::config::VerificationConfig;
use medcot_core::models::{ConfidenceTier, FusedGraph, PathCandidate};
use medcot_core::traits::INliScorer;

use crate::features::PathFeatures;
use crate::model::VerifierModel;
use crate::result::VerificationResult;

/// Stateless verifier over a loaded model and an NLI collaborator.
pub struct PathVerifier {
    model: Arc<VerifierModel>,
    nli: Arc<dyn INliScorer>,
    config: VerificationConfig,
}

impl PathVerifier {
    pub fn new(
        model: Arc<VerifierModel>,
        nli: Arc<dyn INliScorer>,
        config: VerificationConfig,
    ) -> Self {
        Self { model, nli, config }
    }

    pub fn model(&self) -> &VerifierModel {
        &self.model
    }

    /// Averaged features for one candidate. `None` when any step endpoint is
    /// missing from the graph. Adds the number of NLI fallbacks to `nli_failures`.
    pub fn path_features(
        &self,
        candidate: &PathCandidate,
        graph: &FusedGraph,
        query_text: &str,
        nli_failures: &mut usize,
    ) -> Option<PathFeatures> {
        let path_length = candidate.steps.len();
        let mut per_step = Vec::with_capacity(path_length);

        for step in &candidate.steps {
            let (Some(source), Some(target)) = (graph.node(&step.source), graph.node(&step.target))
            else {
                debug!(
                    source = %step.source,
                    target = %step.target,
                    "path references a node outside the graph, excluded"
                );
                return None;
            };

            let assertion = format!("{} {} {}", source.name, step.edge_text, target.name);
            let entailment = match self.nli.predict(query_text, &assertion) {
                Ok(dist) => dist.entailment,
                Err(e) => {
                    warn!(
                        nli = self.nli.name(),
                        assertion = %assertion,
                        error = %e,
                        "NLI failed, using neutral entailment"
                    );
                    *nli_failures += 1;
                    self.config.nli_fallback
                }
            };

            per_step.push(PathFeatures::for_step(
                entailment,
                path_length,
                step.provenance.trust_weight(),
            ));
        }

        PathFeatures::mean(&per_step)
    }

    /// Score every candidate, pick the most confident (first wins on ties),
    /// and tier it.
    pub fn verify(
        &self,
        candidates: &[PathCandidate],
        graph: &FusedGraph,
        query_text: &str,
    ) -> VerificationResult {
        let mut result = VerificationResult::default();
        let mut best: Option<usize> = None;

        for candidate in candidates {
            let Some(features) =
                self.path_features(candidate, graph, query_text, &mut result.nli_failures)
            else {
                result.excluded += 1;
                continue;
            };

            let confidence = self.model.confidence(&features.to_array());
            let mut scored = candidate.clone();
            scored.verification_confidence = Some(confidence);

            let is_better = match best {
                Some(i) => confidence > result.scored[i].verification_confidence.unwrap_or(0.0),
                None => true,
            };
            if is_better {
                best = Some(result.scored.len());
            }
            result.scored.push(scored);
        }

        let Some(best) = best else {
            info!(
                candidates = candidates.len(),
                excluded = result.excluded,
                "no candidate could be scored"
            );
            return result;
        };

        let winner = &result.scored[best];
        result.confidence = winner.verification_confidence.unwrap_or(0.0);
        result.tier = ConfidenceTier::from_confidence(
            result.confidence,
            self.config.strict_threshold,
            self.config.cautious_threshold,
        );
        if result.tier.accepts_path() {
            result.verified_path = Some(winner.clone());
        }

        info!(
            scored = result.scored.len(),
            excluded = result.excluded,
            confidence = result.confidence,
            tier = result.tier.as_str(),
            "verification completed"
        );
        result
    }
}
