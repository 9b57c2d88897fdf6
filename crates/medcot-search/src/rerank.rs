//! Cross-encoder reranking.
//!
//! `combined = beam_weight * beam_score + rerank_weight * sigmoid(logit)`.
//! Candidates whose rerank call fails are dropped.

use std::cmp::Ordering;

use tracing::debug;

use medcot_core::config::SearchConfig;
use medcot_core::models::PathCandidate;
use medcot_core::scoring::sigmoid;
use medcot_core::traits::IReranker;

use crate::failures::ServiceFailures;

pub const RERANK_STAGE: &str = "rerank";

pub fn rerank(
    candidates: Vec<PathCandidate>,
    query_text: &str,
    reranker: &dyn IReranker,
    config: &SearchConfig,
    failures: &mut ServiceFailures,
) -> Vec<PathCandidate> {
    let mut scored: Vec<PathCandidate> = Vec::with_capacity(candidates.len());
    for mut candidate in candidates {
        failures.attempt();
        match reranker.score(query_text, &candidate.text) {
            Ok(logit) => {
                candidate.rerank_score = Some(logit);
                candidate.combined_score = Some(
                    config.beam_weight * candidate.beam_score
                        + config.rerank_weight * sigmoid(logit),
                );
                scored.push(candidate);
            }
            Err(e) => failures.record(RERANK_STAGE, candidate.text, e),
        }
    }

    scored.sort_by(|a, b| {
        b.ranking_score()
            .partial_cmp(&a.ranking_score())
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(config.rerank_top_k);
    debug!(kept = scored.len(), reranker = reranker.name(), "candidates reranked");
    scored
}
