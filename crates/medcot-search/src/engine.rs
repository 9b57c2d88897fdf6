//! PathSearchEngine: intent-constrained beam search with fallback, then rerank.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use medcot_core::config::SearchConfig;
use medcot_core::intent::Intent;
use medcot_core::models::{FusedGraph, PathCandidate};
use medcot_core::traits::{IEmbeddingProvider, IReranker};

use crate::adjacency::Adjacency;
use crate::beam::beam_search;
use crate::failures::ServiceFailures;
use crate::intent::IntentClassifier;
use crate::rerank::rerank;

/// Everything the search stage produced for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    /// Intent the query was classified with.
    pub intent: Intent,
    /// Intent whose adjacency produced the candidates.
    pub effective_intent: Intent,
    pub used_fallback: bool,
    /// Candidates out of beam search, before reranking.
    pub beam_candidates: usize,
    /// Reranked candidates, best first, at most `rerank_top_k`.
    pub candidates: Vec<PathCandidate>,
    pub failures: ServiceFailures,
}

impl SearchReport {
    /// A report for a search that never ran.
    pub fn empty(intent: Intent) -> Self {
        Self {
            intent,
            effective_intent: intent,
            used_fallback: false,
            beam_candidates: 0,
            candidates: Vec::new(),
            failures: ServiceFailures::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// No candidates and every collaborator call failed.
    pub fn all_services_failed(&self) -> bool {
        self.candidates.is_empty() && self.failures.all_failed()
    }
}

pub struct PathSearchEngine {
    embedder: Arc<dyn IEmbeddingProvider>,
    reranker: Arc<dyn IReranker>,
    classifier: IntentClassifier,
    config: SearchConfig,
}

impl PathSearchEngine {
    pub fn new(
        embedder: Arc<dyn IEmbeddingProvider>,
        reranker: Arc<dyn IReranker>,
        config: SearchConfig,
    ) -> Self {
        Self {
            embedder,
            reranker,
            classifier: IntentClassifier::new(),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn classify(&self, query_text: &str) -> Intent {
        self.classifier.classify(query_text)
    }

    /// One beam-search pass over the adjacency filtered for `intent`.
    pub fn search(
        &self,
        graph: &FusedGraph,
        seeds: &[String],
        query_embedding: &[f32],
        intent: Intent,
        width: usize,
        depth: usize,
    ) -> Vec<PathCandidate> {
        let mut failures = ServiceFailures::new();
        self.pass(graph, seeds, query_embedding, intent, width, depth, &mut failures)
    }

    /// One beam-search pass with no edge-type constraint.
    pub fn search_unconstrained(
        &self,
        graph: &FusedGraph,
        seeds: &[String],
        query_embedding: &[f32],
        width: usize,
        depth: usize,
    ) -> Vec<PathCandidate> {
        self.search(graph, seeds, query_embedding, Intent::Generic, width, depth)
    }

    fn pass(
        &self,
        graph: &FusedGraph,
        seeds: &[String],
        query_embedding: &[f32],
        intent: Intent,
        width: usize,
        depth: usize,
        failures: &mut ServiceFailures,
    ) -> Vec<PathCandidate> {
        let adjacency = Adjacency::build(graph, intent);
        beam_search(
            &adjacency,
            seeds,
            query_embedding,
            self.embedder.as_ref(),
            width,
            depth,
            failures,
        )
    }

    /// Full search stage: constrained pass, unconstrained fallback when the
    /// constrained pass finds nothing, then rerank against the query text.
    /// No fallback runs when the constrained pass came up empty only because
    /// every embedding call failed.
    pub fn find_paths(
        &self,
        graph: &FusedGraph,
        seeds: &[String],
        query_text: &str,
        query_embedding: &[f32],
        intent: Intent,
    ) -> SearchReport {
        let width = self.config.beam_width;
        let depth = self.config.max_path_length;
        let mut failures = ServiceFailures::new();

        let mut effective_intent = intent;
        let mut used_fallback = false;
        let mut paths = self.pass(graph, seeds, query_embedding, intent, width, depth, &mut failures);

        if paths.is_empty() && failures.all_failed() {
            warn!(
                intent = %intent,
                failures = failures.len(),
                "every embedding call failed, skipping unconstrained fallback"
            );
        } else if paths.is_empty() && intent.is_constrained() {
            warn!(
                intent = %intent,
                "no paths under intent constraints, retrying unconstrained"
            );
            effective_intent = Intent::Generic;
            used_fallback = true;
            paths = self.pass(
                graph,
                seeds,
                query_embedding,
                Intent::Generic,
                width,
                depth,
                &mut failures,
            );
        }

        let beam_candidates = paths.len();
        let candidates = rerank(
            paths,
            query_text,
            self.reranker.as_ref(),
            &self.config,
            &mut failures,
        );

        info!(
            intent = %intent,
            effective_intent = %effective_intent,
            used_fallback,
            beam_candidates,
            candidates = candidates.len(),
            failures = failures.len(),
            "path search completed"
        );

        SearchReport {
            intent,
            effective_intent,
            used_fallback,
            beam_candidates,
            candidates,
            failures,
        }
    }
}
