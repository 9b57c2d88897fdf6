//! Beam search over an intent-filtered adjacency.
//!
//! `depth` is the maximum path length in nodes. Paths grow one hop per
//! round, never revisit a node, and are scored by the cumulative cosine
//! similarity between the query embedding and each hop's
//! `"<edge text> <neighbor name>"` embedding.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use medcot_core::models::{PathCandidate, PathStep};
use medcot_core::scoring::cosine_similarity;
use medcot_core::traits::IEmbeddingProvider;

use crate::adjacency::Adjacency;
use crate::failures::ServiceFailures;

pub const EMBED_STAGE: &str = "embed";

/// A path under construction.
#[derive(Debug, Clone)]
struct PartialPath {
    nodes: Vec<String>,
    steps: Vec<PathStep>,
    score: f64,
}

impl PartialPath {
    fn seed(id: &str) -> Self {
        Self {
            nodes: vec![id.to_string()],
            steps: Vec::new(),
            score: 0.0,
        }
    }

    fn last(&self) -> &str {
        self.nodes.last().map(String::as_str).unwrap_or_default()
    }
}

fn by_score_desc(a: &PartialPath, b: &PartialPath) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}

/// Run the beam search. Returns candidates sorted by beam score, deduplicated
/// by text and truncated to `width`.
pub fn beam_search(
    adjacency: &Adjacency<'_>,
    seeds: &[String],
    query_embedding: &[f32],
    embedder: &dyn IEmbeddingProvider,
    width: usize,
    depth: usize,
    failures: &mut ServiceFailures,
) -> Vec<PathCandidate> {
    if query_embedding.is_empty() || seeds.is_empty() || width == 0 {
        return Vec::new();
    }

    let mut seed_ids: Vec<&String> = seeds.iter().filter(|s| adjacency.contains(s)).collect();
    seed_ids.sort();
    seed_ids.dedup();
    if seed_ids.is_empty() {
        debug!(seeds = seeds.len(), "no seed present in adjacency");
        return Vec::new();
    }

    let graph = adjacency.graph();
    let mut beam: Vec<PartialPath> = seed_ids.iter().map(|s| PartialPath::seed(s)).collect();
    let mut finished: Vec<PartialPath> = Vec::new();

    for _ in 0..depth {
        let mut extensions: Vec<PartialPath> = Vec::new();
        for path in &beam {
            if path.nodes.len() >= 2 {
                finished.push(path.clone());
            }
            if path.nodes.len() >= depth {
                continue;
            }
            for (edge, neighbor) in adjacency.neighbors(path.last()) {
                if path.nodes.iter().any(|n| n == neighbor) {
                    continue;
                }
                let edge_text = edge.edge_text();
                let neighbor_name = graph.node(neighbor).map(|n| n.name.as_str()).unwrap_or("");
                let text = format!("{edge_text} {neighbor_name}");

                failures.attempt();
                let relevance = match embedder.embed(&text) {
                    Ok(v) => cosine_similarity(query_embedding, &v),
                    Err(e) => {
                        failures.record(EMBED_STAGE, text, e);
                        continue;
                    }
                };

                let mut extended = path.clone();
                extended.nodes.push(neighbor.to_string());
                extended.steps.push(PathStep {
                    source: path.last().to_string(),
                    target: neighbor.to_string(),
                    edge_type: edge.edge_type.clone(),
                    edge_text,
                    provenance: edge.provenance,
                });
                extended.score += relevance;
                extensions.push(extended);
            }
        }

        if extensions.is_empty() {
            beam.clear();
            break;
        }
        extensions.sort_by(by_score_desc);
        extensions.truncate(width);
        beam = extensions;
    }

    // Whatever is left in the beam after the last round is complete too.
    finished.extend(beam.into_iter().filter(|p| p.nodes.len() >= 2));
    finished.sort_by(by_score_desc);

    let mut seen: HashSet<String> = HashSet::new();
    let mut results = Vec::new();
    for path in finished {
        let text = graph.describe_path(&path.steps);
        if !seen.insert(text.clone()) {
            continue;
        }
        match PathCandidate::new(path.steps, text, path.score) {
            Ok(candidate) => results.push(candidate),
            Err(e) => debug!(error = %e, "discarding malformed path"),
        }
        if results.len() == width {
            break;
        }
    }
    results
}
