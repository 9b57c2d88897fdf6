//! Property tests for medcot-search: path acyclicity and length bounds.

use std::collections::HashSet;

use proptest::prelude::*;

use medcot_core::intent::Intent;
use medcot_core::traits::IEmbeddingProvider;
use medcot_search::adjacency::Adjacency;
use medcot_search::beam::beam_search;
use medcot_search::ServiceFailures;
use test_fixtures::collaborators::HashEmbedder;
use test_fixtures::graphs;

const NODES: usize = 10;

fn triples() -> impl Strategy<Value = Vec<(usize, usize, usize)>> {
    prop::collection::vec((0..NODES, 0..NODES, 0..4usize), 0..40)
}

fn intent() -> impl Strategy<Value = Intent> {
    prop::sample::select(Intent::ALL.to_vec())
}

// =============================================================================
// Every path is acyclic, connected, and 1 <= hops <= depth - 1
// =============================================================================
proptest! {
    #[test]
    fn paths_are_acyclic_and_bounded(
        edges in triples(),
        seeds in prop::collection::vec(0..NODES, 1..4),
        intent in intent(),
        width in 1usize..8,
        depth in 2usize..6,
    ) {
        let graph = graphs::from_triples(NODES, &edges);
        let seeds: Vec<String> = seeds.iter().map(|i| format!("n{i}")).collect();
        let embedder = HashEmbedder::new(16);
        let query = embedder.embed("query").unwrap();
        let adjacency = Adjacency::build(&graph, intent);
        let mut failures = ServiceFailures::new();

        let paths = beam_search(&adjacency, &seeds, &query, &embedder, width, depth, &mut failures);

        prop_assert!(paths.len() <= width);
        let mut texts = HashSet::new();
        for path in &paths {
            prop_assert!(!path.steps.is_empty());
            prop_assert!(path.steps.len() <= depth - 1);

            let ids = path.node_ids();
            let unique: HashSet<&str> = ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), ids.len());

            prop_assert!(seeds.iter().any(|s| s == ids[0]));
            for step in &path.steps {
                prop_assert!(intent.permits(&step.edge_type));
            }
            prop_assert!(texts.insert(path.text.clone()));
        }

        // Beam scores come out sorted, best first.
        for pair in paths.windows(2) {
            prop_assert!(pair[0].beam_score >= pair[1].beam_score);
        }
    }
}
