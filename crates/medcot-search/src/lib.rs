//! # medcot-search
//!
//! Finds candidate reasoning paths in a fused graph.
//!
//! Query → intent → intent-filtered adjacency → beam search (with an
//! unconstrained fallback) → cross-encoder rerank → top-k candidates.

pub mod adjacency;
pub mod beam;
pub mod embedding_cache;
pub mod engine;
pub mod failures;
pub mod intent;
pub mod rerank;

pub use adjacency::Adjacency;
pub use embedding_cache::CachedEmbedder;
pub use engine::{PathSearchEngine, SearchReport};
pub use failures::{ServiceFailure, ServiceFailures};
pub use intent::IntentClassifier;
