//! # medcot-graph
//!
//! Builds the per-query knowledge graph the reasoning engine searches.
//!
//! - [`fusion`]: ordered, first-wins merge of provenance-tagged subgraphs.
//! - [`patient`]: the patient state graph built from linked observations.
//! - [`federated`]: pairwise lookup against a remote graph with bounded retry.
//! - [`indexed`]: a petgraph view of a fused graph for traversal.
//! - [`stats`]: summary statistics recorded in the audit trail.

pub mod federated;
pub mod fusion;
pub mod indexed;
pub mod patient;
pub mod stats;

pub use federated::{fetch_subgraph, normalize_predicate, RetryPolicy};
pub use fusion::{fuse, fuse_with_report, FusionReport};
pub use indexed::IndexedGraph;
pub use patient::build_patient_graph;
pub use stats::GraphStats;
