//! # medcot-core
//!
//! Foundation crate for the MedCoT graph-constrained reasoning engine.
//! Defines the graph data model, provenance trust table, confidence tiers,
//! collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod intent;
pub mod models;
pub mod scoring;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MedCotConfig;
pub use errors::{MedCotError, MedCotResult};
pub use intent::Intent;
pub use models::{
    ConfidenceTier, Edge, FusedGraph, Node, NodeId, PathCandidate, PathStep, Provenance,
    SafetyAlert,
};
