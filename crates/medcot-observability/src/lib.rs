//! # medcot-observability
//!
//! Structured tracing for the reasoning pipeline: subscriber setup, one span
//! per stage, structured events, and a tracker for degradation events.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::DegradationTracker;
pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter};
