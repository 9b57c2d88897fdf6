//! Degradation tracking.

mod tracker;

pub use tracker::DegradationTracker;
