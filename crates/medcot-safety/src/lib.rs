//! # medcot-safety
//!
//! Scans the fused graph for risk edges among the query's own entities and
//! overrides the reasoning tier when any are found.

pub mod scanner;
pub mod warning;

pub use scanner::{SafetyOutcome, SafetyScanner, RISK_PATTERNS};
pub use warning::{compose_warning, warning_block};
