//! # medcot-verification
//!
//! Turns ranked candidate paths into one verified path, a calibrated
//! confidence, and a tier.
//!
//! Each step yields an 8-dimensional feature vector (NLI entailment,
//! placeholders, path length, provenance trust). Step vectors are averaged
//! per path and scored by a fixed pretrained model.

pub mod features;
pub mod model;
pub mod result;
pub mod verifier;

pub use features::PathFeatures;
pub use model::VerifierModel;
pub use result::VerificationResult;
pub use verifier::PathVerifier;
