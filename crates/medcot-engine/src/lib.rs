//! # medcot-engine
//!
//! Runs one query through the whole reasoning pipeline.
//!
//! ```text
//! ReasoningEngine
//! ├── Fusion        local subgraphs → federated lookup → patient state graph
//! ├── Path search   intent → constrained beam search → fallback → rerank
//! ├── Verification  per-path features → verifier model → tier
//! └── Safety        risk edges among query entities → tier override
//! ```
//!
//! Shared resources live in [`ReasoningServices`], built once at startup.
//! Every stage appends to the outcome's audit trail.

pub mod engine;
pub mod outcome;
pub mod request;
pub mod services;

pub use engine::ReasoningEngine;
pub use outcome::{ReasoningOutcome, ABSTAIN_MESSAGE};
pub use request::ReasoningRequest;
pub use services::{Collaborators, ReasoningServices, SharedServices};
