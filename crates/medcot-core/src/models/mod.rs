pub mod audit_entry;
pub mod degradation_event;
pub mod graph;
pub mod linked_entity;
pub mod path;
pub mod provenance;
pub mod safety_alert;
pub mod tier;

pub use audit_entry::{AuditEntry, AuditStatus, AuditTrail};
pub use degradation_event::DegradationEvent;
pub use graph::{Edge, FusedGraph, Node, NodeId};
pub use linked_entity::{LinkedEntity, MentionSource};
pub use path::{PathCandidate, PathStep};
pub use provenance::Provenance;
pub use safety_alert::{AlertKind, SafetyAlert};
pub use tier::ConfidenceTier;
