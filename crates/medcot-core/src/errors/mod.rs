mod graph_error;
mod lookup_error;
mod search_error;
mod service_error;
mod verification_error;

pub use graph_error::GraphError;
pub use lookup_error::LookupError;
pub use search_error::SearchError;
pub use service_error::ServiceError;
pub use verification_error::VerificationError;

/// Convenience alias used across the workspace.
pub type MedCotResult<T> = Result<T, MedCotError>;

/// Top-level error for the reasoning engine.
///
/// Only `ResourceLoad` is fatal: it prevents the engine from being built.
/// Everything else is caught at stage boundaries and turned into a degraded
/// but well-formed outcome.
#[derive(Debug, thiserror::Error)]
pub enum MedCotError {
    #[error("node not found: {id}")]
    NodeNotFound { id: String },

    #[error("resource load failed: {resource}: {reason}")]
    ResourceLoad { resource: String, reason: String },

    #[error("degraded mode: {component} fell back to {fallback}")]
    DegradedMode { component: String, fallback: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("graph error: {0}")]
    GraphError(#[from] GraphError),

    #[error("search error: {0}")]
    SearchError(#[from] SearchError),

    #[error("verification error: {0}")]
    VerificationError(#[from] VerificationError),

    #[error("federated lookup error: {0}")]
    LookupError(#[from] LookupError),

    #[error("external service error: {0}")]
    ServiceError(#[from] ServiceError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),
}

impl MedCotError {
    /// Whether this error must stop query processing altogether.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ResourceLoad { .. } | Self::InvalidConfig { .. })
    }
}
