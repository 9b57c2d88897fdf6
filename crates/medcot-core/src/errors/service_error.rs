/// Errors raised by external collaborator services (embedding, rerank, NLI).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("service unavailable: {service}")]
    Unavailable { service: String },

    #[error("inference failed in {service}: {reason}")]
    InferenceFailed { service: String, reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
