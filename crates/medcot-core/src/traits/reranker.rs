use crate::errors::MedCotResult;

/// Cross-encoder relevance collaborator.
pub trait IReranker: Send + Sync {
    /// Relevance logit for a (query, passage) pair. Unbounded; callers squash it.
    fn score(&self, query: &str, passage: &str) -> MedCotResult<f64>;

    fn name(&self) -> &str;
}
