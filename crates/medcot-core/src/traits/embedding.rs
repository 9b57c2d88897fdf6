use crate::errors::MedCotResult;

/// Dense text embedding collaborator.
///
/// Vectors are expected to be unit-normalized; callers compare them with
/// cosine similarity.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text.
    fn embed(&self, text: &str) -> MedCotResult<Vec<f32>>;

    /// Embed a batch of texts. The default embeds one at a time.
    fn embed_batch(&self, texts: &[String]) -> MedCotResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
