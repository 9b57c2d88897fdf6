//! In-memory embedding cache using moka.
//!
//! Keys are blake3 hashes of the embedded text. The same hop text
//! (`"<edge text> <neighbor name>"`) recurs across beams and queries, so
//! repeated lookups skip the embedding collaborator.

use std::sync::Arc;

use moka::sync::Cache;
use tracing::trace;

use medcot_core::errors::MedCotResult;
use medcot_core::traits::IEmbeddingProvider;

/// Caching wrapper around any embedding provider.
pub struct CachedEmbedder {
    inner: Arc<dyn IEmbeddingProvider>,
    cache: Cache<String, Vec<f32>>,
}

impl CachedEmbedder {
    pub fn new(inner: Arc<dyn IEmbeddingProvider>, max_entries: u64) -> Self {
        let cache = Cache::builder().max_capacity(max_entries).build();
        Self { inner, cache }
    }

    fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    /// Number of entries currently in the cache.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, text: &str) -> bool {
        self.cache.contains_key(&Self::key(text))
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl IEmbeddingProvider for CachedEmbedder {
    fn embed(&self, text: &str) -> MedCotResult<Vec<f32>> {
        let key = Self::key(text);
        if let Some(hit) = self.cache.get(&key) {
            trace!(provider = self.inner.name(), "embedding cache hit");
            return Ok(hit);
        }
        // Failures are not cached.
        let embedding = self.inner.embed(text)?;
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
