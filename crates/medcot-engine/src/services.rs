//! Process-wide read-only resources, loaded once and shared by reference.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::info;

use medcot_core::config::MedCotConfig;
use medcot_core::errors::{MedCotError, MedCotResult};
use medcot_core::traits::{IEmbeddingProvider, IFederatedSource, INliScorer, IReranker};
use medcot_graph::RetryPolicy;
use medcot_safety::SafetyScanner;
use medcot_search::{CachedEmbedder, PathSearchEngine};
use medcot_verification::{PathVerifier, VerifierModel};

/// External collaborator handles supplied by the host.
#[derive(Clone)]
pub struct Collaborators {
    pub embedder: Arc<dyn IEmbeddingProvider>,
    pub reranker: Arc<dyn IReranker>,
    pub nli: Arc<dyn INliScorer>,
    pub federated: Option<Arc<dyn IFederatedSource>>,
}

impl Collaborators {
    pub fn new(
        embedder: Arc<dyn IEmbeddingProvider>,
        reranker: Arc<dyn IReranker>,
        nli: Arc<dyn INliScorer>,
    ) -> Self {
        Self {
            embedder,
            reranker,
            nli,
            federated: None,
        }
    }

    pub fn with_federated(mut self, source: Arc<dyn IFederatedSource>) -> Self {
        self.federated = Some(source);
        self
    }
}

/// Everything a query needs that outlives the query.
pub struct ReasoningServices {
    pub config: MedCotConfig,
    pub embedder: Arc<dyn IEmbeddingProvider>,
    pub search: PathSearchEngine,
    pub verifier: PathVerifier,
    pub safety: SafetyScanner,
    /// `None` when no source was supplied or federation is disabled.
    pub federated: Option<Arc<dyn IFederatedSource>>,
    pub retry_policy: RetryPolicy,
}

impl ReasoningServices {
    /// Validate the config and load the verifier weights it names.
    ///
    /// A weight file that exists but cannot be used is fatal.
    pub fn load(config: MedCotConfig, collaborators: Collaborators) -> MedCotResult<Self> {
        let model = VerifierModel::load(config.verification.weights_path.as_deref().map(Path::new))?;
        Self::with_model(config, collaborators, model)
    }

    /// Build around an already loaded model.
    pub fn with_model(
        config: MedCotConfig,
        collaborators: Collaborators,
        model: VerifierModel,
    ) -> MedCotResult<Self> {
        config.validate()?;

        let embedder: Arc<dyn IEmbeddingProvider> = if config.embedding.cache_size > 0 {
            Arc::new(CachedEmbedder::new(
                collaborators.embedder,
                config.embedding.cache_size,
            ))
        } else {
            collaborators.embedder
        };

        let search = PathSearchEngine::new(
            Arc::clone(&embedder),
            collaborators.reranker,
            config.search.clone(),
        );
        let verifier = PathVerifier::new(
            Arc::new(model),
            collaborators.nli,
            config.verification.clone(),
        );
        let safety = SafetyScanner::new(config.safety.clone());
        let federated = collaborators.federated.filter(|_| config.federated.enabled);
        let retry_policy = RetryPolicy::from_config(&config.federated);

        info!(
            model = verifier.model().kind(),
            embedder = embedder.name(),
            federated = federated.as_ref().map(|f| f.name()).unwrap_or("none"),
            "reasoning services loaded"
        );

        Ok(Self {
            config,
            embedder,
            search,
            verifier,
            safety,
            federated,
            retry_policy,
        })
    }
}

/// Single-initialization holder for callers that load services lazily.
///
/// Concurrent first callers serialize on an init lock, so `load` runs at
/// most once per successful initialization.
pub struct SharedServices {
    cell: OnceLock<Arc<ReasoningServices>>,
    init_lock: Mutex<()>,
}

impl SharedServices {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    /// Install services. Fails if already initialized.
    pub fn initialize(&self, services: ReasoningServices) -> MedCotResult<()> {
        let _guard = self.lock();
        self.cell
            .set(Arc::new(services))
            .map_err(|_| MedCotError::ConcurrencyError("reasoning services already initialized".into()))
    }

    /// Return the installed services, loading them on first use.
    ///
    /// Load errors are returned and leave the holder empty, so a later call
    /// may retry.
    pub fn get_or_load(
        &self,
        load: impl FnOnce() -> MedCotResult<ReasoningServices>,
    ) -> MedCotResult<Arc<ReasoningServices>> {
        if let Some(services) = self.cell.get() {
            return Ok(Arc::clone(services));
        }
        let _guard = self.lock();
        // Another caller may have finished loading while we waited.
        if let Some(services) = self.cell.get() {
            return Ok(Arc::clone(services));
        }
        let loaded = Arc::new(load()?);
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }

    /// The lock guards no data, so a loader that panicked leaves nothing
    /// to repair.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.init_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self) -> Option<Arc<ReasoningServices>> {
        self.cell.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl Default for SharedServices {
    fn default() -> Self {
        Self::new()
    }
}
