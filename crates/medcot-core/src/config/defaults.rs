// Single source of truth for all default values.

// --- Search ---
pub const DEFAULT_BEAM_WIDTH: usize = 50;
pub const DEFAULT_MAX_PATH_LENGTH: usize = 3; // nodes, so at most 2 hops
pub const DEFAULT_RERANK_TOP_K: usize = 10;
pub const DEFAULT_BEAM_WEIGHT: f64 = 0.3;
pub const DEFAULT_RERANK_WEIGHT: f64 = 0.7;

// --- Verification ---
pub const DEFAULT_STRICT_THRESHOLD: f64 = 0.8;
pub const DEFAULT_CAUTIOUS_THRESHOLD: f64 = 0.5;
pub const DEFAULT_NLI_FALLBACK: f64 = 0.5;
pub const DEFAULT_GCOT_PLACEHOLDER: f64 = 0.5;
pub const DEFAULT_CAUSALITY_PLACEHOLDER: f64 = 0.5;

// --- Safety ---
pub const DEFAULT_GENERAL_WARNING_CAP: usize = 5;

// --- Federated lookup ---
pub const DEFAULT_FEDERATED_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_FEDERATED_RETRY_DELAY_MS: u64 = 5_000;
pub const DEFAULT_FEDERATED_MAX_RESULTS: usize = 10;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_TRACING_ENABLED: bool = false;
