/// MedCoT engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dimensionality of the verifier feature vector.
pub const FEATURE_DIMENSIONS: usize = 8;

/// Display name used when a node id has no metadata in the fused graph.
pub const UNKNOWN_NODE_NAME: &str = "Unknown";

/// Audit step names, in pipeline order.
pub mod steps {
    pub const FUSION: &str = "4_FUSION";
    pub const PATH_GENERATION: &str = "6_PATH_GEN";
    pub const VERIFICATION: &str = "7_VERIFICATION";
    pub const SAFETY: &str = "9_SAFETY";
}
