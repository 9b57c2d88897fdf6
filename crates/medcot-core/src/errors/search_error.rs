/// Path search errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("beam width must be at least 1")]
    ZeroBeamWidth,

    #[error("max path length must be at least 2 nodes, got {depth}")]
    DepthTooShallow { depth: usize },

    #[error("all {attempted} external scoring calls failed")]
    ServicesUnavailable { attempted: usize },
}
