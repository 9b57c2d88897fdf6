//! Span definitions per pipeline stage.

/// Span covering one full query.
#[macro_export]
macro_rules! reasoning_span {
    ($query_id:expr) => {
        tracing::info_span!("medcot.reasoning", query_id = %$query_id)
    };
}

/// Create a fusion span.
#[macro_export]
macro_rules! fusion_span {
    ($sources:expr) => {
        tracing::info_span!("medcot.fusion", sources = $sources)
    };
}

/// Create a path search span.
#[macro_export]
macro_rules! path_search_span {
    ($intent:expr, $seeds:expr) => {
        tracing::info_span!("medcot.path_search", intent = %$intent, seeds = $seeds)
    };
}

/// Create a verification span.
#[macro_export]
macro_rules! verification_span {
    ($candidates:expr) => {
        tracing::info_span!("medcot.verification", candidates = $candidates)
    };
}

/// Create a safety scan span.
#[macro_export]
macro_rules! safety_span {
    ($entities:expr) => {
        tracing::info_span!("medcot.safety", entities = $entities)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const REASONING: &str = "medcot.reasoning";
    pub const FUSION: &str = "medcot.fusion";
    pub const PATH_SEARCH: &str = "medcot.path_search";
    pub const VERIFICATION: &str = "medcot.verification";
    pub const SAFETY: &str = "medcot.safety";
}
