//! Per-item aggregation of collaborator failures.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One failed collaborator call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceFailure {
    /// Pipeline stage, e.g. `embed` or `rerank`.
    pub stage: String,
    /// The item the call was made for (extension text, path text).
    pub item: String,
    pub reason: String,
}

/// Failures collected across a search, with call counts per stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceFailures {
    pub attempted: usize,
    pub failures: Vec<ServiceFailure>,
}

impl ServiceFailures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one collaborator call.
    pub fn attempt(&mut self) {
        self.attempted += 1;
    }

    pub fn record(&mut self, stage: &str, item: impl Into<String>, reason: impl ToString) {
        let failure = ServiceFailure {
            stage: stage.to_string(),
            item: item.into(),
            reason: reason.to_string(),
        };
        warn!(
            stage = %failure.stage,
            item = %failure.item,
            reason = %failure.reason,
            "collaborator call failed, item excluded"
        );
        self.failures.push(failure);
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether calls were made and none of them succeeded.
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.failures.len() >= self.attempted
    }

    pub fn count_for(&self, stage: &str) -> usize {
        self.failures.iter().filter(|f| f.stage == stage).count()
    }

    pub fn extend(&mut self, other: ServiceFailures) {
        self.attempted += other.attempted;
        self.failures.extend(other.failures);
    }
}
