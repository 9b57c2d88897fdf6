/// Federated knowledge lookup errors.
///
/// Only `Transient` failures are worth retrying.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("transient lookup failure: {reason}")]
    Transient { reason: String },

    #[error("permanent lookup failure: {reason}")]
    Permanent { reason: String },
}

impl LookupError {
    pub fn transient(reason: impl Into<String>) -> Self {
        Self::Transient {
            reason: reason.into(),
        }
    }

    pub fn permanent(reason: impl Into<String>) -> Self {
        Self::Permanent {
            reason: reason.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}
