/// Path verifier errors.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("weight shape mismatch for {field}: expected {expected}, got {actual}")]
    WeightShape {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("non-finite value in verifier weights: {field}")]
    NonFiniteWeight { field: String },

    #[error("malformed weight file: {reason}")]
    MalformedWeights { reason: String },
}
