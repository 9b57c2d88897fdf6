pub mod defaults;
mod embedding_config;
mod federated_config;
mod observability_config;
mod safety_config;
mod search_config;
mod verification_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use federated_config::FederatedConfig;
pub use observability_config::ObservabilityConfig;
pub use safety_config::SafetyConfig;
pub use search_config::SearchConfig;
pub use verification_config::VerificationConfig;

use crate::errors::{MedCotError, MedCotResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MedCotConfig {
    pub search: SearchConfig,
    pub verification: VerificationConfig,
    pub safety: SafetyConfig,
    pub federated: FederatedConfig,
    pub embedding: EmbeddingConfig,
    pub observability: ObservabilityConfig,
}

impl MedCotConfig {
    /// Parse a TOML string. Missing sections and fields take their defaults.
    pub fn from_toml(toml_str: &str) -> MedCotResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| MedCotError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> MedCotResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Cross-field sanity checks.
    pub fn validate(&self) -> MedCotResult<()> {
        self.search
            .validate()
            .map_err(|e| MedCotError::InvalidConfig {
                reason: e.to_string(),
            })?;
        let v = &self.verification;
        if !(0.0..=1.0).contains(&v.cautious_threshold)
            || !(0.0..=1.0).contains(&v.strict_threshold)
            || v.cautious_threshold > v.strict_threshold
        {
            return Err(MedCotError::InvalidConfig {
                reason: format!(
                    "tier thresholds must satisfy 0 <= cautious ({}) <= strict ({}) <= 1",
                    v.cautious_threshold, v.strict_threshold
                ),
            });
        }
        Ok(())
    }
}
