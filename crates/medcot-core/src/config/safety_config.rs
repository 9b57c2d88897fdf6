use serde::{Deserialize, Serialize};

use super::defaults;

/// Safety scanner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Maximum number of general contraindication warnings in the fallback pass.
    pub general_warning_cap: usize,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            general_warning_cap: defaults::DEFAULT_GENERAL_WARNING_CAP,
        }
    }
}
