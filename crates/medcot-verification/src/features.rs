//! The 8-dimensional verification feature vector.

use serde::{Deserialize, Serialize};

use medcot_core::config::defaults::{DEFAULT_CAUSALITY_PLACEHOLDER, DEFAULT_GCOT_PLACEHOLDER};
use medcot_core::constants::FEATURE_DIMENSIONS;

/// Features in model input order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathFeatures {
    /// NLI entailment probability of the step assertion given the query.
    pub entailment: f64,
    /// Graph chain-of-thought agreement. Not computed; fixed placeholder.
    pub gcot: f64,
    /// Whether the step exists in the knowledge graph. Always 1 for graph paths.
    pub in_kg: f64,
    /// Causal support. Not computed; fixed placeholder.
    pub causality: f64,
    /// Number of steps in the whole path.
    pub path_length: f64,
    pub source_degree: f64,
    pub target_degree: f64,
    /// Trust weight of the step's provenance.
    pub provenance_trust: f64,
}

impl PathFeatures {
    /// Features of one step.
    pub fn for_step(entailment: f64, path_length: usize, provenance_trust: f64) -> Self {
        Self {
            entailment,
            gcot: DEFAULT_GCOT_PLACEHOLDER,
            in_kg: 1.0,
            causality: DEFAULT_CAUSALITY_PLACEHOLDER,
            path_length: path_length as f64,
            source_degree: 1.0,
            target_degree: 1.0,
            provenance_trust,
        }
    }

    pub fn to_array(&self) -> [f64; FEATURE_DIMENSIONS] {
        [
            self.entailment,
            self.gcot,
            self.in_kg,
            self.causality,
            self.path_length,
            self.source_degree,
            self.target_degree,
            self.provenance_trust,
        ]
    }

    pub fn from_array(values: [f64; FEATURE_DIMENSIONS]) -> Self {
        let [entailment, gcot, in_kg, causality, path_length, source_degree, target_degree, provenance_trust] =
            values;
        Self {
            entailment,
            gcot,
            in_kg,
            causality,
            path_length,
            source_degree,
            target_degree,
            provenance_trust,
        }
    }

    /// Element-wise mean. `None` for an empty slice.
    pub fn mean(steps: &[PathFeatures]) -> Option<PathFeatures> {
        if steps.is_empty() {
            return None;
        }
        let mut sum = [0.0; FEATURE_DIMENSIONS];
        for step in steps {
            for (acc, v) in sum.iter_mut().zip(step.to_array()) {
                *acc += v;
            }
        }
        let n = steps.len() as f64;
        Some(Self::from_array(sum.map(|v| v / n)))
    }
}
