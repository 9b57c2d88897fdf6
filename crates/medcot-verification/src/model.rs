//! Fixed pretrained verifier models and their JSON weight file.
//!
//! Two shapes are supported: logistic regression over the 8 features, and
//! a one-hidden-layer network `Linear(8, H) → BatchNorm → ReLU → Linear(H, 1)`
//! with inference-mode batch normalization (running statistics). Dropout is
//! the identity at inference and has no weights.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use medcot_core::constants::FEATURE_DIMENSIONS;
use medcot_core::errors::{MedCotError, MedCotResult, VerificationError};
use medcot_core::scoring::sigmoid;

const DEFAULT_BATCH_NORM_EPS: f64 = 1e-5;

/// On-disk weight file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum WeightFile {
    Linear {
        weights: Vec<f64>,
        bias: f64,
    },
    FeedForward {
        hidden: Vec<Vec<f64>>,
        hidden_bias: Vec<f64>,
        #[serde(default)]
        batch_norm: Option<BatchNormFile>,
        output: Vec<f64>,
        output_bias: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BatchNormFile {
    gamma: Vec<f64>,
    beta: Vec<f64>,
    running_mean: Vec<f64>,
    running_var: Vec<f64>,
    #[serde(default = "default_eps")]
    eps: f64,
}

fn default_eps() -> f64 {
    DEFAULT_BATCH_NORM_EPS
}

fn check_len(field: &str, values: &[f64], expected: usize) -> Result<(), VerificationError> {
    if values.len() != expected {
        return Err(VerificationError::WeightShape {
            field: field.to_string(),
            expected,
            actual: values.len(),
        });
    }
    check_finite(field, values)
}

fn check_finite(field: &str, values: &[f64]) -> Result<(), VerificationError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(VerificationError::NonFiniteWeight {
            field: field.to_string(),
        })
    }
}

fn to_feature_row(field: &str, values: &[f64]) -> Result<[f64; FEATURE_DIMENSIONS], VerificationError> {
    check_len(field, values, FEATURE_DIMENSIONS)?;
    let mut row = [0.0; FEATURE_DIMENSIONS];
    row.copy_from_slice(values);
    Ok(row)
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Logistic regression.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub weights: [f64; FEATURE_DIMENSIONS],
    pub bias: f64,
}

/// Inference-mode batch normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchNorm {
    pub gamma: Vec<f64>,
    pub beta: Vec<f64>,
    pub running_mean: Vec<f64>,
    pub running_var: Vec<f64>,
    pub eps: f64,
}

impl BatchNorm {
    fn apply(&self, i: usize, x: f64) -> f64 {
        (x - self.running_mean[i]) / (self.running_var[i] + self.eps).sqrt() * self.gamma[i]
            + self.beta[i]
    }
}

/// One-hidden-layer feed-forward network.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedForwardModel {
    pub hidden: Vec<[f64; FEATURE_DIMENSIONS]>,
    pub hidden_bias: Vec<f64>,
    pub batch_norm: Option<BatchNorm>,
    pub output: Vec<f64>,
    pub output_bias: f64,
}

impl FeedForwardModel {
    fn logit(&self, x: &[f64; FEATURE_DIMENSIONS]) -> f64 {
        let activations = self
            .hidden
            .iter()
            .zip(&self.hidden_bias)
            .enumerate()
            .map(|(i, (row, b))| {
                let z = dot(row, x) + b;
                let z = match &self.batch_norm {
                    Some(bn) => bn.apply(i, z),
                    None => z,
                };
                z.max(0.0)
            });
        activations
            .zip(&self.output)
            .map(|(a, w)| a * w)
            .sum::<f64>()
            + self.output_bias
    }
}

/// Scalar scorer over averaged path features.
#[derive(Debug, Clone, PartialEq)]
pub enum VerifierModel {
    Linear(LinearModel),
    FeedForward(FeedForwardModel),
}

impl Default for VerifierModel {
    fn default() -> Self {
        Self::zero()
    }
}

impl VerifierModel {
    /// All-zero logistic regression: every path scores 0.5.
    pub fn zero() -> Self {
        Self::Linear(LinearModel {
            weights: [0.0; FEATURE_DIMENSIONS],
            bias: 0.0,
        })
    }

    pub fn linear(weights: [f64; FEATURE_DIMENSIONS], bias: f64) -> Self {
        Self::Linear(LinearModel { weights, bias })
    }

    /// Parse and shape-check a JSON weight file body.
    pub fn from_json_str(json: &str) -> Result<Self, VerificationError> {
        let file: WeightFile =
            serde_json::from_str(json).map_err(|e| VerificationError::MalformedWeights {
                reason: e.to_string(),
            })?;
        Self::from_weight_file(file)
    }

    /// Load weights from `path`. No path, or a path that does not exist,
    /// yields the zero model. A present but unreadable or malformed file is
    /// a `ResourceLoad` error.
    pub fn load(path: Option<&Path>) -> MedCotResult<Self> {
        let Some(path) = path else {
            info!("no verifier weights configured, using zero-weight model");
            return Ok(Self::zero());
        };
        if !path.exists() {
            warn!(
                path = %path.display(),
                "verifier weights not found, using zero-weight model"
            );
            return Ok(Self::zero());
        }

        let resource_err = |reason: String| MedCotError::ResourceLoad {
            resource: path.display().to_string(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| resource_err(e.to_string()))?;
        let model = Self::from_json_str(&content).map_err(|e| resource_err(e.to_string()))?;
        info!(path = %path.display(), kind = model.kind(), "verifier weights loaded");
        Ok(model)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::FeedForward(_) => "feed_forward",
        }
    }

    pub fn logit(&self, features: &[f64; FEATURE_DIMENSIONS]) -> f64 {
        match self {
            Self::Linear(m) => dot(&m.weights, features) + m.bias,
            Self::FeedForward(m) => m.logit(features),
        }
    }

    /// `sigmoid(logit)`.
    pub fn confidence(&self, features: &[f64; FEATURE_DIMENSIONS]) -> f64 {
        sigmoid(self.logit(features))
    }
}

impl VerifierModel {
    fn from_weight_file(file: WeightFile) -> Result<Self, VerificationError> {
        match file {
            WeightFile::Linear { weights, bias } => {
                let weights = to_feature_row("weights", &weights)?;
                check_finite("bias", &[bias])?;
                Ok(Self::linear(weights, bias))
            }
            WeightFile::FeedForward {
                hidden,
                hidden_bias,
                batch_norm,
                output,
                output_bias,
            } => {
                let width = hidden.len();
                if width == 0 {
                    return Err(VerificationError::MalformedWeights {
                        reason: "hidden layer has no units".to_string(),
                    });
                }
                let hidden = hidden
                    .iter()
                    .enumerate()
                    .map(|(i, row)| to_feature_row(&format!("hidden[{i}]"), row))
                    .collect::<Result<Vec<_>, _>>()?;
                check_len("hidden_bias", &hidden_bias, width)?;
                check_len("output", &output, width)?;
                check_finite("output_bias", &[output_bias])?;

                let batch_norm = match batch_norm {
                    Some(bn) => {
                        check_len("batch_norm.gamma", &bn.gamma, width)?;
                        check_len("batch_norm.beta", &bn.beta, width)?;
                        check_len("batch_norm.running_mean", &bn.running_mean, width)?;
                        check_len("batch_norm.running_var", &bn.running_var, width)?;
                        check_finite("batch_norm.eps", &[bn.eps])?;
                        if bn.running_var.iter().any(|v| v + bn.eps <= 0.0) {
                            return Err(VerificationError::MalformedWeights {
                                reason: "batch norm variance plus eps must be positive"
                                    .to_string(),
                            });
                        }
                        Some(BatchNorm {
                            gamma: bn.gamma,
                            beta: bn.beta,
                            running_mean: bn.running_mean,
                            running_var: bn.running_var,
                            eps: bn.eps,
                        })
                    }
                    None => None,
                };

                Ok(Self::FeedForward(FeedForwardModel {
                    hidden,
                    hidden_bias,
                    batch_norm,
                    output,
                    output_bias,
                }))
            }
        }
    }
}
