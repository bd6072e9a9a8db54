use serde::{Deserialize, Serialize};

use super::math::{dot, sigmoid};
use crate::errors::{Result, TriageError};

/// Independent per-label probabilities, aligned with the label set
pub type ProbabilityMap = Vec<f64>;

/// Logistic binary estimator for a single label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryEstimator {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl BinaryEstimator {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    pub fn probability(&self, features: &[f64]) -> f64 {
        sigmoid(dot(&self.weights, features) + self.bias)
    }
}

/// One-vs-rest multi-label estimator
///
/// Each label has its own binary estimator, so the resulting probabilities
/// are independent and do not sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLabelEstimator {
    n_features: usize,
    estimators: Vec<BinaryEstimator>,
}

impl MultiLabelEstimator {
    pub fn new(n_features: usize, estimators: Vec<BinaryEstimator>) -> Result<Self> {
        let model = Self {
            n_features,
            estimators,
        };
        model.validate()?;
        Ok(model)
    }

    /// Structural checks: weight lengths and finite parameters
    pub fn validate(&self) -> Result<()> {
        for (label_idx, est) in self.estimators.iter().enumerate() {
            if est.weights.len() != self.n_features {
                return Err(TriageError::DimensionMismatch {
                    context: format!("weights of estimator {}", label_idx),
                    expected: self.n_features,
                    got: est.weights.len(),
                });
            }
            if let Some((i, w)) = est.weights.iter().enumerate().find(|(_, w)| !w.is_finite()) {
                return Err(TriageError::init(
                    "classifier.json",
                    format!("non-finite weight at estimator {} index {}: {}", label_idx, i, w),
                ));
            }
            if !est.bias.is_finite() {
                return Err(TriageError::init(
                    "classifier.json",
                    format!("non-finite bias at estimator {}: {}", label_idx, est.bias),
                ));
            }
        }
        Ok(())
    }

    /// Probability per label for one feature vector
    pub fn predict(&self, features: &[f64]) -> Result<ProbabilityMap> {
        if features.len() != self.n_features {
            return Err(TriageError::DimensionMismatch {
                context: "estimator input".to_string(),
                expected: self.n_features,
                got: features.len(),
            });
        }

        self.estimators
            .iter()
            .enumerate()
            .map(|(i, est)| {
                let p = est.probability(features);
                if p.is_finite() && (0.0..=1.0).contains(&p) {
                    Ok(p)
                } else {
                    Err(TriageError::Prediction(format!(
                        "estimator {} produced invalid probability {}",
                        i, p
                    )))
                }
            })
            .collect()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_labels(&self) -> usize {
        self.estimators.len()
    }

    pub fn estimators(&self) -> &[BinaryEstimator] {
        &self.estimators
    }
}
