use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::corpus::Corpus;
use crate::artifact::{ArtifactMetadata, ModelArtifact, FORMAT_VERSION};
use crate::encoder::TextEncoder;
use crate::errors::{Result, TriageError};
use crate::estimator::math::sigmoid;
use crate::estimator::{BinaryEstimator, MultiLabelEstimator};

/// Optimizer and vectorizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Vocabulary cap (most frequent terms are kept)
    pub max_features: usize,
    /// Inverse L2 regularization strength (C)
    pub regularization: f64,
    pub max_iterations: usize,
    /// Stop once every gradient component is below this
    pub tolerance: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_features: 1000,
            regularization: 1.0,
            max_iterations: 1000,
            tolerance: 1e-6,
        }
    }
}

/// Fits a TF-IDF encoder and one logistic estimator per label
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train on `corpus`; `on_label` is called after each label is fitted
    pub fn fit_with_progress<F>(&self, corpus: &Corpus, mut on_label: F) -> Result<ModelArtifact>
    where
        F: FnMut(usize, &str),
    {
        corpus.validate()?;
        if self.config.regularization <= 0.0 || !self.config.regularization.is_finite() {
            return Err(TriageError::Training(format!(
                "regularization must be positive, got {}",
                self.config.regularization
            )));
        }

        let documents: Vec<&str> = corpus.examples.iter().map(|e| e.symptoms.as_str()).collect();
        let encoder = TextEncoder::fit(&documents, self.config.max_features)?;
        let features: Vec<Vec<f64>> = documents.iter().map(|d| encoder.encode(d)).collect();
        let labels = corpus.labels();

        info!(
            corpus = %corpus.name,
            samples = corpus.len(),
            vocabulary = encoder.dimension(),
            labels = labels.len(),
            "training started"
        );

        let mut estimators = Vec::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            let targets: Vec<f64> = corpus
                .examples
                .iter()
                .map(|ex| if ex.conditions.contains(label) { 1.0 } else { 0.0 })
                .collect();
            estimators.push(self.fit_binary(&features, &targets, encoder.dimension()));
            on_label(i, label);
        }

        let estimator = MultiLabelEstimator::new(encoder.dimension(), estimators)?;
        let metadata = ArtifactMetadata {
            format_version: FORMAT_VERSION,
            trained_at: Utc::now(),
            corpus: corpus.name.clone(),
            training_samples: corpus.len(),
        };

        let artifact = ModelArtifact::new(encoder, labels, estimator, metadata)?;
        info!(corpus = %corpus.name, "training completed");
        Ok(artifact)
    }

    pub fn fit(&self, corpus: &Corpus) -> Result<ModelArtifact> {
        self.fit_with_progress(corpus, |_, _| {})
    }

    /// L2-regularized logistic regression by full-batch gradient descent
    ///
    /// Minimizes 0.5 * |w|^2 + C * sum(log-loss); the intercept is not
    /// penalized. Step size is 1/L for the objective's Lipschitz bound.
    fn fit_binary(&self, xs: &[Vec<f64>], ys: &[f64], dim: usize) -> BinaryEstimator {
        let c = self.config.regularization;
        let lipschitz = 1.0
            + 0.25
                * c
                * xs
                    .iter()
                    .map(|x| x.iter().map(|v| v * v).sum::<f64>() + 1.0)
                    .sum::<f64>();
        let step = 1.0 / lipschitz;

        let mut weights = vec![0.0; dim];
        let mut bias = 0.0;
        let mut grad_w = vec![0.0; dim];

        for iteration in 0..self.config.max_iterations {
            grad_w.copy_from_slice(&weights);
            let mut grad_b = 0.0;

            for (x, y) in xs.iter().zip(ys) {
                let z = x.iter().zip(&weights).map(|(a, b)| a * b).sum::<f64>() + bias;
                let residual = c * (sigmoid(z) - y);
                for (g, xi) in grad_w.iter_mut().zip(x) {
                    *g += residual * xi;
                }
                grad_b += residual;
            }

            let max_grad = grad_w
                .iter()
                .fold(grad_b.abs(), |acc, g| acc.max(g.abs()));
            if max_grad < self.config.tolerance {
                debug!(iteration, "binary estimator converged");
                break;
            }

            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= step * g;
            }
            bias -= step * grad_b;
        }

        BinaryEstimator::new(weights, bias)
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(TrainingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::corpus::TrainingExample;

    fn tiny_corpus() -> Corpus {
        let rows = [
            ("fever chills", "flu"),
            ("cough congestion", "common cold"),
            ("rash itching", "allergic reaction"),
        ];
        Corpus {
            name: "tiny".to_string(),
            examples: rows
                .iter()
                .map(|(s, c)| TrainingExample {
                    symptoms: s.to_string(),
                    conditions: vec![c.to_string()],
                })
                .collect(),
        }
    }

    #[test]
    fn test_fit_produces_consistent_artifact() {
        let artifact = Trainer::default().fit(&tiny_corpus()).unwrap();
        assert_eq!(artifact.labels, vec!["allergic reaction", "common cold", "flu"]);
        assert_eq!(artifact.estimator.n_features(), artifact.encoder.dimension());
        assert_eq!(artifact.metadata.corpus, "tiny");
        assert_eq!(artifact.metadata.training_samples, 3);
    }

    #[test]
    fn test_positive_document_scores_highest_for_its_label() {
        let artifact = Trainer::default().fit(&tiny_corpus()).unwrap();
        let x = artifact.encoder.encode("fever chills");
        let probs = artifact.estimator.predict(&x).unwrap();
        let flu = artifact.labels.iter().position(|l| l == "flu").unwrap();
        let best = probs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(best, flu);
    }

    #[test]
    fn test_training_is_deterministic() {
        let a = Trainer::default().fit(&tiny_corpus()).unwrap();
        let b = Trainer::default().fit(&tiny_corpus()).unwrap();
        assert_eq!(a.encoder, b.encoder);
        assert_eq!(a.estimator, b.estimator);
    }

    #[test]
    fn test_progress_callback_sees_every_label() {
        let mut seen = Vec::new();
        Trainer::default()
            .fit_with_progress(&tiny_corpus(), |_, label| seen.push(label.to_string()))
            .unwrap();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_invalid_regularization() {
        let trainer = Trainer::new(TrainingConfig {
            regularization: 0.0,
            ..TrainingConfig::default()
        });
        assert!(trainer.fit(&tiny_corpus()).is_err());
    }
}
