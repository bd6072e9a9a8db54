//! Model artifact persistence
//!
//! A trained model lives in a directory with three JSON components:
//! the fitted encoder, the label set and the classifier parameters.
//! Loading fails on the first missing, unreadable or inconsistent
//! component.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use crate::encoder::TextEncoder;
use crate::errors::{Result, TriageError};
use crate::estimator::MultiLabelEstimator;

pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const LABELS_FILE: &str = "labels.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";

pub const FORMAT_VERSION: u32 = 1;

/// Provenance stored next to the classifier parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    pub corpus: String,
    pub training_samples: usize,
}

#[derive(Serialize, Deserialize)]
struct ClassifierFile {
    metadata: ArtifactMetadata,
    estimator: MultiLabelEstimator,
}

/// Trained encoder, label set and estimator
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    pub encoder: TextEncoder,
    pub labels: Vec<String>,
    pub estimator: MultiLabelEstimator,
    pub metadata: ArtifactMetadata,
}

impl ModelArtifact {
    /// Assemble and validate an in-memory artifact
    pub fn new(
        encoder: TextEncoder,
        labels: Vec<String>,
        estimator: MultiLabelEstimator,
        metadata: ArtifactMetadata,
    ) -> Result<Self> {
        let artifact = Self {
            encoder,
            labels,
            estimator,
            metadata,
        };
        artifact.validate()?;
        Ok(artifact)
    }

    /// Load all three components from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let encoder: TextEncoder = read_component(dir, VECTORIZER_FILE)?;
        let labels: Vec<String> = read_component(dir, LABELS_FILE)?;
        let classifier: ClassifierFile = read_component(dir, CLASSIFIER_FILE)?;

        let artifact = Self {
            encoder,
            labels,
            estimator: classifier.estimator,
            metadata: classifier.metadata,
        };
        artifact.validate()?;

        info!(
            dir = %dir.display(),
            labels = artifact.labels.len(),
            vocabulary = artifact.encoder.dimension(),
            corpus = %artifact.metadata.corpus,
            "model artifact loaded"
        );
        Ok(artifact)
    }

    /// Write all three components into `dir`, creating it if needed
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;

        write_component(dir, VECTORIZER_FILE, &self.encoder)?;
        write_component(dir, LABELS_FILE, &self.labels)?;
        write_component(
            dir,
            CLASSIFIER_FILE,
            &ClassifierFile {
                metadata: self.metadata.clone(),
                estimator: self.estimator.clone(),
            },
        )?;

        info!(dir = %dir.display(), "model artifact saved");
        Ok(())
    }

    /// Cross-component consistency checks
    ///
    /// Every failure is reported as an initialization error naming the
    /// offending component.
    pub fn validate(&self) -> Result<()> {
        if self.metadata.format_version != FORMAT_VERSION {
            return Err(TriageError::init(
                CLASSIFIER_FILE,
                format!(
                    "unsupported format version {} (expected {})",
                    self.metadata.format_version, FORMAT_VERSION
                ),
            ));
        }

        self.encoder
            .validate()
            .map_err(|e| TriageError::init(VECTORIZER_FILE, e.to_string()))?;

        if self.labels.is_empty() {
            return Err(TriageError::init(LABELS_FILE, "label set is empty"));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.labels.iter().find(|l| !seen.insert(l.as_str())) {
            return Err(TriageError::init(
                LABELS_FILE,
                format!("duplicate label '{}'", dup),
            ));
        }

        if self.estimator.n_features() != self.encoder.dimension() {
            return Err(TriageError::init(
                CLASSIFIER_FILE,
                format!(
                    "estimator expects {} features but vocabulary has {} terms",
                    self.estimator.n_features(),
                    self.encoder.dimension()
                ),
            ));
        }
        if self.estimator.n_labels() != self.labels.len() {
            return Err(TriageError::init(
                CLASSIFIER_FILE,
                format!(
                    "estimator has {} outputs but label set has {} labels",
                    self.estimator.n_labels(),
                    self.labels.len()
                ),
            ));
        }
        self.estimator
            .validate()
            .map_err(|e| TriageError::init(CLASSIFIER_FILE, e.to_string()))?;

        Ok(())
    }
}

fn read_component<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T> {
    let path = dir.join(name);
    debug!(path = %path.display(), "reading artifact component");

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| TriageError::init(name, format!("cannot read {}: {}", path.display(), e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| TriageError::init(name, format!("cannot parse {}: {}", path.display(), e)))
}

fn write_component<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    std::fs::write(dir.join(name), contents)?;
    Ok(())
}
