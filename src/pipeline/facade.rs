use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::advice::rules::TRY_AGAIN;
use crate::advice::{AdviceConfig, RecommendationEngine};
use crate::artifact::ModelArtifact;
use crate::config::Config;
use crate::errors::{Result, TriageError};
use crate::ranking::{ConditionEntry, RankConfig, Ranker};

/// Probabilities above this are listed in the per-request debug log
const DEBUG_LOG_FLOOR: f64 = 0.01;
const DEBUG_LOG_TOP: usize = 5;

/// Ranked conditions and next steps for one symptom description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub conditions: Vec<ConditionEntry>,
    pub next_steps: Vec<String>,
    /// Set when an internal failure was recovered into a fallback result
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

impl Prediction {
    fn degraded() -> Self {
        Self {
            conditions: Vec::new(),
            next_steps: vec![TRY_AGAIN.to_string()],
            degraded: true,
        }
    }
}

/// Tunables the facade passes to the ranker and recommendation engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineSettings {
    pub ranking: RankConfig,
    pub advice: AdviceConfig,
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            ranking: config.ranking.clone(),
            advice: config.advice.clone(),
        }
    }
}

/// Inference pipeline facade: encode, estimate, rank, recommend
///
/// Holds the only copy of the model artifact. All methods take `&self`,
/// so one instance can serve concurrent callers without locking.
#[derive(Debug)]
pub struct SymptomChecker {
    artifact: ModelArtifact,
    ranker: Ranker,
    advisor: RecommendationEngine,
}

impl SymptomChecker {
    /// Load the artifact named by `config` and build the pipeline
    pub fn initialize(config: &Config) -> Result<Self> {
        let dir = config.artifact_dir();
        let artifact = ModelArtifact::load(&dir).map_err(|e| {
            error!(dir = %dir.display(), error = %e, "symptom model unavailable");
            match e {
                TriageError::Initialization { .. } => e,
                other => TriageError::init("artifact", other.to_string()),
            }
        })?;
        Self::from_artifact(artifact, PipelineSettings::from(config))
    }

    /// Build the pipeline around an in-memory artifact
    pub fn from_artifact(artifact: ModelArtifact, settings: PipelineSettings) -> Result<Self> {
        artifact.validate()?;
        Ok(Self {
            artifact,
            ranker: Ranker::with_config(settings.ranking),
            advisor: RecommendationEngine::with_config(settings.advice),
        })
    }

    /// Rank candidate conditions and recommend next steps for `text`
    ///
    /// Blank text is rejected with `InvalidInput`. Any other failure is
    /// logged and turned into a degraded prediction.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TriageError::InvalidInput(
                "Please describe your symptoms".to_string(),
            ));
        }

        match self.run(text) {
            Ok(prediction) => Ok(prediction),
            Err(e) => {
                warn!(error = %e, "prediction failed, returning fallback advice");
                Ok(Prediction::degraded())
            }
        }
    }

    fn run(&self, text: &str) -> Result<Prediction> {
        let features = self.artifact.encoder.encode(text);
        let probs = self.artifact.estimator.predict(&features)?;
        self.log_top(text, &probs);

        let conditions = self.ranker.rank(&probs, &self.artifact.labels)?;
        let next_steps = self.advisor.recommend(&conditions);

        Ok(Prediction {
            conditions,
            next_steps,
            degraded: false,
        })
    }

    fn log_top(&self, text: &str, probs: &[f64]) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        debug!(input = text, "scored symptom text");
        for (label, probability) in top_candidates(probs, &self.artifact.labels) {
            debug!(label, probability, "candidate");
        }
    }

    /// Predict `sample` and fail if the pipeline had to fall back
    pub fn self_check(&self, sample: &str) -> Result<Prediction> {
        let prediction = self.predict(sample)?;
        if prediction.degraded {
            return Err(TriageError::Prediction(format!(
                "model returned fallback advice for '{}'",
                sample
            )));
        }
        Ok(prediction)
    }

    pub fn labels(&self) -> &[String] {
        &self.artifact.labels
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }
}

/// Highest-scoring (label, probability) pairs above the debug floor
fn top_candidates<'a>(probs: &[f64], labels: &'a [String]) -> Vec<(&'a str, f64)> {
    let mut pairs: Vec<(&str, f64)> = labels
        .iter()
        .map(String::as_str)
        .zip(probs.iter().copied())
        .filter(|&(_, p)| p > DEBUG_LOG_FLOOR)
        .collect();
    pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    pairs.truncate(DEBUG_LOG_TOP);
    pairs
}
