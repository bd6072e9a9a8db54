// Ranker/selector for per-condition probabilities
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TriageError};

/// Probability a condition must exceed to be reported
pub const DEFAULT_THRESHOLD: f64 = 0.02;
/// Lower floor used when nothing clears the threshold
pub const DEFAULT_FALLBACK_FLOOR: f64 = 0.01;
/// Maximum number of conditions returned
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Ranking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Keep entries strictly above this probability
    pub threshold: f64,
    /// Fallback entry must be strictly above this probability
    pub fallback_floor: f64,
    /// Cap on the result length
    pub max_results: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fallback_floor: DEFAULT_FALLBACK_FLOOR,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Candidate condition with its estimated probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionEntry {
    pub name: String,
    pub probability: f64,
}

/// Filters and orders probabilities into a bounded condition list
#[derive(Debug, Clone)]
pub struct Ranker {
    config: RankConfig,
}

impl Ranker {
    /// Create new ranker with default config
    pub fn new() -> Self {
        Self {
            config: RankConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(config: RankConfig) -> Self {
        Self { config }
    }

    /// Rank probabilities against their labels
    ///
    /// The result is sorted by probability descending (ties keep label
    /// order) and holds at most `max_results` entries.
    pub fn rank(&self, probs: &[f64], labels: &[String]) -> Result<Vec<ConditionEntry>> {
        if probs.len() != labels.len() {
            return Err(TriageError::DimensionMismatch {
                context: "probabilities vs labels".to_string(),
                expected: labels.len(),
                got: probs.len(),
            });
        }

        let mut ranked: Vec<ConditionEntry> = probs
            .iter()
            .zip(labels)
            .filter(|(p, _)| **p > self.config.threshold)
            .map(|(p, name)| ConditionEntry {
                name: name.clone(),
                probability: *p,
            })
            .collect();

        // sort_by is stable, so equal probabilities stay in label order
        ranked.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if ranked.is_empty() {
            if let Some(best) = self.best_above_floor(probs, labels) {
                ranked.push(best);
            }
        }

        ranked.truncate(self.config.max_results);
        Ok(ranked)
    }

    /// Highest-probability label, first in label order on ties
    fn best_above_floor(&self, probs: &[f64], labels: &[String]) -> Option<ConditionEntry> {
        let (idx, &p) = probs
            .iter()
            .enumerate()
            .fold(None::<(usize, &f64)>, |best, (i, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((i, p)),
            })?;

        if p > self.config.fallback_floor {
            Some(ConditionEntry {
                name: labels[idx].clone(),
                probability: p,
            })
        } else {
            None
        }
    }

    /// Get current configuration
    pub fn config(&self) -> &RankConfig {
        &self.config
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}
