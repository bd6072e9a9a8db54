use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::facade::{Prediction, SymptomChecker};
use crate::errors::Result;
use crate::ranking::ConditionEntry;

/// Caller-facing serialization of one prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub symptoms: String,
    pub conditions: Vec<ConditionEntry>,
    pub next_steps: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl PredictionReport {
    pub fn new(symptoms: &str, prediction: Prediction) -> Self {
        Self {
            symptoms: symptoms.trim().to_string(),
            conditions: prediction.conditions,
            next_steps: prediction.next_steps,
            timestamp: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl SymptomChecker {
    /// `predict` wrapped into a timestamped report
    pub fn report(&self, text: &str) -> Result<PredictionReport> {
        let prediction = self.predict(text)?;
        Ok(PredictionReport::new(text, prediction))
    }
}
