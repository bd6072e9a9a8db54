use serde::{Deserialize, Serialize};
use tracing::trace;

use super::rules::{
    AdviceRule, BASELINE_ADVICE, CATEGORY_RULES, CONSULT_PROFESSIONAL, SCHEDULE_APPOINTMENT,
};
use crate::ranking::ConditionEntry;

/// Probability above which a doctor's appointment is suggested
pub const DEFAULT_ESCALATION_THRESHOLD: f64 = 0.3;

/// Recommendation engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    pub escalation_threshold: f64,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            escalation_threshold: DEFAULT_ESCALATION_THRESHOLD,
        }
    }
}

/// Rule-based next-step recommendations for a ranked condition list
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    rules: &'static [AdviceRule],
    escalation_threshold: f64,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::with_config(AdviceConfig::default())
    }

    pub fn with_config(config: AdviceConfig) -> Self {
        Self {
            rules: CATEGORY_RULES,
            escalation_threshold: config.escalation_threshold,
        }
    }

    /// Next steps for the given conditions
    ///
    /// Baseline advice comes first; each firing rule appends its block
    /// once, in table order; the escalation note, when present, is last.
    pub fn recommend(&self, conditions: &[ConditionEntry]) -> Vec<String> {
        let mut steps: Vec<String> = BASELINE_ADVICE.iter().map(|s| s.to_string()).collect();

        if conditions.is_empty() {
            steps.push(CONSULT_PROFESSIONAL.to_string());
            return steps;
        }

        let names: Vec<String> = conditions.iter().map(|c| c.name.to_lowercase()).collect();

        for rule in self.rules {
            if rule.matches(names.as_slice()) {
                trace!(category = rule.category, "advice rule fired");
                steps.extend(rule.advice.iter().map(|s| s.to_string()));
            }
        }

        if conditions
            .iter()
            .any(|c| c.probability > self.escalation_threshold)
        {
            steps.push(SCHEDULE_APPOINTMENT.to_string());
        }

        steps
    }

    pub fn escalation_threshold(&self) -> f64 {
        self.escalation_threshold
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}
