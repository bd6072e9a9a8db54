//! Recommendation engine
//!
//! Maps ranked condition names to advisory next steps through a fixed,
//! ordered rule table plus baseline and escalation advice.

pub mod engine;
pub mod rules;

pub use engine::{AdviceConfig, RecommendationEngine, DEFAULT_ESCALATION_THRESHOLD};
pub use rules::{AdviceRule, CATEGORY_RULES};
