//! symptomcheck - free-text symptoms to ranked conditions and next steps
//!
//! # Architecture
//!
//! - **encoder**: TF-IDF text encoding against a fitted vocabulary
//! - **estimator**: one-vs-rest logistic estimators
//! - **ranking**: threshold, fallback and truncation of label probabilities
//! - **advice**: rule table mapping conditions to next steps
//! - **pipeline**: the `SymptomChecker` facade tying the stages together
//! - **artifact** / **training**: persisted model and the trainer producing it

pub mod errors;
pub mod encoder;
pub mod estimator;
pub mod ranking;
pub mod advice;
pub mod artifact;
pub mod training;
pub mod pipeline;

// Re-export commonly used types
pub use errors::{Result, TriageError};
pub use pipeline::{Prediction, PredictionReport, SymptomChecker};
pub use ranking::ConditionEntry;

// Interface layer
pub mod cli;
pub mod config;
pub mod display;
pub mod logging;
pub mod repl;

pub use config::Config;
