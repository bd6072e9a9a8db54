//! Pipeline facade
//!
//! Composes encoder, estimator, ranker and recommendation engine behind a
//! single `predict(text)` call and owns the loaded model artifact.

pub mod facade;
pub mod report;

pub use facade::{PipelineSettings, Prediction, SymptomChecker};
pub use report::PredictionReport;
