//! Multi-label estimator
//!
//! One logistic binary estimator per condition label ("one-vs-rest"). The
//! parameters are fixed at training time; this module only runs inference.

pub(crate) mod math;
pub mod model;

pub use model::{BinaryEstimator, MultiLabelEstimator, ProbabilityMap};
