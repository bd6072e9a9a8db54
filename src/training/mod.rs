//! Offline training
//!
//! Produces a `ModelArtifact` from a labelled symptom corpus. Inference
//! never calls into this module.

pub mod corpus;
pub mod trainer;

pub use corpus::{Corpus, TrainingExample};
pub use trainer::{Trainer, TrainingConfig};
