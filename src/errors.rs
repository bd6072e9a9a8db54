//! Error types for symptomcheck
//!
//! Initialization failures are fatal for the process; per-request failures
//! are recovered by the pipeline facade into a degraded result.

use thiserror::Error;

/// Main error type for the symptom triage pipeline
#[derive(Error, Debug)]
pub enum TriageError {
    /// Model artifact missing, corrupt or dimensionally inconsistent
    #[error("Model initialization failed ({component}): {reason}")]
    Initialization { component: String, reason: String },

    /// Vector or parameter lengths disagree
    #[error("Dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        got: usize,
    },

    /// Blank or otherwise unusable symptom text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected failure during a single prediction pass
    #[error("Prediction failed: {0}")]
    Prediction(String),

    /// Training corpus or optimizer errors
    #[error("Training failed: {0}")]
    Training(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, TriageError>;

impl TriageError {
    /// Build an initialization error for a named artifact component
    pub fn init(component: impl Into<String>, reason: impl Into<String>) -> Self {
        TriageError::Initialization {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// True for errors that make the facade unusable
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TriageError::Initialization { .. } | TriageError::DimensionMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization_error_display() {
        let err = TriageError::init("classifier.json", "file not found");
        assert!(err.to_string().contains("classifier.json"));
        assert!(err.to_string().contains("file not found"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = TriageError::DimensionMismatch {
            context: "estimator input".to_string(),
            expected: 42,
            got: 7,
        };
        assert!(err.to_string().contains("42"));
        assert!(err.to_string().contains("7"));
    }

    #[test]
    fn test_invalid_input_is_recoverable() {
        let err = TriageError::InvalidInput("blank".to_string());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_io_and_json_errors_convert_with_question_mark() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/symptomcheck/labels.json")?)
        }
        fn parse_bad() -> Result<Vec<String>> {
            Ok(serde_json::from_str("{ not json")?)
        }

        assert!(matches!(read_missing(), Err(TriageError::IoError(_))));
        assert!(matches!(parse_bad(), Err(TriageError::SerializationError(_))));
    }
}
