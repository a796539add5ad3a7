//! Error types for the screening pipeline

use std::fmt;

/// Errors that can occur while loading artifacts or assessing a patient
#[derive(Debug, Clone, PartialEq)]
pub enum ScreeningError {
    /// Model artifacts missing, corrupt, or incompatible with the feature schema.
    ///
    /// Fatal: the process cannot serve any assessment.
    StartupFailure(String),

    /// A patient field is outside its closed set or its clinical range
    InvalidInput {
        /// Name of the offending field
        field: String,
        /// What was wrong with it
        reason: String,
    },

    /// The classifier was invoked without loaded artifacts
    ModelUnavailable(String),

    /// Encoded vector length disagrees with an artifact's input dimension
    DimensionMismatch {
        /// Dimension the artifact was fitted on
        expected: usize,
        /// Dimension that was supplied
        actual: usize,
    },

    /// Numerical error (non-finite or out-of-range probability)
    NumericalError(String),
}

impl ScreeningError {
    /// Build an `InvalidInput` error for `field`
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ScreeningError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ScreeningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreeningError::StartupFailure(msg) => write!(f, "Startup failure: {}", msg),
            ScreeningError::InvalidInput { field, reason } => {
                write!(f, "Invalid input for '{}': {}", field, reason)
            }
            ScreeningError::ModelUnavailable(msg) => write!(f, "Model unavailable: {}", msg),
            ScreeningError::DimensionMismatch { expected, actual } => write!(
                f,
                "Dimension mismatch: model expects {} features, got {}",
                expected, actual
            ),
            ScreeningError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for ScreeningError {}
