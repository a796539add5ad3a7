//! Pre-fitted model artifacts
//!
//! The scaler and classifier are fitted elsewhere and treated as opaque
//! capabilities. This crate only relies on their calling contract:
//! fixed input dimension, deterministic output, probabilities in [0, 1].

pub mod classifier;
pub mod scaler;
pub mod store;

pub use classifier::{ClassifierArtifact, DecisionTree, LogisticRegression, TreeEnsemble, TreeNode};
pub use scaler::{MinMaxScaler, ScalerArtifact, StandardScaler};
pub use store::ModelStore;

use crate::error::ScreeningError;
use std::fmt::Debug;

/// A fitted column-wise transform applied before classification
pub trait FeatureScaler: Debug + Send + Sync {
    /// Input dimension the scaler was fitted on
    fn n_features(&self) -> usize;

    /// Column names recorded at fit time, if the artifact carries them
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Transform one row
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `features.len() != self.n_features()`.
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScreeningError>;
}

/// A fitted binary classifier producing class probabilities
pub trait ProbabilisticClassifier: Debug + Send + Sync {
    /// Input dimension the classifier was fitted on
    fn n_features(&self) -> usize;

    /// Column names recorded at fit time, if the artifact carries them
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Class probabilities `[negative, positive]` for one scaled row
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `features.len() != self.n_features()`.
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ScreeningError>;
}

/// Reject a row whose length differs from the fitted dimension
pub(crate) fn check_dimension(expected: usize, features: &[f64]) -> Result<(), ScreeningError> {
    if features.len() != expected {
        return Err(ScreeningError::DimensionMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

/// Reject non-finite artifact parameters
pub(crate) fn check_finite(what: &str, values: &[f64]) -> Result<(), ScreeningError> {
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(ScreeningError::StartupFailure(format!(
            "{} contains a non-finite value at index {}",
            what, i
        )));
    }
    Ok(())
}
