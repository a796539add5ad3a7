//! Risk classification: scaler, then classifier

use crate::error::ScreeningError;
use crate::features::FeatureVector;
use crate::model::ModelStore;
use std::sync::Arc;

/// Handle used by the pipeline to score encoded vectors
///
/// Cloning is cheap; clones share the same artifacts.
#[derive(Debug, Clone)]
pub struct RiskClassifier {
    models: Result<Arc<ModelStore>, String>,
}

impl RiskClassifier {
    /// Wrap a loaded model store
    pub fn new(models: Arc<ModelStore>) -> Self {
        Self { models: Ok(models) }
    }

    /// A handle whose artifacts failed to load
    ///
    /// For front ends that stay up to report the start-up failure; every
    /// prediction fails with `ModelUnavailable`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            models: Err(reason.into()),
        }
    }

    /// Whether artifacts are loaded
    pub fn is_available(&self) -> bool {
        self.models.is_ok()
    }

    /// Probability of the positive (has condition) class
    ///
    /// # Errors
    ///
    /// - `ModelUnavailable` if the artifacts never loaded
    /// - `DimensionMismatch` if the vector does not fit either artifact
    /// - `NumericalError` if the classifier output is not a probability
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, ScreeningError> {
        self.predict_slice(features.as_slice())
    }

    /// [`RiskClassifier::predict`] on raw column values
    pub fn predict_slice(&self, features: &[f64]) -> Result<f64, ScreeningError> {
        let models = self
            .models
            .as_ref()
            .map_err(|reason| ScreeningError::ModelUnavailable(reason.clone()))?;

        for expected in [models.scaler().n_features(), models.classifier().n_features()] {
            if features.len() != expected {
                log::warn!(
                    "Encoded vector has {} columns, artifacts expect {}",
                    features.len(),
                    expected
                );
                return Err(ScreeningError::DimensionMismatch {
                    expected,
                    actual: features.len(),
                });
            }
        }

        let scaled = models.scaler().transform(features)?;
        let [_, positive] = models.classifier().predict_proba(&scaled)?;

        if !positive.is_finite() || !(0.0..=1.0).contains(&positive) {
            return Err(ScreeningError::NumericalError(format!(
                "classifier returned {} for the positive class",
                positive
            )));
        }

        log::debug!("Positive-class probability: {:.4}", positive);
        Ok(positive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeatureScaler, LogisticRegression, ProbabilisticClassifier, StandardScaler};

    fn store(n: usize) -> Arc<ModelStore> {
        let scaler = StandardScaler::new(vec![1.0; n], vec![2.0; n]).unwrap();
        let classifier = LogisticRegression::new(vec![0.5; n], -0.25).unwrap();
        Arc::new(ModelStore::new(Box::new(scaler), Box::new(classifier)).unwrap())
    }

    #[test]
    fn test_predict_is_deterministic() {
        let classifier = RiskClassifier::new(store(14));
        let vector = FeatureVector::from_array([3.0; 14]);

        let first = classifier.predict(&vector).unwrap();
        for _ in 0..10 {
            assert_eq!(classifier.predict(&vector).unwrap().to_bits(), first.to_bits());
        }
        assert!((0.0..=1.0).contains(&first));
    }

    #[test]
    fn test_scaler_applied_before_classifier() {
        // scaled = (3 - 1) / 2 = 1 per column, z = 3 * 0.5 - 0.25 = 1.25
        let classifier = RiskClassifier::new(store(3));
        let p = classifier.predict_slice(&[3.0, 3.0, 3.0]).unwrap();
        let expected = 1.0 / (1.0 + (-1.25f64).exp());
        assert!((p - expected).abs() < 1e-12, "got {}, expected {}", p, expected);
    }

    #[test]
    fn test_dimension_mismatch() {
        let classifier = RiskClassifier::new(store(13));
        let vector = FeatureVector::zeros();
        assert_eq!(
            classifier.predict(&vector),
            Err(ScreeningError::DimensionMismatch {
                expected: 13,
                actual: 14
            })
        );
    }

    #[test]
    fn test_unavailable_models() {
        let classifier = RiskClassifier::unavailable("scaler.json missing");
        assert!(!classifier.is_available());
        match classifier.predict(&FeatureVector::zeros()) {
            Err(ScreeningError::ModelUnavailable(reason)) => assert!(reason.contains("scaler.json")),
            other => panic!("expected ModelUnavailable, got {:?}", other),
        }
    }

    #[derive(Debug)]
    struct Identity;

    impl FeatureScaler for Identity {
        fn n_features(&self) -> usize {
            1
        }
        fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScreeningError> {
            Ok(features.to_vec())
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl ProbabilisticClassifier for Broken {
        fn n_features(&self) -> usize {
            1
        }
        fn predict_proba(&self, _features: &[f64]) -> Result<[f64; 2], ScreeningError> {
            Ok([f64::NAN, f64::NAN])
        }
    }

    #[test]
    fn test_non_finite_output_is_rejected() {
        let models = ModelStore::new(Box::new(Identity), Box::new(Broken)).unwrap();
        let classifier = RiskClassifier::new(Arc::new(models));
        match classifier.predict_slice(&[0.0]) {
            Err(ScreeningError::NumericalError(_)) => {}
            other => panic!("expected NumericalError, got {:?}", other),
        }
    }

    #[test]
    fn test_unvalidated_forest_errors_instead_of_panicking() {
        use crate::model::{DecisionTree, TreeEnsemble, TreeNode};

        let forest = TreeEnsemble {
            n_features: 14,
            trees: vec![DecisionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 40,
                        threshold: 0.0,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf { value: [1.0, 0.0] },
                    TreeNode::Leaf { value: [0.0, 1.0] },
                ],
            }],
            feature_names: None,
        };
        let scaler = StandardScaler::new(vec![0.0; 14], vec![1.0; 14]).unwrap();
        let models = ModelStore::new(Box::new(scaler), Box::new(forest)).unwrap();
        let classifier = RiskClassifier::new(Arc::new(models));

        match classifier.predict_slice(&[0.0; 14]) {
            Err(ScreeningError::NumericalError(_)) => {}
            other => panic!("expected NumericalError, got {:?}", other),
        }
    }
}
