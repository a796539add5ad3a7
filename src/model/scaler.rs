//! Fitted feature scalers

use super::{check_dimension, check_finite, FeatureScaler};
use crate::error::ScreeningError;
use serde::{Deserialize, Serialize};

/// Standardization: `(x - mean) / scale`
///
/// A zero scale marks a constant training column and is treated as 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column training mean
    pub mean: Vec<f64>,
    /// Per-column training standard deviation
    pub scale: Vec<f64>,
    /// Column names at fit time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    /// Build and validate a standard scaler
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ScreeningError> {
        let scaler = Self {
            mean,
            scale,
            feature_names: None,
        };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Check parameter lengths and finiteness
    pub fn validate(&self) -> Result<(), ScreeningError> {
        if self.mean.is_empty() || self.mean.len() != self.scale.len() {
            return Err(ScreeningError::StartupFailure(format!(
                "standard scaler has {} means and {} scales",
                self.mean.len(),
                self.scale.len()
            )));
        }
        check_finite("scaler mean", &self.mean)?;
        check_finite("scaler scale", &self.scale)?;
        Ok(())
    }
}

impl FeatureScaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScreeningError> {
        check_dimension(self.n_features(), features)?;
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&x, (&mean, &scale))| {
                let scale = if scale == 0.0 { 1.0 } else { scale };
                (x - mean) / scale
            })
            .collect())
    }
}

/// Range scaling: `x * scale + min`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Per-column offset
    pub min: Vec<f64>,
    /// Per-column multiplier
    pub scale: Vec<f64>,
    /// Column names at fit time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl MinMaxScaler {
    /// Build and validate a min-max scaler
    pub fn new(min: Vec<f64>, scale: Vec<f64>) -> Result<Self, ScreeningError> {
        let scaler = Self {
            min,
            scale,
            feature_names: None,
        };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Check parameter lengths and finiteness
    pub fn validate(&self) -> Result<(), ScreeningError> {
        if self.min.is_empty() || self.min.len() != self.scale.len() {
            return Err(ScreeningError::StartupFailure(format!(
                "min-max scaler has {} offsets and {} multipliers",
                self.min.len(),
                self.scale.len()
            )));
        }
        check_finite("scaler min", &self.min)?;
        check_finite("scaler scale", &self.scale)?;
        Ok(())
    }
}

impl FeatureScaler for MinMaxScaler {
    fn n_features(&self) -> usize {
        self.min.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScreeningError> {
        check_dimension(self.n_features(), features)?;
        Ok(features
            .iter()
            .zip(self.min.iter().zip(&self.scale))
            .map(|(&x, (&min, &scale))| x * scale + min)
            .collect())
    }
}

/// On-disk scaler document, tagged by `kind`
///
/// ```json
/// { "kind": "standard", "mean": [...], "scale": [...] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    /// Standardization
    Standard(StandardScaler),
    /// Range scaling
    MinMax(MinMaxScaler),
}

impl ScalerArtifact {
    /// Parse a scaler document
    pub fn from_json(json: &str) -> Result<Self, ScreeningError> {
        serde_json::from_str(json)
            .map_err(|e| ScreeningError::StartupFailure(format!("unreadable scaler artifact: {}", e)))
    }

    /// Validate and turn into a capability object
    pub fn into_scaler(self) -> Result<Box<dyn FeatureScaler>, ScreeningError> {
        match self {
            ScalerArtifact::Standard(s) => {
                s.validate()?;
                Ok(Box::new(s))
            }
            ScalerArtifact::MinMax(s) => {
                s.validate()?;
                Ok(Box::new(s))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_transform() {
        let scaler = StandardScaler::new(vec![10.0, 0.0, 5.0], vec![2.0, 0.0, 0.5]).unwrap();
        let out = scaler.transform(&[14.0, 3.0, 4.0]).unwrap();
        assert_eq!(out, vec![2.0, 3.0, -2.0], "zero scale must pass through centered value");
    }

    #[test]
    fn test_min_max_transform() {
        let scaler = MinMaxScaler::new(vec![-1.0, 0.0], vec![0.5, 2.0]).unwrap();
        assert_eq!(scaler.transform(&[4.0, 1.5]).unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_transform_rejects_wrong_dimension() {
        let scaler = StandardScaler::new(vec![0.0; 3], vec![1.0; 3]).unwrap();
        assert_eq!(
            scaler.transform(&[1.0, 2.0]),
            Err(ScreeningError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(StandardScaler::new(vec![0.0; 3], vec![1.0; 2]).is_err());
        assert!(StandardScaler::new(vec![], vec![]).is_err());
        assert!(MinMaxScaler::new(vec![f64::NAN], vec![1.0]).is_err());
    }

    #[test]
    fn test_artifact_parsing() {
        let json = r#"{"kind": "min_max", "min": [0.0, 1.0], "scale": [1.0, 1.0]}"#;
        let scaler = ScalerArtifact::from_json(json).unwrap().into_scaler().unwrap();
        assert_eq!(scaler.n_features(), 2);
        assert!(scaler.feature_names().is_none());

        let bad_kind = r#"{"kind": "robust", "center": [0.0]}"#;
        match ScalerArtifact::from_json(bad_kind) {
            Err(ScreeningError::StartupFailure(_)) => {}
            other => panic!("expected StartupFailure, got {:?}", other),
        }

        let inconsistent = r#"{"kind": "standard", "mean": [0.0, 1.0], "scale": [1.0]}"#;
        assert!(ScalerArtifact::from_json(inconsistent)
            .unwrap()
            .into_scaler()
            .is_err());
    }
}
