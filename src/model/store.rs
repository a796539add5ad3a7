//! Model store: the fitted scaler and classifier, loaded once at start-up

use super::{ClassifierArtifact, FeatureScaler, ProbabilisticClassifier, ScalerArtifact};
use crate::config::ScreeningConfig;
use crate::error::ScreeningError;
use crate::features::schema::{self, FEATURE_COUNT};
use std::fs;
use std::path::Path;

/// Read-only holder of the two fitted artifacts
///
/// Built once, then shared (typically behind an `Arc`) by every assessment.
/// Nothing mutates it after construction.
#[derive(Debug)]
pub struct ModelStore {
    scaler: Box<dyn FeatureScaler>,
    classifier: Box<dyn ProbabilisticClassifier>,
}

fn read_artifact(path: &Path, what: &str) -> Result<String, ScreeningError> {
    fs::read_to_string(path).map_err(|e| {
        ScreeningError::StartupFailure(format!(
            "cannot read {} artifact {}: {}",
            what,
            path.display(),
            e
        ))
    })
}

fn check_schema(what: &str, n_features: usize, names: Option<&[String]>) -> Result<(), ScreeningError> {
    if n_features != FEATURE_COUNT {
        return Err(ScreeningError::StartupFailure(format!(
            "{} was fitted on {} features, encoder produces {}",
            what, n_features, FEATURE_COUNT
        )));
    }
    if let Some(names) = names {
        if let Some(problem) = schema::schema_mismatch(names) {
            return Err(ScreeningError::StartupFailure(format!(
                "{} feature order disagrees with encoder: {}",
                what, problem
            )));
        }
    }
    Ok(())
}

impl ModelStore {
    /// Pair an in-memory scaler and classifier
    ///
    /// Only checks that the two agree with each other; use [`ModelStore::from_json`]
    /// or [`ModelStore::load`] to also check them against the feature schema.
    ///
    /// # Errors
    ///
    /// `StartupFailure` if the input dimensions differ.
    pub fn new(
        scaler: Box<dyn FeatureScaler>,
        classifier: Box<dyn ProbabilisticClassifier>,
    ) -> Result<Self, ScreeningError> {
        if scaler.n_features() != classifier.n_features() {
            return Err(ScreeningError::StartupFailure(format!(
                "scaler expects {} features but classifier expects {}",
                scaler.n_features(),
                classifier.n_features()
            )));
        }
        Ok(Self { scaler, classifier })
    }

    /// Build a store from the two JSON documents
    ///
    /// Both artifacts must match the encoder's 14-column schema, including
    /// column order when they record feature names.
    pub fn from_json(scaler_json: &str, model_json: &str) -> Result<Self, ScreeningError> {
        let scaler = ScalerArtifact::from_json(scaler_json)?.into_scaler()?;
        let classifier = ClassifierArtifact::from_json(model_json)?.into_classifier()?;

        check_schema("scaler", scaler.n_features(), scaler.feature_names())?;
        check_schema("classifier", classifier.n_features(), classifier.feature_names())?;

        Self::new(scaler, classifier)
    }

    /// Load both artifacts from the paths in `config`
    ///
    /// # Errors
    ///
    /// `StartupFailure` if either file is missing, unreadable, corrupt, or
    /// incompatible with the feature schema. Callers should treat this as
    /// fatal and refuse to serve assessments.
    pub fn load(config: &ScreeningConfig) -> Result<Self, ScreeningError> {
        log::info!(
            "Loading model artifacts: scaler={}, model={}",
            config.scaler_path.display(),
            config.model_path.display()
        );

        let scaler_json = read_artifact(&config.scaler_path, "scaler")?;
        let model_json = read_artifact(&config.model_path, "classifier")?;

        let store = Self::from_json(&scaler_json, &model_json).map_err(|e| {
            log::warn!("Rejected model artifacts: {}", e);
            e
        })?;

        log::info!("Model artifacts loaded ({} features)", store.n_features());
        Ok(store)
    }

    /// Input dimension shared by both artifacts
    pub fn n_features(&self) -> usize {
        self.scaler.n_features()
    }

    /// The fitted scaler
    pub fn scaler(&self) -> &dyn FeatureScaler {
        self.scaler.as_ref()
    }

    /// The fitted classifier
    pub fn classifier(&self) -> &dyn ProbabilisticClassifier {
        self.classifier.as_ref()
    }
}
