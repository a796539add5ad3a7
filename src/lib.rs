//! # Preventive Screening
//!
//! Diabetes risk screening for preventive care: a patient's vitals are
//! encoded into the fixed feature layout a classifier was trained on, scored
//! by pre-fitted scaler and classifier artifacts, bucketed into a risk tier,
//! and summarized in a short clinical note.
//!
//! Informational use only. It is not a diagnostic tool.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use preventive_screening::{assess_risk, ModelStore, PatientInput, RiskClassifier, ScreeningConfig};
//!
//! let config = ScreeningConfig::with_artifact_dir("artifacts");
//! let models = Arc::new(ModelStore::load(&config)?);
//! let classifier = RiskClassifier::new(models);
//!
//! let assessment = assess_risk(&PatientInput::default(), &classifier, &config)?;
//! println!("{:.2} ({})", assessment.probability, assessment.category);
//! println!("{}", assessment.clinical_note);
//! # Ok::<(), preventive_screening::ScreeningError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! PatientForm → PatientInput → FeatureVector → probability → RiskCategory
//!                    └──────────────────────────────┴──────→ clinical note
//! ```
//!
//! The [`ModelStore`] is loaded once at start-up and shared read-only;
//! everything else is created per assessment and dropped afterwards.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod input;
pub mod model;

// Re-export main types
pub use analysis::category::{categorize, RiskCategory};
pub use analysis::note::{generate_clinical_note, ClinicalIndicators};
pub use analysis::result::{RiskAssessment, DISCLAIMER};
pub use analysis::risk::RiskClassifier;
pub use config::{InputLimits, ScreeningConfig};
pub use error::ScreeningError;
pub use features::{encode_features, FeatureVector};
pub use input::{Gender, PatientForm, PatientInput, Race, SmokingHistory};
pub use model::ModelStore;

/// Main assessment function
///
/// Validates the patient, encodes the feature vector, scores it, and builds
/// the category and clinical note.
///
/// # Arguments
///
/// * `input` - Patient record
/// * `classifier` - Handle to the loaded artifacts
/// * `config` - Screening configuration (deployment year, input limits)
///
/// # Returns
///
/// `RiskAssessment` with probability, category, and note, all together
///
/// # Errors
///
/// - `InvalidInput` if a numeric field is outside `config.limits`
/// - `ModelUnavailable`, `DimensionMismatch`, or `NumericalError` from scoring
pub fn assess_risk(
    input: &PatientInput,
    classifier: &RiskClassifier,
    config: &ScreeningConfig,
) -> Result<RiskAssessment, ScreeningError> {
    log::debug!(
        "Assessing patient: age={}, bmi={:.1}, hba1c={:.1}, glucose={:.0}",
        input.age,
        input.bmi,
        input.hba1c,
        input.blood_glucose
    );

    input.validate(&config.limits).map_err(|e| {
        log::warn!("Rejected patient input: {}", e);
        e
    })?;

    let features = encode_features(input, config.deployment_year);
    let probability = classifier.predict(&features)?;
    let category = categorize(probability);
    let clinical_note = generate_clinical_note(&ClinicalIndicators::from(input), probability);

    log::debug!("Assessment complete: p={:.4}, category={}", probability, category);

    Ok(RiskAssessment {
        probability,
        category,
        clinical_note,
    })
}

/// Assess a raw form submission
///
/// Closed-set fields are validated before anything is encoded.
///
/// # Errors
///
/// `InvalidInput` naming the offending field, or any error from [`assess_risk`].
pub fn assess_form(
    form: &PatientForm,
    classifier: &RiskClassifier,
    config: &ScreeningConfig,
) -> Result<RiskAssessment, ScreeningError> {
    let input = form.validate(&config.limits).map_err(|e| {
        log::warn!("Rejected patient form: {}", e);
        e
    })?;
    assess_risk(&input, classifier, config)
}
