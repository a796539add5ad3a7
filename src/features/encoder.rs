//! Feature encoding
//!
//! Maps a validated [`PatientInput`] onto the fixed model input layout:
//!
//! | column              | encoding                                  |
//! |---------------------|-------------------------------------------|
//! | year                | deployment year constant                  |
//! | gender              | Female = 0, Male = 1                      |
//! | age, bmi, hbA1c, …  | copied verbatim                           |
//! | race:*              | one-hot over the five categories          |
//! | hypertension, heart | 0 / 1                                     |
//! | smoking_history     | ordinal: Never = 0, Former/Ever = 1, Current = 2 |
//!
//! The smoking ordinal is the training-time encoding, not a clinical scale.
//! It must stay in lockstep with the fitted artifacts.

use super::schema::{self, FEATURE_COUNT, FEATURE_NAMES};
use crate::input::{Gender, PatientInput, Race, SmokingHistory};
use serde::{Deserialize, Serialize};

/// Encoded model input, one value per schema column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// All-zero vector
    pub fn zeros() -> Self {
        Self([0.0; FEATURE_COUNT])
    }

    /// Wrap raw column values that are already in schema order
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Column values in schema order
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of columns (always [`FEATURE_COUNT`])
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Value of the named column
    pub fn get(&self, name: &str) -> Option<f64> {
        schema::column_index(name).map(|i| self.0[i])
    }

    /// (name, value) pairs in schema order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

/// Numeric encoding of gender
pub fn encode_gender(gender: Gender) -> f64 {
    match gender {
        Gender::Female => 0.0,
        Gender::Male => 1.0,
    }
}

/// Ordinal encoding of smoking history
pub fn encode_smoking(smoking: SmokingHistory) -> f64 {
    match smoking {
        SmokingHistory::Never => 0.0,
        SmokingHistory::FormerOrEver => 1.0,
        SmokingHistory::Current => 2.0,
    }
}

/// Schema column holding the one-hot bit for `race`
pub fn race_column(race: Race) -> usize {
    let offset = match race {
        Race::AfricanAmerican => 0,
        Race::Asian => 1,
        Race::Caucasian => 2,
        Race::Hispanic => 3,
        Race::Other => 4,
    };
    schema::RACE_START + offset
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Encode a patient into the model input layout
///
/// # Arguments
///
/// * `input` - Validated patient record
/// * `year` - Deployment year written into the `year` column
///
/// # Returns
///
/// `FeatureVector` with exactly one race column set
///
/// # Example
///
/// ```
/// use preventive_screening::features::encode_features;
/// use preventive_screening::PatientInput;
///
/// let vector = encode_features(&PatientInput::default(), 2024);
/// assert_eq!(vector.get("year"), Some(2024.0));
/// assert_eq!(vector.get("race:AfricanAmerican"), Some(1.0));
/// ```
pub fn encode_features(input: &PatientInput, year: u32) -> FeatureVector {
    let mut values = [0.0; FEATURE_COUNT];

    values[schema::YEAR] = f64::from(year);
    values[schema::GENDER] = encode_gender(input.gender);
    values[schema::AGE] = f64::from(input.age);
    values[race_column(input.race)] = 1.0;
    values[schema::HYPERTENSION] = flag(input.hypertension);
    values[schema::HEART_DISEASE] = flag(input.heart_disease);
    values[schema::SMOKING_HISTORY] = encode_smoking(input.smoking_history);
    values[schema::BMI] = input.bmi;
    values[schema::HBA1C] = input.hba1c;
    values[schema::BLOOD_GLUCOSE] = input.blood_glucose;

    log::debug!(
        "Encoded patient: gender={}, race={}, smoking={}",
        input.gender,
        input.race,
        input.smoking_history
    );

    FeatureVector(values)
}
