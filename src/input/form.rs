//! Raw form submission as a front end produces it

use super::patient::{check_range, Gender, PatientInput, Race, SmokingHistory};
use crate::config::InputLimits;
use crate::error::ScreeningError;
use serde::{Deserialize, Serialize};

/// Unvalidated patient form
///
/// Enum fields arrive as labels and history flags as 0/1 integers, matching
/// the screening form's widgets. Convert with [`PatientForm::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientForm {
    /// Age in years
    pub age: f64,
    /// BMI
    pub bmi: f64,
    /// HbA1c level
    #[serde(alias = "hbA1c", alias = "hbA1c_level")]
    pub hba1c: f64,
    /// Blood glucose level
    #[serde(alias = "glucose", alias = "blood_glucose_level")]
    pub blood_glucose: f64,
    /// Hypertension history (0 or 1)
    pub hypertension: i64,
    /// Heart disease history (0 or 1)
    pub heart_disease: i64,
    /// "Female" or "Male"
    pub gender: String,
    /// "Never", "Former / Ever" or "Current"
    #[serde(alias = "smoking")]
    pub smoking_history: String,
    /// One of the five race labels
    pub race: String,
}

impl Default for PatientForm {
    fn default() -> Self {
        let input = PatientInput::default();
        Self {
            age: f64::from(input.age),
            bmi: input.bmi,
            hba1c: input.hba1c,
            blood_glucose: input.blood_glucose,
            hypertension: 0,
            heart_disease: 0,
            gender: input.gender.label().to_string(),
            smoking_history: input.smoking_history.label().to_string(),
            race: input.race.label().to_string(),
        }
    }
}

fn parse_flag(field: &str, value: i64) -> Result<bool, ScreeningError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(ScreeningError::invalid_input(
            field,
            format!("{} must be 0 or 1", other),
        )),
    }
}

impl PatientForm {
    /// Validate the form into a typed [`PatientInput`]
    ///
    /// Closed-set fields are checked first, then flags, then numeric ranges.
    ///
    /// # Errors
    ///
    /// `ScreeningError::InvalidInput` naming the first offending field.
    pub fn validate(&self, limits: &InputLimits) -> Result<PatientInput, ScreeningError> {
        let gender: Gender = self.gender.parse()?;
        let smoking_history: SmokingHistory = self.smoking_history.parse()?;
        let race: Race = self.race.parse()?;

        let hypertension = parse_flag("hypertension", self.hypertension)?;
        let heart_disease = parse_flag("heart_disease", self.heart_disease)?;

        let (age_min, age_max) = limits.age;
        check_range("age", self.age, (f64::from(age_min), f64::from(age_max)))?;
        if self.age.fract() != 0.0 {
            return Err(ScreeningError::invalid_input(
                "age",
                format!("{} is not a whole number of years", self.age),
            ));
        }

        let input = PatientInput {
            age: self.age as u32,
            bmi: self.bmi,
            hba1c: self.hba1c,
            blood_glucose: self.blood_glucose,
            hypertension,
            heart_disease,
            gender,
            smoking_history,
            race,
        };
        input.validate(limits)?;
        Ok(input)
    }
}
