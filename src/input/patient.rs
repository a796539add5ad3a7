//! Validated patient record and its closed enumerations

use crate::config::InputLimits;
use crate::error::ScreeningError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalize a form label for matching: surrounding whitespace dropped, lowercase
fn normalize_label(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Patient gender as recorded in the training data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Female (encoded 0)
    Female,
    /// Male (encoded 1)
    Male,
}

impl Gender {
    /// All accepted values, in form order
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    /// Form label
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

impl FromStr for Gender {
    type Err = ScreeningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "female" => Ok(Gender::Female),
            "male" => Ok(Gender::Male),
            _ => Err(ScreeningError::invalid_input(
                "gender",
                format!("'{}' is not one of Female, Male", s),
            )),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Smoking history category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmokingHistory {
    /// Never smoked
    Never,
    /// Former smoker, or smoked at some point
    FormerOrEver,
    /// Current smoker
    Current,
}

impl SmokingHistory {
    /// All accepted values, in form order
    pub const ALL: [SmokingHistory; 3] = [
        SmokingHistory::Never,
        SmokingHistory::FormerOrEver,
        SmokingHistory::Current,
    ];

    /// Form label
    pub fn label(&self) -> &'static str {
        match self {
            SmokingHistory::Never => "Never",
            SmokingHistory::FormerOrEver => "Former / Ever",
            SmokingHistory::Current => "Current",
        }
    }
}

impl FromStr for SmokingHistory {
    type Err = ScreeningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "never" => Ok(SmokingHistory::Never),
            "former / ever" | "former/ever" | "former" | "ever" => Ok(SmokingHistory::FormerOrEver),
            "current" => Ok(SmokingHistory::Current),
            _ => Err(ScreeningError::invalid_input(
                "smoking_history",
                format!("'{}' is not one of Never, Former / Ever, Current", s),
            )),
        }
    }
}

impl fmt::Display for SmokingHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Race category (closed set of five, one-hot encoded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    /// African American
    AfricanAmerican,
    /// Asian
    Asian,
    /// Caucasian
    Caucasian,
    /// Hispanic
    Hispanic,
    /// Any other race
    Other,
}

impl Race {
    /// All accepted values, in one-hot column order
    pub const ALL: [Race; 5] = [
        Race::AfricanAmerican,
        Race::Asian,
        Race::Caucasian,
        Race::Hispanic,
        Race::Other,
    ];

    /// Form label (also the suffix of the `race:` feature column)
    pub fn label(&self) -> &'static str {
        match self {
            Race::AfricanAmerican => "AfricanAmerican",
            Race::Asian => "Asian",
            Race::Caucasian => "Caucasian",
            Race::Hispanic => "Hispanic",
            Race::Other => "Other",
        }
    }
}

impl FromStr for Race {
    type Err = ScreeningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "africanamerican" | "african american" => Ok(Race::AfricanAmerican),
            "asian" => Ok(Race::Asian),
            "caucasian" => Ok(Race::Caucasian),
            "hispanic" => Ok(Race::Hispanic),
            "other" => Ok(Race::Other),
            _ => Err(ScreeningError::invalid_input(
                "race",
                format!(
                    "'{}' is not one of AfricanAmerican, Asian, Caucasian, Hispanic, Other",
                    s
                ),
            )),
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated patient vitals and history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    /// Age in whole years
    pub age: u32,

    /// Body mass index in kg/m²
    pub bmi: f64,

    /// Glycated hemoglobin in %
    pub hba1c: f64,

    /// Blood glucose in mg/dL
    pub blood_glucose: f64,

    /// Diagnosed hypertension
    pub hypertension: bool,

    /// Diagnosed heart disease
    pub heart_disease: bool,

    /// Gender
    pub gender: Gender,

    /// Smoking history
    pub smoking_history: SmokingHistory,

    /// Race
    pub race: Race,
}

impl Default for PatientInput {
    /// The screening form's initial values
    fn default() -> Self {
        Self {
            age: 40,
            bmi: 27.0,
            hba1c: 5.8,
            blood_glucose: 140.0,
            hypertension: false,
            heart_disease: false,
            gender: Gender::Female,
            smoking_history: SmokingHistory::Never,
            race: Race::AfricanAmerican,
        }
    }
}

/// Check that `value` is finite and lies within the inclusive range
pub(crate) fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<(), ScreeningError> {
    if !value.is_finite() {
        return Err(ScreeningError::invalid_input(field, "value is not a finite number"));
    }
    if value < min || value > max {
        return Err(ScreeningError::invalid_input(
            field,
            format!("{} is outside the accepted range [{}, {}]", value, min, max),
        ));
    }
    Ok(())
}

impl PatientInput {
    /// Check every numeric field against `limits`
    ///
    /// Enum fields are valid by construction; this only guards the numeric
    /// ranges for records built directly rather than through a form.
    ///
    /// # Errors
    ///
    /// `ScreeningError::InvalidInput` naming the first field out of range.
    pub fn validate(&self, limits: &InputLimits) -> Result<(), ScreeningError> {
        let (age_min, age_max) = limits.age;
        if self.age < age_min || self.age > age_max {
            return Err(ScreeningError::invalid_input(
                "age",
                format!(
                    "{} is outside the accepted range [{}, {}]",
                    self.age, age_min, age_max
                ),
            ));
        }
        check_range("bmi", self.bmi, limits.bmi)?;
        check_range("hba1c", self.hba1c, limits.hba1c)?;
        check_range("blood_glucose", self.blood_glucose, limits.blood_glucose)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parsing() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" female ".parse::<Gender>().unwrap(), Gender::Female);

        let err = "Other".parse::<Gender>().unwrap_err();
        match err {
            ScreeningError::InvalidInput { field, .. } => assert_eq!(field, "gender"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_smoking_labels() {
        assert_eq!(
            "Former / Ever".parse::<SmokingHistory>().unwrap(),
            SmokingHistory::FormerOrEver
        );
        assert_eq!("ever".parse::<SmokingHistory>().unwrap(), SmokingHistory::FormerOrEver);
        assert_eq!("Current".parse::<SmokingHistory>().unwrap(), SmokingHistory::Current);
        assert!("sometimes".parse::<SmokingHistory>().is_err());
        assert!("".parse::<SmokingHistory>().is_err());
    }

    #[test]
    fn test_interior_garbage_is_rejected() {
        assert!("M a-l_e".parse::<Gender>().is_err());
        assert!("Fe male".parse::<Gender>().is_err());
        assert!("Asi/an".parse::<Race>().is_err());
        assert!("Cau-casian".parse::<Race>().is_err());
        assert!("Nev er".parse::<SmokingHistory>().is_err());
        assert!("formerever".parse::<SmokingHistory>().is_err());

        match "Asi/an".parse::<Race>() {
            Err(ScreeningError::InvalidInput { field, .. }) => assert_eq!(field, "race"),
            other => panic!("expected InvalidInput for race, got {:?}", other),
        }
    }

    #[test]
    fn test_race_labels_roundtrip() {
        for race in Race::ALL {
            assert_eq!(race.label().parse::<Race>().unwrap(), race);
        }
        assert!("Martian".parse::<Race>().is_err());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(PatientInput::default().validate(&InputLimits::default()).is_ok());
    }

    #[test]
    fn test_range_validation() {
        let limits = InputLimits::default();

        let young = PatientInput {
            age: 4,
            ..PatientInput::default()
        };
        assert!(young.validate(&limits).is_err());

        let boundary = PatientInput {
            age: 90,
            bmi: 50.0,
            hba1c: 4.0,
            blood_glucose: 300.0,
            ..PatientInput::default()
        };
        assert!(boundary.validate(&limits).is_ok(), "range ends are inclusive");

        let nan_bmi = PatientInput {
            bmi: f64::NAN,
            ..PatientInput::default()
        };
        match nan_bmi.validate(&limits) {
            Err(ScreeningError::InvalidInput { field, .. }) => assert_eq!(field, "bmi"),
            other => panic!("expected bmi rejection, got {:?}", other),
        }
    }
}
