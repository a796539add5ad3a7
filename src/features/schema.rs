//! Column layout of the model's input vector
//!
//! The fitted scaler and classifier consume columns positionally. Any change
//! to this order silently corrupts every prediction, so artifacts that carry
//! their own column names are checked against [`FEATURE_NAMES`] at load time.

/// Number of model input columns
pub const FEATURE_COUNT: usize = 14;

/// Column names in training order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "year",
    "gender",
    "age",
    "race:AfricanAmerican",
    "race:Asian",
    "race:Caucasian",
    "race:Hispanic",
    "race:Other",
    "hypertension",
    "heart_disease",
    "smoking_history",
    "bmi",
    "hbA1c_level",
    "blood_glucose_level",
];

/// Column index of `year`
pub const YEAR: usize = 0;
/// Column index of `gender`
pub const GENDER: usize = 1;
/// Column index of `age`
pub const AGE: usize = 2;
/// First of the five race one-hot columns
pub const RACE_START: usize = 3;
/// Number of race one-hot columns
pub const RACE_COUNT: usize = 5;
/// Column index of `hypertension`
pub const HYPERTENSION: usize = 8;
/// Column index of `heart_disease`
pub const HEART_DISEASE: usize = 9;
/// Column index of `smoking_history`
pub const SMOKING_HISTORY: usize = 10;
/// Column index of `bmi`
pub const BMI: usize = 11;
/// Column index of `hbA1c_level`
pub const HBA1C: usize = 12;
/// Column index of `blood_glucose_level`
pub const BLOOD_GLUCOSE: usize = 13;

/// Position of `name` in the schema, if present
pub fn column_index(name: &str) -> Option<usize> {
    FEATURE_NAMES.iter().position(|&n| n == name)
}

/// Check an artifact's column names against the schema
///
/// Returns a description of the first disagreement, if any.
pub fn schema_mismatch(names: &[String]) -> Option<String> {
    if names.len() != FEATURE_COUNT {
        return Some(format!(
            "artifact lists {} feature names, schema has {}",
            names.len(),
            FEATURE_COUNT
        ));
    }
    for (i, (&expected, actual)) in FEATURE_NAMES.iter().zip(names).enumerate() {
        if expected != actual {
            return Some(format!(
                "column {} is '{}', schema expects '{}'",
                i, actual, expected
            ));
        }
    }
    None
}
