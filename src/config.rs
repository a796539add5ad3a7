//! Configuration parameters for risk screening

use std::path::PathBuf;

/// Inclusive clinical ranges accepted for numeric patient fields
#[derive(Debug, Clone, PartialEq)]
pub struct InputLimits {
    /// Age range in years (default: 5-90)
    pub age: (u32, u32),

    /// BMI range in kg/m² (default: 15.0-50.0)
    pub bmi: (f64, f64),

    /// HbA1c range in % (default: 4.0-10.0)
    pub hba1c: (f64, f64),

    /// Blood glucose range in mg/dL (default: 60-300)
    pub blood_glucose: (f64, f64),
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            age: (5, 90),
            bmi: (15.0, 50.0),
            hba1c: (4.0, 10.0),
            blood_glucose: (60.0, 300.0),
        }
    }
}

/// Screening configuration parameters
#[derive(Debug, Clone)]
pub struct ScreeningConfig {
    // Artifacts
    /// Location of the fitted scaler artifact (default: "scaler.json")
    pub scaler_path: PathBuf,

    /// Location of the fitted classifier artifact (default: "model.json")
    pub model_path: PathBuf,

    // Encoding
    /// Value written into the `year` feature (default: 2024)
    ///
    /// Must be the year the model was trained against, not the wall-clock year.
    pub deployment_year: u32,

    // Validation
    /// Accepted input ranges
    pub limits: InputLimits,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            scaler_path: PathBuf::from("scaler.json"),
            model_path: PathBuf::from("model.json"),
            deployment_year: 2024,
            limits: InputLimits::default(),
        }
    }
}

impl ScreeningConfig {
    /// Default configuration with artifacts read from `dir`
    pub fn with_artifact_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            scaler_path: dir.join("scaler.json"),
            model_path: dir.join("model.json"),
            ..Self::default()
        }
    }
}
