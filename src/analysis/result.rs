//! Assessment result types

use super::category::RiskCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown with every result
pub const DISCLAIMER: &str =
    "Preventive risk estimation only. This tool does not provide a medical diagnosis.";

/// Complete risk assessment
///
/// Produced whole by the pipeline: never a probability without its
/// category and note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Positive-class probability (0.0-1.0)
    pub probability: f64,

    /// Risk tier for `probability`
    pub category: RiskCategory,

    /// Generated clinical summary (never empty)
    pub clinical_note: String,
}

impl RiskAssessment {
    /// Serialize as a single JSON object
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Risk Assessment Result")?;
        writeln!(f, "  Diabetes Risk Probability: {:.2}", self.probability)?;
        writeln!(f, "  Risk Category: {}", self.category)?;
        writeln!(f)?;
        writeln!(f, "Clinical Summary")?;
        writeln!(f, "  {}", self.clinical_note)?;
        writeln!(f)?;
        write!(f, "{}", DISCLAIMER)
    }
}
