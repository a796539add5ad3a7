//! Clinical note generation
//!
//! Produces a one-line summary: the triggered findings, then a plan
//! sentence chosen by risk tier.

use super::category::{HIGH_RISK_THRESHOLD, MODERATE_RISK_THRESHOLD};
use crate::input::PatientInput;

/// BMI at or above which the patient is flagged overweight
pub const OVERWEIGHT_BMI: f64 = 25.0;

/// HbA1c (%) at or above which it is flagged elevated
pub const ELEVATED_HBA1C: f64 = 5.7;

/// Blood glucose (mg/dL) at or above which it is flagged elevated
pub const ELEVATED_GLUCOSE: f64 = 140.0;

/// Summary used when no finding is triggered
pub const NO_FINDINGS: &str = "No major clinical risk indicators detected";

/// Plan sentence for the High tier
pub const PLAN_HIGH: &str =
    "High risk for diabetes. Immediate screening and lifestyle intervention advised.";

/// Plan sentence for the Moderate tier
pub const PLAN_MODERATE: &str =
    "Moderate risk. Preventive screening and lifestyle counseling recommended.";

/// Plan sentence for the Low tier
pub const PLAN_LOW: &str = "Low immediate risk. Continue routine monitoring.";

/// The raw values the note is derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClinicalIndicators {
    /// BMI
    pub bmi: f64,
    /// HbA1c (%)
    pub hba1c: f64,
    /// Blood glucose (mg/dL)
    pub blood_glucose: f64,
    /// Hypertension history
    pub hypertension: bool,
    /// Heart disease history
    pub heart_disease: bool,
}

impl From<&PatientInput> for ClinicalIndicators {
    fn from(input: &PatientInput) -> Self {
        Self {
            bmi: input.bmi,
            hba1c: input.hba1c,
            blood_glucose: input.blood_glucose,
            hypertension: input.hypertension,
            heart_disease: input.heart_disease,
        }
    }
}

/// Triggered findings, in fixed reporting order
pub fn findings(indicators: &ClinicalIndicators) -> Vec<&'static str> {
    let checks = [
        (indicators.bmi >= OVERWEIGHT_BMI, "Overweight BMI"),
        (indicators.hba1c >= ELEVATED_HBA1C, "Elevated HbA1c"),
        (indicators.blood_glucose >= ELEVATED_GLUCOSE, "Elevated blood glucose"),
        (indicators.hypertension, "History of hypertension"),
        (indicators.heart_disease, "History of heart disease"),
    ];
    checks
        .iter()
        .filter(|(triggered, _)| *triggered)
        .map(|&(_, phrase)| phrase)
        .collect()
}

/// Plan sentence for a probability
pub fn plan(probability: f64) -> &'static str {
    if probability >= HIGH_RISK_THRESHOLD {
        PLAN_HIGH
    } else if probability >= MODERATE_RISK_THRESHOLD {
        PLAN_MODERATE
    } else {
        PLAN_LOW
    }
}

/// Generate the clinical summary
///
/// # Example
///
/// ```
/// use preventive_screening::analysis::note::{generate_clinical_note, ClinicalIndicators};
///
/// let indicators = ClinicalIndicators {
///     bmi: 20.0,
///     hba1c: 5.0,
///     blood_glucose: 100.0,
///     hypertension: false,
///     heart_disease: false,
/// };
/// assert_eq!(
///     generate_clinical_note(&indicators, 0.1),
///     "No major clinical risk indicators detected. Low immediate risk. Continue routine monitoring."
/// );
/// ```
pub fn generate_clinical_note(indicators: &ClinicalIndicators, probability: f64) -> String {
    let found = findings(indicators);
    let body = if found.is_empty() {
        NO_FINDINGS.to_string()
    } else {
        found.join("; ")
    };
    format!("{}. {}", body, plan(probability))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicators(bmi: f64, hba1c: f64, glucose: f64, hypertension: bool, heart: bool) -> ClinicalIndicators {
        ClinicalIndicators {
            bmi,
            hba1c,
            blood_glucose: glucose,
            hypertension,
            heart_disease: heart,
        }
    }

    #[test]
    fn test_finding_order() {
        let note = generate_clinical_note(&indicators(30.0, 6.0, 150.0, true, false), 0.7);
        assert_eq!(
            note,
            "Overweight BMI; Elevated HbA1c; Elevated blood glucose; History of hypertension. \
             High risk for diabetes. Immediate screening and lifestyle intervention advised."
        );
    }

    #[test]
    fn test_no_findings() {
        let note = generate_clinical_note(&indicators(20.0, 5.0, 100.0, false, false), 0.5);
        assert!(note.starts_with("No major clinical risk indicators detected."));
        assert!(note.ends_with(PLAN_MODERATE));
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let found = findings(&indicators(25.0, 5.7, 140.0, false, true));
        assert_eq!(
            found,
            vec![
                "Overweight BMI",
                "Elevated HbA1c",
                "Elevated blood glucose",
                "History of heart disease"
            ]
        );

        assert!(findings(&indicators(24.99, 5.69, 139.0, false, false)).is_empty());
    }

    #[test]
    fn test_plan_tiers_match_categorizer() {
        use crate::analysis::category::{categorize, RiskCategory};

        for &p in &[0.0, 0.3499, 0.35, 0.6499, 0.65, 1.0] {
            let expected = match categorize(p) {
                RiskCategory::High => PLAN_HIGH,
                RiskCategory::Moderate => PLAN_MODERATE,
                RiskCategory::Low => PLAN_LOW,
            };
            assert_eq!(plan(p), expected, "plan and category disagree at {}", p);
        }
    }
}
