//! Risk categorization
//!
//! Buckets a probability into one of three tiers. Each tier's threshold is
//! inclusive at its lower bound:
//!
//! - `p >= 0.65` → High
//! - `0.35 <= p < 0.65` → Moderate
//! - `p < 0.35` → Low
//!
//! The clinical note generator chooses its plan sentence from the same
//! constants; change them here and both follow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of the High tier
pub const HIGH_RISK_THRESHOLD: f64 = 0.65;

/// Lower bound (inclusive) of the Moderate tier
pub const MODERATE_RISK_THRESHOLD: f64 = 0.35;

/// Discrete risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    /// Below the moderate threshold
    Low,
    /// Between the moderate and high thresholds
    Moderate,
    /// At or above the high threshold
    High,
}

impl RiskCategory {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Moderate => "Moderate Risk",
            RiskCategory::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a probability to its risk tier
///
/// # Example
///
/// ```
/// use preventive_screening::{categorize, RiskCategory};
///
/// assert_eq!(categorize(0.65), RiskCategory::High);
/// assert_eq!(categorize(0.35), RiskCategory::Moderate);
/// assert_eq!(categorize(0.2), RiskCategory::Low);
/// ```
pub fn categorize(probability: f64) -> RiskCategory {
    if probability >= HIGH_RISK_THRESHOLD {
        RiskCategory::High
    } else if probability >= MODERATE_RISK_THRESHOLD {
        RiskCategory::Moderate
    } else {
        RiskCategory::Low
    }
}
