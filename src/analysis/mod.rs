//! Analysis and result modules
//!
//! Turns an encoded vector into the final assessment:
//! - Risk classification (scaler + classifier)
//! - Risk categorization (three fixed tiers)
//! - Clinical note generation
//! - Result types

pub mod category;
pub mod note;
pub mod result;
pub mod risk;

pub use category::{categorize, RiskCategory};
pub use note::{generate_clinical_note, ClinicalIndicators};
pub use result::{RiskAssessment, DISCLAIMER};
pub use risk::RiskClassifier;
