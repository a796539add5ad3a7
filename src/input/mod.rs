//! Patient input modules
//!
//! The boundary with whatever front end collects vitals:
//! - Raw form submissions (labels and 0/1 flags)
//! - Validated, strongly typed patient records

pub mod form;
pub mod patient;

pub use form::PatientForm;
pub use patient::{Gender, PatientInput, Race, SmokingHistory};
