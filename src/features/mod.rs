//! Feature extraction modules
//!
//! This module turns a validated patient record into model input:
//! - Schema (column names and order the artifacts were fitted on)
//! - Encoder (gender, one-hot race, ordinal smoking, verbatim vitals)

pub mod encoder;
pub mod schema;

pub use encoder::{encode_features, FeatureVector};
pub use schema::{FEATURE_COUNT, FEATURE_NAMES};
