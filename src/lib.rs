//! METAR Normalizer Library
//!
//! Turns decoded aviation weather reports (METAR), delivered as flat,
//! dynamically-keyed mappings, into strongly-typed observations.
//!
//! This library provides tools for:
//! - Routing every raw field to a rename, a unit-tagged measurement, a
//!   composite wind/precipitation merge, a QC flag, or an `unhandled` bucket
//! - Recovering variable-wind detail from the raw report text
//! - Unwrapping data-server response envelopes into record batches
//! - Building data-server request parameters

pub mod batch;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod query;
pub mod raw;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use batch::{BatchResult, parse_response};
pub use config::NormalizerConfig;
pub use error::{MetarError, Result};
pub use models::{Measurement, Observation, Unit, Wind};
pub use normalizer::{augment_wind_from_text, normalize, normalize_record};
pub use raw::{RawRecord, RawValue};
