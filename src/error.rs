//! Error handling for METAR normalization operations.
//!
//! Numeric parse failures abort a single record; envelope problems abort a
//! whole response. Everything else (unknown fields, unknown QC flags,
//! missing wind text) is absorbed by the normalizer and never surfaces here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetarError {
    #[error("Malformed numeric field '{field}': '{value}' is not a number")]
    MalformedNumericField { field: String, value: String },

    #[error("API reported errors: {}", .messages.join("; "))]
    ApiError { messages: Vec<String> },

    #[error("Response contained no observations")]
    NoResults,

    #[error("Invalid response document: {reason}")]
    InvalidResponse { reason: String },

    #[error("Invalid query: {reason}")]
    InvalidQuery { reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MetarError {
    /// Create a malformed numeric field error
    pub fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedNumericField {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// Create an invalid query error
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            reason: reason.into(),
        }
    }

    /// Whether this error only invalidates the record it was raised for
    pub fn is_record_level(&self) -> bool {
        matches!(self, Self::MalformedNumericField { .. })
    }
}

pub type Result<T> = std::result::Result<T, MetarError>;
