//! Configuration management and validation.
//!
//! Controls the optional stages of the per-record pipeline and how batch
//! processing reacts to records that fail numeric parsing.

use crate::constants::DEFAULT_MAX_CONCURRENT_FILES;
use crate::error::{MetarError, Result};
use serde::{Deserialize, Serialize};

/// Normalization pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Run the wind-text pass after routing
    pub augment_wind_text: bool,

    /// Skip records with malformed numeric fields instead of failing the batch
    pub skip_malformed_records: bool,

    /// Maximum response documents read concurrently
    pub max_concurrent_files: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            augment_wind_text: true,
            skip_malformed_records: false,
            max_concurrent_files: DEFAULT_MAX_CONCURRENT_FILES,
        }
    }
}

impl NormalizerConfig {
    /// Enable or disable the wind-text pass
    pub fn with_wind_text(mut self, enabled: bool) -> Self {
        self.augment_wind_text = enabled;
        self
    }

    /// Enable or disable lenient batch handling
    pub fn with_skip_malformed(mut self, skip: bool) -> Self {
        self.skip_malformed_records = skip;
        self
    }

    /// Set maximum concurrent files
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.max_concurrent_files = max_files;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_files == 0 {
            return Err(MetarError::Configuration {
                message: "max_concurrent_files must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
