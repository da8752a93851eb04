//! Command-line argument definitions for the METAR normalizer
//!
//! Defines the CLI interface using the clap derive API.

use crate::config::NormalizerConfig;
use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_MAX_CONCURRENT_FILES};
use crate::error::{MetarError, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// CLI arguments for the METAR normalizer
#[derive(Debug, Clone, Parser)]
#[command(
    name = "metar-normalizer",
    version,
    about = "Normalize decoded METAR records into unit-tagged observations",
    long_about = "Reads METAR response documents (the data server's XML response converted to \
                  JSON) and emits strongly-typed observations: renamed fields, unit-tagged \
                  measurements, merged wind and precipitation, fanned-out quality-control flags, \
                  and every unrecognized field preserved under 'unhandled'."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Normalize METAR response documents to JSON observations
    Normalize(NormalizeArgs),
    /// Print the data server request URL for a METAR query
    Query(QueryArgs),
}

/// Arguments for the normalize command
#[derive(Debug, Clone, Parser)]
pub struct NormalizeArgs {
    /// Response documents to read (paths or glob patterns)
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Skip records with malformed numeric fields instead of failing
    #[arg(long = "skip-malformed")]
    pub skip_malformed: bool,

    /// Do not recover variable wind detail from the raw report text
    #[arg(long = "no-wind-text")]
    pub no_wind_text: bool,

    /// Maximum number of documents read concurrently
    #[arg(long = "max-concurrent", value_name = "N", default_value_t = DEFAULT_MAX_CONCURRENT_FILES)]
    pub max_concurrent: usize,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors and suppress the summary
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl NormalizeArgs {
    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Build the pipeline configuration from the flags
    pub fn to_config(&self) -> Result<NormalizerConfig> {
        let config = NormalizerConfig::default()
            .with_wind_text(!self.no_wind_text)
            .with_skip_malformed(self.skip_malformed)
            .with_max_concurrent_files(self.max_concurrent);
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the query command
#[derive(Debug, Clone, Parser)]
pub struct QueryArgs {
    /// Station identifier (repeat or comma-separate for several)
    #[arg(short = 's', long = "station", value_name = "ID", required = true, value_delimiter = ',')]
    pub stations: Vec<String>,

    /// Window start as hours before now
    #[arg(long = "hours", value_name = "N", conflicts_with = "start")]
    pub hours: Option<f64>,

    /// Window start (RFC 3339)
    #[arg(long = "start", value_name = "TIME")]
    pub start: Option<String>,

    /// Window end (RFC 3339), requires --start
    #[arg(long = "end", value_name = "TIME", requires = "start")]
    pub end: Option<String>,

    /// Return every report in the window, not only the most recent per station
    #[arg(long = "all")]
    pub all: bool,

    /// Data server endpoint
    #[arg(long = "endpoint", value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl QueryArgs {
    /// Resolve the window start against `now`
    pub fn starting(&self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        if let Some(hours) = self.hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(MetarError::invalid_query(format!(
                    "--hours must be a non-negative number, got {}",
                    hours
                )));
            }
            let seconds = (hours * 3600.0).round() as i64;
            return Ok(Some(now - chrono::Duration::seconds(seconds)));
        }
        self.start.as_deref().map(parse_time).transpose()
    }

    pub fn ending(&self) -> Result<Option<DateTime<Utc>>> {
        self.end.as_deref().map(parse_time).transpose()
    }
}

fn parse_time(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| MetarError::invalid_query(format!("invalid time '{}': {}", value, e)))
}
