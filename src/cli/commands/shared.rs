//! Helpers shared by the CLI commands: logging setup, input expansion and
//! the run summary.

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::args::NormalizeArgs;
use crate::models::BatchStats;

/// Outcome of a normalize run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub files_read: usize,
    /// Documents that carried no observations
    pub files_empty: usize,
    pub stats: BatchStats,
}

impl RunSummary {
    /// Print a coloured summary to stderr
    pub fn report(&self) {
        eprintln!("{}", "Normalization complete".bright_green().bold());
        eprintln!(
            "  {} {}",
            "Documents:".bright_cyan(),
            self.files_read.to_string().bright_white().bold()
        );
        if self.files_empty > 0 {
            eprintln!(
                "  {} {}",
                "Empty documents:".bright_yellow(),
                self.files_empty
            );
        }
        eprintln!(
            "  {} {} of {}",
            "Observations:".bright_cyan(),
            self.stats.normalized.to_string().bright_white().bold(),
            self.stats.records_seen
        );
        if self.stats.skipped > 0 {
            eprintln!(
                "  {} {}",
                "Skipped (malformed):".bright_red(),
                self.stats.skipped
            );
        }
    }
}

/// Filter directive used when `RUST_LOG` is not set
fn default_directive(args: &NormalizeArgs) -> String {
    format!("metar_normalizer={}", args.get_log_level())
}

/// Set up structured logging on stderr.
///
/// Quiet runs get a compact layer without timestamps; otherwise events carry
/// the time since startup.
pub fn setup_logging(args: &NormalizeArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(args)));

    let compact = args.quiet.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
    });
    let timed = (!args.quiet).then(|| {
        fmt::layer()
            .with_target(false)
            .with_timer(fmt::time::uptime())
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(timed)
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", args.get_log_level());
    Ok(())
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Expand input arguments into file paths, in argument order.
///
/// Plain paths are passed through untouched so a missing file surfaces as a
/// read error naming it; a glob matching nothing is an error here.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if !is_glob_pattern(input) {
            paths.push(PathBuf::from(input));
            continue;
        }

        let before = paths.len();
        for entry in glob::glob(input).with_context(|| format!("Invalid glob pattern '{}'", input))? {
            let path = entry.with_context(|| format!("Failed to read match for '{}'", input))?;
            if path.is_file() {
                paths.push(path);
            }
        }
        if paths.len() == before {
            anyhow::bail!("No files matched '{}'", input);
        }
    }

    debug!("Expanded {} inputs to {} files", inputs.len(), paths.len());
    Ok(paths)
}
