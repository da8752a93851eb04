//! The `normalize` command: read response documents concurrently, run the
//! pipeline over every record and write the observations as JSON.

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::shared::{RunSummary, expand_inputs, setup_logging};
use crate::batch::{BatchResult, parse_response};
use crate::cli::args::NormalizeArgs;
use crate::config::NormalizerConfig;
use crate::error::MetarError;
use crate::models::Observation;
use crate::raw::RawValue;

/// Run the normalize command, writing observations to stdout
pub async fn run_normalize(args: NormalizeArgs, cancellation: CancellationToken) -> Result<()> {
    setup_logging(&args)?;

    let config = args.to_config()?;
    let paths = expand_inputs(&args.inputs)?;
    info!("Normalizing {} documents", paths.len());

    let (observations, summary) = normalize_files(paths, &config, &cancellation).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.pretty {
        serde_json::to_writer_pretty(&mut out, &observations)?;
    } else {
        serde_json::to_writer(&mut out, &observations)?;
    }
    writeln!(out)?;

    if !args.quiet {
        summary.report();
    }
    Ok(())
}

/// Normalize every document in `paths`, preserving input order.
///
/// A document reporting no results is counted and skipped; any other failure
/// aborts the run with the offending path attached.
pub async fn normalize_files(
    paths: Vec<PathBuf>,
    config: &NormalizerConfig,
    cancellation: &CancellationToken,
) -> Result<(Vec<Observation>, RunSummary)> {
    let results: Vec<(PathBuf, Result<BatchResult>)> = stream::iter(paths)
        .map(|path| {
            let config = config.clone();
            async move {
                let result = normalize_file(&path, config).await;
                (path, result)
            }
        })
        .buffered(config.max_concurrent_files)
        .take_until(cancellation.cancelled())
        .collect()
        .await;

    if cancellation.is_cancelled() {
        anyhow::bail!("Normalization cancelled");
    }

    let mut observations = Vec::new();
    let mut summary = RunSummary::default();
    for (path, result) in results {
        summary.files_read += 1;
        match result {
            Ok(batch) => {
                summary.stats.merge(&batch.stats);
                observations.extend(batch.observations);
            }
            Err(e) if matches!(e.downcast_ref::<MetarError>(), Some(MetarError::NoResults)) => {
                warn!("{}: no observations", path.display());
                summary.files_empty += 1;
            }
            Err(e) => return Err(e.context(format!("Failed to normalize {}", path.display()))),
        }
    }

    Ok((observations, summary))
}

async fn normalize_file(path: &Path, config: NormalizerConfig) -> Result<BatchResult> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let result = task::spawn_blocking(move || -> crate::Result<BatchResult> {
        let document: RawValue = serde_json::from_str(&content)?;
        parse_response(&document, &config)
    })
    .await
    .context("Normalization task panicked")??;

    Ok(result)
}
