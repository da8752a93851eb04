//! Command implementations for the METAR normalizer CLI
//!
//! Each command lives in its own module:
//! - `normalize`: response documents in, JSON observations out
//! - `query`: request URL assembly

pub mod normalize;
pub mod query;
pub mod shared;

pub use shared::RunSummary;

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::cli::args::{Args, Commands};

/// Dispatch to the subcommand handler
pub async fn run(args: Args, cancellation: CancellationToken) -> Result<()> {
    match args.command {
        Some(Commands::Normalize(normalize_args)) => {
            normalize::run_normalize(normalize_args, cancellation).await
        }
        Some(Commands::Query(query_args)) => query::run_query(&query_args),
        None => anyhow::bail!("No command given"),
    }
}
