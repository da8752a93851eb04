//! Batch response handling.
//!
//! Unwraps a deserialized data-server response, checks it for reported
//! errors and an empty result set, and runs the per-record pipeline over
//! every `METAR` entry.

use tracing::{debug, info, warn};

use crate::config::NormalizerConfig;
use crate::constants::response;
use crate::error::{MetarError, Result};
use crate::models::{BatchStats, Observation};
use crate::normalizer::normalize_record;
use crate::raw::{RawRecord, RawValue};

/// Observations produced from one response, with counts
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub observations: Vec<Observation>,
    pub stats: BatchStats,
}

/// Normalize a sequence of raw records.
///
/// In strict mode the first malformed record fails the batch; with
/// `skip_malformed_records` it is logged and skipped.
pub fn normalize_batch<I>(records: I, config: &NormalizerConfig) -> Result<BatchResult>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut result = BatchResult::default();

    for (index, record) in records.into_iter().enumerate() {
        result.stats.records_seen += 1;
        match normalize_record(record, config.augment_wind_text) {
            Ok(observation) => {
                result.stats.normalized += 1;
                result.observations.push(observation);
            }
            Err(e) if config.skip_malformed_records && e.is_record_level() => {
                warn!("Skipping record {}: {}", index, e);
                result.stats.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        "Normalized {} of {} records ({} skipped)",
        result.stats.normalized, result.stats.records_seen, result.stats.skipped
    );
    Ok(result)
}

/// Normalize every record in a response document
pub fn parse_response(document: &RawValue, config: &NormalizerConfig) -> Result<BatchResult> {
    let records = extract_records(document)?;
    let result = normalize_batch(records, config)?;
    info!(
        "Parsed {} observations from response ({} skipped)",
        result.stats.normalized, result.stats.skipped
    );
    Ok(result)
}

/// Pull the raw records out of a response envelope.
///
/// Accepts the envelope itself or a document wrapping it under `response`.
pub fn extract_records(document: &RawValue) -> Result<Vec<RawRecord>> {
    let envelope = document.get(response::ROOT).unwrap_or(document);
    if !matches!(envelope, RawValue::Map(_)) {
        return Err(MetarError::invalid_response("response is not a mapping"));
    }

    if let Some(errors) = envelope.get(response::ERRORS).filter(|e| !e.is_empty()) {
        return Err(MetarError::ApiError {
            messages: error_messages(errors),
        });
    }

    let data = envelope
        .get(response::DATA)
        .ok_or_else(|| MetarError::invalid_response("missing 'data' element"))?;

    let num_results = data
        .get(response::NUM_RESULTS)
        .and_then(RawValue::to_i64)
        .unwrap_or(0);
    if num_results <= 0 {
        return Err(MetarError::NoResults);
    }

    let records: Vec<RawRecord> = match data.get(response::RECORDS) {
        Some(RawValue::Map(record)) => vec![record.clone()],
        Some(RawValue::List(items)) => items
            .iter()
            .map(|item| match item {
                RawValue::Map(record) => Ok(record.clone()),
                other => Err(MetarError::invalid_response(format!(
                    "METAR entry is not a mapping: {}",
                    other.describe()
                ))),
            })
            .collect::<Result<_>>()?,
        Some(other) => {
            return Err(MetarError::invalid_response(format!(
                "unexpected METAR element: {}",
                other.describe()
            )));
        }
        None => Vec::new(),
    };

    if records.is_empty() {
        return Err(MetarError::NoResults);
    }
    if records.len() as i64 != num_results {
        debug!(
            "Response reported {} results but carried {} records",
            num_results,
            records.len()
        );
    }
    Ok(records)
}

/// Flatten an `errors` element into messages
fn error_messages(errors: &RawValue) -> Vec<String> {
    match errors {
        RawValue::List(items) => items.iter().flat_map(error_messages).collect(),
        RawValue::Map(map) => map.values().flat_map(error_messages).collect(),
        other => other.as_text().map(|t| vec![t.into_owned()]).unwrap_or_default(),
    }
}
