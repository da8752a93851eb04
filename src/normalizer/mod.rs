//! Record normalization engine.
//!
//! Two stages, run per record:
//! - [`router`] - dispatches every raw field to a rename, a unit-tagged
//!   setter, a composite merge (wind, precipitation), the QC flag fan-out,
//!   or the unhandled bucket
//! - [`wind_text`] - a finishing pass recovering variable-wind detail from
//!   the raw report text
//!
//! Supporting pieces live in [`handlers`] (the dispatch tables) and
//! [`wind`] (the composite wind builder).
//!
//! ## Usage
//!
//! ```rust
//! use metar_normalizer::normalizer::normalize_record;
//! use metar_normalizer::raw::{RawRecord, RawValue};
//!
//! # fn example() -> metar_normalizer::Result<()> {
//! let mut raw = RawRecord::new();
//! raw.insert("station_id".into(), RawValue::from("KDEN"));
//! raw.insert("temp_c".into(), RawValue::from("21.5"));
//! raw.insert("raw_text".into(), RawValue::from("KDEN 011953Z VRB05KT 180V240 10SM"));
//!
//! let obs = normalize_record(raw, true)?;
//! assert_eq!(obs.station.as_deref(), Some("KDEN"));
//! assert!(obs.is_variable_wind());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod handlers;
pub mod router;
pub mod wind;
pub mod wind_text;

#[cfg(test)]
pub mod tests;

pub use handlers::FieldHandler;
pub use router::{RoutedRecord, normalize, route};
pub use wind::{WindBuilder, WindVariability};
pub use wind_text::{augment_wind_from_text, parse_wind_variability};

use crate::Result;
use crate::models::Observation;
use crate::raw::RawRecord;

/// Run the full per-record pipeline: routing, then optionally the wind-text pass
pub fn normalize_record(raw: RawRecord, augment_wind_text: bool) -> Result<Observation> {
    let observation = normalize(raw)?;
    Ok(if augment_wind_text {
        augment_wind_from_text(observation)
    } else {
        observation
    })
}
