//! Variable-wind recovery from the raw report text.
//!
//! The structured fields only carry direction and speed. Variability shows
//! up in the report body instead: `VRB05KT` for a direction that cannot be
//! given at all, or a `180V240` group right after the wind group for a
//! direction swinging across a sector.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::wind::{WindBuilder, WindVariability};
use crate::constants::wind_text::{VARIABLE_MARKER, WIND_GROUP_SUFFIX};
use crate::models::Observation;

/// `<lower>V<upper>`, both bounds in whole degrees
static VARIABLE_SECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3})V(\d{1,3})$").expect("valid sector pattern"));

/// Extract variable-wind detail from a METAR body.
///
/// Returns an empty [`WindVariability`] when there is no wind group, or the
/// wind group carries nothing about variability.
pub fn parse_wind_variability(raw_text: &str) -> WindVariability {
    let groups: Vec<&str> = raw_text.split_whitespace().collect();
    let Some(index) = groups.iter().position(|g| g.ends_with(WIND_GROUP_SUFFIX)) else {
        return WindVariability::default();
    };

    let mut detail = WindVariability::default();
    if groups[index].contains(VARIABLE_MARKER) {
        detail.variable = Some(true);
    }
    if let Some(captures) = groups
        .get(index + 1)
        .and_then(|follow| VARIABLE_SECTOR.captures(follow))
    {
        detail.variable_first = Some(captures[1].to_string());
        detail.variable_second = Some(captures[2].to_string());
    }
    detail
}

/// Merge variable-wind detail from `raw_text` into the observation's wind.
///
/// Only fills slots that are still empty, so structured direction and speed
/// are never touched and a second run is a no-op.
pub fn augment_wind_from_text(mut observation: Observation) -> Observation {
    let Some(raw_text) = observation.raw_text.as_deref() else {
        return observation;
    };

    let detail = parse_wind_variability(raw_text);
    if detail.is_empty() {
        return observation;
    }

    let mut builder = observation
        .wind
        .as_ref()
        .map(WindBuilder::from_wind)
        .unwrap_or_default();
    if builder.add_variability(detail) {
        debug!(
            "Recovered variable wind detail for station {}",
            observation.station.as_deref().unwrap_or("unknown")
        );
        observation.wind = builder.build();
    }
    observation
}
