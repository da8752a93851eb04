//! Field router: turns one [`RawRecord`] into an [`Observation`].
//!
//! Routing is a single pass over the record. Aliases are resolved first,
//! then every remaining field goes to exactly one handler; anything without
//! a handler lands in `unhandled` under its original name.

use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::{debug, trace};

use super::handlers::{self, FieldHandler, MeasuredField, PlainField, WindComponent};
use super::wind::WindBuilder;
use crate::error::{MetarError, Result};
use crate::models::{
    Measurement, Observation, Precipitation, PrecipitationAmount, PrecipitationWindow, QualityFlags,
    Unit,
};
use crate::raw::{RawRecord, RawValue};

/// Sky condition keys inside each layer mapping
const CLOUD_BASE_KEY: &str = "cloud_base_ft_agl";
const SKY_COVER_KEY: &str = "sky_cover";

/// Result of routing one record, with the handler chosen for each field
#[derive(Debug, Clone)]
pub struct RoutedRecord {
    pub observation: Observation,
    pub routes: BTreeMap<String, FieldHandler>,
}

/// Normalize one raw record.
///
/// Fails only when a numeric field cannot be parsed; no partial observation
/// is returned in that case.
pub fn normalize(raw: RawRecord) -> Result<Observation> {
    route(raw).map(|routed| routed.observation)
}

/// Normalize one raw record and report where each field went
pub fn route(mut raw: RawRecord) -> Result<RoutedRecord> {
    let mut builder = ObservationBuilder::default();
    let mut routes = BTreeMap::new();

    // Rename pass
    let aliased: Vec<String> = raw
        .keys()
        .filter(|k| handlers::alias_for(k).is_some())
        .cloned()
        .collect();
    for field in aliased {
        if let (Some(value), Some(target)) = (raw.remove(&field), handlers::alias_for(&field)) {
            builder.set_plain(target, value);
            routes.insert(field, FieldHandler::Rename(target));
        }
    }

    // Dispatch pass
    for (field, value) in raw {
        let handler = handlers::handler_for(&field);
        trace!("Routing field '{}' via {:?}", field, handler);
        builder.apply(&field, handler, value)?;
        routes.insert(field, handler);
    }

    Ok(RoutedRecord {
        observation: builder.build(),
        routes,
    })
}

/// Mutable state for one observation under construction
#[derive(Debug, Default)]
struct ObservationBuilder {
    observation: Observation,
    wind: WindBuilder,
    precipitation: Precipitation,
    sky_condition: Option<BTreeMap<i64, Option<String>>>,
    flags: QualityFlags,
    unhandled: BTreeMap<String, RawValue>,
}

impl ObservationBuilder {
    fn apply(&mut self, field: &str, handler: FieldHandler, value: RawValue) -> Result<()> {
        match handler {
            FieldHandler::Rename(target) | FieldHandler::Plain(target) => {
                self.set_plain(target, value)
            }
            FieldHandler::Measured(target, unit) => {
                let measurement = Measurement::new(parse_f64(field, &value)?, unit);
                self.set_measured(target, measurement);
            }
            FieldHandler::Wind(component) => {
                let parsed = parse_i64(field, &value)?;
                match component {
                    WindComponent::Direction => self.wind.direction(parsed),
                    WindComponent::Speed => self.wind.speed(parsed),
                    WindComponent::Gust => self.wind.gust(parsed),
                };
            }
            FieldHandler::Precipitation(window) => {
                let amount = PrecipitationAmount {
                    value: parse_f64(field, &value)?,
                    units: Unit::Inch,
                };
                self.set_precipitation(window, amount);
            }
            FieldHandler::SkyCondition => self.set_sky_condition(&value),
            FieldHandler::QualityFlags => self.set_quality_flags(&value),
            FieldHandler::Unhandled => {
                debug!("No handler for field '{}', keeping raw value", field);
                self.unhandled.insert(field.to_string(), value);
            }
        }
        Ok(())
    }

    fn set_plain(&mut self, target: PlainField, value: RawValue) {
        let obs = &mut self.observation;
        match target {
            PlainField::Station => obs.station = text_of(value),
            PlainField::ReportType => obs.report_type = text_of(value),
            PlainField::RawText => obs.raw_text = text_of(value),
            PlainField::ObservationTime => obs.observation_time = Some(value),
            PlainField::Latitude => obs.latitude = Some(value),
            PlainField::Longitude => obs.longitude = Some(value),
            PlainField::FlightCategory => obs.flight_category = Some(value),
            PlainField::WxString => obs.wx_string = Some(value),
        }
    }

    fn set_measured(&mut self, target: MeasuredField, measurement: Measurement) {
        let obs = &mut self.observation;
        let slot = match target {
            MeasuredField::Elevation => &mut obs.elevation,
            MeasuredField::Temperature => &mut obs.temperature,
            MeasuredField::Dewpoint => &mut obs.dewpoint,
            MeasuredField::Visibility => &mut obs.visibility,
            MeasuredField::Altimeter => &mut obs.altimeter,
            MeasuredField::SeaLevelPressure => &mut obs.sea_level_pressure,
            MeasuredField::PressureTendency => &mut obs.pressure_tendency,
            MeasuredField::VerticalVisibility => &mut obs.vertical_visibility,
            MeasuredField::Snow => &mut obs.snow,
            MeasuredField::MaxT => &mut obs.max_t,
            MeasuredField::MinT => &mut obs.min_t,
            MeasuredField::MaxT24h => &mut obs.max_t_24h,
            MeasuredField::MinT24h => &mut obs.min_t_24h,
        };
        *slot = Some(measurement);
    }

    fn set_precipitation(&mut self, window: PrecipitationWindow, amount: PrecipitationAmount) {
        let precip = &mut self.precipitation;
        let slot = match window {
            PrecipitationWindow::SinceLast => &mut precip.since_last,
            PrecipitationWindow::LastThreeHours => &mut precip.last_3_hours,
            PrecipitationWindow::LastSixHours => &mut precip.last_6_hours,
            PrecipitationWindow::LastTwentyFourHours => &mut precip.last_24_hours,
        };
        *slot = Some(amount);
    }

    /// Fold layers into base height -> cover; later layers win on equal heights
    fn set_sky_condition(&mut self, value: &RawValue) {
        let mut layers = BTreeMap::new();
        for layer in value.mappings() {
            // Clear-sky layers carry no base
            let height = layer
                .get(CLOUD_BASE_KEY)
                .and_then(RawValue::to_i64)
                .unwrap_or(0);
            let cover = layer
                .get(SKY_COVER_KEY)
                .and_then(RawValue::as_text)
                .map(Cow::into_owned);
            if cover.is_none() {
                debug!("Sky condition layer at {} ft has no cover", height);
            }
            layers.insert(height, cover);
        }
        self.sky_condition = Some(layers);
    }

    fn set_quality_flags(&mut self, value: &RawValue) {
        for set in value.mappings() {
            for name in set.keys() {
                match handlers::quality_flag_for(name) {
                    Some(flag) => self.flags.set(flag),
                    None => debug!("Ignoring unrecognized quality control flag '{}'", name),
                }
            }
        }
    }

    fn build(self) -> Observation {
        let mut observation = self.observation;
        observation.wind = self.wind.build();
        observation.precipitation = (!self.precipitation.is_empty()).then_some(self.precipitation);
        observation.sky_condition = self.sky_condition;
        observation.flags = self.flags;
        observation.unhandled = (!self.unhandled.is_empty()).then_some(self.unhandled);
        observation
    }
}

fn text_of(value: RawValue) -> Option<String> {
    match value {
        RawValue::Null => None,
        RawValue::Text(s) => Some(s),
        other => Some(other.describe()),
    }
}

fn parse_f64(field: &str, value: &RawValue) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| MetarError::malformed(field, value.describe()))
}

fn parse_i64(field: &str, value: &RawValue) -> Result<i64> {
    value
        .to_i64()
        .ok_or_else(|| MetarError::malformed(field, value.describe()))
}
