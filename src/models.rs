//! Core data structures for normalized METAR observations.
//!
//! Defines the unit-tagged measurement type, the composite wind and
//! precipitation shapes, quality-control flags and the observation itself.

use crate::raw::RawValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Units attached to a measurement. Each source field has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Celsius,
    StatuteMile,
    InchOfMercury,
    Millibar,
    Meter,
    Foot,
    Inch,
    Knot,
}

/// A numeric value tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }
}

/// Sustained wind plus variability detail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindVector {
    /// Degrees true; absent for calm or variable wind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<bool>,

    /// Lower bound of the variable sector, as reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_first: Option<String>,

    /// Upper bound of the variable sector, as reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_second: Option<String>,
}

/// Peak gust speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gust {
    pub value: i64,
    pub unit: Unit,
}

/// Composite wind attribute, assembled from several source fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<WindVector>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gusting: Option<Gust>,
}

impl Wind {
    pub fn is_variable(&self) -> bool {
        self.wind
            .as_ref()
            .and_then(|w| w.variable)
            .unwrap_or(false)
    }

    pub fn variable_first(&self) -> Option<&str> {
        self.wind.as_ref()?.variable_first.as_deref()
    }

    pub fn variable_second(&self) -> Option<&str> {
        self.wind.as_ref()?.variable_second.as_deref()
    }
}

/// Precipitation amounts, one sub-key per accumulation window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_last: Option<PrecipitationAmount>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_3_hours: Option<PrecipitationAmount>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_6_hours: Option<PrecipitationAmount>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_24_hours: Option<PrecipitationAmount>,
}

impl Precipitation {
    pub fn is_empty(&self) -> bool {
        self.since_last.is_none()
            && self.last_3_hours.is_none()
            && self.last_6_hours.is_none()
            && self.last_24_hours.is_none()
    }
}

/// A precipitation amount. Keyed `units` on the wire, unlike [`Measurement`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationAmount {
    pub value: f64,
    pub units: Unit,
}

/// Accumulation windows a precipitation field can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecipitationWindow {
    SinceLast,
    LastThreeHours,
    LastSixHours,
    LastTwentyFourHours,
}

/// Boolean quality-control indicators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityFlags {
    pub corrected: bool,
    pub automated: bool,
    pub auto_station: bool,
    pub maintenance_indicator: bool,
    pub no_signal: bool,
    pub lightning_sensor_off: bool,
    pub freezing_rain_sensor_off: bool,
    pub present_weather_sensor_off: bool,
}

/// Identifies one quality-control flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityFlag {
    Corrected,
    Automated,
    AutoStation,
    MaintenanceIndicator,
    NoSignal,
    LightningSensorOff,
    FreezingRainSensorOff,
    PresentWeatherSensorOff,
}

impl QualityFlags {
    pub fn set(&mut self, flag: QualityFlag) {
        match flag {
            QualityFlag::Corrected => self.corrected = true,
            QualityFlag::Automated => self.automated = true,
            QualityFlag::AutoStation => self.auto_station = true,
            QualityFlag::MaintenanceIndicator => self.maintenance_indicator = true,
            QualityFlag::NoSignal => self.no_signal = true,
            QualityFlag::LightningSensorOff => self.lightning_sensor_off = true,
            QualityFlag::FreezingRainSensorOff => self.freezing_rain_sensor_off = true,
            QualityFlag::PresentWeatherSensorOff => self.present_weather_sensor_off = true,
        }
    }

    /// Number of flags currently set
    pub fn count(&self) -> usize {
        [
            self.corrected,
            self.automated,
            self.auto_station,
            self.maintenance_indicator,
            self.no_signal,
            self.lightning_sensor_off,
            self.freezing_rain_sensor_off,
            self.present_weather_sensor_off,
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

/// A normalized METAR observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,

    /// Report type, "METAR" or "SPECI"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation_time: Option<RawValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<RawValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<RawValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_category: Option<RawValue>,

    /// Present weather, e.g. "-RA BR"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wx_string: Option<RawValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dewpoint: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub altimeter: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sea_level_pressure: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_tendency: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_visibility: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub snow: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_t: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_t: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_t_24h: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_t_24h: Option<Measurement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<Precipitation>,

    /// Cloud base (feet AGL) to sky cover code; `None` when a layer omits its cover
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sky_condition: Option<BTreeMap<i64, Option<String>>>,

    pub flags: QualityFlags,

    /// Fields with no handler, keyed by their original name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unhandled: Option<BTreeMap<String, RawValue>>,
}

impl Observation {
    pub fn is_variable_wind(&self) -> bool {
        self.wind.as_ref().is_some_and(Wind::is_variable)
    }
}

/// Per-batch processing statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub records_seen: usize,
    pub normalized: usize,
    pub skipped: usize,
}

impl BatchStats {
    pub fn merge(&mut self, other: &BatchStats) {
        self.records_seen += other.records_seen;
        self.normalized += other.normalized;
        self.skipped += other.skipped;
    }
}
