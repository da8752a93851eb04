//! Field dispatch tables.
//!
//! Every incoming field name resolves to exactly one [`FieldHandler`].
//! Lookup is a plain `match`, so adding a field is a one-line change and the
//! set of handler shapes is checked by the compiler.

use crate::models::{PrecipitationWindow, QualityFlag, Unit};

/// Plain attributes that take a raw value verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlainField {
    Station,
    ReportType,
    RawText,
    ObservationTime,
    Latitude,
    Longitude,
    FlightCategory,
    WxString,
}

/// Attributes holding a [`Measurement`](crate::models::Measurement)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasuredField {
    Elevation,
    Temperature,
    Dewpoint,
    Visibility,
    Altimeter,
    SeaLevelPressure,
    PressureTendency,
    VerticalVisibility,
    Snow,
    MaxT,
    MinT,
    MaxT24h,
    MinT24h,
}

/// Sub-keys of the composite wind attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindComponent {
    Direction,
    Speed,
    Gust,
}

/// How a single source field is consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldHandler {
    Rename(PlainField),
    Plain(PlainField),
    Measured(MeasuredField, Unit),
    Wind(WindComponent),
    Precipitation(PrecipitationWindow),
    SkyCondition,
    QualityFlags,
    Unhandled,
}

/// Source names that map onto a differently-named attribute.
///
/// Applied before dispatch; a name listed here never reaches
/// [`handler_for`].
pub fn alias_for(field: &str) -> Option<PlainField> {
    match field {
        "station_id" => Some(PlainField::Station),
        "metar_type" => Some(PlainField::ReportType),
        _ => None,
    }
}

/// Resolve the handler for a field that is not an alias
pub fn handler_for(field: &str) -> FieldHandler {
    use FieldHandler::*;
    use MeasuredField as M;

    match field {
        "raw_text" => Plain(PlainField::RawText),
        "observation_time" => Plain(PlainField::ObservationTime),
        "latitude" => Plain(PlainField::Latitude),
        "longitude" => Plain(PlainField::Longitude),
        "flight_category" => Plain(PlainField::FlightCategory),
        "wx_string" => Plain(PlainField::WxString),

        "temp_c" => Measured(M::Temperature, Unit::Celsius),
        "dewpoint_c" => Measured(M::Dewpoint, Unit::Celsius),
        "visibility_statute_mi" => Measured(M::Visibility, Unit::StatuteMile),
        "altim_in_hg" => Measured(M::Altimeter, Unit::InchOfMercury),
        "sea_level_pressure_mb" => Measured(M::SeaLevelPressure, Unit::Millibar),
        "three_hr_pressure_tendency_mb" => Measured(M::PressureTendency, Unit::Millibar),
        "elevation_m" => Measured(M::Elevation, Unit::Meter),
        "vert_vis_ft" => Measured(M::VerticalVisibility, Unit::Foot),
        "snow_in" => Measured(M::Snow, Unit::Inch),
        "maxT_c" => Measured(M::MaxT, Unit::Celsius),
        "minT_c" => Measured(M::MinT, Unit::Celsius),
        "maxT24hr_c" => Measured(M::MaxT24h, Unit::Celsius),
        "minT24hr_c" => Measured(M::MinT24h, Unit::Celsius),

        "wind_dir_degrees" => Wind(WindComponent::Direction),
        "wind_speed_kt" => Wind(WindComponent::Speed),
        "wind_gust_kt" => Wind(WindComponent::Gust),

        "precip_in" => Precipitation(PrecipitationWindow::SinceLast),
        "pcp3hr_in" => Precipitation(PrecipitationWindow::LastThreeHours),
        "pcp6hr_in" => Precipitation(PrecipitationWindow::LastSixHours),
        "pcp24hr_in" => Precipitation(PrecipitationWindow::LastTwentyFourHours),

        "sky_condition" => SkyCondition,
        "quality_control_flags" => QualityFlags,

        _ => Unhandled,
    }
}

/// Resolve an alias or a handler in one step; aliases win
pub fn resolve(field: &str) -> FieldHandler {
    alias_for(field)
        .map(FieldHandler::Rename)
        .unwrap_or_else(|| handler_for(field))
}

/// Map a QC flag element name onto its flag. Unknown names yield `None`.
pub fn quality_flag_for(name: &str) -> Option<QualityFlag> {
    match name {
        "corrected" => Some(QualityFlag::Corrected),
        "auto" => Some(QualityFlag::Automated),
        "auto_station" => Some(QualityFlag::AutoStation),
        "maintenance_indicator" | "maintenance_indicator_on" => {
            Some(QualityFlag::MaintenanceIndicator)
        }
        "no_signal" => Some(QualityFlag::NoSignal),
        "lightning_sensor_off" => Some(QualityFlag::LightningSensorOff),
        "freezing_rain_sensor_off" => Some(QualityFlag::FreezingRainSensorOff),
        "present_weather_sensor_off" => Some(QualityFlag::PresentWeatherSensorOff),
        _ => None,
    }
}
