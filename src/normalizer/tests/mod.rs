//! Test utilities for the normalization engine
//!
//! Helpers for building raw records the way the XML-to-mapping step
//! produces them.

use crate::raw::{RawRecord, RawValue};


/// Build a record from string pairs
pub fn record(fields: &[(&str, &str)]) -> RawRecord {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), RawValue::from(*v)))
        .collect()
}

/// Build a mapping value from string pairs
pub fn mapping(fields: &[(&str, &str)]) -> RawValue {
    fields.iter().copied().collect()
}

/// A complete record as returned for a routine Denver observation
pub fn full_record() -> RawRecord {
    let mut raw = record(&[
        ("raw_text", "KDEN 011953Z 18005G15KT 10SM SCT025 BKN050 21/M02 A3012 RMK AO2"),
        ("station_id", "KDEN"),
        ("observation_time", "2019-06-01T19:53:00Z"),
        ("latitude", "39.85"),
        ("longitude", "-104.65"),
        ("temp_c", "21.0"),
        ("dewpoint_c", "-2.0"),
        ("wind_dir_degrees", "180"),
        ("wind_speed_kt", "5"),
        ("wind_gust_kt", "15"),
        ("visibility_statute_mi", "10.0"),
        ("altim_in_hg", "30.120079"),
        ("sea_level_pressure_mb", "1011.2"),
        ("flight_category", "VFR"),
        ("metar_type", "METAR"),
        ("elevation_m", "1640.0"),
    ]);
    raw.insert(
        "sky_condition".to_string(),
        RawValue::List(vec![
            mapping(&[("sky_cover", "SCT"), ("cloud_base_ft_agl", "2500")]),
            mapping(&[("sky_cover", "BKN"), ("cloud_base_ft_agl", "5000")]),
        ]),
    );
    raw.insert(
        "quality_control_flags".to_string(),
        mapping(&[("auto_station", "TRUE")]),
    );
    raw
}
