//! Integration tests for the normalization pipeline
//!
//! These tests feed complete response documents, shaped like the data
//! server's XML after conversion to JSON, through the public API.

use metar_normalizer::models::Unit;
use metar_normalizer::{
    Measurement, MetarError, NormalizerConfig, RawValue, normalize_record, parse_response,
};

const MULTI_STATION_RESPONSE: &str = r#"{
  "response": {
    "request_index": "38512375",
    "data_source": {"name": "metars"},
    "request": {"type": "retrieve"},
    "errors": null,
    "warnings": null,
    "time_taken_ms": "4",
    "data": {
      "num_results": "3",
      "METAR": [
        {
          "raw_text": "KDEN 011953Z VRB05KT 180V240 10SM FEW080 SCT250 21/M02 A3012 RMK AO2 SLP112",
          "station_id": "KDEN",
          "observation_time": "2019-06-01T19:53:00Z",
          "latitude": "39.85",
          "longitude": "-104.65",
          "temp_c": "21.1",
          "dewpoint_c": "-2.2",
          "wind_dir_degrees": "0",
          "wind_speed_kt": "5",
          "visibility_statute_mi": "10.0",
          "altim_in_hg": "30.120079",
          "sea_level_pressure_mb": "1011.2",
          "quality_control_flags": {"auto_station": "TRUE"},
          "sky_condition": [
            {"sky_cover": "FEW", "cloud_base_ft_agl": "8000"},
            {"sky_cover": "SCT", "cloud_base_ft_agl": "25000"}
          ],
          "flight_category": "VFR",
          "metar_type": "METAR",
          "elevation_m": "1640.0"
        },
        {
          "raw_text": "KSEA 011953Z 18010G18KT 150V210 10SM -RA BKN035 OVC060 14/09 A3001",
          "station_id": "KSEA",
          "observation_time": "2019-06-01T19:53:00Z",
          "temp_c": "14.0",
          "wind_dir_degrees": "180",
          "wind_speed_kt": "10",
          "wind_gust_kt": "18",
          "wx_string": "-RA",
          "precip_in": "0.02",
          "pcp6hr_in": "0.11",
          "sky_condition": [
            {"sky_cover": "BKN", "cloud_base_ft_agl": "3500"},
            {"sky_cover": "OVC", "cloud_base_ft_agl": "6000"}
          ],
          "quality_control_flags": [{"corrected": "TRUE"}, {"auto": "TRUE"}],
          "metar_type": "SPECI",
          "station_remark": "sensor upgrade scheduled"
        },
        {
          "raw_text": "KBOS 011954Z VRB03KT 10SM CLR 20/10 A3005",
          "station_id": "KBOS",
          "temp_c": "20.0",
          "wind_speed_kt": "3",
          "sky_condition": {"sky_cover": "CLR"}
        }
      ]
    }
  }
}"#;

fn document(json: &str) -> RawValue {
    serde_json::from_str(json).expect("fixture is valid JSON")
}

#[test]
fn test_multi_station_response() {
    let result = parse_response(
        &document(MULTI_STATION_RESPONSE),
        &NormalizerConfig::default(),
    )
    .unwrap();

    assert_eq!(result.stats.records_seen, 3);
    assert_eq!(result.stats.normalized, 3);
    assert_eq!(result.observations.len(), 3);

    let kden = &result.observations[0];
    assert_eq!(kden.station.as_deref(), Some("KDEN"));
    assert_eq!(kden.temperature, Some(Measurement::new(21.1, Unit::Celsius)));
    assert!(kden.flags.auto_station);
    assert!(kden.is_variable_wind());
    let kden_wind = kden.wind.as_ref().unwrap().wind.as_ref().unwrap();
    assert_eq!(kden_wind.direction, Some(0));
    assert_eq!(kden_wind.variable_first.as_deref(), Some("180"));
    assert_eq!(kden_wind.variable_second.as_deref(), Some("240"));
    assert_eq!(
        kden.sky_condition.as_ref().unwrap()[&25000].as_deref(),
        Some("SCT")
    );

    let ksea = &result.observations[1];
    assert_eq!(ksea.report_type.as_deref(), Some("SPECI"));
    assert!(ksea.flags.corrected && ksea.flags.automated);
    assert!(!ksea.is_variable_wind());
    let ksea_wind = ksea.wind.as_ref().unwrap();
    assert_eq!(ksea_wind.gusting.map(|g| g.value), Some(18));
    assert_eq!(ksea_wind.variable_first(), Some("150"));
    let precip = ksea.precipitation.unwrap();
    assert_eq!(precip.since_last.map(|p| p.value), Some(0.02));
    assert_eq!(precip.last_6_hours.map(|p| p.value), Some(0.11));
    assert_eq!(
        ksea.unhandled.as_ref().unwrap()["station_remark"],
        RawValue::from("sensor upgrade scheduled")
    );

    let kbos = &result.observations[2];
    assert!(kbos.is_variable_wind());
    assert_eq!(
        kbos.sky_condition.as_ref().unwrap()[&0].as_deref(),
        Some("CLR")
    );
}

#[test]
fn test_wind_text_disabled_leaves_structured_wind() {
    let config = NormalizerConfig::default().with_wind_text(false);
    let result = parse_response(&document(MULTI_STATION_RESPONSE), &config).unwrap();

    for obs in &result.observations {
        assert!(!obs.is_variable_wind());
        assert_eq!(obs.wind.as_ref().and_then(|w| w.variable_first()), None);
    }
}

#[test]
fn test_error_envelope() {
    let doc = document(
        r#"{"response": {"errors": {"error": "Query must be constrained by time"},
            "data": {"num_results": "0"}}}"#,
    );
    let err = parse_response(&doc, &NormalizerConfig::default()).unwrap_err();
    assert!(matches!(err, MetarError::ApiError { ref messages } if messages.len() == 1));
}

#[test]
fn test_single_record_pipeline() {
    let record = match document(
        r#"{"station_id": "KORD", "temp_c": "18.3", "raw_text": "KORD 011951Z 27012G20KT"}"#,
    ) {
        RawValue::Map(map) => map,
        other => panic!("expected mapping, got {:?}", other),
    };

    let obs = normalize_record(record, true).unwrap();
    assert_eq!(obs.station.as_deref(), Some("KORD"));
    assert_eq!(obs.wind, None);
}

#[test]
fn test_observation_json_round_trip() {
    let result = parse_response(
        &document(MULTI_STATION_RESPONSE),
        &NormalizerConfig::default(),
    )
    .unwrap();

    let json = serde_json::to_string(&result.observations).unwrap();
    let decoded: Vec<metar_normalizer::Observation> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, result.observations);
}
