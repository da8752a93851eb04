//! METAR request parameter assembly.
//!
//! Builds the query string for the data server: station selection, a time
//! window expressed either as absolute bounds or as hours before now, and
//! the most-recent-per-station filter. No I/O happens here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENDPOINT, request};
use crate::error::{MetarError, Result};

/// A METAR retrieval request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetarQuery {
    pub stations: Vec<String>,
    pub starting: Option<DateTime<Utc>>,
    pub ending: Option<DateTime<Utc>>,
    pub most_recent: bool,
}

impl MetarQuery {
    /// Query for the latest report from each of `stations`
    pub fn latest<I, S>(stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stations: stations.into_iter().map(Into::into).collect(),
            starting: None,
            ending: None,
            most_recent: true,
        }
    }

    pub fn starting(mut self, starting: DateTime<Utc>) -> Self {
        self.starting = Some(starting);
        self
    }

    pub fn ending(mut self, ending: DateTime<Utc>) -> Self {
        self.ending = Some(ending);
        self
    }

    pub fn most_recent(mut self, most_recent: bool) -> Self {
        self.most_recent = most_recent;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.stations.iter().all(|s| s.trim().is_empty()) {
            return Err(MetarError::invalid_query("at least one station is required"));
        }
        match (self.starting, self.ending) {
            (None, Some(_)) => Err(MetarError::invalid_query(
                "an end time requires a start time",
            )),
            (Some(start), Some(end)) if end < start => Err(MetarError::invalid_query(format!(
                "end time {} is before start time {}",
                end, start
            ))),
            _ => Ok(()),
        }
    }

    /// Ordered request parameters, evaluated against `now`
    pub fn to_params(&self, now: DateTime<Utc>) -> Result<Vec<(&'static str, String)>> {
        self.validate()?;

        let mut params = vec![
            ("requestType", request::REQUEST_TYPE.to_string()),
            ("format", request::FORMAT.to_string()),
            ("dataSource", request::DATA_SOURCE.to_string()),
            ("stationString", self.station_string()),
        ];
        params.extend(time_params(self.starting, self.ending, now));
        params.push((
            "mostRecentForEachStation",
            most_recent_param(self.most_recent, self.ending.is_some()).to_string(),
        ));
        Ok(params)
    }

    /// Full request URL against `endpoint`
    pub fn to_url(&self, endpoint: &str, now: DateTime<Utc>) -> Result<String> {
        let query = self
            .to_params(now)?
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, encode_component(&value)))
            .collect::<Vec<_>>()
            .join("&");
        Ok(format!("{}?{}", endpoint, query))
    }

    /// Request URL against the default endpoint
    pub fn to_default_url(&self, now: DateTime<Utc>) -> Result<String> {
        self.to_url(DEFAULT_ENDPOINT, now)
    }

    fn station_string(&self) -> String {
        self.stations
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(request::STATION_SEPARATOR)
    }
}

/// Absolute bounds when an end is given, otherwise hours before `now`
fn time_params(
    starting: Option<DateTime<Utc>>,
    ending: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Vec<(&'static str, String)> {
    match (starting, ending) {
        (Some(start), Some(end)) => vec![
            ("startTime", start.timestamp().to_string()),
            ("endTime", end.timestamp().to_string()),
        ],
        (Some(start), None) => vec![("hoursBeforeNow", hours_before(start, now).to_string())],
        _ => Vec::new(),
    }
}

/// Hours between `start` and `now`, rounded up to two decimals
pub fn hours_before(start: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let seconds = (now - start).num_seconds() as f64;
    (seconds / 3600.0 * 100.0).ceil() / 100.0
}

fn most_recent_param(most_recent: bool, has_end: bool) -> &'static str {
    match (most_recent, has_end) {
        (true, true) => request::MOST_RECENT_POSTFILTER,
        (true, false) => request::MOST_RECENT_CONSTRAINT,
        (false, _) => request::MOST_RECENT_OFF,
    }
}

/// Percent-encode a query value; station lists keep their commas readable
fn encode_component(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b',' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 6, 1, 12, 0, 0).unwrap()
    }

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_latest_for_single_station() {
        let params = MetarQuery::latest(["KDEN"]).to_params(now()).unwrap();
        assert_eq!(param(&params, "dataSource"), Some("metars"));
        assert_eq!(param(&params, "stationString"), Some("KDEN"));
        assert_eq!(param(&params, "mostRecentForEachStation"), Some("constraint"));
        assert_eq!(param(&params, "hoursBeforeNow"), None);
        assert_eq!(param(&params, "startTime"), None);
    }

    #[test]
    fn test_multiple_stations_joined() {
        let params = MetarQuery::latest(["KDEN", "KSEA", " "])
            .to_params(now())
            .unwrap();
        assert_eq!(param(&params, "stationString"), Some("KDEN,KSEA"));
    }

    #[test]
    fn test_hours_before_now_rounds_up() {
        let start = now() - Duration::minutes(90) - Duration::seconds(1);
        let params = MetarQuery::latest(["KDEN"])
            .starting(start)
            .to_params(now())
            .unwrap();
        assert_eq!(param(&params, "hoursBeforeNow"), Some("1.51"));
        assert_eq!(hours_before(now() - Duration::hours(3), now()), 3.0);
    }

    #[test]
    fn test_absolute_window_uses_postfilter() {
        let start = now() - Duration::hours(6);
        let params = MetarQuery::latest(["KDEN"])
            .starting(start)
            .ending(now())
            .to_params(now())
            .unwrap();
        assert_eq!(
            param(&params, "startTime"),
            Some(start.timestamp().to_string().as_str())
        );
        assert_eq!(
            param(&params, "endTime"),
            Some(now().timestamp().to_string().as_str())
        );
        assert_eq!(param(&params, "mostRecentForEachStation"), Some("postfilter"));
    }

    #[test]
    fn test_most_recent_disabled() {
        let params = MetarQuery::latest(["KDEN"])
            .most_recent(false)
            .to_params(now())
            .unwrap();
        assert_eq!(param(&params, "mostRecentForEachStation"), Some("false"));
    }

    #[test]
    fn test_validation() {
        assert!(MetarQuery::latest(Vec::<String>::new()).validate().is_err());
        assert!(MetarQuery::latest(["KDEN"]).ending(now()).validate().is_err());
        let reversed = MetarQuery::latest(["KDEN"])
            .starting(now())
            .ending(now() - Duration::hours(1));
        assert!(matches!(
            reversed.validate(),
            Err(MetarError::InvalidQuery { .. })
        ));
    }

    #[test]
    fn test_url_rendering() {
        let url = MetarQuery::latest(["KDEN", "KSEA"])
            .to_url("https://example.test/api", now())
            .unwrap();
        assert_eq!(
            url,
            "https://example.test/api?requestType=retrieve&format=xml&dataSource=metars\
             &stationString=KDEN,KSEA&mostRecentForEachStation=constraint"
        );
    }
}
