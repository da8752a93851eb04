//! Application constants for the METAR normalizer
//!
//! Request parameters for the aviation weather data server and the markers
//! used when reading wind groups out of raw report text.

// =============================================================================
// Data Server Request Parameters
// =============================================================================

/// Default data server endpoint for METAR retrieval
pub const DEFAULT_ENDPOINT: &str = "https://www.aviationweather.gov/adds/dataserver_current/httpparam";

/// Parameters sent with every request
pub mod request {
    pub const REQUEST_TYPE: &str = "retrieve";
    pub const FORMAT: &str = "xml";
    pub const DATA_SOURCE: &str = "metars";

    /// Separator between station identifiers in `stationString`
    pub const STATION_SEPARATOR: &str = ",";

    /// `mostRecentForEachStation` values
    pub const MOST_RECENT_CONSTRAINT: &str = "constraint";
    pub const MOST_RECENT_POSTFILTER: &str = "postfilter";
    pub const MOST_RECENT_OFF: &str = "false";
}

/// Keys of the deserialized response envelope
pub mod response {
    pub const ROOT: &str = "response";
    pub const ERRORS: &str = "errors";
    pub const DATA: &str = "data";
    pub const NUM_RESULTS: &str = "num_results";
    pub const RECORDS: &str = "METAR";
}

// =============================================================================
// Raw Text Markers
// =============================================================================

pub mod wind_text {
    /// Suffix identifying the wind group (speed in knots)
    pub const WIND_GROUP_SUFFIX: &str = "KT";

    /// Direction placeholder for variable wind
    pub const VARIABLE_MARKER: &str = "VRB";
}

// =============================================================================
// Processing Defaults
// =============================================================================

/// Default cap on response documents read at once by the CLI
pub const DEFAULT_MAX_CONCURRENT_FILES: usize = 8;
