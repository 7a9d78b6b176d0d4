//! Normalized routing-provider output.

use serde::{Deserialize, Serialize};

use super::location::Location;

/// Miles per meter.
pub const MILES_PER_METER: f64 = 0.000621371;

/// Convert a distance in meters to miles.
pub fn meters_to_miles(meters: f64) -> f64 {
    meters * MILES_PER_METER
}

/// Travel-time variants reported by traffic-aware providers, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficTimes {
    /// Extra time caused by current traffic.
    pub delay_secs: f64,

    /// Travel time under historic traffic for this time of day.
    pub historic_secs: f64,

    /// Travel time with no traffic at all.
    pub no_traffic_secs: f64,
}

/// Travel time and distance between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub source: Location,
    pub destination: Location,

    /// Travel time in seconds.
    pub time: f64,

    /// Distance in miles.
    pub distance: f64,

    /// Present only for driving providers that report traffic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic: Option<TrafficTimes>,
}

impl RouteSummary {
    pub fn new(source: Location, destination: Location, time: f64, distance: f64) -> Self {
        Self {
            source,
            destination,
            time,
            distance,
            traffic: None,
        }
    }

    pub fn with_traffic(mut self, traffic: TrafficTimes) -> Self {
        self.traffic = Some(traffic);
        self
    }
}
