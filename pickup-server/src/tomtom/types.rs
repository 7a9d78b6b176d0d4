//! TomTom batch routing DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{Location, RouteSummary, TrafficTimes, meters_to_miles};

use super::error::TomTomError;

/// Query path for one car route, relative to the batch endpoint.
///
/// Traffic-aware, departing now, summary only, with historic and
/// no-traffic travel times included.
pub fn calculate_route_query(source: &Location, destination: &Location) -> String {
    format!(
        "/calculateRoute/{:.6},{:.6}:{:.6},{:.6}/json?travelMode=car&routeType=fastest&traffic=true&departAt=now&maxAlternatives=0&computeTravelTimeFor=all&routeRepresentation=summaryOnly",
        source.latitude, source.longitude, destination.latitude, destination.longitude
    )
}

/// Body for the synchronous batch endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub batch_items: Vec<BatchQuery>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchQuery {
    pub query: String,
}

impl BatchRequest {
    /// One query per (source, destination) pair, row-major.
    pub fn for_pairs(sources: &[Location], destinations: &[Location]) -> Self {
        let batch_items = sources
            .iter()
            .flat_map(|src| {
                destinations.iter().map(move |dst| BatchQuery {
                    query: calculate_route_query(src, dst),
                })
            })
            .collect();

        Self { batch_items }
    }

    pub fn len(&self) -> usize {
        self.batch_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch_items.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    #[serde(default)]
    pub batch_items: Vec<BatchItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub status_code: u16,
    pub response: Option<RouteResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub summary: Summary,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub length_in_meters: f64,
    pub travel_time_in_seconds: f64,
    #[serde(default)]
    pub traffic_delay_in_seconds: Option<f64>,
    #[serde(default)]
    pub historic_traffic_travel_time_in_seconds: Option<f64>,
    #[serde(default)]
    pub no_traffic_travel_time_in_seconds: Option<f64>,
}

impl Summary {
    /// Present only when TomTom computed every travel-time variant.
    fn traffic(&self) -> Option<TrafficTimes> {
        Some(TrafficTimes {
            delay_secs: self.traffic_delay_in_seconds.unwrap_or(0.0),
            historic_secs: self.historic_traffic_travel_time_in_seconds?,
            no_traffic_secs: self.no_traffic_travel_time_in_seconds?,
        })
    }
}

impl BatchResponse {
    /// Convert items back into summaries for the pairs they were built from.
    pub fn into_summaries(
        self,
        sources: &[Location],
        destinations: &[Location],
    ) -> Result<Vec<RouteSummary>, TomTomError> {
        let expected = sources.len() * destinations.len();
        if self.batch_items.len() != expected {
            return Err(TomTomError::BatchSize {
                expected,
                got: self.batch_items.len(),
            });
        }

        let pairs = sources
            .iter()
            .flat_map(|src| destinations.iter().map(move |dst| (*src, *dst)));

        self.batch_items
            .into_iter()
            .zip(pairs)
            .enumerate()
            .map(|(index, (item, (src, dst)))| {
                if item.status_code != 200 {
                    return Err(TomTomError::Item {
                        index,
                        status: item.status_code,
                    });
                }

                let route = item
                    .response
                    .and_then(|r| r.routes.into_iter().next())
                    .ok_or(TomTomError::NoRoute { index })?;

                let summary = route.summary;
                let mut result = RouteSummary::new(
                    src,
                    dst,
                    summary.travel_time_in_seconds,
                    meters_to_miles(summary.length_in_meters),
                );
                if let Some(traffic) = summary.traffic() {
                    result = result.with_traffic(traffic);
                }

                Ok(result)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &str = r#"{
        "statusCode": 200,
        "response": {
            "routes": [{
                "summary": {
                    "lengthInMeters": 681999,
                    "travelTimeInSeconds": 25106,
                    "trafficDelayInSeconds": 1769,
                    "historicTrafficTravelTimeInSeconds": 24000,
                    "noTrafficTravelTimeInSeconds": 22000,
                    "departureTime": "2018-08-10T10:20:42+02:00",
                    "arrivalTime": "2018-08-10T17:19:07+02:00"
                }
            }]
        }
    }"#;

    #[test]
    fn query_formats_coordinates() {
        let query = calculate_route_query(
            &Location::new(30.245234235, 93.352341235),
            &Location::new(30.5325234235, 93.742341235),
        );
        assert!(query.starts_with("/calculateRoute/30.245234,93.352341:30.532523,93.742341/json?"));
        assert!(query.contains("traffic=true"));
        assert!(query.contains("computeTravelTimeFor=all"));
    }

    #[test]
    fn request_is_row_major() {
        let sources = [Location::new(1.0, 1.0), Location::new(2.0, 2.0)];
        let destinations = [Location::new(9.0, 9.0)];

        let request = BatchRequest::for_pairs(&sources, &destinations);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(request.len(), 2);
        assert!(
            json["batchItems"][1]["query"]
                .as_str()
                .unwrap()
                .starts_with("/calculateRoute/2.000000,2.000000:9.000000,9.000000/")
        );
    }

    #[test]
    fn summaries_carry_traffic() {
        let json = format!(r#"{{"batchItems": [{ITEM}]}}"#);
        let response: BatchResponse = serde_json::from_str(&json).unwrap();

        let src = Location::new(30.2, 93.3);
        let dst = Location::new(30.5, 93.7);
        let summaries = response.into_summaries(&[src], &[dst]).unwrap();

        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!(s.source, src);
        assert_eq!(s.destination, dst);
        assert_eq!(s.time, 25106.0);
        assert_eq!(s.distance, meters_to_miles(681999.0));
        assert_eq!(
            s.traffic,
            Some(TrafficTimes {
                delay_secs: 1769.0,
                historic_secs: 24000.0,
                no_traffic_secs: 22000.0,
            })
        );
    }

    #[test]
    fn missing_travel_time_variants_means_no_traffic() {
        let json = r#"{"batchItems": [{"statusCode": 200, "response": {"routes": [
            {"summary": {"lengthInMeters": 100, "travelTimeInSeconds": 20}}
        ]}}]}"#;
        let response: BatchResponse = serde_json::from_str(json).unwrap();
        let loc = Location::new(0.0, 0.0);

        let summaries = response.into_summaries(&[loc], &[loc]).unwrap();
        assert!(summaries[0].traffic.is_none());
    }

    #[test]
    fn failed_item_is_error() {
        let json = format!(
            r#"{{"batchItems": [{ITEM}, {{"statusCode": 400, "response": {{"error": {{"description": "bad"}}}}}}]}}"#
        );
        let response: BatchResponse = serde_json::from_str(&json).unwrap();
        let loc = Location::new(0.0, 0.0);

        let err = response.into_summaries(&[loc, loc], &[loc]).unwrap_err();
        assert!(matches!(err, TomTomError::Item { index: 1, status: 400 }));
    }

    #[test]
    fn empty_routes_is_error() {
        let json = r#"{"batchItems": [{"statusCode": 200, "response": {"routes": []}}]}"#;
        let response: BatchResponse = serde_json::from_str(json).unwrap();
        let loc = Location::new(0.0, 0.0);

        let err = response.into_summaries(&[loc], &[loc]).unwrap_err();
        assert!(matches!(err, TomTomError::NoRoute { index: 0 }));
    }

    #[test]
    fn item_count_must_match() {
        let json = format!(r#"{{"batchItems": [{ITEM}]}}"#);
        let response: BatchResponse = serde_json::from_str(&json).unwrap();
        let loc = Location::new(0.0, 0.0);

        let err = response.into_summaries(&[loc, loc], &[loc]).unwrap_err();
        assert!(matches!(err, TomTomError::BatchSize { expected: 2, got: 1 }));
    }
}
