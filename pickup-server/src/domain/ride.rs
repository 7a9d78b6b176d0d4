//! Ride options offered to the rider.

use serde::Serialize;

use super::location::Location;

/// A walk to a pickup point followed by a drive to the destination.
///
/// Times are in seconds and distances in miles. `price` stays at zero
/// until the ride has been priced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub source: Location,
    pub pickup_point: Location,
    pub destination: Location,
    pub walk_time: f64,
    pub walk_distance: f64,
    pub drive_time: f64,
    pub drive_distance: f64,
    pub total_time: f64,
    pub total_distance: f64,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let ride = Ride {
            source: Location::new(1.0, 2.0),
            pickup_point: Location::new(1.1, 2.1),
            destination: Location::new(3.0, 4.0),
            walk_time: 120.0,
            walk_distance: 0.1,
            drive_time: 600.0,
            drive_distance: 4.0,
            total_time: 720.0,
            total_distance: 4.1,
            price: 12.5,
        };

        let value = serde_json::to_value(&ride).unwrap();
        assert_eq!(value["pickupPoint"]["lat"], 1.1);
        assert_eq!(value["walkTime"], 120.0);
        assert_eq!(value["totalDistance"], 4.1);
        assert_eq!(value["price"], 12.5);
    }
}
