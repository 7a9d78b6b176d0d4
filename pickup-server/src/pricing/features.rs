//! Model input features for a ride.

use std::f64::consts::TAU;

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::domain::{Ride, TrafficTimes};

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_WEEK: f64 = 7.0;
const METERS_PER_MILE: f64 = 1609.344;

/// One row of the pricing model input.
///
/// Day of week and time of day are encoded as points on a circle so
/// Saturday sits next to Sunday and 23:59 next to 00:00.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RideFeatures {
    pub time_secs: f64,
    pub distance_meters: f64,
    pub time_to_historic_ratio: f64,
    pub time_to_no_traffic_ratio: f64,
    pub day_of_week_sin: f64,
    pub day_of_week_cos: f64,
    pub time_of_day_sin: f64,
    pub time_of_day_cos: f64,
}

impl RideFeatures {
    /// Features for `ride` requested at `at`.
    ///
    /// `traffic` comes from the drive leg. Without it, or when a reference
    /// time is zero, the ratios are 1.0.
    pub fn new(ride: &Ride, traffic: Option<&TrafficTimes>, at: DateTime<Utc>) -> Self {
        let ratio = |reference: f64| {
            if reference > 0.0 {
                ride.drive_time / reference
            } else {
                1.0
            }
        };

        let (historic, no_traffic) = match traffic {
            Some(t) => (ratio(t.historic_secs), ratio(t.no_traffic_secs)),
            None => (1.0, 1.0),
        };

        let day = f64::from(at.weekday().num_days_from_sunday()) / DAYS_PER_WEEK * TAU;
        let time = f64::from(at.num_seconds_from_midnight()) / SECONDS_PER_DAY * TAU;

        Self {
            time_secs: ride.total_time,
            distance_meters: ride.total_distance * METERS_PER_MILE,
            time_to_historic_ratio: historic,
            time_to_no_traffic_ratio: no_traffic,
            day_of_week_sin: day.sin(),
            day_of_week_cos: day.cos(),
            time_of_day_sin: time.sin(),
            time_of_day_cos: time.cos(),
        }
    }

    /// Row in the column order the model was trained on.
    pub fn to_row(&self) -> [f64; 8] {
        [
            self.time_secs,
            self.distance_meters,
            self.time_to_historic_ratio,
            self.time_to_no_traffic_ratio,
            self.day_of_week_sin,
            self.day_of_week_cos,
            self.time_of_day_sin,
            self.time_of_day_cos,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;
    use chrono::TimeZone;

    fn ride() -> Ride {
        Ride {
            source: Location::new(30.61, -96.34),
            pickup_point: Location::new(30.612, -96.338),
            destination: Location::new(30.65, -96.30),
            walk_time: 120.0,
            walk_distance: 0.1,
            drive_time: 600.0,
            drive_distance: 4.0,
            total_time: 720.0,
            total_distance: 4.1,
            price: 0.0,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sunday_midnight_is_angle_zero() {
        // 2024-04-07 was a Sunday
        let at = Utc.with_ymd_and_hms(2024, 4, 7, 0, 0, 0).unwrap();
        let features = RideFeatures::new(&ride(), None, at);

        assert!(close(features.day_of_week_sin, 0.0));
        assert!(close(features.day_of_week_cos, 1.0));
        assert!(close(features.time_of_day_sin, 0.0));
        assert!(close(features.time_of_day_cos, 1.0));
    }

    #[test]
    fn noon_is_half_turn() {
        let at = Utc.with_ymd_and_hms(2024, 4, 7, 12, 0, 0).unwrap();
        let features = RideFeatures::new(&ride(), None, at);

        assert!(close(features.time_of_day_sin, 0.0));
        assert!(close(features.time_of_day_cos, -1.0));
    }

    #[test]
    fn totals_and_meters() {
        let at = Utc.with_ymd_and_hms(2024, 4, 10, 8, 30, 0).unwrap();
        let features = RideFeatures::new(&ride(), None, at);

        assert_eq!(features.time_secs, 720.0);
        assert!(close(features.distance_meters, 4.1 * 1609.344));
        assert_eq!(features.time_to_historic_ratio, 1.0);
        assert_eq!(features.time_to_no_traffic_ratio, 1.0);
    }

    #[test]
    fn traffic_ratios_use_drive_time() {
        let traffic = TrafficTimes {
            delay_secs: 100.0,
            historic_secs: 500.0,
            no_traffic_secs: 400.0,
        };
        let at = Utc.with_ymd_and_hms(2024, 4, 10, 8, 30, 0).unwrap();
        let features = RideFeatures::new(&ride(), Some(&traffic), at);

        assert!(close(features.time_to_historic_ratio, 1.2));
        assert!(close(features.time_to_no_traffic_ratio, 1.5));
    }

    #[test]
    fn zero_reference_time_falls_back_to_one() {
        let traffic = TrafficTimes {
            delay_secs: 0.0,
            historic_secs: 0.0,
            no_traffic_secs: 0.0,
        };
        let at = Utc.with_ymd_and_hms(2024, 4, 10, 8, 30, 0).unwrap();
        let features = RideFeatures::new(&ride(), Some(&traffic), at);

        assert_eq!(features.time_to_historic_ratio, 1.0);
        assert_eq!(features.time_to_no_traffic_ratio, 1.0);
    }

    #[test]
    fn row_order() {
        let at = Utc.with_ymd_and_hms(2024, 4, 7, 0, 0, 0).unwrap();
        let row = RideFeatures::new(&ride(), None, at).to_row();

        assert_eq!(row[0], 720.0);
        assert_eq!(row[2], 1.0);
        assert!(close(row[5], 1.0));
        assert!(close(row[7], 1.0));
    }
}
