//! Ride assembly, pricing and ranking.
//!
//! A ride is a walk leg (rider → pickup point) and a drive leg (pickup
//! point → destination). The walk leg's destination and the drive leg's
//! source are the same pickup point.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{Ride, RouteSummary};
use crate::pricing::RideFeatures;

use super::error::PipelineError;

/// Combine a walk leg and a drive leg into an unpriced ride.
pub fn build_ride(inbound: &RouteSummary, outbound: &RouteSummary) -> Ride {
    Ride {
        source: inbound.source,
        pickup_point: inbound.destination,
        destination: outbound.destination,
        walk_time: inbound.time,
        walk_distance: inbound.distance,
        drive_time: outbound.time,
        drive_distance: outbound.distance,
        total_time: inbound.time + outbound.time,
        total_distance: inbound.distance + outbound.distance,
        price: 0.0,
    }
}

/// Pair walk and drive legs by position.
///
/// `inbounds[i]` and `outbounds[i]` must belong to the same pickup point.
/// Lists of different lengths are rejected rather than truncated.
pub fn build_rides(
    inbounds: &[RouteSummary],
    outbounds: &[RouteSummary],
) -> Result<Vec<Ride>, PipelineError> {
    if inbounds.len() != outbounds.len() {
        return Err(PipelineError::Misaligned {
            inbound: inbounds.len(),
            outbound: outbounds.len(),
        });
    }

    Ok(inbounds
        .iter()
        .zip(outbounds)
        .map(|(inbound, outbound)| build_ride(inbound, outbound))
        .collect())
}

/// Reorder drive legs so `result[i]` starts where `inbounds[i]` ends.
///
/// Legs are matched on the pickup coordinate rounded to 6 decimal places,
/// so the two provider calls don't have to agree on ordering. Every walk
/// leg needs a drive leg and vice versa.
pub fn align_by_pickup(
    inbounds: &[RouteSummary],
    outbounds: &[RouteSummary],
) -> Result<Vec<RouteSummary>, PipelineError> {
    if inbounds.len() != outbounds.len() {
        return Err(PipelineError::Misaligned {
            inbound: inbounds.len(),
            outbound: outbounds.len(),
        });
    }

    let mut by_pickup: HashMap<_, &RouteSummary> = outbounds
        .iter()
        .map(|outbound| (outbound.source.key(), outbound))
        .collect();

    // Each drive leg can be claimed once; with equal lengths that makes the
    // match one-to-one
    inbounds
        .iter()
        .map(|inbound| {
            let pickup = inbound.destination.key();
            by_pickup
                .remove(&pickup)
                .cloned()
                .ok_or(PipelineError::MissingRoute { pickup })
        })
        .collect()
}

/// Pricing features for each ride, using its drive leg's traffic times.
pub fn ride_features(
    rides: &[Ride],
    outbounds: &[RouteSummary],
    at: DateTime<Utc>,
) -> Vec<RideFeatures> {
    rides
        .iter()
        .zip(outbounds)
        .map(|(ride, outbound)| RideFeatures::new(ride, outbound.traffic.as_ref(), at))
        .collect()
}

/// Write one price into each ride, in order.
pub fn apply_prices(rides: &mut [Ride], prices: &[f64]) -> Result<(), PipelineError> {
    if rides.len() != prices.len() {
        return Err(PipelineError::PriceCount {
            expected: rides.len(),
            got: prices.len(),
        });
    }

    for (ride, price) in rides.iter_mut().zip(prices) {
        ride.price = *price;
    }

    Ok(())
}

/// Sort rides cheapest first. Equal prices keep their existing order.
pub fn rank_rides(rides: &mut [Ride]) {
    rides.sort_by(|a, b| a.price.total_cmp(&b.price));
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Location;
    use proptest::prelude::*;

    fn legs(times: &[(f64, f64)]) -> (Vec<RouteSummary>, Vec<RouteSummary>) {
        let rider = Location::new(30.0, -96.0);
        let destination = Location::new(31.0, -97.0);

        times
            .iter()
            .enumerate()
            .map(|(i, (walk, drive))| {
                let pickup = Location::new(30.0 + 0.0001 * i as f64, -96.0);
                (
                    RouteSummary::new(rider, pickup, *walk, walk / 1000.0),
                    RouteSummary::new(pickup, destination, *drive, drive / 100.0),
                )
            })
            .unzip()
    }

    proptest! {
        #[test]
        fn total_time_is_sum_of_legs(
            times in prop::collection::vec((0.0f64..10_000.0, 0.0f64..10_000.0), 0..30)
        ) {
            let (inbounds, outbounds) = legs(&times);
            let rides = build_rides(&inbounds, &outbounds).unwrap();

            prop_assert_eq!(rides.len(), inbounds.len());
            for (i, ride) in rides.iter().enumerate() {
                prop_assert_eq!(ride.total_time, inbounds[i].time + outbounds[i].time);
                prop_assert_eq!(ride.total_distance, inbounds[i].distance + outbounds[i].distance);
            }
        }

        #[test]
        fn alignment_undoes_any_shuffle(
            times in prop::collection::vec((0.0f64..10_000.0, 0.0f64..10_000.0), 1..30),
            seed in any::<u64>()
        ) {
            let (inbounds, outbounds) = legs(&times);

            // Deterministic rotation + reversal as the shuffle
            let mut shuffled = outbounds.clone();
            let len = shuffled.len();
            shuffled.rotate_left((seed as usize) % len);
            if seed % 2 == 0 {
                shuffled.reverse();
            }

            let aligned = align_by_pickup(&inbounds, &shuffled).unwrap();
            prop_assert_eq!(aligned, outbounds);
        }

        #[test]
        fn ranking_is_sorted_permutation(
            prices in prop::collection::vec(0.0f64..100.0, 0..30)
        ) {
            let times: Vec<(f64, f64)> = prices.iter().map(|_| (60.0, 600.0)).collect();
            let (inbounds, outbounds) = legs(&times);
            let mut rides = build_rides(&inbounds, &outbounds).unwrap();
            apply_prices(&mut rides, &prices).unwrap();

            rank_rides(&mut rides);

            prop_assert_eq!(rides.len(), prices.len());
            for window in rides.windows(2) {
                prop_assert!(window[0].price <= window[1].price);
            }

            let mut expected = prices.clone();
            expected.sort_by(f64::total_cmp);
            let ranked: Vec<f64> = rides.iter().map(|r| r.price).collect();
            prop_assert_eq!(ranked, expected);
        }
    }
}
