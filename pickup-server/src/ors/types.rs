//! OpenRouteService matrix request/response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{Location, RouteSummary, meters_to_miles};

use super::error::OrsError;

/// Body for `POST /v2/matrix/{profile}`.
///
/// Sources and destinations share one `locations` array; `sources` and
/// `destinations` index into it. Coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixRequest {
    pub locations: Vec<[f64; 2]>,
    pub sources: Vec<usize>,
    pub destinations: Vec<usize>,
    pub metrics: Vec<&'static str>,
    pub units: &'static str,
}

impl MatrixRequest {
    pub fn new(sources: &[Location], destinations: &[Location]) -> Self {
        let locations = sources
            .iter()
            .chain(destinations)
            .map(|loc| [round6(loc.longitude), round6(loc.latitude)])
            .collect();

        Self {
            locations,
            sources: (0..sources.len()).collect(),
            destinations: (sources.len()..sources.len() + destinations.len()).collect(),
            metrics: vec!["distance", "duration"],
            units: "m",
        }
    }
}

fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

/// Matrix response. Cells are `null` when no route exists.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixResponse {
    /// Seconds, `durations[source][destination]`.
    pub durations: Option<Vec<Vec<Option<f64>>>>,

    /// Meters, `distances[source][destination]`.
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}

impl MatrixResponse {
    /// Flatten to one summary per (source, destination) pair, row-major.
    ///
    /// Times and distances are rounded up to whole seconds and meters
    /// before distances are converted to miles.
    pub fn into_summaries(
        self,
        sources: &[Location],
        destinations: &[Location],
    ) -> Result<Vec<RouteSummary>, OrsError> {
        let shape_error = |message: String| OrsError::Shape {
            expected_rows: sources.len(),
            expected_cols: destinations.len(),
            message,
        };

        let durations = self
            .durations
            .ok_or_else(|| shape_error("no durations".to_string()))?;
        let distances = self
            .distances
            .ok_or_else(|| shape_error("no distances".to_string()))?;

        if durations.len() != sources.len() || distances.len() != sources.len() {
            return Err(shape_error(format!(
                "{} duration rows, {} distance rows",
                durations.len(),
                distances.len()
            )));
        }

        let mut summaries = Vec::with_capacity(sources.len() * destinations.len());

        for (i, (duration_row, distance_row)) in durations.iter().zip(&distances).enumerate() {
            if duration_row.len() != destinations.len() || distance_row.len() != destinations.len()
            {
                return Err(shape_error(format!(
                    "row {} has {} durations, {} distances",
                    i,
                    duration_row.len(),
                    distance_row.len()
                )));
            }

            for (j, (duration, distance)) in duration_row.iter().zip(distance_row).enumerate() {
                let (Some(duration), Some(distance)) = (duration, distance) else {
                    return Err(OrsError::Unroutable {
                        source_index: i,
                        destination_index: j,
                    });
                };

                summaries.push(RouteSummary::new(
                    sources[i],
                    destinations[j],
                    duration.ceil(),
                    meters_to_miles(distance.ceil()),
                ));
            }
        }

        Ok(summaries)
    }
}
