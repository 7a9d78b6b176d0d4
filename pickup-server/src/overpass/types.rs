//! Overpass API query and response DTOs.

use serde::Deserialize;

use crate::domain::{BoundingBox, Location, StreetPolyline};

/// Highway classes a car can plausibly stop on.
pub const HIGHWAY_TYPES: [&str; 6] = [
    "primary",
    "secondary",
    "tertiary",
    "residential",
    "service",
    "unclassified",
];

/// Response from `/api/interpreter` with `out geom`.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A way with its inline geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    /// OSM id, absent in some synthetic fixtures.
    pub id: Option<i64>,

    /// Nodes are omitted for elements Overpass could not resolve.
    #[serde(default)]
    pub geometry: Vec<GeometryPoint>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeometryPoint {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassResponse {
    /// One polyline per element, in response order.
    pub fn into_polylines(self) -> Vec<StreetPolyline> {
        self.elements
            .into_iter()
            .map(|element| {
                element
                    .geometry
                    .into_iter()
                    .map(|p| Location::new(p.lat, p.lon))
                    .collect()
            })
            .collect()
    }
}

/// Overpass QL selecting every street way inside `bbox`.
///
/// Overpass expects the box as `south,west,north,east`.
pub fn street_query(bbox: &BoundingBox) -> String {
    let area = format!(
        "{:.6},{:.6},{:.6},{:.6}",
        bbox.bottom, bbox.left, bbox.top, bbox.right
    );

    let ways: String = HIGHWAY_TYPES
        .iter()
        .map(|highway| format!("way[\"highway\"=\"{highway}\"]({area});"))
        .collect();

    format!("[out:json];({ways});out geom;")
}
