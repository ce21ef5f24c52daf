use serde::{Deserialize, Serialize};

use crate::bounds::GeoBounds;

/// A `(latitude, longitude)` pair in degrees.
///
/// Serialized as a two-element array `[lat, lng]`, which is how the data files
/// store coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for LatLng {
    fn from(v: [f64; 2]) -> Self {
        LatLng::new(v[0], v[1])
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(p: LatLng) -> Self {
        [p.lat, p.lng]
    }
}

/// Current map view: visible bounds plus integer zoom level.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub bounds: GeoBounds,
    pub zoom: i32,
}

impl Viewport {
    pub fn new(bounds: GeoBounds, zoom: i32) -> Self {
        Self { bounds, zoom }
    }

    /// Latitude of the vertical center of the view, in degrees.
    pub fn center_lat(&self) -> f64 {
        (self.bounds.south + self.bounds.north) * 0.5
    }
}
