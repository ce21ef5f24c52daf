use foundation::geo::LatLng;
use foundation::ids::{GeometryId, PointId};
use serde::{Deserialize, Serialize};

/// A named polygon with a survey date and an accuracy category.
///
/// `coordinates` is a closed ring of at least three `[lat, lng]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub id: GeometryId,
    pub name: String,
    /// ISO-8601 date as found in the source data.
    pub date: String,
    pub accuracy: String,
    pub coordinates: Vec<LatLng>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub name: String,
    pub coordinates: LatLng,
}
