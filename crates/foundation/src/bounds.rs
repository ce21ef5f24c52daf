use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// Axis-aligned box in degrees: `(south, west, north, east)`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        GeoBounds {
            south,
            west,
            north,
            east,
        }
    }

    /// Min/max box of a coordinate list. `None` when the list is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LatLng>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut b = GeoBounds::new(first.lat, first.lng, first.lat, first.lng);
        for p in points {
            b.south = b.south.min(p.lat);
            b.north = b.north.max(p.lat);
            b.west = b.west.min(p.lng);
            b.east = b.east.max(p.lng);
        }
        Some(b)
    }

    /// Open-interval overlap: boxes that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &GeoBounds) -> bool {
        intersects(self, other)
    }

    pub fn union(&self, other: &GeoBounds) -> GeoBounds {
        GeoBounds::new(
            self.south.min(other.south),
            self.west.min(other.west),
            self.north.max(other.north),
            self.east.max(other.east),
        )
    }

    /// True when the box has no area (or is inverted).
    pub fn is_degenerate(&self) -> bool {
        !(self.north > self.south && self.east > self.west)
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lng >= self.west && p.lng <= self.east
    }
}

pub fn intersects(a: &GeoBounds, b: &GeoBounds) -> bool {
    a.west < b.east && a.east > b.west && a.south < b.north && a.north > b.south
}

#[cfg(test)]
mod tests {
    use super::{GeoBounds, intersects};
    use crate::geo::LatLng;

    #[test]
    fn overlapping_boxes_intersect() {
        let a = GeoBounds::new(0.0, 0.0, 1.0, 1.0);
        let b = GeoBounds::new(0.5, 0.5, 1.5, 1.5);
        assert!(intersects(&a, &b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = GeoBounds::new(0.0, 0.0, 1.0, 1.0);
        let east = GeoBounds::new(0.0, 1.0, 1.0, 2.0);
        let north = GeoBounds::new(1.0, 0.0, 2.0, 1.0);
        let corner = GeoBounds::new(1.0, 1.0, 2.0, 2.0);
        assert!(!a.intersects(&east));
        assert!(!a.intersects(&north));
        assert!(!a.intersects(&corner));
    }

    #[test]
    fn containment_counts_as_intersection() {
        let outer = GeoBounds::new(-10.0, -10.0, 10.0, 10.0);
        let inner = GeoBounds::new(-1.0, -1.0, 1.0, 1.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn disjoint_on_one_axis_is_rejected() {
        let a = GeoBounds::new(0.0, 0.0, 1.0, 1.0);
        let b = GeoBounds::new(0.2, 3.0, 0.8, 4.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn bounds_from_ring() {
        let ring = [
            LatLng::new(51.50, -0.10),
            LatLng::new(51.52, -0.08),
            LatLng::new(51.49, -0.09),
        ];
        let b = GeoBounds::from_points(&ring).expect("non-empty ring");
        assert_eq!(b, GeoBounds::new(51.49, -0.10, 51.52, -0.08));
        assert!(GeoBounds::from_points(&[]).is_none());
    }

    #[test]
    fn zero_area_is_degenerate() {
        assert!(GeoBounds::new(1.0, 0.0, 1.0, 2.0).is_degenerate());
        assert!(GeoBounds::new(0.0, 2.0, 1.0, 2.0).is_degenerate());
        assert!(!GeoBounds::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }
}
