use chrono::NaiveDate;
use foundation::bounds::GeoBounds;
use foundation::time::parse_calendar_date;

use crate::geometry::{Geometry, Point};
use crate::spatial::{Bvh, Item as BvhItem};

/// Immutable snapshot of the geometries and points loaded for a session.
///
/// Per-geometry bounds and parsed dates are computed once here so grid
/// regeneration never re-derives them. Geometry positions (`usize`) refer to
/// the original load order.
#[derive(Debug, Clone, Default)]
pub struct Store {
    geometries: Vec<Geometry>,
    points: Vec<Point>,
    bounds: Vec<Option<GeoBounds>>,
    dates: Vec<Option<NaiveDate>>,
    index: Bvh,
}

impl Store {
    pub fn new(geometries: Vec<Geometry>, points: Vec<Point>) -> Self {
        let bounds: Vec<Option<GeoBounds>> = geometries
            .iter()
            .map(|g| GeoBounds::from_points(&g.coordinates))
            .collect();
        let dates = geometries
            .iter()
            .map(|g| parse_calendar_date(&g.date))
            .collect();

        let items = bounds
            .iter()
            .enumerate()
            .filter_map(|(index, b)| b.map(|bounds| BvhItem { index, bounds }))
            .collect();

        Self {
            geometries,
            points,
            bounds,
            dates,
            index: Bvh::build(items),
        }
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn geometry(&self, index: usize) -> Option<&Geometry> {
        self.geometries.get(index)
    }

    /// Bounding box of the geometry ring; `None` for an empty ring.
    pub fn geometry_bounds(&self, index: usize) -> Option<GeoBounds> {
        self.bounds.get(index).copied().flatten()
    }

    /// Parsed calendar date; `None` when the source text is unparseable.
    pub fn geometry_date(&self, index: usize) -> Option<NaiveDate> {
        self.dates.get(index).copied().flatten()
    }

    /// Positions of geometries whose bounds overlap `bounds`, in load order.
    pub fn geometries_intersecting(&self, bounds: &GeoBounds) -> Vec<usize> {
        self.index.query(bounds)
    }

    /// Union of all geometry and point extents.
    pub fn extent(&self) -> Option<GeoBounds> {
        let geoms = self.bounds.iter().flatten().copied();
        let points = self.points.iter().map(|p| {
            let c = p.coordinates;
            GeoBounds::new(c.lat, c.lng, c.lat, c.lng)
        });
        geoms.chain(points).reduce(|a, b| a.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::Store;
    use crate::geometry::{Geometry, Point};
    use foundation::bounds::GeoBounds;
    use foundation::geo::LatLng;
    use foundation::ids::{GeometryId, PointId};

    fn square(id: i64, name: &str, date: &str, s: f64, w: f64, size: f64) -> Geometry {
        Geometry {
            id: GeometryId(id),
            name: name.to_string(),
            date: date.to_string(),
            accuracy: "high".to_string(),
            coordinates: vec![
                LatLng::new(s, w),
                LatLng::new(s, w + size),
                LatLng::new(s + size, w + size),
                LatLng::new(s + size, w),
            ],
        }
    }

    #[test]
    fn precomputes_bounds_and_dates() {
        let store = Store::new(
            vec![
                square(1, "a", "2019-06-01", 0.0, 0.0, 1.0),
                square(2, "b", "bogus", 5.0, 5.0, 2.0),
            ],
            Vec::new(),
        );
        assert_eq!(
            store.geometry_bounds(0),
            Some(GeoBounds::new(0.0, 0.0, 1.0, 1.0))
        );
        assert_eq!(
            store.geometry_bounds(1),
            Some(GeoBounds::new(5.0, 5.0, 7.0, 7.0))
        );
        assert!(store.geometry_date(0).is_some());
        assert!(store.geometry_date(1).is_none());
        assert!(store.geometry_bounds(7).is_none());
    }

    #[test]
    fn intersecting_keeps_load_order() {
        let store = Store::new(
            vec![
                square(10, "late", "2021-01-01", 0.0, 0.0, 1.0),
                square(3, "far", "2021-01-01", 50.0, 50.0, 1.0),
                square(7, "early", "2018-01-01", 0.5, 0.5, 1.0),
            ],
            Vec::new(),
        );
        let hits = store.geometries_intersecting(&GeoBounds::new(0.6, 0.6, 0.9, 0.9));
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn extent_covers_geometries_and_points() {
        let store = Store::new(
            vec![square(1, "a", "2020-01-01", 0.0, 0.0, 1.0)],
            vec![Point {
                id: PointId(1),
                name: "p".to_string(),
                coordinates: LatLng::new(-2.0, 3.0),
            }],
        );
        assert_eq!(store.extent(), Some(GeoBounds::new(-2.0, 0.0, 1.0, 3.0)));
        assert!(Store::default().extent().is_none());
    }
}
