use scene::Store;
use scene::components::{Color, Drawable2D, PathStyle};

use crate::layer::Layer;

const MARKER_RADIUS_PX: f64 = 6.0;

/// Point markers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct PointLayer;

impl PointLayer {
    pub fn extract(&self, store: &Store) -> Vec<Drawable2D> {
        let style = PathStyle {
            stroke: Color::Blue,
            weight: 3.0,
            fill: Color::SkyBlue,
            fill_opacity: 0.8,
        };
        store
            .points()
            .iter()
            .map(|p| {
                Drawable2D::circle_marker(p.coordinates, MARKER_RADIUS_PX, style)
                    .with_label(p.name.clone())
            })
            .collect()
    }
}

impl Layer for PointLayer {
    fn name(&self) -> &'static str {
        "points"
    }
}
