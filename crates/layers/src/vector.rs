use scene::Store;
use scene::components::{Drawable2D, PathStyle};

use crate::layer::Layer;
use crate::symbology::{Classifier, ColorMode, color_by_accuracy};

/// Geometry polygons, outlined by date or accuracy.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GeometryLayer {
    pub classifier: Classifier,
}

impl GeometryLayer {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// One polygon per geometry, in load order.
    ///
    /// Empty while the grid is shown: the grid already encodes the same
    /// information and the polygons would hide it.
    pub fn extract(&self, store: &Store, mode: ColorMode, grid_shown: bool) -> Vec<Drawable2D> {
        if grid_shown {
            return Vec::new();
        }

        store
            .geometries()
            .iter()
            .map(|g| {
                let color = match mode {
                    ColorMode::Date => self.classifier.color_by_date(&g.date),
                    ColorMode::Accuracy => color_by_accuracy(&g.accuracy),
                };
                Drawable2D::polygon(g.coordinates.clone(), PathStyle::outline(color)).with_label(
                    format!("{}\nDate: {}\nAccuracy: {}", g.name, g.date, g.accuracy),
                )
            })
            .collect()
    }
}

impl Layer for GeometryLayer {
    fn name(&self) -> &'static str {
        "geometries"
    }
}

#[cfg(test)]
mod tests {
    use super::GeometryLayer;
    use crate::symbology::ColorMode;
    use foundation::geo::LatLng;
    use foundation::ids::GeometryId;
    use scene::components::{Color, Shape2D};
    use scene::{Geometry, Store};

    fn sample() -> Store {
        let ring = vec![
            LatLng::new(51.50, -0.10),
            LatLng::new(51.51, -0.10),
            LatLng::new(51.51, -0.09),
        ];
        Store::new(
            vec![
                Geometry {
                    id: GeometryId(1),
                    name: "Old survey".to_string(),
                    date: "2018-03-01".to_string(),
                    accuracy: "HIGH".to_string(),
                    coordinates: ring.clone(),
                },
                Geometry {
                    id: GeometryId(2),
                    name: "New survey".to_string(),
                    date: "2022-03-01".to_string(),
                    accuracy: "low".to_string(),
                    coordinates: ring,
                },
            ],
            Vec::new(),
        )
    }

    #[test]
    fn colors_follow_mode() {
        let layer = GeometryLayer::default();
        let store = sample();

        let by_date = layer.extract(&store, ColorMode::Date, false);
        assert_eq!(by_date[0].style.stroke, Color::Red);
        assert_eq!(by_date[1].style.stroke, Color::Green);

        let by_accuracy = layer.extract(&store, ColorMode::Accuracy, false);
        assert_eq!(by_accuracy[0].style.stroke, Color::Green);
        assert_eq!(by_accuracy[1].style.stroke, Color::Red);
    }

    #[test]
    fn popup_lists_attributes() {
        let drawables = GeometryLayer::default().extract(&sample(), ColorMode::Date, false);
        assert_eq!(
            drawables[0].label.as_deref(),
            Some("Old survey\nDate: 2018-03-01\nAccuracy: HIGH")
        );
        assert!(matches!(&drawables[0].shape, Shape2D::Polygon { ring } if ring.len() == 3));
    }

    #[test]
    fn hidden_under_grid() {
        let drawables = GeometryLayer::default().extract(&sample(), ColorMode::Date, true);
        assert!(drawables.is_empty());
    }
}
