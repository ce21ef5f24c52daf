use foundation::bounds::GeoBounds;
use foundation::geo::LatLng;
use serde::Serialize;

/// Named colors understood by the rendering surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    SkyBlue,
    Black,
    Transparent,
}

impl Color {
    pub fn css_name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::SkyBlue => "skyblue",
            Color::Black => "black",
            Color::Transparent => "transparent",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_name())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PathStyle {
    pub stroke: Color,
    pub weight: f32,
    pub fill: Color,
    pub fill_opacity: f32,
}

impl PathStyle {
    /// Stroke-only outline; fill follows the stroke color as a light tint.
    pub fn outline(stroke: Color) -> Self {
        Self {
            stroke,
            weight: 3.0,
            fill: stroke,
            fill_opacity: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape2D {
    Rect { bounds: GeoBounds },
    Polygon { ring: Vec<LatLng> },
    CircleMarker { center: LatLng, radius_px: f64 },
}

/// A styled primitive handed to the rendering surface, with an optional popup label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawable2D {
    pub shape: Shape2D,
    pub style: PathStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Drawable2D {
    pub fn rect(bounds: GeoBounds, style: PathStyle) -> Self {
        Self {
            shape: Shape2D::Rect { bounds },
            style,
            label: None,
        }
    }

    pub fn polygon(ring: Vec<LatLng>, style: PathStyle) -> Self {
        Self {
            shape: Shape2D::Polygon { ring },
            style,
            label: None,
        }
    }

    pub fn circle_marker(center: LatLng, radius_px: f64, style: PathStyle) -> Self {
        Self {
            shape: Shape2D::CircleMarker { center, radius_px },
            style,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
