use chrono::NaiveDate;
use foundation::time::{Recency, RecencyThreshold};
use scene::components::{Color, PathStyle};

/// Which attribute drives geometry colors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Date,
    Accuracy,
}

/// Maps geometry attributes to display colors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Classifier {
    pub threshold: RecencyThreshold,
}

impl Classifier {
    pub fn new(old_before: NaiveDate) -> Self {
        Self {
            threshold: RecencyThreshold::new(old_before),
        }
    }

    /// Red when strictly before the threshold, green otherwise.
    ///
    /// Unparseable dates are not "before" anything and come out green.
    pub fn color_by_date(&self, date: &str) -> Color {
        recency_color(self.threshold.classify_str(date))
    }

    pub fn recency(&self, date: Option<NaiveDate>) -> Recency {
        self.threshold.classify(date)
    }
}

fn recency_color(recency: Recency) -> Color {
    match recency {
        Recency::Old => Color::Red,
        Recency::New | Recency::Unknown => Color::Green,
    }
}

/// `color_by_date` against the default 2020-01-01 threshold.
pub fn color_by_date(date: &str) -> Color {
    Classifier::default().color_by_date(date)
}

/// Green when the accuracy is "high" (any case), red otherwise.
pub fn color_by_accuracy(accuracy: &str) -> Color {
    if accuracy.eq_ignore_ascii_case("high") {
        Color::Green
    } else {
        Color::Red
    }
}

/// Fill color of a grid cell from the recency of what it covers.
///
/// Any old geometry makes the cell red; otherwise any new one makes it green.
/// Unknown dates contribute to neither.
pub fn cell_color(recencies: impl IntoIterator<Item = Recency>) -> Color {
    let mut has_new = false;
    for r in recencies {
        match r {
            Recency::Old => return Color::Red,
            Recency::New => has_new = true,
            Recency::Unknown => {}
        }
    }
    if has_new { Color::Green } else { Color::Transparent }
}

pub fn grid_cell_style(fill: Color) -> PathStyle {
    PathStyle {
        stroke: Color::Black,
        weight: 1.0,
        fill,
        fill_opacity: if fill == Color::Transparent { 0.0 } else { 0.3 },
    }
}
