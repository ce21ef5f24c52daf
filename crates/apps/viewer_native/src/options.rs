use layers::symbology::ColorMode;
use runtime::ViewToggle;
use serde::{Deserialize, Serialize};

/// The user-facing view switches.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    pub show_points: bool,
    /// Color geometries by date; otherwise by accuracy.
    pub color_by_date: bool,
    pub show_grid: bool,
    pub lock_grid: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_points: true,
            color_by_date: true,
            show_grid: false,
            lock_grid: false,
        }
    }
}

impl ViewOptions {
    pub fn color_mode(&self) -> ColorMode {
        if self.color_by_date {
            ColorMode::Date
        } else {
            ColorMode::Accuracy
        }
    }

    /// Set one switch. Returns true when the value changed.
    pub fn set(&mut self, toggle: ViewToggle, on: bool) -> bool {
        let slot = match toggle {
            ViewToggle::ShowPoints => &mut self.show_points,
            ViewToggle::ColorByDate => &mut self.color_by_date,
            ViewToggle::ShowGrid => &mut self.show_grid,
            ViewToggle::LockGrid => &mut self.lock_grid,
        };
        let changed = *slot != on;
        *slot = on;
        changed
    }
}
