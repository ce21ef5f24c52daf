use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use foundation::time::default_old_threshold;
use layers::grid::GridLayer;
use layers::sizing::{BASE_LAT_STEP, DEFAULT_MAX_CELLS, MAX_ZOOM, MIN_ZOOM, SizingPolicy};
use layers::symbology::Classifier;
use serde::{Deserialize, Serialize};

use crate::options::ViewOptions;

/// Environment variable that overrides [`ViewerConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "ATLAS_DATA_DIR";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Grid sizing knobs.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Latitude step in degrees at the maximum zoom.
    pub base_lat_step: f64,
    pub min_zoom: i32,
    pub max_zoom: i32,
    pub max_cells: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            base_lat_step: BASE_LAT_STEP,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Directory holding `geometries.json` and `points.json`.
    pub data_dir: PathBuf,
    pub grid: GridConfig,
    /// Geometries dated strictly before this day count as old.
    pub old_before: NaiveDate,
    pub view: ViewOptions,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            grid: GridConfig::default(),
            old_before: default_old_threshold(),
            view: ViewOptions::default(),
        }
    }
}

impl ViewerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.grid;
        if !g.base_lat_step.is_finite() || g.base_lat_step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "grid.base_lat_step must be positive, got {}",
                g.base_lat_step
            )));
        }
        if g.min_zoom > g.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "grid.min_zoom {} exceeds grid.max_zoom {}",
                g.min_zoom, g.max_zoom
            )));
        }
        if g.max_cells == 0 {
            return Err(ConfigError::Invalid("grid.max_cells must be non-zero".into()));
        }
        Ok(())
    }

    pub fn sizing_policy(&self) -> SizingPolicy {
        SizingPolicy {
            base_lat_step: self.grid.base_lat_step,
            min_zoom: self.grid.min_zoom,
            max_zoom: self.grid.max_zoom,
            max_cells: self.grid.max_cells,
        }
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.old_before)
    }

    pub fn grid_layer(&self) -> GridLayer {
        GridLayer::new(self.sizing_policy(), self.classifier())
    }
}
