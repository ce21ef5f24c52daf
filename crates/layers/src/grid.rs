//! Reference grid over the current view.
//!
//! Cells sit on a world-fixed lattice: row `y` spans
//! `[y * lat_step, (y + 1) * lat_step]` and column `x` spans
//! `[x * lng_step, (x + 1) * lng_step]`. Every regeneration produces a complete
//! new cell set; nothing is patched in place.

use foundation::bounds::GeoBounds;
use foundation::geo::Viewport;
use foundation::ids::GeometryId;
use foundation::math::{lattice_coord, lattice_index, lines_below};
use scene::Store;
use scene::components::{Color, Drawable2D};
use serde::Serialize;
use tracing::{debug, warn};

use crate::layer::Layer;
use crate::sizing::{GridLock, GridSteps, SizingError, SizingPolicy};
use crate::symbology::{Classifier, cell_color, grid_cell_style};

/// Label of a cell that covers no geometry.
pub const NO_GEOMETRIES: &str = "No geometries";

/// Lattice coordinates of a cell: `x` counts longitude steps, `y` latitude steps.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellIndex {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub index: CellIndex,
    pub bounds: GeoBounds,
    pub fill: Color,
    /// Comma-joined names of the matched geometries, or [`NO_GEOMETRIES`].
    pub label: String,
    pub geometries: Vec<GeometryId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    Sizing(SizingError),
    CellBudgetExceeded { required: u64, budget: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::Sizing(e) => write!(f, "grid sizing failed: {e}"),
            GridError::CellBudgetExceeded { required, budget } => write!(
                f,
                "grid needs {required} cells, budget is {budget}"
            ),
        }
    }
}

impl std::error::Error for GridError {}

impl From<SizingError> for GridError {
    fn from(e: SizingError) -> Self {
        GridError::Sizing(e)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GridLayer {
    pub policy: SizingPolicy,
    pub classifier: Classifier,
}

impl GridLayer {
    pub fn new(policy: SizingPolicy, classifier: Classifier) -> Self {
        Self { policy, classifier }
    }

    /// Cells covering `viewport`, row-major (south to north, then west to east).
    ///
    /// Never fails: sizing errors and oversized grids are logged and yield no cells.
    pub fn generate(&self, viewport: &Viewport, store: &Store, lock: &GridLock) -> Vec<GridCell> {
        match self.try_generate(viewport, store, lock) {
            Ok(cells) => cells,
            Err(err) => {
                warn!(error = %err, zoom = viewport.zoom, "skipping grid regeneration");
                Vec::new()
            }
        }
    }

    pub fn try_generate(
        &self,
        viewport: &Viewport,
        store: &Store,
        lock: &GridLock,
    ) -> Result<Vec<GridCell>, GridError> {
        let b = viewport.bounds;
        if b.is_degenerate() {
            return Ok(Vec::new());
        }

        let steps = self.policy.steps(viewport, lock)?;
        let y0 = lattice_index(b.south, steps.lat);
        let x0 = lattice_index(b.west, steps.lng);
        let rows = lines_below(y0, b.north, steps.lat);
        let cols = lines_below(x0, b.east, steps.lng);

        let required = (rows as u64).saturating_mul(cols as u64);
        if required > self.policy.max_cells as u64 {
            return Err(GridError::CellBudgetExceeded {
                required,
                budget: self.policy.max_cells,
            });
        }

        let mut cells = Vec::with_capacity(required as usize);
        for y in y0..y0 + rows {
            for x in x0..x0 + cols {
                cells.push(self.classify_cell(CellIndex { x, y }, steps, store));
            }
        }

        debug!(
            rows,
            cols,
            lat_step = steps.lat,
            lng_step = steps.lng,
            locked = lock.is_locked(),
            "grid regenerated"
        );
        Ok(cells)
    }

    fn classify_cell(&self, index: CellIndex, steps: GridSteps, store: &Store) -> GridCell {
        let bounds = GeoBounds::new(
            lattice_coord(index.y, steps.lat),
            lattice_coord(index.x, steps.lng),
            lattice_coord(index.y + 1, steps.lat),
            lattice_coord(index.x + 1, steps.lng),
        );

        let hits = store.geometries_intersecting(&bounds);
        let fill = cell_color(
            hits.iter()
                .map(|&i| self.classifier.recency(store.geometry_date(i))),
        );

        let matched: Vec<_> = hits.iter().filter_map(|&i| store.geometry(i)).collect();
        let label = if matched.is_empty() {
            NO_GEOMETRIES.to_string()
        } else {
            matched
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        GridCell {
            index,
            bounds,
            fill,
            label,
            geometries: matched.iter().map(|g| g.id).collect(),
        }
    }

    pub fn drawables(&self, cells: &[GridCell]) -> Vec<Drawable2D> {
        cells
            .iter()
            .map(|cell| {
                Drawable2D::rect(cell.bounds, grid_cell_style(cell.fill))
                    .with_label(format!("Geometries: {}", cell.label))
            })
            .collect()
    }
}

impl Layer for GridLayer {
    fn name(&self) -> &'static str {
        "grid"
    }
}
