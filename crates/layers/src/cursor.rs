use std::fmt;

use foundation::geo::LatLng;
use foundation::math::lattice_index;

use crate::grid::CellIndex;
use crate::sizing::GridSteps;

/// Coordinate readout for the pointer position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CursorReadout {
    pub position: LatLng,
    /// Grid cell under the pointer, when the grid is shown.
    pub cell: Option<CellIndex>,
}

impl CursorReadout {
    /// `steps` are the active grid steps, so the reported cell is the one drawn
    /// under the pointer.
    pub fn new(position: LatLng, steps: Option<GridSteps>) -> Self {
        let cell = steps.map(|s| CellIndex {
            x: lattice_index(position.lng, s.lng),
            y: lattice_index(position.lat, s.lat),
        });
        Self { position, cell }
    }
}

impl fmt::Display for CursorReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(cell) = self.cell {
            writeln!(f, "Grid: {},{}", cell.x, cell.y)?;
        }
        writeln!(f, "Lat: {:.6}°", self.position.lat)?;
        write!(f, "Lng: {:.6}°", self.position.lng)
    }
}
