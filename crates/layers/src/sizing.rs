//! Grid cell sizing.
//!
//! The latitude step halves with every zoom level and can be frozen by locking
//! the grid. The longitude step is always derived from the current view center
//! so cells stay visually square under an equirectangular display.

use foundation::geo::Viewport;

/// Cell height at the maximum zoom level, about 10 m at the equator.
pub const BASE_LAT_STEP: f64 = 0.00009;
pub const MIN_ZOOM: i32 = 0;
pub const MAX_ZOOM: i32 = 19;
pub const DEFAULT_MAX_CELLS: usize = 40_000;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SizingError {
    /// The view center is too close to a pole for a finite longitude step.
    PolarDivergence { center_lat: f64 },
    /// A latitude step that is not finite and positive.
    InvalidStep { step: f64 },
}

impl std::fmt::Display for SizingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizingError::PolarDivergence { center_lat } => write!(
                f,
                "longitude step diverges at center latitude {center_lat}°"
            ),
            SizingError::InvalidStep { step } => write!(f, "invalid grid step: {step}"),
        }
    }
}

impl std::error::Error for SizingError {}

/// Active cell extent in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridSteps {
    pub lat: f64,
    pub lng: f64,
}

/// Lock state of the grid size.
///
/// Locking captures the step implied by the zoom at the moment of locking;
/// locking again while locked keeps the captured step. Unlocking always drops it.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum GridLock {
    #[default]
    Unlocked,
    Locked { lat_step: f64 },
}

impl GridLock {
    pub fn is_locked(&self) -> bool {
        matches!(self, GridLock::Locked { .. })
    }

    pub fn frozen_step(&self) -> Option<f64> {
        match self {
            GridLock::Locked { lat_step } => Some(*lat_step),
            GridLock::Unlocked => None,
        }
    }

    pub fn lock(&mut self, policy: &SizingPolicy, zoom: i32) {
        if let GridLock::Unlocked = self {
            *self = GridLock::Locked {
                lat_step: policy.lat_step_for_zoom(zoom),
            };
        }
    }

    pub fn unlock(&mut self) {
        *self = GridLock::Unlocked;
    }

    /// Apply a lock toggle. Returns true when the state changed.
    pub fn set_locked(&mut self, locked: bool, policy: &SizingPolicy, zoom: i32) -> bool {
        let before = *self;
        if locked {
            self.lock(policy, zoom);
        } else {
            self.unlock();
        }
        before != *self
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SizingPolicy {
    pub base_lat_step: f64,
    pub min_zoom: i32,
    pub max_zoom: i32,
    /// Regenerations that would produce more cells than this are skipped.
    pub max_cells: usize,
}

impl Default for SizingPolicy {
    fn default() -> Self {
        Self {
            base_lat_step: BASE_LAT_STEP,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl SizingPolicy {
    /// `base * 2^(max_zoom - clamp(zoom))`.
    pub fn lat_step_for_zoom(&self, zoom: i32) -> f64 {
        let z = zoom.clamp(self.min_zoom, self.max_zoom);
        self.base_lat_step * 2f64.powi(self.max_zoom - z)
    }

    pub fn lat_step(&self, zoom: i32, lock: &GridLock) -> f64 {
        match lock {
            GridLock::Locked { lat_step } => *lat_step,
            GridLock::Unlocked => self.lat_step_for_zoom(zoom),
        }
    }

    /// Steps for the given view, honoring the lock.
    pub fn steps(&self, viewport: &Viewport, lock: &GridLock) -> Result<GridSteps, SizingError> {
        let lat = self.lat_step(viewport.zoom, lock);
        let lng = lng_step(lat, viewport.center_lat())?;
        Ok(GridSteps { lat, lng })
    }
}

/// `lat_step / cos(center_lat)`, rejecting non-finite results near the poles.
pub fn lng_step(lat_step: f64, center_lat_deg: f64) -> Result<f64, SizingError> {
    if !(lat_step.is_finite() && lat_step > 0.0) {
        return Err(SizingError::InvalidStep { step: lat_step });
    }
    let cos = center_lat_deg.to_radians().cos();
    if !(cos > f64::EPSILON) {
        return Err(SizingError::PolarDivergence {
            center_lat: center_lat_deg,
        });
    }
    let step = lat_step / cos;
    if !step.is_finite() {
        return Err(SizingError::PolarDivergence {
            center_lat: center_lat_deg,
        });
    }
    Ok(step)
}

#[cfg(test)]
mod tests {
    use super::{BASE_LAT_STEP, GridLock, SizingError, SizingPolicy, lng_step};
    use foundation::bounds::GeoBounds;
    use foundation::geo::Viewport;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn step_halves_per_zoom_level() {
        let p = SizingPolicy::default();
        assert_eq!(p.lat_step_for_zoom(19), BASE_LAT_STEP);
        assert_eq!(p.lat_step_for_zoom(18), BASE_LAT_STEP * 2.0);
        assert_eq!(p.lat_step_for_zoom(10), BASE_LAT_STEP * 512.0);
    }

    #[test]
    fn zoom_saturates_at_bounds() {
        let p = SizingPolicy::default();
        assert_eq!(p.lat_step_for_zoom(25), p.lat_step_for_zoom(19));
        assert_eq!(p.lat_step_for_zoom(-3), p.lat_step_for_zoom(0));
        assert_eq!(p.lat_step_for_zoom(0), BASE_LAT_STEP * 2f64.powi(19));
    }

    #[test]
    fn longitude_step_doubles_at_sixty_degrees() {
        let lat = 0.001;
        assert_close(lng_step(lat, 60.0).unwrap(), 2.0 * lat, 1e-15);
        assert_close(lng_step(lat, -60.0).unwrap(), 2.0 * lat, 1e-15);
        assert_eq!(lng_step(lat, 0.0).unwrap(), lat);
    }

    #[test]
    fn poles_are_rejected() {
        assert!(matches!(
            lng_step(0.001, 90.0),
            Err(SizingError::PolarDivergence { .. })
        ));
        assert!(matches!(
            lng_step(0.001, -90.0),
            Err(SizingError::PolarDivergence { .. })
        ));
        assert!(lng_step(0.001, 89.0).is_ok());
    }

    #[test]
    fn bad_steps_are_rejected() {
        assert!(matches!(
            lng_step(0.0, 10.0),
            Err(SizingError::InvalidStep { .. })
        ));
        assert!(matches!(
            lng_step(f64::NAN, 10.0),
            Err(SizingError::InvalidStep { .. })
        ));
    }

    #[test]
    fn lock_freezes_latitude_step_only() {
        let p = SizingPolicy::default();
        let mut lock = GridLock::default();
        lock.lock(&p, 10);
        let frozen = p.lat_step_for_zoom(10);

        let vp = Viewport::new(GeoBounds::new(59.9, 10.0, 60.1, 10.5), 15);
        let steps = p.steps(&vp, &lock).unwrap();
        assert_eq!(steps.lat, frozen);
        assert_close(steps.lng, frozen / 60f64.to_radians().cos(), 1e-12);

        // Same lock, different center: longitude follows the view.
        let vp = Viewport::new(GeoBounds::new(-0.1, 10.0, 0.1, 10.5), 15);
        let steps = p.steps(&vp, &lock).unwrap();
        assert_eq!(steps.lat, frozen);
        assert_close(steps.lng, frozen, 1e-12);
    }

    #[test]
    fn lock_is_idempotent_and_unlock_clears() {
        let p = SizingPolicy::default();
        let mut lock = GridLock::default();

        assert!(lock.set_locked(true, &p, 10));
        assert_eq!(lock.frozen_step(), Some(p.lat_step_for_zoom(10)));

        // Locking again at another zoom keeps the first capture.
        assert!(!lock.set_locked(true, &p, 15));
        assert_eq!(p.lat_step(15, &lock), p.lat_step_for_zoom(10));

        assert!(lock.set_locked(false, &p, 15));
        assert_eq!(lock.frozen_step(), None);
        assert!(!lock.is_locked());

        lock.set_locked(true, &p, 15);
        assert_eq!(p.lat_step(15, &lock), p.lat_step_for_zoom(15));
    }
}
