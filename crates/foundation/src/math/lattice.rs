//! World-fixed lattice arithmetic.
//!
//! A lattice with spacing `step` has lines at `k * step` for every integer `k`.
//! Coordinates are always derived from the integer index, never accumulated,
//! so two callers that agree on `step` agree on every line bit for bit.

/// Index of the lattice line at or below `value`.
#[inline]
pub fn lattice_index(value: f64, step: f64) -> i64 {
    let k = (value / step).floor() as i64;
    // The quotient can round up across an integer; the line must not pass `value`.
    if lattice_coord(k, step) > value {
        k - 1
    } else {
        k
    }
}

/// Number of lattice lines `k >= first` with `lattice_coord(k) < edge`.
pub fn lines_below(first: i64, edge: f64, step: f64) -> i64 {
    let estimate = (edge / step).ceil() as i64;
    let mut n = estimate.saturating_sub(first).max(0);
    while n > 0 && lattice_coord(first + n - 1, step) >= edge {
        n -= 1;
    }
    while lattice_coord(first + n, step) < edge {
        n += 1;
    }
    n
}

/// Coordinate of lattice line `index`.
#[inline]
pub fn lattice_coord(index: i64, step: f64) -> f64 {
    index as f64 * step
}
