//! Floating-point comparison helpers.

use sr_core::Real;

/// `|a − b| <= tolerance · max(|a|, |b|, 1)`.
///
/// Relative for large magnitudes, absolute near zero. Time grids use it to
/// decide whether two grid points coincide.
#[inline]
pub fn close(a: Real, b: Real, tolerance: Real) -> bool {
    (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0)
}
