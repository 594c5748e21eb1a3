//! Epsilon snapping for intersection arithmetic.
//!
//! Dot products and quadratic discriminants that should be exactly zero
//! (a ray in a plane, a tangent ray) come out as tiny residues in floating
//! point. Snapping them to zero turns those cases into clean "no hit" results.

/// Magnitudes below this are treated as exactly zero.
pub const EPSILON: f64 = 1e-12;

/// Returns true if `x` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Returns 0.0 when `x` is within [`EPSILON`] of zero, otherwise `x` unchanged.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}
