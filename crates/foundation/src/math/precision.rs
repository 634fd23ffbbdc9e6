//! Float tolerance helpers shared by the projection and zoom code.

use core::cmp::Ordering;

/// Extents at or below this size (pixels or radians) are treated as empty.
pub const EXTENT_EPSILON: f64 = 1e-9;

/// Returns `true` when `a` and `b` differ by at most `eps`.
#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Returns `true` for finite, strictly positive extents.
#[inline]
pub fn is_positive_extent(v: f64) -> bool {
    v.is_finite() && v > EXTENT_EPSILON
}

/// Deterministic total ordering for floats.
///
/// `-0.0` compares equal to `0.0` and every NaN sorts after all numbers.
pub fn stable_total_cmp_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let a = if a == 0.0 { 0.0 } else { a };
            let b = if b == 0.0 { 0.0 } else { b };
            a.total_cmp(&b)
        }
    }
}
