//! Scalar helpers shared by the vector and matrix types
//!
//! The kernel itself only uses the tolerance constants. Rounding and angle
//! conversion are here for callers that format or build transforms.

/// Floating point epsilon for single precision "effectively zero" checks
pub const EPSILON: f32 = 0.00001;

/// [`EPSILON`] squared, for comparisons against squared lengths
pub const EPSILON_SQUARED: f32 = EPSILON * EPSILON;

/// Round `x` to `places` decimal places
///
/// Halfway cases round towards positive infinity, so `-2.5` rounds to `-2`.
/// Negative `places` rounds to tens, hundreds, and so on. If `places` is so
/// large that the scaling overflows, `x` is returned unchanged.
#[inline]
pub fn round(x: f32, places: i32) -> f32 {
    let factor = 10f32.powi(places);
    let rounded = (x * factor + 0.5).floor() / factor;
    if factor.is_finite() && factor != 0.0 && rounded.is_finite() {
        rounded
    } else {
        x
    }
}

/// Convert degrees to radians
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Convert radians to degrees
#[inline]
pub fn to_degrees(radians: f32) -> f32 {
    radians / (std::f32::consts::PI / 180.0)
}

/// True if `a` and `b` differ by less than `epsilon`
#[inline]
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}
