use nalgebra::{Matrix3, Vector3};

/// Point on a horizontal ring of radius `length` at `angle` (rad) from the body x axis.
#[inline]
pub fn ring_location(length: f64, angle: f64) -> Vector3<f64> {
    Vector3::new(length * angle.cos(), length * angle.sin(), 0.0)
}

/// Inertia tensor of a point mass at offset `r` from the reference point.
///
/// Uses the `I = m (|r|^2 E - r r^T)` convention, so products of inertia
/// appear negated off the diagonal.
pub fn point_mass_inertia(mass: f64, r: &Vector3<f64>) -> Matrix3<f64> {
    (Matrix3::identity() * r.norm_squared() - r * r.transpose()) * mass
}

/// Inertia tensor of a solid box about its own centre.
pub fn box_inertia(mass: f64, dimensions: [f64; 3]) -> Matrix3<f64> {
    let [a, b, c] = dimensions;
    Matrix3::from_diagonal(&Vector3::new(
        mass / 12.0 * (b * b + c * c),
        mass / 12.0 * (a * a + c * c),
        mass / 12.0 * (a * a + b * b),
    ))
}

/// Map an unbounded variable onto `[lo, hi]`.
#[inline]
pub fn to_bounded(z: f64, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * 0.5 * (1.0 + z.sin())
}

/// Inverse of [`to_bounded`]; values outside the range are clamped first.
#[inline]
pub fn to_unbounded(x: f64, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return 0.0;
    }
    (2.0 * (x - lo) / (hi - lo) - 1.0).clamp(-1.0, 1.0).asin()
}

/// Derivative of [`to_bounded`] with respect to `z`.
#[inline]
pub fn bounded_derivative(z: f64, lo: f64, hi: f64) -> f64 {
    (hi - lo) * 0.5 * z.cos()
}
