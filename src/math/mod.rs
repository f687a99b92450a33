pub mod arc_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod transform_2d;

use std::f64::consts::TAU;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3x3 homogeneous matrix for planar affine maps.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Global absolute tolerance for equality, parallelism and degeneracy tests.
///
/// The value is not scaled with coordinate magnitude.
pub const ACCURACY: f64 = 1e-12;

/// Returns `true` if `a` and `b` differ by less than [`ACCURACY`].
#[must_use]
pub fn almost_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < ACCURACY
}

/// Returns `true` if the two points are within [`ACCURACY`] of each other.
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2) -> bool {
    (a - b).norm() < ACCURACY
}

/// Returns `true` if the vector is shorter than [`ACCURACY`].
#[must_use]
pub fn is_zero(v: &Vector2) -> bool {
    v.norm() < ACCURACY
}

/// Wraps an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle % TAU;
    let a = if a < 0.0 { a + TAU } else { a };
    // `-tiny % TAU + TAU` rounds to exactly TAU.
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Angle of a vector measured counter-clockwise from the +X axis, in `[0, 2π)`.
#[must_use]
pub fn horizontal_angle(v: &Vector2) -> f64 {
    normalize_angle(v.y.atan2(v.x))
}

/// Counter-clockwise angle needed to rotate direction `from` onto `to`, in `[0, 2π)`.
#[must_use]
pub fn angle_between(from: &Vector2, to: &Vector2) -> f64 {
    normalize_angle(horizontal_angle(to) - horizontal_angle(from))
}

/// 2D cross product `a.x * b.y - a.y * b.x`.
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn normalize_wraps_negative() {
        assert_abs_diff_eq!(normalize_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2, epsilon = 1e-15);
        assert_abs_diff_eq!(normalize_angle(TAU + 1.0), 1.0, epsilon = 1e-14);
        assert!(normalize_angle(-1e-20) < TAU);
    }

    #[test]
    fn angle_between_right_turn_exceeds_pi() {
        let east = Vector2::new(1.0, 0.0);
        let south = Vector2::new(0.0, -1.0);
        let north = Vector2::new(0.0, 1.0);
        assert_abs_diff_eq!(angle_between(&east, &north), FRAC_PI_2, epsilon = 1e-15);
        assert!(angle_between(&east, &south) > PI);
    }

    #[test]
    fn coincidence_uses_accuracy() {
        let a = Point2::new(1.0, 1.0);
        assert!(points_coincide(&a, &Point2::new(1.0, 1.0 + 1e-13)));
        assert!(!points_coincide(&a, &Point2::new(1.0, 1.0 + 1e-9)));
    }
}
