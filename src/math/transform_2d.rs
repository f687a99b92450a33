use crate::error::{GeometryError, Result};

use super::{Matrix3, Point2, Vector2, ACCURACY};

/// A planar affine map stored as a 3x3 homogeneous matrix.
///
/// The last row is always `[0, 0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform2 {
    matrix: Matrix3,
}

/// Scale and handedness of a transform that preserves angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    /// Uniform scale factor (always positive).
    pub scale: f64,
    /// `true` if the map mirrors the plane (negative determinant).
    pub reflects: bool,
}

impl AffineTransform2 {
    /// Creates a transform from the six coefficients of
    /// `x' = m00*x + m01*y + m02`, `y' = m10*x + m11*y + m12`.
    #[must_use]
    pub fn new(m00: f64, m01: f64, m02: f64, m10: f64, m11: f64, m12: f64) -> Self {
        Self {
            matrix: Matrix3::new(m00, m01, m02, m10, m11, m12, 0.0, 0.0, 1.0),
        }
    }

    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    #[must_use]
    pub fn translation(v: &Vector2) -> Self {
        Self::new(1.0, 0.0, v.x, 0.0, 1.0, v.y)
    }

    /// Counter-clockwise rotation by `angle` radians about the coordinate origin.
    #[must_use]
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, -s, 0.0, s, c, 0.0)
    }

    /// Counter-clockwise rotation by `angle` radians about `center`.
    #[must_use]
    pub fn rotation_about(center: &Point2, angle: f64) -> Self {
        Self::translation(&center.coords)
            .compose(&Self::rotation(angle))
            .compose(&Self::translation(&-center.coords))
    }

    #[must_use]
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    /// Returns the homogeneous matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// Returns `self ∘ other`: `other` is applied first.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Returns the inverse map.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the linear part is singular.
    pub fn inverse(&self) -> Result<Self> {
        if self.determinant().abs() < ACCURACY {
            return Err(GeometryError::Degenerate("affine transform is singular".into()).into());
        }
        let matrix = self.matrix.try_inverse().ok_or_else(|| {
            GeometryError::Degenerate("affine transform is singular".into())
        })?;
        Ok(Self { matrix })
    }

    /// Determinant of the linear part.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let m = &self.matrix;
        m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)]
    }

    /// Returns the scale and handedness if the map preserves angles.
    #[must_use]
    pub fn similarity(&self) -> Option<Similarity> {
        let m = &self.matrix;
        let col0 = Vector2::new(m[(0, 0)], m[(1, 0)]);
        let col1 = Vector2::new(m[(0, 1)], m[(1, 1)]);
        let s0 = col0.norm_squared();
        let s1 = col1.norm_squared();
        let tol = ACCURACY * s0.max(s1).max(1.0);
        if s0 < ACCURACY || (s0 - s1).abs() > tol || col0.dot(&col1).abs() > tol {
            return None;
        }
        Some(Similarity {
            scale: s0.sqrt(),
            reflects: self.determinant() < 0.0,
        })
    }

    #[must_use]
    pub fn apply_point(&self, p: &Point2) -> Point2 {
        let m = &self.matrix;
        Point2::new(
            m[(0, 0)] * p.x + m[(0, 1)] * p.y + m[(0, 2)],
            m[(1, 0)] * p.x + m[(1, 1)] * p.y + m[(1, 2)],
        )
    }

    /// Applies the linear part only.
    #[must_use]
    pub fn apply_vector(&self, v: &Vector2) -> Vector2 {
        let m = &self.matrix;
        Vector2::new(
            m[(0, 0)] * v.x + m[(0, 1)] * v.y,
            m[(1, 0)] * v.x + m[(1, 1)] * v.y,
        )
    }
}

impl Default for AffineTransform2 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Inversion in a circle: `p ↦ c + r² (p - c) / |p - c|²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleInversion {
    center: Point2,
    radius: f64,
}

impl CircleInversion {
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if `radius` is not positive.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if radius < ACCURACY || !radius.is_finite() {
            return Err(
                GeometryError::Degenerate("inversion radius must be positive".into()).into(),
            );
        }
        Ok(Self { center, radius })
    }

    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Inverts a point. The inversion center has no finite image.
    #[must_use]
    pub fn apply_point(&self, p: &Point2) -> Option<Point2> {
        let v = p - self.center;
        let d2 = v.norm_squared();
        if d2 < ACCURACY * ACCURACY {
            return None;
        }
        Some(self.center + v * (self.radius * self.radius / d2))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn rotation_about_center_fixes_center() {
        let c = Point2::new(3.0, 4.0);
        let t = AffineTransform2::rotation_about(&c, FRAC_PI_2);
        let p = t.apply_point(&c);
        assert_abs_diff_eq!(p, c, epsilon = 1e-12);
        let q = t.apply_point(&Point2::new(4.0, 4.0));
        assert_abs_diff_eq!(q, Point2::new(3.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn compose_applies_right_operand_first() {
        let t = AffineTransform2::translation(&Vector2::new(1.0, 0.0))
            .compose(&AffineTransform2::scaling(2.0, 2.0));
        let p = t.apply_point(&Point2::new(1.0, 1.0));
        assert_abs_diff_eq!(p, Point2::new(3.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn inverse_round_trips() {
        let t = AffineTransform2::new(2.0, 1.0, 5.0, 0.5, 3.0, -1.0);
        let inv = t.inverse().unwrap();
        let p = Point2::new(7.0, -2.0);
        assert_abs_diff_eq!(inv.apply_point(&t.apply_point(&p)), p, epsilon = 1e-12);
    }

    #[test]
    fn singular_transform_has_no_inverse() {
        assert!(AffineTransform2::scaling(1.0, 0.0).inverse().is_err());
    }

    #[test]
    fn similarity_detection() {
        let rot = AffineTransform2::rotation(0.3).similarity().unwrap();
        assert_abs_diff_eq!(rot.scale, 1.0, epsilon = 1e-12);
        assert!(!rot.reflects);

        let mirror = AffineTransform2::scaling(-2.0, 2.0).similarity().unwrap();
        assert_abs_diff_eq!(mirror.scale, 2.0, epsilon = 1e-12);
        assert!(mirror.reflects);

        assert!(AffineTransform2::scaling(1.0, 2.0).similarity().is_none());
    }

    #[test]
    fn inversion_of_points() {
        let inv = CircleInversion::new(Point2::origin(), 2.0).unwrap();
        let p = inv.apply_point(&Point2::new(4.0, 0.0)).unwrap();
        assert_abs_diff_eq!(p, Point2::new(1.0, 0.0), epsilon = 1e-12);
        assert!(inv.apply_point(&Point2::origin()).is_none());
        assert!(CircleInversion::new(Point2::origin(), 0.0).is_err());
    }
}
