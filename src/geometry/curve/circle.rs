use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::geometry::Aabb2;
use crate::math::transform_2d::CircleInversion;
use crate::math::{horizontal_angle, normalize_angle, Point2, Vector2, ACCURACY};

use super::{CircularArc, Curve, CurveDomain, StraightLine};

/// A full oriented circle.
///
/// The parameter `t` in `[0, 2π)` is the angle travelled from the +X
/// direction along the circle's orientation (clockwise for indirect circles).
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Point2,
    radius: f64,
    direct: bool,
}

/// Result of mapping a line or circle through a circle inversion.
#[derive(Debug, Clone, PartialEq)]
pub enum CircleLine {
    Line(StraightLine),
    Circle(Circle),
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the radius is not positive.
    pub fn new(center: Point2, radius: f64, direct: bool) -> Result<Self> {
        if radius < ACCURACY || !radius.is_finite() {
            return Err(GeometryError::Degenerate("circle radius must be positive".into()).into());
        }
        Ok(Self::from_parts(center, radius, direct))
    }

    /// Builds a circle whose radius the caller has already validated.
    pub(crate) fn from_parts(center: Point2, radius: f64, direct: bool) -> Self {
        Self {
            center,
            radius,
            direct,
        }
    }

    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// `true` for counter-clockwise orientation.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.direct
    }

    fn signed_angle(&self, t: f64) -> f64 {
        if self.direct {
            t
        } else {
            -t
        }
    }

    /// Parameter of the radial projection of `point` onto the circle.
    #[must_use]
    pub fn position(&self, point: &Point2) -> f64 {
        let angle = horizontal_angle(&(point - self.center));
        normalize_angle(self.signed_angle(angle))
    }

    /// Full-turn arc starting at angle zero with the circle's orientation.
    #[must_use]
    pub fn as_arc(&self) -> CircularArc {
        let extent = if self.direct { TAU } else { -TAU };
        CircularArc::from_parts(self.center, self.radius, 0.0, extent)
    }

    /// Returns the circle traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::from_parts(self.center, self.radius, !self.direct)
    }

    /// Image under a circle inversion.
    ///
    /// A circle through the inversion center maps to a line.
    #[must_use]
    pub fn invert(&self, inversion: &CircleInversion) -> CircleLine {
        let o = inversion.center();
        let k = inversion.radius() * inversion.radius();
        let offset = self.center - o;
        let dist = offset.norm();
        let axis = if dist < ACCURACY {
            Vector2::x()
        } else {
            offset / dist
        };

        if (dist - self.radius).abs() < ACCURACY {
            // The disk maps onto the half-plane away from the inversion center,
            // which ends up on the right of a direct image line.
            let origin = o + axis * (k / (2.0 * self.radius));
            let direction = if self.direct {
                Vector2::new(-axis.y, axis.x)
            } else {
                Vector2::new(axis.y, -axis.x)
            };
            return match StraightLine::new(origin, direction) {
                Ok(line) => CircleLine::Line(line),
                Err(_) => CircleLine::Circle(self.clone()),
            };
        }

        // Images of the two circle points on the axis through the centers.
        let near = k / (dist - self.radius);
        let far = k / (dist + self.radius);
        let image_center = o + axis * ((near + far) / 2.0);
        let image_radius = (near - far).abs() / 2.0;

        // Orientation flips unless the inversion center lies inside the disk.
        let center_inside = dist < self.radius;
        let direct = if center_inside {
            self.direct
        } else {
            !self.direct
        };
        CircleLine::Circle(Self::from_parts(image_center, image_radius, direct))
    }
}

impl Curve for Circle {
    fn point_at(&self, t: f64) -> Result<Point2> {
        let angle = self.signed_angle(t);
        Ok(Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        ))
    }

    fn tangent_at(&self, t: f64) -> Result<Vector2> {
        let angle = self.signed_angle(t);
        let sign = if self.direct { 1.0 } else { -1.0 };
        Ok(Vector2::new(-sign * angle.sin(), sign * angle.cos()))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn length(&self) -> f64 {
        TAU * self.radius
    }

    fn bounding_box(&self) -> Aabb2 {
        Aabb2::new(
            self.center.x - self.radius,
            self.center.x + self.radius,
            self.center.y - self.radius,
            self.center.y + self.radius,
        )
    }

    fn shape_name(&self) -> &'static str {
        "circle"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn invalid_radius() {
        assert!(Circle::new(Point2::origin(), 0.0, true).is_err());
        assert!(Circle::new(Point2::origin(), -1.0, true).is_err());
    }

    #[test]
    fn indirect_circle_runs_clockwise() {
        let c = Circle::new(Point2::origin(), 2.0, false).unwrap();
        let p = c.point_at(FRAC_PI_2).unwrap();
        assert_abs_diff_eq!(p, Point2::new(0.0, -2.0), epsilon = 1e-12);
        assert_abs_diff_eq!(c.position(&p), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn circle_through_center_inverts_to_line() {
        let inv = CircleInversion::new(Point2::origin(), 2.0).unwrap();
        let circle = Circle::new(Point2::new(0.0, 2.0), 2.0, true).unwrap();
        let CircleLine::Line(line) = circle.invert(&inv) else {
            panic!("expected a line");
        };
        assert!(line.contains(&Point2::new(7.0, 1.0)));
        // Round trip through the line inversion restores the circle.
        let CircleLine::Circle(back) = line.invert(&inv) else {
            panic!("expected a circle");
        };
        assert_abs_diff_eq!(*back.center(), *circle.center(), epsilon = 1e-12);
        assert!(back.is_direct());
    }

    #[test]
    fn concentric_circle_inverts_to_concentric_circle() {
        let inv = CircleInversion::new(Point2::origin(), 3.0).unwrap();
        let circle = Circle::new(Point2::origin(), 1.0, true).unwrap();
        let CircleLine::Circle(image) = circle.invert(&inv) else {
            panic!("expected a circle");
        };
        assert_abs_diff_eq!(image.radius(), 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(image.center().coords.norm(), 0.0, epsilon = 1e-12);
        assert!(image.is_direct());
    }

    #[test]
    fn outside_circle_image_matches_point_images() {
        let inv = CircleInversion::new(Point2::origin(), 2.0).unwrap();
        let circle = Circle::new(Point2::new(5.0, 0.0), 1.0, true).unwrap();
        let CircleLine::Circle(image) = circle.invert(&inv) else {
            panic!("expected a circle");
        };
        assert!(!image.is_direct());
        for t in [0.3, 1.7, 4.0] {
            let p = circle.point_at(t).unwrap();
            let q = inv.apply_point(&p).unwrap();
            assert_abs_diff_eq!((q - image.center()).norm(), image.radius(), epsilon = 1e-9);
        }
    }
}
