use crate::error::{GeometryError, Result};
use crate::geometry::Aabb2;
use crate::math::intersect_2d::line_line_intersect_2d;
use crate::math::polygon_2d::{left_normal, right_normal};
use crate::math::transform_2d::{AffineTransform2, CircleInversion};
use crate::math::{horizontal_angle, Point2, Vector2, ACCURACY};
use crate::tessellation::PathCommand;

use super::{Circle, CircleLine, Curve, CurveDomain};

/// An infinite line defined by an origin point and a direction vector.
///
/// The parametric form is `P(t) = origin + t * direction`, with a unit
/// direction so that `t` measures signed length from the origin.
///
/// Side convention: the *right* side (looking along the direction) is the
/// one a positive [`parallel`](Self::parallel) distance moves toward. The
/// left half-plane is the line's *inside*.
#[derive(Debug, Clone, PartialEq)]
pub struct StraightLine {
    origin: Point2,
    direction: Vector2,
}

impl StraightLine {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the direction is shorter than `ACCURACY`.
    pub fn new(origin: Point2, direction: Vector2) -> Result<Self> {
        let len = direction.norm();
        if len < ACCURACY || !len.is_finite() {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Line through two points, directed from `p1` to `p2`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the points coincide.
    pub fn through(p1: &Point2, p2: &Point2) -> Result<Self> {
        Self::new(*p1, p2 - p1)
    }

    /// Line through `origin` whose direction makes `angle` radians with +X.
    #[must_use]
    pub fn from_angle(origin: Point2, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            origin,
            direction: Vector2::new(c, s),
        }
    }

    /// Line of equation `a*x + b*y + c = 0`.
    ///
    /// The origin is the point of the line closest to the coordinate origin.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if `a` and `b` are both zero.
    pub fn from_cartesian(a: f64, b: f64, c: f64) -> Result<Self> {
        let d = a * a + b * b;
        if d < ACCURACY {
            return Err(GeometryError::Degenerate(
                "cartesian line needs a non-zero normal".into(),
            )
            .into());
        }
        let theta = (-a).atan2(b);
        Ok(Self::from_angle(Point2::new(-a * c / d, -b * c / d), theta))
    }

    /// Perpendicular bisector of `p1` and `p2`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the points coincide.
    pub fn median(p1: &Point2, p2: &Point2) -> Result<Self> {
        let mid = nalgebra::center(p1, p2);
        Ok(Self::through(p1, p2)?.perpendicular(&mid))
    }

    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    /// Direction angle in `[0, 2π)`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        horizontal_angle(&self.direction)
    }

    /// Coefficients `(a, b, c)` of `a*x + b*y + c = 0`, with `(a, b)` unit.
    #[must_use]
    pub fn cartesian_coefficients(&self) -> (f64, f64, f64) {
        let d = &self.direction;
        let o = &self.origin;
        (-d.y, d.x, o.x * d.y - o.y * d.x)
    }

    /// Parameter of the orthogonal projection of `point` onto the line.
    #[must_use]
    pub fn position(&self, point: &Point2) -> f64 {
        (point - self.origin).dot(&self.direction)
    }

    /// Closest point on the line.
    #[must_use]
    pub fn project(&self, point: &Point2) -> Point2 {
        self.origin + self.direction * self.position(point)
    }

    /// Perpendicular distance from `point`; never negative.
    #[must_use]
    pub fn distance(&self, point: &Point2) -> f64 {
        (point - self.project(point)).norm()
    }

    /// Distance from `point`, positive on the right side.
    #[must_use]
    pub fn signed_distance(&self, point: &Point2) -> f64 {
        (point - self.origin).dot(&right_normal(&self.direction))
    }

    /// Returns `true` if `point` lies on the line within `ACCURACY`.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        self.distance(point) < ACCURACY
    }

    /// Returns `true` if `point` lies strictly in the left half-plane.
    #[must_use]
    pub fn is_inside(&self, point: &Point2) -> bool {
        self.signed_distance(point) < 0.0
    }

    /// Line translated by `d` along its unit normal; positive `d` moves right.
    #[must_use]
    pub fn parallel(&self, d: f64) -> Self {
        Self {
            origin: self.origin + right_normal(&self.direction) * d,
            direction: self.direction,
        }
    }

    /// Line with the same direction passing through `point`.
    #[must_use]
    pub fn parallel_through(&self, point: &Point2) -> Self {
        Self {
            origin: *point,
            direction: self.direction,
        }
    }

    /// Line through `point` whose direction is this one rotated by +90°.
    #[must_use]
    pub fn perpendicular(&self, point: &Point2) -> Self {
        Self {
            origin: *point,
            direction: left_normal(&self.direction),
        }
    }

    /// Intersection with another infinite line.
    ///
    /// Returns `None` when the lines are parallel or coincident, i.e. when the
    /// determinant of their directions is below `ACCURACY`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Point2> {
        let (t, _) = line_line_intersect_2d(
            &self.origin,
            &self.direction,
            &other.origin,
            &other.direction,
        )?;
        Some(self.origin + self.direction * t)
    }

    /// Same origin, opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            origin: self.origin,
            direction: -self.direction,
        }
    }

    /// Component-wise comparison of origin and direction.
    #[must_use]
    pub fn almost_equals(&self, other: &Self, eps: f64) -> bool {
        (self.origin - other.origin).amax() <= eps
            && (self.direction - other.direction).amax() <= eps
    }

    /// Image under an affine map.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the map collapses the direction.
    pub fn transform(&self, trans: &AffineTransform2) -> Result<Self> {
        Self::new(
            trans.apply_point(&self.origin),
            trans.apply_vector(&self.direction),
        )
    }

    /// Image under a circle inversion.
    ///
    /// A line through the inversion center maps to itself; any other line
    /// maps to a circle through the center.
    #[must_use]
    pub fn invert(&self, inversion: &CircleInversion) -> CircleLine {
        let center = inversion.center();
        let foot = self.project(center);
        let dist = (foot - center).norm();

        if dist < ACCURACY {
            return CircleLine::Line(self.clone());
        }

        let r = inversion.radius();
        let radius = r * r / dist / 2.0;
        let toward_line = (foot - center) / dist;
        let image_center = center + toward_line * radius;

        // Inversion reverses orientation: the left half-plane maps into the
        // disk, so the circle is direct only when the center lies on the left.
        let direct = self.is_inside(center);
        CircleLine::Circle(Circle::from_parts(image_center, radius, direct))
    }

    /// Lines have no finite path representation.
    ///
    /// # Errors
    ///
    /// Always returns `GeometryError::Unbounded`.
    pub fn append_path(&self, _path: &mut Vec<PathCommand>) -> Result<()> {
        Err(GeometryError::Unbounded {
            shape: self.shape_name(),
        }
        .into())
    }
}

impl Curve for StraightLine {
    fn point_at(&self, t: f64) -> Result<Point2> {
        self.domain().check(t)?;
        Ok(self.origin + self.direction * t)
    }

    fn tangent_at(&self, _t: f64) -> Result<Vector2> {
        Ok(self.direction)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn length(&self) -> f64 {
        f64::INFINITY
    }

    fn bounding_box(&self) -> Aabb2 {
        let o = &self.origin;
        if self.direction.x.abs() < ACCURACY {
            Aabb2::new(o.x, o.x, f64::NEG_INFINITY, f64::INFINITY)
        } else if self.direction.y.abs() < ACCURACY {
            Aabb2::new(f64::NEG_INFINITY, f64::INFINITY, o.y, o.y)
        } else {
            Aabb2::infinite()
        }
    }

    fn shape_name(&self) -> &'static str {
        "straight line"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CirculinearError;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_4;

    fn horizontal() -> StraightLine {
        StraightLine::through(&Point2::new(0.0, 0.0), &Point2::new(10.0, 0.0)).unwrap()
    }

    #[test]
    fn zero_direction_is_rejected() {
        let err = StraightLine::new(Point2::origin(), Vector2::zeros()).unwrap_err();
        assert!(matches!(
            err,
            CirculinearError::Geometry(GeometryError::ZeroVector)
        ));
        assert!(StraightLine::through(&Point2::new(1.0, 1.0), &Point2::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn defining_points_are_on_the_line() {
        let a = Point2::new(-3.5, 12.25);
        let b = Point2::new(7.0, -1.5);
        let line = StraightLine::through(&a, &b).unwrap();
        assert!(line.distance(&a) < ACCURACY);
        assert!(line.distance(&b) < ACCURACY);
    }

    #[test]
    fn positive_parallel_moves_right() {
        let line = horizontal().parallel(30.0);
        // Looking along +X, the right side is -Y.
        assert_abs_diff_eq!(line.origin().y, -30.0, epsilon = 1e-12);
        assert_abs_diff_eq!(line.signed_distance(&Point2::new(5.0, -30.0)), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(horizontal().signed_distance(&Point2::new(0.0, -2.0)), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_keeps_constant_distance() {
        let base = StraightLine::through(&Point2::new(1.0, 2.0), &Point2::new(4.0, 6.0)).unwrap();
        for d in [-7.5, -1.0, 0.0, 2.0, 30.0] {
            let par = base.parallel(d);
            for t in [-100.0, 0.0, 3.3, 250.0] {
                let p = par.point_at(t).unwrap();
                assert_abs_diff_eq!(base.distance(&p), d.abs(), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn projection_and_position() {
        let line = horizontal();
        let p = Point2::new(3.0, 4.0);
        assert_abs_diff_eq!(line.project(&p), Point2::new(3.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(line.position(&p), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(line.distance(&p), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn intersection_of_crossing_lines() {
        let a = horizontal();
        let b = StraightLine::from_angle(Point2::new(2.0, -2.0), FRAC_PI_4);
        let p = a.intersection(&b).unwrap();
        assert_abs_diff_eq!(p, Point2::new(4.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let a = horizontal();
        assert!(a.intersection(&a.parallel(5.0)).is_none());
        assert!(a.intersection(&a).is_none());
        assert!(a.intersection(&a.reversed()).is_none());
    }

    #[test]
    fn perpendicular_is_rotated_ccw() {
        let perp = horizontal().perpendicular(&Point2::new(5.0, 5.0));
        assert_abs_diff_eq!(*perp.direction(), Vector2::new(0.0, 1.0), epsilon = 1e-12);
        assert!(perp.contains(&Point2::new(5.0, -20.0)));
    }

    #[test]
    fn cartesian_round_trip() {
        // 2x - y + 4 = 0  <=>  y = 2x + 4
        let line = StraightLine::from_cartesian(2.0, -1.0, 4.0).unwrap();
        assert!(line.contains(&Point2::new(0.0, 4.0)));
        assert!(line.contains(&Point2::new(-2.0, 0.0)));
        let (a, b, c) = line.cartesian_coefficients();
        let scale = a / 2.0;
        assert_abs_diff_eq!(b, -scale, epsilon = 1e-12);
        assert_abs_diff_eq!(c, 4.0 * scale, epsilon = 1e-12);
        assert!(StraightLine::from_cartesian(0.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn median_is_equidistant() {
        let a = Point2::new(1.0, 1.0);
        let b = Point2::new(5.0, 3.0);
        let m = StraightLine::median(&a, &b).unwrap();
        let p = m.point_at(17.0).unwrap();
        assert_abs_diff_eq!((p - a).norm(), (p - b).norm(), epsilon = 1e-9);
    }

    #[test]
    fn unbounded_operations_fail_fast() {
        let line = horizontal();
        for result in [line.first_point(), line.last_point()] {
            assert!(matches!(
                result,
                Err(CirculinearError::Geometry(GeometryError::Unbounded { .. }))
            ));
        }
        assert!(line.as_polyline(8).is_err());
        assert!(line.append_path(&mut Vec::new()).is_err());
        assert!(!line.is_bounded());
    }

    #[test]
    fn bounding_box_of_horizontal_line() {
        let bbox = horizontal().parallel(-3.0).bounding_box();
        assert_abs_diff_eq!(bbox.min.y, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bbox.max.y, 3.0, epsilon = 1e-12);
        assert!(bbox.min.x.is_infinite());
    }

    #[test]
    fn affine_transform_of_line() {
        let t = AffineTransform2::rotation(std::f64::consts::FRAC_PI_2);
        let line = horizontal().parallel(-1.0).transform(&t).unwrap();
        // y = 1 rotated by 90° becomes x = -1, directed upward.
        assert!(line.contains(&Point2::new(-1.0, 42.0)));
        assert_abs_diff_eq!(*line.direction(), Vector2::new(0.0, 1.0), epsilon = 1e-12);
        assert!(horizontal().transform(&AffineTransform2::scaling(0.0, 1.0)).is_err());
    }

    #[test]
    fn inversion_of_line_through_center_is_identity() {
        let inv = CircleInversion::new(Point2::new(4.0, 0.0), 3.0).unwrap();
        match horizontal().invert(&inv) {
            CircleLine::Line(l) => assert!(l.almost_equals(&horizontal(), 1e-12)),
            CircleLine::Circle(_) => panic!("expected a line"),
        }
    }

    #[test]
    fn inversion_of_line_gives_circle_through_center() {
        let inv = CircleInversion::new(Point2::origin(), 2.0).unwrap();
        let line = horizontal().parallel(-1.0); // y = 1, center on the right
        let CircleLine::Circle(circle) = line.invert(&inv) else {
            panic!("expected a circle");
        };
        assert_abs_diff_eq!(circle.radius(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(*circle.center(), Point2::new(0.0, 2.0), epsilon = 1e-12);
        assert!(!circle.is_direct());
        // The foot of the perpendicular maps onto the circle.
        let foot_image = inv.apply_point(&Point2::new(0.0, 1.0)).unwrap();
        assert_abs_diff_eq!((foot_image - circle.center()).norm(), 2.0, epsilon = 1e-12);
    }
}
