use crate::error::{GeometryError, Result};
use crate::geometry::Aabb2;
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::polygon_2d::right_normal;
use crate::math::transform_2d::AffineTransform2;
use crate::math::{Point2, Vector2, ACCURACY};

use super::{Curve, CurveDomain, StraightLine};

/// A bounded straight segment from `start` to `end`.
///
/// A segment whose endpoints coincide is allowed; it behaves as a point and
/// has no direction.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    start: Point2,
    end: Point2,
}

impl LineSegment {
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }

    /// Vector from start to end (not normalized).
    #[must_use]
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    /// Returns `true` if the endpoints coincide within `ACCURACY`.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.vector().norm() < ACCURACY
    }

    /// The infinite line through the segment, directed from start to end.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` for a degenerate segment.
    pub fn supporting_line(&self) -> Result<StraightLine> {
        StraightLine::through(&self.start, &self.end)
    }

    /// Minimum distance from `point` to the segment.
    #[must_use]
    pub fn distance(&self, point: &Point2) -> f64 {
        point_to_segment_dist(point, &self.start, &self.end)
    }

    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        self.distance(point) < ACCURACY
    }

    /// Bounded intersection with another segment.
    ///
    /// Parallel and collinear segments yield `None`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Point2> {
        segment_segment_intersect_2d(&self.start, &self.end, &other.start, &other.end)
            .map(|(p, _, _)| p)
    }

    /// Segment translated by `d` along its right normal.
    ///
    /// Returns `None` for a degenerate segment, which has no normal.
    #[must_use]
    pub fn parallel(&self, d: f64) -> Option<Self> {
        if self.is_degenerate() {
            return None;
        }
        let shift = right_normal(&self.vector().normalize()) * d;
        Some(Self::new(self.start + shift, self.end + shift))
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    #[must_use]
    pub fn transform(&self, trans: &AffineTransform2) -> Self {
        Self::new(trans.apply_point(&self.start), trans.apply_point(&self.end))
    }
}

impl Curve for LineSegment {
    fn point_at(&self, t: f64) -> Result<Point2> {
        self.domain().check(t)?;
        Ok(self.start + self.vector() * t.clamp(0.0, 1.0))
    }

    fn tangent_at(&self, t: f64) -> Result<Vector2> {
        self.domain().check(t)?;
        if self.is_degenerate() {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(self.vector().normalize())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn length(&self) -> f64 {
        self.vector().norm()
    }

    fn bounding_box(&self) -> Aabb2 {
        Aabb2::new(self.start.x, self.end.x, self.start.y, self.end.y)
    }

    fn shape_name(&self) -> &'static str {
        "line segment"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> LineSegment {
        LineSegment::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    #[test]
    fn length_3_4_5() {
        assert_abs_diff_eq!(seg(0.0, 0.0, 3.0, 4.0).length(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn crossing_segments_intersect() {
        let p = seg(0.0, 0.0, 2.0, 2.0)
            .intersection(&seg(0.0, 2.0, 2.0, 0.0))
            .unwrap();
        assert_abs_diff_eq!(p, Point2::new(1.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn disjoint_segments_on_crossing_lines() {
        assert!(seg(0.0, 0.0, 1.0, 0.0)
            .intersection(&seg(2.0, -1.0, 2.0, 1.0))
            .is_none());
    }

    #[test]
    fn parallel_segment_moves_right() {
        let par = seg(100.0, 100.0, 200.0, 100.0).parallel(30.0).unwrap();
        assert_abs_diff_eq!(*par.start(), Point2::new(100.0, 70.0), epsilon = 1e-12);
        assert_abs_diff_eq!(*par.end(), Point2::new(200.0, 70.0), epsilon = 1e-12);
    }

    #[test]
    fn degenerate_segment_is_tolerated() {
        let s = seg(1.0, 1.0, 1.0, 1.0);
        assert!(s.is_degenerate());
        assert!(s.parallel(1.0).is_none());
        assert!(s.supporting_line().is_err());
        assert!(s.tangent_at(0.5).is_err());
        assert_abs_diff_eq!(s.point_at(0.5).unwrap(), Point2::new(1.0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(s.distance(&Point2::new(4.0, 5.0)), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn bounded_polyline_sampling() {
        let poly = seg(0.0, 0.0, 4.0, 0.0).as_polyline(4).unwrap();
        assert_eq!(poly.vertices().len(), 5);
        assert_abs_diff_eq!(poly.vertices()[2], Point2::new(2.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(seg(0.0, 0.0, 4.0, 0.0).last_point().unwrap(), Point2::new(4.0, 0.0), epsilon = 1e-12);
    }
}
