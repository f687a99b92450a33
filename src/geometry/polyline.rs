use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::transform_2d::AffineTransform2;
use crate::math::{points_coincide, Point2, Vector2};

use super::curve::{Curve, CurveDomain, LineSegment};
use super::{Aabb2, CompositeCurve, CurvePiece};

/// An ordered vertex sequence, either open or closed into a ring.
///
/// Consecutive vertices are joined by straight edges. A ring has an extra
/// closing edge from the last vertex back to the first; the first vertex is
/// not repeated at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    vertices: Vec<Point2>,
    closed: bool,
}

impl Polyline {
    #[must_use]
    pub fn new(vertices: Vec<Point2>, closed: bool) -> Self {
        Self { vertices, closed }
    }

    /// Open polyline through `vertices`.
    #[must_use]
    pub fn open(vertices: Vec<Point2>) -> Self {
        Self::new(vertices, false)
    }

    /// Closed ring through `vertices`.
    #[must_use]
    pub fn ring(vertices: Vec<Point2>) -> Self {
        Self::new(vertices, true)
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges (includes the closing edge for rings).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.vertices.len();
        if n < 2 {
            0
        } else if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Edges in traversal order, the closing edge last for rings.
    #[must_use]
    pub fn edges(&self) -> Vec<LineSegment> {
        let n = self.vertices.len();
        (0..self.segment_count())
            .map(|i| LineSegment::new(self.vertices[i], self.vertices[(i + 1) % n]))
            .collect()
    }

    /// Returns `true` if two consecutive vertices coincide.
    #[must_use]
    pub fn has_multiple_vertices(&self) -> bool {
        self.edges()
            .iter()
            .any(|e| points_coincide(e.start(), e.end()))
    }

    /// Same vertices traversed backwards. Rings keep their first vertex.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        if self.closed && vertices.len() > 1 {
            vertices[1..].reverse();
        } else {
            vertices.reverse();
        }
        Self::new(vertices, self.closed)
    }

    /// Signed area enclosed by the ring, positive when counter-clockwise.
    ///
    /// Open polylines are closed implicitly.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.vertices)
    }

    /// Composite curve made of the polyline edges.
    #[must_use]
    pub fn to_composite(&self) -> CompositeCurve {
        let pieces = self.edges().into_iter().map(CurvePiece::Segment).collect();
        CompositeCurve::from_pieces(pieces, self.closed)
    }

    #[must_use]
    pub fn transform(&self, trans: &AffineTransform2) -> Self {
        let vertices = self.vertices.iter().map(|p| trans.apply_point(p)).collect();
        Self::new(vertices, self.closed)
    }

    fn edge_at(&self, t: f64) -> Result<(LineSegment, f64)> {
        self.domain().check(t)?;
        let count = self.segment_count();
        if count == 0 {
            return Err(GeometryError::Degenerate("polyline has no edge".into()).into());
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (t.max(0.0).floor() as usize).min(count - 1);
        #[allow(clippy::cast_precision_loss)]
        let local = t - index as f64;
        let edge = self.edges().swap_remove(index);
        Ok((edge, local.clamp(0.0, 1.0)))
    }
}

/// Parameter `t` in `[0, segment_count]`; edge `i` covers `[i, i + 1]`.
impl Curve for Polyline {
    fn point_at(&self, t: f64) -> Result<Point2> {
        let (edge, local) = self.edge_at(t)?;
        edge.point_at(local)
    }

    fn tangent_at(&self, t: f64) -> Result<Vector2> {
        let (edge, local) = self.edge_at(t)?;
        edge.tangent_at(local)
    }

    fn domain(&self) -> CurveDomain {
        #[allow(clippy::cast_precision_loss)]
        CurveDomain::new(0.0, self.segment_count() as f64)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn length(&self) -> f64 {
        self.edges().iter().map(Curve::length).sum()
    }

    fn bounding_box(&self) -> Aabb2 {
        Aabb2::from_points(&self.vertices).unwrap_or_else(Aabb2::empty)
    }

    fn shape_name(&self) -> &'static str {
        "polyline"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square() -> Polyline {
        Polyline::ring(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ])
    }

    #[test]
    fn ring_has_closing_edge() {
        let ring = square();
        assert_eq!(ring.segment_count(), 4);
        let edges = ring.edges();
        assert_eq!(*edges[3].end(), Point2::new(0.0, 0.0));
        assert_abs_diff_eq!(ring.length(), 40.0, epsilon = 1e-12);
    }

    #[test]
    fn open_polyline_edge_count() {
        let open = Polyline::open(square().vertices().to_vec());
        assert_eq!(open.segment_count(), 3);
        assert_abs_diff_eq!(open.length(), 30.0, epsilon = 1e-12);
        assert_eq!(Polyline::open(vec![Point2::origin()]).segment_count(), 0);
    }

    #[test]
    fn reversed_ring_flips_area_sign() {
        let ring = square();
        assert_abs_diff_eq!(ring.signed_area(), 100.0, epsilon = 1e-12);
        let rev = ring.reversed();
        assert_eq!(rev.vertices()[0], ring.vertices()[0]);
        assert_abs_diff_eq!(rev.signed_area(), -100.0, epsilon = 1e-12);
    }

    #[test]
    fn detects_repeated_vertices() {
        assert!(!square().has_multiple_vertices());
        let mut verts = square().vertices().to_vec();
        verts.push(Point2::new(0.0, 0.0));
        assert!(Polyline::ring(verts).has_multiple_vertices());
    }

    #[test]
    fn parameter_walks_edges() {
        let ring = square();
        assert_abs_diff_eq!(ring.point_at(1.5).unwrap(), Point2::new(10.0, 5.0), epsilon = 1e-12);
        assert_abs_diff_eq!(ring.point_at(4.0).unwrap(), Point2::new(0.0, 0.0), epsilon = 1e-12);
        assert!(ring.point_at(4.5).is_err());
    }

    #[test]
    fn composite_keeps_vertices() {
        let curve = square().to_composite();
        assert_eq!(curve.pieces().len(), 4);
        assert!(curve.is_closed());
        assert_abs_diff_eq!(curve.signed_area(), 100.0, epsilon = 1e-12);
    }
}
