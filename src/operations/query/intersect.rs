use crate::geometry::{CompositeCurve, Polyline};
use crate::math::{points_coincide, Point2};

/// Result of a curve-curve intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionResult {
    /// The intersection point.
    pub point: Point2,
    /// Parameter on the first curve.
    pub t1: f64,
    /// Parameter on the second curve.
    pub t2: f64,
}

/// Computes intersections between two composite curves.
///
/// Every piece of the first curve is tested against every piece of the
/// second; points found twice (at shared piece endpoints) are reported once.
pub struct CurveCurveIntersect<'a> {
    curve_a: &'a CompositeCurve,
    curve_b: &'a CompositeCurve,
}

impl<'a> CurveCurveIntersect<'a> {
    /// Creates a new `CurveCurveIntersect` query.
    #[must_use]
    pub fn new(curve_a: &'a CompositeCurve, curve_b: &'a CompositeCurve) -> Self {
        Self { curve_a, curve_b }
    }

    /// Executes the query, returning all intersection points with their
    /// composite parameters.
    #[must_use]
    pub fn execute(&self) -> Vec<IntersectionResult> {
        let mut results: Vec<IntersectionResult> = Vec::new();
        for (i, a) in self.curve_a.pieces().iter().enumerate() {
            for (j, b) in self.curve_b.pieces().iter().enumerate() {
                for hit in a.intersections(b) {
                    if results.iter().any(|r| points_coincide(&r.point, &hit.point)) {
                        continue;
                    }
                    #[allow(clippy::cast_precision_loss)]
                    results.push(IntersectionResult {
                        point: hit.point,
                        t1: i as f64 + hit.s_first,
                        t2: j as f64 + hit.s_second,
                    });
                }
            }
        }
        results
    }
}

/// Crossing points of two polylines.
///
/// Naive pairwise edge test; collinear overlapping edges report nothing.
#[derive(Debug)]
pub struct PolylineIntersect2D {
    first: Polyline,
    second: Polyline,
}

impl PolylineIntersect2D {
    /// Creates a new polyline intersection query.
    #[must_use]
    pub fn new(first: Polyline, second: Polyline) -> Self {
        Self { first, second }
    }

    /// Executes the query. Points closer than `ACCURACY` to one already
    /// found are dropped.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        let mut points: Vec<Point2> = Vec::new();
        let edges_b = self.second.edges();
        for edge_a in self.first.edges() {
            for edge_b in &edges_b {
                if let Some(p) = edge_a.intersection(edge_b) {
                    if !points.iter().any(|q| points_coincide(q, &p)) {
                        points.push(p);
                    }
                }
            }
        }
        points
    }
}
