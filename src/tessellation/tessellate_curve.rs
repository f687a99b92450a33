use std::f64::consts::TAU;

use crate::geometry::{CompositeCurve, Curve, CurvePiece, Polyline};
use crate::math::arc_2d::arc_subdivision_count;
use crate::math::points_coincide;

use super::TessellationParams;

/// Tessellates a composite curve into a polyline.
///
/// Segments contribute their end points; arcs are split into chords whose
/// sagitta stays below the tolerance. Closed curves give rings.
pub struct TessellateCurve<'a> {
    curve: &'a CompositeCurve,
    params: TessellationParams,
}

impl<'a> TessellateCurve<'a> {
    /// Creates a new `TessellateCurve` operation.
    #[must_use]
    pub fn new(curve: &'a CompositeCurve, params: TessellationParams) -> Self {
        Self { curve, params }
    }

    /// Executes the tessellation, returning a polyline.
    #[must_use]
    pub fn execute(&self) -> Polyline {
        let closed = self.curve.is_closed();
        let pieces = self.curve.pieces();
        let Some(first) = pieces.first() else {
            return Polyline::new(Vec::new(), closed);
        };

        let mut points = vec![first.start_point()];
        for piece in pieces {
            match piece {
                CurvePiece::Segment(seg) => points.push(*seg.end()),
                CurvePiece::Arc(arc) => {
                    let n = self.arc_segments(arc.radius(), arc.extent().abs());
                    for i in 1..=n {
                        #[allow(clippy::cast_precision_loss)]
                        points.push(arc.point_at_fraction(i as f64 / n as f64));
                    }
                }
            }
        }

        if closed && points.len() > 1 {
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                if points_coincide(first, last) {
                    points.pop();
                }
            }
        }
        Polyline::new(points, closed)
    }

    fn arc_segments(&self, radius: f64, abs_sweep: f64) -> usize {
        let by_tolerance = arc_subdivision_count(radius, abs_sweep, self.params.tolerance) as usize;
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let min = (self.params.min_segments as f64 * abs_sweep / TAU).ceil() as usize;
        by_tolerance
            .max(min)
            .clamp(1, self.params.max_segments.max(1))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{CircularArc, CompositeCurveBuilder};
    use crate::math::Point2;
    use std::f64::consts::PI;

    fn half_disk() -> CompositeCurve {
        let mut b = CompositeCurveBuilder::new();
        b.push(CircularArc::new(Point2::origin(), 1.0, 0.0, PI).unwrap())
            .unwrap();
        b.push_segment(Point2::new(-1.0, 0.0), Point2::new(1.0, 0.0))
            .unwrap();
        b.finish(true).unwrap()
    }

    #[test]
    fn closed_curve_gives_ring_without_repeat() {
        let poly = TessellateCurve::new(&half_disk(), TessellationParams::default()).execute();
        assert!(poly.is_closed());
        let verts = poly.vertices();
        assert!(verts.len() > 4);
        assert!(!points_coincide(&verts[0], &verts[verts.len() - 1]));
        for p in verts {
            assert!(p.y >= -1e-12);
            assert!(p.coords.norm() <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn chord_deviation_within_tolerance() {
        let params = TessellationParams {
            tolerance: 1e-3,
            ..TessellationParams::default()
        };
        let poly = TessellateCurve::new(&half_disk(), params).execute();
        let verts = poly.vertices();
        for w in verts.windows(2) {
            let mid = nalgebra::center(&w[0], &w[1]);
            if mid.y > 1e-9 {
                assert!(1.0 - mid.coords.norm() <= 1e-3 + 1e-12);
            }
        }
    }

    #[test]
    fn max_segments_caps_arcs() {
        let params = TessellationParams {
            tolerance: 1e-9,
            min_segments: 4,
            max_segments: 8,
        };
        assert_eq!(half_disk().to_points(&params).len(), 9);
    }

    #[test]
    fn empty_curve() {
        let empty = CompositeCurve::empty(false);
        assert!(empty.to_points(&TessellationParams::default()).is_empty());
    }
}
