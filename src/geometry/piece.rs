use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::Result;
use crate::math::intersect_2d::{
    arc_arc_intersect_2d, line_arc_intersect_2d, segment_segment_intersect_2d,
};
use crate::math::transform_2d::AffineTransform2;
use crate::math::{cross, Point2, Vector2, ACCURACY};
use crate::tessellation::PathCommand;

use super::curve::{CircularArc, Curve, CurveDomain, LineSegment};
use super::Aabb2;

/// One bounded element of a composite curve.
///
/// Pieces are parameterized by the fraction `s` in `[0, 1]` of their length.
#[derive(Debug, Clone, PartialEq)]
pub enum CurvePiece {
    Segment(LineSegment),
    Arc(CircularArc),
}

/// Crossing between two pieces, with the fraction along each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceIntersection {
    pub point: Point2,
    pub s_first: f64,
    pub s_second: f64,
}

impl CurvePiece {
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        match self {
            Self::Segment(s) => *s.start(),
            Self::Arc(a) => a.start_point(),
        }
    }

    #[must_use]
    pub fn end_point(&self) -> Point2 {
        match self {
            Self::Segment(s) => *s.end(),
            Self::Arc(a) => a.end_point(),
        }
    }

    /// Point at fraction `s`, clamped to `[0, 1]`.
    #[must_use]
    pub fn point_at_fraction(&self, s: f64) -> Point2 {
        let s = s.clamp(0.0, 1.0);
        match self {
            Self::Segment(seg) => seg.start() + seg.vector() * s,
            Self::Arc(a) => a.point_at_fraction(s),
        }
    }

    /// Unit tangent leaving the start point; `None` for a degenerate segment.
    #[must_use]
    pub fn start_tangent(&self) -> Option<Vector2> {
        self.tangent_at_fraction(0.0)
    }

    /// Unit tangent arriving at the end point; `None` for a degenerate segment.
    #[must_use]
    pub fn end_tangent(&self) -> Option<Vector2> {
        self.tangent_at_fraction(1.0)
    }

    fn tangent_at_fraction(&self, s: f64) -> Option<Vector2> {
        match self {
            Self::Segment(seg) if seg.is_degenerate() => None,
            Self::Segment(seg) => Some(seg.vector().normalize()),
            Self::Arc(a) => Some(a.tangent_at_fraction(s)),
        }
    }

    /// Zero-length segments and zero-sweep arcs.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Segment(seg) => seg.is_degenerate(),
            Self::Arc(a) => a.length() < ACCURACY,
        }
    }

    #[must_use]
    pub fn distance(&self, point: &Point2) -> f64 {
        match self {
            Self::Segment(seg) => seg.distance(point),
            Self::Arc(a) => a.distance(point),
        }
    }

    /// Crossings with another piece, including shared endpoints.
    ///
    /// Overlapping collinear segments and concentric arcs report nothing.
    #[must_use]
    pub fn intersections(&self, other: &Self) -> Vec<PieceIntersection> {
        let hits: Vec<(Point2, f64, f64)> = match (self, other) {
            (Self::Segment(a), Self::Segment(b)) => {
                segment_segment_intersect_2d(a.start(), a.end(), b.start(), b.end())
                    .into_iter()
                    .collect()
            }
            (Self::Segment(seg), Self::Arc(arc)) => segment_arc_hits(seg, arc),
            (Self::Arc(arc), Self::Segment(seg)) => segment_arc_hits(seg, arc)
                .into_iter()
                .map(|(p, s_seg, s_arc)| (p, s_arc, s_seg))
                .collect(),
            (Self::Arc(a), Self::Arc(b)) => arc_arc_intersect_2d(
                a.center(),
                a.radius(),
                a.start_angle(),
                a.extent(),
                b.center(),
                b.radius(),
                b.start_angle(),
                b.extent(),
            ),
        };
        hits.into_iter()
            .map(|(point, s_first, s_second)| PieceIntersection {
                point,
                s_first,
                s_second,
            })
            .collect()
    }

    /// Intersection points with another piece.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Vec<Point2> {
        self.intersections(other).into_iter().map(|i| i.point).collect()
    }

    /// Parallel piece at signed distance `d`, positive to the right.
    ///
    /// Returns `None` for a degenerate segment or an arc whose radius would
    /// collapse.
    #[must_use]
    pub fn offset(&self, d: f64) -> Option<Self> {
        match self {
            Self::Segment(seg) => seg.parallel(d).map(Self::Segment),
            Self::Arc(a) => a.parallel(d).map(Self::Arc),
        }
    }

    /// Portion of the piece between fractions `s0` and `s1`.
    #[must_use]
    pub fn trimmed(&self, s0: f64, s1: f64) -> Self {
        match self {
            Self::Segment(_) => Self::Segment(LineSegment::new(
                self.point_at_fraction(s0),
                self.point_at_fraction(s1),
            )),
            Self::Arc(a) => Self::Arc(CircularArc::from_parts(
                *a.center(),
                a.radius(),
                a.start_angle() + a.extent() * s0,
                a.extent() * (s1 - s0),
            )),
        }
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        match self {
            Self::Segment(seg) => Self::Segment(seg.reversed()),
            Self::Arc(a) => Self::Arc(a.reversed()),
        }
    }

    /// Image under an affine map.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for an arc under a map that is
    /// not a similarity.
    pub fn transform(&self, trans: &AffineTransform2) -> Result<Self> {
        Ok(match self {
            Self::Segment(seg) => Self::Segment(seg.transform(trans)),
            Self::Arc(a) => Self::Arc(a.transform(trans)?),
        })
    }

    /// Contribution of the piece to the signed area of a closed curve,
    /// i.e. `½ ∫ (x dy - y dx)` along the piece.
    #[must_use]
    pub fn signed_area_contribution(&self) -> f64 {
        match self {
            Self::Segment(seg) => {
                let (a, b) = (seg.start(), seg.end());
                (a.x * b.y - b.x * a.y) / 2.0
            }
            Self::Arc(arc) => {
                let c = arc.center();
                let r = arc.radius();
                let p0 = arc.start_point();
                let p1 = arc.end_point();
                (r * r * arc.extent() + c.x * (p1.y - p0.y) - c.y * (p1.x - p0.x)) / 2.0
            }
        }
    }

    /// Signed crossings of the piece with the ray from `point` towards +X.
    ///
    /// Upward crossings count `+1`, downward ones `-1`. Endpoints follow a
    /// half-open rule so that a vertex shared by two pieces counts once.
    #[must_use]
    pub fn winding_crossings(&self, point: &Point2) -> i32 {
        match self {
            Self::Segment(seg) => segment_crossing(seg.start(), seg.end(), point),
            Self::Arc(arc) => arc_crossings(arc, point),
        }
    }

    /// Appends drawing commands from the current pen position, assumed to be
    /// the start point.
    pub fn append_path(&self, path: &mut Vec<PathCommand>) {
        match self {
            Self::Segment(seg) => path.push(PathCommand::LineTo(*seg.end())),
            Self::Arc(a) => path.push(PathCommand::ArcTo {
                center: *a.center(),
                radius: a.radius(),
                start_angle: a.start_angle(),
                sweep: a.extent(),
                end: a.end_point(),
            }),
        }
    }
}

fn segment_arc_hits(seg: &LineSegment, arc: &CircularArc) -> Vec<(Point2, f64, f64)> {
    line_arc_intersect_2d(
        seg.start(),
        seg.end(),
        arc.center(),
        arc.radius(),
        arc.start_angle(),
        arc.extent(),
    )
}

fn segment_crossing(a: &Point2, b: &Point2, p: &Point2) -> i32 {
    let side = cross(&(b - a), &(p - a));
    if a.y <= p.y && p.y < b.y && side > 0.0 {
        1
    } else if b.y <= p.y && p.y < a.y && side < 0.0 {
        -1
    } else {
        0
    }
}

/// Splits the sweep at the vertical extremes of the circle so that every
/// sub-arc is monotone in y, then counts each sub-arc like a segment.
fn arc_crossings(arc: &CircularArc, p: &Point2) -> i32 {
    let start = arc.start_angle();
    let extent = arc.extent();
    if extent.abs() < ACCURACY {
        return 0;
    }

    let mut angles = vec![start];
    let (lo, hi) = if extent > 0.0 {
        (start, start + extent)
    } else {
        (start + extent, start)
    };
    // Extremes sit at π/2 + kπ.
    let mut k = ((lo - FRAC_PI_2) / PI).floor() + 1.0;
    let mut breaks = Vec::new();
    while FRAC_PI_2 + k * PI < hi {
        breaks.push(FRAC_PI_2 + k * PI);
        k += 1.0;
    }
    if extent < 0.0 {
        breaks.reverse();
    }
    angles.extend(breaks);
    angles.push(start + extent);

    let c = arc.center();
    let r = arc.radius();
    let at = |angle: f64| Point2::new(c.x + r * angle.cos(), c.y + r * angle.sin());

    angles
        .windows(2)
        .map(|w| {
            let q0 = at(w[0]);
            let q1 = at(w[1]);
            let dir = if q0.y <= p.y && p.y < q1.y {
                1
            } else if q1.y <= p.y && p.y < q0.y {
                -1
            } else {
                return 0;
            };
            let right_half = ((w[0] + w[1]) / 2.0).cos() >= 0.0;
            let dy = p.y - c.y;
            let h = (r * r - dy * dy).max(0.0).sqrt();
            let x = if right_half { c.x + h } else { c.x - h };
            if x > p.x {
                dir
            } else {
                0
            }
        })
        .sum()
}

/// Fractional parameter `s` in `[0, 1]`.
impl Curve for CurvePiece {
    fn point_at(&self, t: f64) -> Result<Point2> {
        self.domain().check(t)?;
        Ok(self.point_at_fraction(t))
    }

    fn tangent_at(&self, t: f64) -> Result<Vector2> {
        self.domain().check(t)?;
        match self {
            Self::Segment(seg) => seg.tangent_at(t.clamp(0.0, 1.0)),
            Self::Arc(a) => Ok(a.tangent_at_fraction(t.clamp(0.0, 1.0))),
        }
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        match self {
            Self::Segment(_) => false,
            Self::Arc(a) => a.is_closed(),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Self::Segment(seg) => seg.length(),
            Self::Arc(a) => a.length(),
        }
    }

    fn bounding_box(&self) -> Aabb2 {
        match self {
            Self::Segment(seg) => seg.bounding_box(),
            Self::Arc(a) => a.bounding_box(),
        }
    }

    fn shape_name(&self) -> &'static str {
        match self {
            Self::Segment(seg) => seg.shape_name(),
            Self::Arc(a) => a.shape_name(),
        }
    }
}

impl From<LineSegment> for CurvePiece {
    fn from(seg: LineSegment) -> Self {
        Self::Segment(seg)
    }
}

impl From<CircularArc> for CurvePiece {
    fn from(arc: CircularArc) -> Self {
        Self::Arc(arc)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::TAU;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> CurvePiece {
        LineSegment::new(Point2::new(x0, y0), Point2::new(x1, y1)).into()
    }

    fn arc(cx: f64, cy: f64, r: f64, start: f64, extent: f64) -> CurvePiece {
        CircularArc::new(Point2::new(cx, cy), r, start, extent)
            .unwrap()
            .into()
    }

    #[test]
    fn half_disk_area_from_terms() {
        // Upper half disk: arc from (1,0) to (-1,0), then the diameter back.
        let pieces = [arc(0.0, 0.0, 1.0, 0.0, PI), seg(-1.0, 0.0, 1.0, 0.0)];
        let area: f64 = pieces.iter().map(CurvePiece::signed_area_contribution).sum();
        assert_abs_diff_eq!(area, PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn off_center_circle_area() {
        let circle = arc(3.0, -2.0, 2.0, 1.0, TAU);
        assert_abs_diff_eq!(circle.signed_area_contribution(), 4.0 * PI, epsilon = 1e-9);
        assert_abs_diff_eq!(circle.reversed().signed_area_contribution(), -4.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn full_circle_winds_once() {
        let circle = arc(0.0, 0.0, 1.0, 0.3, TAU);
        assert_eq!(circle.winding_crossings(&Point2::new(0.2, 0.1)), 1);
        assert_eq!(circle.winding_crossings(&Point2::new(2.0, 0.1)), 0);
        assert_eq!(circle.winding_crossings(&Point2::new(-2.0, 0.1)), 0);
        assert_eq!(circle.reversed().winding_crossings(&Point2::new(0.0, -0.5)), -1);
    }

    #[test]
    fn segment_crossing_sign() {
        let up = seg(1.0, -1.0, 1.0, 1.0);
        assert_eq!(up.winding_crossings(&Point2::origin()), 1);
        assert_eq!(up.reversed().winding_crossings(&Point2::origin()), -1);
        assert_eq!(up.winding_crossings(&Point2::new(2.0, 0.0)), 0);
    }

    #[test]
    fn segment_meets_arc() {
        let s = seg(-2.0, 0.5, 2.0, 0.5);
        let a = arc(0.0, 0.0, 1.0, 0.0, PI);
        let hits = s.intersections(&a);
        assert_eq!(hits.len(), 2);
        for h in &hits {
            assert_abs_diff_eq!(s.point_at_fraction(h.s_first), h.point, epsilon = 1e-12);
            assert_abs_diff_eq!(a.point_at_fraction(h.s_second), h.point, epsilon = 1e-9);
        }
        assert_eq!(s.intersect(&a).len(), 2);
        let swapped = a.intersections(&s);
        assert_eq!(swapped.len(), 2);
        assert_abs_diff_eq!(swapped[0].s_second, hits[0].s_first, epsilon = 1e-12);
    }

    #[test]
    fn arc_offset_grows_outward() {
        let a = arc(0.0, 0.0, 2.0, 0.0, FRAC_PI_2);
        let CurvePiece::Arc(outer) = a.offset(1.0).unwrap() else {
            panic!("expected an arc");
        };
        assert_abs_diff_eq!(outer.radius(), 3.0, epsilon = 1e-12);
        assert!(a.offset(-2.0).is_none());
        assert!(seg(1.0, 1.0, 1.0, 1.0).offset(1.0).is_none());
    }

    #[test]
    fn trimmed_arc_keeps_circle() {
        let a = arc(0.0, 0.0, 1.0, 0.0, PI);
        let t = a.trimmed(0.5, 1.0);
        assert_abs_diff_eq!(t.start_point(), Point2::new(0.0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(t.end_point(), Point2::new(-1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(t.length(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_segment_has_no_tangent() {
        let s = seg(2.0, 2.0, 2.0, 2.0);
        assert!(s.is_degenerate());
        assert!(s.start_tangent().is_none());
        assert!(s.tangent_at(0.5).is_err());
    }
}
