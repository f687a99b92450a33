use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{BufferDomain, CompositeCurve, CompositeCurveBuilder, Polyline};
use crate::math::{Point2, ACCURACY};

use super::ParallelCurve2D;

/// Relative slack on the distance between an inner contour and its ring.
const CLEARANCE_SLACK: f64 = 1e-9;

/// Region within `|distance|` of a polyline, bounded by its parallel curves.
///
/// For rings the domain is an annulus: the outward parallel curve runs
/// counter-clockwise and the inward one clockwise, so the winding rule
/// treats the area around the ring's interior as a hole. When the distance
/// reaches the ring's half-width there is no hole and only the outward
/// curve is kept.
///
/// For open polylines the two parallel curves are joined at both ends by a
/// straight segment through the end vertex. No round caps are added.
#[derive(Debug)]
pub struct Buffer2D {
    polyline: Polyline,
    distance: f64,
}

impl Buffer2D {
    /// Creates a new buffer operation. The sign of `distance` is ignored.
    #[must_use]
    pub fn new(polyline: Polyline, distance: f64) -> Self {
        Self { polyline, distance }
    }

    /// Executes the buffer.
    ///
    /// A negligible distance or a polyline with fewer than two vertices
    /// gives an empty domain.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if the distance is not finite
    /// - `OperationError::Failed` if a parallel curve fails to chain
    pub fn execute(&self) -> Result<BufferDomain> {
        let d = self.distance.abs();
        if !d.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "buffer distance must be finite, got {}",
                self.distance
            ))
            .into());
        }
        if d < ACCURACY || self.polyline.vertex_count() < 2 {
            debug!(distance = d, "buffer is empty");
            return Ok(BufferDomain::empty());
        }

        let right = ParallelCurve2D::new(self.polyline.clone(), d).execute()?;
        let left = ParallelCurve2D::new(self.polyline.clone(), -d).execute()?;
        if right.is_empty() || left.is_empty() {
            return Ok(BufferDomain::empty());
        }

        let contours = if self.polyline.is_closed() {
            // The right side is outside for counter-clockwise rings.
            let area = self.polyline.signed_area();
            let (outer, inner) = if area >= 0.0 {
                (right, left)
            } else {
                (left, right)
            };
            let mut contours = vec![oriented(outer, true)];
            if is_true_inner(&self.polyline, area, &inner, d) {
                contours.push(oriented(inner, false));
            } else {
                debug!(distance = d, "inner parallel curve inverts, buffer has no hole");
            }
            contours
        } else {
            vec![oriented(close_sides(&right, &left)?, true)]
        };
        debug!(contours = contours.len(), "buffer done");
        BufferDomain::new(contours)
    }
}

/// Right side forward, butt end, left side backward, butt start.
fn close_sides(right: &CompositeCurve, left: &CompositeCurve) -> Result<CompositeCurve> {
    let mut builder = CompositeCurveBuilder::new();
    for piece in right.pieces() {
        builder.push(piece.clone())?;
    }
    let back = left.reversed();
    if let (Some(from), Some(to)) = (builder.last_point(), back.pieces().first()) {
        builder.push_segment(from, to.start_point())?;
    }
    for piece in back.pieces() {
        builder.push(piece.clone())?;
    }
    if let (Some(from), Some(to)) = (builder.last_point(), right.pieces().first()) {
        builder.push_segment(from, to.start_point())?;
    }
    builder.finish(true)
}

/// Whether the inward parallel curve of a ring bounds a real hole.
///
/// A hole exists only if the inner curve turns the same way as the ring and
/// stays `distance` away from it. When the distance exceeds the ring's
/// half-width the inner curve folds over itself: it flips orientation or
/// cuts through the band around the ring, and every point it encloses is
/// within `distance` of the ring.
fn is_true_inner(ring: &Polyline, ring_area: f64, inner: &CompositeCurve, distance: f64) -> bool {
    if inner.signed_area() * ring_area <= 0.0 {
        return false;
    }
    let edges = ring.edges();
    let clearance = |p: &Point2| {
        edges
            .iter()
            .map(|e| e.distance(p))
            .fold(f64::INFINITY, f64::min)
    };
    let min_clearance = distance * (1.0 - CLEARANCE_SLACK) - ACCURACY;
    inner.pieces().iter().all(|piece| {
        clearance(&piece.start_point()) >= min_clearance
            && clearance(&piece.point_at_fraction(0.5)) >= min_clearance
    })
}

fn oriented(curve: CompositeCurve, counter_clockwise: bool) -> CompositeCurve {
    if (curve.signed_area() > 0.0) == counter_clockwise {
        curve
    } else {
        curve.reversed()
    }
}
