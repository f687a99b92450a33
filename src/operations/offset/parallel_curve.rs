use tracing::{debug, trace, warn};

use crate::error::{OperationError, Result};
use crate::geometry::{
    CompositeCurve, CompositeCurveBuilder, CurvePiece, LineSegment, Polyline, StraightLine,
};
use crate::math::{points_coincide, Point2};

use super::turn::{classify_turn, join_arc, Turn};

/// Parallel curve of a polyline at a signed distance.
///
/// # Algorithm
///
/// 1. Each edge is replaced by its supporting line moved by `distance`.
/// 2. At every vertex the turn between consecutive offset lines is
///    classified. Reflex turns truncate both offset segments at the
///    intersection of the two lines; convex turns keep both segments up to
///    the projections of the vertex and bridge them with an arc of radius
///    `|distance|` centered on the vertex.
/// 3. Rings also join the closing edge to the first one and end on the
///    point where the walk started.
///
/// Open polylines get no end caps: the result starts and ends on the
/// projections of the end vertices.
///
/// # Sign Convention
///
/// - Positive distance: right offset (relative to walking direction)
/// - Negative distance: left offset
#[derive(Debug)]
pub struct ParallelCurve2D {
    polyline: Polyline,
    distance: f64,
}

/// Junction of two consecutive offset lines around a vertex.
struct Corner {
    /// Where the incoming offset segment stops.
    end_prev: Point2,
    /// Where the outgoing offset segment starts.
    start_next: Point2,
    /// Pieces bridging `end_prev` to `start_next`.
    join: Vec<CurvePiece>,
}

impl ParallelCurve2D {
    /// Creates a new parallel curve operation.
    #[must_use]
    pub fn new(polyline: Polyline, distance: f64) -> Self {
        Self { polyline, distance }
    }

    /// Executes the offset.
    ///
    /// Polylines with fewer than two vertices, or whose edges all have zero
    /// length, give an empty curve.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if the distance is not finite
    /// - `OperationError::Failed` if the offset pieces fail to chain
    pub fn execute(&self) -> Result<CompositeCurve> {
        if !self.distance.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "offset distance must be finite, got {}",
                self.distance
            ))
            .into());
        }

        let closed = self.polyline.is_closed();
        debug!(
            vertices = self.polyline.vertex_count(),
            distance = self.distance,
            closed,
            "computing parallel curve"
        );

        if self.polyline.vertex_count() < 2 {
            return Ok(CompositeCurve::empty(closed));
        }

        let Some(lines) = self.offset_lines() else {
            debug!("every edge has zero length, parallel curve is empty");
            return Ok(CompositeCurve::empty(closed));
        };

        let curve = if closed {
            self.walk_ring(&lines)?
        } else {
            self.walk_open(&lines)?
        };
        debug!(pieces = curve.len(), "parallel curve done");
        Ok(curve)
    }

    /// Offset supporting line of every edge.
    ///
    /// Zero-length edges reuse the line of the closest previous edge, or of
    /// the first valid edge when they lead the sequence. Returns `None` when
    /// no edge has a direction.
    fn offset_lines(&self) -> Option<Vec<StraightLine>> {
        let edges = self.polyline.edges();
        let own: Vec<Option<StraightLine>> = edges
            .iter()
            .map(|e| e.supporting_line().ok().map(|l| l.parallel(self.distance)))
            .collect();
        let first_valid = own.iter().flatten().next()?.clone();

        let mut current = first_valid;
        let lines = own
            .into_iter()
            .map(|line| {
                if let Some(line) = line {
                    current = line;
                }
                current.clone()
            })
            .collect();
        Some(lines)
    }

    fn walk_open(&self, lines: &[StraightLine]) -> Result<CompositeCurve> {
        let vertices = self.polyline.vertices();
        let mut builder = CompositeCurveBuilder::new();
        let mut start = lines[0].project(&vertices[0]);

        for (i, pair) in lines.windows(2).enumerate() {
            let corner = self.corner(&pair[0], &pair[1], &vertices[i + 1]);
            builder.push_segment(start, corner.end_prev)?;
            for piece in corner.join {
                builder.push(piece)?;
            }
            start = corner.start_next;
        }

        let last = lines.len() - 1;
        builder.push_segment(start, lines[last].project(&vertices[last + 1]))?;
        builder.finish(false)
    }

    fn walk_ring(&self, lines: &[StraightLine]) -> Result<CompositeCurve> {
        let vertices = self.polyline.vertices();
        let last = lines.len() - 1;
        let mut builder = CompositeCurveBuilder::new();

        // The walk starts on the corner at v0, between the closing edge and
        // the first edge, and must come back to where that corner begins.
        let first_corner = self.corner(&lines[last], &lines[0], &vertices[0]);
        let origin = first_corner.end_prev;
        for piece in first_corner.join {
            builder.push(piece)?;
        }
        let mut start = first_corner.start_next;

        for i in 1..lines.len() {
            let corner = self.corner(&lines[i - 1], &lines[i], &vertices[i]);
            builder.push_segment(start, corner.end_prev)?;
            for piece in corner.join {
                builder.push(piece)?;
            }
            start = corner.start_next;
        }

        builder.push_segment(start, origin)?;
        builder.finish(true)
    }

    fn corner(&self, prev: &StraightLine, next: &StraightLine, vertex: &Point2) -> Corner {
        let d = self.distance;
        let turn = classify_turn(prev.direction(), next.direction(), d);
        trace!(x = vertex.x, y = vertex.y, ?turn, "offset corner");

        if turn == Turn::Reflex {
            if let Some(p) = prev.intersection(next) {
                return Corner {
                    end_prev: p,
                    start_next: p,
                    join: Vec::new(),
                };
            }
        }

        let end_prev = prev.project(vertex);
        let start_next = next.project(vertex);
        let mut join = Vec::new();
        if points_coincide(&end_prev, &start_next) {
            return Corner {
                end_prev,
                start_next: end_prev,
                join,
            };
        }

        match turn {
            Turn::Convex => {
                if let Some(arc) = join_arc(vertex, &end_prev, &start_next, d) {
                    // The arc end is recomputed from its angles; continue
                    // from there so the chain stays exact.
                    let arc_end = arc.end_point();
                    join.push(arc.into());
                    return Corner {
                        end_prev,
                        start_next: arc_end,
                        join,
                    };
                }
                join.push(LineSegment::new(end_prev, start_next).into());
            }
            Turn::Reflex => {
                warn!(
                    x = vertex.x,
                    y = vertex.y,
                    "offset lines are parallel at a reversal, joining with a straight connector"
                );
                join.push(LineSegment::new(end_prev, start_next).into());
            }
        }
        Corner {
            end_prev,
            start_next,
            join,
        }
    }
}
