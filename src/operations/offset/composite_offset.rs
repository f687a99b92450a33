use tracing::{debug, trace, warn};

use crate::error::{OperationError, Result};
use crate::geometry::{CompositeCurve, CompositeCurveBuilder, Curve, CurvePiece, LineSegment};
use crate::math::{points_coincide, ACCURACY};

use super::turn::{classify_turn, join_arc, Turn};

/// Parallel curve of a composite curve at a signed distance.
///
/// Every piece is offset on its own (segments are translated, arcs change
/// radius). Joints where the offset pieces separate are handled like
/// polyline vertices: convex turns get an arc of radius `|distance|`
/// centered on the joint, reflex turns cut both pieces at their crossing
/// nearest to the joint. Reflex joints whose offset pieces never cross are
/// bridged with a straight connector.
///
/// Positive distances offset to the right of the direction of travel.
#[derive(Debug)]
pub struct CompositeOffset2D {
    curve: CompositeCurve,
    distance: f64,
}

struct Joint {
    prev: CurvePiece,
    join: Vec<CurvePiece>,
    next: CurvePiece,
}

impl CompositeOffset2D {
    /// Creates a new composite offset operation.
    #[must_use]
    pub fn new(curve: CompositeCurve, distance: f64) -> Self {
        Self { curve, distance }
    }

    /// Executes the offset. Zero-length pieces are skipped.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if the distance is not finite
    /// - `OperationError::Failed` if an arc radius collapses to zero or below
    pub fn execute(&self) -> Result<CompositeCurve> {
        let d = self.distance;
        if !d.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "offset distance must be finite, got {d}"
            ))
            .into());
        }

        let closed = self.curve.is_closed();
        let sources: Vec<&CurvePiece> = self
            .curve
            .pieces()
            .iter()
            .filter(|p| !p.is_degenerate())
            .collect();
        debug!(pieces = sources.len(), distance = d, closed, "offsetting composite curve");
        if sources.is_empty() {
            return Ok(CompositeCurve::empty(closed));
        }

        let mut offsets = sources
            .iter()
            .map(|p| {
                p.offset(d).ok_or_else(|| {
                    OperationError::Failed(format!("{} collapses under offset {d}", p.shape_name()))
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let count = offsets.len();
        let mut closing_join = Vec::new();
        if closed && count > 1 {
            let joint = self.joint(
                sources[count - 1],
                sources[0],
                offsets[count - 1].clone(),
                offsets[0].clone(),
            );
            offsets[count - 1] = joint.prev;
            offsets[0] = joint.next;
            closing_join = joint.join;
        }

        let mut builder = CompositeCurveBuilder::new();
        let mut current = offsets[0].clone();
        for i in 1..count {
            let joint = self.joint(sources[i - 1], sources[i], current, offsets[i].clone());
            push_joined(&mut builder, joint.prev)?;
            for piece in joint.join {
                push_joined(&mut builder, piece)?;
            }
            current = joint.next;
        }
        push_joined(&mut builder, current)?;
        for piece in closing_join {
            push_joined(&mut builder, piece)?;
        }
        if closed {
            if let (Some(last), Some(first)) = (builder.last_point(), offsets.first()) {
                let first = first.start_point();
                if !points_coincide(&last, &first) {
                    builder.push_segment(last, first)?;
                }
            }
        }

        let curve = builder.finish(closed)?;
        debug!(pieces = curve.len(), "composite offset done");
        Ok(curve)
    }

    fn joint(
        &self,
        prev_source: &CurvePiece,
        next_source: &CurvePiece,
        prev: CurvePiece,
        next: CurvePiece,
    ) -> Joint {
        let d = self.distance;
        let end_prev = prev.end_point();
        let start_next = next.start_point();
        if points_coincide(&end_prev, &start_next) {
            return Joint {
                prev,
                join: Vec::new(),
                next,
            };
        }

        let vertex = prev_source.end_point();
        let (Some(t_prev), Some(t_next)) = (prev_source.end_tangent(), next_source.start_tangent())
        else {
            return connect(prev, next);
        };
        let turn = classify_turn(&t_prev, &t_next, d);
        trace!(x = vertex.x, y = vertex.y, ?turn, "composite offset joint");

        match turn {
            Turn::Convex => match join_arc(&vertex, &end_prev, &start_next, d) {
                Some(arc) => Joint {
                    prev,
                    join: vec![arc.into()],
                    next,
                },
                None => connect(prev, next),
            },
            Turn::Reflex => {
                let nearest = prev.intersections(&next).into_iter().min_by(|a, b| {
                    (a.point - vertex)
                        .norm()
                        .total_cmp(&(b.point - vertex).norm())
                });
                match nearest {
                    Some(hit) => Joint {
                        prev: prev.trimmed(0.0, hit.s_first),
                        join: Vec::new(),
                        next: next.trimmed(hit.s_second, 1.0),
                    },
                    None => {
                        warn!(
                            x = vertex.x,
                            y = vertex.y,
                            "offset pieces do not meet at a reflex joint, joining with a straight connector"
                        );
                        connect(prev, next)
                    }
                }
            }
        }
    }
}

fn connect(prev: CurvePiece, next: CurvePiece) -> Joint {
    let bridge = LineSegment::new(prev.end_point(), next.start_point());
    Joint {
        prev,
        join: vec![bridge.into()],
        next,
    }
}

/// Appends `piece`, bridging any gap left by trimming with a short segment.
fn push_joined(builder: &mut CompositeCurveBuilder, piece: CurvePiece) -> Result<()> {
    if let Some(last) = builder.last_point() {
        let start = piece.start_point();
        if (start - last).norm() > ACCURACY {
            builder.push_segment(last, start)?;
        }
    }
    builder.push(piece)
}
