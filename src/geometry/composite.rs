use crate::error::{GeometryError, OperationError, Result};
use crate::math::transform_2d::AffineTransform2;
use crate::math::{points_coincide, Point2, Vector2};
use crate::operations::offset::CompositeOffset2D;
use crate::operations::query::CurveCurveIntersect;
use crate::tessellation::{PathCommand, TessellateCurve, TessellationParams};

use super::curve::{Curve, CurveDomain, LineSegment};
use super::{Aabb2, CurvePiece, Polyline};

/// A contiguous chain of segments and arcs.
///
/// Each piece starts where the previous one ends. A closed curve also ends
/// where its first piece starts. The curve parameter runs over
/// `[0, piece_count]`, piece `i` covering `[i, i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeCurve {
    pieces: Vec<CurvePiece>,
    closed: bool,
}

/// Append-only builder that keeps the chain contiguous.
#[derive(Debug, Default)]
pub struct CompositeCurveBuilder {
    pieces: Vec<CurvePiece>,
}

impl CompositeCurveBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// End point of the last appended piece.
    #[must_use]
    pub fn last_point(&self) -> Option<Point2> {
        self.pieces.last().map(CurvePiece::end_point)
    }

    /// Appends a piece.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Failed` if the piece does not start at the
    /// end of the previous one.
    pub fn push(&mut self, piece: impl Into<CurvePiece>) -> Result<()> {
        let piece = piece.into();
        if let Some(last) = self.last_point() {
            let start = piece.start_point();
            if !points_coincide(&last, &start) {
                return Err(OperationError::Failed(format!(
                    "piece starting at ({}, {}) does not continue from ({}, {})",
                    start.x, start.y, last.x, last.y
                ))
                .into());
            }
        }
        self.pieces.push(piece);
        Ok(())
    }

    /// Appends the segment `from → to`.
    ///
    /// # Errors
    ///
    /// Same as [`push`](Self::push).
    pub fn push_segment(&mut self, from: Point2, to: Point2) -> Result<()> {
        self.push(LineSegment::new(from, to))
    }

    /// Finishes the chain.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Failed` if `closed` is requested but the last
    /// piece does not end at the start of the first.
    pub fn finish(self, closed: bool) -> Result<CompositeCurve> {
        if closed {
            if let (Some(first), Some(last)) = (self.pieces.first(), self.pieces.last()) {
                let (start, end) = (first.start_point(), last.end_point());
                if !points_coincide(&start, &end) {
                    return Err(OperationError::Failed(format!(
                        "closed curve ends at ({}, {}) instead of ({}, {})",
                        end.x, end.y, start.x, start.y
                    ))
                    .into());
                }
            }
        }
        Ok(CompositeCurve::from_pieces(self.pieces, closed))
    }
}

impl CompositeCurve {
    /// Wraps pieces the caller already knows to be contiguous.
    pub(crate) fn from_pieces(pieces: Vec<CurvePiece>, closed: bool) -> Self {
        Self { pieces, closed }
    }

    /// Curve with no piece.
    #[must_use]
    pub fn empty(closed: bool) -> Self {
        Self::from_pieces(Vec::new(), closed)
    }

    /// Builds a curve from pieces, checking contiguity.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Failed` if consecutive pieces do not meet.
    pub fn new(pieces: Vec<CurvePiece>, closed: bool) -> Result<Self> {
        let mut builder = CompositeCurveBuilder::new();
        for piece in pieces {
            builder.push(piece)?;
        }
        builder.finish(closed)
    }

    #[must_use]
    pub fn pieces(&self) -> &[CurvePiece] {
        &self.pieces
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Same chain traversed backwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let pieces = self.pieces.iter().rev().map(CurvePiece::reversed).collect();
        Self::from_pieces(pieces, self.closed)
    }

    /// Signed enclosed area, positive when counter-clockwise.
    ///
    /// Meaningful for closed curves only.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.pieces.iter().map(CurvePiece::signed_area_contribution).sum()
    }

    /// Number of times the curve winds around `point` counter-clockwise.
    #[must_use]
    pub fn winding_number(&self, point: &Point2) -> i32 {
        self.pieces.iter().map(|p| p.winding_crossings(point)).sum()
    }

    /// Minimum distance from `point` to the curve; infinite when empty.
    #[must_use]
    pub fn distance(&self, point: &Point2) -> f64 {
        self.pieces
            .iter()
            .map(|p| p.distance(point))
            .fold(f64::INFINITY, f64::min)
    }

    /// Crossings with another curve, without duplicates.
    #[must_use]
    pub fn intersections(&self, other: &Self) -> Vec<Point2> {
        CurveCurveIntersect::new(self, other)
            .execute()
            .into_iter()
            .map(|r| r.point)
            .collect()
    }

    /// Parallel curve at signed distance `d`, positive to the right.
    ///
    /// # Errors
    ///
    /// See [`CompositeOffset2D::execute`].
    pub fn offset(&self, d: f64) -> Result<Self> {
        CompositeOffset2D::new(self.clone(), d).execute()
    }

    /// Polyline approximation of the curve.
    #[must_use]
    pub fn to_polyline(&self, params: &TessellationParams) -> Polyline {
        TessellateCurve::new(self, *params).execute()
    }

    /// Flattened vertices; closed curves do not repeat their first point.
    #[must_use]
    pub fn to_points(&self, params: &TessellationParams) -> Vec<Point2> {
        self.to_polyline(params).vertices().to_vec()
    }

    /// Drawing commands: a `MoveTo` to the first point, one command per piece,
    /// and a `Close` for closed curves. Empty curves draw nothing.
    #[must_use]
    pub fn to_path(&self) -> Vec<PathCommand> {
        let mut path = Vec::with_capacity(self.pieces.len() + 2);
        self.append_path(&mut path);
        path
    }

    pub(crate) fn append_path(&self, path: &mut Vec<PathCommand>) {
        let Some(first) = self.pieces.first() else {
            return;
        };
        path.push(PathCommand::MoveTo(first.start_point()));
        for piece in &self.pieces {
            piece.append_path(path);
        }
        if self.closed {
            path.push(PathCommand::Close);
        }
    }

    /// Image under an affine map.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the curve has arcs and the map
    /// is not a similarity.
    pub fn transform(&self, trans: &AffineTransform2) -> Result<Self> {
        let pieces = self
            .pieces
            .iter()
            .map(|p| p.transform(trans))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_pieces(pieces, self.closed))
    }

    fn piece_at(&self, t: f64) -> Result<(&CurvePiece, f64)> {
        self.domain().check(t)?;
        let count = self.pieces.len();
        if count == 0 {
            return Err(GeometryError::Degenerate("composite curve is empty".into()).into());
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (t.max(0.0).floor() as usize).min(count - 1);
        #[allow(clippy::cast_precision_loss)]
        let local = (t - index as f64).clamp(0.0, 1.0);
        Ok((&self.pieces[index], local))
    }
}

impl Curve for CompositeCurve {
    fn point_at(&self, t: f64) -> Result<Point2> {
        let (piece, s) = self.piece_at(t)?;
        Ok(piece.point_at_fraction(s))
    }

    fn tangent_at(&self, t: f64) -> Result<Vector2> {
        let (piece, s) = self.piece_at(t)?;
        piece.tangent_at(s)
    }

    fn domain(&self) -> CurveDomain {
        #[allow(clippy::cast_precision_loss)]
        CurveDomain::new(0.0, self.pieces.len() as f64)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn length(&self) -> f64 {
        self.pieces.iter().map(Curve::length).sum()
    }

    fn bounding_box(&self) -> Aabb2 {
        self.pieces
            .iter()
            .fold(Aabb2::empty(), |bbox, p| bbox.union(&p.bounding_box()))
    }

    fn shape_name(&self) -> &'static str {
        "composite curve"
    }
}
