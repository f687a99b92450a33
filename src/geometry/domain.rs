use crate::error::{OperationError, Result};
use crate::math::Point2;
use crate::tessellation::PathCommand;

use super::curve::Curve;
use super::{Aabb2, CompositeCurve};

/// Planar region bounded by closed contours.
///
/// Outer contours run counter-clockwise and holes clockwise, so a point is
/// inside when the contours wind around it a non-zero number of times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferDomain {
    contours: Vec<CompositeCurve>,
}

impl BufferDomain {
    /// Domain bounded by `contours`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if a contour is not closed.
    pub fn new(contours: Vec<CompositeCurve>) -> Result<Self> {
        if contours.iter().any(|c| !c.is_closed()) {
            return Err(OperationError::InvalidInput(
                "domain contours must be closed".into(),
            )
            .into());
        }
        Ok(Self { contours })
    }

    /// Domain with no contour.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn boundary(&self) -> &[CompositeCurve] {
        &self.contours
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contours.iter().all(CompositeCurve::is_empty)
    }

    /// Sum of the winding numbers of all contours around `point`.
    #[must_use]
    pub fn winding_number(&self, point: &Point2) -> i32 {
        self.contours.iter().map(|c| c.winding_number(point)).sum()
    }

    /// Non-zero winding rule.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        self.winding_number(point) != 0
    }

    /// Signed area, holes subtracted.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.contours.iter().map(CompositeCurve::signed_area).sum()
    }

    /// Box around every contour; empty for an empty domain.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb2 {
        self.contours
            .iter()
            .fold(Aabb2::empty(), |bbox, c| bbox.union(&c.bounding_box()))
    }

    /// One closed subpath per contour.
    #[must_use]
    pub fn to_path(&self) -> Vec<PathCommand> {
        let mut path = Vec::new();
        for contour in &self.contours {
            contour.append_path(&mut path);
        }
        path
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polyline;
    use approx::assert_abs_diff_eq;

    fn square(half: f64) -> Polyline {
        Polyline::ring(vec![
            Point2::new(-half, -half),
            Point2::new(half, -half),
            Point2::new(half, half),
            Point2::new(-half, half),
        ])
    }

    fn annulus() -> BufferDomain {
        let outer = square(2.0).to_composite();
        let hole = square(1.0).to_composite().reversed();
        BufferDomain::new(vec![outer, hole]).unwrap()
    }

    #[test]
    fn hole_is_outside() {
        let domain = annulus();
        assert!(domain.contains(&Point2::new(1.5, 0.0)));
        assert!(!domain.contains(&Point2::new(0.0, 0.0)));
        assert!(!domain.contains(&Point2::new(3.0, 0.0)));
        assert_abs_diff_eq!(domain.area(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn open_contour_rejected() {
        let open = Polyline::open(square(1.0).vertices().to_vec()).to_composite();
        assert!(BufferDomain::new(vec![open]).is_err());
    }

    #[test]
    fn path_has_one_subpath_per_contour() {
        let path = annulus().to_path();
        let moves = path
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count();
        let closes = path.iter().filter(|c| **c == PathCommand::Close).count();
        assert_eq!((moves, closes), (2, 2));
    }

    #[test]
    fn empty_domain() {
        let domain = BufferDomain::empty();
        assert!(domain.is_empty());
        assert!(!domain.contains(&Point2::origin()));
        assert!(domain.bounding_box().is_empty());
        assert!(domain.to_path().is_empty());
    }

    #[test]
    fn bounding_box_covers_outer_contour() {
        let bbox = annulus().bounding_box();
        assert_eq!(bbox, Aabb2::new(-2.0, 2.0, -2.0, 2.0));
    }
}
