use crate::math::transform_2d::AffineTransform2;
use crate::math::{points_coincide, Point2};

use super::Aabb2;

/// A finite collection of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point2>,
}

impl PointSet {
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Point2) {
        self.points.push(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Distance to the nearest point of the set, `+∞` when empty.
    #[must_use]
    pub fn distance(&self, point: &Point2) -> f64 {
        self.points
            .iter()
            .map(|p| (p - point).norm())
            .fold(f64::INFINITY, f64::min)
    }

    /// Nearest point of the set.
    #[must_use]
    pub fn nearest(&self, point: &Point2) -> Option<Point2> {
        self.points
            .iter()
            .min_by(|a, b| (*a - point).norm().total_cmp(&(*b - point).norm()))
            .copied()
    }

    /// Returns `true` if a point of the set coincides with `point`.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        self.points.iter().any(|p| points_coincide(p, point))
    }

    /// Points lying inside `bbox`, boundary included.
    #[must_use]
    pub fn clip(&self, bbox: &Aabb2) -> Self {
        self.points
            .iter()
            .filter(|p| bbox.contains(p))
            .copied()
            .collect()
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb2> {
        Aabb2::from_points(&self.points)
    }

    #[must_use]
    pub fn transform(&self, trans: &AffineTransform2) -> Self {
        self.points.iter().map(|p| trans.apply_point(p)).collect()
    }
}

impl FromIterator<Point2> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point2>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for PointSet {
    type Item = Point2;
    type IntoIter = std::vec::IntoIter<Point2>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
