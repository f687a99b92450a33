use std::f64::consts::PI;

use crate::geometry::CircularArc;
use crate::math::{angle_between, points_coincide, Point2, Vector2, ACCURACY};

/// How the offset path behaves at a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The two offset lines overlap past the vertex: truncate at their
    /// intersection.
    Reflex,
    /// The two offset lines leave a gap around the vertex: bridge it with
    /// an arc centered on the vertex.
    Convex,
}

/// Classifies the turn from `prev_dir` to `next_dir` for an offset at
/// signed distance `distance` (positive to the right).
#[must_use]
pub fn classify_turn(prev_dir: &Vector2, next_dir: &Vector2, distance: f64) -> Turn {
    let angle_exceeds_pi = angle_between(prev_dir, next_dir) > PI;
    let offset_on_left = distance < 0.0;
    if angle_exceeds_pi ^ offset_on_left {
        Turn::Reflex
    } else {
        Turn::Convex
    }
}

/// Arc of radius `|distance|` centered on `vertex`, from `from` to `to`.
///
/// Offsets to the right turn counter-clockwise around the vertex, offsets
/// to the left clockwise. Returns `None` when the endpoints coincide or the
/// distance is negligible.
#[must_use]
pub fn join_arc(vertex: &Point2, from: &Point2, to: &Point2, distance: f64) -> Option<CircularArc> {
    if distance.abs() < ACCURACY || points_coincide(from, to) {
        return None;
    }
    CircularArc::from_points(*vertex, distance.abs(), from, to, distance > 0.0).ok()
}
