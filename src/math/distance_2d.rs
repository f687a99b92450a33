use super::arc_2d::{angle_to_arc_param, arc_point_at};
use super::{Point2, ACCURACY};

/// Returns the minimum distance from point `p` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < ACCURACY * ACCURACY {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (p - (a + d * t)).norm()
}

/// Returns the minimum distance from point `p` to a circular arc.
///
/// If the point's angle (relative to center) falls within the arc range,
/// the distance is `||p - center| - radius|`.
/// Otherwise, the distance is the minimum of the distances to the two arc endpoints.
#[must_use]
pub fn point_to_arc_dist(
    p: &Point2,
    center: &Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
) -> f64 {
    let offset = p - center;
    let dist_to_center = offset.norm();

    let angle = offset.y.atan2(offset.x);
    if dist_to_center > ACCURACY && angle_to_arc_param(angle, start_angle, sweep).is_some() {
        return (dist_to_center - radius).abs();
    }

    let p0 = arc_point_at(center, radius, start_angle, sweep, 0.0);
    let p1 = arc_point_at(center, radius, start_angle, sweep, 1.0);
    (p - p0).norm().min((p - p1).norm())
}
