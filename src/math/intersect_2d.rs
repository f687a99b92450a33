use super::arc_2d::angle_to_arc_param;
use super::{cross, Point2, Vector2, ACCURACY};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
/// Lines whose direction determinant is below [`ACCURACY`] are treated as
/// parallel and yield `None`.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let det = cross(d1, d2);
    if det.abs() < ACCURACY {
        return None;
    }
    let dp = p2 - p1;
    let t = cross(&dp, d2) / det;
    let u = cross(&dp, d1) / det;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    // Use a small epsilon to include endpoints.
    let eps = ACCURACY;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Intersection of a line segment with a circular arc in 2D.
///
/// Returns a vector of `(point, t_seg, t_arc)` where:
/// - `t_seg` is the parameter on the segment `[0, 1]`
/// - `t_arc` is the parameter on the arc `[0, 1]`
#[must_use]
pub fn line_arc_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    center: &Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
) -> Vec<(Point2, f64, f64)> {
    let mut results = Vec::new();
    if radius < ACCURACY || sweep.abs() < ACCURACY {
        return results;
    }

    let d = a1 - a0;
    let seg_len_sq = d.norm_squared();
    if seg_len_sq < ACCURACY * ACCURACY {
        return results;
    }

    // Substitute parametric line into circle equation:
    // |a0 + t*d - c|² = r²
    let f = a0 - center;
    let a = seg_len_sq;
    let b = 2.0 * f.dot(&d);
    let c = f.norm_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    // Tangency is decided on the distance from the center to the line.
    let gap = cross(&f, &d).abs() / seg_len_sq.sqrt() - radius;
    if gap > ACCURACY * 100.0 {
        return results;
    }
    let disc_sqrt = discriminant.max(0.0).sqrt();

    let eps = ACCURACY;
    let t_roots = if gap.abs() <= ACCURACY * 100.0 {
        vec![-b / (2.0 * a)]
    } else {
        vec![(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)]
    };

    for t_seg in t_roots {
        if t_seg < -eps || t_seg > 1.0 + eps {
            continue;
        }
        let t_seg = t_seg.clamp(0.0, 1.0);
        let p = a0 + d * t_seg;

        // Check if point is within the arc's angular range.
        let angle = (p.y - center.y).atan2(p.x - center.x);
        if let Some(t_arc) = angle_to_arc_param(angle, start_angle, sweep) {
            results.push((p, t_seg, t_arc));
        }
    }

    results
}

/// Intersection of two circular arcs in 2D.
///
/// Returns a vector of `(point, t1, t2)` where `t1` and `t2` are arc parameters in `[0, 1]`.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn arc_arc_intersect_2d(
    c1: &Point2,
    r1: f64,
    start1: f64,
    sweep1: f64,
    c2: &Point2,
    r2: f64,
    start2: f64,
    sweep2: f64,
) -> Vec<(Point2, f64, f64)> {
    let mut results = Vec::new();
    if r1 < ACCURACY || r2 < ACCURACY {
        return results;
    }

    let delta = c2 - c1;
    let dist_sq = delta.norm_squared();
    let dist = dist_sq.sqrt();

    if dist < ACCURACY {
        // Concentric circles: no isolated intersection points.
        return results;
    }

    let tol = ACCURACY * 100.0;
    let sum = r1 + r2;
    let diff = (r1 - r2).abs();
    if dist > sum + tol || dist < diff - tol {
        return results;
    }

    // Distance from c1 along the line c1→c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();

    let axis = delta / dist;
    let mid = c1 + axis * a;
    let perp = Vector2::new(-axis.y, axis.x);

    let candidates = if h < tol {
        vec![mid]
    } else {
        vec![mid + perp * h, mid - perp * h]
    };

    for p in candidates {
        let angle1 = (p.y - c1.y).atan2(p.x - c1.x);
        let angle2 = (p.y - c2.y).atan2(p.x - c2.x);

        if let (Some(t1), Some(t2)) = (
            angle_to_arc_param(angle1, start1, sweep1),
            angle_to_arc_param(angle2, start2, sweep2),
        ) {
            results.push((p, t1, t2));
        }
    }

    results
}
