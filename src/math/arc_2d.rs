/// 2D arc math utilities.
///
/// Arcs are described by `center`, `radius`, `start_angle` and a signed
/// `sweep`: `sweep > 0` is counter-clockwise, `sweep < 0` is clockwise.
/// Parameters `t` in `[0, 1]` run from the start point to the end point.
use std::f64::consts::{PI, TAU};

use super::{Point2, Vector2, ACCURACY};

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Computes the unit tangent direction on an arc at parameter `t` in `[0, 1]`.
///
/// The tangent points in the direction of increasing `t`.
#[must_use]
pub fn arc_tangent_at(start_angle: f64, sweep: f64, t: f64) -> Vector2 {
    let angle = start_angle + sweep * t;
    let sign = if sweep >= 0.0 { 1.0 } else { -1.0 };
    // Tangent to circle at angle θ is (-sin θ, cos θ) for CCW; negate for CW.
    Vector2::new(-sign * angle.sin(), sign * angle.cos())
}

/// Converts an absolute angle to an arc parameter `t` in `[0, 1]`.
///
/// Returns `None` if the angle is not within the arc's angular range.
#[must_use]
pub fn angle_to_arc_param(angle: f64, start_angle: f64, sweep: f64) -> Option<f64> {
    if sweep.abs() < ACCURACY {
        return None;
    }
    let delta = angular_offset(angle, start_angle, sweep);
    let t = delta / sweep;
    let eps = ACCURACY * 100.0;
    if t >= -eps && t <= 1.0 + eps {
        Some(t.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Angular distance travelled from `start_angle` to `angle` in the sweep
/// direction, in `(-ε, 2π]` for CCW sweeps and `[-2π, ε)` for CW sweeps.
#[must_use]
pub fn angular_offset(angle: f64, start_angle: f64, sweep: f64) -> f64 {
    let eps = ACCURACY * 100.0;
    let mut delta = angle - start_angle;

    if sweep >= 0.0 {
        while delta < -eps {
            delta += TAU;
        }
        while delta > TAU + eps {
            delta -= TAU;
        }
    } else {
        while delta > eps {
            delta -= TAU;
        }
        while delta < -TAU - eps {
            delta += TAU;
        }
    }
    delta
}

/// Computes the number of line segments needed to approximate an arc
/// within the given tolerance.
#[must_use]
pub fn arc_subdivision_count(radius: f64, abs_sweep: f64, tolerance: f64) -> u32 {
    if radius < ACCURACY || abs_sweep < ACCURACY || tolerance <= 0.0 {
        return 1;
    }
    // From the sagitta formula: sagitta = r * (1 - cos(θ/2))
    // For a given tolerance: θ = 2 * acos(1 - tolerance/r)
    let max_angle = if tolerance >= radius {
        PI
    } else {
        2.0 * (1.0 - tolerance / radius).acos()
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (abs_sweep / max_angle).ceil() as u32;
    n.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const TOL: f64 = 1e-10;

    #[test]
    fn semicircle_ccw_midpoint() {
        // CCW semicircle centered at origin from angle π through 3π/2.
        let c = Point2::origin();
        let pm = arc_point_at(&c, 1.0, PI, PI, 0.5);
        assert!(pm.x.abs() < TOL, "pm.x={}", pm.x);
        assert!((pm.y + 1.0).abs() < TOL, "pm.y={}", pm.y);
    }

    #[test]
    fn semicircle_cw_goes_through_top() {
        let c = Point2::new(1.0, 0.0);
        let pm = arc_point_at(&c, 1.0, PI, -PI, 0.5);
        assert!((pm.x - 1.0).abs() < TOL, "pm.x={}", pm.x);
        assert!((pm.y - 1.0).abs() < TOL, "pm.y={}", pm.y);
    }

    #[test]
    fn tangent_is_unit_and_follows_sweep() {
        let t0 = arc_tangent_at(PI, PI, 0.0);
        assert!((t0.norm() - 1.0).abs() < TOL);
        assert!(t0.x.abs() < TOL, "tx={}", t0.x);
        assert!((t0.y + 1.0).abs() < TOL, "ty={}", t0.y);

        let cw = arc_tangent_at(0.0, -FRAC_PI_2, 0.0);
        assert!((cw.y + 1.0).abs() < TOL, "cw ty={}", cw.y);
    }

    #[test]
    fn angle_param_inside_and_outside() {
        let t = angle_to_arc_param(FRAC_PI_2, 0.0, PI).unwrap_or(-1.0);
        assert!((t - 0.5).abs() < TOL, "t={t}");
        assert!(angle_to_arc_param(-FRAC_PI_2, 0.0, PI).is_none());
        // Clockwise from 0 down to -π/2 contains 7π/4.
        let t = angle_to_arc_param(1.75 * PI, 0.0, -FRAC_PI_2).unwrap_or(-1.0);
        assert!((t - 0.5).abs() < TOL, "t={t}");
    }

    #[test]
    fn angle_param_rejects_zero_sweep() {
        assert!(angle_to_arc_param(0.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn subdivision_count_tracks_tolerance() {
        assert_eq!(arc_subdivision_count(1.0, PI, 10.0), 1);
        let n = arc_subdivision_count(1.0, PI, 0.001);
        assert!(n > 10, "expected many subdivisions, got {n}");
    }
}
