use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::{GeometryError, Result};
use crate::geometry::Aabb2;
use crate::math::arc_2d::{angle_to_arc_param, angular_offset, arc_point_at, arc_tangent_at};
use crate::math::distance_2d::point_to_arc_dist;
use crate::math::transform_2d::AffineTransform2;
use crate::math::{horizontal_angle, normalize_angle, Point2, Vector2, ACCURACY};

use super::{Circle, Curve, CurveDomain};

/// A planar circular arc.
///
/// Defined by a center, a radius, a start angle in `[0, 2π)` and a signed
/// angle extent: positive extents sweep counter-clockwise, negative ones
/// clockwise. The curve parameter is the angle travelled from the start
/// point, so the domain is `[0, |extent|]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularArc {
    center: Point2,
    radius: f64,
    start_angle: f64,
    extent: f64,
}

impl CircularArc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the radius is not positive or
    /// the extent exceeds a full turn.
    pub fn new(center: Point2, radius: f64, start_angle: f64, extent: f64) -> Result<Self> {
        if radius < ACCURACY || !radius.is_finite() {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if !extent.is_finite() || extent.abs() > TAU + ACCURACY {
            return Err(GeometryError::Degenerate(format!(
                "arc extent {extent} exceeds a full turn"
            ))
            .into());
        }
        Ok(Self::from_parts(center, radius, start_angle, extent))
    }

    /// Arc on the circle `(center, radius)` from the angular position of `p0`
    /// to that of `p1`, counter-clockwise when `direct` is `true`.
    ///
    /// Coincident angular positions give a zero-extent arc.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the radius is not positive.
    pub fn from_points(
        center: Point2,
        radius: f64,
        p0: &Point2,
        p1: &Point2,
        direct: bool,
    ) -> Result<Self> {
        let t0 = horizontal_angle(&(p0 - center));
        let t1 = horizontal_angle(&(p1 - center));
        let extent = if direct {
            normalize_angle(t1 - t0)
        } else {
            -normalize_angle(t0 - t1)
        };
        Self::new(center, radius, t0, extent)
    }

    /// Builds an arc whose radius the caller has already validated.
    pub(crate) fn from_parts(center: Point2, radius: f64, start_angle: f64, extent: f64) -> Self {
        Self {
            center,
            radius,
            start_angle: normalize_angle(start_angle),
            extent: extent.clamp(-TAU, TAU),
        }
    }

    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Start angle in `[0, 2π)`.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Signed angle extent.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// End angle in `[0, 2π)`.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        normalize_angle(self.start_angle + self.extent)
    }

    /// `true` for a counter-clockwise sweep.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.extent.is_sign_positive()
    }

    #[must_use]
    pub fn supporting_circle(&self) -> Circle {
        Circle::from_parts(self.center, self.radius, self.is_direct())
    }

    /// Point at fraction `s` in `[0, 1]` of the sweep.
    #[must_use]
    pub fn point_at_fraction(&self, s: f64) -> Point2 {
        arc_point_at(&self.center, self.radius, self.start_angle, self.extent, s)
    }

    /// Unit tangent at fraction `s` in `[0, 1]` of the sweep.
    #[must_use]
    pub fn tangent_at_fraction(&self, s: f64) -> Vector2 {
        arc_tangent_at(self.start_angle, self.extent, s)
    }

    #[must_use]
    pub fn start_point(&self) -> Point2 {
        self.point_at_fraction(0.0)
    }

    #[must_use]
    pub fn end_point(&self) -> Point2 {
        self.point_at_fraction(1.0)
    }

    /// Returns `true` if the absolute `angle` is swept by the arc.
    #[must_use]
    pub fn contains_angle(&self, angle: f64) -> bool {
        angle_to_arc_param(angle, self.start_angle, self.extent).is_some()
    }

    /// Curve parameter of a point assumed to lie on the supporting circle.
    ///
    /// Points whose angle falls outside the sweep snap to the parameter of
    /// the nearer extremity.
    #[must_use]
    pub fn position(&self, point: &Point2) -> f64 {
        let angle = horizontal_angle(&(point - self.center));
        if self.contains_angle(angle) {
            return angular_offset(angle, self.start_angle, self.extent)
                .abs()
                .min(self.extent.abs());
        }
        if (point - self.start_point()).norm() <= (point - self.end_point()).norm() {
            0.0
        } else {
            self.extent.abs()
        }
    }

    /// Minimum distance from `point` to the arc.
    #[must_use]
    pub fn distance(&self, point: &Point2) -> f64 {
        point_to_arc_dist(point, &self.center, self.radius, self.start_angle, self.extent)
    }

    /// Concentric arc at signed distance `d`; positive `d` moves to the right
    /// of the direction of travel (outward for counter-clockwise arcs).
    ///
    /// Returns `None` if the radius would collapse.
    #[must_use]
    pub fn parallel(&self, d: f64) -> Option<Self> {
        let sign = if self.is_direct() { 1.0 } else { -1.0 };
        let radius = self.radius + sign * d;
        if radius < ACCURACY {
            return None;
        }
        Some(Self::from_parts(
            self.center,
            radius,
            self.start_angle,
            self.extent,
        ))
    }

    /// Same arc traversed from end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::from_parts(
            self.center,
            self.radius,
            self.start_angle + self.extent,
            -self.extent,
        )
    }

    /// Image under an angle-preserving affine map.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the map is not a similarity,
    /// since the image would be an elliptic arc.
    pub fn transform(&self, trans: &AffineTransform2) -> Result<Self> {
        let sim = trans.similarity().ok_or_else(|| {
            GeometryError::Degenerate("arcs only transform under similarities".into())
        })?;
        let center = trans.apply_point(&self.center);
        let start = trans.apply_point(&self.start_point());
        let extent = if sim.reflects {
            -self.extent
        } else {
            self.extent
        };
        Self::new(
            center,
            self.radius * sim.scale,
            horizontal_angle(&(start - center)),
            extent,
        )
    }
}

impl Curve for CircularArc {
    fn point_at(&self, t: f64) -> Result<Point2> {
        self.domain().check(t)?;
        Ok(self.point_at_fraction(fraction(t, self.extent)))
    }

    fn tangent_at(&self, t: f64) -> Result<Vector2> {
        self.domain().check(t)?;
        Ok(self.tangent_at_fraction(fraction(t, self.extent)))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.extent.abs())
    }

    fn is_closed(&self) -> bool {
        (self.extent.abs() - TAU).abs() < ACCURACY
    }

    fn length(&self) -> f64 {
        self.radius * self.extent.abs()
    }

    fn bounding_box(&self) -> Aabb2 {
        let mut bbox = Aabb2 {
            min: self.start_point(),
            max: self.start_point(),
        }
        .including(&self.end_point());
        // Axis-extreme points that the sweep passes through.
        for k in 0..4 {
            let angle = f64::from(k) * FRAC_PI_2;
            if self.contains_angle(angle) {
                let (s, c) = angle.sin_cos();
                bbox = bbox.including(&Point2::new(
                    self.center.x + self.radius * c,
                    self.center.y + self.radius * s,
                ));
            }
        }
        bbox
    }

    fn shape_name(&self) -> &'static str {
        "circular arc"
    }
}

fn fraction(t: f64, extent: f64) -> f64 {
    if extent.abs() < ACCURACY {
        0.0
    } else {
        (t / extent.abs()).clamp(0.0, 1.0)
    }
}
