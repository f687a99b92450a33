mod arc;
mod circle;
mod line;
mod segment;

pub use arc::CircularArc;
pub use circle::{Circle, CircleLine};
pub use line::StraightLine;
pub use segment::LineSegment;

use crate::error::{GeometryError, Result};
use crate::geometry::{Aabb2, Polyline};
use crate::math::{Point2, Vector2, ACCURACY};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.t_min.is_finite() && self.t_max.is_finite()
    }

    /// Checks that `t` lies in the domain, allowing [`ACCURACY`] of slack.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` otherwise.
    pub fn check(&self, t: f64) -> Result<()> {
        if t.is_nan() || t < self.t_min - ACCURACY || t > self.t_max + ACCURACY {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: self.t_min,
                max: self.t_max,
            }
            .into());
        }
        Ok(())
    }
}

/// Trait for parametric planar curves.
pub trait Curve {
    /// Evaluates the curve at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn point_at(&self, t: f64) -> Result<Point2>;

    /// Computes the unit tangent vector at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or the tangent is degenerate.
    fn tangent_at(&self, t: f64) -> Result<Vector2>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;

    /// Arc length; infinite for unbounded curves.
    fn length(&self) -> f64;

    fn bounding_box(&self) -> Aabb2;

    /// Human-readable shape name used in error messages.
    fn shape_name(&self) -> &'static str;

    fn is_bounded(&self) -> bool {
        self.domain().is_finite()
    }

    /// Returns the point at the start of the domain.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Unbounded` for curves with an infinite domain.
    fn first_point(&self) -> Result<Point2> {
        let domain = bounded_domain(self)?;
        self.point_at(domain.t_min)
    }

    /// Returns the point at the end of the domain.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Unbounded` for curves with an infinite domain.
    fn last_point(&self) -> Result<Point2> {
        let domain = bounded_domain(self)?;
        self.point_at(domain.t_max)
    }

    /// Samples the curve at `n + 1` evenly spaced parameters.
    ///
    /// Closed curves yield a ring with `n` vertices.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Unbounded` for curves with an infinite domain,
    /// or `GeometryError::Degenerate` if `n` is zero.
    fn as_polyline(&self, n: usize) -> Result<Polyline> {
        let domain = bounded_domain(self)?;
        if n == 0 {
            return Err(GeometryError::Degenerate("polyline needs at least one edge".into()).into());
        }
        #[allow(clippy::cast_precision_loss)]
        let step = (domain.t_max - domain.t_min) / n as f64;
        let count = if self.is_closed() { n } else { n + 1 };
        let mut vertices = Vec::with_capacity(count);
        for i in 0..count {
            #[allow(clippy::cast_precision_loss)]
            let t = if i == n {
                domain.t_max
            } else {
                domain.t_min + step * i as f64
            };
            vertices.push(self.point_at(t)?);
        }
        Ok(Polyline::new(vertices, self.is_closed()))
    }
}

fn bounded_domain<C: Curve + ?Sized>(curve: &C) -> Result<CurveDomain> {
    let domain = curve.domain();
    if domain.is_finite() {
        Ok(domain)
    } else {
        Err(GeometryError::Unbounded {
            shape: curve.shape_name(),
        }
        .into())
    }
}
