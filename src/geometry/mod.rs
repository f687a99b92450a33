mod bounding_box;
mod composite;
pub mod curve;
mod domain;
mod piece;
mod point_set;
mod polyline;

pub use bounding_box::Aabb2;
pub use composite::{CompositeCurve, CompositeCurveBuilder};
pub use curve::{
    Circle, CircleLine, CircularArc, Curve, CurveDomain, LineSegment, StraightLine,
};
pub use domain::BufferDomain;
pub use piece::{CurvePiece, PieceIntersection};
pub use point_set::PointSet;
pub use polyline::Polyline;
