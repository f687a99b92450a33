mod intersect;

pub use intersect::{CurveCurveIntersect, IntersectionResult, PolylineIntersect2D};
