use crate::math::Point2;

/// Drawing command of a renderable path.
///
/// Arcs carry their full circle description so a renderer can draw them
/// exactly; `end` repeats the arc's end point for renderers that only track
/// the current position.
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(Point2),
    LineTo(Point2),
    ArcTo {
        center: Point2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
        end: Point2,
    },
    /// Closes the current subpath back to its `MoveTo` point.
    Close,
}

impl PathCommand {
    /// Current point after executing the command, if it moves the pen.
    #[must_use]
    pub fn end_point(&self) -> Option<Point2> {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) | Self::ArcTo { end: p, .. } => Some(*p),
            Self::Close => None,
        }
    }
}
