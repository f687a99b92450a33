mod path;
mod tessellate_curve;

pub use path::PathCommand;
pub use tessellate_curve::TessellateCurve;

/// Parameters controlling tessellation quality.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Maximum allowed deviation from the true geometry.
    pub tolerance: f64,
    /// Minimum number of segments for a full turn of arc.
    pub min_segments: usize,
    /// Maximum number of segments for a single arc.
    pub max_segments: usize,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            min_segments: 4,
            max_segments: 256,
        }
    }
}
