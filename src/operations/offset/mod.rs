mod buffer;
mod composite_offset;
mod parallel_curve;
pub mod turn;

pub use buffer::Buffer2D;
pub use composite_offset::CompositeOffset2D;
pub use parallel_curve::ParallelCurve2D;
