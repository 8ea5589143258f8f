pub mod corner;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Segments shorter than this produce no geometry when rasterized.
pub const SEGMENT_EPS: f64 = 1e-9;

/// Corner angles within this of 0 or π are treated as degenerate
/// (collinear or reversing) and never filleted.
pub const ANGLE_EPS: f64 = 1e-9;
