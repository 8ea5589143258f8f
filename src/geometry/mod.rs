pub mod boundary;
pub mod centerline;
pub mod path;
pub mod profile;

pub use boundary::BoundaryPolygon;
pub use centerline::{CenterlineSpan, FilletedCenterline};
pub use path::WaypointPath;
pub use profile::{ConstantWidth, LinearTaper, WidthProfile};
