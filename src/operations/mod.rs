//! Route construction operations.
//!
//! Each operation is a builder struct configured via `new()` and chained
//! `with_*` setters, then run with `execute()`.

pub mod assemble;
pub(crate) mod boolean;
pub mod classify;
pub mod compose;
pub mod fillet;
pub mod rasterize;

pub use assemble::{AssemblePath, AssembledRoute};
pub use classify::{fillet_feasible, ClassifyCorners};
pub use compose::{ComposeRoute, ComposedRoute, ProfileSpec, RouteElement, RouteRole};
pub use fillet::{FilletArc, FilletGeometry, SynthesizeFillet};
pub use rasterize::{RasterizeSegment, SegmentStrip};
