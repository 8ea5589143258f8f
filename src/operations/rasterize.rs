use crate::geometry::profile::WidthProfile;
use crate::geometry::BoundaryPolygon;
use crate::math::corner::left_normal;
use crate::math::{Point2, SEGMENT_EPS};

/// Result of rasterizing one straight segment: the boundary ladder (absent
/// for degenerate segments) and the arclength at the segment's end.
#[derive(Debug, Clone)]
pub struct SegmentStrip {
    pub polygon: Option<BoundaryPolygon>,
    pub exit_arclength: f64,
}

/// Discretizes a straight sub-path into a width-varying boundary ladder.
///
/// Samples are evenly spaced along the segment; the offset direction is
/// the fixed segment normal. Segments shorter than [`SEGMENT_EPS`] produce
/// no geometry (skipped, not an error) to avoid zero-area or NaN-normal
/// polygons.
#[derive(Debug)]
pub struct RasterizeSegment {
    a: Point2,
    b: Point2,
    step: f64,
    entry_arclength: f64,
}

impl RasterizeSegment {
    /// Creates a new rasterization of the segment `a → b`.
    #[must_use]
    pub fn new(a: Point2, b: Point2, step: f64) -> Self {
        Self {
            a,
            b,
            step,
            entry_arclength: 0.0,
        }
    }

    /// Sets the running arclength at the segment entry.
    #[must_use]
    pub fn with_entry_arclength(mut self, entry_arclength: f64) -> Self {
        self.entry_arclength = entry_arclength;
        self
    }

    /// Executes the rasterization, evaluating the profile at
    /// `entry + cumulative distance` for every sample.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn execute(&self, profile: &dyn WidthProfile) -> SegmentStrip {
        let chord = self.b - self.a;
        let len = chord.norm();
        if len <= SEGMENT_EPS {
            return SegmentStrip {
                polygon: None,
                exit_arclength: self.entry_arclength + len,
            };
        }

        let n = (len / self.step).ceil() as usize + 1;
        let actual_step = len / ((n - 1) as f64);
        let normal = left_normal(chord / len);

        let mut left = Vec::with_capacity(n);
        let mut right = Vec::with_capacity(n);
        for i in 0..n {
            let t = (i as f64) / ((n - 1) as f64);
            let pt = self.a + chord * t;
            let half = profile.width_at(self.entry_arclength + (i as f64) * actual_step) * 0.5;
            left.push(pt + normal * half);
            right.push(pt - normal * half);
        }

        SegmentStrip {
            polygon: Some(BoundaryPolygon::from_sides(left, right)),
            exit_arclength: self.entry_arclength + len,
        }
    }
}
