use crate::math::corner::segment_direction;
use crate::math::{Point2, Vector2, SEGMENT_EPS};
use crate::operations::fillet::FilletGeometry;

/// One piece of a filleted centerline: a straight run or a fillet arc.
#[derive(Debug, Clone)]
pub enum CenterlineSpan {
    Line { a: Point2, b: Point2 },
    Arc(FilletGeometry),
}

impl CenterlineSpan {
    /// Arclength contributed by this span.
    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Self::Line { a, b } => (b - a).norm(),
            Self::Arc(geo) => geo.arc_length(),
        }
    }
}

/// The filleted 1-D path a trace follows: an ordered span list plus the
/// sampled centerline points and total arclength.
///
/// Built once per composer call and shared by every width profile, so all
/// profiles rasterize the identical centerline.
#[derive(Debug, Clone, Default)]
pub struct FilletedCenterline {
    spans: Vec<CenterlineSpan>,
    points: Vec<Point2>,
    total_length: f64,
}

impl FilletedCenterline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a straight span. Zero-length spans are recorded (they keep
    /// the span walk aligned with the waypoints) but contribute no points
    /// beyond deduplication.
    pub(crate) fn push_line(&mut self, a: Point2, b: Point2) {
        if self.points.is_empty() {
            self.points.push(a);
        }
        if (b - a).norm() >= SEGMENT_EPS {
            self.points.push(b);
        }
        self.total_length += (b - a).norm();
        self.spans.push(CenterlineSpan::Line { a, b });
    }

    /// Appends a fillet arc span, sampling its centerline at the density
    /// implied by `step`.
    pub(crate) fn push_arc(&mut self, geo: FilletGeometry, step: f64) {
        let samples = geo.sample_points(step);
        for pt in &samples {
            if let Some(last) = self.points.last() {
                if (pt - last).norm() < SEGMENT_EPS {
                    continue;
                }
            }
            self.points.push(*pt);
        }
        self.total_length += geo.arc_length();
        self.spans.push(CenterlineSpan::Arc(geo));
    }

    /// Spans in path order.
    #[must_use]
    pub fn spans(&self) -> &[CenterlineSpan] {
        &self.spans
    }

    /// Sampled centerline points (for pin anchoring at path extremities).
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Total filleted arclength.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Unit direction the path leaves its start point, from the first
    /// non-degenerate centerline segment.
    #[must_use]
    pub fn start_direction(&self) -> Option<Vector2> {
        let first = self.points.first()?;
        self.points
            .iter()
            .skip(1)
            .find_map(|pt| segment_direction(first, pt))
    }
}
