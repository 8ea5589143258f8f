use std::collections::BTreeSet;

use crate::geometry::WaypointPath;
use crate::math::corner::{angle_is_degenerate, corner_angle};
use crate::math::Point2;

/// Relative margin on the tangent-length test. A fillet whose tangent
/// length reaches the shorter adjacent segment (within this margin) would
/// overrun the segment and is classified infeasible; exact equality is
/// infeasible.
const FEASIBILITY_MARGIN: f64 = 1e-9;

/// Decides whether a single corner can carry a fillet of the given radius.
///
/// Infeasible when: either adjacent edge is degenerate (start==corner or
/// corner==end), the corner angle is within epsilon of 0 or π (reversing
/// or collinear — the fillet is undefined), or the tangent length
/// `r / tan(angle/2)` reaches the shorter adjacent segment.
#[must_use]
pub fn fillet_feasible(start: &Point2, corner: &Point2, end: &Point2, radius: f64) -> bool {
    if radius <= 0.0 {
        return false;
    }
    let Some(angle) = corner_angle(start, corner, end) else {
        return false;
    };
    if angle_is_degenerate(angle) {
        return false;
    }
    let tangent_len = radius / (angle / 2.0).tan();
    let shorter = (start - corner).norm().min((end - corner).norm());
    tangent_len < shorter * (1.0 - FEASIBILITY_MARGIN)
}

/// Classifies every interior corner of a path as fillet-able or not.
///
/// Corners in the caller-supplied exclusion set (waypoint indices,
/// reflecting the caller's numeric-precision policy) are infeasible
/// regardless of geometry. Pure; no side effects.
#[derive(Debug)]
pub struct ClassifyCorners<'a> {
    path: &'a WaypointPath,
    excluded: BTreeSet<usize>,
}

impl<'a> ClassifyCorners<'a> {
    /// Creates a new corner classification over `path`.
    #[must_use]
    pub fn new(path: &'a WaypointPath) -> Self {
        Self {
            path,
            excluded: BTreeSet::new(),
        }
    }

    /// Adds a caller-supplied set of excluded corner (waypoint) indices.
    #[must_use]
    pub fn with_excluded(mut self, excluded: BTreeSet<usize>) -> Self {
        self.excluded = excluded;
        self
    }

    /// Returns one flag per interior corner, in path order; entry `i`
    /// refers to waypoint `i + 1`.
    #[must_use]
    pub fn execute(&self) -> Vec<bool> {
        let pts = self.path.points();
        let radius = self.path.fillet_radius();
        let mut flags = Vec::with_capacity(self.path.corner_count());
        for i in 1..pts.len().saturating_sub(1) {
            let feasible = !self.excluded.contains(&i)
                && fillet_feasible(&pts[i - 1], &pts[i], &pts[i + 1], radius);
            flags.push(feasible);
        }
        flags
    }
}
