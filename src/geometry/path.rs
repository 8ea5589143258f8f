use crate::error::{OperationError, Result};
use crate::math::Point2;

/// An ordered sequence of waypoints with a fillet radius and sampling step.
///
/// The path is the nominal centerline a route follows before filleting.
/// Duplicate-adjacent points are accepted; zero-length segments are a
/// recognized degeneracy handled downstream, not an input error.
#[derive(Debug, Clone)]
pub struct WaypointPath {
    points: Vec<Point2>,
    fillet_radius: f64,
    step: f64,
}

impl WaypointPath {
    /// Creates a validated waypoint path.
    ///
    /// `fillet_radius` of 0 disables filleting globally. `step` is the
    /// maximum straight-segment sample spacing and also sizes fillet arc
    /// sampling density.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` when fewer than 2 points are
    /// given, the radius is negative or non-finite, or the step is not a
    /// positive finite number.
    pub fn new(points: Vec<Point2>, fillet_radius: f64, step: f64) -> Result<Self> {
        if points.len() < 2 {
            return Err(OperationError::InvalidInput(
                "at least 2 waypoints are required".to_owned(),
            )
            .into());
        }
        if !fillet_radius.is_finite() || fillet_radius < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "fillet radius must be finite and >= 0, got {fillet_radius}"
            ))
            .into());
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "step must be finite and > 0, got {step}"
            ))
            .into());
        }
        Ok(Self {
            points,
            fillet_radius,
            step,
        })
    }

    /// The waypoints in path order.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// The global fillet radius (0 = no filleting).
    #[must_use]
    pub fn fillet_radius(&self) -> f64 {
        self.fillet_radius
    }

    /// Maximum straight-segment sample spacing.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of interior corners.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.points.len().saturating_sub(2)
    }

    /// Total unfilleted polyline length.
    #[must_use]
    pub fn polyline_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn valid_path() {
        let path = WaypointPath::new(vec![p(0.0, 0.0), p(10.0, 0.0)], 0.0, 0.1).unwrap();
        assert_eq!(path.corner_count(), 0);
        assert!((path.polyline_length() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_single_point() {
        assert!(WaypointPath::new(vec![p(0.0, 0.0)], 0.0, 0.1).is_err());
    }

    #[test]
    fn rejects_negative_radius() {
        assert!(WaypointPath::new(vec![p(0.0, 0.0), p(1.0, 0.0)], -1.0, 0.1).is_err());
    }

    #[test]
    fn rejects_bad_step() {
        assert!(WaypointPath::new(vec![p(0.0, 0.0), p(1.0, 0.0)], 0.0, 0.0).is_err());
        assert!(WaypointPath::new(vec![p(0.0, 0.0), p(1.0, 0.0)], 0.0, f64::NAN).is_err());
    }

    #[test]
    fn duplicate_adjacent_points_accepted() {
        let path =
            WaypointPath::new(vec![p(0.0, 0.0), p(0.0, 0.0), p(5.0, 0.0)], 0.0, 0.1).unwrap();
        assert_eq!(path.corner_count(), 1);
    }
}
