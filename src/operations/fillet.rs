use std::f64::consts::FRAC_PI_2;

use crate::geometry::profile::WidthProfile;
use crate::geometry::BoundaryPolygon;
use crate::math::corner::{corner_angle, corner_bisector, turn_direction, TurnDirection};
use crate::math::{Point2, Vector2};
use crate::operations::classify::fillet_feasible;

/// A tangent circular arc replacing one polyline corner.
///
/// The arc runs from `theta_start` to `theta_end` around `center`; the
/// sweep is signed (positive = counter-clockwise) and its magnitude is
/// `π - corner_angle`, so it never wraps.
#[derive(Debug, Clone, Copy)]
pub struct FilletGeometry {
    center: Point2,
    radius: f64,
    theta_start: f64,
    theta_end: f64,
    turn: TurnDirection,
}

impl FilletGeometry {
    /// Solves the fillet circle for one corner, re-validating the
    /// classifier's preconditions rather than trusting the caller.
    ///
    /// Returns `None` when the corner cannot carry the fillet (degenerate
    /// edges, collinear/reversing corner, or radius too large for the
    /// shorter adjacent segment).
    #[must_use]
    pub fn solve(start: &Point2, corner: &Point2, end: &Point2, radius: f64) -> Option<Self> {
        if !fillet_feasible(start, corner, end, radius) {
            return None;
        }
        let angle = corner_angle(start, corner, end)?;
        let bisector = corner_bisector(start, corner, end)?;

        let center = corner + bisector * (radius / (angle / 2.0).sin());

        // Midpoint angle from the circle center to the corner; the two
        // tangent sweep angles sit symmetrically around it.
        let delta = corner - center;
        let theta_mid = delta.y.atan2(delta.x);
        let spread = (std::f64::consts::PI - angle) / 2.0;
        let mut theta_start = theta_mid - spread;
        let mut theta_end = theta_mid + spread;

        // Sweep direction: the candidate endpoint nearer to `start` is the
        // arc's entry point.
        let p1 = center + radius * Vector2::new(theta_start.cos(), theta_start.sin());
        let p2 = center + radius * Vector2::new(theta_end.cos(), theta_end.sin());
        if (start - p2).norm() < (start - p1).norm() {
            std::mem::swap(&mut theta_start, &mut theta_end);
        }

        Some(Self {
            center,
            radius,
            theta_start,
            theta_end,
            turn: turn_direction(start, corner, end),
        })
    }

    /// Fillet circle center.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Fillet radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed sweep from entry to exit tangent angle.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.theta_end - self.theta_start
    }

    /// Handedness of the turn this fillet rounds off.
    #[must_use]
    pub fn turn(&self) -> TurnDirection {
        self.turn
    }

    /// Arc length `r · |sweep|`.
    #[must_use]
    pub fn arc_length(&self) -> f64 {
        self.radius * self.sweep().abs()
    }

    /// Point on the fillet circle at angle `theta`.
    #[must_use]
    pub fn point_at(&self, theta: f64) -> Point2 {
        self.center + self.radius * Vector2::new(theta.cos(), theta.sin())
    }

    /// Tangent point where the arc leaves the entry edge.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        self.point_at(self.theta_start)
    }

    /// Tangent point where the arc meets the exit edge.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        self.point_at(self.theta_end)
    }

    /// Arc sample count: `ceil((π/2)·r/step)`, at least 2. A density
    /// rule, not a correctness requirement.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sample_count(&self, step: f64) -> usize {
        ((FRAC_PI_2 * self.radius / step).ceil() as usize).max(2)
    }

    /// Evenly spaced centerline points along the arc.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample_points(&self, step: f64) -> Vec<Point2> {
        let n = self.sample_count(step);
        let sweep = self.sweep();
        (0..n)
            .map(|i| self.point_at(self.theta_start + sweep * (i as f64) / ((n - 1) as f64)))
            .collect()
    }

    /// Rasterizes the arc into a width-varying boundary ladder.
    ///
    /// The outward normal at each sample is the radial direction with its
    /// sign fixed by the turn handedness; arclength advances by `r·Δθ`
    /// per sample starting from `entry_arclength`.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn rasterize(
        &self,
        step: f64,
        entry_arclength: f64,
        profile: &dyn WidthProfile,
    ) -> FilletArc {
        let n = self.sample_count(step);
        let sweep = self.sweep();
        let theta_step = sweep.abs() / ((n - 1) as f64);
        // Left side of the travel direction: the inside of a left bend,
        // the outside of a right one.
        let left_sign = match self.turn {
            TurnDirection::Left => -1.0,
            TurnDirection::Right => 1.0,
        };

        let mut left = Vec::with_capacity(n);
        let mut right = Vec::with_capacity(n);
        let mut centerline = Vec::with_capacity(n);
        let mut coord = entry_arclength;

        for i in 0..n {
            if i > 0 {
                coord += self.radius * theta_step;
            }
            let theta = self.theta_start + sweep * (i as f64) / ((n - 1) as f64);
            let radial = Vector2::new(theta.cos(), theta.sin());
            let pt = self.center + self.radius * radial;
            let half = profile.width_at(coord) * 0.5;
            left.push(pt + radial * (left_sign * half));
            right.push(pt - radial * (left_sign * half));
            centerline.push(pt);
        }

        FilletArc {
            polygon: BoundaryPolygon::from_sides(left, right),
            centerline,
            exit_arclength: coord,
        }
    }
}

/// Output of fillet synthesis: the arc boundary polygon, the arc
/// centerline points, and the arclength at the arc exit.
#[derive(Debug, Clone)]
pub struct FilletArc {
    pub polygon: BoundaryPolygon,
    pub centerline: Vec<Point2>,
    pub exit_arclength: f64,
}

/// Replaces one eligible corner with a tangent circular arc and its
/// offset boundary.
#[derive(Debug)]
pub struct SynthesizeFillet {
    start: Point2,
    corner: Point2,
    end: Point2,
    radius: f64,
    step: f64,
    entry_point: Point2,
    entry_arclength: f64,
}

impl SynthesizeFillet {
    /// Creates a new fillet synthesis for the corner `(start, corner, end)`.
    ///
    /// The entry point defaults to `start` at arclength 0; callers mid-path
    /// override it with [`Self::with_entry`].
    #[must_use]
    pub fn new(start: Point2, corner: Point2, end: Point2, radius: f64, step: f64) -> Self {
        Self {
            start,
            corner,
            end,
            radius,
            step,
            entry_point: start,
            entry_arclength: 0.0,
        }
    }

    /// Sets the last emitted centerline point and its running arclength.
    #[must_use]
    pub fn with_entry(mut self, point: Point2, arclength: f64) -> Self {
        self.entry_point = point;
        self.entry_arclength = arclength;
        self
    }

    /// Executes the synthesis.
    ///
    /// Returns `None` (the "not fillet-able" sentinel) when the corner
    /// fails re-validation; the caller then treats the corner as sharp.
    /// The arc's first width sample sits at the entry arclength advanced
    /// by the straight run-up from the entry point to the tangent point.
    #[must_use]
    pub fn execute(&self, profile: &dyn WidthProfile) -> Option<FilletArc> {
        let geo = FilletGeometry::solve(&self.start, &self.corner, &self.end, self.radius)?;
        let entry = self.entry_arclength + (geo.start_point() - self.entry_point).norm();
        Some(geo.rasterize(self.step, entry, profile))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::ConstantWidth;
    use std::f64::consts::PI;

    const TOL: f64 = 1e-9;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn right_angle_geo() -> FilletGeometry {
        FilletGeometry::solve(&p(0.0, 0.0), &p(10.0, 0.0), &p(10.0, 10.0), 2.0).unwrap()
    }

    #[test]
    fn right_angle_circle() {
        let geo = right_angle_geo();
        approx::assert_relative_eq!(geo.center().x, 8.0, epsilon = TOL);
        approx::assert_relative_eq!(geo.center().y, 2.0, epsilon = TOL);
        assert!((geo.radius() - 2.0).abs() < TOL);
        assert!((geo.arc_length() - PI).abs() < TOL);
    }

    #[test]
    fn tangent_points_on_both_edges() {
        let geo = right_angle_geo();
        let s = geo.start_point();
        let e = geo.end_point();
        // Entry tangent on the horizontal edge, exit on the vertical edge.
        assert!((s.x - 8.0).abs() < TOL && s.y.abs() < TOL, "start={s:?}");
        assert!((e.x - 10.0).abs() < TOL && (e.y - 2.0).abs() < TOL, "end={e:?}");
    }

    #[test]
    fn solve_declines_degenerate_corners() {
        assert!(FilletGeometry::solve(&p(0.0, 0.0), &p(5.0, 0.0), &p(10.0, 0.0), 1.0).is_none());
        assert!(FilletGeometry::solve(&p(0.0, 0.0), &p(5.0, 0.0), &p(0.0, 0.0), 1.0).is_none());
        // Radius too large for the 10-long edges.
        assert!(
            FilletGeometry::solve(&p(0.0, 0.0), &p(10.0, 0.0), &p(10.0, 10.0), 50.0).is_none()
        );
    }

    #[test]
    fn ladder_sides_sit_at_radial_offsets() {
        let geo = right_angle_geo();
        let arc = geo.rasterize(0.1, 0.0, &ConstantWidth(1.0));
        let n = arc.centerline.len();
        let left = &arc.polygon.exteriors[0][..n];
        // Left turn: the left side hugs the inside of the bend.
        for pt in left {
            let d = (pt - geo.center()).norm();
            assert!((d - 1.5).abs() < 1e-9, "left offset at {d}");
        }
        // Right side is stored reversed in the second half of the ring.
        for pt in &arc.polygon.exteriors[0][n..] {
            let d = (pt - geo.center()).norm();
            assert!((d - 2.5).abs() < 1e-9, "right offset at {d}");
        }
    }

    #[test]
    fn arclength_advances_by_run_up_plus_arc() {
        let op = SynthesizeFillet::new(p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), 2.0, 0.1)
            .with_entry(p(0.0, 0.0), 0.0);
        let arc = op.execute(&ConstantWidth(1.0)).unwrap();
        // Run-up |(8,0)-(0,0)| = 8, arc length = π.
        assert!(
            (arc.exit_arclength - (8.0 + PI)).abs() < 1e-9,
            "exit={}",
            arc.exit_arclength
        );
    }

    #[test]
    fn synthesize_returns_sentinel_when_infeasible() {
        let op = SynthesizeFillet::new(p(0.0, 0.0), p(5.0, 0.0), p(10.0, 0.0), 1.0, 0.1);
        assert!(op.execute(&ConstantWidth(1.0)).is_none());
    }

    #[test]
    fn sample_count_scales_with_radius_over_step() {
        let geo = right_angle_geo();
        // ceil(π/2 · 2 / 0.1) = 32.
        assert_eq!(geo.sample_count(0.1), 32);
        assert_eq!(geo.sample_count(1000.0), 2);
    }

    #[test]
    fn sweep_sign_agrees_with_turn_handedness() {
        let left =
            FilletGeometry::solve(&p(0.0, 0.0), &p(10.0, 0.0), &p(10.0, 10.0), 2.0).unwrap();
        assert_eq!(left.turn(), TurnDirection::Left);
        assert!(left.sweep() > 0.0, "sweep={}", left.sweep());

        let right =
            FilletGeometry::solve(&p(0.0, 0.0), &p(10.0, 0.0), &p(10.0, -10.0), 2.0).unwrap();
        assert_eq!(right.turn(), TurnDirection::Right);
        assert!(right.sweep() < 0.0, "sweep={}", right.sweep());
    }

    #[test]
    fn nearly_straight_corner_still_fillets() {
        // Turn a few microradians shy of collinear: well outside the
        // degenerate-angle window, so the solver must still produce a
        // (vanishingly short) arc with the entry tangent nearer the start.
        let geo =
            FilletGeometry::solve(&p(0.0, 0.0), &p(5.0, 0.0), &p(10.0, 1e-5), 1.0).unwrap();
        let sweep = geo.sweep();
        assert!(sweep > 0.0, "left bend, sweep={sweep}");
        assert!(sweep < 1e-5, "sweep={sweep}");
        assert!((geo.arc_length() - sweep).abs() < 1e-15);
        let to_entry = (geo.start_point() - p(0.0, 0.0)).norm();
        let to_exit = (geo.end_point() - p(0.0, 0.0)).norm();
        assert!(to_entry < to_exit, "entry={to_entry} exit={to_exit}");
        // Both tangent points hug the corner itself.
        assert!((geo.start_point() - p(5.0, 0.0)).norm() < 1e-4);
        assert!((geo.end_point() - p(5.0, 0.0)).norm() < 1e-4);
    }

    #[test]
    fn right_turn_mirrors_handedness() {
        let geo =
            FilletGeometry::solve(&p(0.0, 0.0), &p(10.0, 0.0), &p(10.0, -10.0), 2.0).unwrap();
        assert!((geo.center().x - 8.0).abs() < TOL);
        assert!((geo.center().y + 2.0).abs() < TOL);
        let arc = geo.rasterize(0.1, 0.0, &ConstantWidth(1.0));
        let n = arc.centerline.len();
        // Right turn: left side is the outside of the bend.
        for pt in &arc.polygon.exteriors[0][..n] {
            let d = (pt - geo.center()).norm();
            assert!((d - 2.5).abs() < 1e-9, "left offset at {d}");
        }
    }
}
