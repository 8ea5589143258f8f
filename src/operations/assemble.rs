use std::collections::BTreeSet;

use crate::error::{GeometryError, Result};
use crate::geometry::profile::{DomainGuard, WidthProfile};
use crate::geometry::{BoundaryPolygon, CenterlineSpan, FilletedCenterline, WaypointPath};
use crate::math::Point2;
use crate::operations::boolean::union_boundaries;
use crate::operations::classify::ClassifyCorners;
use crate::operations::fillet::FilletGeometry;
use crate::operations::rasterize::RasterizeSegment;

/// One assembled route boundary: the unioned polygon, the filleted
/// centerline points (for pin anchoring), the total arclength, and a list
/// of silently absorbed geometric edge cases.
#[derive(Debug, Clone)]
pub struct AssembledRoute {
    pub boundary: BoundaryPolygon,
    pub centerline: Vec<Point2>,
    pub length: f64,
    pub diagnostics: Vec<String>,
}

/// Walks a waypoint path, fillets eligible corners, rasterizes every span
/// against a width profile, and unions the sub-polygons into one boundary.
#[derive(Debug)]
pub struct AssemblePath<'a> {
    path: &'a WaypointPath,
    excluded: BTreeSet<usize>,
}

impl<'a> AssemblePath<'a> {
    /// Creates a new assembly over `path`.
    #[must_use]
    pub fn new(path: &'a WaypointPath) -> Self {
        Self {
            path,
            excluded: BTreeSet::new(),
        }
    }

    /// Adds a caller-supplied corner exclusion set (waypoint indices).
    #[must_use]
    pub fn with_excluded(mut self, excluded: BTreeSet<usize>) -> Self {
        self.excluded = excluded;
        self
    }

    /// Builds the filleted centerline: straight spans up to each fillet's
    /// entry tangent point, arc spans for fillet-able corners, and sharp
    /// corners wherever the classifier or the fillet solver declines.
    ///
    /// Zero fillet radius short-circuits all fillet logic; a 2-point path
    /// emits one straight span with no corner logic.
    #[must_use]
    pub fn centerline(&self) -> FilletedCenterline {
        let pts = self.path.points();
        let radius = self.path.fillet_radius();
        let step = self.path.step();
        let mut cl = FilletedCenterline::new();

        if radius == 0.0 || pts.len() == 2 {
            for w in pts.windows(2) {
                cl.push_line(w[0], w[1]);
            }
            return cl;
        }

        let feasible = ClassifyCorners::new(self.path)
            .with_excluded(self.excluded.clone())
            .execute();

        let mut last = pts[0];
        for i in 1..pts.len() - 1 {
            let corner = pts[i];
            if feasible[i - 1] {
                if let Some(geo) = FilletGeometry::solve(&pts[i - 1], &corner, &pts[i + 1], radius)
                {
                    cl.push_line(last, geo.start_point());
                    cl.push_arc(geo, step);
                    last = geo.end_point();
                    continue;
                }
                // The solver re-validates and may still decline.
                tracing::debug!(corner = i, "fillet solve declined, corner kept sharp");
            }
            cl.push_line(last, corner);
            last = corner;
        }
        cl.push_line(last, pts[pts.len() - 1]);
        cl
    }

    /// Assembles the boundary for one profile, building the centerline
    /// internally.
    ///
    /// # Errors
    ///
    /// See [`Self::execute_with`].
    pub fn execute(&self, profile: &dyn WidthProfile) -> Result<AssembledRoute> {
        self.execute_with(&self.centerline(), profile)
    }

    /// Assembles the boundary for one profile over a prebuilt centerline
    /// (the composer reuses one centerline across profiles).
    ///
    /// # Errors
    ///
    /// - `GeometryError::ProfileDomainViolation` if the profile was queried
    ///   outside `[0, total_length]` — an arclength bookkeeping defect.
    /// - `GeometryError::Degenerate` if consumed arclength drifts from the
    ///   centerline length beyond 1e-6 relative tolerance.
    /// - `OperationError::Failed` if the path produced no geometry or the
    ///   polygon union failed.
    pub fn execute_with(
        &self,
        centerline: &FilletedCenterline,
        profile: &dyn WidthProfile,
    ) -> Result<AssembledRoute> {
        let step = self.path.step();
        let total = centerline.total_length();
        let guard = DomainGuard::new(profile, total);

        let mut polys: Vec<BoundaryPolygon> = Vec::new();
        let mut diagnostics: Vec<String> = Vec::new();
        let mut coord = 0.0_f64;

        for span in centerline.spans() {
            match span {
                CenterlineSpan::Line { a, b } => {
                    let strip = RasterizeSegment::new(*a, *b, step)
                        .with_entry_arclength(coord)
                        .execute(&guard);
                    if let Some(poly) = strip.polygon {
                        polys.push(poly);
                    } else {
                        tracing::debug!(arclength = coord, "skipped zero-length segment");
                        diagnostics
                            .push(format!("skipped zero-length segment at arclength {coord:.9}"));
                    }
                    coord = strip.exit_arclength;
                }
                CenterlineSpan::Arc(geo) => {
                    let arc = geo.rasterize(step, coord, &guard);
                    coord = arc.exit_arclength;
                    polys.push(arc.polygon);
                }
            }
        }

        guard.check()?;

        let tolerance = 1e-6 * total.max(1.0);
        if (coord - total).abs() > tolerance {
            return Err(GeometryError::Degenerate(format!(
                "arclength bookkeeping drift: consumed {coord}, centerline length {total}"
            ))
            .into());
        }

        let boundary = union_boundaries(polys, &mut diagnostics)?;
        Ok(AssembledRoute {
            boundary,
            centerline: centerline.points().to_vec(),
            length: total,
            diagnostics,
        })
    }
}
