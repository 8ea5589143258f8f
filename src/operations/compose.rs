use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::{ComposeError, Result};
use crate::geometry::profile::WidthProfile;
use crate::geometry::{BoundaryPolygon, WaypointPath};
use crate::math::corner::left_normal;
use crate::math::Point2;
use crate::operations::assemble::AssemblePath;
use crate::operations::boolean::{subtract_boundary, union_boundaries};

/// Semantic tag for one width profile: solid trace, subtractive gap, or
/// ground-buffer-ring half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRole {
    /// Solid trace; may receive an overlap landing pad at the path start.
    Route,
    /// Etched void on the target layer.
    Gap,
    /// Conductor half of a CPW pair.
    CpwTrace,
    /// Etched half of a CPW pair.
    CpwCut,
    /// Caches its polygon as the current inner ring limit; emits nothing.
    GndBufferInner,
    /// Emits outer − cached inner as a ground buffer ring.
    GndBufferOuter,
}

impl RouteRole {
    /// Whether this role marks its polygon as an etched void.
    #[must_use]
    pub fn is_subtractive(self) -> bool {
        matches!(self, Self::Gap | Self::CpwCut)
    }
}

impl FromStr for RouteRole {
    type Err = ComposeError;

    /// Parses collaborator role tags, case-insensitive and
    /// whitespace-trimmed.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "route" => Ok(Self::Route),
            "gap" => Ok(Self::Gap),
            "cpw_trace" => Ok(Self::CpwTrace),
            "cpw_cut" => Ok(Self::CpwCut),
            "gnd_buffer_inner" => Ok(Self::GndBufferInner),
            "gnd_buffer_outer" => Ok(Self::GndBufferOuter),
            _ => Err(ComposeError::UnknownRouteRole(s.trim().to_owned())),
        }
    }
}

/// One (width profile, role, layer) tuple. The composer requires one
/// struct per boundary instead of scalar-or-list parameters, so mismatched
/// profile/role/layer list lengths are unrepresentable.
pub struct ProfileSpec<'a> {
    pub profile: &'a dyn WidthProfile,
    pub role: RouteRole,
    pub layer: u32,
}

/// One output record: a closed boundary, its target layer, and whether it
/// is etched out of that layer.
#[derive(Debug, Clone)]
pub struct RouteElement {
    pub polygon: BoundaryPolygon,
    pub layer: u32,
    pub subtract: bool,
}

/// Output of one composer call.
#[derive(Debug, Clone)]
pub struct ComposedRoute {
    pub elements: Vec<RouteElement>,
    pub centerline: Vec<Point2>,
    pub length: f64,
    pub diagnostics: Vec<String>,
}

/// The "current inner limit" of a ground buffer ring, scoped to one
/// composer call. Explicit so no buffer state can leak across calls.
#[derive(Debug, Default)]
struct InnerBufferCache {
    polygon: Option<BoundaryPolygon>,
}

/// Runs the assembler once per profile tuple and applies role semantics.
///
/// A fatal error (missing inner buffer, profile domain violation, failed
/// boolean) aborts the whole call with no partial output.
pub struct ComposeRoute<'a> {
    path: &'a WaypointPath,
    specs: Vec<ProfileSpec<'a>>,
    excluded: BTreeSet<usize>,
    overlap: f64,
}

impl<'a> ComposeRoute<'a> {
    /// Creates a new composition of `specs` over `path`.
    #[must_use]
    pub fn new(path: &'a WaypointPath, specs: Vec<ProfileSpec<'a>>) -> Self {
        Self {
            path,
            specs,
            excluded: BTreeSet::new(),
            overlap: 0.0,
        }
    }

    /// Adds a caller-supplied corner exclusion set (waypoint indices).
    #[must_use]
    pub fn with_excluded(mut self, excluded: BTreeSet<usize>) -> Self {
        self.excluded = excluded;
        self
    }

    /// Sets the landing-pad length appended to `Route` boundaries beyond
    /// the path start. Zero (the default) disables the pad.
    #[must_use]
    pub fn with_overlap(mut self, overlap: f64) -> Self {
        self.overlap = overlap;
        self
    }

    /// Executes the composition.
    ///
    /// # Errors
    ///
    /// - `ComposeError::MissingInnerBuffer` if a `GndBufferOuter` tuple has
    ///   no prior `GndBufferInner` in this call.
    /// - Any assembler error (see [`AssemblePath::execute_with`]).
    pub fn execute(&self) -> Result<ComposedRoute> {
        let assembler = AssemblePath::new(self.path).with_excluded(self.excluded.clone());
        let centerline = assembler.centerline();

        let mut cache = InnerBufferCache::default();
        let mut elements: Vec<RouteElement> = Vec::new();
        let mut diagnostics: Vec<String> = Vec::new();

        for (index, spec) in self.specs.iter().enumerate() {
            tracing::debug!(index, role = ?spec.role, layer = spec.layer, "composing profile");
            let assembled = assembler.execute_with(&centerline, spec.profile)?;
            diagnostics.extend(assembled.diagnostics);
            let polygon = assembled.boundary;

            match spec.role {
                RouteRole::Route => {
                    let polygon = if self.overlap > 0.0 {
                        self.with_landing_pad(polygon, spec.profile, &centerline, &mut diagnostics)?
                    } else {
                        polygon
                    };
                    elements.push(RouteElement {
                        polygon,
                        layer: spec.layer,
                        subtract: false,
                    });
                }
                RouteRole::CpwTrace => {
                    elements.push(RouteElement {
                        polygon,
                        layer: spec.layer,
                        subtract: false,
                    });
                }
                RouteRole::Gap | RouteRole::CpwCut => {
                    elements.push(RouteElement {
                        polygon,
                        layer: spec.layer,
                        subtract: true,
                    });
                }
                RouteRole::GndBufferInner => {
                    cache.polygon = Some(polygon);
                }
                RouteRole::GndBufferOuter => {
                    let inner = cache.polygon.as_ref().ok_or(
                        ComposeError::MissingInnerBuffer {
                            index,
                            layer: spec.layer,
                        },
                    )?;
                    let ring = subtract_boundary(&polygon, inner)?;
                    elements.push(RouteElement {
                        polygon: ring,
                        layer: spec.layer,
                        subtract: false,
                    });
                }
            }
        }

        Ok(ComposedRoute {
            elements,
            centerline: centerline.points().to_vec(),
            length: centerline.total_length(),
            diagnostics,
        })
    }

    /// Unions a rectangular landing pad onto a trace boundary: aligned to
    /// the path's start direction but extending `overlap` past the start
    /// point (opposite the direction of travel, onto the adjoining
    /// component's pad), as wide as the profile at arclength 0.
    fn with_landing_pad(
        &self,
        polygon: BoundaryPolygon,
        profile: &dyn WidthProfile,
        centerline: &crate::geometry::FilletedCenterline,
        diagnostics: &mut Vec<String>,
    ) -> Result<BoundaryPolygon> {
        let Some(dir) = centerline.start_direction() else {
            tracing::debug!("degenerate path start, landing pad skipped");
            diagnostics.push("landing pad skipped on degenerate path start".to_owned());
            return Ok(polygon);
        };
        let Some(start) = centerline.points().first().copied() else {
            return Ok(polygon);
        };
        let half = profile.width_at(0.0) * 0.5;
        let normal = left_normal(dir);
        let far = start - dir * self.overlap;
        let pad = BoundaryPolygon {
            exteriors: vec![vec![
                start + normal * half,
                far + normal * half,
                far - normal * half,
                start - normal * half,
            ]],
            holes: Vec::new(),
        };
        union_boundaries(vec![polygon, pad], diagnostics)
    }
}
