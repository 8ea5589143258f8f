use cavalier_contours::polyline::{
    BooleanOp, BooleanResultInfo, PlineOrientation, PlineSource, PlineSourceMut, PlineVertex,
    Polyline,
};

use crate::error::{OperationError, Result};
use crate::geometry::BoundaryPolygon;
use crate::math::polygon_2d::dedup_ring;
use crate::math::Point2;

/// Converts a vertex ring to a closed counter-clockwise polyline.
///
/// Returns `None` when the ring degenerates below 3 distinct vertices.
fn to_pline(ring: &[Point2]) -> Option<Polyline<f64>> {
    let clean = dedup_ring(ring);
    if clean.len() < 3 {
        return None;
    }
    let mut pline = Polyline::new();
    for pt in clean {
        pline.add_vertex(PlineVertex::new(pt.x, pt.y, 0.0));
    }
    pline.set_is_closed(true);
    if pline.orientation() == PlineOrientation::Clockwise {
        pline.invert_direction_mut();
    }
    Some(pline)
}

fn from_pline(pline: &Polyline<f64>) -> Vec<Point2> {
    pline
        .vertex_data
        .iter()
        .map(|v| Point2::new(v.x, v.y))
        .collect()
}

/// Collapses redundant vertices left behind by a boolean pass.
fn simplify(pline: Polyline<f64>) -> Polyline<f64> {
    pline.remove_redundant(1e-9).unwrap_or(pline)
}

/// Pairwise-merges a set of closed polylines until no two overlap,
/// collecting any hole loops the boolean backend produces.
fn union_pline_set(mut plines: Vec<Polyline<f64>>) -> (Vec<Polyline<f64>>, Vec<Polyline<f64>>) {
    let mut holes: Vec<Polyline<f64>> = Vec::new();

    let mut i = 0usize;
    while i < plines.len() {
        let mut merged = false;
        let mut j = i + 1;
        while j < plines.len() {
            let res = plines[i].boolean(&plines[j], BooleanOp::Or);
            match res.result_info {
                BooleanResultInfo::Disjoint | BooleanResultInfo::InvalidInput => {
                    j += 1;
                }
                _ => {
                    let mut next: Vec<Polyline<f64>> = res
                        .pos_plines
                        .into_iter()
                        .map(|p| simplify(p.pline))
                        .collect();
                    holes.extend(res.neg_plines.into_iter().map(|p| simplify(p.pline)));
                    plines.swap_remove(j);
                    plines.swap_remove(i);
                    plines.append(&mut next);
                    merged = true;
                    break;
                }
            }
        }
        if merged {
            i = 0;
        } else {
            i += 1;
        }
    }

    (plines, holes)
}

/// Merges sub-polygons into one boundary via planar polygon union.
///
/// Contiguous rasterized strips are expected to overlap; fragments that
/// stay disjoint after the merge are kept as separate exterior rings and
/// noted in the diagnostics list.
///
/// # Errors
///
/// Returns `OperationError::Failed` when every input ring is degenerate.
pub(crate) fn union_boundaries(
    polys: Vec<BoundaryPolygon>,
    diagnostics: &mut Vec<String>,
) -> Result<BoundaryPolygon> {
    let mut plines: Vec<Polyline<f64>> = Vec::new();
    let mut holes: Vec<Vec<Point2>> = Vec::new();
    for poly in polys {
        plines.extend(poly.exteriors.iter().filter_map(|r| to_pline(r)));
        holes.extend(poly.holes);
    }
    if plines.is_empty() {
        return Err(OperationError::Failed(
            "polygon union over no valid rings".to_owned(),
        )
        .into());
    }

    let (exteriors, new_holes) = union_pline_set(plines);
    if exteriors.len() > 1 {
        tracing::warn!(
            fragments = exteriors.len(),
            "polygon union left disjoint fragments"
        );
        diagnostics.push(format!(
            "polygon union left {} disjoint fragments",
            exteriors.len()
        ));
    }
    holes.extend(new_holes.iter().map(from_pline));

    Ok(BoundaryPolygon {
        exteriors: exteriors.iter().map(from_pline).collect(),
        holes,
    })
}

/// Subtracts `inner` from `outer` (ring construction).
///
/// The result may carry hole rings (inner strictly inside outer) or split
/// into several disjoint exteriors (operands flush at the ends). Holes on
/// `inner` are not part of the subtracted region: their overlap with
/// `outer` is kept as island exteriors.
///
/// # Errors
///
/// Returns `OperationError::Failed` when either operand has no valid ring
/// or the subtraction leaves nothing.
pub(crate) fn subtract_boundary(
    outer: &BoundaryPolygon,
    inner: &BoundaryPolygon,
) -> Result<BoundaryPolygon> {
    let outer_plines: Vec<Polyline<f64>> =
        outer.exteriors.iter().filter_map(|r| to_pline(r)).collect();
    let cutters: Vec<Polyline<f64>> =
        inner.exteriors.iter().filter_map(|r| to_pline(r)).collect();
    if outer_plines.is_empty() || cutters.is_empty() {
        return Err(OperationError::Failed(
            "polygon subtraction with a degenerate operand".to_owned(),
        )
        .into());
    }

    // Material under an inner hole survives the subtraction; clip each
    // hole against the outer rings and carry the overlap as islands.
    let mut islands: Vec<Polyline<f64>> = Vec::new();
    let mut island_holes: Vec<Polyline<f64>> = Vec::new();
    for hole in &inner.holes {
        let Some(hole_pline) = to_pline(hole) else {
            continue;
        };
        for pos in &outer_plines {
            let res = pos.boolean(&hole_pline, BooleanOp::And);
            if matches!(
                res.result_info,
                BooleanResultInfo::Disjoint | BooleanResultInfo::InvalidInput
            ) {
                continue;
            }
            islands.extend(res.pos_plines.into_iter().map(|p| simplify(p.pline)));
            island_holes.extend(res.neg_plines.into_iter().map(|p| simplify(p.pline)));
        }
    }

    let mut cur_pos = outer_plines;
    let mut cur_neg: Vec<Polyline<f64>> = Vec::new();
    for cutter in &cutters {
        let mut next_pos: Vec<Polyline<f64>> = Vec::new();
        for pos in cur_pos {
            let res = pos.boolean(cutter, BooleanOp::Not);
            next_pos.extend(res.pos_plines.into_iter().map(|p| simplify(p.pline)));
            cur_neg.extend(res.neg_plines.into_iter().map(|p| simplify(p.pline)));
        }
        cur_pos = next_pos;
    }
    cur_pos.append(&mut islands);
    cur_neg.append(&mut island_holes);

    if cur_pos.is_empty() {
        return Err(OperationError::Failed(
            "polygon subtraction left an empty region".to_owned(),
        )
        .into());
    }

    let mut holes = outer.holes.clone();
    holes.extend(cur_neg.iter().map(from_pline));

    Ok(BoundaryPolygon {
        exteriors: cur_pos.iter().map(from_pline).collect(),
        holes,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> BoundaryPolygon {
        BoundaryPolygon {
            exteriors: vec![vec![
                Point2::new(x0, y0),
                Point2::new(x1, y0),
                Point2::new(x1, y1),
                Point2::new(x0, y1),
            ]],
            holes: Vec::new(),
        }
    }

    #[test]
    fn union_of_overlapping_rectangles() {
        let mut diags = Vec::new();
        let merged = union_boundaries(
            vec![rect(0.0, 0.0, 6.0, 2.0), rect(4.0, 0.0, 10.0, 2.0)],
            &mut diags,
        )
        .unwrap();
        assert_eq!(merged.exteriors.len(), 1);
        assert!((merged.area() - 20.0).abs() < 1e-9, "area={}", merged.area());
        assert!(diags.is_empty());
    }

    #[test]
    fn union_keeps_disjoint_fragments() {
        let mut diags = Vec::new();
        let merged = union_boundaries(
            vec![rect(0.0, 0.0, 1.0, 1.0), rect(5.0, 5.0, 6.0, 6.0)],
            &mut diags,
        )
        .unwrap();
        assert_eq!(merged.exteriors.len(), 2);
        assert!((merged.area() - 2.0).abs() < 1e-9);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn union_of_nothing_fails() {
        let mut diags = Vec::new();
        assert!(union_boundaries(Vec::new(), &mut diags).is_err());
    }

    #[test]
    fn subtract_strictly_inside_makes_a_hole() {
        let ring = subtract_boundary(&rect(0.0, 0.0, 10.0, 10.0), &rect(2.0, 2.0, 8.0, 8.0))
            .unwrap();
        assert_eq!(ring.exteriors.len(), 1);
        assert_eq!(ring.holes.len(), 1);
        assert!((ring.area() - 64.0).abs() < 1e-9, "area={}", ring.area());
    }

    #[test]
    fn subtract_inner_with_hole_keeps_the_island() {
        // The inner operand is itself a ring; the material under its hole
        // is not subtracted and survives as an island.
        let mut inner = rect(2.0, 2.0, 8.0, 8.0);
        inner.holes.push(vec![
            Point2::new(4.0, 4.0),
            Point2::new(6.0, 4.0),
            Point2::new(6.0, 6.0),
            Point2::new(4.0, 6.0),
        ]);
        let result = subtract_boundary(&rect(0.0, 0.0, 10.0, 10.0), &inner).unwrap();
        assert_eq!(result.exteriors.len(), 2);
        assert_eq!(result.holes.len(), 1);
        // 100 − 36 outer ring, plus the 2×2 island.
        assert!((result.area() - 68.0).abs() < 1e-9, "area={}", result.area());
    }

    #[test]
    fn subtract_flush_operands_split_the_ring() {
        // Same x-extent: the ring splits into strips above and below.
        let ring = subtract_boundary(&rect(0.0, -2.0, 10.0, 2.0), &rect(0.0, -1.0, 10.0, 1.0))
            .unwrap();
        assert!((ring.area() - 20.0).abs() < 1e-9, "area={}", ring.area());
    }

    #[test]
    fn subtract_degenerate_operand_fails() {
        let empty = BoundaryPolygon::default();
        assert!(subtract_boundary(&rect(0.0, 0.0, 1.0, 1.0), &empty).is_err());
    }
}
