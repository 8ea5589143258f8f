use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

/// A closed planar region: one or more exterior rings plus hole rings.
///
/// A freshly rasterized boundary has a single exterior built as the
/// left-offset points in path order followed by the reversed right-offset
/// points. Ring composition (outer − inner) can produce holes, and a
/// subtraction whose operands touch can split the result into several
/// disjoint exteriors.
///
/// Rings are *not* validated for simplicity: when the local width exceeds
/// twice the local curvature radius the offset sides can self-intersect,
/// and keeping width below that limit is the caller's responsibility.
#[derive(Debug, Clone, Default)]
pub struct BoundaryPolygon {
    pub exteriors: Vec<Vec<Point2>>,
    pub holes: Vec<Vec<Point2>>,
}

impl BoundaryPolygon {
    /// Builds a single-ring boundary from matched left/right offset sides.
    ///
    /// The right side is reversed and appended so the ring runs up the left
    /// side and back down the right.
    #[must_use]
    pub fn from_sides(left: Vec<Point2>, mut right: Vec<Point2>) -> Self {
        let mut exterior = left;
        right.reverse();
        exterior.extend(right);
        Self {
            exteriors: vec![exterior],
            holes: Vec::new(),
        }
    }

    /// Total enclosed area: exterior areas minus hole areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        let ext: f64 = self.exteriors.iter().map(|r| signed_area_2d(r).abs()).sum();
        let holes: f64 = self.holes.iter().map(|r| signed_area_2d(r).abs()).sum();
        ext - holes
    }

    /// True when no exterior ring carries at least 3 vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exteriors.iter().all(|r| r.len() < 3)
    }

    /// Iterates over all vertices of all exterior rings.
    pub fn exterior_points(&self) -> impl Iterator<Item = &Point2> {
        self.exteriors.iter().flatten()
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
    fn from_sides_closes_the_ladder() {
        // Left side above the x axis, right side below.
        let left = vec![p(0.0, 1.0), p(10.0, 1.0)];
        let right = vec![p(0.0, -1.0), p(10.0, -1.0)];
        let poly = BoundaryPolygon::from_sides(left, right);
        assert_eq!(poly.exteriors.len(), 1);
        assert_eq!(poly.exteriors[0].len(), 4);
        // Ring order: (0,1) (10,1) (10,-1) (0,-1) — a 10×2 rectangle.
        assert!((poly.area() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn hole_area_is_subtracted() {
        let outer = vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)];
        let hole = vec![p(1.0, 1.0), p(3.0, 1.0), p(3.0, 3.0), p(1.0, 3.0)];
        let poly = BoundaryPolygon {
            exteriors: vec![outer],
            holes: vec![hole],
        };
        assert!((poly.area() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn empty_detection() {
        assert!(BoundaryPolygon::default().is_empty());
        let poly = BoundaryPolygon {
            exteriors: vec![vec![p(0.0, 0.0), p(1.0, 0.0)]],
            holes: Vec::new(),
        };
        assert!(poly.is_empty());
    }
}
