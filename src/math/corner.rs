use super::{Point2, Vector2, ANGLE_EPS, SEGMENT_EPS};

/// Handedness of the turn at an interior corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

/// Computes the normalized direction from point `a` to point `b`.
///
/// Returns `None` if the segment is shorter than [`SEGMENT_EPS`].
#[must_use]
pub fn segment_direction(a: &Point2, b: &Point2) -> Option<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len < SEGMENT_EPS {
        return None;
    }
    Some(d / len)
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Computes the interior angle at `corner` between the edges to `start`
/// and `end`, in `[0, π]`.
///
/// Returns `None` when either edge is degenerate (shorter than
/// [`SEGMENT_EPS`]). A straight-through corner measures π; a full
/// reversal measures 0.
#[must_use]
pub fn corner_angle(start: &Point2, corner: &Point2, end: &Point2) -> Option<f64> {
    let sc = segment_direction(corner, start)?;
    let ec = segment_direction(corner, end)?;
    Some(sc.dot(&ec).clamp(-1.0, 1.0).acos())
}

/// Returns true when `angle` is within [`ANGLE_EPS`] of 0 or π, i.e. the
/// corner is collinear or reversing and a fillet is undefined.
#[must_use]
pub fn angle_is_degenerate(angle: f64) -> bool {
    angle < ANGLE_EPS || angle > std::f64::consts::PI - ANGLE_EPS
}

/// Characterizes the turn at `corner` as left or right.
///
/// Uses the 2D cross product of the incoming and outgoing edge vectors;
/// a non-negative cross is classified as a left turn.
#[must_use]
pub fn turn_direction(start: &Point2, corner: &Point2, end: &Point2) -> TurnDirection {
    let v1 = corner - start;
    let v2 = end - corner;
    let cross = v1.x * v2.y - v1.y * v2.x;
    if cross > 0.0 {
        TurnDirection::Left
    } else {
        TurnDirection::Right
    }
}

/// Unit vector from `corner` toward the fillet circle center: the bisector
/// of the two edge directions leaving the corner.
///
/// Returns `None` for degenerate edges or a straight/reversing corner
/// (where the bisector is undefined or numerically meaningless).
#[must_use]
pub fn corner_bisector(start: &Point2, corner: &Point2, end: &Point2) -> Option<Vector2> {
    let sc = segment_direction(corner, start)?;
    let ec = segment_direction(corner, end)?;
    let net = sc + ec;
    let len = net.norm();
    if len < ANGLE_EPS {
        return None;
    }
    Some(net / len)
}
