//! Pure math for edge routing: distances, bezier control points and
//! arrowhead coordinates.

use std::f64::consts::PI;

use super::types::Position;

/// Rotation added to the curve angle to point arrowhead barbs backwards.
const ARROW_TURN: f64 = PI / 0.9;
/// Half-opening of an arrowhead.
const BARB_SPREAD: f64 = PI / 6.0;

pub fn euclidean_distance(p1: Position, p2: Position) -> f64 {
	let (dx, dy) = (p2.x - p1.x, p2.y - p1.y);
	(dx * dx + dy * dy).sqrt()
}

pub fn cross_product(dx1: f64, dy1: f64, dx2: f64, dy2: f64) -> f64 {
	dx1 * dy2 - dx2 * dy1
}

/// Control points of a cubic bezier plus the chord delta and angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoints {
	pub cp1: Position,
	pub cp2: Position,
	pub dx: f64,
	pub dy: f64,
	pub angle: f64,
}

/// Places both control points a quarter of the chord length away from their
/// endpoint, on the same side of the chord, so the curve bows outward.
///
/// Reversing `from` and `to` bows the curve to the opposite side, which keeps
/// a pair of opposite edges apart. This is not the S-curve placement along
/// `2 * angle ± π/2` (control points on opposite sides), so curves are not
/// point-for-point compatible with canvases drawn that way.
///
/// For `from == to` the angle is `atan2(0, 0) == 0` and both control points
/// collapse onto the endpoints.
pub fn find_control_point(from: Position, to: Position) -> ControlPoints {
	let (dx, dy) = (to.x - from.x, to.y - from.y);
	let offset = euclidean_distance(from, to) / 4.0;
	let angle = dy.atan2(dx);
	let normal = angle + PI / 2.0;
	let (nx, ny) = (offset * normal.cos(), offset * normal.sin());

	ControlPoints {
		cp1: Position::new(from.x + nx, from.y + ny),
		cp2: Position::new(to.x + nx, to.y + ny),
		dx,
		dy,
		angle,
	}
}

/// Evaluates the cubic bezier `from, cp1, cp2, to` at `t`.
pub fn bezier_mid_point(
	t: f64,
	from: Position,
	cp1: Position,
	cp2: Position,
	to: Position,
) -> Position {
	let u = 1.0 - t;
	let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
	Position::new(
		a * from.x + b * cp1.x + c * cp2.x + d * to.x,
		a * from.y + b * cp1.y + c * cp2.y + d * to.y,
	)
}

/// The two barbs of a V arrowhead anchored at `(x, y)`.
pub fn calculate_arrow_coords(x: f64, y: f64, length: f64, angle: f64) -> (Position, Position) {
	(
		Position::new(
			x + length * (angle - BARB_SPREAD).cos(),
			y + length * (angle - BARB_SPREAD).sin(),
		),
		Position::new(
			x + length * (angle + BARB_SPREAD).cos(),
			y + length * (angle + BARB_SPREAD).sin(),
		),
	)
}

/// Orientation of the arrowhead drawn at `mid` on a curve starting at `from`.
///
/// The side the curve bows to (sign of the cross product between the chord
/// and `from -> mid`) picks one of the two mirrored turns.
pub fn arrow_angle(from: Position, mid: Position, controls: &ControlPoints) -> f64 {
	let side = cross_product(controls.dx, controls.dy, mid.x - from.x, mid.y - from.y);
	if side > 0.0 {
		controls.angle + ARROW_TURN
	} else {
		controls.angle - ARROW_TURN
	}
}
