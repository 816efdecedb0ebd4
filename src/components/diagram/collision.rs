use super::types::{CANVAS_MARGIN, Node};

/// Keeps `moving` on the canvas and pushes it out of the first node it
/// overlaps.
///
/// Only one obstacle is resolved per call: the push may land the node on a
/// second neighbour or back across the canvas margin.
pub fn check_collision(moving: &mut Node, nodes: &[Node], canvas_height: f64, canvas_width: f64) {
	clamp_to_canvas(moving, canvas_height, canvas_width);

	let Some(obstacle) = nodes.iter().find(|other| other.id != moving.id && overlaps(moving, other))
	else {
		return;
	};

	let x_overlap = (moving.x + moving.width).min(obstacle.x + obstacle.width)
		- moving.x.max(obstacle.x);
	let y_overlap = (moving.y + moving.height).min(obstacle.y + obstacle.height)
		- moving.y.max(obstacle.y);

	if x_overlap < y_overlap {
		moving.x = if moving.x < obstacle.x {
			obstacle.x - moving.width
		} else {
			obstacle.x + obstacle.width
		};
	} else {
		moving.y = if moving.y < obstacle.y {
			obstacle.y - moving.height
		} else {
			obstacle.y + obstacle.height
		};
	}
}

// Lower bound first so a canvas smaller than the node pins it to the upper
// bound; `f64::clamp` would panic there.
fn clamp_to_canvas(node: &mut Node, canvas_height: f64, canvas_width: f64) {
	let (max_x, max_y) = (
		canvas_width - node.width - CANVAS_MARGIN,
		canvas_height - node.height - CANVAS_MARGIN,
	);
	if node.x < CANVAS_MARGIN {
		node.x = CANVAS_MARGIN;
	}
	if node.y < CANVAS_MARGIN {
		node.y = CANVAS_MARGIN;
	}
	if node.x > max_x {
		node.x = max_x;
	}
	if node.y > max_y {
		node.y = max_y;
	}
}

pub fn overlaps(a: &Node, b: &Node) -> bool {
	a.x + a.width > b.x && a.y + a.height > b.y && a.x < b.x + b.width && a.y < b.y + b.height
}
