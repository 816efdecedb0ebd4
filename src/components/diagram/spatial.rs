//! Hit-testing for nodes, connection dots and edges.

use super::geometry::euclidean_distance;
use super::types::{BoundingBox, DOT_LEEWAY, DOT_RADIUS, EDGE_SHRINK, Dot, Edge, Node, Position};

/// Side midpoints in the order right, top, left, bottom.
pub fn dot_coordinates(node: &Node) -> [Dot; 4] {
	let (cx, cy) = (node.x + node.width / 2.0, node.y + node.height / 2.0);
	[
		Dot { x: node.x + node.width, y: cy, radius: DOT_RADIUS },
		Dot { x: cx, y: node.y, radius: DOT_RADIUS },
		Dot { x: node.x, y: cy, radius: DOT_RADIUS },
		Dot { x: cx, y: node.y + node.height, radius: DOT_RADIUS },
	]
}

pub fn is_inside_node(x: f64, y: f64, node: &Node) -> bool {
	x >= node.x && x <= node.x + node.width && y >= node.y && y <= node.y + node.height
}

/// Dots are tested against a fixed leeway square, not their radius, so
/// that the few pixels they occupy stay clickable.
pub fn is_inside_dot(x: f64, y: f64, dot: &Dot) -> bool {
	x >= dot.x - DOT_LEEWAY
		&& x <= dot.x + DOT_LEEWAY
		&& y >= dot.y - DOT_LEEWAY
		&& y <= dot.y + DOT_LEEWAY
}

/// Indices of the closest `(from, to)` anchor pair. The first pair wins ties.
pub fn shortest_distance_pair(from: &[Dot], to: &[Dot]) -> (usize, usize) {
	let mut best = (0, 0);
	let mut shortest = f64::INFINITY;
	for (i, a) in from.iter().enumerate() {
		for (j, b) in to.iter().enumerate() {
			let distance = euclidean_distance(a.position(), b.position());
			if distance < shortest {
				shortest = distance;
				best = (i, j);
			}
		}
	}
	best
}

/// Box spanning both points, with only the horizontal half-extent shrunk by
/// `shrink / 2`. A chord narrower than `shrink` yields an empty box.
pub fn get_bounding_box(x1: f64, y1: f64, x2: f64, y2: f64, shrink: f64) -> BoundingBox {
	BoundingBox {
		min_x: x1.min(x2) + shrink / 2.0,
		min_y: y1.min(y2),
		max_x: x1.max(x2) - shrink / 2.0,
		max_y: y1.max(y2),
	}
}

pub fn is_point_inside_bounding_box(x: f64, y: f64, bbox: &BoundingBox) -> bool {
	x >= bbox.min_x && x <= bbox.max_x && y >= bbox.min_y && y <= bbox.max_y
}

/// Curve endpoints of `edge`: the nearest dots of its two nodes. `None` when
/// either node is missing.
pub fn edge_anchors(edge: &Edge, nodes: &[Node]) -> Option<(Position, Position)> {
	let from = nodes.iter().find(|n| n.id == edge.from)?;
	let to = nodes.iter().find(|n| n.id == edge.to)?;
	let (from_dots, to_dots) = (dot_coordinates(from), dot_coordinates(to));
	let (i, j) = shortest_distance_pair(&from_dots, &to_dots);
	Some((from_dots[i].position(), to_dots[j].position()))
}

/// Clickable envelope of `edge`.
pub fn edge_envelope(edge: &Edge, nodes: &[Node]) -> Option<BoundingBox> {
	let (from, to) = edge_anchors(edge, nodes)?;
	Some(get_bounding_box(from.x, from.y, to.x, to.y, EDGE_SHRINK))
}

/// First node (in order) with a connection dot under the point.
pub fn find_dot_hit<'a>(x: f64, y: f64, nodes: &'a [Node]) -> Option<&'a Node> {
	nodes
		.iter()
		.find(|node| dot_coordinates(node).iter().any(|dot| is_inside_dot(x, y, dot)))
}

pub fn find_node_hit<'a>(x: f64, y: f64, nodes: &'a [Node]) -> Option<&'a Node> {
	nodes.iter().find(|node| is_inside_node(x, y, node))
}

pub fn find_edge_hit<'a>(x: f64, y: f64, edges: &'a [Edge], nodes: &[Node]) -> Option<&'a Edge> {
	edges.iter().find(|edge| {
		edge_envelope(edge, nodes).is_some_and(|bbox| is_point_inside_bounding_box(x, y, &bbox))
	})
}

/// Dot of `node` closest to `target`, used for the live edge preview.
pub fn nearest_dot(node: &Node, target: Position) -> Dot {
	let dots = dot_coordinates(node);
	let target = [Dot { x: target.x, y: target.y, radius: 0.0 }];
	let (i, _) = shortest_distance_pair(&dots, &target);
	dots[i]
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::diagram::types::NodeShape;

	fn node(id: &str, x: f64, y: f64) -> Node {
		Node::new(id, x, y, NodeShape::Rect)
	}

	#[test]
	fn dots_are_side_midpoints() {
		let dots = dot_coordinates(&node("a", 100.0, 100.0));
		let points: Vec<_> = dots.iter().map(|d| (d.x, d.y)).collect();
		assert_eq!(
			points,
			vec![(150.0, 125.0), (125.0, 100.0), (100.0, 125.0), (125.0, 150.0)]
		);
		assert!(dots.iter().all(|d| d.radius == DOT_RADIUS));
	}

	#[test]
	fn node_containment_is_inclusive() {
		let n = node("a", 10.0, 10.0);
		assert!(is_inside_node(10.0, 10.0, &n));
		assert!(is_inside_node(60.0, 60.0, &n));
		assert!(!is_inside_node(60.1, 30.0, &n));
		assert!(!is_inside_node(30.0, 9.9, &n));
	}

	#[test]
	fn dot_leeway_ignores_radius() {
		let dot = Dot { x: 50.0, y: 50.0, radius: 0.5 };
		assert!(is_inside_dot(50.0 + DOT_LEEWAY, 50.0 - DOT_LEEWAY, &dot));
		assert!(!is_inside_dot(50.0 + DOT_LEEWAY + 0.1, 50.0, &dot));
	}

	#[test]
	fn nearest_anchor_pair_faces_each_other() {
		let a = dot_coordinates(&node("a", 0.0, 0.0));
		let b = dot_coordinates(&node("b", 200.0, 0.0));
		// right side of a, left side of b
		assert_eq!(shortest_distance_pair(&a, &b), (0, 2));
	}

	#[test]
	fn nearest_anchor_pair_is_symmetric() {
		let cases = [
			(node("a", 100.0, 100.0), node("b", 200.0, 200.0)),
			(node("a", 0.0, 300.0), node("b", 40.0, 20.0)),
			(Node { width: 80.0, height: 30.0, ..node("a", 500.0, 10.0) }, node("b", 10.0, 10.0)),
		];
		for (a, b) in cases {
			let (da, db) = (dot_coordinates(&a), dot_coordinates(&b));
			let (i, j) = shortest_distance_pair(&da, &db);
			let (k, l) = shortest_distance_pair(&db, &da);
			let forward = euclidean_distance(da[i].position(), db[j].position());
			let backward = euclidean_distance(db[k].position(), da[l].position());
			assert_eq!(forward, backward);
			assert_eq!(da[i].position(), da[l].position());
			assert_eq!(db[j].position(), db[k].position());
		}
	}

	#[test]
	fn bounding_box_shrinks_horizontally_only() {
		let bbox = get_bounding_box(200.0, 80.0, 100.0, 20.0, 20.0);
		assert_eq!(
			bbox,
			BoundingBox { min_x: 110.0, min_y: 20.0, max_x: 190.0, max_y: 80.0 }
		);
		assert!(is_point_inside_bounding_box(150.0, 50.0, &bbox));
		assert!(!is_point_inside_bounding_box(105.0, 50.0, &bbox));

		let narrow = get_bounding_box(100.0, 0.0, 110.0, 100.0, 20.0);
		assert!(!is_point_inside_bounding_box(105.0, 50.0, &narrow));
	}

	#[test]
	fn dangling_edges_have_no_geometry() {
		let nodes = vec![node("a", 0.0, 0.0)];
		let edge = Edge::new("a", "ghost");
		assert!(edge_anchors(&edge, &nodes).is_none());
		assert!(find_edge_hit(25.0, 25.0, std::slice::from_ref(&edge), &nodes).is_none());
	}

	#[test]
	fn edge_hit_uses_envelope() {
		let nodes = vec![node("a", 0.0, 0.0), node("b", 200.0, 100.0)];
		let edges = vec![Edge::new("a", "b")];
		// anchors: right of a (50, 25), left of b (200, 125)
		assert_eq!(
			edge_anchors(&edges[0], &nodes),
			Some((Position::new(50.0, 25.0), Position::new(200.0, 125.0)))
		);
		assert!(find_edge_hit(125.0, 75.0, &edges, &nodes).is_some());
		assert!(find_edge_hit(55.0, 75.0, &edges, &nodes).is_none());
	}

	#[test]
	fn nearest_dot_points_at_target() {
		let n = node("a", 100.0, 100.0);
		assert_eq!(nearest_dot(&n, Position::new(125.0, 0.0)).position(), Position::new(125.0, 100.0));
		assert_eq!(nearest_dot(&n, Position::new(400.0, 120.0)).position(), Position::new(150.0, 125.0));
	}
}
