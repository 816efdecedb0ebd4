use super::types::{Diagram, Node, NodeShape};

/// Five unconnected nodes on a diagonal, alternating ellipses and rectangles.
pub fn sample_diagram() -> Diagram {
	let nodes = (1..=5)
		.map(|i| {
			let offset = 100.0 * i as f64;
			let shape = if i % 2 == 1 { NodeShape::Ellipse } else { NodeShape::Rect };
			Node::new(format!("node{i}"), offset, offset, shape)
		})
		.collect();

	Diagram {
		nodes,
		edges: Vec::new(),
	}
}
