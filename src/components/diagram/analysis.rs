use super::types::{Edge, Node};

/// Approximate cycle check that only drives the edge color.
///
/// Walks `edges` in order, marking each destination. Reports a cycle as soon
/// as an edge has both endpoints already marked. This is not a directed-cycle
/// detector: the acyclic `a->c, a->b, b->c` is flagged while `a->b, b->a`
/// is not.
/// Edges with an unknown endpoint are skipped.
pub fn find_cycle(nodes: &[Node], edges: &[Edge]) -> bool {
	let mut visited = vec![false; nodes.len()];
	let index_of = |id: &str| nodes.iter().position(|n| n.id == id);

	for edge in edges {
		let (Some(from), Some(to)) = (index_of(&edge.from), index_of(&edge.to)) else {
			continue;
		};
		if visited[from] && visited[to] {
			return true;
		}
		visited[to] = true;
	}
	false
}
