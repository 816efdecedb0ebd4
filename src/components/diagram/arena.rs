use std::collections::HashMap;

use log::debug;

use super::types::{Edge, Node};

/// Ordered node store addressed by id.
///
/// Order is the paint and hit-test order. Updates go through [`Self::replace`]
/// with a modified copy, so callers hold ids rather than references.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
	nodes: Vec<Node>,
	index: HashMap<String, usize>,
}

impl NodeArena {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds an arena keeping the first node for every id.
	pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
		let mut arena = Self::new();
		for node in nodes {
			arena.insert(node);
		}
		arena
	}

	/// Appends `node`. Returns `false` and drops it if the id is taken.
	pub fn insert(&mut self, node: Node) -> bool {
		if self.index.contains_key(&node.id) {
			debug!("dropping node with duplicate id {}", node.id);
			return false;
		}
		self.index.insert(node.id.clone(), self.nodes.len());
		self.nodes.push(node);
		true
	}

	pub fn get(&self, id: &str) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Swaps in an updated copy of an existing node, keeping its slot.
	pub fn replace(&mut self, node: Node) -> bool {
		match self.index.get(&node.id) {
			Some(&i) => {
				self.nodes[i] = node;
				true
			}
			None => false,
		}
	}

	/// Applies `f` to every node in place. Ids must not change.
	pub fn update_all(&mut self, f: impl FnMut(&mut Node)) {
		self.nodes.iter_mut().for_each(f);
	}

	pub fn remove(&mut self, id: &str) -> Option<Node> {
		let i = self.index.remove(id)?;
		let node = self.nodes.remove(i);
		for slot in self.index.values_mut() {
			if *slot > i {
				*slot -= 1;
			}
		}
		Some(node)
	}

	pub fn as_slice(&self) -> &[Node] {
		&self.nodes
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Node> {
		self.nodes.iter()
	}

	/// First `{prefix}{n}` id, counting from `n = len + 1`, not in use.
	pub fn next_id(&self, prefix: &str) -> String {
		(self.nodes.len() + 1..)
			.map(|n| format!("{prefix}{n}"))
			.find(|id| !self.contains(id))
			.unwrap_or_else(|| prefix.to_owned())
	}
}

/// Adds `from -> to` unless that directed pair already exists.
pub fn create_edge(edges: &mut Vec<Edge>, from: &str, to: &str) -> bool {
	if edges.iter().any(|e| e.links(from, to)) {
		debug!("edge {from} -> {to} already exists");
		return false;
	}
	edges.push(Edge::new(from, to));
	true
}
