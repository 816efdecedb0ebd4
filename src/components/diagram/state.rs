//! Editor state and the pointer/keyboard state machine.
//!
//! Everything here is independent of the browser: the host feeds
//! [`EditorEvent`]s in and repaints when a transition asks for it.

use log::{debug, info};

use super::arena::{NodeArena, create_edge};
use super::collision::{check_collision, overlaps};
use super::history::{History, Snapshot};
use super::spatial::{find_dot_hit, find_edge_hit, find_node_hit};
use super::types::{
	CANVAS_MARGIN, DEFAULT_NODE_SIZE, Diagram, Edge, GRID_SPACING, Node, NodeShape, Palette,
	Position,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
	Primary,
	Middle,
	Secondary,
	Other(i16),
}

impl PointerButton {
	/// Maps a DOM `MouseEvent.button` code.
	pub fn from_dom(code: i16) -> Self {
		match code {
			0 => Self::Primary,
			1 => Self::Middle,
			2 => Self::Secondary,
			other => Self::Other(other),
		}
	}
}

/// A key press, named after DOM `KeyboardEvent.key`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Key {
	pub name: String,
	/// Ctrl or Cmd.
	pub ctrl: bool,
	pub shift: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
	PointerDown { button: PointerButton, at: Position },
	PointerMove { at: Position },
	PointerUp { at: Position },
	KeyDown(Key),
	Resize { width: f64, height: f64 },
	AddNode(NodeShape),
	Undo,
	Redo,
}

/// Whether a transition changed anything visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repaint {
	None,
	Full,
}

impl Repaint {
	pub fn needed(self) -> bool {
		self == Self::Full
	}
}

/// Current interaction state. Nodes and edges are referenced by id/value so
/// nothing dangles when the arena changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Phase {
	#[default]
	Idle,
	NodeSelected {
		id: String,
	},
	EdgeSelected {
		edge: Edge,
	},
	DraggingNode {
		id: String,
		/// Pointer position at press.
		start: Position,
		/// Node top-left at press.
		node_start: Position,
	},
	DrawingEdge {
		source: String,
		cursor: Position,
	},
}

#[derive(Clone, Debug, Default)]
pub struct Editor {
	nodes: NodeArena,
	edges: Vec<Edge>,
	phase: Phase,
	history: History,
	/// State at the start of the current drag, recorded if the node moves.
	pending: Option<Snapshot>,
	palette: Palette,
	width: f64,
	height: f64,
}

impl Editor {
	pub fn new(diagram: &Diagram, width: f64, height: f64, palette: Palette) -> Self {
		let nodes = NodeArena::from_nodes(diagram.nodes.iter().cloned());
		let mut edges = Vec::with_capacity(diagram.edges.len());
		for edge in &diagram.edges {
			if create_edge(&mut edges, &edge.from, &edge.to) {
				if let Some(last) = edges.last_mut() {
					last.weight = edge.weight;
				}
			}
		}
		Self {
			nodes,
			edges,
			palette,
			width,
			height,
			..Self::default()
		}
	}

	pub fn nodes(&self) -> &[Node] {
		self.nodes.as_slice()
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn phase(&self) -> &Phase {
		&self.phase
	}

	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	pub fn selected_node(&self) -> Option<&str> {
		match &self.phase {
			Phase::NodeSelected { id } | Phase::DraggingNode { id, .. } => Some(id),
			_ => None,
		}
	}

	pub fn selected_edge(&self) -> Option<&Edge> {
		match &self.phase {
			Phase::EdgeSelected { edge } => Some(edge),
			_ => None,
		}
	}

	pub fn is_drawing_edge(&self) -> bool {
		matches!(self.phase, Phase::DrawingEdge { .. })
	}

	pub fn can_undo(&self) -> bool {
		self.history.can_undo()
	}

	pub fn can_redo(&self) -> bool {
		self.history.can_redo()
	}

	/// Pure form of [`Self::handle`]: consumes the state, returns the next one.
	pub fn transition(mut self, event: &EditorEvent) -> (Self, Repaint) {
		let repaint = self.handle(event);
		(self, repaint)
	}

	pub fn handle(&mut self, event: &EditorEvent) -> Repaint {
		match event {
			EditorEvent::PointerDown { button, at } => self.on_pointer_down(*button, *at),
			EditorEvent::PointerMove { at } => self.on_pointer_move(*at),
			EditorEvent::PointerUp { at } => self.on_pointer_up(*at),
			EditorEvent::KeyDown(key) => self.on_key_down(key),
			EditorEvent::Resize { width, height } => {
				self.width = *width;
				self.height = *height;
				Repaint::Full
			}
			EditorEvent::AddNode(shape) => self.add_node(*shape),
			EditorEvent::Undo => self.undo(),
			EditorEvent::Redo => self.redo(),
		}
	}

	fn on_pointer_down(&mut self, button: PointerButton, at: Position) -> Repaint {
		if button != PointerButton::Primary {
			return Repaint::None;
		}
		let had_selected_node = self.selected_node().is_some();

		if let Some(source) = find_dot_hit(at.x, at.y, self.nodes.as_slice()) {
			let source = source.id.clone();
			debug!("drawing edge from {source}");
			self.phase = Phase::DrawingEdge { source, cursor: at };
			return Repaint::Full;
		}

		if let Some(hit) = find_node_hit(at.x, at.y, self.nodes.as_slice()) {
			let (id, node_start) = (hit.id.clone(), Position::new(hit.x, hit.y));
			self.highlight(Some(id.as_str()));
			self.pending = Some(self.snapshot());
			self.phase = Phase::DraggingNode { id, start: at, node_start };
			return Repaint::Full;
		}

		if had_selected_node {
			self.highlight(None);
			self.phase = Phase::Idle;
			return Repaint::Full;
		}

		let cleared = self.highlight(None);
		match find_edge_hit(at.x, at.y, &self.edges, self.nodes.as_slice()) {
			Some(edge) => {
				self.phase = Phase::EdgeSelected { edge: edge.clone() };
				Repaint::Full
			}
			None if self.selected_edge().is_some() => {
				self.phase = Phase::Idle;
				Repaint::Full
			}
			None => cleared,
		}
	}

	fn on_pointer_move(&mut self, at: Position) -> Repaint {
		match self.phase.clone() {
			Phase::DraggingNode { id, start, node_start } => {
				let Some(node) = self.nodes.get(&id) else {
					return Repaint::None;
				};
				let mut next = node.clone();
				next.x = node_start.x + (at.x - start.x);
				next.y = node_start.y + (at.y - start.y);
				check_collision(&mut next, self.nodes.as_slice(), self.height, self.width);
				if next == *node {
					return Repaint::None;
				}
				self.nodes.replace(next);
				Repaint::Full
			}
			Phase::DrawingEdge { source, .. } => {
				self.phase = Phase::DrawingEdge { source, cursor: at };
				Repaint::Full
			}
			_ => Repaint::None,
		}
	}

	fn on_pointer_up(&mut self, at: Position) -> Repaint {
		match std::mem::take(&mut self.phase) {
			Phase::DrawingEdge { source, .. } => {
				let target = find_node_hit(at.x, at.y, self.nodes.as_slice()).map(|n| n.id.clone());
				if let Some(target) = target.filter(|t| *t != source) {
					let before = self.snapshot();
					if create_edge(&mut self.edges, &source, &target) {
						info!("created edge {source} -> {target}");
						self.history.record(before);
					}
				}
				Repaint::Full
			}
			Phase::DraggingNode { id, node_start, .. } => {
				let moved = self
					.nodes
					.get(&id)
					.is_some_and(|n| n.x != node_start.x || n.y != node_start.y);
				if let Some(before) = self.pending.take().filter(|_| moved) {
					debug!("moved {id}");
					self.history.record(before);
				}
				// the highlight stays; selection itself ends with the gesture
				Repaint::None
			}
			other => {
				self.phase = other;
				Repaint::None
			}
		}
	}

	fn on_key_down(&mut self, key: &Key) -> Repaint {
		match key.name.as_str() {
			"Delete" | "Backspace" => self.delete_selected_node(),
			"Escape" => self.cancel(),
			"z" | "Z" if key.ctrl && key.shift => self.redo(),
			"z" | "Z" if key.ctrl => self.undo(),
			"y" | "Y" if key.ctrl => self.redo(),
			_ => Repaint::None,
		}
	}

	/// Edges touching the removed node are kept; they are skipped until a node
	/// with that id exists again.
	fn delete_selected_node(&mut self) -> Repaint {
		let Some(id) = self.selected_node().map(str::to_owned) else {
			return Repaint::None;
		};
		let before = self.pending.take().unwrap_or_else(|| self.snapshot());
		if self.nodes.remove(&id).is_some() {
			info!("deleted node {id}");
			self.history.record(before);
		}
		self.phase = Phase::Idle;
		Repaint::Full
	}

	fn cancel(&mut self) -> Repaint {
		if self.phase == Phase::Idle {
			return self.highlight(None);
		}
		// a cancelled drag snaps back
		let pending = self.pending.take();
		if matches!(self.phase, Phase::DraggingNode { .. }) {
			if let Some(before) = pending {
				self.restore(before);
			}
		}
		self.highlight(None);
		self.phase = Phase::Idle;
		Repaint::Full
	}

	fn undo(&mut self) -> Repaint {
		let current = self.snapshot();
		match self.history.undo(current) {
			Some(previous) => {
				info!("undo");
				self.reset_to(previous)
			}
			None => Repaint::None,
		}
	}

	fn redo(&mut self) -> Repaint {
		let current = self.snapshot();
		match self.history.redo(current) {
			Some(next) => {
				info!("redo");
				self.reset_to(next)
			}
			None => Repaint::None,
		}
	}

	fn reset_to(&mut self, snapshot: Snapshot) -> Repaint {
		self.restore(snapshot);
		self.pending = None;
		self.phase = Phase::Idle;
		self.highlight(None);
		Repaint::Full
	}

	/// Inserts a node at the first free grid slot and selects it.
	fn add_node(&mut self, shape: NodeShape) -> Repaint {
		let id = self.nodes.next_id("node");
		let mut node = self.free_slot(&id, shape).unwrap_or_else(|| {
			let mut node = Node::new(id.as_str(), CANVAS_MARGIN, CANVAS_MARGIN, shape);
			check_collision(&mut node, self.nodes.as_slice(), self.height, self.width);
			node
		});
		node.style.fill = self.palette.node_fill.clone();
		node.style.border = self.palette.node_border.clone();

		let before = self.snapshot();
		let repaint = self.highlight(None);
		if !self.nodes.insert(node) {
			return repaint;
		}
		self.history.record(before);
		self.highlight(Some(id.as_str()));
		debug!("added node {id}");
		self.phase = Phase::NodeSelected { id };
		Repaint::Full
	}

	fn free_slot(&self, id: &str, shape: NodeShape) -> Option<Node> {
		let step = DEFAULT_NODE_SIZE + GRID_SPACING;
		let fits = |v: f64, limit: f64| v + DEFAULT_NODE_SIZE + CANVAS_MARGIN <= limit;

		let mut y = CANVAS_MARGIN;
		while fits(y, self.height) {
			let mut x = CANVAS_MARGIN;
			while fits(x, self.width) {
				let candidate = Node::new(id, x, y, shape);
				if !self.nodes.iter().any(|n| overlaps(&candidate, n)) {
					return Some(candidate);
				}
				x += step;
			}
			y += step;
		}
		None
	}

	/// Marks `selected` with the selection border and resets every other node.
	fn highlight(&mut self, selected: Option<&str>) -> Repaint {
		let (plain, marked) = (&self.palette.node_border, &self.palette.selected_border);
		let mut changed = false;
		self.nodes.update_all(|node| {
			let border = if selected == Some(node.id.as_str()) { marked } else { plain };
			if node.style.border != *border {
				node.style.border = border.clone();
				changed = true;
			}
		});
		if changed { Repaint::Full } else { Repaint::None }
	}

	fn snapshot(&self) -> Snapshot {
		Snapshot {
			nodes: self.nodes.clone(),
			edges: self.edges.clone(),
		}
	}

	fn restore(&mut self, snapshot: Snapshot) {
		self.nodes = snapshot.nodes;
		self.edges = snapshot.edges;
	}
}
