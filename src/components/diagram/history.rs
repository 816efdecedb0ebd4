use std::collections::VecDeque;

use super::arena::NodeArena;
use super::types::{Edge, HISTORY_LIMIT};

/// Node and edge state captured before a committed change.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
	pub nodes: NodeArena,
	pub edges: Vec<Edge>,
}

/// Linear undo/redo stacks. Recording a new step drops the redo stack.
#[derive(Clone, Debug, Default)]
pub struct History {
	past: VecDeque<Snapshot>,
	future: Vec<Snapshot>,
}

impl History {
	pub fn record(&mut self, before: Snapshot) {
		if self.past.len() == HISTORY_LIMIT {
			self.past.pop_front();
		}
		self.past.push_back(before);
		self.future.clear();
	}

	/// Returns the state to restore, stashing `current` for redo.
	pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
		let previous = self.past.pop_back()?;
		self.future.push(current);
		Some(previous)
	}

	pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
		let next = self.future.pop()?;
		self.past.push_back(current);
		Some(next)
	}

	pub fn can_undo(&self) -> bool {
		!self.past.is_empty()
	}

	pub fn can_redo(&self) -> bool {
		!self.future.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn snap(edges: usize) -> Snapshot {
		Snapshot {
			nodes: NodeArena::new(),
			edges: (0..edges).map(|i| Edge::new(format!("n{i}"), "x")).collect(),
		}
	}

	#[test]
	fn undo_redo_walk_the_line() {
		let mut history = History::default();
		assert!(history.undo(snap(9)).is_none());

		history.record(snap(0));
		history.record(snap(1));
		assert_eq!(history.undo(snap(2)).map(|s| s.edges.len()), Some(1));
		assert_eq!(history.undo(snap(1)).map(|s| s.edges.len()), Some(0));
		assert!(!history.can_undo());
		assert_eq!(history.redo(snap(0)).map(|s| s.edges.len()), Some(1));
		assert!(history.can_redo());

		history.record(snap(1));
		assert!(!history.can_redo());
	}

	#[test]
	fn oldest_steps_fall_off() {
		let mut history = History::default();
		for i in 0..HISTORY_LIMIT + 5 {
			history.record(snap(i));
		}
		let mut steps = 0;
		let mut last = None;
		while let Some(s) = history.undo(snap(0)) {
			steps += 1;
			last = Some(s.edges.len());
		}
		assert_eq!(steps, HISTORY_LIMIT);
		assert_eq!(last, Some(5));
	}
}
