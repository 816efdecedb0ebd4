/// Keeps dragged nodes this far away from every canvas edge.
pub const CANVAS_MARGIN: f64 = 5.0;
/// Nominal radius of a connection dot, also its painted size.
pub const DOT_RADIUS: f64 = 3.0;
/// Extra hit margin around a connection dot, in both axes.
pub const DOT_LEEWAY: f64 = 8.0;
/// Horizontal shrink applied to an edge's clickable envelope.
pub const EDGE_SHRINK: f64 = 20.0;
/// Length of each arrowhead barb.
pub const ARROW_LENGTH: f64 = 10.0;
/// Distance between background grid dots.
pub const GRID_SPACING: f64 = 20.0;
/// Side length of a background grid dot.
pub const GRID_DOT_SIZE: f64 = 2.0;
/// Maximum number of undo steps kept.
pub const HISTORY_LIMIT: usize = 100;

/// Default node size used by [`Node::new`] and the add-node action.
pub const DEFAULT_NODE_SIZE: f64 = 50.0;

/// A point on the drawing surface, in surface-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeShape {
	#[default]
	Rect,
	Ellipse,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
	pub fill: String,
	pub border: String,
}

impl Default for NodeStyle {
	fn default() -> Self {
		let palette = Palette::default();
		Self {
			fill: palette.node_fill,
			border: palette.node_border,
		}
	}
}

/// A positioned, sized shape. `(x, y)` is the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
	pub style: NodeStyle,
	pub shape: NodeShape,
}

impl Node {
	/// A default-styled node of [`DEFAULT_NODE_SIZE`].
	pub fn new(id: impl Into<String>, x: f64, y: f64, shape: NodeShape) -> Self {
		Self {
			id: id.into(),
			x,
			y,
			width: DEFAULT_NODE_SIZE,
			height: DEFAULT_NODE_SIZE,
			style: NodeStyle::default(),
			shape,
		}
	}

	pub fn center(&self) -> Position {
		Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}
}

/// A directed, weighted connection between two node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub from: String,
	pub to: String,
	pub weight: f64,
}

impl Edge {
	pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
		Self {
			from: from.into(),
			to: to.into(),
			weight: 1.0,
		}
	}

	/// Whether this edge connects `from` to `to`, in that direction.
	pub fn links(&self, from: &str, to: &str) -> bool {
		self.from == from && self.to == to
	}
}

/// Connection anchor on a node's perimeter. Derived, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
}

impl Dot {
	pub fn position(&self) -> Position {
		Position::new(self.x, self.y)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl BoundingBox {
	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}
}

/// Initial contents handed to the editor component.
#[derive(Clone, Debug, Default)]
pub struct Diagram {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

/// Colors used by the renderer and the selection restyling.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	pub background: String,
	pub grid: String,
	pub node_fill: String,
	pub node_border: String,
	pub selected_border: String,
	pub label: String,
	pub dot: String,
	/// Committed edges while the diagram has no cycle.
	pub edge: String,
	/// Committed edges once a cycle is detected.
	pub cycle_edge: String,
	pub selected_edge: String,
	pub drawing_edge: String,
	pub label_font: String,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			background: "#ffffff".into(),
			grid: "#2f3434".into(),
			node_fill: "#f4f4f4".into(),
			node_border: "#000000".into(),
			selected_border: "#ff7f0e".into(),
			label: "#000000".into(),
			dot: "#1f77b4".into(),
			edge: "#2ca02c".into(),
			cycle_edge: "#d62728".into(),
			selected_edge: "#9467bd".into(),
			drawing_edge: "#17becf".into(),
			label_font: "12px Arial".into(),
		}
	}
}
