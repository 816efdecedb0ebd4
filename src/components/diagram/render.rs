use super::analysis::find_cycle;
use super::geometry::{arrow_angle, bezier_mid_point, calculate_arrow_coords, find_control_point};
use super::spatial::{dot_coordinates, edge_anchors, edge_envelope, nearest_dot};
use super::state::{Editor, Phase};
use super::surface::{Stroke, Surface};
use super::types::{
	ARROW_LENGTH, GRID_DOT_SIZE, GRID_SPACING, Node, NodeShape, Palette, Position,
};

const EDGE_WIDTH: f64 = 1.5;
const BORDER_WIDTH: f64 = 1.0;

/// Clears the surface and paints one full frame.
pub fn render(editor: &Editor, surface: &mut impl Surface) {
	let palette = editor.palette();
	let (width, height) = editor.size();

	surface.clear_rect(0.0, 0.0, width, height);
	surface.fill_rect(0.0, 0.0, width, height, &palette.background);
	draw_grid(surface, width, height, palette);

	if let Phase::DrawingEdge { source, cursor } = editor.phase() {
		if let Some(node) = editor.nodes().iter().find(|n| n.id == *source) {
			draw_preview(surface, node, *cursor, palette);
		}
	}
	draw_edges(editor, surface, palette);
	draw_nodes(editor.nodes(), surface, palette);

	if let Some(bbox) = editor
		.selected_edge()
		.and_then(|edge| edge_envelope(edge, editor.nodes()))
	{
		surface.stroke_rect(
			bbox.min_x,
			bbox.min_y,
			bbox.width(),
			bbox.height(),
			&Stroke::dashed(&palette.selected_edge, BORDER_WIDTH, 4.0, 4.0),
		);
	}
}

fn draw_grid(surface: &mut impl Surface, width: f64, height: f64, palette: &Palette) {
	let mut x = GRID_SPACING / 2.0;
	while x < width {
		let mut y = GRID_SPACING / 2.0;
		while y < height {
			surface.fill_rect(x, y, GRID_DOT_SIZE, GRID_DOT_SIZE, &palette.grid);
			y += GRID_SPACING;
		}
		x += GRID_SPACING;
	}
}

fn draw_preview(surface: &mut impl Surface, source: &Node, cursor: Position, palette: &Palette) {
	let from = nearest_dot(source, cursor).position();
	let controls = find_control_point(from, cursor);
	surface.stroke_bezier(
		from,
		controls.cp1,
		controls.cp2,
		cursor,
		&Stroke::dashed(&palette.drawing_edge, EDGE_WIDTH, 6.0, 4.0),
	);
}

fn draw_edges(editor: &Editor, surface: &mut impl Surface, palette: &Palette) {
	let nodes = editor.nodes();
	let base = if find_cycle(nodes, editor.edges()) {
		&palette.cycle_edge
	} else {
		&palette.edge
	};

	for edge in editor.edges() {
		let Some((from, to)) = edge_anchors(edge, nodes) else {
			continue;
		};
		let color = if editor.selected_edge() == Some(edge) {
			&palette.selected_edge
		} else {
			base
		};
		let stroke = Stroke::solid(color, EDGE_WIDTH);

		let controls = find_control_point(from, to);
		surface.stroke_bezier(from, controls.cp1, controls.cp2, to, &stroke);

		let mid = bezier_mid_point(0.5, from, controls.cp1, controls.cp2, to);
		let angle = arrow_angle(from, mid, &controls);
		let (left, right) = calculate_arrow_coords(mid.x, mid.y, ARROW_LENGTH, angle);
		surface.stroke_line(mid, left, &stroke);
		surface.stroke_line(mid, right, &stroke);
	}
}

fn draw_nodes(nodes: &[Node], surface: &mut impl Surface, palette: &Palette) {
	for node in nodes {
		let border = Stroke::solid(&node.style.border, BORDER_WIDTH);
		match node.shape {
			NodeShape::Rect => {
				surface.fill_rect(node.x, node.y, node.width, node.height, &node.style.fill);
				surface.stroke_rect(node.x, node.y, node.width, node.height, &border);
			}
			NodeShape::Ellipse => {
				let (rx, ry) = (node.width / 2.0, node.height / 2.0);
				surface.fill_ellipse(node.center(), rx, ry, &node.style.fill);
				surface.stroke_ellipse(node.center(), rx, ry, &border);
			}
		}
		surface.fill_text(&node.id, node.center(), &palette.label_font, &palette.label);
		for dot in dot_coordinates(node) {
			surface.fill_ellipse(dot.position(), dot.radius, dot.radius, &palette.dot);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::diagram::state::{EditorEvent, PointerButton};
	use crate::components::diagram::types::{Diagram, Edge};

	#[derive(Clone, Debug, PartialEq)]
	enum Op {
		Clear,
		FillRect { color: String },
		StrokeRect { color: String, dashed: bool },
		FillEllipse { color: String },
		StrokeEllipse { color: String },
		Bezier { from: Position, to: Position, color: String, dashed: bool },
		Line { color: String },
		Text { text: String },
	}

	#[derive(Default)]
	struct Recorder {
		ops: Vec<Op>,
	}

	impl Surface for Recorder {
		fn clear_rect(&mut self, _: f64, _: f64, _: f64, _: f64) {
			self.ops.push(Op::Clear);
		}

		fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, color: &str) {
			self.ops.push(Op::FillRect { color: color.into() });
		}

		fn stroke_rect(&mut self, _: f64, _: f64, _: f64, _: f64, stroke: &Stroke) {
			self.ops.push(Op::StrokeRect {
				color: stroke.color.into(),
				dashed: stroke.dash.is_some(),
			});
		}

		fn fill_ellipse(&mut self, _: Position, _: f64, _: f64, color: &str) {
			self.ops.push(Op::FillEllipse { color: color.into() });
		}

		fn stroke_ellipse(&mut self, _: Position, _: f64, _: f64, stroke: &Stroke) {
			self.ops.push(Op::StrokeEllipse { color: stroke.color.into() });
		}

		fn stroke_bezier(
			&mut self,
			from: Position,
			_: Position,
			_: Position,
			to: Position,
			stroke: &Stroke,
		) {
			self.ops.push(Op::Bezier {
				from,
				to,
				color: stroke.color.into(),
				dashed: stroke.dash.is_some(),
			});
		}

		fn stroke_line(&mut self, _: Position, _: Position, stroke: &Stroke) {
			self.ops.push(Op::Line { color: stroke.color.into() });
		}

		fn fill_text(&mut self, text: &str, _: Position, _: &str, _: &str) {
			self.ops.push(Op::Text { text: text.into() });
		}
	}

	fn diagram(edges: &[(&str, &str)]) -> Diagram {
		Diagram {
			nodes: vec![
				Node::new("a", 100.0, 100.0, NodeShape::Rect),
				Node::new("b", 300.0, 100.0, NodeShape::Ellipse),
				Node::new("c", 300.0, 300.0, NodeShape::Rect),
			],
			edges: edges.iter().map(|(f, t)| Edge::new(*f, *t)).collect(),
		}
	}

	fn paint(editor: &Editor) -> Vec<Op> {
		let mut recorder = Recorder::default();
		render(editor, &mut recorder);
		recorder.ops
	}

	fn beziers(ops: &[Op]) -> Vec<&Op> {
		ops.iter().filter(|op| matches!(op, Op::Bezier { .. })).collect()
	}

	#[test]
	fn frame_starts_with_clear_background_and_grid() {
		let editor = Editor::new(&Diagram::default(), 100.0, 100.0, Palette::default());
		let ops = paint(&editor);
		let palette = Palette::default();

		assert_eq!(ops[0], Op::Clear);
		assert_eq!(ops[1], Op::FillRect { color: palette.background });
		assert_eq!(ops.len(), 2 + 25);
		assert!(ops[2..].iter().all(|op| *op == Op::FillRect { color: palette.grid.clone() }));
	}

	#[test]
	fn nodes_paint_shape_label_and_dots() {
		let editor = Editor::new(&diagram(&[]), 400.0, 400.0, Palette::default());
		let ops = paint(&editor);
		let labels: Vec<_> = ops
			.iter()
			.filter_map(|op| match op {
				Op::Text { text } => Some(text.as_str()),
				_ => None,
			})
			.collect();
		assert_eq!(labels, ["a", "b", "c"]);

		let dot_color = Palette::default().dot;
		let dots = ops
			.iter()
			.filter(|op| **op == Op::FillEllipse { color: dot_color.clone() })
			.count();
		assert_eq!(dots, 12);
		assert_eq!(ops.iter().filter(|op| matches!(op, Op::StrokeEllipse { .. })).count(), 1);
		assert_eq!(ops.iter().filter(|op| matches!(op, Op::StrokeRect { .. })).count(), 2);
	}

	#[test]
	fn edges_are_painted_under_nodes_with_arrowheads() {
		let editor = Editor::new(&diagram(&[("a", "b")]), 400.0, 400.0, Palette::default());
		let ops = paint(&editor);
		let palette = Palette::default();

		let curve = ops
			.iter()
			.position(|op| matches!(op, Op::Bezier { .. }))
			.expect("edge painted");
		let first_label = ops
			.iter()
			.position(|op| matches!(op, Op::Text { .. }))
			.expect("label painted");
		assert!(curve < first_label);
		assert_eq!(
			ops[curve],
			Op::Bezier {
				from: Position::new(150.0, 125.0),
				to: Position::new(300.0, 125.0),
				color: palette.edge.clone(),
				dashed: false,
			}
		);
		assert_eq!(ops[curve + 1], Op::Line { color: palette.edge.clone() });
		assert_eq!(ops[curve + 2], Op::Line { color: palette.edge });
	}

	#[test]
	fn cycle_switches_edge_color() {
		let edges = [("a", "b"), ("b", "c"), ("c", "b")];
		let editor = Editor::new(&diagram(&edges), 400.0, 400.0, Palette::default());
		let ops = paint(&editor);
		let cycle = Palette::default().cycle_edge;
		assert_eq!(beziers(&ops).len(), 3);
		assert!(beziers(&ops).iter().all(|op| matches!(op, Op::Bezier { color, .. } if *color == cycle)));
	}

	#[test]
	fn dangling_edges_are_skipped() {
		let editor = Editor::new(&diagram(&[("a", "ghost"), ("a", "c")]), 400.0, 400.0, Palette::default());
		assert_eq!(beziers(&paint(&editor)).len(), 1);
	}

	#[test]
	fn selected_edge_is_recoloured_and_framed() {
		let mut editor = Editor::new(&diagram(&[("a", "b")]), 400.0, 400.0, Palette::default());
		// envelope spans x 160..290 around y 125
		editor.handle(&EditorEvent::PointerDown {
			button: PointerButton::Primary,
			at: Position::new(225.0, 125.0),
		});
		assert!(editor.selected_edge().is_some());

		let ops = paint(&editor);
		let selected = Palette::default().selected_edge;
		assert!(matches!(beziers(&ops)[0], Op::Bezier { color, .. } if *color == selected));
		assert_eq!(
			ops.last(),
			Some(&Op::StrokeRect { color: selected, dashed: true })
		);
	}

	#[test]
	fn preview_is_drawn_before_committed_edges() {
		let mut editor = Editor::new(&diagram(&[("a", "b")]), 400.0, 400.0, Palette::default());
		// right dot of "a"
		editor.handle(&EditorEvent::PointerDown {
			button: PointerButton::Primary,
			at: Position::new(150.0, 125.0),
		});
		editor.handle(&EditorEvent::PointerMove { at: Position::new(200.0, 260.0) });

		let ops = paint(&editor);
		let curves = beziers(&ops);
		assert_eq!(curves.len(), 2);
		assert_eq!(
			*curves[0],
			Op::Bezier {
				from: Position::new(125.0, 150.0),
				to: Position::new(200.0, 260.0),
				color: Palette::default().drawing_edge,
				dashed: true,
			}
		);
		assert!(matches!(curves[1], Op::Bezier { dashed: false, .. }));
	}
}
