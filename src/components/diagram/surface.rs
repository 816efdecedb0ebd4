//! Minimal immediate-mode drawing capability the renderer is written against.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::types::Position;

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke<'a> {
	pub color: &'a str,
	pub width: f64,
	/// Dash and gap lengths; solid when `None`.
	pub dash: Option<(f64, f64)>,
}

impl<'a> Stroke<'a> {
	pub fn solid(color: &'a str, width: f64) -> Self {
		Self { color, width, dash: None }
	}

	pub fn dashed(color: &'a str, width: f64, dash: f64, gap: f64) -> Self {
		Self {
			color,
			width,
			dash: Some((dash, gap)),
		}
	}
}

pub trait Surface {
	fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
	fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: &Stroke);
	fn fill_ellipse(&mut self, center: Position, rx: f64, ry: f64, color: &str);
	fn stroke_ellipse(&mut self, center: Position, rx: f64, ry: f64, stroke: &Stroke);
	fn stroke_bezier(
		&mut self,
		from: Position,
		cp1: Position,
		cp2: Position,
		to: Position,
		stroke: &Stroke,
	);
	fn stroke_line(&mut self, from: Position, to: Position, stroke: &Stroke);
	/// Draws `text` centred on `at`.
	fn fill_text(&mut self, text: &str, at: Position, font: &str, color: &str);
}

impl Surface for CanvasRenderingContext2d {
	fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
		CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
		self.set_fill_style_str(color);
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}

	fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: &Stroke) {
		apply_stroke(self, stroke);
		CanvasRenderingContext2d::stroke_rect(self, x, y, width, height);
	}

	fn fill_ellipse(&mut self, center: Position, rx: f64, ry: f64, color: &str) {
		self.begin_path();
		let _ = self.ellipse(center.x, center.y, rx, ry, 0.0, 0.0, 2.0 * PI);
		self.set_fill_style_str(color);
		self.fill();
	}

	fn stroke_ellipse(&mut self, center: Position, rx: f64, ry: f64, stroke: &Stroke) {
		self.begin_path();
		let _ = self.ellipse(center.x, center.y, rx, ry, 0.0, 0.0, 2.0 * PI);
		apply_stroke(self, stroke);
		self.stroke();
	}

	fn stroke_bezier(
		&mut self,
		from: Position,
		cp1: Position,
		cp2: Position,
		to: Position,
		stroke: &Stroke,
	) {
		apply_stroke(self, stroke);
		self.begin_path();
		self.move_to(from.x, from.y);
		self.bezier_curve_to(cp1.x, cp1.y, cp2.x, cp2.y, to.x, to.y);
		self.stroke();
	}

	fn stroke_line(&mut self, from: Position, to: Position, stroke: &Stroke) {
		apply_stroke(self, stroke);
		self.begin_path();
		self.move_to(from.x, from.y);
		self.line_to(to.x, to.y);
		self.stroke();
	}

	fn fill_text(&mut self, text: &str, at: Position, font: &str, color: &str) {
		self.set_font(font);
		self.set_text_align("center");
		self.set_text_baseline("middle");
		self.set_fill_style_str(color);
		let _ = CanvasRenderingContext2d::fill_text(self, text, at.x, at.y);
	}
}

fn apply_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) {
	ctx.set_stroke_style_str(stroke.color);
	ctx.set_line_width(stroke.width);
	let dash = match stroke.dash {
		Some((dash, gap)) => js_sys::Array::of2(&JsValue::from_f64(dash), &JsValue::from_f64(gap)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&dash);
}
