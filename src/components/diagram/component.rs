use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, Window,
};

use super::render;
use super::state::{Editor, EditorEvent, Key, PointerButton};
use super::types::{Diagram, NodeShape, Palette, Position};

/// Editor state shared between the DOM callbacks and the frame loop.
#[derive(Clone)]
struct Host {
	editor: Rc<RefCell<Option<Editor>>>,
	dirty: Rc<Cell<bool>>,
	/// `(can_undo, can_redo)` for the toolbar.
	history: RwSignal<(bool, bool)>,
}

impl Host {
	fn new() -> Self {
		Self {
			editor: Rc::new(RefCell::new(None)),
			dirty: Rc::new(Cell::new(false)),
			history: RwSignal::new((false, false)),
		}
	}

	fn reset(&self, editor: Editor) {
		let flags = (editor.can_undo(), editor.can_redo());
		*self.editor.borrow_mut() = Some(editor);
		self.dirty.set(true);
		self.publish(flags);
	}

	/// Feeds `event` to the editor and flags a repaint if it asks for one.
	fn dispatch(&self, event: EditorEvent) {
		let flags = {
			let mut slot = self.editor.borrow_mut();
			let Some(current) = slot.take() else {
				return;
			};
			let (next, repaint) = current.transition(&event);
			let flags = (next.can_undo(), next.can_redo());
			*slot = Some(next);
			if repaint.needed() {
				self.dirty.set(true);
			}
			flags
		};
		self.publish(flags);
	}

	fn publish(&self, flags: (bool, bool)) {
		if self.history.try_get_untracked().is_some_and(|current| current != flags) {
			self.history.set(flags);
		}
	}

	fn is_drawing_edge(&self) -> bool {
		self.editor.borrow().as_ref().is_some_and(Editor::is_drawing_edge)
	}
}

fn canvas_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Position {
	let rect = canvas.get_bounding_client_rect();
	Position::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	Some((width, height))
}

fn update_cursor(canvas: &HtmlCanvasElement, host: &Host) {
	let cursor = if host.is_drawing_edge() { "crosshair" } else { "default" };
	let _ = HtmlElement::style(canvas).set_property("cursor", cursor);
}

#[component]
pub fn DiagramCanvas(
	#[prop(into)] diagram: Signal<Diagram>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = Palette::default())] palette: Palette,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let host = Host::new();
	let history = host.history;
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let keydown_cb: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));
	let (host_init, animate_init, resize_cb_init, keydown_cb_init) = (
		host.clone(),
		animate.clone(),
		resize_cb.clone(),
		keydown_cb.clone(),
	);

	Effect::new(move |_| {
		let diagram = diagram.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		// A new diagram replaces the editor; listeners and the frame loop stay.
		let size = host_init.editor.borrow().as_ref().map(Editor::size);
		if let Some((w, h)) = size {
			host_init.reset(Editor::new(&diagram, w, h, palette.clone()));
			return;
		}

		let Some(window) = web_sys::window() else {
			warn!("no window, editor not mounted");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("2d context unavailable, editor not mounted");
			return;
		};
		host_init.reset(Editor::new(&diagram, w, h, palette.clone()));

		if fullscreen {
			let (host_resize, canvas_resize) = (host_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				host_resize.dispatch(EditorEvent::Resize { width: nw, height: nh });
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let host_key = host_init.clone();
		*keydown_cb_init.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			let key = Key {
				name: ev.key(),
				ctrl: ev.ctrl_key() || ev.meta_key(),
				shift: ev.shift_key(),
			};
			host_key.dispatch(EditorEvent::KeyDown(key));
		}));
		if let Some(ref cb) = *keydown_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}

		let (host_anim, animate_inner) = (host_init.clone(), animate_init.clone());
		let mut ctx = ctx;
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if host_anim.dirty.replace(false) {
				if let Some(ref e) = *host_anim.editor.borrow() {
					render::render(e, &mut ctx);
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let host_md = host.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let at = canvas_position(&canvas, &ev);
		let button = PointerButton::from_dom(ev.button());
		host_md.dispatch(EditorEvent::PointerDown { button, at });
		update_cursor(&canvas, &host_md);
	};

	let host_mm = host.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let at = canvas_position(&canvas, &ev);
		host_mm.dispatch(EditorEvent::PointerMove { at });
	};

	let host_mu = host.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let at = canvas_position(&canvas, &ev);
		host_mu.dispatch(EditorEvent::PointerUp { at });
		update_cursor(&canvas, &host_mu);
	};

	// Leaving the canvas ends any gesture, like a release would.
	let host_ml = host.clone();
	let on_mouseleave = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let at = canvas_position(&canvas, &ev);
		host_ml.dispatch(EditorEvent::PointerUp { at });
		update_cursor(&canvas, &host_ml);
	};

	let toolbar_action = |event: EditorEvent| {
		let host = host.clone();
		move |_: MouseEvent| host.dispatch(event.clone())
	};

	view! {
		<div class="diagram-canvas">
			<div class="diagram-toolbar">
				<button on:click=toolbar_action(EditorEvent::AddNode(NodeShape::Rect))>
					"Add rectangle"
				</button>
				<button on:click=toolbar_action(EditorEvent::AddNode(NodeShape::Ellipse))>
					"Add ellipse"
				</button>
				<button
					on:click=toolbar_action(EditorEvent::Undo)
					disabled=move || !history.get().0
				>
					"Undo"
				</button>
				<button
					on:click=toolbar_action(EditorEvent::Redo)
					disabled=move || !history.get().1
				>
					"Redo"
				</button>
			</div>
			<canvas
				node_ref=canvas_ref
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				style="display: block;"
			/>
		</div>
	}
}
