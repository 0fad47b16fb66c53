//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, hovering, selection and zooming. A
//! [`Viewport`] owns the window-level registrations (animation frame, resize
//! listener, container observer) and tears them down when the component
//! unmounts.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, ResizeObserver, WheelEvent, Window,
};

use super::canvas;
use super::render::{POPOVER_WIDTH, Popover};
use super::state::ForceGraphState;
use super::theme::Theme;
use super::types::GraphData;

const RESET_BUTTON_STYLE: &str = "position: absolute; top: 12px; right: 12px;";
const EMPTY_STATE_STYLE: &str =
	"position: absolute; inset: 0; display: flex; align-items: center; justify-content: center;";

fn popover_style(popover: &Popover) -> String {
	format!(
		"position: absolute; left: {}px; top: {}px; width: {}px;",
		popover.x, popover.y, POPOVER_WIDTH,
	)
}

/// Bundles graph state with its visual theme.
struct GraphContext {
	state: ForceGraphState,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;

/// Window registrations for one mounted canvas.
///
/// Holds the animation-frame and resize callbacks so that `teardown` can
/// cancel the pending frame, unsubscribe the listeners and release them.
struct Viewport {
	window: Window,
	frame_cb: Option<Closure<dyn FnMut()>>,
	resize_cb: Option<Closure<dyn FnMut()>>,
	observer: Option<(ResizeObserver, Closure<dyn FnMut()>)>,
	frame_handle: Option<i32>,
}

impl Viewport {
	fn new(window: Window) -> Self {
		Self {
			window,
			frame_cb: None,
			resize_cb: None,
			observer: None,
			frame_handle: None,
		}
	}

	fn listen_resize(&mut self, cb: Closure<dyn FnMut()>) {
		let _ = self
			.window
			.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		self.resize_cb = Some(cb);
	}

	/// Watch `target` for size changes the window never reports.
	fn observe_container(&mut self, target: &Element, cb: Closure<dyn FnMut()>) {
		match ResizeObserver::new(cb.as_ref().unchecked_ref()) {
			Ok(observer) => {
				observer.observe(target);
				self.observer = Some((observer, cb));
			}
			Err(e) => warn!("kb-graph: container resize observer unavailable: {:?}", e),
		}
	}

	fn request_frame(&mut self) {
		if let Some(ref cb) = self.frame_cb {
			self.frame_handle = self
				.window
				.request_animation_frame(cb.as_ref().unchecked_ref())
				.ok();
		}
	}

	fn teardown(&mut self) {
		if let Some(handle) = self.frame_handle.take() {
			let _ = self.window.cancel_animation_frame(handle);
		}
		if let Some(cb) = self.resize_cb.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		if let Some((observer, _cb)) = self.observer.take() {
			observer.disconnect();
		}
		self.frame_cb = None;
	}
}

/// Pixel size the canvas should take: explicit props win, then the window
/// (fullscreen) or the parent element.
fn surface_size(
	canvas: &HtmlCanvasElement,
	window: &Window,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		let w = window.inner_width().ok().and_then(|v| v.as_f64());
		let h = window.inner_height().ok().and_then(|v| v.as_f64());
		return (w.unwrap_or(800.0), h.unwrap_or(600.0));
	}
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0)),
		height.unwrap_or_else(|| parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0)),
	)
}

/// Resize the canvas to its current surface size and clamp the layout into it.
fn fit_surface(
	context: &SharedContext,
	canvas: &HtmlCanvasElement,
	window: &Window,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) {
	let (w, h) = surface_size(canvas, window, fullscreen, width, height);
	if let Some(ref mut c) = *context.borrow_mut() {
		if (w, h) == (c.state.width, c.state.height) {
			return;
		}
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		c.state.resize(w, h);
	}
}

/// Pointer position relative to the canvas' top-left corner.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders an interactive force-directed graph on a canvas element.
///
/// `data` stays `None` while the dataset is loading or failed to load; the
/// canvas then shows nothing and the simulation is not created. Once data
/// arrives the layout is seeded and the animation loop starts.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the window. Explicit `width`/`height` override
/// automatic sizing. The detail popover links to `link_base` + node id.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<Option<GraphData>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(into, default = "/docs/".to_string())] link_base: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let popover = RwSignal::new(None::<Popover>);
	let dismiss = RwSignal::new(false);
	let alive = Arc::new(AtomicBool::new(true));

	let alive_cleanup = alive.clone();
	on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));

	let context_init = context.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(data) = data.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = surface_size(&canvas, &window, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("kb-graph: canvas has no 2d context");
			return;
		};

		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(&data, w, h, js_sys::Date::now() as u64),
			theme: Theme::default(),
		});

		let viewport = Rc::new(RefCell::new(Viewport::new(window.clone())));

		let (context_resize, canvas_resize, window_resize) =
			(context_init.clone(), canvas.clone(), window.clone());
		viewport.borrow_mut().listen_resize(Closure::new(move || {
			fit_surface(&context_resize, &canvas_resize, &window_resize, fullscreen, width, height);
		}));

		// Embedded canvases follow their container, which can change size
		// without the window resizing.
		if !fullscreen {
			if let Some(container) = canvas.parent_element() {
				let (context_observe, canvas_observe, window_observe) =
					(context_init.clone(), canvas.clone(), window.clone());
				viewport.borrow_mut().observe_container(
					&container,
					Closure::new(move || {
						fit_surface(&context_observe, &canvas_observe, &window_observe, fullscreen, width, height);
					}),
				);
			}
		}

		let (context_anim, viewport_anim, alive_anim) =
			(context_init.clone(), viewport.clone(), alive.clone());
		viewport.borrow_mut().frame_cb = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				viewport_anim.borrow_mut().teardown();
				info!("kb-graph: viewport torn down");
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if dismiss.get_untracked() {
					c.state.close_popover();
					dismiss.set(false);
				}
				c.state.tick();
				let frame = c.state.frame(&c.theme);
				canvas::commit(&ctx, &frame, c.state.width, c.state.height);
				if popover.get_untracked() != frame.popover {
					popover.set(frame.popover);
				}
			}
			viewport_anim.borrow_mut().request_frame();
		}));
		viewport.borrow_mut().request_frame();
		debug!("kb-graph: viewport attached at {}x{}", w, h);
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_move(x, y);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.pointer_up();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_leave();
		}
	};

	let context_ck = context.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_ck.borrow_mut() {
			c.state.click(x, y);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.wheel(x, y, ev.delta_y());
		}
	};

	let context_rs = context.clone();
	let on_reset = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_rs.borrow_mut() {
			c.state.reset_view();
		}
	};

	view! {
		<div class="force-graph" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:click=on_click
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<button class="force-graph-reset" style=RESET_BUTTON_STYLE on:click=on_reset>
				"Reset view"
			</button>
			{move || data.with(|d| d.is_none()).then(|| view! {
				<div class="force-graph-empty" style=EMPTY_STATE_STYLE>"No graph data available."</div>
			})}
			{move || popover.get().map(|p| {
				let href = format!("{}{}", link_base, p.node_id);
				let style = popover_style(&p);
				view! {
					<div class="node-popover" style=style>
						<button
							class="node-popover-close"
							style="float: right;"
							aria-label="Close"
							on:click=move |_| {
								dismiss.set(true);
								popover.set(None);
							}
						>
							"×"
						</button>
						<h3>{p.title}</h3>
						<p class="node-popover-category">{p.category}</p>
						<ul class="node-popover-tags">
							{p.tags.into_iter().map(|tag| view! { <li>{tag}</li> }).collect_view()}
						</ul>
						<a href=href>"Open document"</a>
					</div>
				}
			})}
		</div>
	}
}
