//! Leptos component wrapping the force-directed graph canvas.
//!
//! The canvas is set up once. Later changes to the `data` signal reload the
//! simulation in place so surviving nodes keep their positions. An animation
//! loop runs via `requestAnimationFrame`, ticking the layout and rendering
//! every frame. When the component unmounts, the next frame removes the resize
//! listener, drops the simulation and stops rescheduling itself.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::state::ForceGraphState;
use super::theme::Theme;
use super::types::{GraphData, HoveredNode};
use crate::network::NodeId;

/// Bundles graph simulation state with visual configuration.
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Mount flag shared between the owner's cleanup and the frame loop.
///
/// Cleanup callbacks must be `Send + Sync`, so they cannot reach the `Rc`
/// handles. They clear this flag and the loop tears itself down.
#[derive(Clone, Debug)]
struct Mounted(Arc<AtomicBool>);

impl Mounted {
	fn new() -> Self {
		Self(Arc::new(AtomicBool::new(true)))
	}

	fn unmount(&self) {
		self.0.store(false, Ordering::Release);
	}

	fn is_mounted(&self) -> bool {
		self.0.load(Ordering::Acquire)
	}
}

/// Drop everything the canvas registered with the window.
fn teardown(context: &RefCell<Option<GraphContext>>, animate: &FrameCallback, resize_cb: &FrameCallback) {
	if let Some(cb) = resize_cb.borrow_mut().take() {
		if let Some(win) = web_sys::window() {
			let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}
	context.borrow_mut().take();
	// the running frame closure is freed once it returns
	animate.borrow_mut().take();
	info!("care-graph: canvas unmounted, animation stopped");
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders an interactive force-directed graph on a canvas element.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and follow window resizes.
/// Clicking a node (press and release without dragging) reports its id
/// through `on_select`. Pointer movement reports the node under it, or `None`,
/// through `on_hover`.
#[component]
pub fn ForceGraphCanvas(
	/// Graph to lay out. Changes reload the simulation in place.
	#[prop(into)]
	data: Signal<GraphData>,
	/// Fill the viewport and follow window resizes.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed width. Defaults to the parent's width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed height. Defaults to the parent's height.
	#[prop(default = None)]
	height: Option<f64>,
	/// Called with the id of a clicked node.
	#[prop(optional, into)]
	on_select: Option<Callback<NodeId>>,
	/// Called as the pointer enters, moves over and leaves nodes.
	#[prop(optional, into)]
	on_hover: Option<Callback<Option<HoveredNode>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let mounted = Mounted::new();
	let (context_init, animate_init, resize_cb_init, mounted_init) =
		(context.clone(), animate.clone(), resize_cb.clone(), mounted.clone());
	on_cleanup(move || mounted.unmount());

	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		if let Some(ref mut c) = *context_init.borrow_mut() {
			c.state.reload(&graph, &c.theme);
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window).unwrap_or((800.0, 600.0))
		} else {
			let parent = canvas.parent_element();
			(
				width.unwrap_or_else(|| {
					parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("care-graph: 2d context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("care-graph: canvas has no 2d context");
				return;
			}
		};

		let theme = Theme::default();
		info!(
			"care-graph: canvas {}x{} with {} nodes, theme {}",
			w,
			h,
			graph.nodes.len(),
			theme.name
		);
		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(&graph, w, h, &theme),
			scale: ScaleConfig::default(),
			theme,
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner, resize_anim, mounted_anim) = (
			context_init.clone(),
			animate_init.clone(),
			resize_cb_init.clone(),
			mounted_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !mounted_anim.is_mounted() {
				teardown(&context_anim, &animate_inner, &resize_anim);
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(0.016);
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(idx) = c.state.node_at_position(x, y, &c.scale) {
				c.state.start_drag(idx, x, y);
			} else {
				c.state.pan.active = true;
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.transform.x;
				c.state.pan.transform_start_y = c.state.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let hovered = match *context_mm.borrow_mut() {
			Some(ref mut c) => {
				if c.state.drag.node.is_some() {
					c.state.drag_to(x, y);
				} else {
					let hovered = c.state.node_at_position(x, y, &c.scale);
					c.state.set_hover(hovered);
					if c.state.pan.active {
						c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
						c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
					}
				}
				c.state.hovered_id()
			}
			None => None,
		};
		if let Some(cb) = on_hover {
			cb.run(hovered.map(|id| HoveredNode { id, x, y }));
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = match *context_mu.borrow_mut() {
			Some(ref mut c) => {
				c.state.pan.active = false;
				c.state.end_drag()
			}
			None => None,
		};
		// the borrow is released before handing control back to the page
		if let (Some(id), Some(cb)) = (clicked, on_select) {
			cb.run(id);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pan.active = false;
			if c.state.drag.node.is_some() {
				let _ = c.state.end_drag();
			}
			c.state.set_hover(None);
		}
		if let Some(cb) = on_hover {
			cb.run(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (c.state.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / c.state.transform.k;
			c.state.transform.x = x - (x - c.state.transform.x) * ratio;
			c.state.transform.y = y - (y - c.state.transform.y) * ratio;
			c.state.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn assert_send_sync<T: Send + Sync + 'static>(_: &T) {}

	#[test]
	fn unmount_reaches_the_frame_loop() {
		let mounted = Mounted::new();
		let frame_side = mounted.clone();
		assert!(frame_side.is_mounted());

		// the cleanup half has to be storable by the reactive owner
		assert_send_sync(&mounted);
		let cleanup = move || mounted.unmount();
		cleanup();
		assert!(!frame_side.is_mounted());
	}
}
