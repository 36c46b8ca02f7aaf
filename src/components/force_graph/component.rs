//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for hover, selection, panning and zooming. A [`FrameLoop`] runs the
//! simulation and renderer once per animation frame and is released when the
//! component is cleaned up.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::config::GraphOptions;
use super::controls::{ControlCommand, GraphControls};
use super::export::export_png;
use super::frame_loop::FrameLoop;
use super::interaction::{GraphObserver, InteractionPhase, Modifiers};
use super::state::GraphView;
use super::stats::{Clock, DateClock};
use super::types::{GraphData, GraphEdge, GraphNode};

type SharedView = Rc<RefCell<Option<GraphView>>>;

/// Forwards interaction notifications to the component's callback props.
#[derive(Clone, Copy, Default)]
struct CallbackObserver {
	node_click: Option<Callback<GraphNode>>,
	node_hover: Option<Callback<Option<GraphNode>>>,
	edge_click: Option<Callback<GraphEdge>>,
	selection_change: Option<Callback<Vec<GraphNode>>>,
}

impl GraphObserver for CallbackObserver {
	fn on_node_click(&mut self, node: &GraphNode) {
		if let Some(cb) = self.node_click {
			cb.run(node.clone());
		}
	}

	fn on_node_hover(&mut self, node: Option<&GraphNode>) {
		if let Some(cb) = self.node_hover {
			cb.run(node.cloned());
		}
	}

	fn on_edge_click(&mut self, edge: &GraphEdge) {
		if let Some(cb) = self.edge_click {
			cb.run(edge.clone());
		}
	}

	fn on_selection_change(&mut self, nodes: &[GraphNode]) {
		if let Some(cb) = self.selection_change {
			cb.run(nodes.to_vec());
		}
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Pointer position relative to the canvas' top-left corner.
fn pointer_position(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn set_cursor(canvas_ref: NodeRef<Canvas>, view: &GraphView) {
	let Some(canvas) = canvas_ref.get_untracked() else {
		return;
	};
	let canvas: HtmlCanvasElement = canvas.into();
	let cursor = match view.phase() {
		InteractionPhase::Panning => "grabbing",
		InteractionPhase::Hovering(_) => "pointer",
		_ if view.options().interaction.enable_drag => "grab",
		_ => "default",
	};
	let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
}

/// Renders an interactive force-directed graph on a canvas element.
///
/// Pass graph data via the reactive `data` signal; replacing it re-initializes
/// the layout. The component sizes itself to its parent container by default;
/// set `fullscreen = true` to fill the viewport and resize automatically with
/// the window. Explicit `width`/`height` override automatic sizing.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into, default = Signal::stored(GraphOptions::default()))] options: Signal<GraphOptions>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = true)] show_controls: bool,
	#[prop(optional, into)] on_node_click: Option<Callback<GraphNode>>,
	#[prop(optional, into)] on_node_hover: Option<Callback<Option<GraphNode>>>,
	#[prop(optional, into)] on_edge_click: Option<Callback<GraphEdge>>,
	#[prop(optional, into)] on_selection_change: Option<Callback<Vec<GraphNode>>>,
	#[prop(optional, into)] on_export: Option<Callback<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let view_state: SharedView = Rc::new(RefCell::new(None));
	let frame_loop = StoredValue::new_local(None::<FrameLoop>);
	let live_options = RwSignal::new(options.get_untracked());
	let kinds = RwSignal::new(Vec::<String>::new());
	let observer = CallbackObserver {
		node_click: on_node_click,
		node_hover: on_node_hover,
		edge_click: on_edge_click,
		selection_change: on_selection_change,
	};

	on_cleanup(move || {
		let _ = frame_loop.try_update_value(Option::take);
	});

	let view_init = view_state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let mut frames = FrameLoop::new(window.clone());

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			let parent = canvas.parent_element();
			(
				width.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(mut ctx) = context_2d(&canvas) else {
			warn!("symbol-graph: canvas has no 2d context");
			return;
		};

		let graph = GraphView::new(data.get_untracked(), live_options.get_untracked(), w, h)
			.with_observer(observer);
		kinds.set(graph.kinds().to_vec());
		*view_init.borrow_mut() = Some(graph);

		if fullscreen {
			let (view_resize, canvas_resize, window_resize) =
				(view_init.clone(), canvas.clone(), window.clone());
			frames.on_resize(move || {
				let Some((nw, nh)) = window_size(&window_resize) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut v) = *view_resize.borrow_mut() {
					v.resize(nw, nh);
				}
			});
		}

		let clock: Box<dyn Clock> = match window.performance() {
			Some(performance) => Box::new(performance),
			None => Box::new(DateClock),
		};
		let view_frame = view_init.clone();
		frames.start(move || {
			if let Some(ref mut v) = *view_frame.borrow_mut() {
				v.frame(&mut ctx, clock.as_ref());
			}
		});
		frame_loop.set_value(Some(frames));
		info!("symbol-graph: canvas ready at {}x{}", w, h);
	});

	let view_data = view_state.clone();
	Effect::watch(
		move || data.get(),
		move |data, _, _| {
			if let Some(ref mut v) = *view_data.borrow_mut() {
				v.set_data(data.clone());
				kinds.set(v.kinds().to_vec());
			}
		},
		false,
	);

	Effect::watch(
		move || options.get(),
		move |options, _, _| live_options.set(options.clone()),
		false,
	);

	let view_options = view_state.clone();
	Effect::watch(
		move || live_options.get(),
		move |options, _, _| {
			if let Some(ref mut v) = *view_options.borrow_mut() {
				v.set_options(options.clone());
			}
		},
		false,
	);

	let view_md = view_state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(point) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut v) = *view_md.borrow_mut() {
			v.pointer_down(point);
			set_cursor(canvas_ref, v);
		}
	};

	let view_mm = view_state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(point) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut v) = *view_mm.borrow_mut() {
			v.pointer_move(point);
			set_cursor(canvas_ref, v);
		}
	};

	let view_mu = view_state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut v) = *view_mu.borrow_mut() {
			v.pointer_up();
			set_cursor(canvas_ref, v);
		}
	};

	let view_ml = view_state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut v) = *view_ml.borrow_mut() {
			v.pointer_leave();
			set_cursor(canvas_ref, v);
		}
	};

	let view_click = view_state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(point) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let modifiers = Modifiers {
			ctrl: ev.ctrl_key(),
			meta: ev.meta_key(),
		};
		if let Some(ref mut v) = *view_click.borrow_mut() {
			v.click(point, modifiers);
		}
	};

	let view_wh = view_state.clone();
	let on_wheel = move |ev: WheelEvent| {
		let Some(point) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut v) = *view_wh.borrow_mut() {
			if v.wheel(point, ev.delta_y()) {
				ev.prevent_default();
			}
		}
	};

	let view_cmd = view_state.clone();
	let on_command = move |command: ControlCommand| {
		let mut guard = view_cmd.borrow_mut();
		let Some(v) = guard.as_mut() else {
			return;
		};
		match command {
			ControlCommand::ZoomIn => v.zoom_in(),
			ControlCommand::ZoomOut => v.zoom_out(),
			ControlCommand::FitView => v.fit_view(),
			ControlCommand::SetKindFilter(kind) => v.set_kind_filter(kind),
			ControlCommand::Export => {
				let Some(canvas) = canvas_ref.get_untracked() else {
					return;
				};
				let canvas: HtmlCanvasElement = canvas.into();
				match export_png(&canvas) {
					Some(url) => {
						info!("symbol-graph: exported {} byte PNG", url.len());
						if let Some(cb) = on_export {
							cb.run(url);
						}
					}
					None => warn!("symbol-graph: nothing to export"),
				}
			}
		}
	};

	view! {
		<div class="force-graph" class:fullscreen=fullscreen style="position: relative;">
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
			{show_controls
				.then(|| {
					view! {
						<GraphControls options=live_options kinds=kinds on_command=on_command />
					}
				})}
		</div>
	}
}
