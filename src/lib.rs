//! symbol-graph: interactive force-directed canvas for code-symbol, knowledge
//! and memory graphs.
//!
//! This crate provides a WASM-based graph visualization component with a
//! physics-based layout, pan/zoom, hover greyout, selection and PNG export.
//! The host page embeds the graph as JSON; the [`App`] reads it and mounts a
//! full-window [`ForceGraphCanvas`].

// Selects the `js` entropy backend for `rand` on wasm32.
use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, debug, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::force_graph::{
	ForceGraphCanvas, GraphData, GraphEdge, GraphNode, GraphOptions, GraphView,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("symbol-graph: logging initialized");
}

/// Parse the JSON text of the `<script>` element with the given id.
fn load_json<T: DeserializeOwned>(element_id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(element_id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("symbol-graph: failed to parse #{}: {}", element_id, e);
			None
		}
	}
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], edges: [...] } (`links` is
/// accepted for `edges`).
pub fn load_graph_data() -> Option<GraphData> {
	let data: GraphData = load_json("graph-data")?;
	info!(
		"symbol-graph: loaded {} nodes, {} edges",
		data.nodes.len(),
		data.edges.len()
	);
	Some(data)
}

/// Load options from a script element with id="graph-options". Missing
/// fields take their defaults.
pub fn load_graph_options() -> Option<GraphOptions> {
	load_json("graph-options")
}

/// Main application component.
/// Loads graph data and options from the DOM and renders the visualization.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_default();
	let options = load_graph_options().unwrap_or_default();

	let on_node_click = Callback::new(|node: GraphNode| {
		info!("symbol-graph: clicked {}", node.id);
	});
	let on_node_hover = Callback::new(|node: Option<GraphNode>| {
		debug!("symbol-graph: hover {:?}", node.map(|n| n.id));
	});
	let on_edge_click = Callback::new(|edge: GraphEdge| {
		info!("symbol-graph: clicked edge {} -> {}", edge.source, edge.target);
	});
	let on_selection_change = Callback::new(|nodes: Vec<GraphNode>| {
		info!("symbol-graph: {} selected", nodes.len());
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Symbol Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas
				data=Signal::stored(graph_data)
				options=Signal::stored(options)
				fullscreen=true
				on_node_click=on_node_click
				on_node_hover=on_node_hover
				on_edge_click=on_edge_click
				on_selection_change=on_selection_change
			/>
			<div class="graph-overlay">
				<h1>"Symbol Graph"</h1>
				<p class="subtitle">
					"Click to select, Ctrl/Cmd-click to add. Scroll to zoom. Drag background to pan."
				</p>
			</div>
		</div>
	}
}
