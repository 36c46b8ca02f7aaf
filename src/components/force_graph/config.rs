//! Tunable options for the simulation, the renderer and pointer interaction.
//!
//! Options deserialize from a flat camelCase JSON object (the shape the host
//! settings panel and the `graph-options` script element use). Every field is
//! optional; anything missing falls back to the defaults below.

use serde::{Deserialize, Serialize};

/// Physics tunables for [`ForceSimulation`](super::simulation::ForceSimulation).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
	/// Pull toward the canvas center, per pixel of displacement.
	pub gravity: f64,
	/// Inverse-square repulsion numerator between every pair of nodes.
	pub repulsion: f64,
	/// Spring rest length for linked nodes, in world units.
	pub link_distance: f64,
	/// Spring stiffness for linked nodes.
	pub link_strength: f64,
	/// Velocity multiplier applied every tick (< 1).
	pub friction: f64,
	/// When false the layout is frozen at its initial placement.
	#[serde(rename = "simulationEnabled", alias = "enabled")]
	pub enabled: bool,
	/// Distance kept between nodes and the canvas border.
	#[serde(rename = "boundaryPadding")]
	pub padding: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			gravity: 0.005,
			repulsion: 5000.0,
			link_distance: 80.0,
			link_strength: 0.05,
			friction: 0.85,
			enabled: true,
			padding: 20.0,
		}
	}
}

/// Visual options for the render pipeline.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
	/// Default node radius in world units.
	pub node_size: f64,
	/// Fallback node color when neither the node nor its type provides one.
	pub node_color: String,
	/// Draw node labels.
	pub node_labels: bool,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Default edge width in screen pixels.
	pub edge_width: f64,
	/// Default edge color.
	pub edge_color: String,
	/// Perpendicular control-point offset as a fraction of edge length.
	/// Zero draws straight lines.
	pub edge_curvature: f64,
	/// Draw arrowheads at edge targets.
	pub edge_arrows: bool,
	/// Alpha for nodes outside the current selection/hover.
	pub node_greyout_opacity: f64,
	/// Alpha for edges not touching the current selection/hover.
	pub edge_greyout_opacity: f64,
	/// Canvas clear color.
	pub background_color: String,
	/// Draw edges at all.
	pub render_links: bool,
	/// Frame the whole graph once the initial layout has settled.
	pub fit_on_init: bool,
	/// World-space margin kept around the graph by fit view.
	pub fit_padding: f64,
	/// Upper bound on the scale chosen by fit view.
	pub max_fit_scale: f64,
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self {
			node_size: 8.0,
			node_color: "#5e81ac".into(),
			node_labels: true,
			label_size: 11.0,
			edge_width: 1.0,
			edge_color: "#8ca0b4".into(),
			edge_curvature: 0.0,
			edge_arrows: true,
			node_greyout_opacity: 0.2,
			edge_greyout_opacity: 0.1,
			background_color: "#161b22".into(),
			render_links: true,
			fit_on_init: true,
			fit_padding: 40.0,
			max_fit_scale: 2.0,
		}
	}
}

/// Pointer interaction toggles.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionConfig {
	/// Drag on empty canvas pans the view.
	pub enable_drag: bool,
	/// Mouse wheel zooms about the pointer.
	pub enable_zoom: bool,
	/// Pointer movement updates the hovered node.
	pub enable_hover: bool,
	/// Clicks select nodes and report node/edge clicks.
	pub enable_click: bool,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			enable_drag: true,
			enable_zoom: true,
			enable_hover: true,
			enable_click: true,
		}
	}
}

/// All options recognized by the graph canvas.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GraphOptions {
	/// Physics tunables.
	#[serde(flatten)]
	pub simulation: SimulationConfig,
	/// Visual options.
	#[serde(flatten)]
	pub render: RenderConfig,
	/// Pointer toggles.
	#[serde(flatten)]
	pub interaction: InteractionConfig,
}
