//! Frame rendering for the force graph.
//!
//! Painter's order, one pass each:
//! 1. Background (screen space)
//! 2. Edges, then arrowheads (world space)
//! 3. Nodes with their selection/hover rings
//! 4. Labels
//!
//! Within a pass, list order is preserved. Only selected or hovered nodes,
//! and edges touching them, draw opaque; everything else is greyed out.

use super::config::RenderConfig;
use super::interaction::SelectionState;
use super::model::{GraphModel, ModelEdge};
use super::simulation::ForceSimulation;
use super::stats::{Clock, GraphStats, StatsCollector};
use super::surface::DrawSurface;
use super::theme::Color;
use super::transform::ViewTransform;

/// Screen-space width of selection and hover rings.
const RING_WIDTH: f64 = 2.0;

/// Below this zoom, only highlighted nodes keep their labels.
const LABEL_MIN_SCALE: f64 = 0.5;

/// Everything one frame needs, borrowed from the view state.
pub struct Scene<'a> {
	/// Active graph.
	pub model: &'a GraphModel,
	/// Node positions.
	pub simulation: &'a ForceSimulation,
	/// Current pan/zoom.
	pub transform: &'a ViewTransform,
	/// Selected and hovered nodes.
	pub selection: &'a SelectionState,
	/// Visual options.
	pub config: &'a RenderConfig,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
}

/// Quadratic control point for a curved edge from `a` to `b`, or `None` when
/// edges are straight.
///
/// The control point sits at the midpoint, pushed sideways along the
/// perpendicular `(-dy, dx)` scaled by `curvature`.
pub fn edge_control_point(a: (f64, f64), b: (f64, f64), curvature: f64) -> Option<(f64, f64)> {
	if curvature <= 0.0 {
		return None;
	}
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	Some((
		(a.0 + b.0) / 2.0 - curvature * dy,
		(a.1 + b.1) / 2.0 + curvature * dx,
	))
}

/// Draws one frame and records its stats.
pub fn render<S>(scene: &Scene, surface: &mut S, clock: &dyn Clock, stats: &mut StatsCollector)
where
	S: DrawSurface + ?Sized,
{
	let started = clock.now_ms();
	let scale = scene.transform.scale();

	surface.clear(&scene.config.background_color, scene.width, scene.height);
	surface.save();
	surface.transform(
		scene.transform.translate_x(),
		scene.transform.translate_y(),
		scale,
	);

	if scene.config.render_links {
		draw_edges(scene, surface, scale);
	}
	draw_nodes(scene, surface, scale);
	if scene.config.node_labels {
		draw_labels(scene, surface, scale);
	}

	surface.restore();
	surface.set_alpha(1.0);

	stats.record(GraphStats {
		node_count: scene.model.len(),
		edge_count: scene.model.resolved_edges().count(),
		render_ms: (clock.now_ms() - started).max(0.0),
		selected_count: scene.selection.selected_count(),
		hovered: scene.selection.hovered().map(str::to_owned),
		zoom: scale,
	});
}

fn node_alpha(scene: &Scene, id: &str) -> f64 {
	if scene.selection.is_highlighted(id) {
		1.0
	} else {
		scene.config.node_greyout_opacity
	}
}

fn draw_edges<S: DrawSurface + ?Sized>(scene: &Scene, surface: &mut S, scale: f64) {
	let nodes = scene.model.nodes();

	for (s, t, edge) in scene.model.resolved_edges() {
		let highlighted = scene.selection.is_highlighted(&nodes[s].node.id)
			|| scene.selection.is_highlighted(&nodes[t].node.id);
		let (alpha, width) = if highlighted {
			(1.0, edge.width * 2.0)
		} else {
			(scene.config.edge_greyout_opacity, edge.width)
		};

		let a = scene.simulation.position(s);
		let b = scene.simulation.position(t);
		let control = edge_control_point(a, b, scene.config.edge_curvature);

		surface.set_alpha(alpha);
		surface.set_stroke(&edge.color);
		surface.set_line_width(width / scale);
		surface.begin_path();
		surface.move_to(a.0, a.1);
		match control {
			Some((cx, cy)) => surface.quadratic_to(cx, cy, b.0, b.1),
			None => surface.line_to(b.0, b.1),
		}
		surface.stroke();

		if scene.config.edge_arrows && s != t {
			let from = control.unwrap_or(a);
			draw_arrow(surface, edge, from, b, nodes[t].size, scale);
		}
	}
}

/// Filled triangle whose tip touches the target circle, pointing along the
/// edge's end tangent `from -> to`.
fn draw_arrow<S: DrawSurface + ?Sized>(
	surface: &mut S,
	edge: &ModelEdge,
	from: (f64, f64),
	to: (f64, f64),
	target_radius: f64,
	scale: f64,
) {
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	let len = (dx * dx + dy * dy).sqrt();
	if len < 1e-9 {
		return;
	}
	let (ux, uy) = (dx / len, dy / len);
	let size = (6.0 + 2.0 * edge.width) / scale;

	let (tip_x, tip_y) = (to.0 - ux * target_radius, to.1 - uy * target_radius);
	let (back_x, back_y) = (tip_x - ux * size, tip_y - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);

	surface.set_fill(&edge.color);
	surface.begin_path();
	surface.move_to(tip_x, tip_y);
	surface.line_to(back_x + px, back_y + py);
	surface.line_to(back_x - px, back_y - py);
	surface.close_path();
	surface.fill();
}

fn draw_nodes<S: DrawSurface + ?Sized>(scene: &Scene, surface: &mut S, scale: f64) {
	let ring_color = Color::SELECTION_RING.to_css();

	for (i, node) in scene.model.nodes().iter().enumerate() {
		let id = node.node.id.as_str();
		let (x, y) = scene.simulation.position(i);

		surface.set_alpha(node_alpha(scene, id));
		surface.set_fill(&node.color);
		surface.begin_path();
		surface.circle(x, y, node.size);
		surface.fill();

		let ring = if scene.selection.is_selected(id) {
			Some(ring_color.as_str())
		} else if scene.selection.is_hovered(id) {
			Some(node.color.as_str())
		} else {
			None
		};
		if let Some(color) = ring {
			surface.set_stroke(color);
			surface.set_line_width(RING_WIDTH / scale);
			surface.begin_path();
			surface.circle(x, y, node.size + RING_WIDTH / scale);
			surface.stroke();
		}
	}
}

fn draw_labels<S: DrawSurface + ?Sized>(scene: &Scene, surface: &mut S, scale: f64) {
	let font_size = scene.config.label_size / scale.max(LABEL_MIN_SCALE);
	surface.set_font(&format!("{font_size}px sans-serif"));
	surface.set_fill(&Color::LABEL.to_css());

	for (i, node) in scene.model.nodes().iter().enumerate() {
		let id = node.node.id.as_str();
		if scale <= LABEL_MIN_SCALE && !scene.selection.is_highlighted(id) {
			continue;
		}
		let (x, y) = scene.simulation.position(i);
		surface.set_alpha(node_alpha(scene, id));
		surface.fill_text_centered(node.label(), x, y + node.size + font_size);
	}
}
