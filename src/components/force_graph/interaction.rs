//! Pointer interaction: hit-testing, selection, hover and pan/zoom gestures.
//!
//! Hit-testing scans nodes in list order and returns the first one whose
//! circle contains the point. With overlapping nodes this is the bottom-most
//! drawn node, not the topmost.

use std::collections::HashSet;

use super::config::RenderConfig;
use super::model::GraphModel;
use super::render::edge_control_point;
use super::simulation::ForceSimulation;
use super::transform::ViewTransform;
use super::types::{GraphEdge, GraphNode};

/// Pointer travel (screen pixels) after which a press counts as a pan and not
/// as a click.
const CLICK_SLOP: f64 = 3.0;

/// Minimum edge hit tolerance in screen pixels.
const EDGE_HIT_PX: f64 = 4.0;

/// Segments used to approximate a curved edge for hit-testing.
const CURVE_SEGMENTS: usize = 16;

/// Receives user-facing notifications from the interaction controller.
///
/// Every method defaults to a no-op so implementors only override what they
/// care about.
pub trait GraphObserver {
	/// A node was clicked without a toggle modifier.
	fn on_node_click(&mut self, _node: &GraphNode) {}
	/// The hovered node changed. `None` when the pointer left every node.
	fn on_node_hover(&mut self, _node: Option<&GraphNode>) {}
	/// An edge was clicked on empty canvas.
	fn on_edge_click(&mut self, _edge: &GraphEdge) {}
	/// The selection set changed. Nodes are reported in list order.
	fn on_selection_change(&mut self, _nodes: &[GraphNode]) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl GraphObserver for NoopObserver {}

/// Keyboard modifiers held during a click.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Modifiers {
	/// Control key.
	pub ctrl: bool,
	/// Command / meta key.
	pub meta: bool,
}

impl Modifiers {
	/// Ctrl or Cmd: the click toggles membership instead of replacing the selection.
	pub fn toggles(self) -> bool {
		self.ctrl || self.meta
	}
}

/// Selected node ids plus the hovered node id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
	selected: HashSet<String>,
	hovered: Option<String>,
}

impl SelectionState {
	/// Whether `id` is in the selection set.
	pub fn is_selected(&self, id: &str) -> bool {
		self.selected.contains(id)
	}

	/// Whether `id` is the hovered node.
	pub fn is_hovered(&self, id: &str) -> bool {
		self.hovered.as_deref() == Some(id)
	}

	/// Selected or hovered.
	pub fn is_highlighted(&self, id: &str) -> bool {
		self.is_selected(id) || self.is_hovered(id)
	}

	/// The hovered node id.
	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// Number of selected nodes.
	pub fn selected_count(&self) -> usize {
		self.selected.len()
	}
}

/// Coarse state of the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionPhase {
	/// Nothing hovered, nothing selected.
	Idle,
	/// The pointer is over a node.
	Hovering(String),
	/// At least one node is selected and the pointer is not over a node.
	Selecting,
	/// A drag on empty canvas is moving the view.
	Panning,
}

/// Read-only view of everything hit-testing needs.
pub struct HitContext<'a> {
	/// Active graph.
	pub model: &'a GraphModel,
	/// Current positions.
	pub simulation: &'a ForceSimulation,
	/// Current pan/zoom.
	pub transform: &'a ViewTransform,
	/// Edge geometry options.
	pub render: &'a RenderConfig,
}

impl HitContext<'_> {
	/// First node, in list order, whose circle contains the screen point.
	pub fn node_at(&self, point: (f64, f64)) -> Option<usize> {
		let (wx, wy) = self.transform.screen_to_world(point);
		self.model.nodes().iter().enumerate().find_map(|(i, node)| {
			let (x, y) = self.simulation.position(i);
			let (dx, dy) = (x - wx, y - wy);
			((dx * dx + dy * dy).sqrt() <= node.size).then_some(i)
		})
	}

	/// First resolvable edge, in list order, passing within its hit tolerance
	/// of the screen point.
	pub fn edge_at(&self, point: (f64, f64)) -> Option<usize> {
		let world = self.transform.screen_to_world(point);
		let scale = self.transform.scale();
		self.model.edges().iter().enumerate().find_map(|(i, edge)| {
			let (s, t) = edge.endpoints()?;
			let (a, b) = (self.simulation.position(s), self.simulation.position(t));
			let tolerance = edge.width.max(EDGE_HIT_PX) / scale;
			let hit = match edge_control_point(a, b, self.render.edge_curvature) {
				Some(c) => {
					let mut prev = a;
					(1..=CURVE_SEGMENTS).any(|k| {
						let next = quadratic_point(a, c, b, k as f64 / CURVE_SEGMENTS as f64);
						let near = segment_distance(world, prev, next) <= tolerance;
						prev = next;
						near
					})
				}
				None => segment_distance(world, a, b) <= tolerance,
			};
			hit.then_some(i)
		})
	}

	/// The input record of node `i` with its current position filled in.
	pub fn snapshot(&self, i: usize) -> GraphNode {
		let mut node = self.model.nodes()[i].node.clone();
		let (x, y) = self.simulation.position(i);
		node.x = Some(x);
		node.y = Some(y);
		node
	}

	fn selected_nodes(&self, selection: &SelectionState) -> Vec<GraphNode> {
		self.model
			.nodes()
			.iter()
			.enumerate()
			.filter(|(_, n)| selection.is_selected(&n.node.id))
			.map(|(i, _)| self.snapshot(i))
			.collect()
	}
}

#[derive(Clone, Copy, Debug)]
struct PanGesture {
	last: (f64, f64),
	travelled: f64,
}

/// Pointer-event state machine driving selection, hover and the view transform.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	selection: SelectionState,
	pan: Option<PanGesture>,
	suppress_click: bool,
}

impl InteractionController {
	/// Current selection and hover.
	pub fn selection(&self) -> &SelectionState {
		&self.selection
	}

	/// Coarse state, for cursors and diagnostics.
	pub fn phase(&self) -> InteractionPhase {
		if self.pan.is_some() {
			InteractionPhase::Panning
		} else if let Some(id) = &self.selection.hovered {
			InteractionPhase::Hovering(id.clone())
		} else if !self.selection.selected.is_empty() {
			InteractionPhase::Selecting
		} else {
			InteractionPhase::Idle
		}
	}

	/// Handle a click at a screen point.
	///
	/// A hit with Ctrl/Cmd toggles the node; a plain hit selects only that
	/// node and reports the click; a plain miss reports any edge under the
	/// pointer and clears the selection. A click ending a pan is swallowed.
	pub fn click(
		&mut self,
		ctx: &HitContext,
		point: (f64, f64),
		modifiers: Modifiers,
		observer: &mut dyn GraphObserver,
	) {
		if std::mem::take(&mut self.suppress_click) {
			return;
		}
		let toggles = modifiers.toggles();
		let before = self.selection.selected.clone();

		match ctx.node_at(point) {
			Some(i) => {
				let id = ctx.model.nodes()[i].node.id.clone();
				if toggles {
					if !self.selection.selected.remove(&id) {
						self.selection.selected.insert(id);
					}
				} else {
					self.selection.selected.clear();
					self.selection.selected.insert(id);
				}
				self.notify_selection(ctx, &before, observer);
				if !toggles {
					observer.on_node_click(&ctx.snapshot(i));
				}
			}
			None if !toggles => {
				if let Some(e) = ctx.edge_at(point) {
					observer.on_edge_click(&ctx.model.edges()[e].edge);
				}
				self.selection.selected.clear();
				self.notify_selection(ctx, &before, observer);
			}
			None => {}
		}
	}

	/// Recompute the hovered node; notifies only when it changes.
	pub fn hover(&mut self, ctx: &HitContext, point: (f64, f64), observer: &mut dyn GraphObserver) {
		let hit = ctx.node_at(point);
		let id = hit.map(|i| ctx.model.nodes()[i].node.id.clone());
		if id == self.selection.hovered {
			return;
		}
		self.selection.hovered = id;
		let node = hit.map(|i| ctx.snapshot(i));
		observer.on_node_hover(node.as_ref());
	}

	/// Drop the hovered node (pointer left the canvas).
	pub fn clear_hover(&mut self, observer: &mut dyn GraphObserver) {
		if self.selection.hovered.take().is_some() {
			observer.on_node_hover(None);
		}
	}

	/// Zoom about the pointer: out for positive `delta_y`, in otherwise.
	pub fn wheel(&self, transform: &mut ViewTransform, point: (f64, f64), delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		transform.zoom_at(factor, point);
	}

	/// Start panning from a press on empty canvas.
	pub fn begin_pan(&mut self, point: (f64, f64)) {
		self.pan = Some(PanGesture {
			last: point,
			travelled: 0.0,
		});
	}

	/// Continue an active pan. Returns false when no pan is in progress.
	pub fn drag(&mut self, transform: &mut ViewTransform, (x, y): (f64, f64)) -> bool {
		let Some(pan) = self.pan.as_mut() else {
			return false;
		};
		let (dx, dy) = (x - pan.last.0, y - pan.last.1);
		transform.pan(dx, dy);
		pan.last = (x, y);
		pan.travelled += (dx * dx + dy * dy).sqrt();
		true
	}

	/// Finish a pan on pointer release. A pan that moved swallows the click
	/// the browser sends right after.
	pub fn end_pan(&mut self) {
		if let Some(pan) = self.pan.take() {
			self.suppress_click = pan.travelled > CLICK_SLOP;
		}
	}

	/// Abort a pan without affecting the next click (pointer left the canvas).
	pub fn cancel_pan(&mut self) {
		self.pan = None;
	}

	/// Drop selected and hovered ids that are no longer in the model.
	pub fn reconcile(&mut self, ctx: &HitContext, observer: &mut dyn GraphObserver) {
		let before = self.selection.selected.clone();
		self.selection
			.selected
			.retain(|id| ctx.model.index_of(id).is_some());
		self.notify_selection(ctx, &before, observer);

		if let Some(id) = &self.selection.hovered {
			if ctx.model.index_of(id).is_none() {
				self.clear_hover(observer);
			}
		}
	}

	fn notify_selection(
		&self,
		ctx: &HitContext,
		before: &HashSet<String>,
		observer: &mut dyn GraphObserver,
	) {
		if *before != self.selection.selected {
			observer.on_selection_change(&ctx.selected_nodes(&self.selection));
		}
	}
}

fn quadratic_point(a: (f64, f64), c: (f64, f64), b: (f64, f64), t: f64) -> (f64, f64) {
	let u = 1.0 - t;
	(
		u * u * a.0 + 2.0 * u * t * c.0 + t * t * b.0,
		u * u * a.1 + 2.0 * u * t * c.1 + t * t * b.1,
	)
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (abx, aby) = (b.0 - a.0, b.1 - a.1);
	let len2 = abx * abx + aby * aby;
	let t = if len2 > 0.0 {
		(((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len2).clamp(0.0, 1.0)
	} else {
		0.0
	};
	let (cx, cy) = (a.0 + abx * t, a.1 + aby * t);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::force_graph::config::SimulationConfig;
	use crate::components::force_graph::types::GraphData;

	#[derive(Debug, PartialEq)]
	enum Event {
		Click(String),
		Hover(Option<String>),
		Edge(String, String),
		Selection(Vec<String>),
	}

	#[derive(Default)]
	struct Recorder {
		events: Vec<Event>,
	}

	impl GraphObserver for Recorder {
		fn on_node_click(&mut self, node: &GraphNode) {
			self.events.push(Event::Click(node.id.clone()));
		}
		fn on_node_hover(&mut self, node: Option<&GraphNode>) {
			self.events.push(Event::Hover(node.map(|n| n.id.clone())));
		}
		fn on_edge_click(&mut self, edge: &GraphEdge) {
			self.events
				.push(Event::Edge(edge.source.clone(), edge.target.clone()));
		}
		fn on_selection_change(&mut self, nodes: &[GraphNode]) {
			self.events
				.push(Event::Selection(nodes.iter().map(|n| n.id.clone()).collect()));
		}
	}

	struct Fixture {
		model: GraphModel,
		simulation: ForceSimulation,
		transform: ViewTransform,
		render: RenderConfig,
	}

	impl Fixture {
		fn new(data: GraphData) -> Self {
			let render = RenderConfig::default();
			let model = GraphModel::build(&data, &render, None);
			let mut simulation = ForceSimulation::new(800.0, 600.0, SimulationConfig::default());
			simulation.initialize(&model, &mut StdRng::seed_from_u64(1));
			Self {
				model,
				simulation,
				transform: ViewTransform::identity(),
				render,
			}
		}

		/// a=(100,100,r8), b=(300,100,r8)
		fn pair() -> Self {
			Self::new(GraphData {
				nodes: vec![
					GraphNode::new("a").at(100.0, 100.0).with_size(8.0),
					GraphNode::new("b").at(300.0, 100.0).with_size(8.0),
				],
				edges: vec![],
			})
		}

		fn ctx(&self) -> HitContext<'_> {
			HitContext {
				model: &self.model,
				simulation: &self.simulation,
				transform: &self.transform,
				render: &self.render,
			}
		}
	}

	const CTRL: Modifiers = Modifiers {
		ctrl: true,
		meta: false,
	};
	const CMD: Modifiers = Modifiers {
		ctrl: false,
		meta: true,
	};

	fn selected(controller: &InteractionController, fixture: &Fixture) -> Vec<String> {
		fixture
			.model
			.nodes()
			.iter()
			.map(|n| n.node.id.clone())
			.filter(|id| controller.selection().is_selected(id))
			.collect()
	}

	#[test]
	fn click_on_node_selects_exactly_that_node() {
		let fixture = Fixture::pair();
		let mut controller = InteractionController::default();
		let mut recorder = Recorder::default();

		controller.click(&fixture.ctx(), (100.0, 100.0), Modifiers::default(), &mut recorder);

		assert_eq!(selected(&controller, &fixture), vec!["a"]);
		assert_eq!(
			recorder.events,
			vec![
				Event::Selection(vec!["a".into()]),
				Event::Click("a".into()),
			]
		);
	}

	#[test]
	fn reclicking_the_only_selected_node_reports_the_click_only() {
		let fixture = Fixture::pair();
		let mut controller = InteractionController::default();
		let mut recorder = Recorder::default();

		controller.click(&fixture.ctx(), (100.0, 100.0), Modifiers::default(), &mut recorder);
		controller.click(&fixture.ctx(), (100.0, 100.0), Modifiers::default(), &mut recorder);

		assert_eq!(selected(&controller, &fixture), vec!["a"]);
		assert_eq!(
			recorder.events,
			vec![
				Event::Selection(vec!["a".into()]),
				Event::Click("a".into()),
				Event::Click("a".into()),
			]
		);
	}

	#[test]
	fn click_between_nodes_selects_nothing_and_clears() {
		let fixture = Fixture::pair();
		let mut controller = InteractionController::default();
		let mut recorder = Recorder::default();

		controller.click(&fixture.ctx(), (300.0, 100.0), Modifiers::default(), &mut recorder);
		controller.click(&fixture.ctx(), (200.0, 100.0), Modifiers::default(), &mut recorder);

		assert!(selected(&controller, &fixture).is_empty());
		assert_eq!(recorder.events.last(), Some(&Event::Selection(vec![])));
	}

	#[test]
	fn modifier_click_toggles_membership() {
		let fixture = Fixture::pair();
		let mut controller = InteractionController::default();
		let mut recorder = Recorder::default();
		let ctx = fixture.ctx();

		controller.click(&ctx, (100.0, 100.0), Modifiers::default(), &mut recorder);
		controller.click(&ctx, (300.0, 100.0), CTRL, &mut recorder);
		assert_eq!(selected(&controller, &fixture), vec!["a", "b"]);

		controller.click(&ctx, (100.0, 100.0), CMD, &mut recorder);
		assert_eq!(selected(&controller, &fixture), vec!["b"]);

		// Modifier click on empty canvas leaves the selection alone.
		controller.click(&ctx, (200.0, 300.0), CTRL, &mut recorder);
		assert_eq!(selected(&controller, &fixture), vec!["b"]);

		controller.click(&ctx, (200.0, 300.0), Modifiers::default(), &mut recorder);
		assert!(selected(&controller, &fixture).is_empty());

		let clicks = recorder
			.events
			.iter()
			.filter(|e| matches!(e, Event::Click(_)))
			.count();
		assert_eq!(clicks, 1);
	}

	#[test]
	fn hit_test_respects_the_transform() {
		let mut fixture = Fixture::pair();
		fixture.transform = ViewTransform::new(50.0, 20.0, 2.0);

		// World (300, 100) -> screen (650, 220).
		assert_eq!(fixture.ctx().node_at((650.0, 220.0)), Some(1));
		// 8 world units is 16 pixels at scale 2.
		assert_eq!(fixture.ctx().node_at((665.0, 220.0)), Some(1));
		assert_eq!(fixture.ctx().node_at((667.0, 220.0)), None);
	}

	#[test]
	fn overlapping_nodes_hit_the_first_in_list_order() {
		let fixture = Fixture::new(GraphData {
			nodes: vec![
				GraphNode::new("under").at(100.0, 100.0).with_size(10.0),
				GraphNode::new("over").at(104.0, 100.0).with_size(10.0),
			],
			edges: vec![],
		});
		assert_eq!(fixture.ctx().node_at((103.0, 100.0)), Some(0));
	}

	#[test]
	fn hover_notifies_only_on_change() {
		let fixture = Fixture::pair();
		let mut controller = InteractionController::default();
		let mut recorder = Recorder::default();
		let ctx = fixture.ctx();

		controller.hover(&ctx, (100.0, 100.0), &mut recorder);
		controller.hover(&ctx, (102.0, 101.0), &mut recorder);
		controller.hover(&ctx, (200.0, 100.0), &mut recorder);
		controller.hover(&ctx, (210.0, 100.0), &mut recorder);

		assert_eq!(
			recorder.events,
			vec![Event::Hover(Some("a".into())), Event::Hover(None)]
		);
		assert_eq!(controller.phase(), InteractionPhase::Idle);
	}

	#[test]
	fn wheel_zooms_about_the_pointer() {
		let controller = InteractionController::default();
		let mut transform = ViewTransform::identity();

		controller.wheel(&mut transform, (200.0, 150.0), 120.0);
		assert!((transform.scale() - 0.9).abs() < 1e-12);
		controller.wheel(&mut transform, (200.0, 150.0), -120.0);
		assert!((transform.scale() - 0.99).abs() < 1e-12);

		let (wx, wy) = transform.screen_to_world((200.0, 150.0));
		assert!((wx - 200.0).abs() < 1e-9 && (wy - 150.0).abs() < 1e-9);
	}

	#[test]
	fn edge_click_fires_on_empty_canvas_near_an_edge() {
		let fixture = Fixture::new(GraphData {
			nodes: vec![
				GraphNode::new("a").at(100.0, 100.0),
				GraphNode::new("b").at(300.0, 100.0),
			],
			edges: vec![GraphEdge::new("a", "zzz"), GraphEdge::new("a", "b")],
		});
		let mut controller = InteractionController::default();
		let mut recorder = Recorder::default();

		controller.click(&fixture.ctx(), (200.0, 102.0), Modifiers::default(), &mut recorder);
		assert_eq!(recorder.events, vec![Event::Edge("a".into(), "b".into())]);

		recorder.events.clear();
		controller.click(&fixture.ctx(), (200.0, 120.0), Modifiers::default(), &mut recorder);
		assert!(recorder.events.is_empty());
	}

	#[test]
	fn curved_edges_hit_along_the_curve() {
		let mut fixture = Fixture::new(GraphData {
			nodes: vec![
				GraphNode::new("a").at(100.0, 100.0),
				GraphNode::new("b").at(300.0, 100.0),
			],
			edges: vec![GraphEdge::new("a", "b")],
		});
		fixture.render.edge_curvature = 0.5;

		// Control point (200, 200); the curve's midpoint sits at (200, 150).
		assert_eq!(fixture.ctx().edge_at((200.0, 150.0)), Some(0));
		assert_eq!(fixture.ctx().edge_at((200.0, 100.0)), None);
	}

	#[test]
	fn pan_moves_the_view_and_swallows_the_following_click() {
		let fixture = Fixture::pair();
		let mut controller = InteractionController::default();
		let mut recorder = Recorder::default();
		let mut transform = ViewTransform::identity();

		controller.click(&fixture.ctx(), (100.0, 100.0), Modifiers::default(), &mut recorder);
		controller.begin_pan((400.0, 400.0));
		assert_eq!(controller.phase(), InteractionPhase::Panning);
		assert!(controller.drag(&mut transform, (410.0, 395.0)));
		assert!(controller.drag(&mut transform, (430.0, 390.0)));
		controller.end_pan();

		assert_eq!((transform.translate_x(), transform.translate_y()), (30.0, -10.0));
		controller.click(&fixture.ctx(), (430.0, 390.0), Modifiers::default(), &mut recorder);
		assert_eq!(selected(&controller, &fixture), vec!["a"]);
		assert!(!controller.drag(&mut transform, (0.0, 0.0)));

		// The next click is handled normally.
		controller.click(&fixture.ctx(), (430.0, 390.0), Modifiers::default(), &mut recorder);
		assert!(selected(&controller, &fixture).is_empty());
	}

	#[test]
	fn reconcile_drops_ids_missing_from_a_new_model() {
		let fixture = Fixture::pair();
		let mut controller = InteractionController::default();
		let mut recorder = Recorder::default();
		controller.click(&fixture.ctx(), (100.0, 100.0), Modifiers::default(), &mut recorder);
		controller.hover(&fixture.ctx(), (100.0, 100.0), &mut recorder);
		recorder.events.clear();

		let only_b = Fixture::new(GraphData {
			nodes: vec![GraphNode::new("b").at(300.0, 100.0)],
			edges: vec![],
		});
		controller.reconcile(&only_b.ctx(), &mut recorder);

		assert_eq!(controller.selection().selected_count(), 0);
		assert_eq!(controller.selection().hovered(), None);
		assert_eq!(
			recorder.events,
			vec![Event::Selection(vec![]), Event::Hover(None)]
		);
	}
}
