//! Component-owned graph state.
//!
//! [`GraphView`] bundles the model, simulation, transform, interaction and
//! stats of one canvas. The frame loop and the DOM event handlers mutate it
//! through `&mut`; nothing here touches the DOM except through the
//! [`DrawSurface`] and [`Clock`] seams.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::GraphOptions;
use super::interaction::{
	GraphObserver, HitContext, InteractionController, InteractionPhase, Modifiers, NoopObserver,
	SelectionState,
};
use super::model::GraphModel;
use super::render::{self, Scene};
use super::simulation::ForceSimulation;
use super::stats::{Clock, GraphStats, StatsCollector};
use super::surface::DrawSurface;
use super::transform::ViewTransform;
use super::types::GraphData;

/// Frames the layout settles for before the initial fit.
const FIT_DELAY_FRAMES: u32 = 30;

/// Zoom step of the zoom buttons.
const ZOOM_STEP: f64 = 1.2;

/// Everything one graph canvas owns between frames.
pub struct GraphView {
	data: GraphData,
	options: GraphOptions,
	kind_filter: Option<String>,
	model: GraphModel,
	simulation: ForceSimulation,
	transform: ViewTransform,
	interaction: InteractionController,
	stats: StatsCollector,
	observer: Box<dyn GraphObserver>,
	rng: StdRng,
	width: f64,
	height: f64,
	fit_countdown: Option<u32>,
}

impl GraphView {
	/// A view over `data` on a `width` × `height` canvas, seeded from the OS.
	pub fn new(data: GraphData, options: GraphOptions, width: f64, height: f64) -> Self {
		Self::with_rng(data, options, width, height, StdRng::from_entropy())
	}

	/// Like [`new`](Self::new) with a fixed seed, for reproducible layouts.
	pub fn with_seed(
		data: GraphData,
		options: GraphOptions,
		width: f64,
		height: f64,
		seed: u64,
	) -> Self {
		Self::with_rng(data, options, width, height, StdRng::seed_from_u64(seed))
	}

	fn with_rng(data: GraphData, options: GraphOptions, width: f64, height: f64, rng: StdRng) -> Self {
		let simulation = ForceSimulation::new(width, height, options.simulation.clone());
		let mut view = Self {
			data,
			options,
			kind_filter: None,
			model: GraphModel::default(),
			simulation,
			transform: ViewTransform::identity(),
			interaction: InteractionController::default(),
			stats: StatsCollector::default(),
			observer: Box::new(NoopObserver),
			rng,
			width,
			height,
			fit_countdown: None,
		};
		view.rebuild();
		view
	}

	/// Route notifications to `observer`.
	pub fn with_observer(mut self, observer: impl GraphObserver + 'static) -> Self {
		self.observer = Box::new(observer);
		self
	}

	/// Replace the whole data set and re-initialize the layout.
	pub fn set_data(&mut self, data: GraphData) {
		self.data = data;
		self.rebuild();
	}

	/// Apply new options. Turning the simulation on or off re-initializes the
	/// layout; every other change applies in place on the next frame.
	pub fn set_options(&mut self, options: GraphOptions) {
		if options == self.options {
			return;
		}
		if options.simulation.enabled != self.options.simulation.enabled {
			self.options = options;
			self.rebuild();
			return;
		}
		if options.simulation != self.options.simulation {
			self.simulation.set_config(options.simulation.clone());
		}
		if options.render != self.options.render {
			self.model.restyle(&options.render);
		}
		self.options = options;
	}

	/// Restrict the graph to one node kind, or lift the restriction.
	/// A change re-initializes the layout.
	pub fn set_kind_filter(&mut self, kind: Option<String>) {
		if kind == self.kind_filter {
			return;
		}
		debug!("symbol-graph: kind filter {:?}", kind);
		self.kind_filter = kind;
		self.rebuild();
	}

	/// Track a canvas size change.
	pub fn resize(&mut self, width: f64, height: f64) {
		debug!("symbol-graph: resize to {}x{}", width, height);
		self.width = width;
		self.height = height;
		self.simulation.resize(width, height);
	}

	fn rebuild(&mut self) {
		self.model = GraphModel::build(&self.data, &self.options.render, self.kind_filter.as_deref());
		self.simulation = ForceSimulation::new(self.width, self.height, self.options.simulation.clone());
		self.simulation.initialize(&self.model, &mut self.rng);
		self.fit_countdown = self.options.render.fit_on_init.then_some(FIT_DELAY_FRAMES);

		let (ctx, interaction, observer) = self.parts();
		interaction.reconcile(&ctx, observer);

		info!(
			"symbol-graph: {} nodes, {} edges",
			self.model.len(),
			self.model.resolved_edges().count()
		);
	}

	fn parts(&mut self) -> (HitContext<'_>, &mut InteractionController, &mut dyn GraphObserver) {
		(
			HitContext {
				model: &self.model,
				simulation: &self.simulation,
				transform: &self.transform,
				render: &self.options.render,
			},
			&mut self.interaction,
			self.observer.as_mut(),
		)
	}

	/// Advance the simulation one step; runs the pending initial fit.
	pub fn tick(&mut self) {
		self.simulation.tick();
		self.fit_countdown = match self.fit_countdown {
			Some(0) => {
				self.fit_view();
				None
			}
			Some(n) => Some(n - 1),
			None => None,
		};
	}

	/// Draw the current state and record stats.
	pub fn render<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, clock: &dyn Clock) {
		let scene = Scene {
			model: &self.model,
			simulation: &self.simulation,
			transform: &self.transform,
			selection: self.interaction.selection(),
			config: &self.options.render,
			width: self.width,
			height: self.height,
		};
		render::render(&scene, surface, clock, &mut self.stats);
	}

	/// One animation frame: tick, then render.
	pub fn frame<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, clock: &dyn Clock) {
		self.tick();
		self.render(surface, clock);
	}

	/// Press on the canvas. Starts a pan when it lands on empty space.
	pub fn pointer_down(&mut self, point: (f64, f64)) {
		if !self.options.interaction.enable_drag {
			return;
		}
		let (ctx, interaction, _) = self.parts();
		if ctx.node_at(point).is_none() {
			interaction.begin_pan(point);
		}
	}

	/// Pointer motion: pans while a pan is active, hover-tests otherwise.
	pub fn pointer_move(&mut self, point: (f64, f64)) {
		if self.interaction.drag(&mut self.transform, point) {
			return;
		}
		if self.options.interaction.enable_hover {
			let (ctx, interaction, observer) = self.parts();
			interaction.hover(&ctx, point, observer);
		}
	}

	/// Release on the canvas.
	pub fn pointer_up(&mut self) {
		self.interaction.end_pan();
	}

	/// The pointer left the canvas.
	pub fn pointer_leave(&mut self) {
		self.interaction.cancel_pan();
		self.interaction.clear_hover(self.observer.as_mut());
	}

	/// Click on the canvas.
	pub fn click(&mut self, point: (f64, f64), modifiers: Modifiers) {
		if !self.options.interaction.enable_click {
			return;
		}
		let (ctx, interaction, observer) = self.parts();
		interaction.click(&ctx, point, modifiers, observer);
	}

	/// Wheel over the canvas. Returns whether the view zoomed.
	pub fn wheel(&mut self, point: (f64, f64), delta_y: f64) -> bool {
		if !self.options.interaction.enable_zoom {
			return false;
		}
		self.interaction.wheel(&mut self.transform, point, delta_y);
		true
	}

	/// Zoom in one step about the canvas center.
	pub fn zoom_in(&mut self) {
		self.transform.zoom_at(ZOOM_STEP, self.center());
	}

	/// Zoom out one step about the canvas center.
	pub fn zoom_out(&mut self) {
		self.transform.zoom_at(1.0 / ZOOM_STEP, self.center());
	}

	/// Frame every node in the canvas.
	pub fn fit_view(&mut self) {
		let points = self.simulation.nodes().iter().map(|n| (n.x, n.y));
		self.transform.fit_view(
			points,
			(self.width, self.height),
			self.options.render.fit_padding,
			self.options.render.max_fit_scale,
		);
	}

	fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Distinct node kinds of the unfiltered data.
	pub fn kinds(&self) -> &[String] {
		self.model.kinds()
	}

	/// Active kind filter.
	pub fn kind_filter(&self) -> Option<&str> {
		self.kind_filter.as_deref()
	}

	/// Stats of the last rendered frame.
	pub fn stats(&self) -> &GraphStats {
		self.stats.latest()
	}

	/// Selected and hovered nodes.
	pub fn selection(&self) -> &SelectionState {
		self.interaction.selection()
	}

	/// Coarse interaction state.
	pub fn phase(&self) -> InteractionPhase {
		self.interaction.phase()
	}

	/// Current pan/zoom.
	pub fn transform(&self) -> &ViewTransform {
		&self.transform
	}

	/// Active options.
	pub fn options(&self) -> &GraphOptions {
		&self.options
	}

	/// Active graph.
	pub fn model(&self) -> &GraphModel {
		&self.model
	}

	/// Node positions.
	pub fn simulation(&self) -> &ForceSimulation {
		&self.simulation
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::components::force_graph::surface::recording::RecordingSurface;
	use crate::components::force_graph::types::{GraphEdge, GraphNode};

	struct ZeroClock;

	impl Clock for ZeroClock {
		fn now_ms(&self) -> f64 {
			0.0
		}
	}

	/// Shares the selection notifications with the test body.
	#[derive(Clone, Default)]
	struct SelectionLog(Rc<RefCell<Vec<Vec<String>>>>);

	impl GraphObserver for SelectionLog {
		fn on_selection_change(&mut self, nodes: &[GraphNode]) {
			self.0
				.borrow_mut()
				.push(nodes.iter().map(|n| n.id.clone()).collect());
		}
	}

	fn data() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode::new("a").at(100.0, 100.0).with_kind("function"),
				GraphNode::new("b").at(300.0, 100.0).with_kind("struct"),
				GraphNode::new("c").at(200.0, 300.0).with_kind("function"),
			],
			edges: vec![GraphEdge::new("a", "b"), GraphEdge::new("a", "c")],
		}
	}

	fn still() -> GraphOptions {
		let mut options = GraphOptions::default();
		options.simulation.enabled = false;
		options.render.fit_on_init = false;
		options
	}

	fn view(options: GraphOptions) -> GraphView {
		GraphView::with_seed(data(), options, 800.0, 600.0, 7)
	}

	#[test]
	fn frame_records_stats() {
		let mut view = view(still());
		view.frame(&mut RecordingSurface::default(), &ZeroClock);

		assert_eq!(view.stats().node_count, 3);
		assert_eq!(view.stats().edge_count, 2);
		assert_eq!(view.stats().zoom, 1.0);
	}

	#[test]
	fn kind_filter_rebuilds_but_keeps_the_kind_list() {
		let mut view = view(still());
		view.set_kind_filter(Some("function".into()));

		assert_eq!(view.model().len(), 2);
		assert_eq!(view.model().resolved_edges().count(), 1);
		assert_eq!(view.kinds(), ["function".to_string(), "struct".to_string()]);
		assert_eq!(view.kind_filter(), Some("function"));
	}

	#[test]
	fn new_data_prunes_the_selection() {
		let log = SelectionLog::default();
		let mut view = view(still()).with_observer(log.clone());
		view.click((300.0, 100.0), Modifiers::default());
		assert_eq!(view.selection().selected_count(), 1);

		view.set_data(GraphData {
			nodes: vec![GraphNode::new("a").at(10.0, 10.0)],
			edges: vec![],
		});

		assert_eq!(view.selection().selected_count(), 0);
		assert_eq!(*log.0.borrow(), vec![vec!["b".to_string()], vec![]]);
	}

	#[test]
	fn disabled_interactions_are_ignored() {
		let mut options = still();
		options.interaction.enable_click = false;
		options.interaction.enable_zoom = false;
		options.interaction.enable_hover = false;
		let mut view = view(options);

		view.click((100.0, 100.0), Modifiers::default());
		view.pointer_move((100.0, 100.0));
		assert!(!view.wheel((100.0, 100.0), -1.0));

		assert_eq!(view.selection().selected_count(), 0);
		assert_eq!(view.selection().hovered(), None);
		assert_eq!(view.transform().scale(), 1.0);
	}

	#[test]
	fn pan_does_not_clear_the_selection() {
		let mut view = view(still());
		view.click((100.0, 100.0), Modifiers::default());

		view.pointer_down((500.0, 500.0));
		view.pointer_move((540.0, 520.0));
		view.pointer_up();
		view.click((540.0, 520.0), Modifiers::default());

		assert_eq!(view.transform().translate_x(), 40.0);
		assert_eq!(view.transform().translate_y(), 20.0);
		assert!(view.selection().is_selected("a"));
	}

	#[test]
	fn press_on_a_node_does_not_pan() {
		let mut view = view(still());
		view.pointer_down((100.0, 100.0));
		view.pointer_move((150.0, 150.0));

		assert_eq!(*view.transform(), ViewTransform::identity());
		assert_eq!(view.selection().hovered(), None);
	}

	#[test]
	fn zoom_buttons_pivot_on_the_center() {
		let mut view = view(still());
		view.zoom_in();
		assert!((view.transform().scale() - 1.2).abs() < 1e-12);
		let (cx, cy) = view.transform().screen_to_world((400.0, 300.0));
		assert!((cx - 400.0).abs() < 1e-9 && (cy - 300.0).abs() < 1e-9);

		view.zoom_out();
		assert!((view.transform().scale() - 1.0).abs() < 1e-12);
	}

	#[test]
	fn initial_fit_waits_for_the_layout_to_settle() {
		let mut options = still();
		options.render.fit_on_init = true;
		let mut view = view(options);

		for _ in 0..FIT_DELAY_FRAMES {
			view.tick();
		}
		assert_eq!(*view.transform(), ViewTransform::identity());

		view.tick();
		// Bounding box (100..300, 100..300) centered on the canvas.
		let (sx, sy) = view.transform().world_to_screen((200.0, 200.0));
		assert!((sx - 400.0).abs() < 1e-9 && (sy - 300.0).abs() < 1e-9);
	}

	#[test]
	fn options_update_in_place() {
		let mut view = view(still());
		let before: Vec<_> = view.simulation().nodes().to_vec();

		let mut options = still();
		options.render.node_size = 20.0;
		options.simulation.gravity = 0.5;
		view.set_options(options);

		assert_eq!(view.model().nodes()[0].size, 20.0);
		assert_eq!(view.simulation().config().gravity, 0.5);
		assert_eq!(view.simulation().nodes(), before.as_slice());
	}

	#[test]
	fn toggling_the_simulation_reseeds_free_nodes() {
		let data = GraphData {
			nodes: vec![
				GraphNode::new("a"),
				GraphNode::new("b"),
				GraphNode::new("pin").pinned(50.0, 60.0),
			],
			edges: vec![GraphEdge::new("a", "b")],
		};
		let mut view = GraphView::with_seed(data, still(), 800.0, 600.0, 7);
		let free = |view: &GraphView| -> Vec<(f64, f64)> {
			view.simulation().nodes()[..2].iter().map(|n| (n.x, n.y)).collect()
		};
		let pin = |view: &GraphView| {
			let n = &view.simulation().nodes()[2];
			(n.x, n.y)
		};
		let before = free(&view);

		let mut options = still();
		options.simulation.enabled = true;
		view.set_options(options.clone());
		let enabled = free(&view);
		assert_ne!(enabled, before);
		assert_eq!(pin(&view), (50.0, 60.0));
		assert!(view.simulation().config().enabled);

		options.simulation.enabled = false;
		view.set_options(options);
		assert_ne!(free(&view), enabled);
		assert_eq!(pin(&view), (50.0, 60.0));
		assert!(!view.simulation().config().enabled);
	}
}
