//! Force-directed layout integrator.
//!
//! Each tick accumulates, for every free node:
//! - gravity toward the canvas center, proportional to displacement;
//! - inverse-square repulsion from every other node (naive all-pairs, O(n²));
//! - a linear spring toward each linked neighbor around the rest length.
//!
//! Forces are computed from the positions at the start of the tick and applied
//! afterwards, so the result does not depend on the order nodes are visited.
//! Velocities are damped by friction and positions are clamped inside the
//! padded canvas.

use rand::Rng;

use super::config::SimulationConfig;
use super::model::GraphModel;

/// Below this distance two nodes are treated as coincident.
const COINCIDENT: f64 = 1e-9;

/// Golden angle, used to spread the push direction of coincident pairs.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Physics state of one node. Index-aligned with [`GraphModel::nodes`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimNode {
	/// Horizontal position in world units.
	pub x: f64,
	/// Vertical position in world units.
	pub y: f64,
	/// Horizontal velocity per tick.
	pub vx: f64,
	/// Vertical velocity per tick.
	pub vy: f64,
	/// Pinned position; such nodes exert forces but never move.
	pub fixed: Option<(f64, f64)>,
}

/// Iterative physics integrator producing node positions.
#[derive(Clone, Debug)]
pub struct ForceSimulation {
	nodes: Vec<SimNode>,
	adjacency: Vec<Vec<usize>>,
	config: SimulationConfig,
	width: f64,
	height: f64,
	forces: Vec<(f64, f64)>,
}

impl ForceSimulation {
	/// An empty simulation over a `width` × `height` canvas.
	pub fn new(width: f64, height: f64, config: SimulationConfig) -> Self {
		Self {
			nodes: Vec::new(),
			adjacency: Vec::new(),
			config,
			width,
			height,
			forces: Vec::new(),
		}
	}

	/// Reset the simulation to the nodes and edges of `model`.
	///
	/// Fixed nodes sit at their pin, nodes with an initial position start
	/// there, and the rest are scattered uniformly inside the padded canvas.
	/// Dangling edges and self-loops never enter the adjacency list.
	pub fn initialize<R: Rng + ?Sized>(&mut self, model: &GraphModel, rng: &mut R) {
		let (x_range, y_range) = (self.axis_range(self.width), self.axis_range(self.height));

		self.nodes = model
			.nodes()
			.iter()
			.map(|m| {
				let fixed = m.node.fx.zip(m.node.fy);
				let (x, y) = fixed
					.or_else(|| m.node.x.zip(m.node.y))
					.unwrap_or_else(|| (sample(&mut *rng, x_range), sample(&mut *rng, y_range)));
				SimNode {
					x,
					y,
					vx: 0.0,
					vy: 0.0,
					fixed,
				}
			})
			.collect();

		self.adjacency = vec![Vec::new(); self.nodes.len()];
		for (s, t, _) in model.resolved_edges() {
			if s == t {
				continue;
			}
			self.adjacency[s].push(t);
			self.adjacency[t].push(s);
		}
		self.forces = vec![(0.0, 0.0); self.nodes.len()];
	}

	/// Advance the layout by one step.
	pub fn tick(&mut self) {
		if !self.config.enabled || self.nodes.is_empty() {
			return;
		}
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let SimulationConfig {
			gravity,
			repulsion,
			link_distance,
			link_strength,
			..
		} = self.config;

		for i in 0..self.nodes.len() {
			let node = &self.nodes[i];
			if node.fixed.is_some() {
				self.forces[i] = (0.0, 0.0);
				continue;
			}
			let (xi, yi) = (node.x, node.y);
			let mut fx = (cx - xi) * gravity;
			let mut fy = (cy - yi) * gravity;

			// TODO: Barnes-Hut approximation for graphs past a few thousand nodes.
			for (j, other) in self.nodes.iter().enumerate() {
				if i == j {
					continue;
				}
				let (dx, dy) = (xi - other.x, yi - other.y);
				let raw = (dx * dx + dy * dy).sqrt();
				let (ux, uy) = if raw < COINCIDENT {
					separation_direction(i, j)
				} else {
					(dx / raw, dy / raw)
				};
				let dist = raw.max(1.0);
				let magnitude = repulsion / (dist * dist);
				fx += ux * magnitude;
				fy += uy * magnitude;
			}

			for &j in &self.adjacency[i] {
				let (dx, dy) = (self.nodes[j].x - xi, self.nodes[j].y - yi);
				let dist = (dx * dx + dy * dy).sqrt();
				if dist < COINCIDENT {
					continue;
				}
				let stretch = (dist - link_distance) * link_strength;
				fx += dx / dist * stretch;
				fy += dy / dist * stretch;
			}

			self.forces[i] = (fx, fy);
		}

		let friction = self.config.friction;
		let (x_range, y_range) = (self.axis_range(self.width), self.axis_range(self.height));
		for (node, &(fx, fy)) in self.nodes.iter_mut().zip(&self.forces) {
			if let Some((px, py)) = node.fixed {
				node.x = px;
				node.y = py;
				node.vx = 0.0;
				node.vy = 0.0;
				continue;
			}
			node.vx = (node.vx + fx) * friction;
			node.vy = (node.vy + fy) * friction;
			node.x = (node.x + node.vx).clamp(x_range.0, x_range.1);
			node.y = (node.y + node.vy).clamp(y_range.0, y_range.1);
		}
	}

	/// Replace the tunables without resetting positions.
	pub fn set_config(&mut self, config: SimulationConfig) {
		self.config = config;
	}

	/// Current tunables.
	pub fn config(&self) -> &SimulationConfig {
		&self.config
	}

	/// Update the canvas bounds. Positions are clamped on the next tick.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Simulation nodes, index-aligned with the model.
	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	/// Position of node `i`.
	pub fn position(&self, i: usize) -> (f64, f64) {
		let node = &self.nodes[i];
		(node.x, node.y)
	}

	/// Linked neighbors of node `i`, one entry per edge direction.
	pub fn neighbors(&self, i: usize) -> &[usize] {
		&self.adjacency[i]
	}

	/// Number of simulated nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True when there is nothing to simulate.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Allowed coordinate interval along an axis of length `extent`.
	fn axis_range(&self, extent: f64) -> (f64, f64) {
		let pad = self.config.padding;
		if extent > 2.0 * pad {
			(pad, extent - pad)
		} else {
			(extent / 2.0, extent / 2.0)
		}
	}
}

fn sample<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
	if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// Unit push direction for node `i` away from a coincident node `j`.
/// The two members of a pair get opposite directions.
fn separation_direction(i: usize, j: usize) -> (f64, f64) {
	let angle = (i.min(j) + i.max(j)) as f64 * GOLDEN_ANGLE;
	let sign = if i < j { -1.0 } else { 1.0 };
	(sign * angle.cos(), sign * angle.sin())
}
