//! Normalized, styled view of the input graph.
//!
//! [`GraphModel`] turns producer input into one record per node id with a
//! resolved color and radius, applies the active type filter, and keeps edges
//! in input order. Edges whose endpoints are missing stay in the list but
//! never resolve, so neither the simulation nor the renderer sees them.

use std::collections::HashMap;

use log::debug;

use super::config::RenderConfig;
use super::theme::{NodePalette, default_kind_colors};
use super::types::{GraphData, GraphEdge, GraphNode};

/// A node together with its resolved style.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelNode {
	/// The input record (last occurrence wins for duplicate ids).
	pub node: GraphNode,
	/// Effective CSS fill color.
	pub color: String,
	/// Effective radius in world units.
	pub size: f64,
}

impl ModelNode {
	/// Text drawn under the node.
	pub fn label(&self) -> &str {
		self.node.label.as_deref().unwrap_or(&self.node.id)
	}
}

/// An edge together with its resolved style and endpoint indices.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelEdge {
	/// The input record.
	pub edge: GraphEdge,
	/// Effective CSS stroke color.
	pub color: String,
	/// Effective line width in screen pixels.
	pub width: f64,
	endpoints: Option<(usize, usize)>,
}

impl ModelEdge {
	/// Indices of the source and target nodes, or `None` for a dangling edge.
	pub fn endpoints(&self) -> Option<(usize, usize)> {
		self.endpoints
	}
}

/// Styled, filtered graph ready for simulation and rendering.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
	nodes: Vec<ModelNode>,
	edges: Vec<ModelEdge>,
	index: HashMap<String, usize>,
	kinds: Vec<String>,
	kind_colors: HashMap<String, String>,
}

impl GraphModel {
	/// Build the model from input data, keeping only nodes of `kind_filter`
	/// when one is set.
	pub fn build(data: &GraphData, config: &RenderConfig, kind_filter: Option<&str>) -> Self {
		let known = default_kind_colors();
		let palette = NodePalette::default();

		// Kinds and their colors come from the unfiltered input so that the
		// filter list and node colors stay put while filtering.
		let mut kinds: Vec<String> = Vec::new();
		let mut kind_colors = HashMap::new();
		for kind in data.nodes.iter().filter_map(|n| n.kind.as_ref()) {
			if kind_colors.contains_key(kind) {
				continue;
			}
			let color = known
				.get(kind)
				.cloned()
				.unwrap_or_else(|| palette.get(kinds.len()).to_css());
			kind_colors.insert(kind.clone(), color);
			kinds.push(kind.clone());
		}

		let mut nodes: Vec<ModelNode> = Vec::new();
		let mut index = HashMap::new();
		for node in &data.nodes {
			if let Some(filter) = kind_filter {
				if node.kind.as_deref() != Some(filter) {
					continue;
				}
			}
			let record = ModelNode {
				node: node.clone(),
				color: String::new(),
				size: 0.0,
			};
			match index.get(&node.id) {
				Some(&i) => nodes[i] = record,
				None => {
					index.insert(node.id.clone(), nodes.len());
					nodes.push(record);
				}
			}
		}

		let mut dangling = 0;
		let edges = data
			.edges
			.iter()
			.map(|edge| {
				let endpoints = match (index.get(&edge.source), index.get(&edge.target)) {
					(Some(&s), Some(&t)) => Some((s, t)),
					_ => {
						dangling += 1;
						None
					}
				};
				ModelEdge {
					edge: edge.clone(),
					color: String::new(),
					width: 0.0,
					endpoints,
				}
			})
			.collect();
		if dangling > 0 {
			debug!("symbol-graph: {} edges reference missing nodes", dangling);
		}

		let mut model = Self {
			nodes,
			edges,
			index,
			kinds,
			kind_colors,
		};
		model.restyle(config);
		model
	}

	/// Recompute fallback colors and sizes after a render option change.
	pub fn restyle(&mut self, config: &RenderConfig) {
		for n in &mut self.nodes {
			n.color = n
				.node
				.color
				.clone()
				.or_else(|| {
					n.node
						.kind
						.as_ref()
						.and_then(|k| self.kind_colors.get(k).cloned())
				})
				.unwrap_or_else(|| config.node_color.clone());
			n.size = n.node.size.unwrap_or(config.node_size);
		}
		for e in &mut self.edges {
			e.color = e
				.edge
				.color
				.clone()
				.unwrap_or_else(|| config.edge_color.clone());
			e.width = e.edge.width.unwrap_or(config.edge_width);
		}
	}

	/// Nodes in input order.
	pub fn nodes(&self) -> &[ModelNode] {
		&self.nodes
	}

	/// Edges in input order, dangling ones included.
	pub fn edges(&self) -> &[ModelEdge] {
		&self.edges
	}

	/// Edges whose endpoints both exist.
	pub fn resolved_edges(&self) -> impl Iterator<Item = (usize, usize, &ModelEdge)> {
		self.edges
			.iter()
			.filter_map(|e| e.endpoints.map(|(s, t)| (s, t, e)))
	}

	/// Position of `id` in [`nodes`](Self::nodes).
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Distinct node kinds of the unfiltered input, in first-seen order.
	pub fn kinds(&self) -> &[String] {
		&self.kinds
	}

	/// Number of nodes after filtering.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True when no node survives filtering.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
