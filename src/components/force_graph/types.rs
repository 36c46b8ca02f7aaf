//! Graph data structures for input to the force graph component.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node in the graph, as supplied by the graph producer (indexer, knowledge
/// store, memory system).
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in edges.
	pub id: String,
	/// Optional display label. Falls back to `id` when labels are drawn.
	#[serde(default)]
	pub label: Option<String>,
	/// Optional node kind (e.g. "function", "class", "memory"). Drives the
	/// default color and the type filter.
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
	/// Optional CSS color override (e.g., "#ff0000" or "rgb(255, 0, 0)").
	#[serde(default)]
	pub color: Option<String>,
	/// Optional radius override in world units.
	#[serde(default)]
	pub size: Option<f64>,
	/// Initial x position. Nodes without both `x` and `y` are placed randomly.
	#[serde(default)]
	pub x: Option<f64>,
	/// Initial y position.
	#[serde(default)]
	pub y: Option<f64>,
	/// Fixed x position. When `fx` and `fy` are both set, physics never moves the node.
	#[serde(default)]
	pub fx: Option<f64>,
	/// Fixed y position.
	#[serde(default)]
	pub fy: Option<f64>,
	/// Opaque producer metadata, passed back untouched in notifications.
	#[serde(default)]
	pub properties: HashMap<String, Value>,
}

impl GraphNode {
	/// A bare node with only an id.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			..Self::default()
		}
	}

	/// Set the initial position.
	pub fn at(mut self, x: f64, y: f64) -> Self {
		self.x = Some(x);
		self.y = Some(y);
		self
	}

	/// Pin the node at a fixed position.
	pub fn pinned(mut self, x: f64, y: f64) -> Self {
		self.fx = Some(x);
		self.fy = Some(y);
		self
	}

	/// Set the node kind.
	pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
		self.kind = Some(kind.into());
		self
	}

	/// Set the radius.
	pub fn with_size(mut self, size: f64) -> Self {
		self.size = Some(size);
		self
	}

	/// Set the display label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GraphEdge {
	/// Optional edge identifier.
	#[serde(default)]
	pub id: Option<String>,
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Optional display label.
	#[serde(default)]
	pub label: Option<String>,
	/// Optional relation kind (e.g. "calls", "imports").
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
	/// Optional CSS color override.
	#[serde(default)]
	pub color: Option<String>,
	/// Optional line width override in screen pixels.
	#[serde(default)]
	pub width: Option<f64>,
	/// Opaque producer metadata.
	#[serde(default)]
	pub properties: HashMap<String, Value>,
}

impl GraphEdge {
	/// An edge from `source` to `target` with default styling.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			..Self::default()
		}
	}
}

/// Complete graph data: nodes and edges.
///
/// The edge list is also accepted under the `links` key.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GraphData {
	/// Nodes in input order. Render and hit-test order follow this list.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Edges in input order.
	#[serde(default, alias = "links")]
	pub edges: Vec<GraphEdge>,
}
