//! Per-frame metrics snapshot.

use serde::Serialize;

/// Metrics captured at the end of the most recent render pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
	/// Nodes in the active (filtered) graph.
	pub node_count: usize,
	/// Edges with both endpoints in the active graph.
	pub edge_count: usize,
	/// Wall-clock duration of the last render, in milliseconds.
	pub render_ms: f64,
	/// Number of selected nodes.
	pub selected_count: usize,
	/// Id of the hovered node, if any.
	pub hovered: Option<String>,
	/// Current zoom scale.
	pub zoom: f64,
}

/// Passive holder for the latest [`GraphStats`]. Written once per frame by the
/// render pipeline, read by anyone.
#[derive(Clone, Debug, Default)]
pub struct StatsCollector {
	latest: GraphStats,
	frames: u64,
}

impl StatsCollector {
	/// Store the snapshot of a finished frame.
	pub fn record(&mut self, stats: GraphStats) {
		self.latest = stats;
		self.frames += 1;
	}

	/// Snapshot of the last rendered frame.
	pub fn latest(&self) -> &GraphStats {
		&self.latest
	}

	/// Frames rendered since creation.
	pub fn frames(&self) -> u64 {
		self.frames
	}
}

/// Millisecond time source for render timing.
pub trait Clock {
	/// Monotonic time in milliseconds.
	fn now_ms(&self) -> f64;
}

impl Clock for web_sys::Performance {
	fn now_ms(&self) -> f64 {
		self.now()
	}
}

/// Millisecond-resolution fallback for hosts without `window.performance`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateClock;

impl Clock for DateClock {
	fn now_ms(&self) -> f64 {
		js_sys::Date::now()
	}
}
