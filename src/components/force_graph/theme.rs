//! Colors for node kinds and selection decorations.

use std::collections::HashMap;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Ring drawn around selected nodes.
	pub const SELECTION_RING: Color = Color::rgb(255, 255, 255);
	/// Label text.
	pub const LABEL: Color = Color::rgba(229, 233, 240, 0.9);

	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// CSS representation: `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Categorical palette for node kinds without a well-known color.
#[derive(Clone, Debug)]
pub struct NodePalette {
	colors: Vec<Color>,
}

impl NodePalette {
	/// Neutral gray handed out by a palette without colors.
	pub const FALLBACK: Color = Color::rgb(127, 127, 127);

	/// A palette handing out `colors` in order of first appearance.
	pub fn new(colors: Vec<Color>) -> Self {
		Self { colors }
	}

	/// Ten well-separated hues, readable on a dark background.
	pub fn categorical() -> Self {
		Self {
			colors: vec![
				Color::rgb(31, 119, 180),  // Blue
				Color::rgb(255, 127, 14),  // Orange
				Color::rgb(44, 160, 44),   // Green
				Color::rgb(214, 39, 40),   // Red
				Color::rgb(148, 103, 189), // Purple
				Color::rgb(140, 86, 75),   // Brown
				Color::rgb(227, 119, 194), // Pink
				Color::rgb(127, 127, 127), // Gray
				Color::rgb(188, 189, 34),  // Olive
				Color::rgb(23, 190, 207),  // Cyan
			],
		}
	}

	/// Color for the `index`-th distinct kind, wrapping around.
	pub fn get(&self, index: usize) -> Color {
		if self.colors.is_empty() {
			return Self::FALLBACK;
		}
		self.colors[index % self.colors.len()]
	}

	/// Number of distinct colors before wrapping.
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	/// True for a palette without colors.
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}
}

impl Default for NodePalette {
	fn default() -> Self {
		Self::categorical()
	}
}

/// Default colors for the node kinds emitted by the code indexer, the
/// knowledge store and the memory system.
pub fn default_kind_colors() -> HashMap<String, String> {
	[
		("file", "#78909c"),
		("module", "#455a64"),
		("class", "#7b1fa2"),
		("struct", "#7b1fa2"),
		("interface", "#5e35b1"),
		("trait", "#5e35b1"),
		("function", "#1976d2"),
		("method", "#0288d1"),
		("variable", "#00838f"),
		("constant", "#00897b"),
		("type", "#6d4c41"),
		("concept", "#2e7d32"),
		("entity", "#e65100"),
		("memory", "#c62828"),
	]
	.into_iter()
	.map(|(k, v)| (k.to_string(), v.to_string()))
	.collect()
}
