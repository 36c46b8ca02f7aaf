//! Drawing surface abstraction used by the render pipeline.
//!
//! The browser implementation forwards to `CanvasRenderingContext2d`; fallible
//! canvas calls are ignored the same way the rest of the renderer ignores them,
//! so a bad argument costs at most one shape in one frame.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

/// The subset of the 2D canvas API the renderer needs.
pub trait DrawSurface {
	/// Fill the whole `width` × `height` area with `color`, ignoring any transform.
	fn clear(&mut self, color: &str, width: f64, height: f64);
	/// Push the drawing state.
	fn save(&mut self);
	/// Pop the drawing state.
	fn restore(&mut self);
	/// Translate, then scale, the current transform.
	fn transform(&mut self, translate_x: f64, translate_y: f64, scale: f64);
	/// Global alpha for subsequent fills and strokes.
	fn set_alpha(&mut self, alpha: f64);
	/// Fill color.
	fn set_fill(&mut self, color: &str);
	/// Stroke color.
	fn set_stroke(&mut self, color: &str);
	/// Stroke width in current units.
	fn set_line_width(&mut self, width: f64);
	/// CSS font for text.
	fn set_font(&mut self, font: &str);
	/// Start a new path.
	fn begin_path(&mut self);
	/// Start a subpath at `(x, y)`.
	fn move_to(&mut self, x: f64, y: f64);
	/// Straight segment to `(x, y)`.
	fn line_to(&mut self, x: f64, y: f64);
	/// Quadratic Bézier from the current point through control `(cx, cy)`.
	fn quadratic_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
	/// Add a full circle to the path.
	fn circle(&mut self, x: f64, y: f64, radius: f64);
	/// Close the current subpath.
	fn close_path(&mut self);
	/// Fill the current path.
	fn fill(&mut self);
	/// Stroke the current path.
	fn stroke(&mut self);
	/// Draw `text` horizontally centered on `x` with its baseline at `y`.
	fn fill_text_centered(&mut self, text: &str, x: f64, y: f64);
}

impl DrawSurface for CanvasRenderingContext2d {
	fn clear(&mut self, color: &str, width: f64, height: f64) {
		CanvasRenderingContext2d::save(self);
		let _ = self.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
		self.set_global_alpha(1.0);
		self.set_fill_style_str(color);
		self.fill_rect(0.0, 0.0, width, height);
		CanvasRenderingContext2d::restore(self);
	}

	fn save(&mut self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&mut self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn transform(&mut self, translate_x: f64, translate_y: f64, scale: f64) {
		let _ = self.translate(translate_x, translate_y);
		let _ = self.scale(scale, scale);
	}

	fn set_alpha(&mut self, alpha: f64) {
		self.set_global_alpha(alpha);
	}

	fn set_fill(&mut self, color: &str) {
		self.set_fill_style_str(color);
	}

	fn set_stroke(&mut self, color: &str) {
		self.set_stroke_style_str(color);
	}

	fn set_line_width(&mut self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn set_font(&mut self, font: &str) {
		CanvasRenderingContext2d::set_font(self, font);
	}

	fn begin_path(&mut self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn move_to(&mut self, x: f64, y: f64) {
		CanvasRenderingContext2d::move_to(self, x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		CanvasRenderingContext2d::line_to(self, x, y);
	}

	fn quadratic_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
		let _ = self.quadratic_curve_to(cx, cy, x, y);
	}

	fn circle(&mut self, x: f64, y: f64, radius: f64) {
		CanvasRenderingContext2d::move_to(self, x + radius, y);
		let _ = self.arc(x, y, radius, 0.0, 2.0 * PI);
	}

	fn close_path(&mut self) {
		CanvasRenderingContext2d::close_path(self);
	}

	fn fill(&mut self) {
		CanvasRenderingContext2d::fill(self);
	}

	fn stroke(&mut self) {
		CanvasRenderingContext2d::stroke(self);
	}

	fn fill_text_centered(&mut self, text: &str, x: f64, y: f64) {
		self.set_text_align("center");
		let _ = self.fill_text(text, x, y);
	}
}
