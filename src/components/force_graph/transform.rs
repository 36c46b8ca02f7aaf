//! Pan and zoom mapping between screen pixels and world coordinates.
//!
//! `screen = world * scale + translate`. The scale is clamped to
//! [`MIN_SCALE`, `MAX_SCALE`] by every operation that changes it.

/// Smallest allowed zoom factor.
pub const MIN_SCALE: f64 = 0.1;
/// Largest allowed zoom factor.
pub const MAX_SCALE: f64 = 10.0;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	translate_x: f64,
	translate_y: f64,
	scale: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self::identity()
	}
}

impl ViewTransform {
	/// Screen and world coincide.
	pub const fn identity() -> Self {
		Self {
			translate_x: 0.0,
			translate_y: 0.0,
			scale: 1.0,
		}
	}

	/// A transform with the given translation and a clamped scale.
	pub fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
		Self {
			translate_x,
			translate_y,
			scale: clamp_scale(scale),
		}
	}

	/// Horizontal screen offset of the world origin.
	pub fn translate_x(&self) -> f64 {
		self.translate_x
	}

	/// Vertical screen offset of the world origin.
	pub fn translate_y(&self) -> f64 {
		self.translate_y
	}

	/// Zoom factor (1.0 = 100%).
	pub fn scale(&self) -> f64 {
		self.scale
	}

	/// `(p - translate) / scale`
	pub fn screen_to_world(&self, (sx, sy): (f64, f64)) -> (f64, f64) {
		(
			(sx - self.translate_x) / self.scale,
			(sy - self.translate_y) / self.scale,
		)
	}

	/// `p * scale + translate`
	pub fn world_to_screen(&self, (wx, wy): (f64, f64)) -> (f64, f64) {
		(
			wx * self.scale + self.translate_x,
			wy * self.scale + self.translate_y,
		)
	}

	/// Multiply the scale by `factor` (clamped), keeping the world point under
	/// `pivot` fixed on screen.
	pub fn zoom_at(&mut self, factor: f64, (px, py): (f64, f64)) {
		let new_scale = clamp_scale(self.scale * factor);
		let ratio = new_scale / self.scale;
		self.translate_x = px - (px - self.translate_x) * ratio;
		self.translate_y = py - (py - self.translate_y) * ratio;
		self.scale = new_scale;
	}

	/// Shift the view by a screen-space delta.
	pub fn pan(&mut self, dx: f64, dy: f64) {
		self.translate_x += dx;
		self.translate_y += dy;
	}

	/// Frame `points` in a `width` × `height` canvas.
	///
	/// The bounding box, grown by `padding` world units on every side, is
	/// scaled to fit (never beyond `max_scale`) and centered. Returns false
	/// and leaves the transform untouched when there are no points.
	pub fn fit_view<I>(
		&mut self,
		points: I,
		(width, height): (f64, f64),
		padding: f64,
		max_scale: f64,
	) -> bool
	where
		I: IntoIterator<Item = (f64, f64)>,
	{
		let mut points = points.into_iter();
		let Some((x0, y0)) = points.next() else {
			return false;
		};
		let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
		for (x, y) in points {
			min_x = min_x.min(x);
			min_y = min_y.min(y);
			max_x = max_x.max(x);
			max_y = max_y.max(y);
		}

		let box_w = max_x - min_x + 2.0 * padding;
		let box_h = max_y - min_y + 2.0 * padding;
		let fit = |extent: f64, span: f64| {
			if span > 0.0 { extent / span } else { f64::INFINITY }
		};
		let scale = fit(width, box_w).min(fit(height, box_h)).min(max_scale);
		self.scale = clamp_scale(scale);

		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.translate_x = width / 2.0 - cx * self.scale;
		self.translate_y = height / 2.0 - cy * self.scale;
		true
	}
}

fn clamp_scale(scale: f64) -> f64 {
	if scale.is_nan() {
		1.0
	} else {
		scale.clamp(MIN_SCALE, MAX_SCALE)
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	const EPS: f64 = 1e-6;

	fn close(a: (f64, f64), b: (f64, f64)) -> bool {
		(a.0 - b.0).abs() < EPS && (a.1 - b.1).abs() < EPS
	}

	#[test]
	fn screen_and_world_are_inverse() {
		let t = ViewTransform::new(120.0, -40.0, 2.5);
		let p = (33.0, 71.0);
		assert!(close(t.world_to_screen(t.screen_to_world(p)), p));
		assert!(close(t.screen_to_world((120.0, -40.0)), (0.0, 0.0)));
	}

	#[test]
	fn zoom_is_bounded() {
		let mut t = ViewTransform::identity();
		for _ in 0..100 {
			t.zoom_at(1.1, (10.0, 10.0));
		}
		assert_eq!(t.scale(), MAX_SCALE);
		for _ in 0..200 {
			t.zoom_at(0.9, (10.0, 10.0));
		}
		assert_eq!(t.scale(), MIN_SCALE);
		assert_eq!(ViewTransform::new(0.0, 0.0, 50.0).scale(), MAX_SCALE);
	}

	#[test]
	fn pan_moves_translation_only() {
		let mut t = ViewTransform::new(5.0, 5.0, 2.0);
		t.pan(10.0, -3.0);
		assert_eq!((t.translate_x(), t.translate_y(), t.scale()), (15.0, 2.0, 2.0));
	}

	#[test]
	fn fit_view_frames_the_bounding_box() {
		let corners = [(100.0, 50.0), (500.0, 50.0), (100.0, 250.0), (500.0, 250.0)];
		let (w, h, padding) = (800.0, 600.0, 20.0);
		let mut t = ViewTransform::identity();

		assert!(t.fit_view(corners, (w, h), padding, 2.0));
		assert!(t.scale() <= 2.0);
		for corner in corners {
			let (sx, sy) = t.world_to_screen(corner);
			assert!(sx >= -padding && sx <= w + padding, "x {sx}");
			assert!(sy >= -padding && sy <= h + padding, "y {sy}");
		}
		// Centered.
		assert!(close(t.world_to_screen((300.0, 150.0)), (400.0, 300.0)));
	}

	#[test]
	fn fit_view_caps_scale_for_tight_boxes() {
		let mut t = ViewTransform::identity();
		assert!(t.fit_view([(10.0, 10.0)], (800.0, 600.0), 0.0, 1.5));
		assert_eq!(t.scale(), 1.5);
		assert!(close(t.world_to_screen((10.0, 10.0)), (400.0, 300.0)));
	}

	#[test]
	fn fit_view_without_points_is_a_no_op() {
		let mut t = ViewTransform::new(3.0, 4.0, 2.0);
		assert!(!t.fit_view(std::iter::empty(), (800.0, 600.0), 10.0, 2.0));
		assert_eq!(t, ViewTransform::new(3.0, 4.0, 2.0));
	}

	proptest! {
		#[test]
		fn zoom_pair_restores_scale_and_pivot(
			scale in 0.2f64..5.0,
			tx in -500.0f64..500.0,
			ty in -500.0f64..500.0,
			factor in 0.5f64..2.0,
			px in 0.0f64..1000.0,
			py in 0.0f64..1000.0,
		) {
			let mut t = ViewTransform::new(tx, ty, scale);
			let before = t.screen_to_world((px, py));
			t.zoom_at(factor, (px, py));
			t.zoom_at(1.0 / factor, (px, py));

			prop_assert!((t.scale() - scale).abs() < 1e-9);
			let after = t.screen_to_world((px, py));
			prop_assert!((after.0 - before.0).abs() < 1e-6);
			prop_assert!((after.1 - before.1).abs() < 1e-6);
		}

		#[test]
		fn pivot_survives_any_single_zoom(
			scale in 0.1f64..10.0,
			factor in 0.01f64..100.0,
			px in 0.0f64..1000.0,
			py in 0.0f64..1000.0,
		) {
			let mut t = ViewTransform::new(0.0, 0.0, scale);
			let before = t.screen_to_world((px, py));
			t.zoom_at(factor, (px, py));
			let after = t.screen_to_world((px, py));
			prop_assert!((after.0 - before.0).abs() < 1e-6);
			prop_assert!((after.1 - before.1).abs() < 1e-6);
		}

		#[test]
		fn scale_never_leaves_bounds(factors in proptest::collection::vec(0.01f64..100.0, 1..50)) {
			let mut t = ViewTransform::identity();
			for f in factors {
				t.zoom_at(f, (400.0, 300.0));
				prop_assert!(t.scale() >= MIN_SCALE && t.scale() <= MAX_SCALE);
			}
		}
	}
}
