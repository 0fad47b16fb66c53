//! Pan and zoom transform between world and screen coordinates.
//!
//! `screen = world · scale + translate`

/// Smallest allowed zoom.
pub const MIN_SCALE: f64 = 0.2;
/// Largest allowed zoom.
pub const MAX_SCALE: f64 = 5.0;
/// Zoom factor for one wheel notch toward the user.
pub const ZOOM_IN: f64 = 1.1;
/// Zoom factor for one wheel notch away from the user.
pub const ZOOM_OUT: f64 = 0.9;

/// World-to-screen affine transform with uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	pub translate_x: f64,
	pub translate_y: f64,
	/// Zoom factor, always within `[MIN_SCALE, MAX_SCALE]`.
	pub scale: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			translate_x: 0.0,
			translate_y: 0.0,
			scale: 1.0,
		}
	}
}

impl Camera {
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.translate_x) / self.scale,
			(sy - self.translate_y) / self.scale,
		)
	}

	pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		(
			wx * self.scale + self.translate_x,
			wy * self.scale + self.translate_y,
		)
	}

	/// Shift the view by a screen-space delta.
	pub fn pan(&mut self, dx: f64, dy: f64) {
		self.translate_x += dx;
		self.translate_y += dy;
	}

	/// Zoom by `factor`, keeping the world point under `(sx, sy)` fixed on
	/// screen. The resulting scale is clamped; non-finite factors are ignored.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		if !factor.is_finite() {
			return;
		}
		let (wx, wy) = self.screen_to_world(sx, sy);
		self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
		self.translate_x = sx - wx * self.scale;
		self.translate_y = sy - wy * self.scale;
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}
}
