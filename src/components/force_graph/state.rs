//! Graph state and the per-frame animation step.
//!
//! Ties the simulation, camera and pointer controller to the viewport size.
//! Pointer handlers run synchronously between frames; each frame then calls
//! [`ForceGraphState::tick`] followed by [`ForceGraphState::frame`].

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::camera::Camera;
use super::forces::{self, Bounds, ForceParams};
use super::layout::seed_positions;
use super::pointer::PointerController;
use super::render::{self, Frame};
use super::simulation::SimulationState;
use super::theme::Theme;
use super::types::GraphData;

/// Core graph state combining simulation, view transform and interaction.
///
/// Created once when data arrives, then mutated each frame by the animation
/// loop and by pointer events.
pub struct ForceGraphState {
	pub sim: SimulationState,
	pub camera: Camera,
	pub pointer: PointerController,
	pub params: ForceParams,
	pub width: f64,
	pub height: f64,
	hot_frames: usize,
}

impl ForceGraphState {
	/// Build the simulation and seed the initial layout. `seed` drives the
	/// layout jitter.
	pub fn new(data: &GraphData, width: f64, height: f64, seed: u64) -> Self {
		let mut sim = SimulationState::from_data(data);
		seed_positions(&mut sim, width, height, &mut SmallRng::seed_from_u64(seed));
		info!(
			"kb-graph: simulation initialized with {} nodes, {} edges, {} categories",
			sim.nodes.len(),
			sim.edges.len(),
			sim.categories.len()
		);

		Self {
			sim,
			camera: Camera::default(),
			pointer: PointerController::default(),
			params: ForceParams::default(),
			width,
			height,
			hot_frames: 0,
		}
	}

	pub fn bounds(&self) -> Bounds {
		Bounds::new(self.width, self.height)
	}

	pub fn is_settled(&self) -> bool {
		!self.sim.is_active()
	}

	/// Advance the simulation by one frame if it is still cooling.
	///
	/// Returns whether the solver ran. Once alpha drops below the floor the
	/// solver is skipped until an interaction reheats it.
	pub fn tick(&mut self) -> bool {
		if self.is_settled() {
			return false;
		}
		let bounds = self.bounds();
		forces::step(&mut self.sim.nodes, &self.sim.edges, bounds, self.sim.alpha, &self.params);
		self.sim.cool();
		self.hot_frames += 1;

		if self.is_settled() {
			info!("kb-graph: layout settled after {} frames", self.hot_frames);
			self.hot_frames = 0;
		}
		true
	}

	/// Draw commands for the current state.
	pub fn frame(&self, theme: &Theme) -> Frame {
		render::render(&self.sim, &self.camera, &self.pointer, theme, self.width, self.height)
	}

	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		self.pointer.pointer_down(&mut self.sim, &self.camera, sx, sy);
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		let bounds = self.bounds();
		let margin = self.params.margin;
		self.pointer
			.pointer_move(&mut self.sim, &mut self.camera, bounds, margin, sx, sy);
	}

	pub fn pointer_up(&mut self) {
		self.pointer.pointer_up(&mut self.sim);
	}

	pub fn pointer_leave(&mut self) {
		self.pointer.pointer_leave(&mut self.sim);
	}

	pub fn click(&mut self, sx: f64, sy: f64) {
		self.pointer.click(&self.sim, &self.camera, sx, sy);
	}

	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		self.pointer.wheel(&mut self.camera, sx, sy, delta_y);
	}

	pub fn close_popover(&mut self) {
		self.pointer.clear_selection();
	}

	/// Restore the identity camera and let the layout move again.
	pub fn reset_view(&mut self) {
		self.camera.reset();
		self.sim.reheat();
		debug!("kb-graph: view reset");
	}

	/// Adopt new surface dimensions, pulling every node inside them.
	pub fn resize(&mut self, width: f64, height: f64) {
		if width == self.width && height == self.height {
			return;
		}
		self.width = width;
		self.height = height;
		let bounds = self.bounds();
		forces::clamp_to_bounds(&mut self.sim.nodes, bounds, self.params.margin);
		debug!("kb-graph: resized to {}x{}", width, height);
	}
}
