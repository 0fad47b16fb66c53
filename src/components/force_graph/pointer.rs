//! Pointer interaction state machine: hover, click-select, drag-to-pin and
//! background panning.

use super::camera::{Camera, ZOOM_IN, ZOOM_OUT};
use super::forces::Bounds;
use super::simulation::SimulationState;

/// Extra hit radius around every node, in world units.
pub const HIT_SLOP: f64 = 5.0;
/// Screen distance a press may travel and still count as a click.
pub const CLICK_SLOP: f64 = 3.0;

/// What the pointer is currently doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerMode {
	#[default]
	Idle,
	/// Dragging the background; the camera follows the pointer.
	Panning,
	/// Dragging a node, which stays pinned under the pointer.
	DraggingNode(usize),
}

/// A node selected by click, with the click's screen position for the popover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
	pub node: usize,
	pub anchor: (f64, f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Press {
	x: f64,
	y: f64,
	translate_x: f64,
	translate_y: f64,
	moved: bool,
}

/// Interprets raw pointer events against the simulation through the camera.
#[derive(Clone, Debug, Default)]
pub struct PointerController {
	mode: PointerMode,
	hovered: Option<usize>,
	selected: Option<Selection>,
	press: Option<Press>,
	suppress_click: bool,
}

impl PointerController {
	pub fn mode(&self) -> PointerMode {
		self.mode
	}

	pub fn hovered(&self) -> Option<usize> {
		self.hovered
	}

	pub fn selected(&self) -> Option<Selection> {
		self.selected
	}

	pub fn clear_selection(&mut self) {
		self.selected = None;
	}

	/// Press: grab the node under the pointer, or start panning.
	pub fn pointer_down(&mut self, sim: &mut SimulationState, camera: &Camera, sx: f64, sy: f64) {
		self.release(sim);

		let (wx, wy) = camera.screen_to_world(sx, sy);
		self.mode = match sim.find_node_at(wx, wy, HIT_SLOP) {
			Some(idx) => {
				let node = &sim.nodes[idx];
				let pin = (node.x, node.y);
				sim.set_pin(idx, Some(pin));
				sim.reheat();
				PointerMode::DraggingNode(idx)
			}
			None => PointerMode::Panning,
		};
		self.press = Some(Press {
			x: sx,
			y: sy,
			translate_x: camera.translate_x,
			translate_y: camera.translate_y,
			moved: false,
		});
		self.suppress_click = false;
	}

	/// Move: drag the pinned node, pan, or update hover when idle.
	pub fn pointer_move(
		&mut self,
		sim: &mut SimulationState,
		camera: &mut Camera,
		bounds: Bounds,
		margin: f64,
		sx: f64,
		sy: f64,
	) {
		if let Some(press) = self.press.as_mut() {
			let (dx, dy) = (sx - press.x, sy - press.y);
			if (dx * dx + dy * dy).sqrt() > CLICK_SLOP {
				press.moved = true;
			}
		}

		match self.mode {
			PointerMode::DraggingNode(idx) => {
				let (wx, wy) = camera.screen_to_world(sx, sy);
				sim.set_pin(idx, Some(bounds.clamp(wx, wy, margin)));
			}
			PointerMode::Panning => {
				if let Some(press) = self.press {
					camera.translate_x = press.translate_x;
					camera.translate_y = press.translate_y;
					camera.pan(sx - press.x, sy - press.y);
				}
			}
			PointerMode::Idle => {
				let (wx, wy) = camera.screen_to_world(sx, sy);
				self.hovered = sim.find_node_at(wx, wy, HIT_SLOP);
			}
		}
	}

	/// Release: unpin a dragged node and return to idle.
	pub fn pointer_up(&mut self, sim: &mut SimulationState) {
		self.suppress_click = self.press.is_some_and(|p| p.moved);
		self.release(sim);
	}

	/// The pointer left the surface: end any gesture and drop hover.
	pub fn pointer_leave(&mut self, sim: &mut SimulationState) {
		self.release(sim);
		self.hovered = None;
	}

	/// Click: select the node under the pointer, or clear the selection.
	/// Ignored when the press turned into a drag.
	pub fn click(&mut self, sim: &SimulationState, camera: &Camera, sx: f64, sy: f64) {
		if std::mem::take(&mut self.suppress_click) {
			return;
		}
		let (wx, wy) = camera.screen_to_world(sx, sy);
		self.selected = sim
			.find_node_at(wx, wy, HIT_SLOP)
			.map(|node| Selection {
				node,
				anchor: (sx, sy),
			});
	}

	/// Wheel: zoom toward the pointer. Negative `delta_y` zooms in.
	pub fn wheel(&mut self, camera: &mut Camera, sx: f64, sy: f64, delta_y: f64) {
		if delta_y < 0.0 {
			camera.zoom_at(sx, sy, ZOOM_IN);
		} else if delta_y > 0.0 {
			camera.zoom_at(sx, sy, ZOOM_OUT);
		}
	}

	fn release(&mut self, sim: &mut SimulationState) {
		if let PointerMode::DraggingNode(idx) = self.mode {
			sim.set_pin(idx, None);
		}
		self.mode = PointerMode::Idle;
		self.press = None;
	}
}
