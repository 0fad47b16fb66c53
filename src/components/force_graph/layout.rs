//! Initial placement: nodes start clustered in angular sectors by category.

use std::f64::consts::TAU;

use rand::Rng;

use super::simulation::SimulationState;

/// Seed every node's position around the canvas center, one sector per
/// category, with jitter of up to `±0.3·radius` on each axis.
///
/// Velocities and pins are reset.
pub fn seed_positions<R: Rng>(
	sim: &mut SimulationState,
	width: f64,
	height: f64,
	rng: &mut R,
) {
	let (cx, cy) = (width / 2.0, height / 2.0);
	let radius = 0.3 * width.min(height).max(0.0);
	let jitter = 0.3 * radius;
	let angle_step = TAU / sim.categories.len().max(1) as f64;

	for node in &mut sim.nodes {
		let angle = node.category_slot as f64 * angle_step;
		node.x = cx + radius * angle.cos() + rng.random_range(-jitter..=jitter);
		node.y = cy + radius * angle.sin() + rng.random_range(-jitter..=jitter);
		node.vx = 0.0;
		node.vy = 0.0;
		node.pin = None;
	}
}
