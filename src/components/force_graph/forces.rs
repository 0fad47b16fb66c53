//! Force solver: one integration step of gravity, pairwise repulsion and
//! edge springs, scaled by the cooling coefficient.
//!
//! Repulsion is a plain O(n²) pass; the view is meant for graphs in the low
//! hundreds of nodes.

use std::f64::consts::TAU;

use super::simulation::{SimEdge, SimNode};

/// Tunable force constants.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceParams {
	/// Pull toward the canvas center.
	pub gravity: f64,
	/// Pairwise repulsion strength.
	pub repulsion: f64,
	/// Separation below which repulsion stops growing.
	pub repulsion_floor: f64,
	/// Spring stiffness for every edge kind.
	pub spring: f64,
	/// Spring rest length for every edge kind.
	pub link_distance: f64,
	/// Velocity retained per step.
	pub damping: f64,
	/// Distance nodes keep from the canvas edges.
	pub margin: f64,
}

impl Default for ForceParams {
	fn default() -> Self {
		Self {
			gravity: 0.01,
			repulsion: 800.0,
			repulsion_floor: 20.0,
			spring: 0.05,
			link_distance: 120.0,
			damping: 0.85,
			margin: 40.0,
		}
	}
}

/// Canvas size in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Clamp a point into `[margin, dimension - margin]` on both axes.
	pub fn clamp(&self, x: f64, y: f64, margin: f64) -> (f64, f64) {
		(
			clamp_axis(x, self.width, margin),
			clamp_axis(y, self.height, margin),
		)
	}
}

// Canvases narrower than two margins collapse the axis to its midpoint.
fn clamp_axis(v: f64, extent: f64, margin: f64) -> f64 {
	let (lo, hi) = (margin, extent - margin);
	if lo > hi { extent / 2.0 } else { v.clamp(lo, hi) }
}

/// Unit vector from `(x1, y1)` to `(x2, y2)` and the distance between them.
///
/// Coincident points get a fixed direction derived from `salt` so that
/// stacked nodes still separate without producing NaN.
fn direction(x1: f64, y1: f64, x2: f64, y2: f64, salt: usize) -> (f64, f64, f64) {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist > f64::EPSILON {
		(dx / dist, dy / dist, dist)
	} else {
		let angle = (salt as f64 * 0.618_034 + 0.37) * TAU;
		(angle.cos(), angle.sin(), 0.0)
	}
}

/// Advance the simulation by one step.
///
/// Pinned nodes end the step exactly on their pin with zero velocity; forces
/// never move them. Every node ends inside `bounds` shrunk by the margin.
/// Edges pointing outside the node slice are ignored.
pub fn step(nodes: &mut [SimNode], edges: &[SimEdge], bounds: Bounds, alpha: f64, params: &ForceParams) {
	let count = nodes.len();
	let (cx, cy) = bounds.center();

	for node in nodes.iter_mut().filter(|n| !n.is_pinned()) {
		node.vx += (cx - node.x) * params.gravity * alpha;
		node.vy += (cy - node.y) * params.gravity * alpha;
	}

	for i in 0..count {
		for j in (i + 1)..count {
			let (ux, uy, dist) = direction(nodes[i].x, nodes[i].y, nodes[j].x, nodes[j].y, i + j);
			let d = dist.max(params.repulsion_floor);
			let force = params.repulsion * alpha / (d * d);
			if !nodes[i].is_pinned() {
				nodes[i].vx -= ux * force;
				nodes[i].vy -= uy * force;
			}
			if !nodes[j].is_pinned() {
				nodes[j].vx += ux * force;
				nodes[j].vy += uy * force;
			}
		}
	}

	for edge in edges {
		let (s, t) = (edge.source, edge.target);
		if s >= count || t >= count || s == t {
			continue;
		}
		let (ux, uy, dist) = direction(nodes[s].x, nodes[s].y, nodes[t].x, nodes[t].y, s + t);
		let force = (dist - params.link_distance) * params.spring * alpha;
		if !nodes[s].is_pinned() {
			nodes[s].vx += ux * force;
			nodes[s].vy += uy * force;
		}
		if !nodes[t].is_pinned() {
			nodes[t].vx -= ux * force;
			nodes[t].vy -= uy * force;
		}
	}

	for node in nodes.iter_mut() {
		match node.pin {
			Some((px, py)) => {
				node.x = px;
				node.y = py;
				node.vx = 0.0;
				node.vy = 0.0;
			}
			None => {
				node.vx *= params.damping;
				node.vy *= params.damping;
				node.x += node.vx;
				node.y += node.vy;
			}
		}
		(node.x, node.y) = bounds.clamp(node.x, node.y, params.margin);
	}
}

/// Pull every node and pin back inside `bounds`, e.g. after a resize.
pub fn clamp_to_bounds(nodes: &mut [SimNode], bounds: Bounds, margin: f64) {
	for node in nodes.iter_mut() {
		(node.x, node.y) = bounds.clamp(node.x, node.y, margin);
		if let Some((px, py)) = node.pin {
			node.pin = Some(bounds.clamp(px, py, margin));
		}
	}
}
