//! Simulation state: the node arena, resolved edges and the cooling
//! coefficient.
//!
//! Nodes live in a single `Vec` addressed by index; edges refer to nodes by
//! index rather than by reference, so the solver, pointer handling and render
//! step can all borrow the state in turn within one frame.

use std::collections::HashMap;

use log::debug;

use super::types::{EdgeKind, GraphData};

/// Geometric decay applied to alpha once per simulated frame.
pub const ALPHA_DECAY: f64 = 0.995;
/// Below this alpha the layout counts as settled and the solver is skipped.
pub const ALPHA_FLOOR: f64 = 0.001;
/// Minimum alpha restored by interactions (drag start, view reset).
pub const ALPHA_REHEAT: f64 = 0.3;

/// Smallest rendered and hit-test radius, in world units.
pub const MIN_NODE_RADIUS: f64 = 6.0;
/// Largest rendered and hit-test radius, in world units.
pub const MAX_NODE_RADIUS: f64 = 20.0;

/// Per-node record: display metadata plus physical state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimNode {
	pub id: String,
	pub title: String,
	pub category: String,
	pub tags: Vec<String>,
	pub connections: u32,
	/// Index of the node's category in first-appearance order.
	/// Drives both the layout sector and the palette color.
	pub category_slot: usize,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// While set, the solver forces the node here and zeroes its velocity.
	pub pin: Option<(f64, f64)>,
}

impl SimNode {
	/// Radius in world units, growing with degree.
	pub fn radius(&self) -> f64 {
		node_radius(self.connections)
	}

	pub fn is_pinned(&self) -> bool {
		self.pin.is_some()
	}
}

/// Radius for a node with the given degree: `clamp(6 + 2·connections, 6, 20)`.
pub fn node_radius(connections: u32) -> f64 {
	(MIN_NODE_RADIUS + 2.0 * connections as f64).clamp(MIN_NODE_RADIUS, MAX_NODE_RADIUS)
}

/// An edge resolved to node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimEdge {
	pub source: usize,
	pub target: usize,
	pub kind: EdgeKind,
}

impl SimEdge {
	pub fn touches(&self, idx: usize) -> bool {
		self.source == idx || self.target == idx
	}
}

/// Mutable simulation state shared by the solver, pointer handling and renderer.
#[derive(Clone, Debug, Default)]
pub struct SimulationState {
	pub nodes: Vec<SimNode>,
	pub edges: Vec<SimEdge>,
	/// Distinct categories in first-appearance order.
	pub categories: Vec<String>,
	/// Cooling coefficient in `[0, 1]`.
	pub alpha: f64,
}

impl SimulationState {
	/// Build the arena from a dataset. Positions start at the origin; seed them
	/// with [`super::layout::seed_positions`] before the first step.
	///
	/// Edges whose source or target id is unknown are dropped.
	pub fn from_data(data: &GraphData) -> Self {
		let mut categories: Vec<String> = Vec::new();
		let mut slots: HashMap<&str, usize> = HashMap::new();
		let mut id_to_idx: HashMap<&str, usize> = HashMap::with_capacity(data.nodes.len());

		let nodes = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let category_slot = *slots.entry(node.category.as_str()).or_insert_with(|| {
					categories.push(node.category.clone());
					categories.len() - 1
				});
				id_to_idx.insert(node.id.as_str(), i);
				SimNode {
					id: node.id.clone(),
					title: node.title.clone(),
					category: node.category.clone(),
					tags: node.tags.clone(),
					connections: node.connections,
					category_slot,
					..SimNode::default()
				}
			})
			.collect();

		let edges: Vec<SimEdge> = data
			.edges
			.iter()
			.filter_map(|edge| {
				let source = *id_to_idx.get(edge.source.as_str())?;
				let target = *id_to_idx.get(edge.target.as_str())?;
				Some(SimEdge {
					source,
					target,
					kind: edge.kind,
				})
			})
			.collect();

		let dropped = data.edges.len() - edges.len();
		if dropped > 0 {
			debug!("kb-graph: dropped {} edges with unknown endpoints", dropped);
		}

		Self {
			nodes,
			edges,
			categories,
			alpha: 1.0,
		}
	}

	/// Whether the solver should still run.
	pub fn is_active(&self) -> bool {
		self.alpha >= ALPHA_FLOOR
	}

	/// Decay alpha by one frame. No-op once settled.
	pub fn cool(&mut self) {
		if self.is_active() {
			self.alpha *= ALPHA_DECAY;
		}
	}

	/// Raise alpha to at least [`ALPHA_REHEAT`].
	pub fn reheat(&mut self) {
		self.alpha = self.alpha.max(ALPHA_REHEAT);
	}

	/// Top-most node within `radius + slop` of a world point.
	///
	/// Later nodes are drawn on top, so they are tested first.
	pub fn find_node_at(&self, wx: f64, wy: f64, slop: f64) -> Option<usize> {
		self.nodes.iter().enumerate().rev().find_map(|(idx, node)| {
			let (dx, dy) = (node.x - wx, node.y - wy);
			((dx * dx + dy * dy).sqrt() <= node.radius() + slop).then_some(idx)
		})
	}

	pub fn set_pin(&mut self, idx: usize, pin: Option<(f64, f64)>) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.pin = pin;
			if let Some((px, py)) = pin {
				node.x = px;
				node.y = py;
				node.vx = 0.0;
				node.vy = 0.0;
			}
		}
	}
}

/// Number of solver frames alpha stays active when cooling from `start`.
pub fn frames_until_settled(start: f64) -> usize {
	if start < ALPHA_FLOOR {
		return 0;
	}
	((ALPHA_FLOOR / start).ln() / ALPHA_DECAY.ln()).floor() as usize + 1
}
