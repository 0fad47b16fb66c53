//! Per-frame render step.
//!
//! Projects the simulation through the camera into a flat list of draw
//! commands. The list is rebuilt from scratch every frame and committed by a
//! surface adapter ([`super::canvas`] in the browser). Commands are in paint
//! order:
//! 1. Background
//! 2. Edges at rest, then edges touching the hovered node
//! 3. Nodes in insertion order, the hovered node last
//! 4. Hover label

use super::camera::Camera;
use super::pointer::PointerController;
use super::simulation::{SimEdge, SimulationState};
use super::theme::{Color, Theme};
use super::types::EdgeKind;

/// Detail popover size in screen pixels.
pub const POPOVER_WIDTH: f64 = 260.0;
pub const POPOVER_HEIGHT: f64 = 160.0;
/// Gap between the click point and the popover's corner.
const POPOVER_OFFSET: f64 = 12.0;

const HOVER_GROWTH: f64 = 1.3;
const TITLE_FONT_PX: f64 = 13.0;
const CATEGORY_FONT_PX: f64 = 11.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
	pub width: f64,
	pub color: Color,
}

/// One drawing operation in screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	/// Fill the whole surface.
	Clear { color: Color },
	Line {
		from: (f64, f64),
		to: (f64, f64),
		width: f64,
		color: Color,
		dashed: bool,
	},
	Disc {
		center: (f64, f64),
		radius: f64,
		fill: Color,
		stroke: Option<Stroke>,
	},
	Text {
		at: (f64, f64),
		text: String,
		font_px: f64,
		color: Color,
	},
}

/// Detail card for the selected node, placed in screen pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Popover {
	/// Target for the host's document link.
	pub node_id: String,
	pub title: String,
	pub category: String,
	pub tags: Vec<String>,
	pub x: f64,
	pub y: f64,
}

/// Everything needed to paint one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	pub commands: Vec<DrawCommand>,
	pub popover: Option<Popover>,
}

impl Frame {
	pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
		self.commands
			.iter()
			.filter(|c| matches!(c, DrawCommand::Line { .. }))
	}
}

fn edge_width(kind: EdgeKind) -> f64 {
	match kind {
		EdgeKind::Reference => 1.5,
		EdgeKind::Tag => 1.0,
	}
}

/// Place a span of `size` starting near `v` so it stays inside `[0, extent]`.
fn clamp_span(v: f64, size: f64, extent: f64) -> f64 {
	if extent <= size { 0.0 } else { v.clamp(0.0, extent - size) }
}

/// Build the draw commands for the current simulation, camera and pointer state.
pub fn render(
	sim: &SimulationState,
	camera: &Camera,
	pointer: &PointerController,
	theme: &Theme,
	width: f64,
	height: f64,
) -> Frame {
	let hovered = pointer.hovered().filter(|&idx| idx < sim.nodes.len());
	let selected = pointer.selected().filter(|s| s.node < sim.nodes.len());
	let screen: Vec<(f64, f64)> = sim
		.nodes
		.iter()
		.map(|n| camera.world_to_screen(n.x, n.y))
		.collect();

	let mut commands = Vec::with_capacity(sim.edges.len() + sim.nodes.len() + 3);
	commands.push(DrawCommand::Clear {
		color: theme.background,
	});

	let (highlighted, resting): (Vec<&SimEdge>, Vec<&SimEdge>) = sim
		.edges
		.iter()
		.filter(|e| e.source < screen.len() && e.target < screen.len())
		.partition(|e| hovered.is_some_and(|h| e.touches(h)));
	for (edges, lit) in [(resting, false), (highlighted, true)] {
		for edge in edges {
			let (width, color) = if lit {
				(edge_width(edge.kind) * 2.0, theme.edge_highlight)
			} else {
				(edge_width(edge.kind), theme.edge)
			};
			commands.push(DrawCommand::Line {
				from: screen[edge.source],
				to: screen[edge.target],
				width,
				color,
				dashed: edge.kind == EdgeKind::Tag,
			});
		}
	}

	let order = (0..sim.nodes.len())
		.filter(|&idx| Some(idx) != hovered)
		.chain(hovered);
	for idx in order {
		let node = &sim.nodes[idx];
		let base = theme.category_color(node.category_slot);
		let mut radius = node.radius() * camera.scale;
		let mut fill = base;
		let mut stroke = None;

		if selected.is_some_and(|s| s.node == idx) {
			stroke = Some(Stroke {
				width: 2.5,
				color: theme.selected_ring,
			});
		}
		if Some(idx) == hovered {
			radius *= HOVER_GROWTH;
			fill = base.lighten(0.25);
			stroke = stroke.or(Some(Stroke {
				width: 1.5,
				color: theme.hover_ring,
			}));
		}

		commands.push(DrawCommand::Disc {
			center: screen[idx],
			radius,
			fill,
			stroke,
		});
	}

	if let Some(idx) = hovered {
		let node = &sim.nodes[idx];
		let (sx, sy) = screen[idx];
		let x = sx + node.radius() * camera.scale * HOVER_GROWTH + 6.0;
		commands.push(DrawCommand::Text {
			at: (x, sy - 2.0),
			text: node.title.clone(),
			font_px: TITLE_FONT_PX,
			color: theme.label,
		});
		commands.push(DrawCommand::Text {
			at: (x, sy + CATEGORY_FONT_PX + 1.0),
			text: node.category.clone(),
			font_px: CATEGORY_FONT_PX,
			color: theme.label_secondary,
		});
	}

	let popover = selected.map(|s| {
		let node = &sim.nodes[s.node];
		let (ax, ay) = s.anchor;
		Popover {
			node_id: node.id.clone(),
			title: node.title.clone(),
			category: node.category.clone(),
			tags: node.tags.clone(),
			x: clamp_span(ax + POPOVER_OFFSET, POPOVER_WIDTH, width),
			y: clamp_span(ay + POPOVER_OFFSET, POPOVER_HEIGHT, height),
		}
	});

	Frame { commands, popover }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::forces::Bounds;
	use crate::components::force_graph::simulation::{SimEdge, SimNode};

	fn sim() -> SimulationState {
		let node = |id: &str, x: f64, y: f64, connections: u32| SimNode {
			id: id.into(),
			title: format!("Title {id}"),
			category: "guide".into(),
			tags: vec!["rust".into()],
			connections,
			x,
			y,
			..SimNode::default()
		};
		SimulationState {
			nodes: vec![node("a", 100.0, 100.0, 0), node("b", 300.0, 100.0, 2), node("c", 200.0, 300.0, 1)],
			edges: vec![
				SimEdge {
					source: 0,
					target: 1,
					kind: EdgeKind::Reference,
				},
				SimEdge {
					source: 1,
					target: 2,
					kind: EdgeKind::Tag,
				},
			],
			categories: vec!["guide".into()],
			alpha: 1.0,
		}
	}

	fn discs(frame: &Frame) -> Vec<(f64, f64, f64)> {
		frame
			.commands
			.iter()
			.filter_map(|c| match c {
				DrawCommand::Disc { center, radius, .. } => Some((center.0, center.1, *radius)),
				_ => None,
			})
			.collect()
	}

	#[test]
	fn projects_through_camera() {
		let sim = sim();
		let camera = Camera {
			translate_x: 10.0,
			translate_y: 20.0,
			scale: 2.0,
		};
		let frame = render(&sim, &camera, &PointerController::default(), &Theme::default(), 800.0, 600.0);

		assert!(matches!(frame.commands[0], DrawCommand::Clear { .. }));
		assert_eq!(discs(&frame)[1], (610.0, 220.0, 20.0));
		assert_eq!(frame.lines().count(), 2);
		assert!(frame.popover.is_none());
		assert!(!frame.commands.iter().any(|c| matches!(c, DrawCommand::Text { .. })));
	}

	#[test]
	fn tag_edges_are_dashed_and_thinner() {
		let frame = render(&sim(), &Camera::default(), &PointerController::default(), &Theme::default(), 800.0, 600.0);
		let styles: Vec<(f64, bool)> = frame
			.lines()
			.filter_map(|c| match c {
				DrawCommand::Line { width, dashed, .. } => Some((*width, *dashed)),
				_ => None,
			})
			.collect();
		assert_eq!(styles, vec![(1.5, false), (1.0, true)]);
	}

	#[test]
	fn hovered_node_is_drawn_last_with_label_and_lit_edges() {
		let mut sim = sim();
		let mut camera = Camera::default();
		let mut pointer = PointerController::default();
		pointer.pointer_move(&mut sim, &mut camera, Bounds::new(800.0, 600.0), 40.0, 100.0, 100.0);
		assert_eq!(pointer.hovered(), Some(0));

		let theme = Theme::default();
		let frame = render(&sim, &camera, &pointer, &theme, 800.0, 600.0);

		let last = *discs(&frame).last().unwrap();
		assert_eq!((last.0, last.1), (100.0, 100.0));
		assert!(last.2 > 6.0);

		let lit: Vec<&DrawCommand> = frame
			.lines()
			.filter(|c| matches!(c, DrawCommand::Line { color, .. } if *color == theme.edge_highlight))
			.collect();
		assert_eq!(lit.len(), 1);

		let texts: Vec<&str> = frame
			.commands
			.iter()
			.filter_map(|c| match c {
				DrawCommand::Text { text, .. } => Some(text.as_str()),
				_ => None,
			})
			.collect();
		assert_eq!(texts, vec!["Title a", "guide"]);
	}

	#[test]
	fn popover_is_clamped_inside_canvas() {
		let mut sim = sim();
		sim.nodes[1].x = 790.0;
		sim.nodes[1].y = 590.0;
		let mut pointer = PointerController::default();
		pointer.click(&sim, &Camera::default(), 790.0, 590.0);

		let frame = render(&sim, &Camera::default(), &pointer, &Theme::default(), 800.0, 600.0);
		let popover = frame.popover.unwrap();

		assert_eq!(popover.node_id, "b");
		assert_eq!(popover.tags, vec!["rust".to_string()]);
		assert_eq!((popover.x, popover.y), (800.0 - POPOVER_WIDTH, 600.0 - POPOVER_HEIGHT));
	}

	#[test]
	fn popover_sits_beside_click_when_room() {
		let sim = sim();
		let mut pointer = PointerController::default();
		pointer.click(&sim, &Camera::default(), 100.0, 100.0);

		let frame = render(&sim, &Camera::default(), &pointer, &Theme::default(), 800.0, 600.0);
		let popover = frame.popover.unwrap();
		assert_eq!((popover.x, popover.y), (112.0, 112.0));
	}
}
