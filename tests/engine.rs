// Test target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use kb_graph::components::force_graph::camera::Camera;
use kb_graph::components::force_graph::forces::{self, Bounds, ForceParams};
use kb_graph::components::force_graph::pointer::{HIT_SLOP, PointerMode};
use kb_graph::components::force_graph::simulation::{
	ALPHA_FLOOR, ALPHA_REHEAT, SimEdge, SimNode, SimulationState, frames_until_settled,
};
use kb_graph::components::force_graph::theme::Theme;
use kb_graph::{EdgeKind, ForceGraphState, GraphData, GraphEdge, GraphNode, parse_graph_data};

fn dataset(n: usize) -> GraphData {
	let categories = ["guide", "reference", "note", "howto"];
	GraphData {
		nodes: (0..n)
			.map(|i| GraphNode {
				id: format!("doc-{i}"),
				title: format!("Document {i}"),
				category: categories[i % categories.len()].to_string(),
				tags: vec![format!("t{}", i % 3)],
				connections: (i % 9) as u32,
			})
			.collect(),
		edges: (1..n)
			.map(|i| GraphEdge {
				source: format!("doc-{i}"),
				target: format!("doc-{}", i / 2),
				kind: if i % 2 == 0 { EdgeKind::Tag } else { EdgeKind::Reference },
			})
			.collect(),
	}
}

#[test]
fn alpha_decreases_monotonically_and_settles() {
	let mut state = ForceGraphState::new(&dataset(30), 1024.0, 768.0, 11);
	let mut previous = state.sim.alpha;
	let mut frames = 0;

	while state.tick() {
		assert!(state.sim.alpha < previous);
		previous = state.sim.alpha;
		frames += 1;
	}

	// 1.0 · 0.995ⁿ < 0.001 first holds at n = 1379.
	assert_eq!(frames, 1379);
	assert_eq!(frames, frames_until_settled(1.0));
	assert!(state.sim.alpha < ALPHA_FLOOR);
}

#[test]
fn pinned_node_stays_exactly_on_pin() {
	let mut state = ForceGraphState::new(&dataset(20), 900.0, 700.0, 5);
	let (x, y) = (state.sim.nodes[4].x, state.sim.nodes[4].y);
	// Park every other node in a corner so only the target is under the pointer.
	for (i, node) in state.sim.nodes.iter_mut().enumerate() {
		if i != 4 {
			(node.x, node.y) = (40.0, 40.0);
		}
	}

	state.pointer_down(x, y);
	assert_eq!(state.pointer.mode(), PointerMode::DraggingNode(4));
	state.pointer_move(300.0, 250.0);

	for _ in 0..200 {
		state.tick();
		let node = &state.sim.nodes[4];
		assert_eq!(node.pin, Some((300.0, 250.0)));
		assert_eq!((node.x, node.y), (300.0, 250.0));
		assert_eq!((node.vx, node.vy), (0.0, 0.0));
	}

	state.pointer_up();
	assert_eq!(state.sim.nodes[4].pin, None);
}

#[test]
fn nodes_never_leave_the_margin() {
	let (w, h) = (640.0, 480.0);
	let mut state = ForceGraphState::new(&dataset(80), w, h, 99);
	let margin = state.params.margin;

	// Kick a few nodes far outside to exercise the clamp.
	state.sim.nodes[0].vx = 5000.0;
	state.sim.nodes[1].vy = -5000.0;

	while state.tick() {
		for node in &state.sim.nodes {
			assert!(node.x >= margin && node.x <= w - margin, "{node:?}");
			assert!(node.y >= margin && node.y <= h - margin, "{node:?}");
		}
	}
}

#[test]
fn zoom_keeps_screen_point_fixed() {
	let mut camera = Camera {
		translate_x: 120.0,
		translate_y: -60.0,
		scale: 0.75,
	};
	for &(sx, sy, factor) in &[
		(0.0, 0.0, 1.1),
		(512.0, 384.0, 0.9),
		(37.5, 901.0, 1.1),
		(800.0, 20.0, 40.0),
		(800.0, 20.0, 0.001),
	] {
		let (wx, wy) = camera.screen_to_world(sx, sy);
		camera.zoom_at(sx, sy, factor);
		let (rx, ry) = camera.world_to_screen(wx, wy);
		assert!((rx - sx).abs() < 1e-9 && (ry - sy).abs() < 1e-9);
		assert!((0.2..=5.0).contains(&camera.scale));
	}
}

#[test]
fn later_node_wins_overlapping_hit_test() {
	let data = parse_graph_data(
		r#"{ "nodes": [
			{ "id": "first", "title": "First", "category": "a", "tags": [], "connections": 3 },
			{ "id": "second", "title": "Second", "category": "b", "tags": [], "connections": 0 }
		], "edges": [] }"#,
	)
	.unwrap();
	let mut sim = SimulationState::from_data(&data);
	for node in &mut sim.nodes {
		node.x = 200.0;
		node.y = 200.0;
	}

	assert_eq!(sim.find_node_at(200.0, 200.0, HIT_SLOP), Some(1));
	// Only the larger, earlier node reaches this far.
	assert_eq!(sim.find_node_at(215.0, 200.0, HIT_SLOP), Some(0));
}

#[test]
fn dangling_edge_is_neither_simulated_nor_drawn() {
	let data = parse_graph_data(
		r#"{ "nodes": [
			{ "id": "a", "title": "A", "category": "x", "tags": [], "connections": 1 },
			{ "id": "b", "title": "B", "category": "x", "tags": [], "connections": 1 }
		], "edges": [
			{ "source": "a", "target": "b", "type": "reference" },
			{ "source": "a", "target": "gone", "type": "tag" }
		] }"#,
	)
	.unwrap();
	let mut state = ForceGraphState::new(&data, 800.0, 600.0, 1);

	for _ in 0..50 {
		state.tick();
	}
	let frame = state.frame(&Theme::default());

	assert_eq!(state.sim.edges.len(), 1);
	assert_eq!(frame.lines().count(), 1);
	assert!(
		state
			.sim
			.nodes
			.iter()
			.all(|n| n.x.is_finite() && n.y.is_finite())
	);
}

fn two_node_pair() -> SimulationState {
	let node = |id: &str, x: f64| SimNode {
		id: id.into(),
		x,
		y: 300.0,
		..SimNode::default()
	};
	SimulationState {
		nodes: vec![node("left", 150.0), node("right", 650.0)],
		edges: vec![SimEdge {
			source: 0,
			target: 1,
			kind: EdgeKind::Reference,
		}],
		categories: vec![String::new()],
		alpha: 1.0,
	}
}

fn settle(sim: &mut SimulationState, params: &ForceParams) -> f64 {
	let bounds = Bounds::new(800.0, 600.0);
	while sim.is_active() {
		forces::step(&mut sim.nodes, &sim.edges, bounds, sim.alpha, params);
		sim.cool();
	}
	let (a, b) = (&sim.nodes[0], &sim.nodes[1]);
	((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

#[test]
fn two_linked_nodes_settle_near_link_distance() {
	let mut sim = two_node_pair();
	let separation = settle(&mut sim, &ForceParams::default());

	// Gravity pulls both ends toward the center, so the pair rests a little
	// inside the spring's rest length.
	assert!((separation - 120.0).abs() < 12.0, "separation {separation}");
	for node in &sim.nodes {
		assert!(node.vx.abs() < 1e-6 && node.vy.abs() < 1e-6);
	}
}

#[test]
fn without_gravity_the_spring_sets_the_separation() {
	let mut sim = two_node_pair();
	let params = ForceParams {
		gravity: 0.0,
		..ForceParams::default()
	};
	let separation = settle(&mut sim, &params);

	assert!((separation - 120.0).abs() < 2.0, "separation {separation}");
}

#[test]
fn drag_start_reheats_settled_layout() {
	let mut state = ForceGraphState::new(&dataset(10), 800.0, 600.0, 2);
	while state.tick() {}
	assert!(state.is_settled());
	assert!(!state.tick());

	let (x, y) = state.camera.world_to_screen(state.sim.nodes[9].x, state.sim.nodes[9].y);
	state.pointer_down(x, y);

	assert!(matches!(state.pointer.mode(), PointerMode::DraggingNode(_)));
	assert!(state.sim.alpha >= ALPHA_REHEAT);
	assert!(state.tick());
}
