//! kb-graph: Interactive force-directed graph view for a knowledge base.
//!
//! This crate provides a WASM-based graph visualization component that lays
//! out documents with a cooling force simulation and supports pan, zoom,
//! hover, node dragging and click-to-inspect.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::force_graph::{
	EdgeKind, ForceGraphCanvas, ForceGraphState, GraphData, GraphEdge, GraphNode, parse_graph_data,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("kb-graph: logging initialized");
}

/// Load graph data from a script element with id="graph-data".
///
/// The host page embeds the graph-data endpoint's response there. Expected
/// format: JSON with `{ nodes: [...], edges: [...] }`.
fn load_graph_data() -> Option<GraphData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_graph_data(&json_text) {
		Ok(data) => {
			info!(
				"kb-graph: loaded {} nodes, {} edges",
				data.nodes.len(),
				data.edges.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("kb-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads graph data from DOM and renders the force-directed visualization.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data();
	let graph_signal = Signal::derive(move || graph_data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Knowledge Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph_signal fullscreen=true />
			<div class="graph-overlay">
				<h1>"Knowledge Graph"</h1>
				<p class="subtitle">"Drag nodes to reposition. Scroll to zoom. Drag background to pan. Click a node for details."</p>
			</div>
		</div>
	}
}
