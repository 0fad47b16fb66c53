//! Graph data structures for input to the force graph component.
//!
//! Mirrors the JSON document served by the graph-data endpoint:
//! `{ "nodes": [...], "edges": [...] }`.

use serde::Deserialize;

/// A knowledge base document shown as a node.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphNode {
	/// Unique identifier. Edges reference nodes by this id, and the detail
	/// popover links to the document using it.
	pub id: String,
	/// Display title, shown on hover and in the detail popover.
	pub title: String,
	/// Category used for clustering and coloring.
	pub category: String,
	/// Tags, for the detail popover only.
	#[serde(default)]
	pub tags: Vec<String>,
	/// Precomputed degree. Only used to size the node.
	#[serde(default)]
	pub connections: u32,
}

/// Edge kind. Kinds share spring behavior and differ only in line style.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
	/// Documents sharing a tag.
	Tag,
	/// A structural reference between documents. Unrecognized kinds are read
	/// as references so one odd edge does not reject the whole document.
	#[default]
	#[serde(other)]
	Reference,
}

/// An undirected connection between two nodes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphEdge {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	#[serde(rename = "type", default)]
	pub kind: EdgeKind,
}

/// Complete graph data: nodes and edges.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

/// Parse the graph-data JSON document.
pub fn parse_graph_data(json: &str) -> Result<GraphData, serde_json::Error> {
	serde_json::from_str(json)
}
