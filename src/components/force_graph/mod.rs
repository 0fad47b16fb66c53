//! Force-directed graph visualization component.
//!
//! Renders an interactive knowledge base graph on an HTML canvas with:
//! - A cooling force simulation seeded by category clusters
//! - Pan, zoom-to-cursor, node dragging (pinning) and click selection
//! - Hover highlighting and a detail popover for the selected node
//!
//! The engine (simulation, solver, camera, pointer handling and render step)
//! is platform independent; only [`ForceGraphCanvas`] and the canvas adapter
//! touch the browser.
//!
//! # Example
//!
//! ```ignore
//! use kb_graph::{ForceGraphCanvas, GraphData, GraphEdge, GraphNode, EdgeKind};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { id: "intro".into(), title: "Intro".into(), category: "guide".into(), .. },
//!         GraphNode { id: "setup".into(), title: "Setup".into(), category: "guide".into(), .. },
//!     ],
//!     edges: vec![
//!         GraphEdge { source: "intro".into(), target: "setup".into(), kind: EdgeKind::Reference },
//!     ],
//! };
//!
//! view! { <ForceGraphCanvas data=Signal::derive(move || Some(data.clone())) fullscreen=true /> }
//! ```

pub mod camera;
mod canvas;
mod component;
pub mod forces;
pub mod layout;
pub mod pointer;
pub mod render;
pub mod simulation;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use state::ForceGraphState;
pub use theme::Theme;
pub use types::{EdgeKind, GraphData, GraphEdge, GraphNode, parse_graph_data};
