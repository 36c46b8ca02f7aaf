//! Force-directed graph visualization component.
//!
//! Renders an interactive force-directed graph on an HTML canvas with:
//! - Physics-based node positioning via an all-pairs force simulation
//! - Pan, zoom, hover and click/ctrl-click selection
//! - Greyout of everything outside the current selection or hover
//! - PNG export and an optional control overlay
//!
//! The engine (model, simulation, transform, interaction, render) is plain
//! Rust over the [`DrawSurface`] seam; only the component and frame loop touch
//! the DOM.
//!
//! # Example
//!
//! ```ignore
//! use symbol_graph::{ForceGraphCanvas, GraphData, GraphEdge, GraphNode};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode::new("a").with_label("Node A"),
//!         GraphNode::new("b").with_label("Node B"),
//!     ],
//!     edges: vec![GraphEdge::new("a", "b")],
//! };
//!
//! view! { <ForceGraphCanvas data=Signal::stored(data) fullscreen=true /> }
//! ```

mod component;
pub mod config;
mod controls;
pub mod export;
mod frame_loop;
pub mod interaction;
pub mod model;
pub mod render;
pub mod simulation;
mod state;
pub mod stats;
pub mod surface;
pub mod theme;
pub mod transform;
mod types;

pub use component::ForceGraphCanvas;
pub use config::{GraphOptions, InteractionConfig, RenderConfig, SimulationConfig};
pub use controls::{ControlCommand, GraphControls};
pub use frame_loop::FrameLoop;
pub use interaction::{GraphObserver, Modifiers, SelectionState};
pub use state::GraphView;
pub use stats::GraphStats;
pub use surface::DrawSurface;
pub use transform::ViewTransform;
pub use types::{GraphData, GraphEdge, GraphNode};
