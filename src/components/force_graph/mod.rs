//! Force-directed graph visualization component.
//!
//! Renders the projected network on an HTML canvas with:
//! - Physics-based node positioning via force simulation that stops once settled
//! - Positions carried across reloads, keyed by node id
//! - Pan, zoom, node dragging, click-to-select and hover reporting
//! - Smooth highlight of a hovered node and its neighbours
//! - Role-based colors and zoom-aware scaling
//!
//! # Example
//!
//! ```ignore
//! let projection = dataset.project(&FilterSelection::default());
//! let data = Signal::derive(move || GraphData::from(&projection));
//!
//! view! { <ForceGraphCanvas data=data fullscreen=true /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use state::{ForceGraphState, LayoutConfig};
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, HoveredNode};
