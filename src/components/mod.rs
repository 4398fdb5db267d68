//! UI components: the graph canvas and the widgets around it.

pub mod filters;
pub mod force_graph;
pub mod node_details;
pub mod summary_chart;

pub use filters::FilterBar;
pub use node_details::{NodeDetails, NodeTooltip};
pub use summary_chart::SummaryChart;
