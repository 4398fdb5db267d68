//! Healthcare interaction network: data model, loading and the filter
//! projection that feeds the graph view.
//!
//! Nothing in here touches the DOM. The projection is a pure function of the
//! raw snapshot and the current [`FilterSelection`].

mod attributes;
mod classify;
mod dataset;
mod project;
mod relevance;
mod summary;
mod types;

pub use attributes::{AttributeRecord, AttributeTable};
pub use classify::{Classified, classify};
pub use dataset::{DataError, Dataset};
pub use project::{
	FilterOptions, NodeOption, Projection, base_nodes, connected_nodes, project, project_links,
};
pub use relevance::relevant_patients;
pub use summary::RoleSummary;
pub use types::{ALL, Filter, FilterSelection, Link, Node, NodeId, Position, Role};
