//! Graph data structures for input to the force graph component.

use crate::network::{Link, Node, NodeId, Projection, Role};

/// A node in the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: NodeId,
	/// Display name, shown while the node is highlighted.
	pub name: String,
	/// Optional permanent label, drawn at all times.
	pub label: Option<String>,
	/// Role, used for color and size.
	pub role: Role,
	/// Starting position in canvas pixels, if the source data has one.
	pub hint: Option<(f64, f64)>,
}

impl From<&Node> for GraphNode {
	fn from(node: &Node) -> Self {
		// Patients are numerous; only providers get a permanent label.
		let label = node.role.is_provider().then(|| node.name.clone());
		let hint = node.position.x.zip(node.position.y);
		Self {
			id: node.id.clone(),
			name: node.name.clone(),
			label,
			role: node.role.clone(),
			hint,
		}
	}
}

/// An undirected edge between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Source node ID.
	pub source: NodeId,
	/// Target node ID.
	pub target: NodeId,
}

impl From<&Link> for GraphLink {
	fn from(link: &Link) -> Self {
		Self {
			source: link.source.clone(),
			target: link.target.clone(),
		}
	}
}

/// The node under the pointer, with the pointer in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct HoveredNode {
	/// Node id.
	pub id: NodeId,
	/// Pointer x.
	pub x: f64,
	/// Pointer y.
	pub y: f64,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Nodes to lay out.
	pub nodes: Vec<GraphNode>,
	/// Edges. Endpoints missing from `nodes` are skipped.
	pub links: Vec<GraphLink>,
}

impl From<&Projection> for GraphData {
	fn from(projection: &Projection) -> Self {
		Self {
			nodes: projection.nodes.iter().map(GraphNode::from).collect(),
			links: projection.links.iter().map(GraphLink::from).collect(),
		}
	}
}
