//! Projection of the raw network onto the active filter selection.
//!
//! Stages run in a fixed order:
//! 1. classify nodes by role,
//! 2. find structurally relevant patients against the full link set,
//! 3. build the base node set,
//! 4. keep links admitted by the filters whose endpoints are both in the base set,
//! 5. drop base nodes left without a link.
//!
//! Every call starts from scratch. Nothing is cached between projections.

use std::collections::HashSet;

use indexmap::IndexSet;
use log::debug;

use super::classify::{Classified, classify};
use super::relevance::relevant_patients;
use super::types::{FilterSelection, Link, Node, NodeId};

/// Entities, professionals and relevant patients.
pub fn base_nodes<'a>(classified: &Classified<'a>, relevant: &HashSet<&'a NodeId>) -> Vec<&'a Node> {
	classified
		.entities
		.iter()
		.chain(&classified.professionals)
		.copied()
		.chain(
			classified
				.patients
				.iter()
				.copied()
				.filter(|n| relevant.contains(&n.id)),
		)
		.collect()
}

/// Links admitted by `selection` with both endpoints in `base_ids`.
pub fn project_links(
	links: &[Link],
	selection: &FilterSelection,
	base_ids: &HashSet<&NodeId>,
) -> Vec<Link> {
	links
		.iter()
		.filter(|l| selection.admits(l))
		.filter(|l| base_ids.contains(&l.source) && base_ids.contains(&l.target))
		.cloned()
		.collect()
}

/// Nodes that are an endpoint of at least one of `links`.
pub fn connected_nodes<'a>(nodes: &[&'a Node], links: &[Link]) -> Vec<&'a Node> {
	let endpoints: HashSet<&NodeId> = links
		.iter()
		.flat_map(|l| [&l.source, &l.target])
		.collect();
	nodes
		.iter()
		.copied()
		.filter(|n| endpoints.contains(&n.id))
		.collect()
}

/// A labelled choice for the hospital and doctor controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeOption {
	/// Value written into the filter when chosen.
	pub id: NodeId,
	/// Display text.
	pub name: String,
}

/// Values offered by the three filter controls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
	/// Distinct interaction types in first-seen order.
	pub interaction_types: Vec<String>,
	/// Every healthcare entity, in source order.
	pub hospitals: Vec<NodeOption>,
	/// Every healthcare professional, in source order.
	pub doctors: Vec<NodeOption>,
}

impl FilterOptions {
	/// Options are derived from the raw data so they never depend on the
	/// current selection.
	pub fn from_raw(nodes: &[Node], links: &[Link]) -> Self {
		let interaction_types: IndexSet<&str> =
			links.iter().map(|l| l.interaction_type.as_str()).collect();
		let classified = classify(nodes);
		Self {
			interaction_types: interaction_types.into_iter().map(str::to_string).collect(),
			hospitals: node_options(&classified.entities),
			doctors: node_options(&classified.professionals),
		}
	}
}

fn node_options(group: &[&Node]) -> Vec<NodeOption> {
	group
		.iter()
		.map(|n| NodeOption {
			id: n.id.clone(),
			name: n.name.clone(),
		})
		.collect()
}

/// Reduced, mutually consistent node and link sets ready for layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Projection {
	/// Base nodes that kept at least one link.
	pub nodes: Vec<Node>,
	/// Links admitted by the selection, in source order.
	pub links: Vec<Link>,
	/// Choices for the filter controls.
	pub options: FilterOptions,
}

impl Projection {
	/// True when nothing survived the filters.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Looks up a projected node.
	pub fn node(&self, id: &NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| &n.id == id)
	}
}

/// Run the full pipeline over raw data and a filter selection.
pub fn project(nodes: &[Node], links: &[Link], selection: &FilterSelection) -> Projection {
	let classified = classify(nodes);
	let relevant = relevant_patients(&classified, links);
	let base = base_nodes(&classified, &relevant);
	let base_ids: HashSet<&NodeId> = base.iter().map(|n| &n.id).collect();

	let kept_links = project_links(links, selection, &base_ids);
	let kept_nodes = connected_nodes(&base, &kept_links);

	debug!(
		"care-graph: projected {} of {} nodes, {} of {} links ({} eligible patients)",
		kept_nodes.len(),
		nodes.len(),
		kept_links.len(),
		links.len(),
		relevant.len()
	);

	Projection {
		nodes: kept_nodes.into_iter().cloned().collect(),
		links: kept_links,
		options: FilterOptions::from_raw(nodes, links),
	}
}
