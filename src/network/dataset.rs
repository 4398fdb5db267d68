//! Raw network snapshot and the load boundary that produces it.

use log::info;
use thiserror::Error;

use super::attributes::AttributeTable;
use super::project::{Projection, project};
use super::summary::RoleSummary;
use super::types::{FilterSelection, Link, Node};

/// Failures while turning source documents into a [`Dataset`].
#[derive(Debug, Error)]
pub enum DataError {
	/// Not running in a page.
	#[error("no browser document")]
	NoDocument,

	/// A required `<script>` element is absent.
	#[error("missing #{0} element")]
	MissingElement(&'static str),

	/// A JSON document failed to deserialize.
	#[error("invalid {document} JSON: {source}")]
	Json {
		/// `"nodes"` or `"links"`.
		document: &'static str,
		/// Parser error.
		#[source]
		source: serde_json::Error,
	},

	/// The attribute CSV could not be read.
	#[error("invalid attribute CSV: {0}")]
	Csv(#[from] csv::Error),
}

/// Immutable network snapshot for one session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
	/// Every node, in source order.
	pub nodes: Vec<Node>,
	/// Every link, in source order.
	pub links: Vec<Link>,
	/// Optional extra columns per node.
	pub attributes: AttributeTable,
}

impl Dataset {
	/// A dataset without attributes.
	pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
		Self {
			nodes,
			links,
			attributes: AttributeTable::default(),
		}
	}

	/// Parse the node and link JSON arrays plus an optional attribute CSV.
	pub fn from_documents(
		nodes_json: &str,
		links_json: &str,
		attributes_csv: Option<&str>,
	) -> Result<Self, DataError> {
		let nodes: Vec<Node> = serde_json::from_str(nodes_json).map_err(|source| DataError::Json {
			document: "nodes",
			source,
		})?;
		let links: Vec<Link> = serde_json::from_str(links_json).map_err(|source| DataError::Json {
			document: "links",
			source,
		})?;
		let attributes = match attributes_csv {
			Some(text) => AttributeTable::from_csv(text)?,
			None => AttributeTable::default(),
		};

		info!(
			"care-graph: loaded {} nodes, {} links, {} attribute rows",
			nodes.len(),
			links.len(),
			attributes.len()
		);

		Ok(Self {
			nodes,
			links,
			attributes,
		})
	}

	/// Projects the raw data onto `selection`.
	pub fn project(&self, selection: &FilterSelection) -> Projection {
		project(&self.nodes, &self.links, selection)
	}

	/// Role counts over the raw nodes.
	pub fn summary(&self) -> RoleSummary {
		RoleSummary::count(&self.nodes)
	}
}
