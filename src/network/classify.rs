//! Partition nodes by role.

use std::collections::HashSet;

use super::types::{Node, NodeId, Role};

/// Nodes split into three disjoint groups, each in input order.
#[derive(Clone, Debug, Default)]
pub struct Classified<'a> {
	/// Nodes with [`Role::Entity`].
	pub entities: Vec<&'a Node>,
	/// Nodes with [`Role::Professional`].
	pub professionals: Vec<&'a Node>,
	/// Patients plus any node with an unrecognized role.
	pub patients: Vec<&'a Node>,
}

impl<'a> Classified<'a> {
	/// Ids of [`Self::entities`].
	pub fn entity_ids(&self) -> HashSet<&'a NodeId> {
		self.entities.iter().map(|n| &n.id).collect()
	}

	/// Ids of [`Self::professionals`].
	pub fn professional_ids(&self) -> HashSet<&'a NodeId> {
		self.professionals.iter().map(|n| &n.id).collect()
	}

	/// Ids of [`Self::patients`].
	pub fn patient_ids(&self) -> HashSet<&'a NodeId> {
		self.patients.iter().map(|n| &n.id).collect()
	}
}

/// Split `nodes` into entities, professionals and everything else.
pub fn classify(nodes: &[Node]) -> Classified<'_> {
	let mut classified = Classified::default();
	for node in nodes {
		match node.role {
			Role::Entity => classified.entities.push(node),
			Role::Professional => classified.professionals.push(node),
			Role::Patient | Role::Other(_) => classified.patients.push(node),
		}
	}
	classified
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ids(nodes: &[&Node]) -> Vec<String> {
		nodes.iter().map(|n| n.id.to_string()).collect()
	}

	#[test]
	fn unknown_roles_fall_through_to_patients() {
		let nodes = vec![
			Node::new(1, "General", "Healthcare Entity"),
			Node::new(2, "Dr. Who", "Healthcare Professional"),
			Node::new(3, "Jane", "Patient"),
			Node::new(4, "Mystery", "Volunteer"),
		];
		let c = classify(&nodes);
		assert_eq!(ids(&c.entities), ["1"]);
		assert_eq!(ids(&c.professionals), ["2"]);
		assert_eq!(ids(&c.patients), ["3", "4"]);
	}

	#[test]
	fn empty_input() {
		let c = classify(&[]);
		assert!(c.entities.is_empty() && c.professionals.is_empty() && c.patients.is_empty());
	}
}
