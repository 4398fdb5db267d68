//! Role counts for the summary chart.

use super::types::{Node, Role};

/// How many nodes of each role the raw dataset holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleSummary {
	/// Healthcare entities.
	pub entities: usize,
	/// Healthcare professionals.
	pub professionals: usize,
	/// Nodes with the `Patient` role.
	pub patients: usize,
	/// Nodes whose role string was not recognized.
	pub other: usize,
}

impl RoleSummary {
	/// Tallies `nodes` by role.
	pub fn count(nodes: &[Node]) -> Self {
		nodes.iter().fold(Self::default(), |mut acc, node| {
			match node.role {
				Role::Entity => acc.entities += 1,
				Role::Professional => acc.professionals += 1,
				Role::Patient => acc.patients += 1,
				Role::Other(_) => acc.other += 1,
			}
			acc
		})
	}

	/// `(label, count)` bars in display order. Unknown roles are not charted.
	pub fn bars(&self) -> [(&'static str, usize); 3] {
		[
			("Hospitals", self.entities),
			("Doctors", self.professionals),
			("Patients", self.patients),
		]
	}

	/// Every node, unknown roles included.
	pub fn total(&self) -> usize {
		self.entities + self.professionals + self.patients + self.other
	}

	/// Height of the tallest bar.
	pub fn max(&self) -> usize {
		self.bars().iter().map(|(_, n)| *n).max().unwrap_or(0)
	}
}
