//! Structural relevance of patient nodes.
//!
//! A patient is eligible for display when at least one link of the full,
//! unfiltered link set joins it to an entity or a professional. Display filters
//! are applied later and only ever shrink what is shown, so a patient that stays
//! connected through some other interaction type does not drop out of the
//! eligible set when the interaction filter changes.

use std::collections::HashSet;

use super::classify::Classified;
use super::types::{Link, NodeId};

/// Ids of patients linked directly to an entity or professional.
pub fn relevant_patients<'a>(classified: &Classified<'a>, links: &[Link]) -> HashSet<&'a NodeId> {
	let mut providers = classified.entity_ids();
	providers.extend(classified.professional_ids());
	let patients = classified.patient_ids();

	let mut relevant = HashSet::new();
	for link in links {
		if providers.contains(&link.source) {
			if let Some(&p) = patients.get(&link.target) {
				relevant.insert(p);
			}
		}
		if providers.contains(&link.target) {
			if let Some(&p) = patients.get(&link.source) {
				relevant.insert(p);
			}
		}
	}
	relevant
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::classify::classify;
	use crate::network::types::Node;

	fn fixture() -> Vec<Node> {
		vec![
			Node::new(1, "General", "Healthcare Entity"),
			Node::new(2, "Dr. House", "Healthcare Professional"),
			Node::new(3, "Alice", "Patient"),
			Node::new(4, "Bob", "Patient"),
			Node::new(5, "Carol", "Patient"),
		]
	}

	fn sorted(set: HashSet<&NodeId>) -> Vec<String> {
		let mut ids: Vec<String> = set.into_iter().map(|id| id.to_string()).collect();
		ids.sort();
		ids
	}

	#[test]
	fn patients_linked_to_providers_in_either_direction() {
		let nodes = fixture();
		let links = vec![Link::new(1, 3, "Admission"), Link::new(4, 2, "Consult")];
		let c = classify(&nodes);
		assert_eq!(sorted(relevant_patients(&c, &links)), ["3", "4"]);
	}

	#[test]
	fn patient_to_patient_links_do_not_count() {
		let nodes = fixture();
		let links = vec![Link::new(3, 5, "Referral"), Link::new(1, 3, "Admission")];
		let c = classify(&nodes);
		assert_eq!(sorted(relevant_patients(&c, &links)), ["3"]);
	}

	#[test]
	fn links_to_unknown_ids_are_ignored() {
		let nodes = fixture();
		let links = vec![Link::new(1, 99, "Admission"), Link::new(98, 2, "Consult")];
		let c = classify(&nodes);
		assert!(relevant_patients(&c, &links).is_empty());
	}

	#[test]
	fn unknown_role_linked_to_provider_is_relevant() {
		let mut nodes = fixture();
		nodes.push(Node::new(6, "Visitor", "Caregiver"));
		let links = vec![Link::new(2, 6, "Consult")];
		let c = classify(&nodes);
		assert_eq!(sorted(relevant_patients(&c, &links)), ["6"]);
	}

	#[test]
	fn provider_self_loop_adds_no_patient() {
		let nodes = fixture();
		let links = vec![Link::new(1, 1, "Audit")];
		let c = classify(&nodes);
		assert!(relevant_patients(&c, &links).is_empty());
	}
}
