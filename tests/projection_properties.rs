//! Projection behaviour over whole networks.
//!
//! Tests invariants:
//! - Every projected link joins two projected nodes
//! - Every projected node touches a projected link
//! - Tightening a filter never adds nodes or links
//! - Patient eligibility does not depend on the display filters
//! - Reducing twice changes nothing
//! - Integer and string ids project identically

#![allow(unused_crate_dependencies)]

use std::collections::HashSet;

use care_graph::components::force_graph::{ForceGraphState, GraphData, Theme};
use care_graph::network::{
	Dataset, Filter, FilterSelection, Link, Node, NodeId, Projection, classify, connected_nodes,
	project, relevant_patients,
};
use proptest::prelude::*;

const KINDS: [&str; 3] = ["Admission", "Consult", "Surgery"];

fn ids(nodes: &[Node]) -> Vec<&str> {
	nodes.iter().map(|n| n.id.as_str()).collect()
}

fn node_set(p: &Projection) -> HashSet<NodeId> {
	p.nodes.iter().map(|n| n.id.clone()).collect()
}

fn consult_only() -> FilterSelection {
	FilterSelection {
		interaction_type: Filter::Only("Consult".into()),
		..Default::default()
	}
}

// ============================================================================
// Fixtures
// ============================================================================

const NODES: &str = r#"[
	{"id": 1, "name": "General", "role": "Healthcare Entity"},
	{"id": 2, "name": "Dr. Grey", "role": "Healthcare Professional", "specialty": "Surgery"},
	{"id": 3, "name": "Alice", "role": "Patient"},
	{"id": 4, "name": "Bob", "role": "Patient"}
]"#;

const LINKS: &str = r#"[
	{"source": 1, "target": 3, "interaction_type": "Admission", "date": "2024-01-05"},
	{"source": 2, "target": 3, "interaction_type": "Consult", "date": "2024-01-06"}
]"#;

#[test]
fn unfiltered_scenario() {
	let dataset = Dataset::from_documents(NODES, LINKS, None).unwrap();
	let p = dataset.project(&FilterSelection::default());
	assert_eq!(ids(&p.nodes), ["1", "2", "3"]);
	assert_eq!(p.links.len(), 2);
	assert_eq!(p.options.interaction_types, ["Admission", "Consult"]);
	assert_eq!(p.options.hospitals.len(), 1);
	assert_eq!(p.options.doctors.len(), 1);
}

#[test]
fn consult_scenario() {
	let dataset = Dataset::from_documents(NODES, LINKS, None).unwrap();
	let p = dataset.project(&consult_only());
	assert_eq!(ids(&p.nodes), ["2", "3"]);
	let consult = Link {
		date: "2024-01-06".into(),
		..Link::new(2, 3, "Consult")
	};
	assert_eq!(p.links, vec![consult]);
	// options never shrink with the selection
	assert_eq!(p.options.interaction_types.len(), 2);
}

#[test]
fn eligibility_uses_links_the_selection_hides() {
	let nodes = r#"[
		{"id": 1, "name": "General", "role": "Healthcare Entity"},
		{"id": 3, "name": "Alice", "role": "Patient"},
		{"id": 4, "name": "Bob", "role": "Patient"}
	]"#;
	let links = r#"[
		{"source": 1, "target": 3, "interaction_type": "Admission"},
		{"source": 1, "target": 4, "interaction_type": "Admission"},
		{"source": 3, "target": 4, "interaction_type": "Consult"}
	]"#;
	let dataset = Dataset::from_documents(nodes, links, None).unwrap();
	let p = dataset.project(&consult_only());
	// both patients qualify through admissions that the filter then hides
	assert_eq!(ids(&p.nodes), ["3", "4"]);
	assert_eq!(p.links, vec![Link::new(3, 4, "Consult")]);
}

#[test]
fn unknown_role_is_shown_like_a_patient() {
	let nodes = r#"[
		{"id": "d", "name": "Dr. Who", "role": "Healthcare Professional"},
		{"id": "v", "name": "Visitor", "role": "Volunteer"},
		{"id": "w", "name": "Walker", "role": "Volunteer"}
	]"#;
	let links = r#"[
		{"source": "d", "target": "v", "interaction_type": "Consult"},
		{"source": "v", "target": "w", "interaction_type": "Consult"}
	]"#;
	let dataset = Dataset::from_documents(nodes, links, None).unwrap();
	let p = dataset.project(&FilterSelection::default());
	// "w" only reaches another patient-like node, so it is not eligible
	assert_eq!(ids(&p.nodes), ["d", "v"]);
	assert_eq!(p.links.len(), 1);
	assert_eq!(dataset.summary().other, 2);
}

#[test]
fn numeric_and_string_ids_project_identically() {
	let string_nodes = NODES.replace("\"id\": 1", "\"id\": \"1\"").replace("\"id\": 3", "\"id\": \"3\"");
	let string_links = LINKS
		.replace("\"source\": 1", "\"source\": \"1\"")
		.replace("\"target\": 3", "\"target\": 3.0");

	let numeric = Dataset::from_documents(NODES, LINKS, None).unwrap();
	let mixed = Dataset::from_documents(&string_nodes, &string_links, None).unwrap();
	for selection in [FilterSelection::default(), consult_only()] {
		assert_eq!(numeric.project(&selection), mixed.project(&selection));
	}
}

#[test]
fn attribute_rows_attach_to_nodes() {
	let dataset = Dataset::from_documents(NODES, LINKS, Some("id,city\n1,Boston\nx,Nowhere\n")).unwrap();
	let record = dataset.attributes.for_node(&NodeId::from(1)).unwrap();
	assert_eq!(record.get("city"), Some("Boston"));
	assert_eq!(dataset.attributes.len(), 1);
}

#[test]
fn malformed_documents_are_reported() {
	let err = Dataset::from_documents("[", LINKS, None).unwrap_err();
	assert!(err.to_string().starts_with("invalid nodes JSON"));
	let err = Dataset::from_documents(NODES, "{}", None).unwrap_err();
	assert!(err.to_string().starts_with("invalid links JSON"));
}

#[test]
fn layout_positions_every_projected_node() {
	let dataset = Dataset::from_documents(NODES, LINKS, None).unwrap();
	let theme = Theme::default();
	let all = dataset.project(&FilterSelection::default());
	let mut state = ForceGraphState::new(&GraphData::from(&all), 800.0, 600.0, &theme);
	assert_eq!(state.node_count(), 3);
	for _ in 0..20 {
		state.tick(0.016);
	}

	let before = state.positions();
	let narrowed = dataset.project(&consult_only());
	state.reload(&GraphData::from(&narrowed), &theme);
	let after = state.positions();
	assert_eq!(after.len(), 2);
	for id in ["2", "3"] {
		let id = NodeId::from(id);
		assert_eq!(after[&id], before[&id]);
	}
}

// ============================================================================
// Strategy helpers
// ============================================================================

fn arb_role() -> impl Strategy<Value = &'static str> {
	prop_oneof![
		Just("Healthcare Entity"),
		Just("Healthcare Professional"),
		Just("Patient"),
		Just("Volunteer"),
	]
}

/// Small networks. Link endpoints may point past the node list.
fn arb_network() -> impl Strategy<Value = (Vec<Node>, Vec<Link>)> {
	(1i64..12)
		.prop_flat_map(|n| {
			let roles = prop::collection::vec(arb_role(), n as usize);
			let links = prop::collection::vec((0..n + 2, 0..n + 2, 0..KINDS.len()), 0..30);
			(roles, links)
		})
		.prop_map(|(roles, links)| {
			let nodes = roles
				.into_iter()
				.enumerate()
				.map(|(i, role)| Node::new(i as i64, format!("node {i}"), role))
				.collect();
			let links = links
				.into_iter()
				.map(|(s, t, k)| Link::new(s, t, KINDS[k]))
				.collect();
			(nodes, links)
		})
}

fn arb_selection() -> impl Strategy<Value = FilterSelection> {
	(
		prop::option::of(0..KINDS.len()),
		prop::option::of(0i64..14),
		prop::option::of(0i64..14),
	)
		.prop_map(|(kind, hospital, doctor)| FilterSelection {
			interaction_type: kind.map_or(Filter::All, |k| Filter::Only(KINDS[k].to_string())),
			hospital: hospital.map_or(Filter::All, |id| Filter::Only(NodeId::from(id))),
			doctor: doctor.map_or(Filter::All, |id| Filter::Only(NodeId::from(id))),
		})
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
	#[test]
	fn no_dangling_edges((nodes, links) in arb_network(), selection in arb_selection()) {
		let p = project(&nodes, &links, &selection);
		let kept = node_set(&p);
		for link in &p.links {
			prop_assert!(kept.contains(&link.source) && kept.contains(&link.target));
		}
	}

	#[test]
	fn no_isolated_nodes((nodes, links) in arb_network(), selection in arb_selection()) {
		let p = project(&nodes, &links, &selection);
		for node in &p.nodes {
			prop_assert!(p.links.iter().any(|l| l.touches(&node.id)), "isolated {}", node.id);
		}
	}

	#[test]
	fn tightening_never_adds((nodes, links) in arb_network(), selection in arb_selection()) {
		let tight = project(&nodes, &links, &selection);
		let loosened = [
			FilterSelection { interaction_type: Filter::All, ..selection.clone() },
			FilterSelection { hospital: Filter::All, ..selection.clone() },
			FilterSelection { doctor: Filter::All, ..selection.clone() },
			FilterSelection::default(),
		];
		for loose in &loosened {
			let loose = project(&nodes, &links, loose);
			prop_assert!(tight.nodes.len() <= loose.nodes.len());
			prop_assert!(tight.links.len() <= loose.links.len());
			prop_assert!(node_set(&tight).is_subset(&node_set(&loose)));
			for link in &tight.links {
				prop_assert!(loose.links.contains(link));
			}
		}
	}

	#[test]
	fn shown_patients_are_eligible_under_every_selection(
		(nodes, links) in arb_network(),
		selection in arb_selection(),
	) {
		let classified = classify(&nodes);
		let eligible = relevant_patients(&classified, &links);
		let patients = classified.patient_ids();
		let p = project(&nodes, &links, &selection);
		for node in &p.nodes {
			if patients.contains(&node.id) {
				prop_assert!(eligible.contains(&node.id));
			}
		}
	}

	#[test]
	fn reduction_is_idempotent((nodes, links) in arb_network()) {
		let all: Vec<&Node> = nodes.iter().collect();
		let once = connected_nodes(&all, &links);
		let twice = connected_nodes(&once, &links);
		prop_assert_eq!(once, twice);
	}

	#[test]
	fn projection_is_deterministic((nodes, links) in arb_network(), selection in arb_selection()) {
		prop_assert_eq!(
			project(&nodes, &links, &selection),
			project(&nodes, &links, &selection)
		);
	}
}
