//! Network data types: nodes, links, roles and filter selections.
//!
//! Raw ids may arrive as JSON numbers or strings. They are normalized into
//! [`NodeId`] while deserializing, so everything downstream compares one
//! canonical string form.

use std::fmt;

use serde::Deserialize;

/// Select value meaning "no constraint".
pub const ALL: &str = "All";

/// An id as it appears in source data.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
	Int(i64),
	Float(f64),
	Text(String),
}

impl From<RawId> for NodeId {
	fn from(raw: RawId) -> Self {
		match raw {
			RawId::Int(n) => NodeId(n.to_string()),
			// 3.0 must match 3 and "3"
			RawId::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
				NodeId((f as i64).to_string())
			}
			RawId::Float(f) => NodeId(f.to_string()),
			RawId::Text(s) => NodeId(s),
		}
	}
}

/// Canonical node identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "RawId")]
pub struct NodeId(String);

impl NodeId {
	/// The canonical string form.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for NodeId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for NodeId {
	fn from(s: &str) -> Self {
		NodeId(s.to_string())
	}
}

impl From<String> for NodeId {
	fn from(s: String) -> Self {
		NodeId(s)
	}
}

impl From<i64> for NodeId {
	fn from(n: i64) -> Self {
		NodeId(n.to_string())
	}
}

impl From<i32> for NodeId {
	fn from(n: i32) -> Self {
		NodeId(n.to_string())
	}
}

/// The part a node plays in the network.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Role {
	/// A healthcare organization, e.g. a hospital.
	Entity,
	/// A healthcare worker, e.g. a doctor.
	Professional,
	/// A care recipient.
	Patient,
	/// Any role string not recognized above. Treated like a patient.
	Other(String),
}

impl Role {
	/// Label used in source data and in the details panel.
	pub fn label(&self) -> &str {
		match self {
			Role::Entity => "Healthcare Entity",
			Role::Professional => "Healthcare Professional",
			Role::Patient => "Patient",
			Role::Other(raw) => raw,
		}
	}

	/// Entities and professionals anchor the network; everything else hangs off them.
	pub fn is_provider(&self) -> bool {
		matches!(self, Role::Entity | Role::Professional)
	}
}

impl From<String> for Role {
	fn from(raw: String) -> Self {
		match raw.as_str() {
			"Healthcare Entity" => Role::Entity,
			"Healthcare Professional" => Role::Professional,
			"Patient" => Role::Patient,
			_ => Role::Other(raw),
		}
	}
}

impl From<&str> for Role {
	fn from(raw: &str) -> Self {
		Role::from(raw.to_string())
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Layout hints carried in source data. Read by the layout adapter, never
/// written by the projection pipeline.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Position {
	/// Suggested starting x.
	pub x: Option<f64>,
	/// Suggested starting y.
	pub y: Option<f64>,
	/// Velocity from an earlier layout run. Ignored.
	pub vx: Option<f64>,
	/// Velocity from an earlier layout run. Ignored.
	pub vy: Option<f64>,
	/// Fixed x. Ignored, dragging pins instead.
	pub fx: Option<f64>,
	/// Fixed y. Ignored, dragging pins instead.
	pub fy: Option<f64>,
}

/// A person or organization in the network.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Node {
	/// Unique within a dataset.
	pub id: NodeId,
	/// Display name. Empty when the source omits it.
	#[serde(default)]
	pub name: String,
	/// Decides classification and color.
	pub role: Role,
	/// Professionals only, usually.
	pub specialty: Option<String>,
	/// Number of patients a professional treats.
	pub patient_count: Option<i64>,
	/// Layout hints, flattened into the node object.
	#[serde(flatten)]
	pub position: Position,
}

impl Node {
	/// Build a node without optional fields.
	pub fn new(id: impl Into<NodeId>, name: impl Into<String>, role: impl Into<Role>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			role: role.into(),
			specialty: None,
			patient_count: None,
			position: Position::default(),
		}
	}

	/// Sets the specialty.
	pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
		self.specialty = Some(specialty.into());
		self
	}

	/// Sets the patient count.
	pub fn with_patient_count(mut self, count: i64) -> Self {
		self.patient_count = Some(count);
		self
	}

	/// Specialty for display, `"N/A"` when missing or blank.
	pub fn specialty_label(&self) -> String {
		self.specialty
			.as_deref()
			.filter(|s| !s.trim().is_empty())
			.unwrap_or("N/A")
			.to_string()
	}

	/// Patient count for display, `"N/A"` when missing.
	pub fn patient_count_label(&self) -> String {
		self.patient_count
			.map(|n| n.to_string())
			.unwrap_or_else(|| "N/A".to_string())
	}

	/// `(label, value)` rows shown when a node is inspected.
	pub fn detail_rows(&self) -> [(&'static str, String); 3] {
		[
			("Role", self.role.label().to_string()),
			("Specialty", self.specialty_label()),
			("Patients", self.patient_count_label()),
		]
	}
}

/// An interaction between two nodes. Undirected for display purposes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Link {
	/// One endpoint.
	pub source: NodeId,
	/// The other endpoint.
	pub target: NodeId,
	/// Free-form kind, e.g. `"Consult"`.
	#[serde(default)]
	pub interaction_type: String,
	/// Carried through untouched, never parsed.
	#[serde(default)]
	pub date: String,
}

impl Link {
	/// Build an undated link.
	pub fn new(
		source: impl Into<NodeId>,
		target: impl Into<NodeId>,
		interaction_type: impl Into<String>,
	) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			interaction_type: interaction_type.into(),
			date: String::new(),
		}
	}

	/// Whether `id` is either endpoint.
	pub fn touches(&self, id: &NodeId) -> bool {
		&self.source == id || &self.target == id
	}

	/// Both endpoints are the same node.
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}
}

/// One filter control: either unconstrained or pinned to a single value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter<T> {
	/// Admits everything.
	All,
	/// Admits only this value.
	Only(T),
}

impl<T> Default for Filter<T> {
	fn default() -> Self {
		Filter::All
	}
}

impl<T> Filter<T> {
	/// Whether this filter is unconstrained.
	pub fn is_all(&self) -> bool {
		matches!(self, Filter::All)
	}

	/// Parse a `<select>` value. [`ALL`] is the unconstrained choice.
	pub fn from_select(value: &str) -> Self
	where
		T: for<'a> From<&'a str>,
	{
		if value == ALL {
			Filter::All
		} else {
			Filter::Only(T::from(value))
		}
	}

	/// The `<select>` value representing this choice.
	pub fn to_select_value(&self) -> String
	where
		T: AsRef<str>,
	{
		match self {
			Filter::All => ALL.to_string(),
			Filter::Only(v) => v.as_ref().to_string(),
		}
	}
}

impl<T: PartialEq> Filter<T> {
	/// Whether `value` passes.
	pub fn admits(&self, value: &T) -> bool {
		match self {
			Filter::All => true,
			Filter::Only(v) => v == value,
		}
	}
}

impl Filter<NodeId> {
	/// Admits a link when either endpoint matches.
	pub fn admits_link(&self, link: &Link) -> bool {
		match self {
			Filter::All => true,
			Filter::Only(id) => link.touches(id),
		}
	}
}

/// The three independent display filters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSelection {
	/// Matches [`Link::interaction_type`] exactly.
	pub interaction_type: Filter<String>,
	/// A link passes when either endpoint is this entity.
	pub hospital: Filter<NodeId>,
	/// A link passes when either endpoint is this professional.
	pub doctor: Filter<NodeId>,
}

impl FilterSelection {
	/// All three filters admit `link`.
	pub fn admits(&self, link: &Link) -> bool {
		self.interaction_type.admits(&link.interaction_type)
			&& self.hospital.admits_link(link)
			&& self.doctor.admits_link(link)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn numeric_and_string_ids_normalize_equal() {
		let a: NodeId = serde_json::from_str("3").unwrap();
		let b: NodeId = serde_json::from_str("\"3\"").unwrap();
		let c: NodeId = serde_json::from_str("3.0").unwrap();
		assert_eq!(a, b);
		assert_eq!(a, c);
		assert_eq!(a.as_str(), "3");
	}

	#[test]
	fn fractional_ids_keep_their_fraction() {
		let id: NodeId = serde_json::from_str("2.5").unwrap();
		assert_eq!(id.as_str(), "2.5");
	}

	#[test]
	fn roles_parse_known_labels() {
		assert_eq!(Role::from("Healthcare Entity"), Role::Entity);
		assert_eq!(Role::from("Healthcare Professional"), Role::Professional);
		assert_eq!(Role::from("Patient"), Role::Patient);
		assert_eq!(Role::from("Nurse"), Role::Other("Nurse".into()));
		assert_eq!(Role::Other("Nurse".into()).label(), "Nurse");
	}

	#[test]
	fn node_deserializes_with_optional_fields() {
		let json = r#"{
			"id": 7,
			"name": "St. Mary",
			"role": "Healthcare Entity",
			"specialty": null,
			"x": 12.5,
			"fx": null
		}"#;
		let node: Node = serde_json::from_str(json).unwrap();
		assert_eq!(node.id, NodeId::from(7));
		assert_eq!(node.role, Role::Entity);
		assert_eq!(node.specialty_label(), "N/A");
		assert_eq!(node.patient_count_label(), "N/A");
		assert_eq!(node.position.x, Some(12.5));
		assert_eq!(node.position.fx, None);
	}

	#[test]
	fn detail_rows_fall_back_to_na() {
		let doctor = Node::new(2, "Dr. Grey", "Healthcare Professional")
			.with_specialty("Surgery")
			.with_patient_count(12);
		let rows = doctor.detail_rows();
		assert_eq!(rows[0], ("Role", "Healthcare Professional".to_string()));
		assert_eq!(rows[1], ("Specialty", "Surgery".to_string()));
		assert_eq!(rows[2], ("Patients", "12".to_string()));

		let patient = Node::new(3, "Alice", "Patient").with_specialty("  ");
		let values: Vec<String> = patient.detail_rows().into_iter().map(|(_, v)| v).collect();
		assert_eq!(values, ["Patient", "N/A", "N/A"]);
	}

	#[test]
	fn link_accepts_mixed_id_forms() {
		let json = r#"{"source": 1, "target": "3", "interaction_type": "Admission", "date": "2024-01-02"}"#;
		let link: Link = serde_json::from_str(json).unwrap();
		assert_eq!(link.source, NodeId::from("1"));
		assert_eq!(link.target, NodeId::from(3));
	}

	#[test]
	fn filter_select_values() {
		let f: Filter<String> = Filter::from_select("All");
		assert!(f.is_all());
		let f: Filter<NodeId> = Filter::from_select("12");
		assert_eq!(f, Filter::Only(NodeId::from(12)));
		assert_eq!(f.to_select_value(), "12");
		assert_eq!(Filter::<NodeId>::All.to_select_value(), ALL);
	}

	#[test]
	fn endpoint_filter_matches_either_side() {
		let link = Link::new(1, 2, "Consult");
		assert!(Filter::Only(NodeId::from(1)).admits_link(&link));
		assert!(Filter::Only(NodeId::from(2)).admits_link(&link));
		assert!(!Filter::Only(NodeId::from(3)).admits_link(&link));
	}

	mod proptests {
		use super::*;
		use proptest::prelude::*;

		proptest! {
			#[test]
			fn integral_ids_match_in_every_form(n in -1_000_000i64..1_000_000) {
				let int: NodeId = serde_json::from_str(&n.to_string()).unwrap();
				let float: NodeId = serde_json::from_str(&format!("{n}.0")).unwrap();
				let text: NodeId = serde_json::from_str(&format!("\"{n}\"")).unwrap();
				prop_assert_eq!(&int, &float);
				prop_assert_eq!(&int, &text);
			}
		}
	}
}
