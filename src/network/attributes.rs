//! Per-node attribute table loaded from CSV.
//!
//! The CSV schema is open-ended. The `id` column is the only known field; every
//! other column lands in the record's overflow bag. Rows are validated here so
//! the rest of the app can trust the table.

use std::collections::BTreeMap;

use csv::{ReaderBuilder, Trim};
use log::warn;

use super::DataError;
use super::types::NodeId;

/// One row of the attribute table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeRecord {
	/// Integer node id parsed from the `id` column.
	pub id: i64,
	/// Every column other than `id`, keyed by header.
	pub fields: BTreeMap<String, String>,
}

impl AttributeRecord {
	/// Value of column `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.fields.get(key).map(String::as_str)
	}
}

/// Attribute records keyed by integer node id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeTable {
	records: BTreeMap<i64, AttributeRecord>,
}

impl AttributeTable {
	/// Parse CSV text with a header row. Rows without a usable integer `id`
	/// are skipped.
	pub fn from_csv(text: &str) -> Result<Self, DataError> {
		let mut reader = ReaderBuilder::new()
			.trim(Trim::All)
			.flexible(true)
			.from_reader(text.trim().as_bytes());
		let headers = reader.headers()?.clone();

		let Some(id_column) = headers.iter().position(|h| h == "id") else {
			warn!("care-graph: attribute table has no id column, ignoring it");
			return Ok(Self::default());
		};

		let mut records = BTreeMap::new();
		for (row, result) in reader.records().enumerate() {
			let record = result?;
			let raw_id = record.get(id_column).unwrap_or_default();
			let Some(id) = parse_id(raw_id) else {
				warn!("care-graph: skipping attribute row {}: bad id {:?}", row + 1, raw_id);
				continue;
			};
			let fields = headers
				.iter()
				.zip(record.iter())
				.enumerate()
				.filter(|(col, _)| *col != id_column)
				.map(|(_, (key, value))| (key.to_string(), value.to_string()))
				.collect();
			records.insert(id, AttributeRecord { id, fields });
		}
		Ok(Self { records })
	}

	/// Row by integer id.
	pub fn get(&self, id: i64) -> Option<&AttributeRecord> {
		self.records.get(&id)
	}

	/// Row for a graph node. Non-integral ids never match.
	pub fn for_node(&self, id: &NodeId) -> Option<&AttributeRecord> {
		parse_id(id.as_str()).and_then(|id| self.get(id))
	}

	/// Number of usable rows.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// No usable rows.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

fn parse_id(raw: &str) -> Option<i64> {
	if raw.is_empty() {
		return None;
	}
	raw.parse::<i64>().ok().or_else(|| {
		raw.parse::<f64>()
			.ok()
			.filter(|f| f.is_finite() && f.fract() == 0.0)
			.map(|f| f as i64)
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_id_and_overflow_fields() {
		let table = AttributeTable::from_csv("id,city,beds\n1,Boston,120\n2, Denver ,80\n").unwrap();
		assert_eq!(table.len(), 2);
		let denver = table.get(2).unwrap();
		assert_eq!(denver.get("city"), Some("Denver"));
		assert_eq!(denver.get("beds"), Some("80"));
		assert_eq!(denver.get("id"), None);
	}

	#[test]
	fn rows_with_bad_ids_are_skipped() {
		let table = AttributeTable::from_csv("id,city\n,Nowhere\nabc,Somewhere\n3.0,Austin\n").unwrap();
		assert_eq!(table.len(), 1);
		assert_eq!(table.get(3).and_then(|r| r.get("city")), Some("Austin"));
	}

	#[test]
	fn missing_id_column_yields_empty_table() {
		let table = AttributeTable::from_csv("name,city\nA,B\n").unwrap();
		assert!(table.is_empty());
	}

	#[test]
	fn short_rows_keep_present_columns() {
		let table = AttributeTable::from_csv("id,city,beds\n4,Reno\n").unwrap();
		let reno = table.get(4).unwrap();
		assert_eq!(reno.get("city"), Some("Reno"));
		assert_eq!(reno.get("beds"), None);
	}

	#[test]
	fn lookup_by_node_id() {
		let table = AttributeTable::from_csv("id,city\n5,Tulsa\n").unwrap();
		assert_eq!(table.for_node(&NodeId::from(5)).map(|r| r.id), Some(5));
		assert!(table.for_node(&NodeId::from("n5")).is_none());
	}
}
