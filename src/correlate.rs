//! Correlator: merge records that agree on every canonical field except
//! time into single rows, combining their timestamps.
//!
//! Grouping works on stringified values over the lexicographically sorted
//! union of non-time fields in the batch, so the partition is identical for
//! any permutation of the input. Output order is pinned to the first
//! appearance of each group in batch order.

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;

use crate::config::TIME_LABEL;
use crate::error::EngineError;
use crate::types::{CanonicalRecord, Row};

/// Stands in for a field a record never collected. An explicit null is a
/// different thing and stringifies as `null`.
const ABSENT_PLACEHOLDER: &str = "-";

/// Joins the fields of a grouping key.
const KEY_SEPARATOR: &str = " | ";

/// Joins the merged time values of a group.
const TIME_SEPARATOR: &str = " - ";

/// Stringify one field value for grouping-key comparison: strings as-is,
/// everything else as compact JSON.
fn stringify(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

fn grouping_key(record: &CanonicalRecord, key_fields: &BTreeSet<&str>) -> String {
  key_fields
    .iter()
    .map(|field| match record.get(*field) {
      Some(value) => stringify(value),
      None => ABSENT_PLACEHOLDER.to_string(),
    })
    .collect::<Vec<_>>()
    .join(KEY_SEPARATOR)
}

struct GroupAcc {
  /// First-in-batch member; supplies every non-time field of the row.
  representative: CanonicalRecord,
  /// Distinct time values, kept sorted.
  times: BTreeSet<String>,
}

/// Collapse a batch of canonical records into correlation groups.
///
/// Errors if no record in the batch carries the time label: the grouping
/// invariant cannot be established, and the pipeline driver should never
/// have produced such a batch. An empty batch is fine and yields no groups.
pub fn correlate(records: &[CanonicalRecord]) -> Result<Vec<Row>, EngineError> {
  if records.is_empty() {
    return Ok(Vec::new());
  }
  if !records.iter().any(|r| r.contains_key(TIME_LABEL)) {
    return Err(EngineError::MissingTimeField(TIME_LABEL));
  }

  // Sorted union of every non-time field seen across the batch.
  let mut key_fields: BTreeSet<&str> = BTreeSet::new();
  for record in records {
    for key in record.keys() {
      if key != TIME_LABEL {
        key_fields.insert(key);
      }
    }
  }

  let mut order: Vec<String> = Vec::new();
  let mut groups: HashMap<String, GroupAcc> = HashMap::new();

  for record in records {
    let key = grouping_key(record, &key_fields);
    let group = groups.entry(key.clone()).or_insert_with(|| {
      order.push(key);
      GroupAcc {
        representative: record.clone(),
        times: BTreeSet::new(),
      }
    });
    match record.get(TIME_LABEL) {
      None | Some(Value::Null) => {}
      Some(value) => {
        group.times.insert(stringify(value));
      }
    }
  }

  let rows = order
    .iter()
    .map(|key| {
      let group = &groups[key.as_str()];
      let mut row = group.representative.clone();
      let joined = group.times.iter().cloned().collect::<Vec<_>>().join(TIME_SEPARATOR);
      row.insert(TIME_LABEL.to_string(), Value::String(joined));
      row
    })
    .collect();

  Ok(rows)
}
