//! Pipeline Driver: per-widget projection + correlation.
//!
//! Owns no retry or partial-failure logic. A record that projects to
//! nothing is silently dropped, and a widget with no surviving records
//! yields [`WidgetResult::Empty`] so the caller skips its sheet.

use serde_json::Value;

use crate::config::{Config, TIME_LABEL};
use crate::correlate::correlate;
use crate::error::EngineError;
use crate::project::project;
use crate::types::{CanonicalRecord, RawRecord, Row, WidgetResult};

/// Pull the raw record batch out of a search-API response body.
///
/// The response shape is `{"messages": [{"message": {...}}, ...]}`.
/// Returns `None` when the top-level `messages` collection is missing,
/// which callers treat the same as an empty batch. Entries that are not
/// objects, or lack an object `message` field, are dropped, not repaired.
pub fn extract_messages(search: &Value) -> Option<Vec<RawRecord>> {
  let messages = search.get("messages")?.as_array()?;
  Some(
    messages
      .iter()
      .filter_map(|entry| entry.get("message").and_then(Value::as_object).cloned())
      .collect(),
  )
}

/// Run one widget's batch through projection and correlation.
pub fn run_widget(
  raw_records: &[RawRecord],
  config: &Config,
) -> Result<WidgetResult, EngineError> {
  let projected: Vec<CanonicalRecord> = raw_records
    .iter()
    .map(|record| project(record, config))
    .filter(|record| !record.is_empty())
    .collect();

  if projected.is_empty() {
    return Ok(WidgetResult::Empty);
  }

  let rows = correlate(&projected)?;
  if rows.is_empty() {
    return Ok(WidgetResult::Empty);
  }
  Ok(WidgetResult::Rows(rows))
}

/// Column layout for a widget's rows: the time label first, then the
/// sorted union of every other key observed across the rows. Cells for
/// keys a row lacks render blank downstream.
pub fn column_order(rows: &[Row]) -> Vec<String> {
  let mut keys: std::collections::BTreeSet<&str> =
    rows.iter().flat_map(|row| row.keys().map(String::as_str)).collect();
  let has_time = keys.remove(TIME_LABEL);

  let mut columns = Vec::with_capacity(keys.len() + 1);
  if has_time {
    columns.push(TIME_LABEL.to_string());
  }
  columns.extend(keys.into_iter().map(String::from));
  columns
}
