//! Core types for the export engine (JSON contracts + internal models).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Record representations
// ---------------------------------------------------------------------------

/// One raw log record as returned by the search API. Field set varies
/// record to record; no fixed schema. Values may be strings, numbers,
/// bools, nulls, or nested maps/sequences.
pub type RawRecord = Map<String, Value>;

/// A record projected onto the canonical schema: keys restricted to the
/// allowed-field set plus the two derived host fields and the time label.
/// Absence of a field is expressed by key absence; a null that arrived on
/// an allowed field survives as `Value::Null` ("collected as null" is
/// distinct from "not collected"). An empty map means "no signal" and is
/// discarded before correlation.
pub type CanonicalRecord = Map<String, Value>;

/// One output row: the shared canonical fields of a correlation group, plus
/// the merged time cell under the time label.
pub type Row = Map<String, Value>;

// ---------------------------------------------------------------------------
// Widget outcome
// ---------------------------------------------------------------------------

/// Outcome of one widget's pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetResult {
  /// Correlated rows, in first-appearance order, ready for one sheet.
  Rows(Vec<Row>),
  /// No usable records; the caller creates no sheet for this widget.
  Empty,
}

// ---------------------------------------------------------------------------
// CLI stream wrappers (JSON contracts)
// ---------------------------------------------------------------------------

/// One inbound export request line. Unknown fields are silently ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetRequest {
  /// Widget (saved search) title; becomes the sheet name after sanitizing.
  pub widget: String,
  /// Raw search-API response body for this widget's query.
  pub search: Value,
  /// Optional IANA zone overriding the default for this request.
  #[serde(default)]
  pub timezone: Option<String>,
}

/// One outbound line per non-empty widget.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetOutput {
  pub widget: String,
  pub sheet_name: String,
  /// Union of keys across all rows; missing cells render blank.
  pub columns: Vec<String>,
  pub rows: Vec<Row>,
}

/// Structured error output for invalid input lines.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub widget: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      widget: None,
    }
  }

  pub fn with_widget(mut self, widget: impl Into<String>) -> Self {
    self.widget = Some(widget.into());
    self
  }
}
