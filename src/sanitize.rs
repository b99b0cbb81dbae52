//! Recursive value sanitizer + Excel sheet-name sanitizer.

use serde_json::Value;

/// Excel refuses sheet names longer than this.
const MAX_SHEET_NAME_LENGTH: usize = 31;

/// Strip control bytes (0x00-0x1F) and all non-ASCII from string values,
/// recursing through maps and sequences element-wise. Non-string leaves
/// pass through unchanged; map keys are left alone.
pub fn sanitize_value(value: &Value) -> Value {
  match value {
    Value::String(s) => Value::String(sanitize_str(s)),
    Value::Array(items) => Value::Array(items.iter().map(sanitize_value).collect()),
    Value::Object(map) => Value::Object(
      map
        .iter()
        .map(|(k, v)| (k.clone(), sanitize_value(v)))
        .collect(),
    ),
    other => other.clone(),
  }
}

fn sanitize_str(s: &str) -> String {
  s.chars().filter(|&c| matches!(c, '\x20'..='\x7f')).collect()
}

/// Remove characters Excel rejects in sheet names and enforce the length cap.
pub fn sanitize_sheet_name(name: &str) -> String {
  name
    .chars()
    .filter(|&c| !matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|'))
    .take(MAX_SHEET_NAME_LENGTH)
    .collect()
}
