//! Field Projector: maps one raw record onto the canonical output schema.
//!
//! Order matters: convert the timestamp, sanitize everything, split the
//! collector location, filter to allowed fields, rename the time field,
//! then inject the derived host fields. Every step is total; a record that
//! ends up with no recognized fields projects to an empty map, which the
//! caller discards.

use std::sync::LazyLock;

use chrono::DateTime;
use chrono_tz::Tz;
use regex::Regex;
use serde_json::Value;

use crate::config::{
  Config, COLLECTOR_FIELD, HOST_IP_FIELD, HOST_NAME_FIELD, TIME_FIELD, TIME_LABEL,
};
use crate::sanitize::sanitize_value;
use crate::types::{CanonicalRecord, RawRecord};

/// First IPv4-shaped substring. Octet ranges are deliberately unvalidated;
/// collector IDs only ever embed real addresses.
static IPV4: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+\.\d+").unwrap());

/// The `" - <ip>"` suffix removed when deriving the host name.
static IP_SUFFIX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s*-\s*\d+\.\d+\.\d+\.\d+").unwrap());

/// Convert a UTC timestamp string into the given zone, formatted
/// `YYYY-MM-DD HH:MM:SS`. Conversion failure is non-fatal: malformed or
/// unrecognized input comes back unchanged.
pub fn convert_utc_to_local(timestamp: &str, timezone: Tz) -> String {
  match DateTime::parse_from_rfc3339(timestamp) {
    Ok(utc) => utc
      .with_timezone(&timezone)
      .format("%Y-%m-%d %H:%M:%S")
      .to_string(),
    Err(_) => timestamp.to_string(),
  }
}

/// Split a collector location like `"gw-nairobi-1 - 10.0.0.5"` into host
/// name and IP. Either half may be absent; empty halves are reported as
/// absent, not as empty strings.
pub fn extract_host_and_ip(collector: &str) -> (Option<String>, Option<String>) {
  let ip = IPV4.find(collector).map(|m| m.as_str().to_string());
  let host = IP_SUFFIX.replace_all(collector, "").trim().to_string();
  let host = if host.is_empty() { None } else { Some(host) };
  (host, ip)
}

/// Project one raw record onto the canonical schema.
pub fn project(raw: &RawRecord, config: &Config) -> CanonicalRecord {
  // Time normalization first: the converted string is clean ASCII, and a
  // failed conversion leaves the original to be sanitized with the rest.
  let mut record = raw.clone();
  if let Some(ts) = raw.get(TIME_FIELD).and_then(Value::as_str) {
    let converted = convert_utc_to_local(ts, config.timezone);
    record.insert(TIME_FIELD.to_string(), Value::String(converted));
  }

  let sanitized: RawRecord = record
    .iter()
    .map(|(k, v)| (k.clone(), sanitize_value(v)))
    .collect();

  // Location decomposition reads the sanitized value.
  let (host_name, host_ip) = match sanitized.get(COLLECTOR_FIELD) {
    Some(Value::String(collector)) => extract_host_and_ip(collector),
    _ => (None, None),
  };

  let mut canonical: CanonicalRecord = sanitized
    .into_iter()
    .filter(|(key, _)| config.is_allowed(key))
    .collect();

  if let Some(ts) = canonical.remove(TIME_FIELD) {
    canonical.insert(TIME_LABEL.to_string(), ts);
  }

  // Derived fields last; the allowed set reserves their names, so an
  // overwrite here only ever replaces a stale API-supplied copy.
  if let Some(name) = host_name {
    canonical.insert(HOST_NAME_FIELD.to_string(), Value::String(name));
  }
  if let Some(ip) = host_ip {
    canonical.insert(HOST_IP_FIELD.to_string(), Value::String(ip));
  }

  canonical
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn raw(value: serde_json::Value) -> RawRecord {
    value.as_object().unwrap().clone()
  }

  #[test]
  fn timestamp_converted_to_nairobi() {
    let converted = convert_utc_to_local("2025-01-15T10:30:00Z", chrono_tz::Africa::Nairobi);
    assert_eq!(converted, "2025-01-15 13:30:00");
  }

  #[test]
  fn malformed_timestamp_kept_unchanged() {
    let converted = convert_utc_to_local("yesterday-ish", chrono_tz::Africa::Nairobi);
    assert_eq!(converted, "yesterday-ish");
  }

  #[test]
  fn collector_with_ip_suffix_splits() {
    let (host, ip) = extract_host_and_ip("gw-nairobi-1 - 10.0.0.5");
    assert_eq!(host.as_deref(), Some("gw-nairobi-1"));
    assert_eq!(ip.as_deref(), Some("10.0.0.5"));
  }

  #[test]
  fn collector_without_ip_yields_no_ip() {
    let (host, ip) = extract_host_and_ip("gw-nairobi-1");
    assert_eq!(host.as_deref(), Some("gw-nairobi-1"));
    assert_eq!(ip, None);
  }

  #[test]
  fn empty_collector_yields_nothing() {
    assert_eq!(extract_host_and_ip(""), (None, None));
  }

  #[test]
  fn unrecognized_fields_are_dropped() {
    let config = Config::default();
    let record = raw(json!({
      "user": "alice",
      "random_debug_field": "x"
    }));
    let canonical = project(&record, &config);
    assert_eq!(canonical.len(), 1);
    assert_eq!(canonical["user"], json!("alice"));
  }

  #[test]
  fn time_field_renamed_and_converted() {
    let config = Config::default();
    let record = raw(json!({
      "timestamp": "2025-01-15T10:30:00Z",
      "user": "alice"
    }));
    let canonical = project(&record, &config);
    assert!(!canonical.contains_key(TIME_FIELD));
    assert_eq!(canonical[TIME_LABEL], json!("2025-01-15 13:30:00"));
  }

  #[test]
  fn derived_host_fields_injected() {
    let config = Config::default();
    let record = raw(json!({
      "user": "alice",
      "collector_node_id": "gw-nairobi-1 - 10.0.0.5"
    }));
    let canonical = project(&record, &config);
    assert_eq!(canonical[HOST_NAME_FIELD], json!("gw-nairobi-1"));
    assert_eq!(canonical[HOST_IP_FIELD], json!("10.0.0.5"));
    // The collector field itself is not canonical.
    assert!(!canonical.contains_key(COLLECTOR_FIELD));
  }

  #[test]
  fn record_with_no_allowed_fields_projects_empty() {
    let config = Config::default();
    let record = raw(json!({"noise": 1, "more_noise": "x"}));
    assert!(project(&record, &config).is_empty());
  }

  #[test]
  fn projection_is_idempotent() {
    let config = Config::default();
    let record = raw(json!({
      "timestamp": "2025-01-15T10:30:00Z",
      "user": "alice",
      "collector_node_id": "gw-nairobi-1 - 10.0.0.5",
      "random_debug_field": "x"
    }));
    let once = project(&record, &config);
    let twice = project(&once, &config);
    assert_eq!(once, twice);
  }

  #[test]
  fn values_are_sanitized() {
    let config = Config::default();
    let record = raw(json!({"msg": "alert\x07 \u{2014} intrusion"}));
    let canonical = project(&record, &config);
    assert_eq!(canonical["msg"], json!("alert  intrusion"));
  }
}
