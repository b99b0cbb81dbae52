//! Pipeline configuration with sane defaults.

use chrono_tz::Tz;

use crate::error::EngineError;

/// Raw-record key holding the event timestamp.
pub const TIME_FIELD: &str = "timestamp";

/// Column label the time field is renamed to in output rows.
pub const TIME_LABEL: &str = "Date & Time";

/// Raw-record key holding the `<host> - <ip>` collector location.
pub const COLLECTOR_FIELD: &str = "collector_node_id";

/// Derived field: host-name half of the collector location.
pub const HOST_NAME_FIELD: &str = "destination_host_name";

/// Derived field: IP half of the collector location.
pub const HOST_IP_FIELD: &str = "destination_host_ip";

/// Recognized field names the projector retains: user identity,
/// source/destination addressing, process/image metadata, account fields.
/// Everything else in a raw record is dropped silently.
pub const DEFAULT_ALLOWED_FIELDS: &[&str] = &[
  "msg",
  "user_name",
  "timestamp",
  "utmaction",
  "src_country",
  "SubjectUserName",
  "IpAddress",
  "user",
  "IP",
  "IPV4",
  "User",
  "ClientAddress",
  "AccountName",
  "TargetUserName",
  "username",
  "ImagePath",
  "ServiceName",
  "ParentImage",
  "OriginalFileName",
  "ParentUser",
  "Image",
  "src_ip",
  "PasswordLastSet",
  "Timestamp",
  "AccountExpires",
  "dst_ip",
  "url",
  "destination_host_name",
  "destination_host_ip",
];

/// Per-run settings threaded through the pipeline entry points. Stateless
/// and cheap to clone, so concurrent runs with separate configs never
/// interact.
#[derive(Debug, Clone)]
pub struct Config {
  /// IANA zone all record timestamps are converted into.
  pub timezone: Tz,
  /// Canonical field names the projector retains.
  pub allowed_fields: Vec<String>,
}

impl Config {
  pub fn with_timezone(timezone: Tz) -> Self {
    Self {
      timezone,
      ..Self::default()
    }
  }

  /// Like [`Config::with_timezone`], from an IANA identifier string.
  pub fn with_timezone_str(tz: &str) -> Result<Self, EngineError> {
    let timezone = tz
      .parse::<Tz>()
      .map_err(|_| EngineError::UnknownTimezone(tz.to_string()))?;
    Ok(Self::with_timezone(timezone))
  }

  /// Whether projection keeps this key. The canonical time label counts as
  /// allowed so re-projecting a projected record changes nothing.
  pub fn is_allowed(&self, key: &str) -> bool {
    key == TIME_LABEL || self.allowed_fields.iter().any(|f| f == key)
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      timezone: chrono_tz::Africa::Nairobi,
      allowed_fields: DEFAULT_ALLOWED_FIELDS.iter().map(|f| f.to_string()).collect(),
    }
  }
}
