//! Structured error types for the export engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  /// Correlation was asked to group a batch in which no record carries the
  /// canonical time label. The pipeline driver never produces such a batch,
  /// so this is an integration bug rather than bad input data.
  #[error("correlate: no record in batch carries '{0}'")]
  MissingTimeField(&'static str),

  #[error("unknown timezone: {0}")]
  UnknownTimezone(String),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}
