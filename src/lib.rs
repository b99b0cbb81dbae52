//! Log Search Export Correlation Engine — deterministic, pure computation.
//!
//! Projects heterogeneous raw log records onto a canonical field schema,
//! then correlates records that agree on every canonical field except time
//! into single rows whose time cell merges all observed timestamps. One
//! widget (saved search query) yields either an ordered row set for one
//! sheet, or nothing at all.
//!
//! No network, no files, no DB; pure computation on in-memory batches.

pub mod config;
pub mod correlate;
pub mod error;
pub mod pipeline;
pub mod project;
pub mod sanitize;
pub mod types;

pub use config::Config;
pub use error::EngineError;
pub use pipeline::{column_order, extract_messages, run_widget};
pub use types::{WidgetRequest, WidgetResult};
