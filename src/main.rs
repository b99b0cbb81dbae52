//! Binary entrypoint: read JSON lines from stdin, write JSON lines to stdout.
//!
//! Each input line is a WidgetRequest: the widget title, the raw search-API
//! response for its query, and an optional timezone override. Output lines
//! are either:
//! - A WidgetOutput (sheet name, column layout, correlated rows)
//! - An ErrorOutput (when input parsing or correlation fails)
//!
//! Widgets with no usable records produce no output line; the consumer
//! simply never creates a sheet for them.

use export_engine::sanitize::sanitize_sheet_name;
use export_engine::types::{ErrorOutput, WidgetOutput};
use export_engine::{column_order, extract_messages, run_widget, Config, WidgetRequest, WidgetResult};
use std::io::{self, BufRead, Write};

fn main() {
  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());

  for line in stdin.lock().lines() {
    let line = match line {
      Ok(l) => l,
      Err(e) => {
        let _ = writeln!(io::stderr(), "export-engine: read error: {}", e);
        std::process::exit(1);
      }
    };

    // Skip blank lines.
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    // Parse inbound request.
    let request: WidgetRequest = match serde_json::from_str(trimmed) {
      Ok(v) => v,
      Err(e) => {
        emit(&mut out, &ErrorOutput::new(format!("json parse: {}", e)));
        continue;
      }
    };

    let config = match request.timezone.as_deref() {
      Some(tz) => match Config::with_timezone_str(tz) {
        Ok(c) => c,
        Err(e) => {
          emit(
            &mut out,
            &ErrorOutput::new(e.to_string()).with_widget(request.widget),
          );
          continue;
        }
      },
      None => Config::default(),
    };

    // Missing messages collection means "no data": skip the widget.
    let raw_records = match extract_messages(&request.search) {
      Some(records) => records,
      None => continue,
    };

    match run_widget(&raw_records, &config) {
      Ok(WidgetResult::Rows(rows)) => {
        let output = WidgetOutput {
          sheet_name: sanitize_sheet_name(&request.widget),
          columns: column_order(&rows),
          widget: request.widget,
          rows,
        };
        emit(&mut out, &output);
      }
      Ok(WidgetResult::Empty) => {
        // Nothing survived projection; no sheet for this widget.
      }
      Err(e) => {
        emit(
          &mut out,
          &ErrorOutput::new(e.to_string()).with_widget(request.widget),
        );
      }
    }
  }

  let _ = out.flush();
}

fn emit<W: Write, T: serde::Serialize>(out: &mut W, value: &T) {
  let _ = serde_json::to_writer(&mut *out, value);
  let _ = writeln!(out);
}
