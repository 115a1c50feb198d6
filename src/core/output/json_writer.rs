//! JSON archive writer.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::atomic::write_atomic;
use crate::error::Result;
use crate::event::MessageEvent;

/// One entry of a per-date archive file.
///
/// Field order is the order keys appear in the file.
#[derive(Debug, Serialize)]
struct ArchiveRecord<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    subtype: Option<&'static str>,
    user: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    inviter: Option<&'a str>,
    text: &'a str,
    timestamp: Option<i64>,
    date: &'a str,
}

impl<'a> ArchiveRecord<'a> {
    fn from_event(event: &'a MessageEvent) -> Self {
        Self {
            kind: "message",
            subtype: event.subtype.archive_name(),
            user: &event.user,
            inviter: event.inviter.as_deref(),
            text: &event.text,
            timestamp: event.timestamp,
            date: &event.date,
        }
    }
}

/// Converts events to a pretty-printed JSON array.
///
/// # Format
/// ```json
/// [
///   {
///     "type": "message",
///     "subtype": null,
///     "user": "Alice",
///     "text": "hello",
///     "timestamp": 1709618700,
///     "date": "2024-03-05"
///   }
/// ]
/// ```
pub fn to_json(events: &[&MessageEvent]) -> Result<String> {
    let records: Vec<ArchiveRecord<'_>> = events
        .iter()
        .map(|e| ArchiveRecord::from_event(e))
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Writes events as a JSON array, replacing the file atomically.
pub fn write_json(events: &[&MessageEvent], output_path: &Path) -> Result<()> {
    let json = to_json(events)?;
    write_atomic(output_path, &json)
}

/// Renders an arbitrary JSON value with the archive's pretty writer.
pub fn render_value(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
