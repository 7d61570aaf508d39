//! Log record decomposition and rendering.
//!
//! Each CloudWatch event carries four metadata scalars (event id, log stream
//! name, ingestion time, timestamp) plus a message payload. For text output
//! the payload is printed verbatim; for YAML output it is decoded as a JSON
//! document, optionally pruned through the field projector, and serialized
//! together with whichever metadata attributes the selectors retained.

use anyhow::{Context, Result};
use aws_sdk_cloudwatchlogs::types::FilteredLogEvent;
use chrono::{DateTime, SecondsFormat};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::projection;

/// Selector prefix reserved for metadata attributes; these selectors are
/// consumed here and never reach the message-body projector.
const METADATA_PREFIX: &str = "metadata.";

/// One decoded log event, decoupled from the SDK's generated type.
#[derive(Debug, Clone, Default)]
pub struct LogRecord {
    pub event_id: Option<String>,
    pub log_stream_name: Option<String>,
    pub ingestion_time: Option<i64>,
    pub timestamp: Option<i64>,
    pub message: Option<String>,
}

impl From<FilteredLogEvent> for LogRecord {
    fn from(event: FilteredLogEvent) -> Self {
        Self {
            event_id: event.event_id,
            log_stream_name: event.log_stream_name,
            ingestion_time: event.ingestion_time,
            timestamp: event.timestamp,
            message: event.message,
        }
    }
}

/// YAML projection of a record. Metadata attributes cleared by selector
/// filtering are omitted from the output entirely.
#[derive(Debug, Serialize)]
struct YamlRecord {
    #[serde(rename = "event-id", skip_serializing_if = "Option::is_none")]
    event_id: Option<String>,
    #[serde(rename = "log-stream-name", skip_serializing_if = "Option::is_none")]
    log_stream_name: Option<String>,
    #[serde(rename = "ingestion-time", skip_serializing_if = "Option::is_none")]
    ingestion_time: Option<i64>,
    #[serde(rename = "timestamp", skip_serializing_if = "Option::is_none")]
    timestamp: Option<i64>,
    message: Map<String, Value>,
}

impl LogRecord {
    /// One-line text rendering: `<event id> : <RFC3339 timestamp> - <message>`.
    pub fn text_line(&self) -> String {
        let timestamp = self
            .timestamp
            .and_then(DateTime::from_timestamp_millis)
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} : {} - {}",
            self.event_id.as_deref().unwrap_or("-"),
            timestamp,
            self.message.as_deref().unwrap_or("")
        )
    }

    /// Render the record as one YAML document, preceded by the `---`
    /// separator so that concatenated records remain a parseable stream.
    ///
    /// The message payload must decode as a JSON object; a payload that does
    /// not is reported per record and the caller decides whether to skip or
    /// abort. With a non-empty selector list, `metadata.`-prefixed selectors
    /// choose which metadata attributes survive (the rest are cleared) and
    /// the remaining selectors prune the message body. An empty selector
    /// list keeps everything.
    pub fn to_yaml(&self, selectors: &[String]) -> Result<String> {
        let body: Map<String, Value> =
            serde_json::from_str(self.message.as_deref().unwrap_or("{}"))
                .context("log message is not a JSON document")?;

        let mut record = YamlRecord {
            event_id: self.event_id.clone(),
            log_stream_name: self.log_stream_name.clone(),
            ingestion_time: self.ingestion_time,
            timestamp: self.timestamp,
            message: body,
        };

        if !selectors.is_empty() {
            record.retain_selected_metadata(selectors);
            let body_selectors: Vec<String> = selectors
                .iter()
                .filter(|s| !s.starts_with(METADATA_PREFIX))
                .cloned()
                .collect();
            projection::project_fields(&mut record.message, &body_selectors);
        }

        let yaml = serde_yaml::to_string(&record).context("failed to serialize record as YAML")?;
        Ok(format!("---\n{yaml}"))
    }
}

impl YamlRecord {
    /// Apply the reserved-prefix convention: strip `metadata.` from matching
    /// selectors, lower-case the remainder, and keep only the metadata
    /// attributes the selector matcher finds in that list.
    fn retain_selected_metadata(&mut self, selectors: &[String]) {
        let metadata_selectors: Vec<String> = selectors
            .iter()
            .filter_map(|s| s.strip_prefix(METADATA_PREFIX))
            .map(str::to_lowercase)
            .collect();
        let metadata_selectors: Vec<&str> =
            metadata_selectors.iter().map(String::as_str).collect();

        if projection::select(&metadata_selectors, "event-id").is_none() {
            self.event_id = None;
        }
        if projection::select(&metadata_selectors, "log-stream-name").is_none() {
            self.log_stream_name = None;
        }
        if projection::select(&metadata_selectors, "ingestion-time").is_none() {
            self.ingestion_time = None;
        }
        if projection::select(&metadata_selectors, "timestamp").is_none() {
            self.timestamp = None;
        }
    }
}
