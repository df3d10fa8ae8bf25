//! Merges session logs into one time-ordered feed.

use super::classify::{classify_record, RecordContext};
use super::record::LogRecord;
use super::source::{is_lock_file, LogFile, LogSource};
use super::types::ActivityItem;
use crate::error::Result;
use crate::relative::parse_rfc3339;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

pub const DEFAULT_MAX_FILES: usize = 10;
pub const DEFAULT_MAX_ITEMS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Most recently modified logs to scan
    pub max_files: usize,
    /// Cap on the merged feed
    pub max_items: usize,
    pub include_thinking: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_items: DEFAULT_MAX_ITEMS,
            include_thinking: false,
        }
    }
}

/// Builds the activity feed from `source`.
///
/// Only a failure to enumerate the source is returned as an error. Unreadable
/// files and malformed lines are skipped.
pub fn aggregate(source: &dyn LogSource, options: &AggregateOptions) -> Result<Vec<ActivityItem>> {
    let files = select_files(source.list_files()?, options.max_files);

    let mut items = Vec::new();
    for file in &files {
        match source.read_file(file) {
            Ok(body) => items.extend(parse_log(&body, file, options)),
            Err(err) => {
                debug!(file = %file.name, error = %err, "Skipping unreadable session log");
            }
        }
    }

    let mut ranked = rank(items);
    ranked.truncate(options.max_items);
    Ok(ranked)
}

/// Drops lock sentinels and keeps the `max_files` most recently modified logs,
/// newest first.
pub fn select_files(mut files: Vec<LogFile>, max_files: usize) -> Vec<LogFile> {
    files.retain(|file| !is_lock_file(&file.name));
    files.sort_by(|a, b| b.modified.cmp(&a.modified));
    files.truncate(max_files);
    files
}

/// Classifies every decodable line of one log body.
pub fn parse_log(body: &str, file: &LogFile, options: &AggregateOptions) -> Vec<ActivityItem> {
    let fallback_timestamp =
        DateTime::<Utc>::from(file.modified).to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut items = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record: LogRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        let line_key = format!("line-{}", index + 1);
        let ctx = RecordContext {
            session_id: &file.session_id,
            record_key: record.id().unwrap_or(line_key.as_str()),
            fallback_timestamp: &fallback_timestamp,
            include_thinking: options.include_thinking,
        };
        items.extend(classify_record(&record, &ctx));
    }

    if skipped > 0 {
        debug!(file = %file.name, skipped, "Skipped malformed session log lines");
    }

    items
}

/// Stable sort, newest first. Items whose timestamp doesn't parse go last;
/// ties keep their input order (file recency, then line order).
fn rank(items: Vec<ActivityItem>) -> Vec<ActivityItem> {
    let mut keyed: Vec<_> = items
        .into_iter()
        .map(|item| (parse_rfc3339(&item.timestamp), item))
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.into_iter().map(|(_, item)| item).collect()
}
