//! Pure classification of decoded log records into feed items.

use super::record::{ContentBlock, LogRecord, MessageRecord, Role, SessionRecord};
use super::types::{ActivityItem, ActivityKind};
use crate::patterns::RE_CRON_TRIGGER;
use serde_json::Value;

pub const ELLIPSIS: &str = "...";

const SUMMARY_LIMIT: usize = 80;
const DETAILS_LIMIT: usize = 200;
const TOOL_INPUT_LIMIT: usize = 150;
const TOOL_RESULT_LIMIT: usize = 60;
/// Assistant text at or below this many chars is filler ("Done.", "On it").
const MIN_ASSISTANT_TEXT: usize = 10;

/// Where a record came from, used to stamp ids and fill gaps.
#[derive(Debug, Clone)]
pub struct RecordContext<'a> {
    pub session_id: &'a str,
    /// Record id, or a `line-N` stand-in when the record has none
    pub record_key: &'a str,
    /// Used when the record carries no timestamp of its own
    pub fallback_timestamp: &'a str,
    pub include_thinking: bool,
}

impl RecordContext<'_> {
    fn base_id(&self) -> String {
        format!("{}:{}", self.session_id, self.record_key)
    }

    fn item(
        &self,
        id: String,
        timestamp: &str,
        kind: ActivityKind,
        summary: String,
        details: Option<String>,
    ) -> ActivityItem {
        ActivityItem {
            id,
            timestamp: timestamp.to_string(),
            kind,
            summary,
            session_id: self.session_id.to_string(),
            details,
            relative_time: None,
        }
    }
}

/// Maps one record to the feed items it produces (possibly none).
pub fn classify_record(record: &LogRecord, ctx: &RecordContext<'_>) -> Vec<ActivityItem> {
    let timestamp = record.timestamp().unwrap_or(ctx.fallback_timestamp);
    match record {
        LogRecord::Session(session) => vec![classify_session(session, timestamp, ctx)],
        LogRecord::Message(message) => match message.role() {
            Some(Role::User) => classify_user(message, timestamp, ctx),
            Some(Role::Assistant) => classify_assistant(message, timestamp, ctx),
            _ => Vec::new(),
        },
        LogRecord::Unknown => Vec::new(),
    }
}

fn classify_session(
    session: &SessionRecord,
    timestamp: &str,
    ctx: &RecordContext<'_>,
) -> ActivityItem {
    ctx.item(
        ctx.base_id(),
        timestamp,
        ActivityKind::SessionStart,
        "Session started".to_string(),
        session.cwd.clone(),
    )
}

fn classify_user(
    message: &MessageRecord,
    timestamp: &str,
    ctx: &RecordContext<'_>,
) -> Vec<ActivityItem> {
    let blocks = message.blocks();
    let mut items = Vec::new();

    let text = match blocks.first() {
        Some(ContentBlock::Text { text }) => text.as_str(),
        _ => "",
    };

    if !text.trim().is_empty() {
        let summary = match RE_CRON_TRIGGER.captures(text) {
            Some(cap) => format!("Cron: {}", cap[1].trim()),
            None => truncate_with_ellipsis(text, SUMMARY_LIMIT),
        };
        items.push(ctx.item(
            ctx.base_id(),
            timestamp,
            ActivityKind::Message,
            summary,
            Some(truncate_chars(text, DETAILS_LIMIT)),
        ));
    }

    for (index, block) in blocks.iter().enumerate() {
        if let ContentBlock::ToolResult { content } = block {
            let result = result_text(content);
            items.push(ctx.item(
                format!("{}:result-{}", ctx.base_id(), index),
                timestamp,
                ActivityKind::ToolResult,
                format!(
                    "Tool result: {}",
                    truncate_with_ellipsis(&result, TOOL_RESULT_LIMIT)
                ),
                None,
            ));
        }
    }

    items
}

fn classify_assistant(
    message: &MessageRecord,
    timestamp: &str,
    ctx: &RecordContext<'_>,
) -> Vec<ActivityItem> {
    let mut items = Vec::new();

    for (index, block) in message.blocks().iter().enumerate() {
        match block {
            ContentBlock::ToolUse { name, input } => items.push(ctx.item(
                format!("{}:tool-{}", ctx.base_id(), index),
                timestamp,
                ActivityKind::ToolCall,
                format!("Tool: {}", name),
                Some(truncate_chars(&input.to_string(), TOOL_INPUT_LIMIT)),
            )),
            ContentBlock::Text { text } if text.chars().count() > MIN_ASSISTANT_TEXT => {
                items.push(ctx.item(
                    format!("{}:text-{}", ctx.base_id(), index),
                    timestamp,
                    ActivityKind::Message,
                    truncate_with_ellipsis(text, SUMMARY_LIMIT),
                    None,
                ))
            }
            ContentBlock::Thinking { thinking }
                if ctx.include_thinking && thinking.chars().count() > MIN_ASSISTANT_TEXT =>
            {
                items.push(ctx.item(
                    format!("{}:thinking-{}", ctx.base_id(), index),
                    timestamp,
                    ActivityKind::Thinking,
                    truncate_with_ellipsis(thinking, SUMMARY_LIMIT),
                    None,
                ))
            }
            _ => {}
        }
    }

    items
}

/// Tool results are usually strings; anything structured is shown as JSON.
fn result_text(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Cuts `text` to `limit` chars and appends [`ELLIPSIS`] if anything was cut.
pub fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Cuts `text` to `limit` chars with no marker.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
