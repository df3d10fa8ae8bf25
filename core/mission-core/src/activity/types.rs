//! Activity feed DTOs.
//! These are the wire shapes the dashboard consumes; prefer additive changes.

use serde::{Deserialize, Serialize};

/// Unified event taxonomy for the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Message,
    ToolCall,
    ToolResult,
    SessionStart,
    Thinking,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::ToolCall => "tool_call",
            Self::ToolResult => "tool_result",
            Self::SessionStart => "session_start",
            Self::Thinking => "thinking",
        }
    }

    /// Parses a wire name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "message" => Some(Self::Message),
            "tool_call" => Some(Self::ToolCall),
            "tool_result" => Some(Self::ToolResult),
            "session_start" => Some(Self::SessionStart),
            "thinking" => Some(Self::Thinking),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in the activity feed.
///
/// Synthesized fresh on every aggregation; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    /// Unique within one aggregation result
    pub id: String,
    /// ISO 8601 timestamp of the underlying record
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Display text, length-capped
    pub summary: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// "5m ago" style label, attached when a response is built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_time: Option<String>,
}
