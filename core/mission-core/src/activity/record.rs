//! Typed decode of one session log line.
//!
//! Records are tagged on `type`. Anything we don't model decodes to
//! `Unknown` instead of failing, so only genuinely malformed lines are
//! rejected at this boundary.

use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    Session(SessionRecord),
    Message(MessageRecord),
    #[serde(other)]
    Unknown,
}

impl LogRecord {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Session(record) => record.id.as_deref(),
            Self::Message(record) => record.id.as_deref(),
            Self::Unknown => None,
        }
    }

    pub fn timestamp(&self) -> Option<&str> {
        match self {
            Self::Session(record) => record.timestamp.as_deref(),
            Self::Message(record) => record.timestamp.as_deref(),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Working directory the session started in
    #[serde(default)]
    pub cwd: Option<String>,
}

/// A conversation turn.
///
/// Some writers put `role`/`content` on the record itself, others nest them
/// under `message`. The nested form wins when both are present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub message: Option<MessageBody>,
}

impl MessageRecord {
    pub fn role(&self) -> Option<Role> {
        self.message
            .as_ref()
            .and_then(|body| body.role)
            .or(self.role)
    }

    pub fn blocks(&self) -> Cow<'_, [ContentBlock]> {
        self.message
            .as_ref()
            .and_then(|body| body.content.as_ref())
            .or(self.content.as_ref())
            .map(Content::blocks)
            .unwrap_or(Cow::Borrowed(&[]))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    #[serde(other)]
    Other,
}

/// Message content: either a bare string or a list of typed blocks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl Content {
    /// Views the content as blocks; a bare string becomes one text block.
    pub fn blocks(&self) -> Cow<'_, [ContentBlock]> {
        match self {
            Self::Text(text) => Cow::Owned(vec![ContentBlock::Text { text: text.clone() }]),
            Self::Blocks(blocks) => Cow::Borrowed(blocks.as_slice()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(rename = "tool_use", alias = "toolCall")]
    ToolUse {
        #[serde(default)]
        name: String,
        #[serde(default, alias = "arguments")]
        input: Value,
    },
    #[serde(rename = "tool_result", alias = "toolResult")]
    ToolResult {
        #[serde(default)]
        content: Value,
    },
    #[serde(rename = "thinking")]
    Thinking {
        #[serde(default)]
        thinking: String,
    },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_session_record() {
        let record: LogRecord = serde_json::from_str(
            r#"{"type":"session","id":"abc","timestamp":"2026-10-15T08:00:00Z","cwd":"/home/me"}"#,
        )
        .unwrap();
        match record {
            LogRecord::Session(session) => {
                assert_eq!(session.id.as_deref(), Some("abc"));
                assert_eq!(session.cwd.as_deref(), Some("/home/me"));
            }
            other => panic!("expected session, got {:?}", other),
        }
    }

    #[test]
    fn unknown_record_type_decodes_to_unknown() {
        let record: LogRecord =
            serde_json::from_str(r#"{"type":"model_change","provider":"x"}"#).unwrap();
        assert_eq!(record, LogRecord::Unknown);
        assert!(record.id().is_none());
    }

    #[test]
    fn missing_type_is_a_decode_error() {
        assert!(serde_json::from_str::<LogRecord>(r#"{"id":"x"}"#).is_err());
        assert!(serde_json::from_str::<LogRecord>("not json").is_err());
    }

    #[test]
    fn nested_message_body_wins_over_top_level() {
        let record: MessageRecord = serde_json::from_value(json!({
            "id": "m1",
            "role": "user",
            "content": "outer",
            "message": {
                "role": "assistant",
                "content": [{"type": "text", "text": "inner"}]
            }
        }))
        .unwrap();

        assert_eq!(record.role(), Some(Role::Assistant));
        assert_eq!(
            record.blocks().as_ref(),
            &[ContentBlock::Text {
                text: "inner".to_string()
            }]
        );
    }

    #[test]
    fn string_content_becomes_single_text_block() {
        let record: MessageRecord =
            serde_json::from_value(json!({"role": "user", "content": "hello"})).unwrap();
        assert_eq!(record.role(), Some(Role::User));
        assert_eq!(
            record.blocks().as_ref(),
            &[ContentBlock::Text {
                text: "hello".to_string()
            }]
        );
    }

    #[test]
    fn decodes_tool_blocks_and_aliases() {
        let blocks: Vec<ContentBlock> = serde_json::from_value(json!([
            {"type": "tool_use", "id": "t1", "name": "search_web", "input": {"q": "rust"}},
            {"type": "toolCall", "name": "read", "arguments": {"path": "/a"}},
            {"type": "tool_result", "tool_use_id": "t1", "content": "ok"},
            {"type": "image", "source": {}}
        ]))
        .unwrap();

        assert_eq!(
            blocks[0],
            ContentBlock::ToolUse {
                name: "search_web".to_string(),
                input: json!({"q": "rust"})
            }
        );
        assert_eq!(
            blocks[1],
            ContentBlock::ToolUse {
                name: "read".to_string(),
                input: json!({"path": "/a"})
            }
        );
        assert_eq!(blocks[2], ContentBlock::ToolResult { content: json!("ok") });
        assert_eq!(blocks[3], ContentBlock::Other);
    }

    #[test]
    fn unknown_role_is_other() {
        let record: MessageRecord =
            serde_json::from_value(json!({"role": "system", "content": "x"})).unwrap();
        assert_eq!(record.role(), Some(Role::Other));
    }
}
