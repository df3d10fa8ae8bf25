//! Activity feed built from agent session logs.
//!
//! The pipeline is split at the "tolerant of garbage" boundary:
//!
//! - `record`: decodes one JSONL line into a typed [`LogRecord`] or fails.
//! - `classify`: pure mapping from a decoded record to zero or more [`ActivityItem`]s.
//! - `aggregate`: picks the most recent files, swallows per-line and per-file
//!   noise, then merges and ranks the feed.
//! - `source`: the [`LogSource`] seam (filesystem or in-memory).
//! - `filter`: request-level narrowing of a finished feed.

mod aggregate;
mod classify;
mod filter;
mod record;
mod source;
mod types;

pub use aggregate::{aggregate, parse_log, select_files, AggregateOptions};
pub use classify::{
    classify_record, truncate_chars, truncate_with_ellipsis, RecordContext, ELLIPSIS,
};
pub use filter::ActivityFilter;
pub use record::{Content, ContentBlock, LogRecord, MessageRecord, Role, SessionRecord};
pub use source::{is_lock_file, DirLogSource, LogFile, LogSource, MemoryLogSource, LOCK_SUFFIX};
pub use types::{ActivityItem, ActivityKind};
