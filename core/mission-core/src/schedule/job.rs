//! Job store document types, as written by the agent runtime's scheduler.
//!
//! The schedule is decoded leniently: a job whose schedule is missing its
//! meaningful field still loads and renders as "Unknown", so one odd entry
//! never hides the rest of the list.

use crate::relative::from_epoch_ms;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

/// Whole job store document: `{"jobs": [...]}`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct JobStoreDocument {
    #[serde(default)]
    pub jobs: Vec<JobDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default)]
    pub state: Option<JobState>,
    #[serde(default)]
    pub delivery: Option<Delivery>,
    #[serde(default)]
    pub delete_after_run: Option<bool>,
}

fn default_enabled() -> bool {
    true
}

impl JobDescriptor {
    pub fn next_run_at_ms(&self) -> Option<i64> {
        self.state.as_ref().and_then(|s| s.next_run_at_ms)
    }

    pub fn last_run_at_ms(&self) -> Option<i64> {
        self.state.as_ref().and_then(|s| s.last_run_at_ms)
    }

    /// Runs at most once: either an `at` schedule or a self-deleting job.
    pub fn is_one_time(&self) -> bool {
        matches!(self.schedule, Schedule::At { .. }) || self.delete_after_run == Some(true)
    }
}

/// Scheduler bookkeeping. Every field is optional; a job that has never run
/// has no state at all.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobState {
    #[serde(default)]
    pub next_run_at_ms: Option<i64>,
    #[serde(default)]
    pub last_run_at_ms: Option<i64>,
    #[serde(default)]
    pub last_status: Option<String>,
    #[serde(default)]
    pub last_duration_ms: Option<i64>,
    #[serde(default)]
    pub consecutive_errors: Option<u32>,
    #[serde(default)]
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Delivery {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
}

/// When a job runs. Exactly one shape applies, selected by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RawSchedule")]
pub enum Schedule {
    /// Five-field cron expression: `min hour dom month dow`
    Cron { expr: String, tz: Option<String> },
    /// Fixed interval
    Every { every_ms: i64 },
    /// One shot at an ISO 8601 instant
    At { at: String },
    #[default]
    Unknown,
}

impl Schedule {
    pub fn kind(&self) -> ScheduleKind {
        match self {
            Self::Cron { .. } => ScheduleKind::Cron,
            Self::Every { .. } => ScheduleKind::Every,
            Self::At { .. } => ScheduleKind::At,
            Self::Unknown => ScheduleKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleKind {
    Cron,
    Every,
    At,
    Unknown,
}

impl ScheduleKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cron" => Some(Self::Cron),
            "every" => Some(Self::Every),
            "at" => Some(Self::At),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Wire shape before the kind is resolved.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchedule {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default, alias = "cron")]
    expr: Option<String>,
    #[serde(default, alias = "timezone")]
    tz: Option<String>,
    #[serde(default)]
    every_ms: Option<i64>,
    #[serde(default)]
    at: Option<String>,
    #[serde(default)]
    at_ms: Option<i64>,
}

impl From<RawSchedule> for Schedule {
    fn from(raw: RawSchedule) -> Self {
        match raw.kind.as_deref() {
            Some("cron") => match raw.expr {
                Some(expr) if !expr.trim().is_empty() => Schedule::Cron {
                    expr: expr.trim().to_string(),
                    tz: raw.tz.filter(|tz| !tz.trim().is_empty()),
                },
                _ => Schedule::Unknown,
            },
            Some("every") => match raw.every_ms {
                Some(every_ms) if every_ms > 0 => Schedule::Every { every_ms },
                _ => Schedule::Unknown,
            },
            Some("at") => {
                let at = raw.at.or_else(|| {
                    raw.at_ms
                        .and_then(from_epoch_ms)
                        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
                });
                match at {
                    Some(at) => Schedule::At { at },
                    None => Schedule::Unknown,
                }
            }
            _ => Schedule::Unknown,
        }
    }
}
