//! Read-only projections of a job for the cron list and the calendar.
//!
//! Both are recomputed per request from the descriptor; they share no state.

use super::calendar::CronPlacement;
use super::color::{color_for, JobColor};
use super::format::human_schedule;
use super::job::{JobDescriptor, Schedule, ScheduleKind};
use crate::relative::{from_epoch_ms, relative_time};
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Clock and zone used for every time label in one response.
#[derive(Debug, Clone, Copy)]
pub struct DisplayContext {
    pub now: DateTime<Utc>,
    pub timezone: Tz,
}

impl DisplayContext {
    pub fn new(timezone: Tz) -> Self {
        Self {
            now: Utc::now(),
            timezone,
        }
    }

    pub fn at(now: DateTime<Utc>, timezone: Tz) -> Self {
        Self { now, timezone }
    }

    fn relative(&self, ms: Option<i64>) -> Option<String> {
        ms.and_then(from_epoch_ms)
            .map(|instant| relative_time(instant, self.now, self.timezone))
    }
}

/// Row in the cron job list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedJob {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
    /// Human-readable schedule
    pub schedule: String,
    pub kind: ScheduleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub every_ms: Option<i64>,
    /// ISO 8601, null when the scheduler hasn't planned a run
    pub next_run: Option<String>,
    pub last_run: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run_relative: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_relative: Option<String>,
    pub last_status: Option<String>,
    pub last_duration_ms: Option<i64>,
    pub consecutive_errors: u32,
    pub last_error: Option<String>,
    pub is_one_time: bool,
    pub delivery_mode: Option<String>,
    pub delivery_channel: Option<String>,
}

/// Entry on the weekly calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarJob {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub color: JobColor,
    pub schedule: String,
    pub kind: ScheduleKind,
    /// Days of week this job lands on, 0 = Sunday. Empty for non-cron jobs.
    pub days: Vec<u8>,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    /// Epoch milliseconds
    pub next_run_at_ms: Option<i64>,
    pub last_run_at_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run_relative: Option<String>,
    pub last_status: Option<String>,
    pub is_one_time: bool,
}

fn iso_from_ms(ms: Option<i64>) -> Option<String> {
    ms.and_then(from_epoch_ms)
        .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn normalize(job: &JobDescriptor, ctx: &DisplayContext) -> FormattedJob {
    let (expr, timezone, every_ms) = match &job.schedule {
        Schedule::Cron { expr, tz } => (Some(expr.clone()), tz.clone(), None),
        Schedule::Every { every_ms } => (None, None, Some(*every_ms)),
        Schedule::At { .. } | Schedule::Unknown => (None, None, None),
    };
    let state = job.state.clone().unwrap_or_default();
    let delivery = job.delivery.clone().unwrap_or_default();

    FormattedJob {
        id: job.id.clone(),
        name: job.name.clone(),
        description: job.description.clone(),
        enabled: job.enabled,
        schedule: human_schedule(&job.schedule, ctx.timezone),
        kind: job.schedule.kind(),
        expr,
        timezone,
        every_ms,
        next_run: iso_from_ms(state.next_run_at_ms),
        last_run: iso_from_ms(state.last_run_at_ms),
        next_run_relative: ctx.relative(state.next_run_at_ms),
        last_run_relative: ctx.relative(state.last_run_at_ms),
        last_status: state.last_status,
        last_duration_ms: state.last_duration_ms,
        consecutive_errors: state.consecutive_errors.unwrap_or(0),
        last_error: state.last_error,
        is_one_time: job.is_one_time(),
        delivery_mode: delivery.mode,
        delivery_channel: delivery.channel,
    }
}

pub fn normalize_for_calendar(job: &JobDescriptor, ctx: &DisplayContext) -> CalendarJob {
    let placement = match &job.schedule {
        Schedule::Cron { expr, .. } => CronPlacement::from_expr(expr),
        _ => CronPlacement::default(),
    };

    CalendarJob {
        id: job.id.clone(),
        name: job.name.clone(),
        enabled: job.enabled,
        color: color_for(&job.name),
        schedule: human_schedule(&job.schedule, ctx.timezone),
        kind: job.schedule.kind(),
        days: placement.days,
        hour: placement.hour,
        minute: placement.minute,
        next_run_at_ms: job.next_run_at_ms(),
        last_run_at_ms: job.last_run_at_ms(),
        next_run_relative: ctx.relative(job.next_run_at_ms()),
        last_status: job.state.as_ref().and_then(|s| s.last_status.clone()),
        is_one_time: job.is_one_time(),
    }
}
