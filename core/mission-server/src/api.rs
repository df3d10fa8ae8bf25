//! The three read paths, shared by the HTTP handlers and the CLI.
//!
//! Each call is synchronous and re-reads its collaborator. HTTP handlers run
//! these on the blocking pool.

use crate::state::AppState;
use chrono::{DateTime, Utc};
use mission_core::relative::parse_rfc3339;
use mission_core::{
    aggregate, calendar_jobs, list_jobs, time_ago, ActivityFilter, ActivityItem, CalendarJob,
    DisplayContext, FormattedJob, JobFilter, Result,
};

pub fn activity_feed(state: &AppState, filter: &ActivityFilter) -> Result<Vec<ActivityItem>> {
    let items = aggregate(state.logs.as_ref(), &state.options)?;
    Ok(with_relative_times(filter.apply(items), Utc::now(), state))
}

pub fn cron_jobs(state: &AppState, filter: &JobFilter) -> Result<Vec<FormattedJob>> {
    list_jobs(state.jobs.as_ref(), &DisplayContext::new(state.timezone), filter)
}

pub fn calendar(state: &AppState) -> Result<Vec<CalendarJob>> {
    calendar_jobs(state.jobs.as_ref(), &DisplayContext::new(state.timezone))
}

fn with_relative_times(
    items: Vec<ActivityItem>,
    now: DateTime<Utc>,
    state: &AppState,
) -> Vec<ActivityItem> {
    items
        .into_iter()
        .map(|mut item| {
            item.relative_time =
                parse_rfc3339(&item.timestamp).map(|ts| time_ago(ts, now, state.timezone));
            item
        })
        .collect()
}
