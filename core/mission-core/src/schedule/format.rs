//! Human-readable schedule strings and listing order.

use super::job::{JobDescriptor, Schedule};
use crate::relative::{localized_timestamp, parse_rfc3339};
use chrono_tz::Tz;
use std::cmp::Ordering;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

/// "0 9 * * 1-5 (America/New_York)", "Every 2h", "Every 30m", "At Oct 3, 2026, 9:00 AM".
pub fn human_schedule(schedule: &Schedule, tz: Tz) -> String {
    match schedule {
        Schedule::Cron { expr, tz: Some(zone) } => format!("{} ({})", expr, zone),
        Schedule::Cron { expr, tz: None } => expr.clone(),
        Schedule::Every { every_ms } => format_interval(*every_ms),
        Schedule::At { at } => match parse_rfc3339(at) {
            Some(instant) => format!("At {}", localized_timestamp(instant, tz)),
            None => format!("At {}", at),
        },
        Schedule::Unknown => "Unknown".to_string(),
    }
}

fn format_interval(every_ms: i64) -> String {
    if every_ms >= HOUR_MS && every_ms % HOUR_MS == 0 {
        format!("Every {}h", every_ms / HOUR_MS)
    } else {
        let minutes = (every_ms as f64 / MINUTE_MS as f64).round() as i64;
        format!("Every {}m", minutes)
    }
}

/// Enabled jobs first, then soonest next run. Jobs with no next run go after
/// those that have one within the same group.
pub fn listing_order(a: &JobDescriptor, b: &JobDescriptor) -> Ordering {
    b.enabled
        .cmp(&a.enabled)
        .then_with(|| match (a.next_run_at_ms(), b.next_run_at_ms()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Stable sort by [`listing_order`].
pub fn sort_jobs(jobs: &mut [JobDescriptor]) {
    jobs.sort_by(listing_order);
}
