//! Weekly-grid placement for cron jobs.
//!
//! Only the minute, hour and day-of-week fields matter for the grid. Fields we
//! can't place (steps, names) are treated as "no match" rather than guessed.

use crate::patterns::{RE_CRON_RANGE, RE_CRON_VALUE, RE_LEADING_INT};

/// Grid coordinates decomposed from a cron expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CronPlacement {
    /// 0 = Sunday .. 6 = Saturday
    pub days: Vec<u8>,
    /// `None` when the field is `*` or unparseable
    pub hour: Option<u8>,
    pub minute: Option<u8>,
}

impl CronPlacement {
    pub fn from_expr(expr: &str) -> Self {
        let fields: Vec<&str> = expr.split_whitespace().collect();
        let dow = fields.get(4).copied();
        Self {
            days: (0..=6).filter(|day| matches_day(dow, *day)).collect(),
            hour: time_field(fields.get(1).copied()),
            minute: time_field(fields.first().copied()),
        }
    }
}

/// Whether day `day` (0 = Sunday) is covered by a day-of-week field.
///
/// `*` or a missing field covers every day. Otherwise the field is a comma
/// list of single values and inclusive `a-b` ranges; `7` also means Sunday.
pub fn matches_day(field: Option<&str>, day: u8) -> bool {
    let field = match field.map(str::trim) {
        None | Some("") | Some("*") => return true,
        Some(field) => field,
    };

    field.split(',').any(|part| part_matches(part.trim(), day))
}

fn part_matches(part: &str, day: u8) -> bool {
    if let Some(cap) = RE_CRON_RANGE.captures(part) {
        let (Ok(start), Ok(end)) = (cap[1].parse::<u32>(), cap[2].parse::<u32>()) else {
            return false;
        };
        return start <= end && (start..=end.min(7)).any(|value| normalize_day(value) == day as u32);
    }

    if RE_CRON_VALUE.is_match(part) {
        return part
            .parse::<u32>()
            .map(|value| normalize_day(value) == day as u32)
            .unwrap_or(false);
    }

    false
}

fn normalize_day(value: u32) -> u32 {
    if value == 7 {
        0
    } else {
        value
    }
}

/// Hour/minute field value for placement. `*` is unspecified, not zero.
/// Lists and ranges place at their first value (`"0,30"` → 0).
pub fn time_field(field: Option<&str>) -> Option<u8> {
    let field = field?.trim();
    if field == "*" {
        return None;
    }
    RE_LEADING_INT
        .captures(field)
        .and_then(|cap| cap[1].parse::<u8>().ok())
}
