//! Compiled regex patterns for parsing session logs and cron fields.
//!
//! These patterns are compiled once on first use and reused throughout
//! the crate.
//! Update these when the scheduler's trigger prompt format changes.

use once_cell::sync::Lazy;
use regex::Regex;

// ═══════════════════════════════════════════════════════════════════════════════
// Session Log Regexes
// ═══════════════════════════════════════════════════════════════════════════════

/// Trigger prefix the scheduler writes into a cron-initiated user turn:
/// `[cron:<job-id> <job name>]`. Group 1 is the job name.
pub static RE_CRON_TRIGGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[cron:\S+\s+([^\]]+)\]").unwrap());

// ═══════════════════════════════════════════════════════════════════════════════
// Cron Field Regexes
// ═══════════════════════════════════════════════════════════════════════════════

pub static RE_CRON_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)-(\d+)$").unwrap());
pub static RE_CRON_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)$").unwrap());
pub static RE_LEADING_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)").unwrap());
