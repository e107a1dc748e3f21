use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

static TIME_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{1,2})(?::(\d{2}))?(am|pm)$").expect("time token pattern"));

// The dash that separates the two halves sits right after an am/pm marker and before a digit.
static RANGE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[ap]m(\s*-\s*)\d").expect("range separator pattern"));

static ZONE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*(et|est|edt)\s*$").expect("zone suffix pattern"));

/// A same-day window in minutes from local midnight, `start` inclusive and `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

impl TimeRange {
    pub fn contains(&self, minutes: u32) -> bool {
        minutes >= self.start && minutes < self.end
    }
}

/// Parse a single `H[:MM](am|pm)` token into minutes from midnight.
///
/// Returns `None` for any other shape, including hours outside 1-12 and minutes past 59.
pub fn parse_time_token(text: &str) -> Option<u32> {
    let caps = TIME_TOKEN.captures(text.trim())?;

    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }

    let is_pm = caps.get(3)?.as_str().eq_ignore_ascii_case("pm");
    let hour24 = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    Some(hour24 * 60 + minute)
}

/// Parse a posted hours string such as `"7am-10:30am ET"`.
///
/// "Closed", empty input, malformed halves and overnight ranges (`start >= end`)
/// all yield `None`: no information for the period.
pub fn parse_range(text: &str) -> Option<TimeRange> {
    let clean = ZONE_SUFFIX.replace(text.trim(), "");
    let clean = clean.trim();
    if clean.is_empty() || clean.eq_ignore_ascii_case("closed") {
        return None;
    }

    let Some(dash) = RANGE_SEPARATOR.captures(clean).and_then(|c| c.get(1)) else {
        debug!(input = %text, "Hours string has no range separator");
        return None;
    };

    let start = parse_time_token(&clean[..dash.start()]);
    let end = parse_time_token(&clean[dash.end()..]);
    match (start, end) {
        (Some(start), Some(end)) if start < end => Some(TimeRange { start, end }),
        (Some(start), Some(end)) => {
            debug!(input = %text, start, end, "Overnight hours range is not supported");
            None
        }
        _ => {
            debug!(input = %text, "Hours string has an invalid time token");
            None
        }
    }
}

/// Parse an optional column value; absent behaves like "Closed".
pub fn parse_optional_range(text: Option<&str>) -> Option<TimeRange> {
    text.and_then(parse_range)
}

/// Render minutes from midnight as `7am`, `7:30pm`, `12pm`.
pub fn format_minutes(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    let total_hour = minutes / 60;
    let minute = minutes % 60;
    let suffix = if total_hour >= 12 { "pm" } else { "am" };
    let hour12 = match total_hour % 12 {
        0 => 12,
        h => h,
    };

    if minute == 0 {
        format!("{}{}", hour12, suffix)
    } else {
        format!("{}:{:02}{}", hour12, minute, suffix)
    }
}
