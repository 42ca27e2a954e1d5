//! Time-label utilities over canonical "HH:MM" strings.
//!
//! No time zone conversion happens anywhere in this crate; "timezone" is a
//! display label carried through from the grid. A value that fails to
//! normalize is "not a time cell", never an error.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::grid::CellValue;

/// Direct `H:MM[:SS][ AM|PM]` time-label pattern.
static TIME_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{1,2}):(\d{2})(?::(\d{2}))?(?:\s*(AM|PM))?$").unwrap()
});

/// Fallback formats tried when a string is not a plain time label.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Normalize a cell value to a canonical 24-hour "HH:MM" label.
///
/// Returns `None` when the cell does not hold a recognizable time.
pub fn normalize_time(value: &CellValue) -> Option<String> {
    match value {
        CellValue::Empty => None,
        CellValue::DateTime(dt) => Some(hhmm(dt.hour(), dt.minute())),
        CellValue::Text(s) => normalize_time_str(s),
    }
}

/// Normalize a string to "HH:MM".
///
/// Recognition order: a direct `H:MM[:SS][ AM|PM]` pattern (hours 0-23, or
/// 1-12 with a meridiem; 12 AM maps to 00, 12 PM stays 12), then general
/// date-time parsing as a fallback.
pub fn normalize_time_str(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = TIME_LABEL.captures(s) {
        let mut hours: u32 = caps[1].parse().ok()?;
        let minutes: u32 = caps[2].parse().ok()?;
        match caps.get(4).map(|m| m.as_str().to_ascii_uppercase()) {
            Some(m) if m == "PM" && hours < 12 => hours += 12,
            Some(m) if m == "AM" && hours == 12 => hours = 0,
            _ => {}
        }
        if hours <= 23 && minutes <= 59 {
            return Some(hhmm(hours, minutes));
        }
        return None;
    }

    // Not a plain label; try full date-time forms.
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(hhmm(dt.hour(), dt.minute()));
        }
    }
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
        return Some(hhmm(t.hour(), t.minute()));
    }
    None
}

/// Add minutes to an "HH:MM" label with modulo-1440 wraparound.
///
/// Negative and >1440 offsets wrap correctly. A label that does not parse is
/// returned unchanged.
pub fn add_minutes(time: &str, minutes: i32) -> String {
    let Some(total) = minutes_of(time) else {
        return time.to_string();
    };
    let wrapped = (total as i32 + minutes).rem_euclid(24 * 60) as u32;
    hhmm(wrapped / 60, wrapped % 60)
}

/// Minutes since midnight for an "H:MM"/"HH:MM" label.
pub fn minutes_of(time: &str) -> Option<u32> {
    let (h, m) = time.split_once(':')?;
    let hours: u32 = h.trim().parse().ok()?;
    let minutes: u32 = m.trim().parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Check whether two cell texts name the exact same show.
///
/// Comparison is case-insensitive with collapsed whitespace. Season/episode
/// tokens are kept, so different episodes of one show never compare equal.
pub fn same_show(a: &str, b: &str) -> bool {
    if a.trim().is_empty() || b.trim().is_empty() {
        return false;
    }
    normalize_show(a) == normalize_show(b)
}

fn normalize_show(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if a cell text is an empty/blank program slot.
///
/// Placeholder markers (em dash, hyphen, en dash) conventionally mean
/// "no program" and are distinct from an empty string only visually.
pub fn is_empty_slot(text: &str) -> bool {
    matches!(text.trim(), "" | "\u{2014}" | "-" | "\u{2013}")
}

fn hhmm(hours: u32, minutes: u32) -> String {
    format!("{hours:02}:{minutes:02}")
}
