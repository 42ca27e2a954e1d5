//! Structural discovery over the raw grid.
//!
//! Nothing in these sheets sits at fixed coordinates: timezone markers float
//! somewhere in the leading rows/columns, the time column may or may not be
//! the timezone column itself, and day headers are free text ("Mon",
//! "29-Sep", "Tue 30 Sep") or missing entirely. Discovery is a pure scan
//! over bounded windows that returns whatever structure it can find plus
//! issues; it never fails.

use chrono::{Days, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use phf::phf_set;
use regex::Regex;

use super::clock;
use crate::grid::RawGrid;

/// Closed set of recognized timezone labels. These are display labels from
/// the grid, not offsets; no clock conversion happens anywhere.
static TIMEZONE_LABELS: phf::Set<&'static str> = phf_set! { "WAT", "CAT", "EAT" };

/// Leading columns scanned for timezone markers and time data.
const LEAD_SCAN_COLS: usize = 5;
/// Leading rows scanned for timezone markers.
const TZ_SCAN_ROWS: usize = 10;
/// Leading rows scanned when probing a column for time labels.
const TIME_SCAN_ROWS: usize = 20;
/// Leading rows scanned for day headers.
const HEADER_SCAN_ROWS: usize = 5;
/// Body window (start row, end row) probed for program content when a
/// column has no recognizable header.
const BODY_SCAN_ROWS: (usize, usize) = (3, 20);

const MONTH_ABBREVS: [(&str, u32); 12] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

const WEEKDAY_ABBREVS: [(&str, Weekday); 7] = [
    ("Mon", Weekday::Mon),
    ("Tue", Weekday::Tue),
    ("Wed", Weekday::Wed),
    ("Thu", Weekday::Thu),
    ("Fri", Weekday::Fri),
    ("Sat", Weekday::Sat),
    ("Sun", Weekday::Sun),
];

static DAY_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,2})\b").unwrap());
static DAY_DASH_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})-([a-z]{3})").unwrap());

/// A timezone marker located in the leading window, with the column holding
/// its time labels (None when no time-bearing column was found).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneColumn {
    pub label: String,
    pub col: usize,
    pub time_col: Option<usize>,
}

/// A discovered day column. `date` is resolved (explicit or anchor-derived)
/// where possible; a None date drops the column's cells later with an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayColumn {
    pub weekday: Option<Weekday>,
    pub date: Option<NaiveDate>,
    pub col: usize,
}

/// Everything structural discovery found, plus diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub timezone_cols: Vec<TimezoneColumn>,
    pub day_columns: Vec<DayColumn>,
    pub issues: Vec<String>,
}

/// Scan the grid for timezone columns, their time columns, and day columns
/// with resolved dates. `header_year` resolves headers like "29-Sep" that
/// carry no year.
pub fn discover(grid: &RawGrid, header_year: i32) -> Discovery {
    let mut discovery = Discovery::default();

    // Timezone markers in the leading window; one label per column.
    for col in 0..grid.col_count().min(LEAD_SCAN_COLS) {
        for row in 0..grid.row_count().min(TZ_SCAN_ROWS) {
            let label = grid.cell(row, col).to_text().trim().to_ascii_uppercase();
            if TIMEZONE_LABELS.contains(label.as_str()) {
                let time_col = resolve_time_col(grid, col);
                if time_col.is_none() {
                    discovery
                        .issues
                        .push(format!("No time column found for {label}"));
                }
                discovery.timezone_cols.push(TimezoneColumn {
                    label,
                    col,
                    time_col,
                });
                break;
            }
        }
    }

    if discovery.timezone_cols.is_empty() {
        discovery
            .issues
            .push("No timezone columns (WAT/CAT/EAT) found".to_string());
        return discovery;
    }

    // Day columns start after the last timezone column.
    let start_col = discovery
        .timezone_cols
        .iter()
        .map(|tz| tz.col)
        .max()
        .unwrap_or(0)
        + 1;
    for col in start_col..grid.col_count() {
        if let Some(day) = probe_day_column(grid, col, header_year, &discovery.day_columns) {
            discovery.day_columns.push(day);
        }
    }

    resolve_dates(&mut discovery.day_columns);
    discovery
}

/// Weekday abbreviation used in headers and output ("Mon".."Sun").
pub(crate) fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Prefer the timezone's own column when it carries time labels; otherwise
/// the first leading column that does.
fn resolve_time_col(grid: &RawGrid, tz_col: usize) -> Option<usize> {
    if column_has_times(grid, tz_col) {
        return Some(tz_col);
    }
    (0..grid.col_count().min(LEAD_SCAN_COLS)).find(|&col| column_has_times(grid, col))
}

fn column_has_times(grid: &RawGrid, col: usize) -> bool {
    (0..grid.row_count().min(TIME_SCAN_ROWS))
        .any(|row| clock::normalize_time(grid.cell(row, col)).is_some())
}

/// Decide whether `col` is a day column: an explicit header wins; failing
/// that, a column whose body rows hold program-looking content is accepted
/// with a weekday inferred by cyclic advance from the previous day column
/// (multi-week grids wrap Sun back to Mon). The very first inferred column
/// defaults to Monday.
fn probe_day_column(
    grid: &RawGrid,
    col: usize,
    header_year: i32,
    prior: &[DayColumn],
) -> Option<DayColumn> {
    let mut weekday = None;
    let mut date = None;
    for row in 0..grid.row_count().min(HEADER_SCAN_ROWS) {
        let text = grid.cell(row, col).to_text();
        if let Some(found) = extract_weekday(&text) {
            weekday = Some(found);
        }
        if let Some(found) = parse_header_date(&text, header_year) {
            date = Some(found);
        }
    }
    if weekday.is_some() || date.is_some() {
        return Some(DayColumn { weekday, date, col });
    }

    let (body_start, body_end) = BODY_SCAN_ROWS;
    let has_content = (body_start..grid.row_count().min(body_end)).any(|row| {
        let cell = grid.cell(row, col);
        let text = cell.to_text();
        !clock::is_empty_slot(&text) && clock::normalize_time(cell).is_none()
    });
    if !has_content {
        return None;
    }

    let inferred = match prior.last() {
        Some(last) => last.weekday.map(|weekday| weekday.succ())?,
        None => Weekday::Mon,
    };
    Some(DayColumn {
        weekday: Some(inferred),
        date: None,
        col,
    })
}

/// Extract a weekday abbreviation from header text.
fn extract_weekday(text: &str) -> Option<Weekday> {
    WEEKDAY_ABBREVS
        .iter()
        .find(|(abbr, _)| text.contains(abbr))
        .map(|&(_, weekday)| weekday)
}

/// Parse a date out of header text: a month name plus a day number, or the
/// compact "D-Mon" form ("29-Sep"). The year is supplied by the caller.
fn parse_header_date(text: &str, year: i32) -> Option<NaiveDate> {
    let text = text.to_lowercase();
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut month = MONTH_ABBREVS
        .iter()
        .find(|(name, _)| text.contains(name))
        .map(|&(_, number)| number);
    let mut day: Option<u32> = DAY_NUMBER
        .captures(text)
        .and_then(|caps| caps[1].parse().ok());

    if month.is_none() {
        if let Some(caps) = DAY_DASH_MONTH.captures(text) {
            day = caps[1].parse().ok();
            month = MONTH_ABBREVS
                .iter()
                .find(|(name, _)| *name == &caps[2])
                .map(|&(_, number)| number);
        }
    }

    NaiveDate::from_ymd_opt(year, month?, day?)
}

/// Fill in missing dates from the first explicitly dated column (the anchor),
/// offset by positional distance in calendar days. Weekday labels do not
/// participate in the arithmetic, so a mislabeled weekday cannot skew dates.
fn resolve_dates(days: &mut [DayColumn]) {
    let anchor = days
        .iter()
        .enumerate()
        .find_map(|(idx, day)| day.date.map(|date| (idx, date)));
    let Some((anchor_idx, anchor_date)) = anchor else {
        return;
    };
    for (idx, day) in days.iter_mut().enumerate() {
        if day.date.is_some() || day.weekday.is_none() {
            continue;
        }
        day.date = if idx >= anchor_idx {
            anchor_date.checked_add_days(Days::new((idx - anchor_idx) as u64))
        } else {
            anchor_date.checked_sub_days(Days::new((anchor_idx - idx) as u64))
        };
    }
}
