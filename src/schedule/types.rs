//! Common types for schedule conversion.

use serde::Serialize;

/// Structured fields parsed out of one free-text program cell.
///
/// Invariant: `season` and `episode` are both present or both absent. A cell
/// carrying only one of the two tokens is treated as carrying neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedProgram {
    /// Show title; empty for blank input, never absent.
    pub title: String,
    /// Season number, normalized (no leading zeros).
    pub season: Option<String>,
    /// Episode number, normalized (no leading zeros).
    pub episode: Option<String>,
    /// Subtitle from a trailing parenthetical or a colon split.
    pub subtitle: Option<String>,
}

/// One program airing extracted from a (time-row, day-column) cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramCell {
    /// Canonical "HH:MM" start time.
    pub start: String,
    /// Canonical "HH:MM" end time; may wrap past midnight by value only.
    pub end: String,
    /// Raw cell text, trimmed but otherwise unparsed.
    pub text: String,
    /// 0-based source row index of the cell's merge anchor.
    pub row: usize,
}

/// One day column of a timezone block, with its resolved calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    /// Weekday abbreviation ("Mon".."Sun"); empty when the header carried
    /// only a date.
    pub weekday: String,
    /// Resolved ISO 8601 date (YYYY-MM-DD).
    pub iso: String,
    /// Program cells for this day, in source-row order.
    pub cells: Vec<ProgramCell>,
}

/// All days and program cells associated with one timezone label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneBlock {
    /// Timezone label from the closed set (e.g. "WAT").
    pub tz: String,
    /// Day columns in grid order.
    pub days: Vec<DaySchedule>,
}

/// Result of one grid parse: discovered structure plus diagnostics.
///
/// Issues never abort a parse; they accumulate alongside whatever structure
/// was successfully discovered. The worst outcome for a well-formed grid is
/// empty blocks with a non-empty issues list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedGrid {
    pub timezone_blocks: Vec<TimezoneBlock>,
    pub issues: Vec<String>,
}

/// One flat output record; the externally visible unit.
///
/// Serde field names reproduce the downstream sheet's column headers, so a
/// serde-based exporter writes the expected header row without remapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    #[serde(rename = "Region")]
    pub region: String,
    /// ISO 8601 date (YYYY-MM-DD).
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "Title")]
    pub title: String,
    /// Season number or empty string.
    #[serde(rename = "Season")]
    pub season: String,
    /// Episode number or empty string.
    #[serde(rename = "Episode")]
    pub episode: String,
    #[serde(rename = "Subtitle")]
    pub subtitle: String,
    #[serde(rename = "Text Color")]
    pub text_color: String,
    #[serde(rename = "BG Color")]
    pub bg_color: String,
    #[serde(rename = "Timezone")]
    pub timezone: String,
}

/// Caller-supplied conversion configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Region code stamped onto every output row.
    pub region: String,
    /// Explicit timezone sort order; labels absent from this list sort after
    /// all listed ones.
    pub timezone_order: Vec<String>,
    /// Default text color for output rows (typically a hex color).
    pub text_color: String,
    /// Default background color for output rows.
    pub bg_color: String,
    /// Legacy option from before merge spans drove durations. Accepted for
    /// interface stability; durations already come from merge spans, so this
    /// is a no-op.
    pub merge_slots: bool,
    /// Year used to resolve day headers like "29-Sep" that carry no year.
    /// Defaults to the current UTC year when unset.
    pub header_year: Option<i32>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            region: String::new(),
            timezone_order: vec!["WAT".to_string(), "CAT".to_string()],
            text_color: "#000000".to_string(),
            bg_color: "#FFFFFF".to_string(),
            merge_slots: false,
            header_year: None,
        }
    }
}
