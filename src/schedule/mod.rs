//! Schedule conversion: broadcast grid in, flat sorted rows out.
//!
//! The pipeline is three passes over one immutable [`RawGrid`]:
//! [`discover`](discover::discover) locates timezone/time/day columns,
//! [`duration`](duration::analyze) turns merge spans into timed program
//! cells, and [`assemble`](assemble::convert_to_rows) parses cell text and
//! applies the broadcast-day sort. Every pass degrades instead of failing:
//! structural problems become issue strings on the result.

pub mod assemble;
pub mod clock;
pub mod discover;
pub mod duration;
pub mod text;
pub mod types;

pub use assemble::convert_to_rows;
pub use text::parse_program_cell;
pub use types::{
    ConvertOptions, DaySchedule, OutputRow, ParsedGrid, ParsedProgram, ProgramCell,
    TimezoneBlock,
};

use chrono::Datelike;

use crate::grid::RawGrid;

/// Parse one decoded sheet into timezone blocks of timed program cells.
///
/// Never fails: a grid with no recognizable structure yields empty blocks and
/// a non-empty issues list.
pub fn parse_grid(grid: &RawGrid, options: &ConvertOptions) -> ParsedGrid {
    let mut parsed = ParsedGrid::default();

    if grid.row_count() == 0 {
        parsed.issues.push("Sheet is empty".to_string());
        return parsed;
    }

    let header_year = options
        .header_year
        .unwrap_or_else(|| chrono::Utc::now().year());
    let discovery = discover::discover(grid, header_year);
    parsed.issues.extend(discovery.issues);

    for tz in &discovery.timezone_cols {
        let Some(time_col) = tz.time_col else {
            // Already reported by discovery; the block is skipped whole.
            continue;
        };

        let labels: Vec<String> = (0..grid.row_count())
            .filter_map(|row| clock::normalize_time(grid.cell(row, time_col)))
            .collect();
        if labels.is_empty() {
            parsed
                .issues
                .push(format!("No time data found for {}", tz.label));
            continue;
        }
        let slot_minutes = duration::slot_duration(&labels);

        let mut days = Vec::new();
        for day in &discovery.day_columns {
            let weekday = day
                .weekday
                .map(discover::weekday_abbrev)
                .unwrap_or_default();
            let Some(date) = day.date else {
                parsed.issues.push(format!(
                    "Could not determine date for {} in {}",
                    if weekday.is_empty() { "day column" } else { weekday },
                    tz.label
                ));
                continue;
            };
            days.push(DaySchedule {
                weekday: weekday.to_string(),
                iso: date.format("%Y-%m-%d").to_string(),
                cells: duration::analyze(grid, time_col, day.col, slot_minutes),
            });
        }

        parsed.timezone_blocks.push(TimezoneBlock {
            tz: tz.label.clone(),
            days,
        });
    }

    parsed
}

/// Convert one grid end to end: parse, assemble, sort.
///
/// Returns the sorted rows together with every issue the parse accumulated.
/// This is the per-file unit a batch caller invokes; calls share no state and
/// may run concurrently.
pub fn convert(grid: &RawGrid, options: &ConvertOptions) -> (Vec<OutputRow>, Vec<String>) {
    let parsed = parse_grid(grid, options);
    let rows = convert_to_rows(&parsed, options);
    (rows, parsed.issues)
}
