//! Flatten parsed blocks into output rows and apply the broadcast-day sort.

use super::clock;
use super::text;
use super::types::{ConvertOptions, OutputRow, ParsedGrid};

/// Broadcast day boundary hour assumed when no rows exist to infer one from.
const DEFAULT_BOUNDARY_HOUR: u32 = 5;

/// Convert a parsed grid into flat, sorted output rows.
///
/// One row per program cell, carrying the caller's region and colors plus
/// the block's timezone label. The sort is stable over four keys: calendar
/// date, broadcast-day-adjusted start time, timezone rank from
/// `options.timezone_order`, and title.
pub fn convert_to_rows(parsed: &ParsedGrid, options: &ConvertOptions) -> Vec<OutputRow> {
    let mut rows = Vec::new();

    for block in &parsed.timezone_blocks {
        for day in &block.days {
            for cell in &day.cells {
                if clock::is_empty_slot(&cell.text) {
                    continue;
                }
                let program = text::parse_program_cell(&cell.text);
                rows.push(OutputRow {
                    region: options.region.clone(),
                    date: day.iso.clone(),
                    start_time: cell.start.clone(),
                    end_time: cell.end.clone(),
                    title: program.title,
                    season: program.season.unwrap_or_default(),
                    episode: program.episode.unwrap_or_default(),
                    subtitle: program.subtitle.unwrap_or_default(),
                    text_color: options.text_color.clone(),
                    bg_color: options.bg_color.clone(),
                    timezone: block.tz.clone(),
                });
            }
        }
    }

    // The first emitted row anchors the broadcast day boundary: a grid whose
    // listing starts at 05:00 sorts its 04:xx slots after the 23:xx slots of
    // the same nominal date. Heuristic, order-dependent, and deliberate.
    let boundary_hour = rows
        .first()
        .and_then(|row| start_hour(&row.start_time))
        .unwrap_or(DEFAULT_BOUNDARY_HOUR);

    let order = &options.timezone_order;
    rows.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| {
                sort_minutes(&a.start_time, boundary_hour)
                    .cmp(&sort_minutes(&b.start_time, boundary_hour))
            })
            .then_with(|| tz_rank(order, &a.timezone).cmp(&tz_rank(order, &b.timezone)))
            .then_with(|| a.title.cmp(&b.title))
    });
    rows
}

fn start_hour(time: &str) -> Option<u32> {
    time.split(':').next()?.trim().parse().ok()
}

/// Start time as minutes for ordering; times before the boundary hour shift
/// a day later so they land after the late-night slots. Display values are
/// never touched.
fn sort_minutes(time: &str, boundary_hour: u32) -> u32 {
    let Some(minutes) = clock::minutes_of(time) else {
        return 0;
    };
    if minutes / 60 < boundary_hour {
        minutes + 24 * 60
    } else {
        minutes
    }
}

/// Rank within the caller's explicit timezone ordering; unlisted labels sort
/// after all listed ones.
fn tz_rank(order: &[String], tz: &str) -> usize {
    order.iter().position(|label| label == tz).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::{DaySchedule, ProgramCell, TimezoneBlock};

    fn cell(start: &str, end: &str, text: &str, row: usize) -> ProgramCell {
        ProgramCell {
            start: start.to_string(),
            end: end.to_string(),
            text: text.to_string(),
            row,
        }
    }

    fn one_day_block(tz: &str, iso: &str, cells: Vec<ProgramCell>) -> TimezoneBlock {
        TimezoneBlock {
            tz: tz.to_string(),
            days: vec![DaySchedule {
                weekday: "Mon".to_string(),
                iso: iso.to_string(),
                cells,
            }],
        }
    }

    fn seq(rows: &[OutputRow]) -> Vec<(String, String, String)> {
        rows.iter()
            .map(|r| (r.date.clone(), r.start_time.clone(), r.timezone.clone()))
            .collect()
    }

    #[test]
    fn test_rows_carry_options_and_parsed_fields() {
        let parsed = ParsedGrid {
            timezone_blocks: vec![one_day_block(
                "WAT",
                "2025-09-29",
                vec![cell("06:00", "06:30", "Hidden Intentions S1 EP 20", 2)],
            )],
            issues: Vec::new(),
        };
        let options = ConvertOptions {
            region: "NG".to_string(),
            ..ConvertOptions::default()
        };
        let rows = convert_to_rows(&parsed, &options);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.region, "NG");
        assert_eq!(row.title, "Hidden Intentions");
        assert_eq!(row.season, "1");
        assert_eq!(row.episode, "20");
        assert_eq!(row.subtitle, "");
        assert_eq!(row.text_color, "#000000");
        assert_eq!(row.bg_color, "#FFFFFF");
        assert_eq!(row.timezone, "WAT");
    }

    #[test]
    fn test_timezone_order_breaks_time_ties() {
        let parsed = ParsedGrid {
            timezone_blocks: vec![
                one_day_block("CAT", "2025-09-29", vec![cell("06:00", "06:30", "News", 1)]),
                one_day_block("WAT", "2025-09-29", vec![cell("06:00", "06:30", "News", 1)]),
            ],
            issues: Vec::new(),
        };
        let rows = convert_to_rows(&parsed, &ConvertOptions::default());
        assert_eq!(rows[0].timezone, "WAT");
        assert_eq!(rows[1].timezone, "CAT");
    }

    #[test]
    fn test_unlisted_timezone_sorts_last() {
        let parsed = ParsedGrid {
            timezone_blocks: vec![
                one_day_block("EAT", "2025-09-29", vec![cell("06:00", "06:30", "News", 1)]),
                one_day_block("CAT", "2025-09-29", vec![cell("06:00", "06:30", "News", 1)]),
            ],
            issues: Vec::new(),
        };
        let rows = convert_to_rows(&parsed, &ConvertOptions::default());
        assert_eq!(rows[0].timezone, "CAT");
        assert_eq!(rows[1].timezone, "EAT");
    }

    #[test]
    fn test_broadcast_day_sorts_early_hours_last() {
        // First emitted row starts at 05:00, so the boundary hour is 5 and
        // the 04:30 slot belongs to the tail of the broadcast day.
        let parsed = ParsedGrid {
            timezone_blocks: vec![one_day_block(
                "WAT",
                "2025-09-29",
                vec![
                    cell("05:00", "05:30", "Breakfast", 1),
                    cell("04:30", "05:00", "Night Owl", 9),
                    cell("23:30", "00:00", "Late News", 8),
                ],
            )],
            issues: Vec::new(),
        };
        let rows = convert_to_rows(&parsed, &ConvertOptions::default());
        let expected: Vec<(String, String, String)> = vec![
            ("2025-09-29".into(), "05:00".into(), "WAT".into()),
            ("2025-09-29".into(), "23:30".into(), "WAT".into()),
            ("2025-09-29".into(), "04:30".into(), "WAT".into()),
        ];
        assert_eq!(seq(&rows), expected);
    }

    #[test]
    fn test_date_sorts_before_time() {
        let parsed = ParsedGrid {
            timezone_blocks: vec![
                one_day_block("WAT", "2025-09-30", vec![cell("06:00", "06:30", "A", 1)]),
                one_day_block("WAT", "2025-09-29", vec![cell("23:00", "23:30", "B", 9)]),
            ],
            issues: Vec::new(),
        };
        let rows = convert_to_rows(&parsed, &ConvertOptions::default());
        assert_eq!(rows[0].date, "2025-09-29");
        assert_eq!(rows[1].date, "2025-09-30");
    }

    #[test]
    fn test_sort_is_idempotent() {
        let parsed = ParsedGrid {
            timezone_blocks: vec![one_day_block(
                "WAT",
                "2025-09-29",
                vec![
                    cell("06:00", "06:30", "B Show", 1),
                    cell("06:00", "06:30", "A Show", 1),
                    cell("04:00", "04:30", "Night", 9),
                ],
            )],
            issues: Vec::new(),
        };
        let options = ConvertOptions::default();
        let rows = convert_to_rows(&parsed, &options);

        // Re-assembling from an equivalent, already-sorted structure yields
        // the identical sequence.
        let resorted = {
            let mut copy = rows.clone();
            let boundary = copy
                .first()
                .and_then(|r| start_hour(&r.start_time))
                .unwrap_or(DEFAULT_BOUNDARY_HOUR);
            copy.sort_by(|a, b| {
                a.date
                    .cmp(&b.date)
                    .then_with(|| {
                        sort_minutes(&a.start_time, boundary)
                            .cmp(&sort_minutes(&b.start_time, boundary))
                    })
                    .then_with(|| {
                        tz_rank(&options.timezone_order, &a.timezone)
                            .cmp(&tz_rank(&options.timezone_order, &b.timezone))
                    })
                    .then_with(|| a.title.cmp(&b.title))
            });
            copy
        };
        assert_eq!(rows, resorted);
    }

    #[test]
    fn test_empty_slot_cells_skipped() {
        let parsed = ParsedGrid {
            timezone_blocks: vec![one_day_block(
                "WAT",
                "2025-09-29",
                vec![
                    cell("06:00", "06:30", "—", 1),
                    cell("06:30", "07:00", "News", 2),
                ],
            )],
            issues: Vec::new(),
        };
        let rows = convert_to_rows(&parsed, &ConvertOptions::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "News");
    }
}
