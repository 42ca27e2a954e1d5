//! Merge-span duration analysis.
//!
//! Sheets encode show length by merging day-column cells downward over the
//! slots a show occupies, not by writing end times. The nominal slot length
//! itself is inferred from the time column: the most frequent gap between
//! consecutive labels.

use fixedbitset::FixedBitSet;

use super::clock;
use super::types::ProgramCell;
use crate::grid::RawGrid;

/// Slot duration assumed when the time column holds fewer than two labels.
pub const DEFAULT_SLOT_MINUTES: u32 = 30;

/// Infer the nominal slot duration from consecutive time-label differences.
///
/// A decrease between neighbors counts as a wraparound past midnight. Ties
/// on frequency resolve to the larger difference.
pub fn slot_duration(labels: &[String]) -> u32 {
    if labels.len() < 2 {
        return DEFAULT_SLOT_MINUTES;
    }

    let mut counts = std::collections::BTreeMap::new();
    for pair in labels.windows(2) {
        let (Some(prev), Some(curr)) = (clock::minutes_of(&pair[0]), clock::minutes_of(&pair[1]))
        else {
            continue;
        };
        let diff = if curr >= prev {
            curr - prev
        } else {
            curr + 24 * 60 - prev
        };
        *counts.entry(diff).or_insert(0u32) += 1;
    }

    let mut modal = DEFAULT_SLOT_MINUTES;
    let mut best = 0;
    for (diff, count) in counts {
        if count >= best {
            best = count;
            modal = diff;
        }
    }
    modal
}

/// Walk the rows of one day column and emit a [`ProgramCell`] for each slot
/// that starts a program.
///
/// A row starts a program when its time-column cell normalizes to a time and
/// its day-column cell is neither empty nor a placeholder marker. Duration is
/// the cell's merge row-span times the slot duration; every row covered by
/// the span is consumed, so a merged cell yields exactly one cell.
pub fn analyze(
    grid: &RawGrid,
    time_col: usize,
    day_col: usize,
    slot_minutes: u32,
) -> Vec<ProgramCell> {
    let mut cells = Vec::new();
    let mut consumed = FixedBitSet::with_capacity(grid.row_count());

    for row in 0..grid.row_count() {
        if consumed.contains(row) {
            continue;
        }
        let Some(start) = clock::normalize_time(grid.cell(row, time_col)) else {
            continue;
        };

        let text = grid.cell(row, day_col).to_text();
        if clock::is_empty_slot(&text) {
            consumed.insert(row);
            continue;
        }

        let span = grid.row_span(row, day_col);
        if row + span > consumed.len() {
            // Merge metadata may extend past the populated rows.
            consumed.grow(row + span);
        }
        for covered in row..row + span {
            consumed.insert(covered);
        }

        let duration = span as u32 * slot_minutes;
        let end = clock::add_minutes(&start, duration as i32);
        cells.push(ProgramCell {
            start,
            end,
            text: text.trim().to_string(),
            row,
        });
    }
    cells
}
