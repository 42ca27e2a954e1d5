//! Generic in-memory spreadsheet grid: the crate's input primitive.
//!
//! A [`RawGrid`] is a row-major 2-D array of cell values plus a list of merge
//! rectangles. It is produced by an external spreadsheet-decoding collaborator
//! and is read-only to this crate: every parse call takes a borrowed grid and
//! retains nothing after returning.

use std::borrow::Cow;

use chrono::NaiveDateTime;

use crate::common::{Error, Result};

/// Value carried by a single grid cell.
///
/// Human-authored schedule grids carry free text almost everywhere; time
/// columns sometimes decode as genuine date-time values instead.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// String value
    Text(String),
    /// Date/time value decoded from a spreadsheet serial
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Borrow the cell's string content, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Stringified form of the cell, the way a spreadsheet UI would show it.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Text(s) => Cow::Borrowed(s),
            CellValue::DateTime(dt) => {
                Cow::Owned(dt.format("%Y-%m-%d %H:%M:%S").to_string())
            }
        }
    }
}

/// Inclusive rectangular merge region. The logical cell value lives at the
/// top-left position; the remaining covered cells are blank in the raw data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl MergeRange {
    /// Number of grid rows this merge covers.
    pub fn row_span(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    /// Number of grid columns this merge covers.
    pub fn col_span(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    fn is_valid(&self) -> bool {
        self.start_row <= self.end_row && self.start_col <= self.end_col
    }
}

/// A single decoded worksheet: row-major cells plus merge metadata.
///
/// Rows may be ragged; out-of-range lookups read as [`CellValue::Empty`],
/// matching how spreadsheet decoders surface sparse sheets.
#[derive(Debug, Clone)]
pub struct RawGrid {
    cells: Vec<Vec<CellValue>>,
    merges: Vec<MergeRange>,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl RawGrid {
    /// Create a grid from decoded cells and merge metadata.
    ///
    /// Returns [`Error::InvalidMerge`] if any merge rectangle is inverted.
    /// Merges extending past the last populated row or column are tolerated;
    /// the uncovered area simply reads as empty.
    pub fn new(cells: Vec<Vec<CellValue>>, merges: Vec<MergeRange>) -> Result<Self> {
        for merge in &merges {
            if !merge.is_valid() {
                return Err(Error::InvalidMerge {
                    start_row: merge.start_row,
                    start_col: merge.start_col,
                    end_row: merge.end_row,
                    end_col: merge.end_col,
                });
            }
        }
        Ok(RawGrid { cells, merges })
    }

    /// Build a grid from plain text rows; empty strings become empty cells.
    ///
    /// Intended for tests and simple callers that already hold stringified
    /// cell data.
    pub fn from_text_rows(rows: &[&[&str]], merges: Vec<MergeRange>) -> Result<Self> {
        let cells = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|s| {
                        if s.is_empty() {
                            CellValue::Empty
                        } else {
                            CellValue::Text((*s).to_string())
                        }
                    })
                    .collect()
            })
            .collect();
        Self::new(cells, merges)
    }

    /// Number of rows in the grid.
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns, taken as the widest row.
    pub fn col_count(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Get a cell by 0-based row and column; out-of-range reads as empty.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Row span of the merge anchored exactly at (row, col); 1 if unmerged.
    ///
    /// Cells covered by a merge but not at its top-left position also report
    /// 1; only the anchor carries the span.
    pub fn row_span(&self, row: usize, col: usize) -> usize {
        self.merges
            .iter()
            .find(|m| m.start_row == row && m.start_col == col)
            .map(MergeRange::row_span)
            .unwrap_or(1)
    }

    /// All merge rectangles.
    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_reads_empty() {
        let grid = RawGrid::from_text_rows(&[&["a", "b"], &["c"]], Vec::new()).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.col_count(), 2);
        assert_eq!(grid.cell(1, 1), &CellValue::Empty);
        assert_eq!(grid.cell(9, 9), &CellValue::Empty);
        assert_eq!(grid.cell(0, 1).as_text(), Some("b"));
    }

    #[test]
    fn test_row_span_only_at_anchor() {
        let merges = vec![MergeRange {
            start_row: 2,
            start_col: 1,
            end_row: 4,
            end_col: 1,
        }];
        let grid = RawGrid::new(vec![Vec::new(); 6], merges).unwrap();
        assert_eq!(grid.row_span(2, 1), 3);
        assert_eq!(grid.row_span(3, 1), 1);
        assert_eq!(grid.row_span(2, 0), 1);
    }

    #[test]
    fn test_inverted_merge_rejected() {
        let merges = vec![MergeRange {
            start_row: 3,
            start_col: 0,
            end_row: 1,
            end_col: 0,
        }];
        assert!(RawGrid::new(Vec::new(), merges).is_err());
    }

    #[test]
    fn test_datetime_cell_stringifies() {
        let dt = chrono::NaiveDate::from_ymd_opt(2025, 9, 29)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap();
        let value = CellValue::DateTime(dt);
        assert_eq!(value.to_text(), "2025-09-29 06:30:00");
        assert!(value.as_text().is_none());
    }
}
