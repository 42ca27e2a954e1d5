//! Gridcast: convert loosely structured broadcast programming grids into
//! flat, sorted schedule rows.
//!
//! The input is one decoded spreadsheet sheet: a row-major 2-D array of cell
//! values plus merge rectangles ([`RawGrid`]), as produced by an external
//! spreadsheet decoder. The layout is irregular: timezone and day headers
//! float within the leading rows and columns, show durations are encoded by
//! merged cells rather than end times, and program cells mix title, season,
//! episode, and subtitle free text. The output is a deterministic sequence of
//! [`OutputRow`] records sorted under a broadcast-day convention (a schedule
//! day may start at 05:00, not midnight), plus accumulated diagnostic issue
//! strings.
//!
//! Parsing is pure and synchronous over borrowed input: no I/O, no shared
//! state, nothing retained after a call returns. Batch callers may convert
//! files concurrently without coordination.
//!
//! # Example
//!
//! ```
//! use gridcast::{ConvertOptions, RawGrid};
//!
//! # fn main() -> gridcast::Result<()> {
//! let grid = RawGrid::from_text_rows(
//!     &[
//!         &["WAT", "Mon 29-Sep", "Tue 30-Sep"],
//!         &["06:00", "News", "This Is Fate (Finale)"],
//!     ],
//!     Vec::new(),
//! )?;
//! let options = ConvertOptions {
//!     header_year: Some(2025),
//!     ..ConvertOptions::default()
//! };
//!
//! let (rows, issues) = gridcast::convert(&grid, &options);
//! assert!(issues.is_empty());
//! assert_eq!(rows[0].date, "2025-09-29");
//! assert_eq!(rows[0].title, "News");
//! assert_eq!(rows[1].subtitle, "Finale");
//! # Ok(())
//! # }
//! ```

/// Cross-cutting support types (errors).
pub mod common;

/// The decoded-sheet input primitive: cells plus merge metadata.
pub mod grid;

/// Schedule conversion: discovery, duration analysis, text parsing,
/// assembly, and sorting.
pub mod schedule;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use grid::{CellValue, MergeRange, RawGrid};
pub use schedule::{
    ConvertOptions, OutputRow, ParsedGrid, ParsedProgram, convert, convert_to_rows,
    parse_grid, parse_program_cell,
};
