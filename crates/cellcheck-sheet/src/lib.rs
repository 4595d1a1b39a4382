//! Spreadsheet snapshots and bounds-checked cell lookup.
//!
//! A snapshot is a JSON object mapping sheet titles to `{rows, charts}`,
//! where each row lists display values, `null` for blanks, or
//! `{formula, value}` pairs. Lookups are addressed by A1 references parsed
//! with `cellcheck-common` and rendered one line per reference.

mod error;
mod grid;
mod lookup;
pub mod report;
pub mod sheets_api;
mod value;

pub use error::SnapshotError;
pub use grid::{SheetGrid, Snapshot};
pub use lookup::{CellLookupResult, FoundCell, lookup_cell};
pub use report::{extract_line, extract_lines, format_lookup};
pub use sheets_api::SpreadsheetResource;
pub use value::{CellKind, CellValue, FormulaCell};
