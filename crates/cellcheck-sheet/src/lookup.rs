use cellcheck_common::CellReference;

use crate::grid::SheetGrid;
use crate::value::{CellKind, CellValue};

/// Outcome of a bounds-checked lookup. Out-of-bounds is a result, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellLookupResult<'a> {
    RowOutOfBounds,
    ColumnOutOfBounds,
    Found(FoundCell<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoundCell<'a> {
    pub value: &'a CellValue,
    pub is_empty: bool,
    pub kind: CellKind,
}

impl<'a> CellLookupResult<'a> {
    pub fn found(&self) -> Option<&FoundCell<'a>> {
        match self {
            CellLookupResult::Found(cell) => Some(cell),
            _ => None,
        }
    }

    /// Human-readable reason for an out-of-bounds result.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            CellLookupResult::RowOutOfBounds => Some("Row out of bounds"),
            CellLookupResult::ColumnOutOfBounds => Some("Column out of bounds"),
            CellLookupResult::Found(_) => None,
        }
    }
}

/// Strict lookup of zero-based `(column, row)`. Each row is bounded by its own
/// length, so a short row misses even when other rows are longer.
pub fn lookup_cell(grid: &SheetGrid, column: i64, row: i64) -> CellLookupResult<'_> {
    let Some(cells) = usize::try_from(row).ok().and_then(|r| grid.rows.get(r)) else {
        return CellLookupResult::RowOutOfBounds;
    };
    let Some(value) = usize::try_from(column).ok().and_then(|c| cells.get(c)) else {
        return CellLookupResult::ColumnOutOfBounds;
    };
    CellLookupResult::Found(FoundCell {
        value,
        is_empty: value.is_empty(),
        kind: value.kind(),
    })
}

impl SheetGrid {
    pub fn lookup(&self, reference: &CellReference) -> CellLookupResult<'_> {
        lookup_cell(self, reference.column(), reference.row())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> SheetGrid {
        SheetGrid::from_rows(vec![
            vec![CellValue::text("a"), CellValue::Empty, CellValue::text("")],
            vec![CellValue::formula("=A1", "a")],
        ])
    }

    #[test]
    fn rows_beyond_grid_are_out_of_bounds() {
        let grid = grid();
        assert_eq!(lookup_cell(&grid, 0, 5), CellLookupResult::RowOutOfBounds);
        assert_eq!(lookup_cell(&grid, 0, 2), CellLookupResult::RowOutOfBounds);
        assert_eq!(lookup_cell(&grid, 0, -1), CellLookupResult::RowOutOfBounds);
    }

    #[test]
    fn short_rows_bound_columns() {
        let grid = grid();
        assert_eq!(lookup_cell(&grid, 2, 1), CellLookupResult::ColumnOutOfBounds);
        assert_eq!(lookup_cell(&grid, -1, 0), CellLookupResult::ColumnOutOfBounds);
        assert!(lookup_cell(&grid, 2, 0).found().is_some());
    }

    #[test]
    fn found_cells_report_kind_and_emptiness() {
        let grid = grid();
        let a1 = *lookup_cell(&grid, 0, 0).found().unwrap();
        assert_eq!((a1.kind, a1.is_empty), (CellKind::String, false));
        let b1 = *lookup_cell(&grid, 1, 0).found().unwrap();
        assert_eq!((b1.kind, b1.is_empty), (CellKind::Empty, true));
        let c1 = *lookup_cell(&grid, 2, 0).found().unwrap();
        assert_eq!((c1.kind, c1.is_empty), (CellKind::String, true));
        let a2 = *lookup_cell(&grid, 0, 1).found().unwrap();
        assert_eq!(a2.kind, CellKind::Formula);
    }

    #[test]
    fn lookup_by_reference() {
        let grid = grid();
        let reference = CellReference::parse("a2").unwrap();
        assert_eq!(grid.lookup(&reference).found().unwrap().kind.as_str(), "formula");
        assert_eq!(
            grid.lookup(&CellReference::parse("A0").unwrap()).reason(),
            Some("Row out of bounds")
        );
    }
}
