//! One-line rendering of cell lookups.

use cellcheck_common::{CellReference, parse_cell_reference};

use crate::grid::SheetGrid;
use crate::lookup::CellLookupResult;
use crate::value::CellValue;

/// Render one lookup as `<original>: <detail>`.
pub fn format_lookup(reference: &CellReference, result: &CellLookupResult<'_>) -> String {
    let original = reference.original();
    let cell = match result {
        CellLookupResult::Found(cell) => cell,
        other => {
            let reason = other.reason().unwrap_or_default();
            return format!("{original}: [ERROR] {reason}");
        }
    };
    if cell.is_empty {
        return format!("{original}: <empty>");
    }
    match cell.value {
        CellValue::Formula(formula) if !formula.formula.is_empty() => format!(
            "{original}: {} (evaluates to: {})",
            formula.formula,
            formula.value.as_deref().unwrap_or_default()
        ),
        value => format!("{original}: {value}"),
    }
}

/// Look up and render a single reference text.
pub fn extract_line(grid: &SheetGrid, text: &str) -> String {
    match parse_cell_reference(text) {
        Ok(reference) => format_lookup(&reference, &grid.lookup(&reference)),
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(input = %text, "skipping malformed cell reference");
            format!("{text}: [ERROR] {err}")
        }
    }
}

/// One line per input, in input order. Malformed references yield an error
/// line and never stop the batch.
pub fn extract_lines<I, S>(grid: &SheetGrid, texts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .map(|text| extract_line(grid, text.as_ref()))
        .collect()
}
