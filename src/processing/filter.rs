//! Row filtering for [`crate::types::Table`].

use crate::types::{RowView, Table};

/// Returns a new [`Table`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`Table::filter_rows`].
pub fn filter<F>(table: &Table, predicate: F) -> Table
where
    F: FnMut(RowView<'_>) -> bool,
{
    table.filter_rows(predicate)
}

/// Returns `true` if `cell`, trimmed, equals `wanted` ignoring case.
pub fn status_matches(cell: &str, wanted: &str) -> bool {
    let cell = cell.trim();
    !cell.is_empty() && cell.to_lowercase() == wanted.trim().to_lowercase()
}

/// Keep rows whose `status_column` value matches `wanted` (see [`status_matches`]).
///
/// Row order is preserved. A table without `status_column` yields no rows.
pub fn filter_by_status(table: &Table, status_column: &str, wanted: &str) -> Table {
    let Some(idx) = table.schema.index_of(status_column) else {
        return table.empty_like();
    };
    filter(table, |row| {
        row.values()
            .get(idx)
            .is_some_and(|cell| status_matches(cell, wanted))
    })
}
