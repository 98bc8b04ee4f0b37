//! Column projection for [`crate::types::Table`].

use crate::types::Table;

/// Columns removed from every exported table by default.
pub const DEFAULT_EXCLUDED_COLUMNS: [&str; 2] = ["sync time", "planDeliveryDate"];

/// Returns a copy of `table` without the columns named in `excluded`.
///
/// Absent columns are ignored; the remaining columns keep their source order.
pub fn project<S: AsRef<str>>(table: &Table, excluded: &[S]) -> Table {
    let keep: Vec<usize> = table
        .schema
        .column_names()
        .enumerate()
        .filter(|(_, name)| !excluded.iter().any(|ex| ex.as_ref() == *name))
        .map(|(idx, _)| idx)
        .collect();
    table.select_columns(&keep)
}

#[cfg(test)]
mod tests {
    use super::{project, DEFAULT_EXCLUDED_COLUMNS};
    use crate::types::{Schema, Table};

    #[test]
    fn removes_both_default_columns() {
        let t = Table::new(
            "Sheet1",
            Schema::new(["FleeName", "sync time", "id", "planDeliveryDate"]),
            vec![vec!["A".into(), "t".into(), "1".into(), "d".into()]],
        );
        let out = project(&t, &DEFAULT_EXCLUDED_COLUMNS);
        assert_eq!(out.schema, Schema::new(["FleeName", "id"]));
        assert_eq!(out.rows, vec![vec!["A", "1"]]);
        assert_eq!(out.sheet, "Sheet1");
    }

    #[test]
    fn absent_columns_are_a_no_op() {
        let t = Table::new(
            "Sheet1",
            Schema::new(["FleeName", "id"]),
            vec![vec!["A".into(), "1".into()]],
        );
        assert_eq!(project(&t, &DEFAULT_EXCLUDED_COLUMNS), t);
    }

    #[test]
    fn match_is_exact_and_case_sensitive() {
        let t = Table::new(
            "Sheet1",
            Schema::new(["Sync Time", "planDeliveryDate"]),
            vec![vec!["x".into(), "y".into()]],
        );
        let out = project(&t, &DEFAULT_EXCLUDED_COLUMNS);
        assert_eq!(out.schema, Schema::new(["Sync Time"]));
    }
}
