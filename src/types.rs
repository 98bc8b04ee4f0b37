//! Core data model types.
//!
//! A report is read into a [`Table`]: an ordered list of column names (the [`Schema`]) plus
//! row-major string storage. Every row in a table has exactly one value per schema column, so a
//! row behaves like an ordered `column name -> value` mapping (see [`RowView`]).

/// Ordered list of column names shared by every row of a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// Column names in source order.
    pub columns: Vec<String>,
}

impl Schema {
    /// Create a schema from column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.as_str())
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns `true` if the schema contains `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

/// Borrowed view of one row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    schema: &'a Schema,
    values: &'a [String],
}

impl<'a> RowView<'a> {
    /// Value of `column`, or `None` if the column is not part of the schema.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.schema.index_of(column)?;
        self.values.get(idx).map(|v| v.as_str())
    }

    /// Value of `column`, treating a missing column as the empty string.
    pub fn get_or_empty(&self, column: &str) -> &'a str {
        self.get(column).unwrap_or("")
    }

    /// Iterate `(column, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + use<'a> {
        self.schema
            .columns
            .iter()
            .zip(self.values.iter())
            .map(|(c, v)| (c.as_str(), v.as_str()))
    }

    /// Raw values in schema order.
    pub fn values(&self) -> &'a [String] {
        self.values
    }
}

/// In-memory string table read from (or written to) one sheet.
///
/// Rows are stored as `Vec<Vec<String>>` in the same order as the [`Schema`] columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Identifier of the sheet this table came from (and is written back to).
    pub sheet: String,
    /// Column names.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from a sheet name, schema and rows.
    ///
    /// Rows shorter than the schema are padded with empty strings; longer rows are truncated.
    pub fn new(sheet: impl Into<String>, schema: Schema, rows: Vec<Vec<String>>) -> Self {
        let width = schema.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self {
            sheet: sheet.into(),
            schema,
            rows,
        }
    }

    /// An empty table sharing this table's sheet and schema.
    pub fn empty_like(&self) -> Self {
        Self {
            sheet: self.sheet.clone(),
            schema: self.schema.clone(),
            rows: Vec::new(),
        }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow row `idx` as a [`RowView`].
    pub fn row(&self, idx: usize) -> Option<RowView<'_>> {
        self.rows.get(idx).map(|values| RowView {
            schema: &self.schema,
            values,
        })
    }

    /// Iterate rows as [`RowView`]s.
    pub fn iter_rows(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(|values| RowView {
            schema: &self.schema,
            values,
        })
    }

    /// Create a new table containing only rows that match `predicate`.
    ///
    /// The returned table preserves the original sheet, schema and row order.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(RowView<'_>) -> bool,
    {
        let rows = self
            .iter_rows()
            .filter(|row| predicate(*row))
            .map(|row| row.values().to_vec())
            .collect();
        Self {
            sheet: self.sheet.clone(),
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new table keeping only the columns at `keep` (in that order).
    ///
    /// Cells missing from short rows come back as `""`.
    pub fn select_columns(&self, keep: &[usize]) -> Self {
        let schema = Schema {
            columns: keep.iter().map(|&i| self.schema.columns[i].clone()).collect(),
        };
        let rows = self
            .rows
            .iter()
            .map(|row| {
                keep.iter()
                    .map(|&i| row.get(i).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        Self {
            sheet: self.sheet.clone(),
            schema,
            rows,
        }
    }
}
