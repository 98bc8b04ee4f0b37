//! Partitioning a [`Table`] into groups keyed by one column.

use std::collections::HashMap;

use crate::types::Table;

/// Key used for rows whose grouping cell is empty after trimming.
pub const UNDEFINED_GROUP_KEY: &str = "undefined";

/// One group of rows sharing the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Trimmed grouping value (or [`UNDEFINED_GROUP_KEY`]).
    pub key: String,
    /// Rows of this group, in source order.
    pub table: Table,
}

/// Ordered collection of groups; iteration order is first-occurrence order of each key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    groups: Vec<Group>,
}

impl Partition {
    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    /// Look up a group by key.
    pub fn get(&self, key: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.key == key)
    }

    /// Iterate groups in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    /// Total number of rows across all groups.
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.table.row_count()).sum()
    }
}

impl IntoIterator for Partition {
    type Item = Group;
    type IntoIter = std::vec::IntoIter<Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Group key for a raw cell value.
pub fn group_key(cell: &str) -> String {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        UNDEFINED_GROUP_KEY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Bucket `table` rows by the trimmed value of `key_column`.
///
/// - The first row carrying a key fixes that group's position.
/// - Rows keep their relative order inside each group.
/// - A missing `key_column` puts every row under [`UNDEFINED_GROUP_KEY`].
pub fn partition(table: &Table, key_column: &str) -> Partition {
    let key_idx = table.schema.index_of(key_column);

    let mut groups: Vec<Group> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in &table.rows {
        let cell = key_idx.and_then(|i| row.get(i)).map_or("", |s| s.as_str());
        let key = group_key(cell);

        let pos = match positions.get(&key) {
            Some(&pos) => pos,
            None => {
                groups.push(Group {
                    key: key.clone(),
                    table: table.empty_like(),
                });
                positions.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[pos].table.rows.push(row.clone());
    }

    Partition { groups }
}
