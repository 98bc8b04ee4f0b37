use serde::{Deserialize, Serialize};

/// One archive entry in a [`RunSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Group key (trimmed grouping value or `"undefined"`).
    pub key: String,
    /// Name of the file inside the archive.
    pub file_name: String,
    /// Number of rows written for this group.
    pub rows: usize,
}

/// Serializable report of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Caller-supplied label.
    pub label: String,
    /// File name the archive should be delivered under.
    pub archive_name: String,
    /// Rows that passed the status filter.
    pub total_rows: usize,
    /// Groups in first-seen order.
    pub groups: Vec<GroupSummary>,
}

impl RunSummary {
    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a summary previously produced by [`Self::to_json_pretty`].
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
