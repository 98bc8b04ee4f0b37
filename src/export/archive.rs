//! Bundling per-group payloads into a single zip archive.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::ArchiveError;

use super::naming::{sanitize_filename, CollisionPolicy, UniqueNames};

/// Deflate level used for archive entries.
pub const DEFAULT_COMPRESSION_LEVEL: i64 = 6;

/// One named payload inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Sanitized file name including the extension.
    pub file_name: String,
    /// File contents.
    pub data: Vec<u8>,
}

/// Collects payloads and produces a deflate-compressed zip archive.
///
/// Names are sanitized on [`ArchiveBuilder::add`]; collisions are resolved according to the
/// configured [`CollisionPolicy`]. Entry timestamps are fixed, so equal input gives equal bytes.
#[derive(Debug)]
pub struct ArchiveBuilder {
    extension: String,
    policy: CollisionPolicy,
    compression_level: i64,
    names: UniqueNames,
    entries: Vec<ArchiveEntry>,
}

impl ArchiveBuilder {
    /// Builder storing every entry as `<sanitized name>.<extension>`.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            policy: CollisionPolicy::default(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            names: UniqueNames::default(),
            entries: Vec::new(),
        }
    }

    /// Set the collision policy.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the deflate level.
    pub fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = level;
        self
    }

    /// Add a payload under `name` and return the file name it was stored as.
    pub fn add(&mut self, name: &str, data: Vec<u8>) -> &str {
        let stem = sanitize_filename(name);
        let idx = match self.policy {
            CollisionPolicy::Suffix => {
                let stem = self.names.claim(&stem);
                self.push(format!("{stem}.{}", self.extension), data)
            }
            CollisionPolicy::Overwrite => {
                let file_name = format!("{stem}.{}", self.extension);
                match self.entries.iter().position(|e| e.file_name == file_name) {
                    Some(idx) => {
                        self.entries[idx].data = data;
                        idx
                    }
                    None => self.push(file_name, data),
                }
            }
        };
        &self.entries[idx].file_name
    }

    fn push(&mut self, file_name: String, data: Vec<u8>) -> usize {
        self.entries.push(ArchiveEntry { file_name, data });
        self.entries.len() - 1
    }

    /// Entries collected so far, in insertion order.
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Number of entries collected so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entry was added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every entry into a zip archive and return its bytes.
    pub fn build(&self) -> Result<Vec<u8>, ArchiveError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.compression_level))
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        for entry in &self.entries {
            zip.start_file(entry.file_name.as_str(), options)?;
            zip.write_all(&entry.data)?;
        }

        Ok(zip.finish()?.into_inner())
    }
}
