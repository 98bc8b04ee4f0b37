//! File naming for archive entries and the archive itself.

use std::collections::HashSet;

/// Characters that are not allowed in file names on common filesystems.
pub const ILLEGAL_FILENAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Archive base name used when the caller's label is blank.
pub const DEFAULT_ARCHIVE_LABEL: &str = "export";

/// Replace every filesystem-illegal character with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if ILLEGAL_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// `<sanitized label>.zip`, falling back to [`DEFAULT_ARCHIVE_LABEL`] for a blank label.
pub fn archive_file_name(label: &str) -> String {
    let label = label.trim();
    let base = if label.is_empty() {
        DEFAULT_ARCHIVE_LABEL.to_string()
    } else {
        sanitize_filename(label)
    };
    format!("{base}.zip")
}

/// What to do when two entries end up with the same file name after sanitization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Keep every entry; later duplicates are renamed `name (2)`, `name (3)`, ...
    #[default]
    Suffix,
    /// Keep one entry per name; the last payload written under a name wins.
    Overwrite,
}

/// Hands out unique stems for a sequence of names under [`CollisionPolicy::Suffix`].
#[derive(Debug, Default)]
pub(crate) struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    /// Return `stem` if unused, otherwise the first free `stem (n)` with `n >= 2`.
    pub(crate) fn claim(&mut self, stem: &str) -> String {
        let mut candidate = stem.to_string();
        let mut n = 2;
        while self.taken.contains(&candidate.to_lowercase()) {
            candidate = format!("{stem} ({n})");
            n += 1;
        }
        self.taken.insert(candidate.to_lowercase());
        candidate
    }
}
