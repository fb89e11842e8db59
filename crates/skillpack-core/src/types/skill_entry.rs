//! A single filesystem object discovered under a skill directory.

use std::path::Path;
use std::path::PathBuf;

use super::EntryKind;

/// One entry found while walking a skill directory.
///
/// Entries are produced by [`SkillWalker`](crate::creation::SkillWalker) and
/// are only handed out after their kind has passed the entry gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillEntry {
    /// Absolute filesystem path.
    pub path: PathBuf,

    /// Path relative to the skill root.
    pub relative_path: PathBuf,

    /// Kind read from non-following metadata.
    pub kind: EntryKind,

    /// Size in bytes (0 for anything but regular files).
    pub size: u64,
}

impl SkillEntry {
    /// Builds an entry, deriving `relative_path` from `root`.
    ///
    /// Falls back to the full path when `path` is not under `root`; the
    /// archive name gate rejects the resulting absolute name later.
    #[must_use]
    pub fn new(root: &Path, path: PathBuf, kind: EntryKind, size: u64) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.clone(), Path::to_path_buf);
        Self {
            path,
            relative_path,
            kind,
            size,
        }
    }

    /// Number of path segments below the skill root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.relative_path.components().count()
    }
}
