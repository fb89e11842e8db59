//! Skill directory traversal.
//!
//! Every descendant of the skill root is visited exactly once, in a stable
//! order, without following symlinks. Each entry passes the entry gate
//! before it is yielded; the first rejection ends the walk.

use std::path::Path;

use walkdir::WalkDir;

use crate::PackageError;
use crate::Result;
use crate::security::validate_entry;
use crate::types::EntryKind;
use crate::types::SkillEntry;

/// Walks a skill directory, rejecting unsafe entries.
///
/// Order is deterministic: entries are sorted by file name within each
/// directory and a directory is yielded before its contents. The root
/// itself is not yielded.
///
/// # Examples
///
/// ```no_run
/// use skillpack_core::creation::SkillWalker;
/// use std::path::Path;
///
/// let walker = SkillWalker::new(Path::new("./skills/demo"));
/// for entry in walker.entries() {
///     let entry = entry?;
///     println!("{}", entry.relative_path.display());
/// }
/// # Ok::<(), skillpack_core::PackageError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SkillWalker<'a> {
    root: &'a Path,
}

impl<'a> SkillWalker<'a> {
    /// Creates a walker for the given skill root.
    #[must_use]
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Returns a lazy iterator over checked entries.
    ///
    /// The iterator yields at most one error and then stops.
    pub fn entries(&self) -> SkillEntries<'a> {
        let inner = WalkDir::new(self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        SkillEntries {
            root: self.root,
            inner,
            failed: false,
        }
    }

    /// Collects every entry, or returns the first failure.
    ///
    /// # Errors
    ///
    /// - `PackageError::UnsafeEntry` for a symlink or special file
    /// - `PackageError::Walk` when a directory or entry cannot be read
    pub fn walk(&self) -> Result<Vec<SkillEntry>> {
        self.entries().collect()
    }
}

/// Iterator returned by [`SkillWalker::entries`].
pub struct SkillEntries<'a> {
    root: &'a Path,
    inner: walkdir::IntoIter,
    failed: bool,
}

impl SkillEntries<'_> {
    fn check(&self, entry: &walkdir::DirEntry) -> Result<SkillEntry> {
        let kind = EntryKind::from_file_type(entry.file_type());

        let size = if kind.is_file() {
            entry.metadata()?.len()
        } else {
            0
        };

        let skill_entry = SkillEntry::new(self.root, entry.path().to_path_buf(), kind, size);
        validate_entry(&skill_entry)?;

        tracing::debug!(
            path = %skill_entry.relative_path.display(),
            kind = %skill_entry.kind,
            "accepted entry"
        );
        Ok(skill_entry)
    }
}

impl Iterator for SkillEntries<'_> {
    type Item = Result<SkillEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let result = match self.inner.next()? {
            Ok(entry) => self.check(&entry),
            Err(e) => Err(PackageError::from(e)),
        };

        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

/// Walks `root` and returns every entry, or the first failure.
///
/// # Errors
///
/// See [`SkillWalker::walk`].
pub fn walk(root: &Path) -> Result<Vec<SkillEntry>> {
    SkillWalker::new(root).walk()
}
