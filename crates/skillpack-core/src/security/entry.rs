//! Filesystem entry kind validation.

use crate::PackageError;
use crate::Result;
use crate::types::SkillEntry;

/// Returns `true` if `entry` must not be packaged.
///
/// Only plain files and plain directories are accepted. A symlink is
/// rejected whatever it points at: its target is never read, since a
/// harmless-looking link can be swapped between the check and the read.
///
/// # Examples
///
/// ```
/// use skillpack_core::security::is_unsafe_entry;
/// use skillpack_core::types::EntryKind;
/// use skillpack_core::types::SkillEntry;
/// use std::path::Path;
/// use std::path::PathBuf;
///
/// let root = Path::new("/skills/demo");
/// let file = SkillEntry::new(root, PathBuf::from("/skills/demo/run.py"), EntryKind::File, 3);
/// assert!(!is_unsafe_entry(&file));
///
/// let link = SkillEntry::new(root, PathBuf::from("/skills/demo/secrets"), EntryKind::Symlink, 0);
/// assert!(is_unsafe_entry(&link));
/// ```
#[must_use]
pub fn is_unsafe_entry(entry: &SkillEntry) -> bool {
    entry.kind.is_unsafe()
}

/// Validates a walked entry.
///
/// # Errors
///
/// Returns `PackageError::UnsafeEntry` when [`is_unsafe_entry`] rejects
/// `entry`.
pub fn validate_entry(entry: &SkillEntry) -> Result<()> {
    if is_unsafe_entry(entry) {
        tracing::warn!(
            path = %entry.path.display(),
            kind = %entry.kind,
            "rejected unsafe entry"
        );
        return Err(PackageError::UnsafeEntry {
            path: entry.path.clone(),
            kind: entry.kind,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryKind;
    use std::path::Path;
    use std::path::PathBuf;

    fn entry(kind: EntryKind) -> SkillEntry {
        SkillEntry::new(
            Path::new("/skills/demo"),
            PathBuf::from("/skills/demo/item"),
            kind,
            0,
        )
    }

    #[test]
    fn test_file_and_directory_are_safe() {
        assert!(!is_unsafe_entry(&entry(EntryKind::File)));
        assert!(!is_unsafe_entry(&entry(EntryKind::Directory)));
        assert!(validate_entry(&entry(EntryKind::File)).is_ok());
    }

    #[test]
    fn test_symlink_is_unsafe() {
        let link = entry(EntryKind::Symlink);
        assert!(is_unsafe_entry(&link));
        assert!(matches!(
            validate_entry(&link),
            Err(PackageError::UnsafeEntry {
                kind: EntryKind::Symlink,
                ..
            })
        ));
    }

    #[test]
    fn test_special_files_are_unsafe() {
        for label in ["fifo", "socket", "block device", "character device"] {
            assert!(is_unsafe_entry(&entry(EntryKind::Other(label))), "{label}");
        }
    }
}
