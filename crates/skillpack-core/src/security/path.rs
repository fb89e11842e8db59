//! Archive entry name traversal validation.
//!
//! This gate works on the computed archive name only and never touches the
//! filesystem, so it holds regardless of where entries come from.

use crate::PackageError;
use crate::Result;

#[cfg(windows)]
const SEPARATORS: [char; 2] = ['/', '\\'];
#[cfg(not(windows))]
const SEPARATORS: [char; 1] = ['/'];

/// Returns `true` if `name` must not be written into an archive.
///
/// A name is unsafe when it:
/// - is empty or contains a NUL byte
/// - starts with `/` (rooted)
/// - has a `..` segment anywhere
///
/// On Windows `\` also separates segments, and a leading `\` or a drive
/// prefix such as `C:` makes the name absolute. Elsewhere both are plain
/// file name characters.
///
/// # Examples
///
/// ```
/// use skillpack_core::security::is_unsafe_arc_name;
///
/// assert!(!is_unsafe_arc_name("demo/SKILL.md"));
/// assert!(!is_unsafe_arc_name("demo/..hidden/notes.txt"));
///
/// assert!(is_unsafe_arc_name("demo/../../etc/passwd"));
/// assert!(is_unsafe_arc_name("/etc/passwd"));
/// ```
#[must_use]
pub fn is_unsafe_arc_name(name: &str) -> bool {
    if name.is_empty() || name.contains('\0') {
        return true;
    }

    if name.starts_with(SEPARATORS) || has_drive_prefix(name) {
        return true;
    }

    name.split(SEPARATORS).any(|segment| segment == "..")
}

/// Validates an archive entry name.
///
/// # Errors
///
/// Returns `PackageError::UnsafeArchiveName` when
/// [`is_unsafe_arc_name`] rejects `name`.
pub fn validate_arc_name(name: &str) -> Result<()> {
    if is_unsafe_arc_name(name) {
        tracing::warn!(name, "rejected unsafe archive name");
        return Err(PackageError::UnsafeArchiveName {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(windows)]
fn has_drive_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(not(windows))]
fn has_drive_prefix(_name: &str) -> bool {
    false
}
