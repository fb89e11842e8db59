//! Filesystem entry kind enumeration.

use std::fmt;
use std::fs::FileType;

/// Kind of filesystem object found while walking a skill directory.
///
/// The kind is always derived from non-following metadata (`lstat`), so a
/// symbolic link is reported as [`EntryKind::Symlink`] no matter what it
/// points at.
///
/// # Examples
///
/// ```
/// use skillpack_core::types::EntryKind;
///
/// assert!(!EntryKind::File.is_unsafe());
/// assert!(!EntryKind::Directory.is_unsafe());
/// assert!(EntryKind::Symlink.is_unsafe());
/// assert!(EntryKind::Other("fifo").is_unsafe());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Symbolic link. The target is never read.
    Symlink,

    /// Anything else: fifo, socket, block or character device.
    Other(&'static str),
}

impl EntryKind {
    /// Classifies a `FileType` obtained without following symlinks.
    #[must_use]
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other(special_label(file_type))
        }
    }

    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns `true` if this is a symlink.
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        matches!(self, Self::Symlink)
    }

    /// Returns `true` unless this is a plain file or a plain directory.
    #[must_use]
    pub const fn is_unsafe(&self) -> bool {
        !matches!(self, Self::File | Self::Directory)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
            Self::Symlink => f.write_str("symlink"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

#[cfg(unix)]
fn special_label(file_type: FileType) -> &'static str {
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_fifo() {
        "fifo"
    } else if file_type.is_socket() {
        "socket"
    } else if file_type.is_block_device() {
        "block device"
    } else if file_type.is_char_device() {
        "character device"
    } else {
        "special file"
    }
}

#[cfg(not(unix))]
fn special_label(_file_type: FileType) -> &'static str {
    "special file"
}
