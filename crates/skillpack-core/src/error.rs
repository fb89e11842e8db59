//! Error types for skill packaging operations.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::EntryKind;

/// Result type alias using `PackageError`.
pub type Result<T> = std::result::Result<T, PackageError>;

/// Errors that can occur while packaging or inspecting a skill.
#[derive(Error, Debug)]
pub enum PackageError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal failed (permission denied, vanished entry).
    #[error("cannot read {path}: {source}")]
    Walk {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The archive container could not be written or read.
    #[error("archive error: {0}")]
    Zip(String),

    /// Source path does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Source path exists but is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Source path has no final segment to name the archive after.
    #[error("cannot derive a package name from {path}")]
    UnnamedSource {
        /// The offending path.
        path: PathBuf,
    },

    /// Required descriptor file is absent at the source root.
    #[error("{name} not found in {path}")]
    MissingDescriptor {
        /// The source root that was searched.
        path: PathBuf,
        /// The descriptor file name.
        name: String,
    },

    /// A symlink or special file was found in the source tree.
    #[error("unsafe entry ({kind}): {path}")]
    UnsafeEntry {
        /// Path of the rejected entry.
        path: PathBuf,
        /// Kind that caused the rejection.
        kind: EntryKind,
    },

    /// A computed archive name is absolute or contains `..`.
    #[error("unsafe archive name: {name:?}")]
    UnsafeArchiveName {
        /// The rejected archive entry name.
        name: String,
    },

    /// Output directory does not exist and creating it is disabled.
    #[error("output directory not found: {path}")]
    OutputDirNotFound {
        /// The missing directory.
        path: PathBuf,
    },

    /// The output archive already exists and overwriting is disabled.
    #[error("output already exists: {path}")]
    OutputExists {
        /// Path of the existing archive.
        path: PathBuf,
    },

    /// Compression level is outside 1-9.
    #[error("invalid compression level {level}, must be 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// Configuration value is not usable.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl PackageError {
    /// Returns `true` if this error represents a security rejection.
    ///
    /// # Examples
    ///
    /// ```
    /// use skillpack_core::PackageError;
    ///
    /// let err = PackageError::UnsafeArchiveName {
    ///     name: "skill/../etc/passwd".into(),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = PackageError::Zip("truncated".into());
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::UnsafeEntry { .. } | Self::UnsafeArchiveName { .. }
        )
    }

    /// Returns the filesystem path this error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Walk { path, .. }
            | Self::SourceNotFound { path }
            | Self::NotADirectory { path }
            | Self::UnnamedSource { path }
            | Self::MissingDescriptor { path, .. }
            | Self::UnsafeEntry { path, .. }
            | Self::OutputDirNotFound { path }
            | Self::OutputExists { path } => Some(path),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for PackageError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::Zip(other.to_string()),
        }
    }
}

impl From<walkdir::Error> for PackageError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        Self::Walk { path, source }
    }
}
