//! Validated skill source directory type.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use crate::PackageError;
use crate::Result;

use super::EntryKind;

/// A validated skill directory ready to be walked.
///
/// This type represents a directory that has been validated to:
/// - Exist and be a real directory (not a symlink to one)
/// - Contain the descriptor file as a regular file at its root
/// - Be represented as an absolute canonical path
/// - Have a final path segment usable as the package name
///
/// # Examples
///
/// ```no_run
/// use skillpack_core::types::SourceDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = SourceDir::open("skills/demo", "SKILL.md")?;
/// assert_eq!(source.root_name(), "demo");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDir {
    path: PathBuf,
    root_name: String,
}

impl SourceDir {
    /// Opens and validates a skill directory.
    ///
    /// # Validation
    ///
    /// 1. Trailing separators are dropped so `demo/` names `demo` itself
    /// 2. The path is inspected with `symlink_metadata`: a symlinked root
    ///    is rejected before anything is resolved
    /// 3. The path must be a directory
    /// 4. The path is canonicalized to an absolute path
    /// 5. `<path>/<descriptor>` must be a regular file or a symlink; a
    ///    symlinked descriptor is left for the walk to reject
    /// 6. The canonical path must have a UTF-8 final segment
    ///
    /// # Errors
    ///
    /// - `PackageError::SourceNotFound` if the path does not exist
    /// - `PackageError::UnsafeEntry` if the path itself is a symlink
    /// - `PackageError::NotADirectory` if it is not a directory
    /// - `PackageError::MissingDescriptor` if the descriptor is absent
    /// - `PackageError::UnnamedSource` if no package name can be derived
    /// - `PackageError::Io` if the path or descriptor cannot be inspected
    pub fn open<P: AsRef<Path>>(path: P, descriptor: &str) -> Result<Self> {
        let given: PathBuf = path.as_ref().components().collect();

        let metadata = match fs::symlink_metadata(&given) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PackageError::SourceNotFound { path: given });
            }
            Err(e) => return Err(PackageError::Io(e)),
        };

        let kind = EntryKind::from_file_type(metadata.file_type());
        if kind.is_symlink() {
            return Err(PackageError::UnsafeEntry { path: given, kind });
        }
        if !kind.is_directory() {
            return Err(PackageError::NotADirectory { path: given });
        }

        let canonical = given.canonicalize()?;

        let descriptor_path = canonical.join(descriptor);
        let has_descriptor = match fs::symlink_metadata(&descriptor_path) {
            Ok(metadata) => !metadata.is_dir(),
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(PackageError::Io(e)),
        };
        if !has_descriptor {
            return Err(PackageError::MissingDescriptor {
                path: canonical,
                name: descriptor.to_string(),
            });
        }

        let root_name = canonical
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| PackageError::UnnamedSource {
                path: canonical.clone(),
            })?;

        Ok(Self {
            path: canonical,
            root_name,
        })
    }

    /// Returns the canonical absolute path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Returns the final path segment, used as the package name.
    #[inline]
    #[must_use]
    pub fn root_name(&self) -> &str {
        &self.root_name
    }
}
