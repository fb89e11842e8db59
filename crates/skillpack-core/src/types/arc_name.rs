//! Validated archive entry name type.

use std::fmt;
use std::path::Component;
use std::path::Path;

use crate::PackageError;
use crate::Result;
use crate::security::path::validate_arc_name;

/// A validated name under which an entry is stored in a skill package.
///
/// `ArcName` always uses `/` separators, is relative, and contains no `..`
/// segment.
///
/// # Security Properties
///
/// - Can ONLY be constructed through validation
/// - NO `From<String>` implementation
///
/// # Examples
///
/// ```
/// use skillpack_core::types::ArcName;
/// use std::path::Path;
///
/// let name = ArcName::for_entry("demo", Path::new("lib/util.py"))?;
/// assert_eq!(name.as_str(), "demo/lib/util.py");
///
/// assert!(ArcName::new("demo/../../etc/passwd").is_err());
/// # Ok::<(), skillpack_core::PackageError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcName(String);

impl ArcName {
    /// Validates and wraps an already-formed archive name.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::UnsafeArchiveName` if the name is absolute,
    /// empty, or has a `..` segment.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_arc_name(&name)?;
        Ok(Self(name))
    }

    /// Computes `<root_name>/<relative>` and validates it.
    ///
    /// The join follows host path semantics, so an absolute `relative`
    /// replaces the root and is then rejected by validation. Parent
    /// segments are carried through verbatim for the same reason.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::UnsafeArchiveName` for unsafe results and
    /// `PackageError::Io` for names that are not valid UTF-8.
    pub fn for_entry(root_name: &str, relative: &Path) -> Result<Self> {
        let joined = Path::new(root_name).join(relative);
        Self::new(to_archive_string(&joined)?)
    }

    /// Same as [`ArcName::for_entry`] with a trailing `/`, the ZIP marker
    /// for directory entries.
    pub fn for_directory(root_name: &str, relative: &Path) -> Result<Self> {
        let mut name = Self::for_entry(root_name, relative)?;
        if !name.0.ends_with('/') {
            name.0.push('/');
        }
        Ok(name)
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts into the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ArcName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArcName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Renders a host path with `/` separators.
///
/// Root and prefix components are kept so absolute paths stay visibly
/// absolute for the name gate.
fn to_archive_string(path: &Path) -> Result<String> {
    let mut name = String::new();

    for component in path.components() {
        let segment = match component {
            Component::Prefix(prefix) => os_to_str(prefix.as_os_str(), path)?,
            Component::RootDir => {
                name.push('/');
                continue;
            }
            Component::CurDir => continue,
            Component::ParentDir => "..",
            Component::Normal(part) => os_to_str(part, path)?,
        };

        if !name.is_empty() && !name.ends_with('/') {
            name.push('/');
        }
        name.push_str(segment);
    }

    Ok(name)
}

fn os_to_str<'a>(part: &'a std::ffi::OsStr, path: &Path) -> Result<&'a str> {
    part.to_str().ok_or_else(|| {
        PackageError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("path is not valid UTF-8: {}", path.display()),
        ))
    })
}
