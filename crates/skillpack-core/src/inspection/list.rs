//! Package listing implementation.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::Result;

const S_IFMT: u32 = 0o170_000;
const S_IFLNK: u32 = 0o120_000;

/// Metadata for one stored entry, read from the central directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Stored name, exactly as written in the package.
    pub name: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Compressed size in bytes.
    pub compressed_size: u64,
    /// Unix mode, when the creator recorded one.
    pub mode: Option<u32>,
}

impl PackageEntry {
    /// Returns `true` if the unix mode marks this entry as a symlink.
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        self.mode.is_some_and(|mode| mode & S_IFMT == S_IFLNK)
    }
}

/// Lists entry names of a package in stored order.
///
/// Names are returned verbatim. Nothing is extracted and no name is
/// interpreted as a filesystem path.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a valid ZIP
/// container.
///
/// # Examples
///
/// ```no_run
/// use skillpack_core::list_package;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// for name in list_package("dist/demo.skill")? {
///     println!("{name}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn list_package<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    Ok(list_package_entries(path)?
        .into_iter()
        .map(|entry| entry.name)
        .collect())
}

/// Lists entries of a package with their stored metadata.
///
/// # Errors
///
/// Same as [`list_package`].
pub fn list_package_entries<P: AsRef<Path>>(path: P) -> Result<Vec<PackageEntry>> {
    let file = File::open(path.as_ref())?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        entries.push(PackageEntry {
            name: entry.name().to_string(),
            is_dir: entry.is_dir(),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
            mode: entry.unix_mode(),
        });
    }

    Ok(entries)
}
