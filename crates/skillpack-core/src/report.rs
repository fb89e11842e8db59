//! Packaging operation reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of a successful packaging operation.
///
/// # Examples
///
/// ```
/// use skillpack_core::PackageReport;
///
/// let mut report = PackageReport::default();
/// report.files_added = 3;
/// report.bytes_read = 1024;
/// report.archive_size = 512;
///
/// assert_eq!(report.compression_ratio(), 2.0);
/// assert_eq!(report.total_items(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageReport {
    /// Path of the written package.
    pub output_path: PathBuf,

    /// Name of the top-level directory inside the package.
    pub root_name: String,

    /// Number of regular files written.
    pub files_added: usize,

    /// Number of directory entries written.
    pub directories_added: usize,

    /// Bytes read from packaged files.
    pub bytes_read: u64,

    /// Size of the finished package on disk.
    pub archive_size: u64,

    /// Names written to the package, in order.
    pub entries: Vec<String>,

    /// Duration of the whole operation.
    pub duration: Duration,
}

impl PackageReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns bytes read divided by package size.
    ///
    /// Returns 0.0 if either side is 0.
    ///
    /// ```
    /// use skillpack_core::PackageReport;
    ///
    /// let mut report = PackageReport::new();
    /// report.bytes_read = 1000;
    /// assert_eq!(report.compression_ratio(), 0.0);
    ///
    /// report.archive_size = 250;
    /// assert_eq!(report.compression_ratio(), 4.0);
    /// ```
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.archive_size == 0 || self.bytes_read == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.archive_size as f64
    }

    /// Returns total number of entries written.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_added + self.directories_added
    }
}
