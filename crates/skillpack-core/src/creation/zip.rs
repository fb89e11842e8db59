//! ZIP package writing.
//!
//! Names are computed and validated for the whole tree before the first
//! byte is written, so a rejected name never leaves a half-built package.

use std::fs::File;
use std::fs::OpenOptions;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::PackageConfig;
use crate::PackageError;
use crate::PackageReport;
use crate::Result;
use crate::types::ArcName;
use crate::types::EntryKind;
use crate::types::SkillEntry;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// An entry paired with its validated archive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    /// The walked filesystem entry.
    pub entry: SkillEntry,
    /// Name it will be stored under.
    pub name: ArcName,
}

/// Computes and validates the archive name of every entry.
///
/// Directories get a trailing `/`.
///
/// # Errors
///
/// Returns `PackageError::UnsafeArchiveName` on the first name that fails
/// the traversal gate.
///
/// # Examples
///
/// ```
/// use skillpack_core::creation::zip::plan_entries;
/// use skillpack_core::types::EntryKind;
/// use skillpack_core::types::SkillEntry;
/// use std::path::Path;
/// use std::path::PathBuf;
///
/// let root = Path::new("/skills/demo");
/// let entries = vec![
///     SkillEntry::new(root, PathBuf::from("/skills/demo/SKILL.md"), EntryKind::File, 10),
///     SkillEntry::new(root, PathBuf::from("/skills/demo/lib"), EntryKind::Directory, 0),
/// ];
/// let planned = plan_entries("demo", entries)?;
/// assert_eq!(planned[0].name.as_str(), "demo/SKILL.md");
/// assert_eq!(planned[1].name.as_str(), "demo/lib/");
/// # Ok::<(), skillpack_core::PackageError>(())
/// ```
pub fn plan_entries(root_name: &str, entries: Vec<SkillEntry>) -> Result<Vec<PlannedEntry>> {
    entries
        .into_iter()
        .map(|entry| {
            let name = if entry.kind.is_directory() {
                ArcName::for_directory(root_name, &entry.relative_path)?
            } else {
                ArcName::for_entry(root_name, &entry.relative_path)?
            };
            Ok(PlannedEntry { entry, name })
        })
        .collect()
}

/// Writes planned entries as a ZIP archive into `writer`.
///
/// Counters and entry names are recorded in `report`. The writer is
/// returned once the central directory has been written.
///
/// # Errors
///
/// Returns an error if:
/// - A file cannot be opened or read
/// - A file was replaced by a symlink or special file after the walk
/// - The ZIP container cannot be written
pub fn write_zip<W: Write + Seek>(
    writer: W,
    entries: &[PlannedEntry],
    config: &PackageConfig,
    report: &mut PackageReport,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = base_options(config);

    // Reusable buffer for file copying
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for planned in entries {
        match planned.entry.kind {
            EntryKind::Directory => {
                zip.add_directory(planned.name.as_str(), options)?;
                report.directories_added += 1;
            }
            EntryKind::File => {
                let bytes = add_file(&mut zip, planned, options, config, &mut buffer)?;
                report.files_added += 1;
                report.bytes_read += bytes;
            }
            kind => {
                return Err(PackageError::UnsafeEntry {
                    path: planned.entry.path.clone(),
                    kind,
                });
            }
        }
        report.entries.push(planned.name.as_str().to_string());
    }

    Ok(zip.finish()?)
}

fn base_options(config: &PackageConfig) -> SimpleFileOptions {
    match config.compression_level {
        None => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        Some(level) => SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level))),
    }
}

fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    planned: &PlannedEntry,
    options: SimpleFileOptions,
    config: &PackageConfig,
    buffer: &mut [u8],
) -> Result<u64> {
    let mut file = open_regular_file(&planned.entry.path)?;
    let metadata = file.metadata()?;

    let mut file_options = options.large_file(metadata.len() >= u64::from(u32::MAX));
    if config.preserve_permissions {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file_options = file_options.unix_permissions(metadata.permissions().mode());
        }
    }

    zip.start_file(planned.name.as_str(), file_options)?;

    let mut bytes_read = 0u64;
    loop {
        let n = file.read(buffer)?;
        if n == 0 {
            break;
        }
        zip.write_all(&buffer[..n])?;
        bytes_read += n as u64;
    }

    Ok(bytes_read)
}

/// Opens a file for reading without following a final-component symlink.
///
/// The handle is checked with `fstat` so a file swapped for a fifo or
/// device after the walk is refused instead of read.
fn open_regular_file(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.read(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW | libc::O_NONBLOCK);
    }

    let file = match options.open(path) {
        Ok(file) => file,
        #[cfg(unix)]
        Err(e) if e.raw_os_error() == Some(libc::ELOOP) => {
            return Err(PackageError::UnsafeEntry {
                path: path.to_path_buf(),
                kind: EntryKind::Symlink,
            });
        }
        Err(e) => return Err(PackageError::Io(e)),
    };

    let kind = EntryKind::from_file_type(file.metadata()?.file_type());
    if !kind.is_file() {
        return Err(PackageError::UnsafeEntry {
            path: path.to_path_buf(),
            kind,
        });
    }

    Ok(file)
}
