//! Error conversion utilities for CLI.
//!
//! Converts skillpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use skillpack_core::PackageError;
use std::path::Path;

/// Converts `PackageError` to user-friendly anyhow error with context
pub fn convert_package_error(err: PackageError, source: &Path) -> anyhow::Error {
    match err {
        PackageError::UnsafeEntry { path, kind } => {
            anyhow!(
                "Security violation: '{}' contains a {} at '{}'\n\
                 HINT: Skills may only contain regular files and directories. \
                 Replace the link with a copy of its target.",
                source.display(),
                kind,
                path.display()
            )
        }
        PackageError::UnsafeArchiveName { name } => {
            anyhow!(
                "Security violation: entry name {name:?} from '{}' would escape the package root\n\
                 HINT: Rename the offending file or directory.",
                source.display()
            )
        }
        PackageError::SourceNotFound { path } => {
            anyhow!("Skill directory not found: {}", path.display())
        }
        PackageError::NotADirectory { path } => {
            anyhow!(
                "Not a directory: {}\n\
                 HINT: Pass the skill directory, not a file inside it.",
                path.display()
            )
        }
        PackageError::MissingDescriptor { path, name } => {
            anyhow!(
                "{name} not found in {}\n\
                 HINT: Every skill needs a {name} file at its top level.",
                path.display()
            )
        }
        PackageError::OutputDirNotFound { path } => {
            anyhow!("Output directory not found: {}", path.display())
        }
        PackageError::OutputExists { path } => {
            anyhow!(
                "Package already exists: {}\n\
                 HINT: Remove --no-overwrite to replace it.",
                path.display()
            )
        }
        PackageError::Zip(reason) => {
            anyhow!(
                "Invalid package '{}': {}\n\
                 HINT: The file may be corrupted or not a ZIP container.",
                source.display(),
                reason
            )
        }
        PackageError::Io(io_err) => {
            anyhow!("I/O error while processing '{}': {}", source.display(), io_err)
        }
        _ => anyhow::Error::from(err).context(format!("Error processing '{}'", source.display())),
    }
}

/// Adds context to a core result
pub fn add_package_context<T>(
    result: Result<T, PackageError>,
    source: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_package_error(e, source))
}
