//! Test utilities for building packages with arbitrary contents.
//!
//! The packager refuses to write unsafe names or symlinks, so tests of the
//! inspection side build hostile packages directly with these helpers.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::PathBuf;

use zip::write::SimpleFileOptions;

/// Builder for ZIP packages with any entry names, including unsafe ones.
///
/// # Examples
///
/// ```
/// use skillpack_core::test_utils::ZipFixture;
///
/// let bytes = ZipFixture::new()
///     .file("demo/SKILL.md", b"# Skill")
///     .directory("demo/lib/")
///     .file("demo/../../etc/passwd", b"root:x:0:0")
///     .symlink("demo/link", "/etc/shadow")
///     .build();
/// assert_eq!(&bytes[0..2], b"PK");
/// ```
pub struct ZipFixture {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipFixture {
    /// Creates an empty fixture.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a regular file with mode 0o644.
    #[must_use]
    pub fn file(self, name: &str, data: &[u8]) -> Self {
        self.file_with_mode(name, data, 0o644)
    }

    /// Adds a regular file with a custom mode.
    #[must_use]
    pub fn file_with_mode(mut self, name: &str, data: &[u8], mode: u32) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(mode);
        self.zip.start_file(name, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn directory(mut self, name: &str) -> Self {
        self.zip
            .add_directory(name, SimpleFileOptions::default())
            .unwrap();
        self
    }

    /// Adds a symlink entry pointing at `target`.
    #[must_use]
    pub fn symlink(mut self, name: &str, target: &str) -> Self {
        self.zip
            .add_symlink(name, target, SimpleFileOptions::default())
            .unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    /// Finishes the archive and writes it to `path`.
    pub fn write_to(self, path: impl Into<PathBuf>) -> PathBuf {
        let path = path.into();
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

impl Default for ZipFixture {
    fn default() -> Self {
        Self::new()
    }
}
