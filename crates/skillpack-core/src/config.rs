//! Configuration for skill packaging operations.

use crate::PackageError;
use crate::Result;

/// Descriptor file every skill must carry at its root.
pub const DEFAULT_DESCRIPTOR: &str = "SKILL.md";

/// Extension of produced packages.
pub const DEFAULT_EXTENSION: &str = "skill";

/// Configuration for skill packaging.
///
/// # Examples
///
/// ```
/// use skillpack_core::PackageConfig;
///
/// // Use secure defaults
/// let config = PackageConfig::default();
///
/// // Customize for specific needs
/// let custom = PackageConfig::default()
///     .with_compression_level(9)
///     .with_overwrite(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageConfig {
    /// File that must exist at the skill root.
    ///
    /// Default: `"SKILL.md"`.
    pub descriptor_name: String,

    /// Extension of the produced package, without the dot.
    ///
    /// Default: `"skill"`.
    pub extension: String,

    /// Deflate level (1-9). `None` stores entries uncompressed.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Record unix permission bits of packaged files.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,

    /// Create the output directory (with parents) when it is missing.
    ///
    /// When `false`, a missing output directory fails with
    /// `PackageError::OutputDirNotFound`.
    ///
    /// Default: `true`.
    pub create_output_dir: bool,

    /// Replace an existing package at the output path.
    ///
    /// Default: `true`.
    pub overwrite: bool,
}

impl Default for PackageConfig {
    /// Creates a `PackageConfig` with default settings.
    ///
    /// Default values:
    /// - `descriptor_name`: `"SKILL.md"`
    /// - `extension`: `"skill"`
    /// - `compression_level`: `Some(6)`
    /// - `preserve_permissions`: `true`
    /// - `create_output_dir`: `true`
    /// - `overwrite`: `true`
    fn default() -> Self {
        Self {
            descriptor_name: DEFAULT_DESCRIPTOR.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            compression_level: Some(6),
            preserve_permissions: true,
            create_output_dir: true,
            overwrite: true,
        }
    }
}

impl PackageConfig {
    /// Creates a new `PackageConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the descriptor file name.
    #[must_use]
    pub fn with_descriptor_name(mut self, name: impl Into<String>) -> Self {
        self.descriptor_name = name.into();
        self
    }

    /// Sets the package extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the compression level is not in the range 1-9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!((1..=9).contains(&level), "compression level must be 1-9");
        self.compression_level = Some(level);
        self
    }

    /// Stores entries without compression.
    #[must_use]
    pub fn with_stored(mut self) -> Self {
        self.compression_level = None;
        self
    }

    /// Sets whether to preserve permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Sets whether a missing output directory is created.
    #[must_use]
    pub fn with_create_output_dir(mut self, create: bool) -> Self {
        self.create_output_dir = create;
        self
    }

    /// Sets whether an existing package is replaced.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Returns the package file name for a skill root name.
    ///
    /// ```
    /// use skillpack_core::PackageConfig;
    ///
    /// assert_eq!(PackageConfig::default().package_file_name("demo"), "demo.skill");
    /// ```
    #[must_use]
    pub fn package_file_name(&self, root_name: &str) -> String {
        format!("{root_name}.{}", self.extension)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Compression level is set but not in range 1-9
    /// - Descriptor name or extension is empty, or contains a path separator
    ///   or `..`
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(PackageError::InvalidCompressionLevel { level });
        }

        check_plain_name("descriptor name", &self.descriptor_name)?;
        check_plain_name("extension", &self.extension)?;
        Ok(())
    }
}

fn check_plain_name(what: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.contains(['/', '\\', '\0']) || value == ".." || value == "." {
        return Err(PackageError::InvalidConfig {
            reason: format!("{what} must be a plain file name, got {value:?}"),
        });
    }
    Ok(())
}
