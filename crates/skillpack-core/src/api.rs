//! High-level public API for skill packaging.

use std::fs;
use std::io::BufWriter;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use tempfile::NamedTempFile;

use crate::PackageConfig;
use crate::PackageError;
use crate::PackageReport;
use crate::Result;
use crate::creation::PlannedEntry;
use crate::creation::SkillWalker;
use crate::creation::zip::plan_entries;
use crate::creation::zip::write_zip;
use crate::types::SourceDir;

/// Packages a skill directory, returning the package path on success.
///
/// Uses [`PackageConfig::default`]. When `output_dir` is `None` the package
/// is written to the current working directory. Every failure, including
/// a rejected symlink or a missing `SKILL.md`, yields `None`; the reason is
/// logged as a `tracing` warning. Use [`try_package_skill`] to get the
/// typed error instead.
///
/// # Examples
///
/// ```no_run
/// use skillpack_core::package_skill;
/// use std::path::Path;
///
/// match package_skill("skills/demo", Some(Path::new("dist"))) {
///     Some(path) => println!("wrote {}", path.display()),
///     None => eprintln!("packaging failed"),
/// }
/// ```
pub fn package_skill<P: AsRef<Path>>(source: P, output_dir: Option<&Path>) -> Option<PathBuf> {
    let source = source.as_ref();
    match try_package_skill(source, output_dir, &PackageConfig::default()) {
        Ok(report) => Some(report.output_path),
        Err(e) => {
            tracing::warn!(
                source = %source.display(),
                security = e.is_security_violation(),
                error = %e,
                "skill packaging failed"
            );
            None
        }
    }
}

/// Packages a skill directory and reports what was written.
///
/// The source must be a real directory (not a symlink) directly containing
/// the descriptor file. Every entry is checked and every archive name is
/// validated before the output file is created. The package is assembled
/// in a temporary file in the output directory and renamed into place, so
/// the final path never holds a partial package.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The source is missing, not a directory, or a symlink
/// - The descriptor file is absent
/// - Any entry is a symlink or special file
/// - Any archive name fails the traversal check
/// - The output directory is missing and may not be created
/// - The package exists and overwriting is disabled
/// - I/O operations fail
///
/// # Examples
///
/// ```no_run
/// use skillpack_core::PackageConfig;
/// use skillpack_core::try_package_skill;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PackageConfig::default().with_compression_level(9);
/// let report = try_package_skill("skills/demo", None, &config)?;
/// println!(
///     "{}: {} files, {} bytes",
///     report.output_path.display(),
///     report.files_added,
///     report.archive_size
/// );
/// # Ok(())
/// # }
/// ```
pub fn try_package_skill<P: AsRef<Path>>(
    source: P,
    output_dir: Option<&Path>,
    config: &PackageConfig,
) -> Result<PackageReport> {
    let start = Instant::now();
    config.validate()?;

    let source = SourceDir::open(source, &config.descriptor_name)?;
    tracing::debug!(source = %source.as_path().display(), "source accepted");

    let entries = SkillWalker::new(source.as_path()).walk()?;
    let planned = plan_entries(source.root_name(), entries)?;
    tracing::debug!(entries = planned.len(), "archive names validated");

    let output_dir = resolve_output_dir(output_dir, config)?;
    let output_path = output_dir.join(config.package_file_name(source.root_name()));
    if !config.overwrite && fs::symlink_metadata(&output_path).is_ok() {
        return Err(PackageError::OutputExists { path: output_path });
    }

    let mut report = PackageReport {
        root_name: source.root_name().to_string(),
        ..PackageReport::default()
    };

    write_package(&planned, &output_dir, &output_path, config, &mut report)?;

    report.output_path = output_path;
    report.duration = start.elapsed();

    tracing::info!(
        path = %report.output_path.display(),
        files = report.files_added,
        directories = report.directories_added,
        bytes = report.archive_size,
        "package written"
    );
    Ok(report)
}

/// Resolves the output directory, creating it when allowed.
fn resolve_output_dir(output_dir: Option<&Path>, config: &PackageConfig) -> Result<PathBuf> {
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };

    match fs::metadata(&dir) {
        Ok(meta) if meta.is_dir() => Ok(dir),
        Ok(_) => Err(PackageError::NotADirectory { path: dir }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if !config.create_output_dir {
                return Err(PackageError::OutputDirNotFound { path: dir });
            }
            fs::create_dir_all(&dir)?;
            tracing::debug!(path = %dir.display(), "created output directory");
            Ok(dir)
        }
        Err(e) => Err(PackageError::Io(e)),
    }
}

/// Writes the archive to a temporary file in `output_dir` and renames it to
/// `output_path`. On any error the temporary file is removed.
fn write_package(
    planned: &[PlannedEntry],
    output_dir: &Path,
    output_path: &Path,
    config: &PackageConfig,
    report: &mut PackageReport,
) -> Result<()> {
    let temp = NamedTempFile::new_in(output_dir)?;
    let writer = write_zip(BufWriter::new(temp), planned, config, report)?;
    let temp = writer
        .into_inner()
        .map_err(|e| PackageError::Io(e.into_error()))?;

    temp.as_file().sync_all()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    report.archive_size = temp.as_file().metadata()?.len();

    persist(temp, output_path, config.overwrite)
}

fn persist(temp: NamedTempFile, path: &Path, overwrite: bool) -> Result<()> {
    let result = if overwrite {
        temp.persist(path)
    } else {
        temp.persist_noclobber(path)
    };

    match result {
        Ok(_) => Ok(()),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Err(PackageError::OutputExists {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(PackageError::Io(e.error)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::inspection::list_package;
    use crate::types::EntryKind;
    use tempfile::TempDir;

    fn make_skill(parent: &Path, name: &str) -> PathBuf {
        let root = parent.join(name);
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("SKILL.md"), "---\nname: test\n---\n# Skill").unwrap();
        fs::write(root.join("script.py"), "print(\"Hello from skill\")").unwrap();
        root
    }

    fn leftover_files(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_try_package_skill_basic() {
        let temp = TempDir::new().unwrap();
        let source = make_skill(temp.path(), "demo");
        let out = temp.path().join("out");

        let report = try_package_skill(&source, Some(&out), &PackageConfig::default()).unwrap();

        assert_eq!(report.output_path, out.join("demo.skill"));
        assert_eq!(report.root_name, "demo");
        assert_eq!(report.files_added, 2);
        assert_eq!(report.directories_added, 0);
        assert!(report.archive_size > 0);
        assert_eq!(report.entries, vec!["demo/SKILL.md", "demo/script.py"]);
        assert_eq!(
            list_package(&report.output_path).unwrap(),
            vec!["demo/SKILL.md", "demo/script.py"]
        );
    }

    #[test]
    fn test_package_skill_returns_path() {
        let temp = TempDir::new().unwrap();
        let source = make_skill(temp.path(), "demo");
        let out = temp.path().join("out");

        let path = package_skill(&source, Some(&out)).unwrap();
        assert_eq!(path, out.join("demo.skill"));
        assert!(path.is_file());
    }

    #[test]
    fn test_package_skill_missing_descriptor_is_none() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("bare");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("script.py"), "pass").unwrap();
        let out = temp.path().join("out");

        assert!(package_skill(&source, Some(&out)).is_none());
        assert!(!out.join("bare.skill").exists());
    }

    #[test]
    fn test_custom_extension() {
        let temp = TempDir::new().unwrap();
        let source = make_skill(temp.path(), "demo");
        let config = PackageConfig::default().with_extension("zip");

        let report = try_package_skill(&source, Some(temp.path()), &config).unwrap();
        assert_eq!(report.output_path, temp.path().join("demo.zip"));
    }

    #[test]
    fn test_invalid_config_fails_before_walk() {
        let temp = TempDir::new().unwrap();
        let config = PackageConfig::default().with_extension("");

        let result = try_package_skill(temp.path().join("missing"), None, &config);
        assert!(matches!(result, Err(PackageError::InvalidConfig { .. })));
    }

    #[test]
    fn test_output_dir_created() {
        let temp = TempDir::new().unwrap();
        let source = make_skill(temp.path(), "demo");
        let out = temp.path().join("a/b/c");

        let report = try_package_skill(&source, Some(&out), &PackageConfig::default()).unwrap();
        assert!(out.is_dir());
        assert!(report.output_path.is_file());
    }

    #[test]
    fn test_output_dir_not_created_when_disabled() {
        let temp = TempDir::new().unwrap();
        let source = make_skill(temp.path(), "demo");
        let out = temp.path().join("missing");
        let config = PackageConfig::default().with_create_output_dir(false);

        let result = try_package_skill(&source, Some(&out), &config);
        assert!(matches!(result, Err(PackageError::OutputDirNotFound { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn test_output_dir_is_file() {
        let temp = TempDir::new().unwrap();
        let source = make_skill(temp.path(), "demo");
        let out = temp.path().join("out.txt");
        fs::write(&out, "not a dir").unwrap();

        let result = try_package_skill(&source, Some(&out), &PackageConfig::default());
        assert!(matches!(result, Err(PackageError::NotADirectory { .. })));
    }

    #[test]
    fn test_overwrite_existing_package() {
        let temp = TempDir::new().unwrap();
        let source = make_skill(temp.path(), "demo");
        let out = temp.path().join("out");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("demo.skill"), "stale").unwrap();

        let report = try_package_skill(&source, Some(&out), &PackageConfig::default()).unwrap();
        assert_eq!(list_package(&report.output_path).unwrap().len(), 2);
    }

    #[test]
    fn test_no_overwrite_keeps_existing_package() {
        let temp = TempDir::new().unwrap();
        let source = make_skill(temp.path(), "demo");
        let out = temp.path().join("out");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("demo.skill"), "stale").unwrap();
        let config = PackageConfig::default().with_overwrite(false);

        let result = try_package_skill(&source, Some(&out), &config);
        assert!(matches!(result, Err(PackageError::OutputExists { .. })));
        assert_eq!(fs::read_to_string(out.join("demo.skill")).unwrap(), "stale");
        assert_eq!(leftover_files(&out), vec!["demo.skill"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_leaves_no_output() {
        let temp = TempDir::new().unwrap();
        let source = make_skill(temp.path(), "evil");
        std::os::unix::fs::symlink("/etc/passwd", source.join("link")).unwrap();
        let out = temp.path().join("out");

        let result = try_package_skill(&source, Some(&out), &PackageConfig::default());
        assert!(matches!(
            result,
            Err(PackageError::UnsafeEntry {
                kind: EntryKind::Symlink,
                ..
            })
        ));
        // Rejected during the walk, before the output side is touched
        assert!(!out.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_package_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let source = make_skill(temp.path(), "demo");

        let report = try_package_skill(&source, Some(temp.path()), &PackageConfig::default())
            .unwrap();
        let mode = fs::metadata(&report.output_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    fn plan(source: &Path) -> (SourceDir, Vec<PlannedEntry>) {
        let source = SourceDir::open(source, "SKILL.md").unwrap();
        let entries = SkillWalker::new(source.as_path()).walk().unwrap();
        let planned = plan_entries(source.root_name(), entries).unwrap();
        (source, planned)
    }

    #[test]
    fn test_failed_write_leaves_no_partial_package() {
        let temp = TempDir::new().unwrap();
        let source = make_skill(temp.path(), "demo");
        let out = temp.path().join("out");
        fs::create_dir(&out).unwrap();

        let (_source, planned) = plan(&source);
        // Vanishes after the walk, so the write fails part way through
        fs::remove_file(source.join("script.py")).unwrap();

        let output_path = out.join("demo.skill");
        let mut report = PackageReport::default();
        let result = write_package(
            &planned,
            &out,
            &output_path,
            &PackageConfig::default(),
            &mut report,
        );

        assert!(matches!(result, Err(PackageError::Io(_))));
        assert_eq!(report.entries, vec!["demo/SKILL.md"]);
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_write_keeps_previous_package() {
        let temp = TempDir::new().unwrap();
        let source = make_skill(temp.path(), "demo");
        let previous = temp.path().join("demo.skill");
        fs::write(&previous, "previous").unwrap();

        let (_source, planned) = plan(&source);
        fs::remove_file(source.join("script.py")).unwrap();

        let result = write_package(
            &planned,
            temp.path(),
            &previous,
            &PackageConfig::default(),
            &mut PackageReport::default(),
        );

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&previous).unwrap(), "previous");
        let mut names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["demo", "demo.skill"]);
    }
}
