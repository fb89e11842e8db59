//! Package verification implementation.

use std::path::Path;

use crate::PackageConfig;
use crate::Result;
use crate::inspection::list::PackageEntry;
use crate::inspection::list::list_package_entries;
use crate::inspection::report::IssueCategory;
use crate::inspection::report::VerificationIssue;
use crate::inspection::report::VerificationReport;
use crate::inspection::report::VerificationStatus;
use crate::security::is_unsafe_arc_name;

/// Verifies a package's layout and names without extracting it.
///
/// Checks that:
/// - No stored name is absolute or contains a `..` segment
/// - No entry is stored as a symlink
/// - Every entry lives under one top-level directory
/// - That directory contains the descriptor file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read as a ZIP
/// container, or if `config` is invalid. Problems with the contents are
/// reported in `VerificationReport::issues`, not as errors.
///
/// # Examples
///
/// ```no_run
/// use skillpack_core::PackageConfig;
/// use skillpack_core::verify_package;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = verify_package("dist/demo.skill", &PackageConfig::default())?;
/// if !report.is_safe() {
///     for issue in &report.issues {
///         eprintln!("[{}] {}", issue.severity, issue.message);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub fn verify_package<P: AsRef<Path>>(
    path: P,
    config: &PackageConfig,
) -> Result<VerificationReport> {
    config.validate()?;
    let entries = list_package_entries(path.as_ref())?;

    let root_name = shared_root(&entries);
    let mut issues = Vec::new();

    for entry in &entries {
        issues.extend(verify_entry(entry, root_name));
    }

    let descriptor = root_name.map(|root| format!("{root}/{}", config.descriptor_name));
    let has_descriptor = descriptor
        .as_deref()
        .is_some_and(|d| entries.iter().any(|e| !e.is_dir && e.name == d));
    if !has_descriptor {
        issues.push(VerificationIssue::high(
            IssueCategory::MissingDescriptor,
            None,
            descriptor.map_or_else(
                || format!("{} not found: package has no top-level directory", config.descriptor_name),
                |d| format!("{d} not found"),
            ),
        ));
    }

    // Stable: entry order is kept within a severity
    issues.sort_by_key(|i| i.severity);

    let status = if issues.is_empty() {
        VerificationStatus::Pass
    } else {
        VerificationStatus::Fail
    };

    tracing::debug!(
        path = %path.as_ref().display(),
        entries = entries.len(),
        issues = issues.len(),
        "package verified"
    );

    Ok(VerificationReport {
        status,
        issues,
        total_entries: entries.len(),
        root_name: root_name.map(str::to_string),
    })
}

/// Top-level directory taken from the first well-formed entry name.
fn shared_root(entries: &[PackageEntry]) -> Option<&str> {
    entries
        .iter()
        .filter(|e| !is_unsafe_arc_name(&e.name))
        .find_map(|e| e.name.split_once('/').map(|(root, _)| root))
        .filter(|root| !root.is_empty())
}

fn verify_entry(entry: &PackageEntry, root: Option<&str>) -> Vec<VerificationIssue> {
    let mut issues = Vec::new();
    let name = entry.name.as_str();

    if is_unsafe_arc_name(name) {
        issues.push(VerificationIssue::critical(
            IssueCategory::PathTraversal,
            name,
            format!("entry name escapes the extraction directory: {name:?}"),
        ));
        return issues;
    }

    if entry.is_symlink() {
        issues.push(VerificationIssue::critical(
            IssueCategory::Symlink,
            name,
            format!("entry is stored as a symlink: {name}"),
        ));
    }

    let under_root = root.is_some_and(|root| {
        name.strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
    });
    if !under_root {
        issues.push(VerificationIssue::high(
            IssueCategory::OutsideRoot,
            Some(name),
            match root {
                Some(root) => format!("entry is not under {root}/: {name}"),
                None => format!("entry is not under a top-level directory: {name}"),
            },
        ));
    }

    issues
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::inspection::report::IssueSeverity;
    use crate::test_utils::ZipFixture;
    use tempfile::TempDir;

    fn verify(fixture: ZipFixture) -> VerificationReport {
        let temp = TempDir::new().unwrap();
        let path = fixture.write_to(temp.path().join("pkg.skill"));
        verify_package(&path, &PackageConfig::default()).unwrap()
    }

    #[test]
    fn test_verify_well_formed_package() {
        let report = verify(
            ZipFixture::new()
                .file("demo/SKILL.md", b"# Skill")
                .directory("demo/lib/")
                .file("demo/lib/util.py", b"pass"),
        );

        assert!(report.is_safe(), "{:?}", report.issues);
        assert_eq!(report.total_entries, 3);
        assert_eq!(report.root_name.as_deref(), Some("demo"));
    }

    #[test]
    fn test_verify_traversal_name() {
        let report = verify(
            ZipFixture::new()
                .file("demo/SKILL.md", b"# Skill")
                .file("demo/../../etc/cron.d/job", b"* * * * * root sh"),
        );

        assert_eq!(report.status, VerificationStatus::Fail);
        assert!(report.has(IssueCategory::PathTraversal));
        assert_eq!(report.issues[0].severity, IssueSeverity::Critical);
        assert_eq!(
            report.issues[0].entry_name.as_deref(),
            Some("demo/../../etc/cron.d/job")
        );
    }

    #[test]
    fn test_verify_absolute_name() {
        let report = verify(
            ZipFixture::new()
                .file("demo/SKILL.md", b"# Skill")
                .file("/etc/passwd", b"root:x:0:0"),
        );
        assert!(report.has(IssueCategory::PathTraversal));
        assert_eq!(report.count(IssueSeverity::Critical), 1);
    }

    #[test]
    fn test_verify_symlink_entry() {
        let report = verify(
            ZipFixture::new()
                .file("demo/SKILL.md", b"# Skill")
                .symlink("demo/link", "/etc/passwd"),
        );
        assert!(report.has(IssueCategory::Symlink));
        assert!(!report.is_safe());
    }

    #[test]
    fn test_verify_multiple_roots() {
        let report = verify(
            ZipFixture::new()
                .file("demo/SKILL.md", b"# Skill")
                .file("other/file.txt", b"x")
                .file("loose.txt", b"x"),
        );

        let outside: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.category == IssueCategory::OutsideRoot)
            .filter_map(|i| i.entry_name.as_deref())
            .collect();
        assert_eq!(outside, vec!["other/file.txt", "loose.txt"]);
    }

    #[test]
    fn test_verify_root_prefix_is_a_whole_segment() {
        let report = verify(
            ZipFixture::new()
                .file("demo/SKILL.md", b"# Skill")
                .file("demo2/x.txt", b"x"),
        );
        assert!(report.has(IssueCategory::OutsideRoot));
    }

    #[test]
    fn test_verify_missing_descriptor() {
        let report = verify(ZipFixture::new().file("demo/script.py", b"print()"));
        assert!(report.has(IssueCategory::MissingDescriptor));
        assert_eq!(report.count(IssueSeverity::High), 1);
    }

    #[test]
    fn test_verify_descriptor_directory_does_not_count() {
        let report = verify(
            ZipFixture::new()
                .directory("demo/SKILL.md/")
                .file("demo/SKILL.md/inner", b"x"),
        );
        assert!(report.has(IssueCategory::MissingDescriptor));
    }

    #[test]
    fn test_verify_empty_package() {
        let report = verify(ZipFixture::new());
        assert_eq!(report.total_entries, 0);
        assert_eq!(report.root_name, None);
        assert!(report.has(IssueCategory::MissingDescriptor));
    }

    #[test]
    fn test_verify_custom_descriptor() {
        let temp = TempDir::new().unwrap();
        let path = ZipFixture::new()
            .file("demo/skill.toml", b"name = \"demo\"")
            .write_to(temp.path().join("pkg.skill"));

        let config = PackageConfig::default().with_descriptor_name("skill.toml");
        let report = verify_package(&path, &config).unwrap();
        assert!(report.is_safe(), "{:?}", report.issues);
    }

    #[test]
    fn test_verify_critical_issues_sorted_first() {
        let report = verify(
            ZipFixture::new()
                .file("loose.txt", b"x")
                .file("demo/SKILL.md", b"# Skill")
                .file("../escape", b"x"),
        );
        assert_eq!(report.issues[0].category, IssueCategory::PathTraversal);
    }
}
