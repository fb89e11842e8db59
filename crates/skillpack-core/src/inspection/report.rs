//! Verification report types.

use std::fmt;

/// Overall verification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationStatus {
    /// No issues found.
    Pass,
    /// At least one issue was found.
    Fail,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Issue severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueSeverity {
    /// Would write outside the extraction directory or link out of it.
    Critical,
    /// Package does not have the expected skill layout.
    High,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "CRITICAL"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// What kind of problem an issue describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    /// Name is absolute or contains a `..` segment.
    PathTraversal,
    /// Entry is stored as a symlink.
    Symlink,
    /// Entry is not under the shared top-level directory.
    OutsideRoot,
    /// `<root>/SKILL.md` is absent.
    MissingDescriptor,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PathTraversal => "path traversal",
            Self::Symlink => "symlink",
            Self::OutsideRoot => "outside root",
            Self::MissingDescriptor => "missing descriptor",
        };
        f.write_str(s)
    }
}

/// A single problem found in a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationIssue {
    /// How serious the problem is.
    pub severity: IssueSeverity,
    /// Problem category.
    pub category: IssueCategory,
    /// Stored name of the offending entry, if the issue is per-entry.
    pub entry_name: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl VerificationIssue {
    pub(crate) fn critical(category: IssueCategory, name: &str, message: String) -> Self {
        Self {
            severity: IssueSeverity::Critical,
            category,
            entry_name: Some(name.to_string()),
            message,
        }
    }

    pub(crate) fn high(category: IssueCategory, name: Option<&str>, message: String) -> Self {
        Self {
            severity: IssueSeverity::High,
            category,
            entry_name: name.map(str::to_string),
            message,
        }
    }
}

/// Result of [`verify_package`](crate::verify_package).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    /// Overall result.
    pub status: VerificationStatus,
    /// Issues ordered by severity.
    pub issues: Vec<VerificationIssue>,
    /// Number of entries in the package.
    pub total_entries: usize,
    /// Top-level directory shared by the entries, if one could be derived.
    pub root_name: Option<String>,
}

impl VerificationReport {
    /// Returns `true` if no issues were found.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.status == VerificationStatus::Pass
    }

    /// Number of issues with the given severity.
    #[must_use]
    pub fn count(&self, severity: IssueSeverity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Returns `true` if any issue has the given category.
    #[must_use]
    pub fn has(&self, category: IssueCategory) -> bool {
        self.issues.iter().any(|i| i.category == category)
    }
}
