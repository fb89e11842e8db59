//! Package inspection without extraction.
//!
//! Reads only the ZIP central directory. Stored names are treated as
//! untrusted strings and are never joined onto a filesystem path.
//!
//! # Examples
//!
//! ```no_run
//! use skillpack_core::PackageConfig;
//! use skillpack_core::list_package;
//! use skillpack_core::verify_package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let names = list_package("dist/demo.skill")?;
//! println!("package contains {} entries", names.len());
//!
//! let report = verify_package("dist/demo.skill", &PackageConfig::default())?;
//! if report.is_safe() {
//!     println!("package is well formed");
//! }
//! # Ok(())
//! # }
//! ```

pub mod list;
pub mod report;
pub mod verify;

pub use list::PackageEntry;
pub use list::list_package;
pub use list::list_package_entries;
pub use report::IssueCategory;
pub use report::IssueSeverity;
pub use report::VerificationIssue;
pub use report::VerificationReport;
pub use report::VerificationStatus;
pub use verify::verify_package;
