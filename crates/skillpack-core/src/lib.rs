//! Secure packaging of skill directories into single-file archives.
//!
//! `skillpack-core` turns a directory holding a `SKILL.md` descriptor and
//! supporting files into a `<name>.skill` ZIP package. Packaging is
//! all-or-nothing: any symlink or special file anywhere in the tree, or any
//! archive name that is absolute or contains `..`, aborts the operation
//! before the package file exists.
//!
//! # Examples
//!
//! ```no_run
//! use skillpack_core::PackageConfig;
//! use skillpack_core::package_skill;
//! use skillpack_core::try_package_skill;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Null-result form: `None` on any failure
//! if let Some(path) = package_skill("skills/demo", Some(Path::new("dist"))) {
//!     println!("wrote {}", path.display());
//! }
//!
//! // Typed form with a report
//! let report = try_package_skill("skills/demo", None, &PackageConfig::default())?;
//! println!("packaged {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod creation;
pub mod error;
pub mod inspection;
pub mod report;
pub mod security;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::package_skill;
pub use api::try_package_skill;
pub use config::PackageConfig;
pub use error::PackageError;
pub use error::Result;
pub use report::PackageReport;

// Re-export inspection API
pub use inspection::IssueCategory;
pub use inspection::IssueSeverity;
pub use inspection::VerificationIssue;
pub use inspection::VerificationReport;
pub use inspection::VerificationStatus;
pub use inspection::list_package;
pub use inspection::verify_package;

// Re-export security gates
pub use security::is_unsafe_arc_name;
pub use security::is_unsafe_entry;
