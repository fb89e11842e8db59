//! Package creation.
//!
//! The walker enumerates and checks a skill tree; the ZIP writer turns the
//! checked entries into a package.

pub mod walker;
pub mod zip;

// Re-exports for public API
pub use walker::SkillEntries;
pub use walker::SkillWalker;
pub use walker::walk;
pub use zip::PlannedEntry;
