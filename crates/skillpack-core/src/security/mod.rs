//! Security gates applied while packaging.
//!
//! Two independent checks run on every entry: one on the filesystem kind
//! (symlinks and special files), one on the archive name (traversal and
//! absolute names). Either one alone is enough to refuse the package.

pub mod entry;
pub mod path;

pub use entry::is_unsafe_entry;
pub use entry::validate_entry;
pub use path::is_unsafe_arc_name;
pub use path::validate_arc_name;
