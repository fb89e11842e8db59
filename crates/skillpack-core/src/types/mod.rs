//! Types shared across the packaging pipeline.
//!
//! Security-relevant values are newtypes that can only be built through
//! validation: [`SourceDir`] for the skill root and [`ArcName`] for names
//! written into the archive.

pub mod arc_name;
pub mod entry_kind;
pub mod skill_entry;
pub mod source_dir;

pub use arc_name::ArcName;
pub use entry_kind::EntryKind;
pub use skill_entry::SkillEntry;
pub use source_dir::SourceDir;
