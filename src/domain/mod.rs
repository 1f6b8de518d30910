//! Domain logic - pure release rules independent of git and the hosting API

pub mod increment;
pub mod tag;
pub mod version;

pub use increment::{bump_version, IncrementRule};
pub use tag::{resolve_current_tag, Tag};
pub use version::{compare_versions, parse_version, render_version, ParsedVersion, Prefix};
