use super::version::ParsedVersion;
use std::fmt;

/// Marker that requests a major bump when found anywhere in a commit message
pub const MAJOR_MARKER: &str = "#major";
/// Marker that requests a minor bump when found anywhere in a commit message
pub const MINOR_MARKER: &str = "#minor";

/// Which version component a release increments.
///
/// Variants are declared in ascending order of impact, so `Major > Minor > Patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IncrementRule {
    Patch,
    Minor,
    Major,
}

impl IncrementRule {
    /// Selects the rule for a commit message.
    ///
    /// Plain case-sensitive substring test; `#major` wins over `#minor`, and a
    /// message with neither marker is a patch.
    pub fn from_commit_message(message: &str) -> Self {
        if message.contains(MAJOR_MARKER) {
            IncrementRule::Major
        } else if message.contains(MINOR_MARKER) {
            IncrementRule::Minor
        } else {
            IncrementRule::Patch
        }
    }

    /// Applies the rule, resetting lower components to zero.
    pub fn apply(&self, version: &ParsedVersion) -> ParsedVersion {
        let (major, minor, patch) = version.numbers();
        let (major, minor, patch) = match self {
            IncrementRule::Major => (major.saturating_add(1), 0, 0),
            IncrementRule::Minor => (major, minor.saturating_add(1), 0),
            IncrementRule::Patch => (major, minor, patch.saturating_add(1)),
        };
        ParsedVersion {
            major,
            minor,
            patch,
            prefix: version.prefix,
        }
    }
}

impl fmt::Display for IncrementRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IncrementRule::Major => "major",
            IncrementRule::Minor => "minor",
            IncrementRule::Patch => "patch",
        };
        f.write_str(name)
    }
}

/// Computes the next version for a commit message. Never fails.
///
/// # Example
/// ```
/// use merge_tagger::domain::increment::bump_version;
/// use merge_tagger::domain::version::parse_version;
///
/// let current = parse_version("v1.4.2").unwrap();
/// assert_eq!(bump_version(&current, "fix bug #minor").to_string(), "v1.5.0");
/// ```
pub fn bump_version(current: &ParsedVersion, message: &str) -> ParsedVersion {
    IncrementRule::from_commit_message(message).apply(current)
}
