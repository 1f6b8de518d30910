use crate::error::{Result, TaggerError};
use std::cmp::Ordering;
use std::fmt;

/// Leading letter a release tag was written with.
///
/// Records the repository's prefix convention so a bumped version renders in
/// the same shape as the tag it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Prefix {
    #[default]
    None,
    /// `v1.2.3`
    Lower,
    /// `V1.2.3`
    Upper,
}

impl Prefix {
    fn as_str(&self) -> &'static str {
        match self {
            Prefix::None => "",
            Prefix::Lower => "v",
            Prefix::Upper => "V",
        }
    }
}

/// A release version read from a tag: three numeric components plus the
/// prefix the tag carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prefix: Prefix,
}

impl ParsedVersion {
    /// Create a version without a prefix
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        ParsedVersion {
            major,
            minor,
            patch,
            prefix: Prefix::None,
        }
    }

    /// Same numbers, written with the given prefix
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = prefix;
        self
    }

    /// Whether the originating tag started with `v` or `V`
    pub fn is_prefixed(&self) -> bool {
        self.prefix != Prefix::None
    }

    /// The numeric components as a tuple, in significance order
    pub fn numbers(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{}.{}",
            self.prefix.as_str(),
            self.major,
            self.minor,
            self.patch
        )
    }
}

/// Parses a tag's text into a [`ParsedVersion`].
///
/// One leading `v` or `V` is stripped and remembered. What remains must be
/// exactly `MAJOR.MINOR.PATCH`: non-negative integers without leading zeros and
/// with no pre-release or build suffix.
///
/// # Errors
/// [`TaggerError::MalformedVersion`] carrying the original text.
///
/// # Example
/// ```
/// use merge_tagger::domain::version::{parse_version, Prefix};
///
/// let v = parse_version("v1.2.3").unwrap();
/// assert_eq!(v.numbers(), (1, 2, 3));
/// assert_eq!(v.prefix, Prefix::Lower);
/// assert!(parse_version("1.2").is_err());
/// ```
pub fn parse_version(text: &str) -> Result<ParsedVersion> {
    let (prefix, numeric) = match text.chars().next() {
        Some('v') => (Prefix::Lower, &text[1..]),
        Some('V') => (Prefix::Upper, &text[1..]),
        _ => (Prefix::None, text),
    };

    let version = semver::Version::parse(numeric).map_err(|_| TaggerError::malformed(text))?;
    if !version.pre.is_empty() || !version.build.is_empty() {
        return Err(TaggerError::malformed(text));
    }

    Ok(ParsedVersion {
        major: version.major,
        minor: version.minor,
        patch: version.patch,
        prefix,
    })
}

/// Renders a version back to tag text; the inverse of [`parse_version`].
pub fn render_version(version: &ParsedVersion) -> String {
    version.to_string()
}

/// Orders two versions by `(major, minor, patch)` as integers, ignoring the prefix.
pub fn compare_versions(a: &ParsedVersion, b: &ParsedVersion) -> Ordering {
    a.numbers().cmp(&b.numbers())
}
