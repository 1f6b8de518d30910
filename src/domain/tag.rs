use super::version::{compare_versions, parse_version};
use crate::error::{Result, TaggerError};

/// Represents a git tag together with the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// Full hex id of the referenced commit
    pub commit: String,
    /// Committed-at time of the referenced commit, seconds since the epoch
    pub committed_at: i64,
}

impl Tag {
    /// Create a new tag
    pub fn new(name: impl Into<String>, commit: impl Into<String>, committed_at: i64) -> Self {
        Tag {
            name: name.into(),
            commit: commit.into(),
            committed_at,
        }
    }
}

/// Selects the tag that marks the latest release.
///
/// The winner sits on the commit with the newest committed-at time. When several
/// tags share that commit time, all of them are parsed and the numerically
/// greatest version wins; equal versions (`v1.2.3` and `1.2.3`) fall back to the
/// greater tag name so the result does not depend on input order.
///
/// A lone newest tag is returned without being parsed.
///
/// # Errors
/// * [`TaggerError::NoTags`] - `tags` is empty
/// * [`TaggerError::AmbiguousOrMalformedTag`] - a tied tag is not a version
pub fn resolve_current_tag(tags: &[Tag]) -> Result<&Tag> {
    let newest = tags
        .iter()
        .map(|tag| tag.committed_at)
        .max()
        .ok_or(TaggerError::NoTags)?;

    let candidates: Vec<&Tag> = tags
        .iter()
        .filter(|tag| tag.committed_at == newest)
        .collect();

    if let [only] = candidates.as_slice() {
        return Ok(*only);
    }

    let mut parsed = Vec::with_capacity(candidates.len());
    for tag in &candidates {
        match parse_version(&tag.name) {
            Ok(version) => parsed.push((*tag, version)),
            Err(_) => {
                return Err(TaggerError::AmbiguousOrMalformedTag {
                    tags: candidates.iter().map(|t| t.name.clone()).collect(),
                    malformed: tag.name.clone(),
                })
            }
        }
    }

    parsed
        .into_iter()
        .max_by(|(tag_a, a), (tag_b, b)| {
            compare_versions(a, b).then_with(|| tag_a.name.cmp(&tag_b.name))
        })
        .map(|(tag, _)| tag)
        .ok_or(TaggerError::NoTags)
}
