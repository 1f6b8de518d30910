use crate::domain::{bump_version, parse_version, resolve_current_tag, IncrementRule, Tag};
use crate::error::Result;

/// Tag emitted for a repository that has never been tagged
pub const SEED_TAG: &str = "v1.0.0";

/// Outcome of computing the next release tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    /// Tag the next version was derived from; `None` for the seed tag
    pub previous: Option<String>,
    /// Text of the tag to create
    pub next: String,
    /// Rule applied to `previous`; `None` for the seed tag
    pub rule: Option<IncrementRule>,
}

impl ReleasePlan {
    /// Whether this plan bootstraps an untagged repository
    pub fn is_seed(&self) -> bool {
        self.previous.is_none()
    }
}

/// Computes the next release tag from a tag snapshot and the merge commit message.
///
/// An empty snapshot yields [`SEED_TAG`] without consulting the message.
/// Otherwise the current tag is resolved, parsed and bumped, keeping its prefix
/// convention.
///
/// # Example
/// ```
/// use merge_tagger::domain::Tag;
/// use merge_tagger::release::plan_next_tag;
///
/// let tags = vec![Tag::new("1.4.2", "abc", 0)];
/// let plan = plan_next_tag(&tags, "big rewrite #major").unwrap();
/// assert_eq!(plan.next, "2.0.0");
/// ```
pub fn plan_next_tag(tags: &[Tag], message: &str) -> Result<ReleasePlan> {
    if tags.is_empty() {
        return Ok(ReleasePlan {
            previous: None,
            next: SEED_TAG.to_string(),
            rule: None,
        });
    }

    let current = resolve_current_tag(tags)?;
    let version = parse_version(&current.name)?;
    let rule = IncrementRule::from_commit_message(message);
    let next = bump_version(&version, message);

    Ok(ReleasePlan {
        previous: Some(current.name.clone()),
        next: next.to_string(),
        rule: Some(rule),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaggerError;

    const T: i64 = 1_700_000_000;

    #[test]
    fn test_seed_for_untagged_repository() {
        let plan = plan_next_tag(&[], "#major").unwrap();
        assert_eq!(plan.next, "v1.0.0");
        assert!(plan.is_seed());
        assert_eq!(plan.rule, None);
    }

    #[test]
    fn test_minor_bump_keeps_prefix() {
        let tags = vec![Tag::new("v1.4.2", "abc", T)];
        let plan = plan_next_tag(&tags, "fix bug #minor").unwrap();
        assert_eq!(plan.next, "v1.5.0");
        assert_eq!(plan.previous.as_deref(), Some("v1.4.2"));
        assert_eq!(plan.rule, Some(IncrementRule::Minor));
    }

    #[test]
    fn test_major_bump_without_prefix() {
        let tags = vec![Tag::new("1.4.2", "abc", T)];
        let plan = plan_next_tag(&tags, "big rewrite #major").unwrap();
        assert_eq!(plan.next, "2.0.0");
    }

    #[test]
    fn test_patch_is_default() {
        let tags = vec![Tag::new("V3.0.9", "abc", T)];
        assert_eq!(plan_next_tag(&tags, "tidy").unwrap().next, "V3.0.10");
    }

    #[test]
    fn test_malformed_latest_tag() {
        let tags = vec![Tag::new("v1.0.0", "a", T - 10), Tag::new("latest", "b", T)];
        match plan_next_tag(&tags, "fix") {
            Err(TaggerError::MalformedVersion { text }) => assert_eq!(text, "latest"),
            other => panic!("expected MalformedVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_ambiguous_tags_abort() {
        let tags = vec![Tag::new("v1.0.0", "a", T), Tag::new("latest", "a", T)];
        let err = plan_next_tag(&tags, "fix").unwrap_err();
        assert!(matches!(err, TaggerError::AmbiguousOrMalformedTag { .. }));
    }
}
