use std::cell::RefCell;

use merge_tagger::boundary::BoundaryWarning;
use merge_tagger::cli::{run_publish_workflow, PublishWorkflowArgs};
use merge_tagger::git::{MockRepository, RemoteTarget};
use merge_tagger::github::Commenter;
use merge_tagger::{Result, TaggerError};

const MERGE: &str = "9fceb02d0ae598e95dc970b74767f19372d61af8";
const RELEASES: &str = "https://github.com/acme/widgets/releases/tag";

/// Commenter that records what would have been posted
#[derive(Default)]
struct RecordingCommenter {
    posted: RefCell<Vec<(u64, String)>>,
    fail: bool,
}

impl Commenter for RecordingCommenter {
    fn post_comment(&self, pull_request: u64, body: &str) -> Result<()> {
        if self.fail {
            return Err(TaggerError::comment("HTTP 403: forbidden"));
        }
        self.posted
            .borrow_mut()
            .push((pull_request, body.to_string()));
        Ok(())
    }
}

fn workflow_args(dry_run: bool) -> PublishWorkflowArgs {
    PublishWorkflowArgs {
        merge_commit: MERGE.to_string(),
        pull_request: 42,
        remote: RemoteTarget::named("github"),
        releases_url: RELEASES.to_string(),
        dry_run,
    }
}

fn repo_with(message: &str, tags: &[(&str, &str, i64)]) -> MockRepository {
    let mut repo = MockRepository::new();
    repo.add_commit(MERGE, message);
    for (name, commit, at) in tags {
        repo.add_tag(*name, *commit, *at);
    }
    repo
}

#[test]
fn test_minor_bump_is_tagged_pushed_and_announced() {
    let repo = repo_with("fix bug #minor", &[("v1.4.2", "c1", 100)]);
    let commenter = RecordingCommenter::default();

    let result = run_publish_workflow(&repo, Some(&commenter), &workflow_args(false)).unwrap();

    assert_eq!(result.tag, "v1.5.0");
    assert_eq!(result.previous.as_deref(), Some("v1.4.2"));
    assert!(result.pushed);
    assert!(result.commented);
    assert!(result.warnings.is_empty());

    assert_eq!(repo.checked_out().as_deref(), Some(MERGE));
    assert_eq!(
        repo.created_tags(),
        vec![("v1.5.0".to_string(), MERGE.to_string())]
    );
    assert_eq!(
        repo.pushed_tags(),
        vec![("github".to_string(), "v1.5.0".to_string())]
    );
    assert_eq!(
        commenter.posted.borrow().as_slice(),
        &[(
            42,
            "This PR has now been tagged as [v1.5.0](https://github.com/acme/widgets/releases/tag/v1.5.0)"
                .to_string()
        )]
    );
}

#[test]
fn test_unprefixed_major_bump() {
    let repo = repo_with("big rewrite #major", &[("1.4.2", "c1", 100)]);

    let result = run_publish_workflow(&repo, None, &workflow_args(false)).unwrap();

    assert_eq!(result.tag, "2.0.0");
    assert!(!result.commented);
}

#[test]
fn test_untagged_repository_gets_seed() {
    let repo = repo_with("initial import #major", &[]);

    let result = run_publish_workflow(&repo, None, &workflow_args(false)).unwrap();

    assert_eq!(result.tag, "v1.0.0");
    assert_eq!(result.previous, None);
    assert_eq!(
        result.warnings,
        vec![BoundaryWarning::NoExistingTags {
            seed: "v1.0.0".to_string()
        }]
    );
}

#[test]
fn test_tie_on_newest_commit_uses_greatest_version() {
    let repo = repo_with(
        "patch it",
        &[("v1.2.0", "c2", 200), ("v1.3.0", "c2", 200), ("v1.1.9", "c1", 100)],
    );

    let result = run_publish_workflow(&repo, None, &workflow_args(false)).unwrap();

    assert_eq!(result.tag, "v1.3.1");
}

#[test]
fn test_malformed_latest_tag_comments_and_publishes_nothing() {
    let repo = repo_with("fix #minor", &[("v1.0.0", "c1", 100), ("nightly", "c2", 200)]);
    let commenter = RecordingCommenter::default();

    let err = run_publish_workflow(&repo, Some(&commenter), &workflow_args(false)).unwrap_err();

    assert!(matches!(err, TaggerError::MalformedVersion { ref text } if text == "nightly"));
    assert!(repo.created_tags().is_empty());
    assert!(repo.pushed_tags().is_empty());
    assert_eq!(
        commenter.posted.borrow().as_slice(),
        &[(
            42,
            "latest tag (nightly) does not conform to semver ([v]?MAJOR.MINOR.PATCH), failed to bump version"
                .to_string()
        )]
    );
}

#[test]
fn test_ambiguous_tags_abort() {
    let repo = repo_with("fix", &[("v1.0.0", "c1", 100), ("not-a-version", "c1", 100)]);
    let commenter = RecordingCommenter::default();

    let err = run_publish_workflow(&repo, Some(&commenter), &workflow_args(false)).unwrap_err();

    assert!(matches!(err, TaggerError::AmbiguousOrMalformedTag { .. }));
    assert!(repo.created_tags().is_empty());
    assert_eq!(commenter.posted.borrow().len(), 1);
    assert!(commenter.posted.borrow()[0].1.contains("(not-a-version)"));
}

#[test]
fn test_dry_run_has_no_side_effects() {
    let repo = repo_with("fix #minor", &[("v0.3.7", "c1", 100)]);
    let commenter = RecordingCommenter::default();

    let result = run_publish_workflow(&repo, Some(&commenter), &workflow_args(true)).unwrap();

    assert_eq!(result.tag, "v0.4.0");
    assert!(!result.pushed);
    assert!(!result.commented);
    assert!(result.warnings.contains(&BoundaryWarning::DryRun {
        tag: "v0.4.0".to_string()
    }));
    assert!(repo.created_tags().is_empty());
    assert!(repo.pushed_tags().is_empty());
    assert!(commenter.posted.borrow().is_empty());
}

#[test]
fn test_dry_run_failure_does_not_comment() {
    let repo = repo_with("fix", &[("broken", "c1", 100)]);
    let commenter = RecordingCommenter::default();

    assert!(run_publish_workflow(&repo, Some(&commenter), &workflow_args(true)).is_err());
    assert!(commenter.posted.borrow().is_empty());
}

#[test]
fn test_existing_tag_is_refused() {
    // v1.0.1 already sits on an older commit than v1.0.0's retag
    let repo = repo_with("fix", &[("v1.0.1", "c1", 100), ("v1.0.0", "c2", 200)]);

    let err = run_publish_workflow(&repo, None, &workflow_args(false)).unwrap_err();

    assert!(err.to_string().contains("already exists"));
    assert!(repo.pushed_tags().is_empty());
}

#[test]
fn test_push_failure_is_an_error() {
    let mut repo = repo_with("fix", &[("v1.0.0", "c1", 100)]);
    repo.fail_pushes();
    let commenter = RecordingCommenter::default();

    let err = run_publish_workflow(&repo, Some(&commenter), &workflow_args(false)).unwrap_err();

    assert!(matches!(err, TaggerError::Remote(_)));
    assert!(commenter.posted.borrow().is_empty());
}

#[test]
fn test_comment_failure_after_push_is_a_warning() {
    let repo = repo_with("fix", &[("v1.0.0", "c1", 100)]);
    let commenter = RecordingCommenter {
        fail: true,
        ..Default::default()
    };

    let result = run_publish_workflow(&repo, Some(&commenter), &workflow_args(false)).unwrap();

    assert!(result.pushed);
    assert!(!result.commented);
    assert!(matches!(
        result.warnings.as_slice(),
        [BoundaryWarning::CommentFailed { pull_request: 42, .. }]
    ));
}

#[test]
fn test_unknown_merge_commit() {
    let mut repo = MockRepository::new();
    repo.add_commit("other", "msg");

    let err = run_publish_workflow(&repo, None, &workflow_args(false)).unwrap_err();
    assert!(err.to_string().contains("Commit not found"));
}
