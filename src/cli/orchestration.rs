//! Main workflow orchestration logic
//!
//! Drives one tagging run for a merged pull request: read the repository
//! snapshot, plan the next tag, publish it and report on the pull request.
//! All collaborators are passed in, so the run can be exercised with
//! [`crate::git::MockRepository`] and a recording [`Commenter`].

use log::{info, warn};

use crate::boundary::BoundaryWarning;
use crate::error::{Result, TaggerError};
use crate::git::{RemoteTarget, Repository};
use crate::github::{self, Commenter};
use crate::release::{self, ReleasePlan};

/// Arguments for the publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct PublishWorkflowArgs {
    /// Hex id of the merge commit to tag
    pub merge_commit: String,

    /// Pull request the comment goes to
    pub pull_request: u64,

    /// Where the tag is pushed
    pub remote: RemoteTarget,

    /// Base URL of release pages, used in the success comment
    pub releases_url: String,

    /// Compute the tag only - no tag, push or comment
    pub dry_run: bool,
}

/// Result of a successful publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The tag that was computed (and created unless dry run)
    pub tag: String,

    /// The tag it was derived from, if any
    pub previous: Option<String>,

    /// Commit the tag points at
    pub commit: String,

    /// Whether the tag was pushed to remote
    pub pushed: bool,

    /// Whether the success comment was posted
    pub commented: bool,

    /// Non-fatal issues met along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Main publish workflow
///
/// 1. Check out the merge commit
/// 2. Read all tags and the merge commit message
/// 3. Plan the next tag; a version error posts the failure comment and aborts
/// 4. Create and push the tag
/// 5. Post the success comment
///
/// Dry runs stop after step 3. A failing comment after a successful push is
/// reported as a warning since the release itself happened.
///
/// # Errors
/// Any git error, a version error from planning, or a tag that already exists.
/// No tag is pushed and no success comment is posted once an error is returned.
pub fn run_publish_workflow<R: Repository>(
    repo: &R,
    commenter: Option<&dyn Commenter>,
    args: &PublishWorkflowArgs,
) -> Result<WorkflowResult> {
    let mut warnings = Vec::new();

    repo.checkout_commit(&args.merge_commit)?;
    let tags = repo.list_tags()?;
    let message = repo.commit_message(&args.merge_commit)?;

    let plan = match release::plan_next_tag(&tags, &message) {
        Ok(plan) => plan,
        Err(e) => {
            if let (Some(tag), Some(commenter), false) =
                (e.offending_tag(), commenter, args.dry_run)
            {
                if let Err(comment_err) =
                    commenter.post_comment(args.pull_request, &github::failure_comment(tag))
                {
                    warn!("Could not report failure on #{}: {}", args.pull_request, comment_err);
                }
            }
            return Err(e);
        }
    };
    log_plan(&plan);

    if plan.is_seed() {
        warnings.push(BoundaryWarning::NoExistingTags {
            seed: plan.next.clone(),
        });
    }

    if tags.iter().any(|t| t.name == plan.next) {
        return Err(TaggerError::tag(format!(
            "Tag '{}' already exists",
            plan.next
        )));
    }

    if args.dry_run {
        warnings.push(BoundaryWarning::DryRun {
            tag: plan.next.clone(),
        });
        return Ok(WorkflowResult {
            tag: plan.next,
            previous: plan.previous,
            commit: args.merge_commit.clone(),
            pushed: false,
            commented: false,
            warnings,
        });
    }

    repo.create_tag(&plan.next, &args.merge_commit)?;
    repo.push_tag(&args.remote, &plan.next)?;

    let commented = match commenter {
        Some(commenter) => {
            let body = github::tagged_comment(&args.releases_url, &plan.next);
            match commenter.post_comment(args.pull_request, &body) {
                Ok(()) => true,
                Err(e) => {
                    warnings.push(BoundaryWarning::CommentFailed {
                        pull_request: args.pull_request,
                        reason: e.to_string(),
                    });
                    false
                }
            }
        }
        None => false,
    };

    Ok(WorkflowResult {
        tag: plan.next,
        previous: plan.previous,
        commit: args.merge_commit.clone(),
        pushed: true,
        commented,
        warnings,
    })
}

fn log_plan(plan: &ReleasePlan) {
    match (&plan.previous, plan.rule) {
        (Some(previous), Some(rule)) => {
            info!("Bumping {} ({}) to {}", previous, rule, plan.next)
        }
        _ => info!("No tags yet, using seed tag {}", plan.next),
    }
}
