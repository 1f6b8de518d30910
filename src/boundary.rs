use std::fmt;

/// Warnings raised during a tagging run.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Repository had no tags, so the seed tag was used
    NoExistingTags { seed: String },
    /// Dry run: tag computed but not created, pushed or announced
    DryRun { tag: String },
    /// Comment not posted because commenting is unavailable
    CommentSkipped { reason: String },
    /// Posting the comment failed after the tag was published
    CommentFailed { pull_request: u64, reason: String },
    /// Event is for a pull request that was closed without merging
    PullRequestNotMerged { pull_request: u64 },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoExistingTags { seed } => {
                write!(f, "No existing tags, starting at seed tag '{}'", seed)
            }
            BoundaryWarning::DryRun { tag } => {
                write!(f, "Dry run: tag '{}' was not created or pushed", tag)
            }
            BoundaryWarning::CommentSkipped { reason } => {
                write!(f, "Skipping pull request comment: {}", reason)
            }
            BoundaryWarning::CommentFailed {
                pull_request,
                reason,
            } => write!(
                f,
                "Could not comment on pull request #{}: {}",
                pull_request, reason
            ),
            BoundaryWarning::PullRequestNotMerged { pull_request } => {
                write!(
                    f,
                    "Pull request #{} was closed without merging, nothing to tag",
                    pull_request
                )
            }
        }
    }
}
