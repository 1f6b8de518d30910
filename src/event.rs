use crate::error::{Result, TaggerError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The parts of a `pull_request` webhook payload a tagging run needs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PullRequestEvent {
    /// Pull request number
    pub number: u64,
    pub pull_request: PullRequest,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PullRequest {
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
    #[serde(default)]
    pub merged: Option<bool>,
}

impl PullRequestEvent {
    /// Hex id of the merge commit
    pub fn merge_commit(&self) -> Result<&str> {
        self.pull_request
            .merge_commit_sha
            .as_deref()
            .filter(|sha| !sha.is_empty())
            .ok_or_else(|| {
                TaggerError::event(format!(
                    "Pull request #{} has no merge commit",
                    self.number
                ))
            })
    }

    /// False only when the payload says the pull request was closed unmerged
    pub fn is_merged(&self) -> bool {
        self.pull_request.merged != Some(false)
    }
}

/// Parses an event payload
pub fn parse_event(json: &str) -> Result<PullRequestEvent> {
    Ok(serde_json::from_str(json)?)
}

/// Loads the event payload file written by the CI runner
pub fn load_event(path: &Path) -> Result<PullRequestEvent> {
    let json = fs::read_to_string(path).map_err(|e| {
        TaggerError::event(format!("Cannot read {}: {}", path.display(), e))
    })?;
    parse_event(&json)
}
