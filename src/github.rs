//! Pull request comments through the GitHub REST API.

use crate::error::{Result, TaggerError};
use log::{debug, info};
use serde::Serialize;

/// Posts comments on pull requests.
pub trait Commenter {
    /// Post `body` as a comment on pull request `pull_request`
    fn post_comment(&self, pull_request: u64, body: &str) -> Result<()>;
}

#[derive(Serialize)]
struct CommentPayload<'a> {
    body: &'a str,
}

/// Comment sink backed by the GitHub issues API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    api_url: String,
    repository: String,
    token: String,
}

impl GitHubClient {
    /// Create a client for `repository` (`owner/name`) authenticated with `token`
    pub fn new(
        api_url: impl Into<String>,
        repository: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        GitHubClient {
            api_url: api_url.into(),
            repository: repository.into(),
            token: token.into(),
        }
    }

    /// Endpoint for comments on a pull request
    pub fn comments_url(&self, pull_request: u64) -> String {
        format!(
            "{}/repos/{}/issues/{}/comments",
            self.api_url.trim_end_matches('/'),
            self.repository,
            pull_request
        )
    }
}

impl Commenter for GitHubClient {
    fn post_comment(&self, pull_request: u64, body: &str) -> Result<()> {
        let url = self.comments_url(pull_request);
        debug!("POST {}", url);

        let request = ureq::post(&url)
            .set("User-Agent", "merge-tagger")
            .set("Accept", "application/vnd.github.v3+json")
            .set("Authorization", &format!("Bearer {}", self.token));

        match request.send_json(CommentPayload { body }) {
            Ok(_) => {
                info!("Commented on pull request #{}", pull_request);
                Ok(())
            }
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(TaggerError::comment(format!("HTTP {}: {}", code, body)))
            }
            Err(ureq::Error::Transport(err)) => Err(TaggerError::comment(err.to_string())),
        }
    }
}

/// Base URL of the release pages of a repository
pub fn releases_url(server_url: &str, repository: &str) -> String {
    format!(
        "{}/{}/releases/tag",
        server_url.trim_end_matches('/'),
        repository
    )
}

/// Comment announcing the tag a pull request was released as
pub fn tagged_comment(releases_url: &str, tag: &str) -> String {
    format!(
        "This PR has now been tagged as [{tag}]({url}/{tag})",
        tag = tag,
        url = releases_url
    )
}

/// Comment explaining that the latest tag could not be bumped
pub fn failure_comment(tag: &str) -> String {
    format!(
        "latest tag ({}) does not conform to semver ([v]?MAJOR.MINOR.PATCH), failed to bump version",
        tag
    )
}
