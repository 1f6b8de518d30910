//! Git operations abstraction layer
//!
//! The [Repository] trait is the tag source and tag-publishing sink of a run.
//! Two implementations exist:
//!
//! - [repository::Git2Repository]: a real checkout driven through the `git2` crate
//! - [mock::MockRepository]: an in-memory repository for tests
//!
//! The workflow only depends on the trait, so the whole tagging run can be
//! exercised without touching disk or network.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::Tag;
use crate::error::Result;

/// Username/token pair used for HTTPS pushes
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

/// Where a new tag is pushed
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteTarget {
    /// Remote name, e.g. "github" or "origin"
    pub name: String,
    /// URL used to create the remote when the repository does not have it yet
    pub url: Option<String>,
    pub credentials: Option<Credentials>,
}

impl RemoteTarget {
    /// Target an existing remote by name, without credentials
    pub fn named(name: impl Into<String>) -> Self {
        RemoteTarget {
            name: name.into(),
            url: None,
            credentials: None,
        }
    }
}

/// Git operations needed to tag a merge commit.
///
/// Commit ids are full hex strings so the domain layer never sees `git2` types.
pub trait Repository {
    /// Check out a commit with a detached HEAD
    ///
    /// # Arguments
    /// * `commit_id` - Hex id of the commit, usually the merge commit of a pull request
    fn checkout_commit(&self, commit_id: &str) -> Result<()>;

    /// Get every tag that points (directly or through an annotation) at a commit
    ///
    /// Each tag carries its commit's id and committed-at time. Order is unspecified.
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Get the full message of a commit
    fn commit_message(&self, commit_id: &str) -> Result<String>;

    /// Create a lightweight tag at a commit
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the tag already exists, the commit doesn't exist, or Git error occurs
    fn create_tag(&self, name: &str, commit_id: &str) -> Result<()>;

    /// Push a single tag to a remote
    ///
    /// The remote is created from `target.url` when missing.
    fn push_tag(&self, target: &RemoteTarget, name: &str) -> Result<()>;
}
