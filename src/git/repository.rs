use crate::domain::Tag;
use crate::error::{Result, TaggerError};
use crate::git::{RemoteTarget, Repository};
use git2::{build::CheckoutBuilder, Cred, ErrorCode, Oid, PushOptions, RemoteCallbacks};
use log::{debug, info};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: git2::Repository,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = git2::Repository::discover(path)?;
        debug!("Opened repository at {}", repo.path().display());

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: git2::Repository) -> Self {
        Git2Repository { repo }
    }

    fn find_commit(&self, commit_id: &str) -> Result<git2::Commit<'_>> {
        let oid = Oid::from_str(commit_id)
            .map_err(|e| TaggerError::tag(format!("Invalid commit id '{}': {}", commit_id, e)))?;
        Ok(self.repo.find_commit(oid)?)
    }
}

impl Repository for Git2Repository {
    fn checkout_commit(&self, commit_id: &str) -> Result<()> {
        let commit = self.find_commit(commit_id)?;

        self.repo
            .checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))?;
        self.repo.set_head_detached(commit.id())?;

        info!("Checked out {}", commit.id());
        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            // Annotated tags peel through the tag object to the commit
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(Tag::new(
                    name,
                    commit.id().to_string(),
                    commit.time().seconds(),
                )),
                Err(e) => debug!("Skipping tag '{}' that does not point at a commit: {}", name, e),
            }
        }

        debug!("Found {} tags", tags.len());
        Ok(tags)
    }

    fn commit_message(&self, commit_id: &str) -> Result<String> {
        let commit = self.find_commit(commit_id)?;
        Ok(String::from_utf8_lossy(commit.message_bytes()).into_owned())
    }

    fn create_tag(&self, name: &str, commit_id: &str) -> Result<()> {
        let commit = self.find_commit(commit_id)?;

        self.repo
            .tag_lightweight(name, commit.as_object(), false)
            .map_err(|e| TaggerError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        info!("Created tag {} at {}", name, commit_id);
        Ok(())
    }

    fn push_tag(&self, target: &RemoteTarget, name: &str) -> Result<()> {
        let mut remote = match self.repo.find_remote(&target.name) {
            Ok(remote) => remote,
            Err(e) if e.code() == ErrorCode::NotFound => {
                let url = target.url.as_deref().ok_or_else(|| {
                    TaggerError::remote(format!(
                        "Remote '{}' not found and no URL configured",
                        target.name
                    ))
                })?;
                debug!("Adding remote '{}'", target.name);
                self.repo.remote(&target.name, url)?
            }
            Err(e) => {
                return Err(TaggerError::remote(format!(
                    "Cannot find remote '{}': {}",
                    target.name, e
                )))
            }
        };

        let mut callbacks = RemoteCallbacks::new();
        if let Some(credentials) = &target.credentials {
            callbacks.credentials(move |_url, _username_from_url, _allowed_types| {
                Cred::userpass_plaintext(&credentials.username, &credentials.token)
            });
        }
        // A rejected ref is reported here, not through the push result
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{0}:refs/tags/{0}", name);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    TaggerError::remote(format!("Network error during push: {}", e))
                } else {
                    TaggerError::remote(format!("Failed to push tag '{}': {}", name, e))
                }
            })?;

        info!("Pushed tag {} to {}", name, target.name);
        Ok(())
    }
}
