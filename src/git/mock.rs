use crate::domain::Tag;
use crate::error::{Result, TaggerError};
use crate::git::{RemoteTarget, Repository};
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
///
/// Records checkouts, created tags and pushes so tests can assert on them.
pub struct MockRepository {
    tags: Vec<Tag>,
    messages: HashMap<String, String>,
    fail_push: bool,
    checked_out: RefCell<Option<String>>,
    created: RefCell<Vec<(String, String)>>,
    pushed: RefCell<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Vec::new(),
            messages: HashMap::new(),
            fail_push: false,
            checked_out: RefCell::new(None),
            created: RefCell::new(Vec::new()),
            pushed: RefCell::new(Vec::new()),
        }
    }

    /// Add a commit with its message
    pub fn add_commit(&mut self, commit_id: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(commit_id.into(), message.into());
    }

    /// Add a tag pointing at a commit committed at `committed_at`
    pub fn add_tag(&mut self, name: impl Into<String>, commit_id: impl Into<String>, committed_at: i64) {
        self.tags.push(Tag::new(name, commit_id, committed_at));
    }

    /// Make every push fail with a remote error
    pub fn fail_pushes(&mut self) {
        self.fail_push = true;
    }

    /// Commit most recently checked out
    pub fn checked_out(&self) -> Option<String> {
        self.checked_out.borrow().clone()
    }

    /// Tags created so far, as `(name, commit_id)`
    pub fn created_tags(&self) -> Vec<(String, String)> {
        self.created.borrow().clone()
    }

    /// Tags pushed so far, as `(remote_name, tag_name)`
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn checkout_commit(&self, commit_id: &str) -> Result<()> {
        if !self.messages.contains_key(commit_id) {
            return Err(TaggerError::tag(format!("Commit not found: {}", commit_id)));
        }
        *self.checked_out.borrow_mut() = Some(commit_id.to_string());
        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn commit_message(&self, commit_id: &str) -> Result<String> {
        self.messages
            .get(commit_id)
            .cloned()
            .ok_or_else(|| TaggerError::tag(format!("Commit not found: {}", commit_id)))
    }

    fn create_tag(&self, name: &str, commit_id: &str) -> Result<()> {
        let exists = self.tags.iter().any(|t| t.name == name)
            || self.created.borrow().iter().any(|(n, _)| n == name);
        if exists {
            return Err(TaggerError::tag(format!("Tag '{}' already exists", name)));
        }
        self.created
            .borrow_mut()
            .push((name.to_string(), commit_id.to_string()));
        Ok(())
    }

    fn push_tag(&self, target: &RemoteTarget, name: &str) -> Result<()> {
        if self.fail_push {
            return Err(TaggerError::remote(format!("Push failed for {}", name)));
        }
        self.pushed
            .borrow_mut()
            .push((target.name.clone(), name.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_tags() {
        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0", "abc", 10);
        repo.add_tag("v1.1.0", "def", 20);

        let tags = repo.list_tags().unwrap();
        assert_eq!(tags.len(), 2);
        assert!(tags.contains(&Tag::new("v1.1.0", "def", 20)));
    }

    #[test]
    fn test_mock_repository_commit_message() {
        let mut repo = MockRepository::new();
        repo.add_commit("abc", "fix things #minor");

        assert_eq!(repo.commit_message("abc").unwrap(), "fix things #minor");
        assert!(repo.commit_message("zzz").is_err());
    }

    #[test]
    fn test_mock_repository_checkout() {
        let mut repo = MockRepository::new();
        repo.add_commit("abc", "msg");

        assert!(repo.checkout_commit("nope").is_err());
        repo.checkout_commit("abc").unwrap();
        assert_eq!(repo.checked_out(), Some("abc".to_string()));
    }

    #[test]
    fn test_mock_repository_create_and_push() {
        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0", "abc", 10);

        assert!(repo.create_tag("v1.0.0", "abc").is_err());
        repo.create_tag("v1.0.1", "def").unwrap();
        assert!(repo.create_tag("v1.0.1", "def").is_err());
        repo.push_tag(&RemoteTarget::named("github"), "v1.0.1").unwrap();

        assert_eq!(
            repo.created_tags(),
            vec![("v1.0.1".to_string(), "def".to_string())]
        );
        assert_eq!(
            repo.pushed_tags(),
            vec![("github".to_string(), "v1.0.1".to_string())]
        );
    }

    #[test]
    fn test_mock_repository_failing_push() {
        let mut repo = MockRepository::new();
        repo.fail_pushes();
        let err = repo
            .push_tag(&RemoteTarget::named("origin"), "v1.0.0")
            .unwrap_err();
        assert!(err.to_string().contains("Remote operation failed"));
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.list_tags().unwrap().is_empty());
        assert!(repo.pushed_tags().is_empty());
    }
}
