use thiserror::Error;

/// Unified error type for merge-tagger operations
#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("Version '{text}' does not conform to [v]?MAJOR.MINOR.PATCH")]
    MalformedVersion { text: String },

    #[error("Tags {tags:?} point at the newest commit but '{malformed}' is not a version")]
    AmbiguousOrMalformedTag { tags: Vec<String>, malformed: String },

    #[error("No tags to resolve")]
    NoTags,

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event payload error: {0}")]
    Event(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Comment failed: {0}")]
    Comment(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in merge-tagger
pub type Result<T> = std::result::Result<T, TaggerError>;

impl TaggerError {
    /// Create a malformed version error for the given text
    pub fn malformed(text: impl Into<String>) -> Self {
        TaggerError::MalformedVersion { text: text.into() }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TaggerError::Config(msg.into())
    }

    /// Create an event payload error with context
    pub fn event(msg: impl Into<String>) -> Self {
        TaggerError::Event(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        TaggerError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        TaggerError::Remote(msg.into())
    }

    /// Create a comment error with context
    pub fn comment(msg: impl Into<String>) -> Self {
        TaggerError::Comment(msg.into())
    }

    /// True for failures caused by a tag that cannot be read as a version.
    pub fn is_version_error(&self) -> bool {
        matches!(
            self,
            TaggerError::MalformedVersion { .. } | TaggerError::AmbiguousOrMalformedTag { .. }
        )
    }

    /// The tag text responsible for a version error, if any.
    pub fn offending_tag(&self) -> Option<&str> {
        match self {
            TaggerError::MalformedVersion { text } => Some(text),
            TaggerError::AmbiguousOrMalformedTag { malformed, .. } => Some(malformed),
            _ => None,
        }
    }
}
