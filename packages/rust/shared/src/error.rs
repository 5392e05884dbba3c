//! Error types for forumschema.
//!
//! Library crates use [`ForumSchemaError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all forumschema operations.
#[derive(Debug, thiserror::Error)]
pub enum ForumSchemaError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Malformed input data (discussion dumps, timestamps, etc.).
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Discussion storage lookup failed for a reason other than absence.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad base URL, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// JSON-LD serialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// No discussion exists with the requested id.
    #[error("discussion {id} not found")]
    DiscussionNotFound { id: u64 },

    /// The discussion has no opening post.
    #[error("first post not found for discussion {id}")]
    MissingFirstPost { id: u64 },

    /// The opening post has no resolvable author.
    #[error("author not found for discussion {id}")]
    MissingAuthor { id: u64 },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ForumSchemaError>;

impl ForumSchemaError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error belongs to the discussion enrichment step.
    pub fn is_enrichment(&self) -> bool {
        matches!(
            self,
            Self::DiscussionNotFound { .. } | Self::MissingFirstPost { .. } | Self::MissingAuthor { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ForumSchemaError::config("missing [site] url");
        assert_eq!(err.to_string(), "config error: missing [site] url");

        let err = ForumSchemaError::MissingAuthor { id: 7 };
        assert_eq!(err.to_string(), "author not found for discussion 7");
    }

    #[test]
    fn enrichment_kinds() {
        assert!(ForumSchemaError::DiscussionNotFound { id: 1 }.is_enrichment());
        assert!(ForumSchemaError::MissingFirstPost { id: 1 }.is_enrichment());
        assert!(!ForumSchemaError::Storage("locked".into()).is_enrichment());
    }
}
