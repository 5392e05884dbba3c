//! JSON-backed discussion storage (offline mode).
//!
//! The [`DiscussionStore`] holds a dump of discussions exported from the
//! forum and answers [`DiscussionRepository`] lookups from memory. It lets the
//! CLI and tests render pages without a live forum behind them.
//!
//! Dump format:
//!
//! ```json
//! { "discussions": [ { "id": 1, "title": "...", "posts": [ ... ] } ] }
//! ```

use std::collections::HashMap;
use std::path::Path;

use forumschema_shared::{DiscussionRepository, DiscussionView, ForumSchemaError, Result};
use serde::Deserialize;
use tracing::{debug, info};

/// On-disk dump layout.
#[derive(Debug, Deserialize)]
struct Dump {
    #[serde(default)]
    discussions: Vec<DiscussionView>,
}

/// In-memory discussion index keyed by discussion id.
#[derive(Debug, Default)]
pub struct DiscussionStore {
    discussions: HashMap<u64, DiscussionView>,
}

impl DiscussionStore {
    /// Load a dump file from `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ForumSchemaError::io(path, e))?;
        let store = Self::from_json_str(&content).map_err(|e| match e {
            ForumSchemaError::Parse { message } => {
                ForumSchemaError::parse(format!("{}: {message}", path.display()))
            }
            other => other,
        })?;

        info!(path = %path.display(), discussions = store.len(), "discussion dump loaded");
        Ok(store)
    }

    /// Parse a dump from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dump: Dump = serde_json::from_str(json)
            .map_err(|e| ForumSchemaError::parse(format!("invalid discussion dump: {e}")))?;
        Self::from_discussions(dump.discussions)
    }

    /// Index the given discussions. Duplicate ids are rejected.
    pub fn from_discussions(
        discussions: impl IntoIterator<Item = DiscussionView>,
    ) -> Result<Self> {
        let mut index = HashMap::new();
        for discussion in discussions {
            let id = discussion.id;
            if index.insert(id, discussion).is_some() {
                return Err(ForumSchemaError::validation(format!(
                    "duplicate discussion id {id} in dump"
                )));
            }
        }
        Ok(Self { discussions: index })
    }

    /// Number of discussions held.
    pub fn len(&self) -> usize {
        self.discussions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discussions.is_empty()
    }
}

impl DiscussionRepository for DiscussionStore {
    fn find_by_id(&self, id: u64) -> Result<DiscussionView> {
        let discussion = self
            .discussions
            .get(&id)
            .cloned()
            .ok_or(ForumSchemaError::DiscussionNotFound { id })?;
        debug!(id, posts = discussion.posts.len(), "discussion found");
        Ok(discussion)
    }
}
