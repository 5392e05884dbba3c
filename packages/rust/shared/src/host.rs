//! Contracts for the forum collaborators a render reads from.
//!
//! The schema builder never talks to the forum directly: settings, discussion
//! lookup and route generation come in through these traits.

use crate::error::Result;
use crate::types::DiscussionView;

/// Key/value site settings.
pub trait SettingsRepository {
    /// Value for `key`, or `default` when unset.
    fn get(&self, key: &str, default: &str) -> String;
}

/// Read-only discussion lookup.
pub trait DiscussionRepository {
    /// Fetch a discussion with its posts in thread order.
    ///
    /// Returns [`ForumSchemaError::DiscussionNotFound`](crate::ForumSchemaError::DiscussionNotFound)
    /// when no discussion has this id.
    fn find_by_id(&self, id: u64) -> Result<DiscussionView>;
}

/// Forum route generation.
pub trait UrlGenerator {
    /// Public profile page of a user.
    fn profile_url(&self, username: &str) -> String;

    /// Listing page of a tag.
    fn tag_url(&self, slug: &str) -> String;
}

/// Route generator following the forum's default routes
/// (`/u/{username}`, `/t/{slug}`).
#[derive(Debug, Clone)]
pub struct ForumUrls {
    base_url: String,
}

impl ForumUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl UrlGenerator for ForumUrls {
    fn profile_url(&self, username: &str) -> String {
        format!("{}/u/{username}", self.base_url)
    }

    fn tag_url(&self, slug: &str) -> String {
        format!("{}/t/{slug}", self.base_url)
    }
}
