//! Read-only views of the forum data a render consumes.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize};

use crate::host::SettingsRepository;

/// Settings key holding the forum's display name.
pub const SETTING_FORUM_TITLE: &str = "forum_title";

/// Settings key holding the forum's logo URL.
pub const SETTING_LOGO_PATH: &str = "logo_path";

/// Logo location used when `logo_path` is unset or empty.
pub const DEFAULT_LOGO_PATH: &str = "/logo/logo-schema.png";

// ---------------------------------------------------------------------------
// SiteIdentity
// ---------------------------------------------------------------------------

/// Site-level identity shared by every page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteIdentity {
    /// Forum display name.
    pub name: String,
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Absolute logo URL; empty means "no logo".
    pub logo_url: String,
}

impl SiteIdentity {
    /// Resolve the identity from the settings store and the configured base URL.
    ///
    /// The logo falls back to `{base_url}/logo/logo-schema.png` when the
    /// `logo_path` setting is missing or empty.
    pub fn resolve(settings: &dyn SettingsRepository, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let fallback_logo = format!("{base_url}{DEFAULT_LOGO_PATH}");

        let mut logo_url = settings.get(SETTING_LOGO_PATH, &fallback_logo);
        if logo_url.trim().is_empty() {
            logo_url = fallback_logo;
        }

        Self {
            name: settings.get(SETTING_FORUM_TITLE, ""),
            base_url,
            logo_url,
        }
    }
}

// ---------------------------------------------------------------------------
// Discussion views
// ---------------------------------------------------------------------------

/// A user reference attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorView {
    pub username: String,
}

/// A tag the discussion is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagView {
    pub name: String,
    pub slug: String,
}

/// A single post in a discussion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: u64,
    /// `None` when the author account was deleted or cannot be resolved.
    #[serde(default)]
    pub author: Option<AuthorView>,
    /// Raw post HTML. Non-string values are coerced to `None`.
    #[serde(default, deserialize_with = "lenient_content")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<FixedOffset>>,
}

/// A discussion thread as seen by a single render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionView {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<FixedOffset>>,
    /// Host-reported post total, opening post included.
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub tags: Vec<TagView>,
    /// Posts in thread order; the first one is the opening post.
    #[serde(default)]
    pub posts: Vec<PostView>,
}

impl DiscussionView {
    /// The opening post, if the thread has any posts at all.
    pub fn first_post(&self) -> Option<&PostView> {
        self.posts.first()
    }

    /// Replies to the opening post, in thread order.
    pub fn replies(&self) -> &[PostView] {
        self.posts.get(1..).unwrap_or_default()
    }
}

/// Format an optional timestamp as ISO-8601 (`2024-01-15T10:30:00+00:00`),
/// or the empty string when absent.
pub fn iso8601(ts: Option<&DateTime<FixedOffset>>) -> String {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, false))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Lenient deserializers
// ---------------------------------------------------------------------------

fn lenient_content<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            tracing::debug!(%other, "non-string post content coerced to empty");
            None
        }
    })
}

fn lenient_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
            match DateTime::parse_from_rfc3339(s.trim()) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    tracing::debug!(raw = %s, error = %e, "unparseable timestamp coerced to empty");
                    None
                }
            }
        }
        Some(serde_json::Value::String(_) | serde_json::Value::Null) | None => None,
        Some(other) => {
            tracing::debug!(%other, "non-string timestamp coerced to empty");
            None
        }
    })
}
