//! Typed schema.org entities.
//!
//! One struct per entity, serialized with the vocabulary's property names.
//! Field declaration order is the emitted key order.

use serde::Serialize;

/// JSON-LD `@context` for every document.
pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Placeholder the search engine substitutes with the user's query.
pub const SEARCH_TERM_PLACEHOLDER: &str = "{search_term_string}";

// ---------------------------------------------------------------------------
// WebSite
// ---------------------------------------------------------------------------

/// Root document: the forum itself, optionally carrying the thread on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSite {
    #[serde(rename = "@context")]
    pub(crate) context: &'static str,
    #[serde(rename = "@type")]
    pub(crate) kind: &'static str,
    pub name: String,
    pub url: String,
    pub publisher: Organization,
    pub potential_action: SearchAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_entity: Option<DiscussionForumPosting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<BreadcrumbList>,
}

impl WebSite {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        publisher: Organization,
        potential_action: SearchAction,
    ) -> Self {
        Self {
            context: SCHEMA_CONTEXT,
            kind: "WebSite",
            name: name.into(),
            url: url.into(),
            publisher,
            potential_action,
            main_entity: None,
            breadcrumb: None,
        }
    }
}

/// Sitelinks search box target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchAction {
    #[serde(rename = "@type")]
    pub(crate) kind: &'static str,
    pub target: String,
    #[serde(rename = "query-input")]
    pub query_input: String,
}

impl SearchAction {
    /// Search action against the forum's `/?q=` search route.
    pub fn for_site(base_url: &str) -> Self {
        Self {
            kind: "SearchAction",
            target: format!("{base_url}/?q={SEARCH_TERM_PLACEHOLDER}"),
            query_input: "required name=search_term_string".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Organization / ImageObject / Person
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Organization {
    #[serde(rename = "@type")]
    pub(crate) kind: &'static str,
    pub name: String,
    /// Serialized as `null` when absent.
    pub logo: Option<ImageObject>,
}

impl Organization {
    pub fn new(name: impl Into<String>, logo: Option<ImageObject>) -> Self {
        Self {
            kind: "Organization",
            name: name.into(),
            logo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub(crate) kind: &'static str,
    pub url: String,
}

impl ImageObject {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            kind: "ImageObject",
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    #[serde(rename = "@type")]
    pub(crate) kind: &'static str,
    pub name: String,
    pub url: String,
}

impl Person {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: "Person",
            name: name.into(),
            url: url.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// DiscussionForumPosting
// ---------------------------------------------------------------------------

/// A forum thread: its opening post plus replies as comments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionForumPosting {
    #[serde(rename = "@type")]
    pub(crate) kind: &'static str,
    pub headline: String,
    pub article_body: String,
    /// ISO-8601, or empty when unknown.
    pub date_published: String,
    /// ISO-8601, or empty when unknown.
    pub date_modified: String,
    pub url: String,
    pub author: Person,
    pub publisher: Organization,
    pub interaction_statistic: Vec<InteractionCounter>,
    pub comment: Vec<Comment>,
}

/// A reply inside a thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "@type")]
    pub(crate) kind: &'static str,
    pub text: String,
    pub date_created: String,
    pub author: Person,
}

impl Comment {
    pub fn new(text: impl Into<String>, date_created: impl Into<String>, author: Person) -> Self {
        Self {
            kind: "Comment",
            text: text.into(),
            date_created: date_created.into(),
            author,
        }
    }
}

/// Interaction kinds counted on a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InteractionType {
    #[serde(rename = "https://schema.org/CommentAction")]
    Comment,
    #[serde(rename = "https://schema.org/LikeAction")]
    Like,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionCounter {
    #[serde(rename = "@type")]
    pub(crate) kind: &'static str,
    pub interaction_type: InteractionType,
    pub user_interaction_count: u64,
}

impl InteractionCounter {
    pub fn new(interaction_type: InteractionType, count: u64) -> Self {
        Self {
            kind: "InteractionCounter",
            interaction_type,
            user_interaction_count: count,
        }
    }
}

// ---------------------------------------------------------------------------
// Breadcrumbs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbList {
    #[serde(rename = "@type")]
    pub(crate) kind: &'static str,
    pub item_list_element: Vec<ListItem>,
}

impl BreadcrumbList {
    /// Number the trail from 1 in the given order.
    pub fn from_trail(trail: impl IntoIterator<Item = Thing>) -> Self {
        let item_list_element = trail
            .into_iter()
            .zip(1u32..)
            .map(|(item, position)| ListItem {
                kind: "ListItem",
                position,
                item,
            })
            .collect();

        Self {
            kind: "BreadcrumbList",
            item_list_element,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub(crate) kind: &'static str,
    pub position: u32,
    pub item: Thing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thing {
    #[serde(rename = "@type")]
    pub(crate) kind: &'static str,
    pub name: String,
    pub url: String,
}

impl Thing {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: "Thing",
            name: name.into(),
            url: url.into(),
        }
    }
}
