//! Per-render orchestration and JSON-LD output.
//!
//! The website record is always produced. Discussion enrichment is
//! best-effort: any failure is logged and the page gets the site-only
//! document.

use forumschema_shared::{
    DiscussionRepository, ForumSchemaError, Result, SchemaOptions, SiteIdentity, UrlGenerator,
};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info, instrument, warn};

use crate::builder::{build_breadcrumbs, build_discussion_schema, build_website_schema};
use crate::route::discussion_id_from_path;
use crate::schema::{BreadcrumbList, DiscussionForumPosting, WebSite};

/// Output of a successful enrichment step.
#[derive(Debug)]
struct Enrichment {
    posting: DiscussionForumPosting,
    breadcrumb: Option<BreadcrumbList>,
}

/// Builds the JSON-LD document for one page render.
pub struct SchemaRenderer<'a> {
    site: &'a SiteIdentity,
    discussions: &'a dyn DiscussionRepository,
    urls: &'a dyn UrlGenerator,
    breadcrumbs: bool,
}

impl<'a> SchemaRenderer<'a> {
    pub fn new(
        site: &'a SiteIdentity,
        discussions: &'a dyn DiscussionRepository,
        urls: &'a dyn UrlGenerator,
    ) -> Self {
        Self {
            site,
            discussions,
            urls,
            breadcrumbs: false,
        }
    }

    /// Apply the `[schema]` config section.
    pub fn with_options(mut self, options: &SchemaOptions) -> Self {
        self.breadcrumbs = options.breadcrumbs;
        self
    }

    /// Also emit a `BreadcrumbList` on discussion pages.
    pub fn with_breadcrumbs(mut self, enabled: bool) -> Self {
        self.breadcrumbs = enabled;
        self
    }

    /// Build the document for the page at `path`. Never fails.
    #[instrument(skip(self))]
    pub fn render(&self, path: &str) -> WebSite {
        let mut schema = build_website_schema(self.site);

        match self.enrich(path) {
            Ok(Some(enrichment)) => {
                schema.main_entity = Some(enrichment.posting);
                schema.breadcrumb = enrichment.breadcrumb;
            }
            Ok(None) => debug!("not a discussion page"),
            Err(e) if e.is_enrichment() => info!("schema skipped: {e}"),
            Err(e) => warn!("schema error: {e}"),
        }

        schema
    }

    /// Discussion-specific part of the document, if `path` is a discussion page.
    fn enrich(&self, path: &str) -> Result<Option<Enrichment>> {
        let Some(id) = discussion_id_from_path(path) else {
            return Ok(None);
        };

        let discussion = self.discussions.find_by_id(id)?;
        let posting = build_discussion_schema(self.site, &discussion, self.urls)?;
        let breadcrumb = self
            .breadcrumbs
            .then(|| build_breadcrumbs(self.site, &discussion, self.urls));

        Ok(Some(Enrichment {
            posting,
            breadcrumb,
        }))
    }
}

/// One-shot form of [`SchemaRenderer::render`] with default options.
pub fn render_schema(
    site: &SiteIdentity,
    path: &str,
    discussions: &dyn DiscussionRepository,
    urls: &dyn UrlGenerator,
) -> WebSite {
    SchemaRenderer::new(site, discussions, urls).render(path)
}

/// Pretty-print a document. Forward slashes are left unescaped.
pub fn to_json_ld<T: Serialize>(document: &T, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    document
        .serialize(&mut serializer)
        .map_err(|e| ForumSchemaError::Serialization(e.to_string()))?;

    String::from_utf8(buf).map_err(|e| ForumSchemaError::Serialization(e.to_string()))
}

/// Wrap a JSON-LD document in a `<script>` element for the page head.
///
/// `<` is written as `\u003c` so no string inside the document can close
/// the element early.
pub fn script_tag(json: &str) -> String {
    format!(
        r#"<script type="application/ld+json">{}</script>"#,
        json.replace('<', "\\u003c")
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use forumschema_shared::{
        AuthorView, DEFAULT_INDENT, DiscussionView, ForumUrls, PostView, TagView,
    };

    /// In-memory repository fake.
    #[derive(Default)]
    struct FakeDiscussions(HashMap<u64, DiscussionView>);

    impl DiscussionRepository for FakeDiscussions {
        fn find_by_id(&self, id: u64) -> Result<DiscussionView> {
            self.0
                .get(&id)
                .cloned()
                .ok_or(ForumSchemaError::DiscussionNotFound { id })
        }
    }

    /// Repository whose backend is down.
    struct BrokenDiscussions;

    impl DiscussionRepository for BrokenDiscussions {
        fn find_by_id(&self, _id: u64) -> Result<DiscussionView> {
            Err(ForumSchemaError::Storage("connection refused".into()))
        }
    }

    fn site() -> SiteIdentity {
        SiteIdentity {
            name: "Example Forum".into(),
            base_url: "https://forum.example.com".into(),
            logo_url: "https://forum.example.com/logo/logo-schema.png".into(),
        }
    }

    fn urls() -> ForumUrls {
        ForumUrls::new("https://forum.example.com")
    }

    fn post(id: u64, author: Option<&str>, content: &str) -> PostView {
        PostView {
            id,
            author: author.map(|u| AuthorView {
                username: u.into(),
            }),
            content: Some(content.into()),
            created_at: "2024-01-15T11:00:00+00:00".parse().ok(),
        }
    }

    fn repo() -> FakeDiscussions {
        let mut repo = FakeDiscussions::default();
        repo.0.insert(
            123,
            DiscussionView {
                id: 123,
                title: "My Title".into(),
                slug: "my-title".into(),
                created_at: "2024-01-15T10:30:00+00:00".parse().ok(),
                updated_at: "2024-01-16T08:00:00+00:00".parse().ok(),
                comment_count: 2,
                like_count: 1,
                tags: vec![TagView {
                    name: "Help".into(),
                    slug: "help".into(),
                }],
                posts: vec![
                    post(1, Some("alice"), "<p>Hello <b>world</b></p>"),
                    post(2, Some("bob"), "<p>See https://docs.example.com/a/b</p>"),
                ],
            },
        );
        repo.0.insert(
            8,
            DiscussionView {
                id: 8,
                title: "Orphan".into(),
                slug: "orphan".into(),
                created_at: None,
                updated_at: None,
                comment_count: 1,
                like_count: 0,
                tags: vec![],
                posts: vec![post(1, None, "no author")],
            },
        );
        repo
    }

    #[test]
    fn discussion_page_gets_main_entity() {
        let (site, repo, urls) = (site(), repo(), urls());
        let schema = render_schema(&site, "/d/123-my-title", &repo, &urls);

        let posting = schema.main_entity.expect("main entity");
        assert_eq!(posting.headline, "My Title");
        assert_eq!(posting.author.name, "alice");
        assert_eq!(posting.comment.len(), 1);
        assert!(schema.breadcrumb.is_none());
    }

    #[test]
    fn other_pages_are_site_only() {
        let (site, repo, urls) = (site(), repo(), urls());
        let schema = render_schema(&site, "/u/someone", &repo, &urls);
        assert_eq!(schema, build_website_schema(&site));
    }

    #[test]
    fn unknown_discussion_degrades_to_site_only() {
        let (site, repo, urls) = (site(), repo(), urls());
        let schema = render_schema(&site, "/d/999-gone", &repo, &urls);
        assert_eq!(schema, build_website_schema(&site));

        let json = to_json_ld(&schema, DEFAULT_INDENT).expect("serialize");
        assert!(!json.contains("mainEntity"));
    }

    #[test]
    fn missing_author_degrades_to_site_only() {
        let (site, repo, urls) = (site(), repo(), urls());
        let schema = render_schema(&site, "/d/8-orphan", &repo, &urls);
        assert!(schema.main_entity.is_none());
    }

    #[test]
    fn broken_storage_degrades_to_site_only() {
        let (site, urls) = (site(), urls());
        let schema = render_schema(&site, "/d/123-my-title", &BrokenDiscussions, &urls);
        assert_eq!(schema, build_website_schema(&site));
    }

    #[test]
    fn breadcrumbs_when_enabled() {
        let (site, repo, urls) = (site(), repo(), urls());
        let options = SchemaOptions {
            breadcrumbs: true,
            indent: DEFAULT_INDENT,
        };
        let renderer = SchemaRenderer::new(&site, &repo, &urls).with_options(&options);

        let schema = renderer.render("/d/123-my-title");
        let trail = schema.breadcrumb.expect("breadcrumb");
        assert_eq!(trail.item_list_element.len(), 3);

        let site_only = renderer.render("/");
        assert!(site_only.breadcrumb.is_none());
    }

    #[test]
    fn json_roundtrip() {
        let (site, repo, urls) = (site(), repo(), urls());
        let schema = render_schema(&site, "/d/123-my-title", &repo, &urls);
        let json = to_json_ld(&schema, DEFAULT_INDENT).expect("serialize");

        let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed["@context"], "https://schema.org");
        assert_eq!(parsed["mainEntity"]["author"]["name"], "alice");
        assert_eq!(
            parsed["mainEntity"]["interactionStatistic"][0]["interactionType"],
            "https://schema.org/CommentAction"
        );
        assert_eq!(parsed["mainEntity"]["comment"][0]["@type"], "Comment");
    }

    #[test]
    fn json_keeps_slashes_and_indents() {
        let schema = build_website_schema(&site());
        let json = to_json_ld(&schema, DEFAULT_INDENT).expect("serialize");

        assert!(json.contains("\"url\": \"https://forum.example.com\""));
        assert!(!json.contains("\\/"));
        assert!(json.contains("\n    \"@type\": \"WebSite\""));

        let compact = to_json_ld(&schema, 2).expect("serialize");
        assert!(compact.contains("\n  \"@type\": \"WebSite\""));
    }

    #[test]
    fn json_key_order_follows_schema() {
        let (site, repo, urls) = (site(), repo(), urls());
        let schema = render_schema(&site, "/d/123-my-title", &repo, &urls);
        let json = to_json_ld(&schema, DEFAULT_INDENT).expect("serialize");

        let keys = [
            "\"@context\"",
            "\"potentialAction\"",
            "\"mainEntity\"",
            "\"headline\"",
            "\"articleBody\"",
            "\"datePublished\"",
            "\"dateModified\"",
            "\"interactionStatistic\"",
            "\"comment\"",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| json.find(k).unwrap_or_else(|| panic!("missing {k}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn script_tag_wraps_and_escapes() {
        let tag = script_tag(r#"{"text": "</script><b>"}"#);
        assert!(tag.starts_with(r#"<script type="application/ld+json">"#));
        assert!(tag.ends_with("</script>"));
        assert_eq!(tag.matches("</script>").count(), 1);

        let inner = tag
            .trim_start_matches(r#"<script type="application/ld+json">"#)
            .trim_end_matches("</script>");
        let parsed: serde_json::Value = serde_json::from_str(inner).expect("still valid json");
        assert_eq!(parsed["text"], "</script><b>");
    }
}
