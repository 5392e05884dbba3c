//! Schema.org structured data for forum pages.
//!
//! This crate turns the site identity and, on thread pages, the discussion
//! being viewed into a single JSON-LD document (`WebSite`, optionally carrying
//! a `DiscussionForumPosting` as `mainEntity`) for the page head.
//!
//! - [`schema`] — typed schema.org entities
//! - [`builder`] — site, discussion and breadcrumb builders
//! - [`route`] — discussion detection from the request path
//! - [`render`] — fail-soft per-render orchestration and JSON-LD output

pub mod builder;
pub mod render;
pub mod route;
pub mod schema;

pub use builder::{
    ANONYMOUS, MAX_COMMENTS, build_breadcrumbs, build_discussion_schema, build_website_schema,
    discussion_url,
};
pub use forumschema_shared::DEFAULT_INDENT;
pub use render::{SchemaRenderer, render_schema, script_tag, to_json_ld};
pub use route::discussion_id_from_path;
pub use schema::{
    BreadcrumbList, Comment, DiscussionForumPosting, ImageObject, InteractionCounter,
    InteractionType, ListItem, Organization, Person, SCHEMA_CONTEXT, SearchAction, Thing, WebSite,
};

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use forumschema_shared::{ForumUrls, load_config_from};
    use forumschema_store::DiscussionStore;

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name)
    }

    fn render_fixture(path: &str, breadcrumbs: bool) -> serde_json::Value {
        let config =
            load_config_from(&fixture("config/forumschema.fixture.toml")).expect("load config");
        let site = config.site_identity().expect("site identity");
        let store = DiscussionStore::open(&fixture("json/discussions.fixture.json"))
            .expect("open discussions");
        let urls = ForumUrls::new(&site.base_url);

        let schema = SchemaRenderer::new(&site, &store, &urls)
            .with_breadcrumbs(breadcrumbs)
            .render(path);
        let json = to_json_ld(&schema, config.schema.indent).expect("serialize");
        serde_json::from_str(&json).expect("parse")
    }

    // -----------------------------------------------------------------------
    // End-to-end over the fixture dump
    // -----------------------------------------------------------------------

    #[test]
    fn fixture_discussion_page() {
        let doc = render_fixture("/d/123-linker-errors-on-musl-targets", false);
        let entity = &doc["mainEntity"];

        assert_eq!(doc["@type"], "WebSite");
        assert_eq!(doc["name"], "Example Forum");
        assert_eq!(doc["publisher"]["logo"]["url"], "https://forum.example.com/assets/logo.png");

        assert_eq!(entity["@type"], "DiscussionForumPosting");
        assert_eq!(
            entity["url"],
            "https://forum.example.com/d/123-linker-errors-on-musl-targets"
        );
        assert_eq!(
            entity["articleBody"],
            "Has anyone tried building with musl? I keep hitting a linker error."
        );
        assert_eq!(entity["author"]["url"], "https://forum.example.com/u/alice");
        assert_eq!(entity["dateModified"], "2024-01-16T08:05:12+00:00");
        assert_eq!(entity["interactionStatistic"][0]["userInteractionCount"], 4);
        assert_eq!(entity["interactionStatistic"][1]["userInteractionCount"], 3);

        // Blank and non-string replies are skipped.
        let comments = entity["comment"].as_array().expect("comment array");
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0]["text"], "Install musl-tools first.");
        assert_eq!(comments[1]["author"]["name"], "Anonymous");
        assert!(doc.get("breadcrumb").is_none());
    }

    #[test]
    fn fixture_breadcrumbs() {
        let doc = render_fixture("/d/123", true);
        let items = doc["breadcrumb"]["itemListElement"]
            .as_array()
            .expect("breadcrumb items");

        let names: Vec<&str> = items
            .iter()
            .filter_map(|i| i["item"]["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Home", "Help", "Toolchain", "Linker errors on musl targets"]);
        assert_eq!(items[0]["position"], 1);
        assert_eq!(items[1]["item"]["url"], "https://forum.example.com/t/help");
    }

    #[test]
    fn fixture_failures_degrade() {
        for path in ["/d/7-empty-thread", "/d/404-orphaned-thread", "/d/555"] {
            let doc = render_fixture(path, true);
            assert_eq!(doc["@context"], SCHEMA_CONTEXT, "{path}");
            assert!(doc.get("mainEntity").is_none(), "{path}");
            assert!(doc.get("breadcrumb").is_none(), "{path}");
        }
    }

    #[test]
    fn fixture_non_discussion_page() {
        let doc = render_fixture("/t/help", false);
        assert!(doc.get("mainEntity").is_none());
        assert_eq!(doc["potentialAction"]["target"], "https://forum.example.com/?q={search_term_string}");
    }
}
