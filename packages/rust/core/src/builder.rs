//! Schema builders: forum data in, schema.org entities out.

use forumschema_markup::strip_html;
use forumschema_shared::{
    DiscussionView, ForumSchemaError, PostView, Result, SiteIdentity, UrlGenerator, iso8601,
};
use tracing::{debug, instrument};

use crate::schema::{
    BreadcrumbList, Comment, DiscussionForumPosting, ImageObject, InteractionCounter,
    InteractionType, Organization, Person, SearchAction, Thing, WebSite,
};

/// Maximum number of replies emitted as comments.
pub const MAX_COMMENTS: usize = 100;

/// Author name for posts whose author cannot be resolved.
pub const ANONYMOUS: &str = "Anonymous";

/// Build the site-level record. Always succeeds.
///
/// The publisher logo is `null` when the site has no logo URL.
pub fn build_website_schema(site: &SiteIdentity) -> WebSite {
    let logo = (!site.logo_url.is_empty()).then(|| ImageObject::new(&site.logo_url));

    WebSite::new(
        &site.name,
        &site.base_url,
        Organization::new(&site.name, logo),
        SearchAction::for_site(&site.base_url),
    )
}

/// Build the `DiscussionForumPosting` for a thread.
///
/// Fails when the thread has no opening post or the opening post has no
/// author; replies with unresolved authors are attributed to "Anonymous".
#[instrument(skip_all, fields(discussion_id = discussion.id))]
pub fn build_discussion_schema(
    site: &SiteIdentity,
    discussion: &DiscussionView,
    urls: &dyn UrlGenerator,
) -> Result<DiscussionForumPosting> {
    let first_post = discussion
        .first_post()
        .ok_or(ForumSchemaError::MissingFirstPost { id: discussion.id })?;

    let author = first_post
        .author
        .as_ref()
        .ok_or(ForumSchemaError::MissingAuthor { id: discussion.id })?;

    let comment = build_comments(discussion.replies(), urls);
    debug!(comments = comment.len(), "discussion schema built");

    Ok(DiscussionForumPosting {
        kind: "DiscussionForumPosting",
        headline: discussion.title.clone(),
        article_body: strip_html(first_post.content.as_deref()),
        date_published: iso8601(discussion.created_at.as_ref()),
        date_modified: iso8601(discussion.updated_at.as_ref()),
        url: discussion_url(site, discussion),
        author: Person::new(&author.username, urls.profile_url(&author.username)),
        publisher: Organization::new(&site.name, Some(ImageObject::new(&site.logo_url))),
        interaction_statistic: vec![
            InteractionCounter::new(InteractionType::Comment, reply_count(discussion)),
            InteractionCounter::new(InteractionType::Like, u64::from(discussion.like_count)),
        ],
        comment,
    })
}

/// Breadcrumb trail: home, each tag, then the thread.
pub fn build_breadcrumbs(
    site: &SiteIdentity,
    discussion: &DiscussionView,
    urls: &dyn UrlGenerator,
) -> BreadcrumbList {
    let home = Thing::new("Home", &site.base_url);
    let tags = discussion
        .tags
        .iter()
        .map(|tag| Thing::new(&tag.name, urls.tag_url(&tag.slug)));
    let thread = Thing::new(&discussion.title, discussion_url(site, discussion));

    BreadcrumbList::from_trail(std::iter::once(home).chain(tags).chain(std::iter::once(thread)))
}

/// Canonical thread URL: `{base}/d/{id}-{slug}`.
pub fn discussion_url(site: &SiteIdentity, discussion: &DiscussionView) -> String {
    format!("{}/d/{}-{}", site.base_url, discussion.id, discussion.slug)
}

/// Posts in the thread minus the opening post, never negative.
fn reply_count(discussion: &DiscussionView) -> u64 {
    discussion.posts.len().saturating_sub(1) as u64
}

/// Replies with non-empty text, capped at [`MAX_COMMENTS`].
fn build_comments(replies: &[PostView], urls: &dyn UrlGenerator) -> Vec<Comment> {
    replies
        .iter()
        .filter_map(|post| {
            let text = strip_html(post.content.as_deref());
            if text.is_empty() {
                return None;
            }

            let author = match &post.author {
                Some(a) => Person::new(&a.username, urls.profile_url(&a.username)),
                None => Person::new(ANONYMOUS, ""),
            };

            Some(Comment::new(text, iso8601(post.created_at.as_ref()), author))
        })
        .take(MAX_COMMENTS)
        .collect()
}
