//! Shared types, error model, and configuration for forumschema.
//!
//! This crate is the foundation depended on by all other forumschema crates.
//! It provides:
//! - [`ForumSchemaError`] — the unified error type
//! - Forum views ([`SiteIdentity`], [`DiscussionView`], [`PostView`])
//! - Collaborator traits ([`SettingsRepository`], [`DiscussionRepository`], [`UrlGenerator`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod host;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_INDENT, SchemaOptions, SiteConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{ForumSchemaError, Result};
pub use host::{DiscussionRepository, ForumUrls, SettingsRepository, UrlGenerator};
pub use types::{
    AuthorView, DEFAULT_LOGO_PATH, DiscussionView, PostView, SETTING_FORUM_TITLE,
    SETTING_LOGO_PATH, SiteIdentity, TagView, iso8601,
};
