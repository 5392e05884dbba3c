//! Application configuration for forumschema.
//!
//! User config lives at `~/.forumschema/forumschema.toml`.
//! CLI flags override config file values, which override defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ForumSchemaError, Result};
use crate::host::SettingsRepository;
use crate::types::SiteIdentity;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "forumschema.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".forumschema";

// ---------------------------------------------------------------------------
// Config structs (matching forumschema.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Forum installation settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Output shaping options.
    #[serde(default)]
    pub schema: SchemaOptions,

    /// Stand-in for the forum's settings store (`forum_title`, `logo_path`, ...).
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Public base URL of the forum.
    #[serde(default = "default_site_url")]
    pub url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: default_site_url(),
        }
    }
}

fn default_site_url() -> String {
    "http://localhost".into()
}

/// Default spaces per indentation level of the pretty-printed document.
pub const DEFAULT_INDENT: usize = 4;

/// `[schema]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaOptions {
    /// Emit a `BreadcrumbList` alongside the discussion entity.
    #[serde(default)]
    pub breadcrumbs: bool,

    /// Spaces per indentation level in the pretty-printed output.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            breadcrumbs: false,
            indent: default_indent(),
        }
    }
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl AppConfig {
    /// Validated base URL with any trailing slash removed.
    pub fn base_url(&self) -> Result<String> {
        let parsed = Url::parse(&self.site.url).map_err(|e| {
            ForumSchemaError::validation(format!("invalid [site] url {:?}: {e}", self.site.url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ForumSchemaError::validation(format!(
                "[site] url must be http(s), got {:?}",
                self.site.url
            )));
        }
        Ok(self.site.url.trim_end_matches('/').to_string())
    }

    /// Resolve the site identity from `[site]` and `[settings]`.
    pub fn site_identity(&self) -> Result<SiteIdentity> {
        Ok(SiteIdentity::resolve(self, &self.base_url()?))
    }
}

impl SettingsRepository for AppConfig {
    fn get(&self, key: &str, default: &str) -> String {
        self.settings
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.forumschema/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ForumSchemaError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.forumschema/forumschema.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ForumSchemaError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        ForumSchemaError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ForumSchemaError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let mut config = AppConfig::default();
    config
        .settings
        .insert(crate::types::SETTING_FORUM_TITLE.into(), String::new());
    let content =
        toml::to_string_pretty(&config).map_err(|e| ForumSchemaError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ForumSchemaError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
