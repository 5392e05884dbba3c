//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use forumschema_core::{SchemaRenderer, script_tag, to_json_ld};
use forumschema_shared::{
    AppConfig, DiscussionRepository, ForumUrls, init_config, load_config, load_config_from,
};
use forumschema_store::DiscussionStore;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// forumschema — schema.org JSON-LD for forum pages.
#[derive(Parser)]
#[command(
    name = "forumschema",
    version,
    about = "Render the schema.org JSON-LD document for a forum page.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.forumschema/forumschema.toml).
    #[arg(long, global = true, env = "FORUMSCHEMA_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Render the JSON-LD document for a request path.
    Render {
        /// Request path of the page, e.g. `/d/123-my-title`.
        #[arg(long, default_value = "/")]
        path: String,

        /// Discussion dump (JSON) to resolve thread pages from.
        #[arg(long)]
        store: Option<PathBuf>,

        /// Wrap the document in a `<script type="application/ld+json">` tag.
        #[arg(long)]
        script: bool,

        /// Emit breadcrumbs regardless of config.
        #[arg(long)]
        breadcrumbs: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "forumschema=info",
        1 => "forumschema=debug",
        _ => "forumschema=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render {
            path,
            store,
            script,
            breadcrumbs,
        } => cmd_render(
            cli.config.as_deref(),
            &path,
            store.as_deref(),
            script,
            breadcrumbs,
        ),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(cli.config.as_deref()),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

fn cmd_render(
    config_path: Option<&Path>,
    path: &str,
    store: Option<&Path>,
    script: bool,
    breadcrumbs: bool,
) -> Result<()> {
    let config = resolve_config(config_path)?;
    let site = config.site_identity()?;
    let urls = ForumUrls::new(&site.base_url);

    let store = match store {
        Some(p) => DiscussionStore::open(p)
            .wrap_err_with(|| format!("loading discussion dump {}", p.display()))?,
        None => DiscussionStore::default(),
    };

    info!(path, site = %site.base_url, discussions = store.len(), "rendering structured data");

    let discussions: &dyn DiscussionRepository = &store;
    let mut renderer = SchemaRenderer::new(&site, discussions, &urls).with_options(&config.schema);
    if breadcrumbs {
        renderer = renderer.with_breadcrumbs(true);
    }
    let schema = renderer.render(path);

    let json = to_json_ld(&schema, config.schema.indent)?;
    if script {
        println!("{}", script_tag(&json));
    } else {
        println!("{json}");
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
