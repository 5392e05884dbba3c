//! forumschema CLI — schema.org structured data for forum pages.
//!
//! Renders the JSON-LD document a forum page would carry in its head,
//! from a site config and an exported discussion dump.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
