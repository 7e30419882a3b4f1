//! highstile - a static site generator for Markdown blogs.

mod build;
mod cli;
mod compiler;
mod config;
mod error;
mod generator;
mod init;
mod output;
mod serve;
mod utils;

use anyhow::{Context, Result};
use build::build_site;
use clap::Parser;
use cli::Cli;
use config::SiteConfig;
use init::new_post;
use serve::serve_site;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Some(title) = &cli.new_post {
        new_post(&config, title)?;
        return Ok(());
    }

    build_site(&config).context("Build failed")?;

    if cli.serve {
        serve_site(&config)?;
    }
    Ok(())
}

/// Load, override and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let mut config = SiteConfig::load(&cli.root, &cli.config)?;
    config.update_with_cli(cli);
    config.validate()?;
    Ok(config)
}
