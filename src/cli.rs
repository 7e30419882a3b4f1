//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

/// highstile static site generator CLI
///
/// With no flags, rebuilds the output directory from `pages/`, `posts/`
/// and `public/`.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Site root directory
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Config file name, relative to the root
    #[arg(short = 'C', long, default_value = "config.json")]
    pub config: PathBuf,

    /// Ignore cached HTML and reconvert every Markdown file
    #[arg(long)]
    pub ignore_cache: bool,

    /// Serve the output directory after a successful build
    #[arg(long)]
    pub serve: bool,

    /// Port for `--serve` (overrides `serve.port`)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Create a new post dated now and exit without building
    #[arg(long, value_name = "TITLE")]
    pub new_post: Option<String>,
}
