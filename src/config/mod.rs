//! Site configuration management for `config.json`.
//!
//! # Layout
//!
//! | Key         | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | top level   | Site identity (title, url, author, ...)          |
//! | `build`     | Converter, page/feed sizes, directory names      |
//! | `serve`     | Static file server (interface, port)             |
//!
//! # Example
//!
//! ```json
//! {
//!   "title": "Notes",
//!   "url": "https://example.com",
//!   "author": "Alice",
//!   "email": "alice@example.com",
//!   "build": { "converter": "embedded" },
//!   "serve": { "port": 3000 }
//! }
//! ```
//!
//! The configuration is loaded once in `main`, adjusted by CLI flags and
//! then only ever borrowed.

mod build;
pub mod defaults;
mod error;
mod serve;
mod site;

pub use build::{BuildConfig, ConverterKind};
pub use error::ConfigError;
pub use serve::ServeConfig;
pub use site::SiteInfo;

use crate::{cli::Cli, log};
use serde::Deserialize;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Root configuration structure representing config.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Site root; every configured directory is relative to it.
    #[serde(skip)]
    pub root: PathBuf,

    /// Site identity, flattened into the top-level object.
    #[serde(flatten)]
    pub site: SiteInfo,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Static file server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from a JSON string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: SiteConfig = serde_json::from_str(content)?;
        config.normalize();
        Ok(config)
    }

    /// Load `file` under `root`.
    ///
    /// A missing file is not an error: the site builds with default
    /// settings and empty identity fields.
    pub fn load(root: &Path, file: &Path) -> Result<Self, ConfigError> {
        let path = root.join(file);
        let mut config = match fs::read_to_string(&path) {
            Ok(content) => {
                log!("config"; "{}", path.display());
                Self::from_str(&content)?
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log!("warn"; "no {} found, using defaults", path.display());
                Self::default()
            }
            Err(err) => return Err(ConfigError::Io(path, err)),
        };
        config.root = root.to_path_buf();
        Ok(config)
    }

    /// Apply command line overrides.
    pub fn update_with_cli(&mut self, cli: &Cli) {
        self.build.ignore_cache = cli.ignore_cache;
        if let Some(port) = cli.port {
            self.serve.port = port;
        }
    }

    /// Check settings that would break the build halfway through.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build.page_size == 0 {
            return Err(ConfigError::Validation("build.page_size must be at least 1".into()));
        }
        if self.build.feed_size == 0 {
            return Err(ConfigError::Validation("build.feed_size must be at least 1".into()));
        }
        if self.build.converter_timeout == 0 {
            return Err(ConfigError::Validation(
                "build.converter_timeout must be at least 1 second".into(),
            ));
        }
        if self.build.converter == ConverterKind::Pandoc && self.build.pandoc_command.is_empty() {
            return Err(ConfigError::Validation("build.pandoc_command is empty".into()));
        }
        Ok(())
    }

    fn normalize(&mut self) {
        let trimmed = self.site.url.trim_end_matches('/').len();
        self.site.url.truncate(trimmed);
    }

    // ------------------------------------------------------------------------
    // Resolved directories
    // ------------------------------------------------------------------------

    pub fn pages_dir(&self) -> PathBuf {
        self.root.join(&self.build.pages)
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.root.join(&self.build.posts)
    }

    pub fn public_dir(&self) -> PathBuf {
        self.root.join(&self.build.public)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(&self.build.templates)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.build.output)
    }
}
