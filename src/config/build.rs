//! `build` section configuration.

use super::defaults;
use educe::Educe;
use serde::Deserialize;
use std::path::PathBuf;

/// Which Markdown-to-HTML engine to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    /// External `pandoc` process (the `pandoc_command` setting).
    #[default]
    Pandoc,
    /// In-process CommonMark renderer.
    Embedded,
}

/// `build` object in config.json - pipeline settings.
///
/// # Example
/// ```json
/// "build": {
///   "converter": "embedded",
///   "page_size": 5,
///   "output": "dist"
/// }
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
pub struct BuildConfig {
    #[serde(default)]
    pub converter: ConverterKind,

    /// Program and leading arguments; the Markdown file path is appended.
    #[serde(default = "defaults::build::pandoc_command")]
    #[educe(Default = defaults::build::pandoc_command())]
    pub pandoc_command: Vec<String>,

    /// Seconds before a converter process is killed.
    #[serde(default = "defaults::build::converter_timeout")]
    #[educe(Default = defaults::build::converter_timeout())]
    pub converter_timeout: u64,

    /// Posts per listing page.
    #[serde(default = "defaults::build::page_size")]
    #[educe(Default = defaults::build::page_size())]
    pub page_size: usize,

    /// Posts per feed.
    #[serde(default = "defaults::build::feed_size")]
    #[educe(Default = defaults::build::feed_size())]
    pub feed_size: usize,

    #[serde(default = "defaults::build::pages")]
    #[educe(Default = defaults::build::pages())]
    pub pages: PathBuf,

    #[serde(default = "defaults::build::posts")]
    #[educe(Default = defaults::build::posts())]
    pub posts: PathBuf,

    #[serde(default = "defaults::build::public")]
    #[educe(Default = defaults::build::public())]
    pub public: PathBuf,

    #[serde(default = "defaults::build::templates")]
    #[educe(Default = defaults::build::templates())]
    pub templates: PathBuf,

    /// Build output. Removed and recreated on every build.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Set from `--ignore-cache`; forces every Markdown file to reconvert.
    #[serde(skip)]
    pub ignore_cache: bool,
}
