//! Site identity: the flat record at the top level of config.json.
//!
//! Feeds and templates read it; nothing mutates it after loading.

use serde::{Deserialize, Serialize};

/// Title, canonical URL and author identity of the site.
///
/// Keys are lowercase; the capitalized spellings (`Title`, `Url`, ...)
/// are accepted too so older config files keep working.
///
/// # Example
/// ```json
/// {
///   "title": "Notes",
///   "url": "https://example.com",
///   "author": "Alice",
///   "email": "alice@example.com",
///   "description": "Things I wrote down",
///   "avatar": "https://example.com/me.png"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    #[serde(default, alias = "Title")]
    pub title: String,

    /// Base URL without a trailing slash. Feed links are `{url}/{path}`.
    #[serde(default, alias = "Url", alias = "URL")]
    pub url: String,

    #[serde(default, alias = "Email")]
    pub email: String,

    #[serde(default, alias = "Author")]
    pub author: String,

    #[serde(default, alias = "Description")]
    pub description: String,

    /// Avatar image URL for the JSON Feed author block.
    #[serde(default, alias = "Avatar")]
    pub avatar: String,
}

impl SiteInfo {
    /// Absolute URL for a site-relative path.
    pub fn absolute(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }

    /// RSS-style identity: `email (name)`.
    pub fn rss_author(&self) -> String {
        format!("{} ({})", self.email, self.author)
    }
}
