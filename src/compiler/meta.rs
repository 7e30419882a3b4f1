//! Documents, sidecar metadata, and the views templates see.
//!
//! # Architecture
//!
//! ```text
//! posts/2023-04-01-hello.md ──► body (via MarkdownCache)
//! posts/2023-04-01-hello.json ─► Metadata ──apply──► Document
//!                                                      │
//!                                  link_chronologically (prev/next, slug)
//!                                                      │
//!                                      Document::view ──► DocumentView (tera)
//! ```
//!
//! Chronological neighbors are indices into the linked collection rather
//! than references, so a `Document` owns nothing but its own fields.

use crate::utils::date;
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// One unit of publishable content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    /// Public path segment. Defaults to the file stem.
    pub path: String,
    /// Rendered HTML body. Already safe to embed.
    pub contents: String,
    /// Raw HTML read from the sidecar's `header_path`.
    pub header: Option<String>,
    /// Raw `YYYY-MM-DD HH:MM:SS` string; empty for undated pages.
    pub date: String,
    pub is_homepage: bool,
    /// Enables previous/next navigation in `post.html`.
    pub show_history: bool,
    /// Index of the chronologically previous document in its collection.
    pub prev: Option<usize>,
    /// Index of the chronologically next document in its collection.
    pub next: Option<usize>,
}

impl Document {
    /// Parsed publication time, if the date string is valid.
    pub fn time(&self) -> Option<NaiveDateTime> {
        date::parse_post_date(&self.date)
    }

    /// Publication time, falling back to the Unix epoch.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.time().unwrap_or_else(date::epoch)
    }

    /// Canonical post URL path: `blog/{year}/{month}/{day}/{path}`, unpadded.
    pub fn post_path(&self) -> String {
        let t = self.timestamp();
        format!("blog/{}/{}/{}/{}", t.year(), t.month(), t.day(), self.path)
    }

    /// Alias post URL path with zero-padded date components.
    pub fn post_path_padded(&self) -> String {
        let t = self.timestamp();
        format!(
            "blog/{:04}/{:02}/{:02}/{}",
            t.year(),
            t.month(),
            t.day(),
            self.path
        )
    }

    pub fn pretty_date(&self) -> String {
        date::pretty(self.timestamp())
    }

    /// Template view. `collection` resolves `prev`/`next`; pass an empty
    /// slice for documents outside a linked collection.
    pub fn view<'a>(&'a self, collection: &'a [Document]) -> DocumentView<'a> {
        let neighbor = |index: Option<usize>| {
            index
                .and_then(|i| collection.get(i))
                .map(NeighborView::from)
        };
        let prev = neighbor(self.prev);
        let next = neighbor(self.next);

        DocumentView {
            title: &self.title,
            path: &self.path,
            contents: Cow::Borrowed(&self.contents),
            header: self.header.as_deref().unwrap_or_default(),
            date: &self.date,
            pretty_date: self.pretty_date(),
            post_path: self.post_path(),
            is_homepage: self.is_homepage,
            show_history: self.show_history,
            has_prev: prev.is_some(),
            has_next: next.is_some(),
            prev,
            next,
        }
    }
}

// ============================================================================
// Sidecar metadata
// ============================================================================

/// Overlay read from `<slug>.json` next to a content file.
///
/// Every field is optional; present fields replace loader defaults. The
/// body is never part of the overlay. Unknown keys are ignored. The
/// capitalized and dashed spellings are aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    #[serde(alias = "Title")]
    pub title: Option<String>,

    #[serde(alias = "Path")]
    pub path: Option<String>,

    #[serde(alias = "Date")]
    pub date: Option<String>,

    /// Header snippet file, relative to the content directory.
    #[serde(alias = "HeaderPath", alias = "header-path", alias = "headerPath")]
    pub header_path: Option<String>,

    #[serde(alias = "IsHomepage", alias = "is-homepage", alias = "homepage")]
    pub is_homepage: Option<bool>,

    #[serde(alias = "ShowHistory", alias = "show-history")]
    pub show_history: Option<bool>,
}

impl Metadata {
    /// Merge onto `doc`. Returns the header path for the loader to resolve.
    pub fn apply(self, doc: &mut Document) -> Option<String> {
        if let Some(title) = self.title {
            doc.title = title;
        }
        if let Some(path) = self.path {
            doc.path = path;
        }
        if let Some(date) = self.date {
            doc.date = date;
        }
        if let Some(is_homepage) = self.is_homepage {
            doc.is_homepage = is_homepage;
        }
        if let Some(show_history) = self.show_history {
            doc.show_history = show_history;
        }
        self.header_path.filter(|p| !p.is_empty())
    }
}

// ============================================================================
// Template views
// ============================================================================

/// What `page.html` and `post.html` receive.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentView<'a> {
    pub title: &'a str,
    pub path: &'a str,
    pub contents: Cow<'a, str>,
    pub header: &'a str,
    pub date: &'a str,
    pub pretty_date: String,
    pub post_path: String,
    pub is_homepage: bool,
    pub show_history: bool,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev: Option<NeighborView<'a>>,
    pub next: Option<NeighborView<'a>>,
}

impl<'a> DocumentView<'a> {
    /// Replace the body, e.g. with the `post.html` rendering of a post.
    pub fn with_contents(mut self, contents: String) -> Self {
        self.contents = Cow::Owned(contents);
        self
    }

    pub fn with_show_history(mut self, show_history: bool) -> Self {
        self.show_history = show_history;
        self
    }
}

/// Enough of a neighbor to link to it.
#[derive(Debug, Clone, Serialize)]
pub struct NeighborView<'a> {
    pub title: &'a str,
    pub path: &'a str,
    pub post_path: String,
}

impl<'a> From<&'a Document> for NeighborView<'a> {
    fn from(doc: &'a Document) -> Self {
        Self {
            title: &doc.title,
            path: &doc.path,
            post_path: doc.post_path(),
        }
    }
}
