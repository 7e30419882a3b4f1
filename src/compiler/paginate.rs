//! Blog listing pages.
//!
//! The newest posts come first. Page `n` (1-based) lives at
//! `blog/page/{n}`; the first page is also the blog index and the site
//! root, so "newer" from page 2 points at `/` rather than `/blog/page/1`.

use serde::Serialize;

/// URL prefix of numbered listing pages.
const PAGE_PREFIX: &str = "/blog/page";

/// One listing page as `paginate.html` sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginatedPage {
    /// Pre-rendered post bodies, newest first.
    pub posts: Vec<String>,
    pub has_newer: bool,
    pub has_older: bool,
    /// Link to the adjacent newer page; empty when `has_newer` is false.
    pub newer: String,
    /// Link to the adjacent older page; empty when `has_older` is false.
    pub older: String,
    /// 1-based page number.
    pub number: usize,
    pub is_homepage: bool,
}

impl PaginatedPage {
    /// Canonical output path, e.g. `/blog/page/2`.
    pub fn path(&self) -> String {
        page_url(self.number)
    }

    /// Title for the `page.html` wrapper.
    pub fn title(&self) -> String {
        if self.is_homepage {
            "Blog".to_owned()
        } else {
            format!("Page {}", self.number)
        }
    }

    /// Extra locations serving the same file: the blog index and the root.
    pub fn aliases(&self) -> &'static [&'static str] {
        if self.is_homepage { &["blog", ""] } else { &[] }
    }
}

fn page_url(number: usize) -> String {
    format!("{PAGE_PREFIX}/{number}")
}

/// Split newest-first post bodies into pages of `page_size` and wire the
/// newer/older links. No posts, no pages.
///
/// # Panics
/// Panics if `page_size` is zero (rejected earlier by config validation).
pub fn paginate(posts_newest_first: impl IntoIterator<Item = String>, page_size: usize) -> Vec<PaginatedPage> {
    assert!(page_size > 0, "page size must be positive");

    let mut pages: Vec<PaginatedPage> = Vec::new();
    for post in posts_newest_first {
        if pages.last().is_none_or(|page| page.posts.len() == page_size) {
            pages.push(PaginatedPage::default());
        }
        if let Some(page) = pages.last_mut() {
            page.posts.push(post);
        }
    }

    let count = pages.len();
    for (i, page) in pages.iter_mut().enumerate() {
        page.number = i + 1;
        page.is_homepage = i == 0;
        if i > 0 {
            page.has_newer = true;
            page.newer = if i == 1 { "/".to_owned() } else { page_url(i) };
        }
        if i + 1 < count {
            page.has_older = true;
            page.older = page_url(i + 2);
        }
    }
    pages
}
