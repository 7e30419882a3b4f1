//! Syndication feeds for the post collection.
//!
//! RSS 2.0 (`feed.xml`) and JSON Feed v1 (`feed.json`) are built
//! independently from the same selection: the newest posts, newest first.

pub mod json_feed;
pub mod rss;

use crate::{compiler::Document, config::SiteInfo, error::Result};
use std::path::Path;

/// The `count` most recent posts of a chronologically ascending
/// collection, newest first.
pub fn recent(posts_ascending: &[Document], count: usize) -> impl Iterator<Item = &Document> {
    posts_ascending.iter().rev().take(count)
}

/// Write both feeds into `output_dir`.
pub fn build_feeds(site: &SiteInfo, posts_ascending: &[Document], count: usize, output_dir: &Path) -> Result<()> {
    rss::build_rss(site, posts_ascending, count, output_dir)?;
    json_feed::build_json_feed(site, posts_ascending, count, output_dir)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// `n` posts, one per day starting 2023-01-01, ascending.
    pub(crate) fn dated_posts(n: usize) -> Vec<Document> {
        (0..n)
            .map(|i| Document {
                title: format!("Post {i}"),
                path: format!("post-{i}"),
                contents: format!("<p>body {i}</p>"),
                date: format!("2023-01-{:02} 08:00:00", i + 1),
                ..Document::default()
            })
            .collect()
    }

    pub(crate) fn site() -> SiteInfo {
        SiteInfo {
            title: "Notes".into(),
            url: "https://example.com".into(),
            email: "alice@example.com".into(),
            author: "Alice".into(),
            description: "Things I wrote down".into(),
            avatar: "https://example.com/me.png".into(),
        }
    }

    #[test]
    fn test_recent_takes_newest_first() {
        let posts = dated_posts(15);
        let titles: Vec<_> = recent(&posts, 10).map(|p| p.title.as_str()).collect();

        assert_eq!(titles.len(), 10);
        assert_eq!(titles[0], "Post 14");
        assert_eq!(titles[9], "Post 5");
    }

    #[test]
    fn test_recent_short_collection() {
        let posts = dated_posts(3);
        assert_eq!(recent(&posts, 10).count(), 3);
        assert_eq!(recent(&[], 10).count(), 0);
    }
}
