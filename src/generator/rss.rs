//! RSS 2.0 feed generation.

use super::recent;
use crate::{
    compiler::Document,
    config::SiteInfo,
    error::{Error, IoContext, Result},
    log,
    utils::date,
};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::{fs, path::Path};

/// Output file name, relative to the output directory.
pub const RSS_FILE: &str = "feed.xml";

// ============================================================================
// Public API
// ============================================================================

/// Write `feed.xml` for the newest `count` posts.
pub fn build_rss(site: &SiteInfo, posts_ascending: &[Document], count: usize, output_dir: &Path) -> Result<()> {
    RssFeed::new(site, recent(posts_ascending, count).collect()).write(output_dir)
}

// ============================================================================
// RssFeed Implementation
// ============================================================================

/// rss feed builder
struct RssFeed<'a> {
    site: &'a SiteInfo,
    posts: Vec<&'a Document>,
}

impl<'a> RssFeed<'a> {
    fn new(site: &'a SiteInfo, posts: Vec<&'a Document>) -> Self {
        Self { site, posts }
    }

    /// Generate rss xml string
    fn into_xml(self) -> Result<String> {
        let items: Vec<_> = self
            .posts
            .iter()
            .map(|post| post_to_rss_item(post, self.site))
            .collect();

        let channel = ChannelBuilder::default()
            .title(&self.site.title)
            .link(&self.site.url)
            .description(&self.site.description)
            .managing_editor(self.site.rss_author())
            .generator("highstile".to_string())
            .items(items)
            .build();

        // Links are only absolute URLs once the site url is configured
        if self.site.url.is_empty() {
            log!("warn"; "site url is empty, {} links are relative", RSS_FILE);
        } else {
            channel
                .validate()
                .map_err(|e| Error::Serialization(format!("rss feed: {e}")))?;
        }
        Ok(channel.to_string())
    }

    /// Write rss feed to file
    fn write(self, output_dir: &Path) -> Result<()> {
        let xml = self.into_xml()?;
        let path = output_dir.join(RSS_FILE);
        fs::write(&path, xml).fs_context("failed to write", &path)?;

        log!("feed"; "{}", RSS_FILE);
        Ok(())
    }
}

/// Convert a post to an rss item carrying its full HTML body.
fn post_to_rss_item(post: &Document, site: &SiteInfo) -> rss::Item {
    let link = site.absolute(&post.post_path());

    ItemBuilder::default()
        .title(post.title.clone())
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(post.contents.clone())
        .pub_date(date::to_rfc2822(post.timestamp()))
        .author(site.rss_author())
        .build()
}
