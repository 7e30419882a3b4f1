//! JSON Feed v1 generation.
//!
//! Serialized straight from borrowed structs; key order follows the
//! field order below.

use super::recent;
use crate::{
    compiler::Document,
    config::SiteInfo,
    error::{Error, IoContext, Result},
    log,
    utils::date,
};
use serde::Serialize;
use std::{fs, path::Path};

/// Output file name, relative to the output directory.
pub const JSON_FEED_FILE: &str = "feed.json";

const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1";

#[derive(Debug, Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    feed_url: String,
    description: &'a str,
    author: JsonFeedAuthor<'a>,
    items: Vec<JsonFeedItem<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonFeedAuthor<'a> {
    name: &'a str,
    url: &'a str,
    avatar: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonFeedItem<'a> {
    /// Site-relative post path; stable across domain moves.
    id: String,
    url: String,
    title: &'a str,
    content_html: &'a str,
    date_published: String,
}

impl<'a> JsonFeed<'a> {
    fn new(site: &'a SiteInfo, posts: impl Iterator<Item = &'a Document>) -> Self {
        Self {
            version: JSON_FEED_VERSION,
            title: &site.title,
            home_page_url: &site.url,
            feed_url: site.absolute(JSON_FEED_FILE),
            description: &site.description,
            author: JsonFeedAuthor {
                name: &site.author,
                url: &site.url,
                avatar: &site.avatar,
            },
            items: posts.map(|post| JsonFeedItem::new(post, site)).collect(),
        }
    }
}

impl<'a> JsonFeedItem<'a> {
    fn new(post: &'a Document, site: &SiteInfo) -> Self {
        let post_path = post.post_path();
        Self {
            url: site.absolute(&post_path),
            id: post_path,
            title: &post.title,
            content_html: &post.contents,
            date_published: date::to_rfc3339(post.timestamp()),
        }
    }
}

/// Write `feed.json` for the newest `count` posts.
pub fn build_json_feed(site: &SiteInfo, posts_ascending: &[Document], count: usize, output_dir: &Path) -> Result<()> {
    let feed = JsonFeed::new(site, recent(posts_ascending, count));
    let json = serde_json::to_string_pretty(&feed)
        .map_err(|e| Error::Serialization(format!("json feed: {e}")))?;

    let path = output_dir.join(JSON_FEED_FILE);
    fs::write(&path, json).fs_context("failed to write", &path)?;

    log!("feed"; "{}", JSON_FEED_FILE);
    Ok(())
}
