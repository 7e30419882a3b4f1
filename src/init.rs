//! New post scaffolding (`--new-post`).
//!
//! Creates `posts/YYYY-MM-DD-slug.json` with the title and current time,
//! plus an empty `posts/YYYY-MM-DD-slug.md` to write in.

use crate::{
    config::SiteConfig,
    log,
    utils::{date::now_stamps, slug::slugify_title},
};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Sidecar written for a fresh post
#[derive(Debug, Serialize)]
struct NewPostMetadata<'a> {
    title: &'a str,
    date: &'a str,
}

/// Create a post titled `title` dated now. Returns the Markdown path.
pub fn new_post(config: &SiteConfig, title: &str) -> Result<PathBuf> {
    let (date_time, date) = now_stamps();
    let path = create_post(&config.posts_dir(), title, &date_time, &date)?;
    log!("new"; "{}", path.display());
    Ok(path)
}

/// Write the sidecar and the empty body. Nothing is overwritten.
fn create_post(posts_dir: &Path, title: &str, date_time: &str, date: &str) -> Result<PathBuf> {
    let slug = slugify_title(title);
    if slug.is_empty() {
        bail!("Title `{title}` has no characters usable in a file name");
    }

    let stem = format!("{date}-{slug}");
    let sidecar = posts_dir.join(format!("{stem}.json"));
    let body = posts_dir.join(format!("{stem}.md"));
    for path in [&sidecar, &body] {
        if path.exists() {
            bail!("`{}` already exists", path.display());
        }
    }

    fs::create_dir_all(posts_dir)
        .with_context(|| format!("Failed to create {}", posts_dir.display()))?;

    let metadata = NewPostMetadata {
        title: title.trim(),
        date: date_time,
    };
    let json = serde_json::to_string_pretty(&metadata)?;
    fs::write(&sidecar, json).with_context(|| format!("Failed to write {}", sidecar.display()))?;
    fs::write(&body, "").with_context(|| format!("Failed to write {}", body.display()))?;

    Ok(body)
}
