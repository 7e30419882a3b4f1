//! On-disk memoization of Markdown conversion.
//!
//! Each `dir/name.md` has at most one cache entry, `dir/_cache/name.html`.
//! An entry is fresh when it exists and the source was not modified after
//! it. Modification time is the only staleness signal.

use super::markdown::Converter;
use crate::{
    error::{Error, IoContext, Result},
    log,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Name of the per-directory cache folder. The content loader skips it.
pub const CACHE_DIR: &str = "_cache";

/// Converts Markdown through a [`Converter`], reusing cached HTML when the
/// source is unchanged.
pub struct MarkdownCache<'a> {
    converter: &'a dyn Converter,
    ignore_cache: bool,
}

impl<'a> MarkdownCache<'a> {
    /// With `ignore_cache` set, every call reconverts (and refreshes the entry).
    pub fn new(converter: &'a dyn Converter, ignore_cache: bool) -> Self {
        Self {
            converter,
            ignore_cache,
        }
    }

    /// Cache location for a Markdown source.
    pub fn cache_path(source: &Path) -> PathBuf {
        let dir = source.parent().unwrap_or(Path::new(""));
        let mut name = source.file_stem().unwrap_or_default().to_os_string();
        name.push(".html");
        dir.join(CACHE_DIR).join(name)
    }

    /// Convert `source` to HTML.
    ///
    /// Converter failures abort; failing to write the cache entry only
    /// logs a warning since the HTML itself is fine.
    pub fn convert(&self, source: &Path) -> Result<String> {
        let cache_path = Self::cache_path(source);

        if !self.ignore_cache && is_fresh(source, &cache_path) {
            return fs::read_to_string(&cache_path).fs_context("failed to read cache entry", &cache_path);
        }

        log!("convert"; "{}", source.display());
        let html = self.converter.convert(source).map_err(|err| {
            if err.is_timeout() {
                log!("error"; "{} hung; raise build.converter_timeout if it is just slow", source.display());
            }
            Error::Conversion {
                path: source.to_path_buf(),
                source: err,
            }
        })?;

        if let Err(err) = store(&cache_path, &html) {
            log!("warn"; "could not cache {}: {}", cache_path.display(), err);
        }
        Ok(html)
    }
}

fn store(cache_path: &Path, html: &str) -> std::io::Result<()> {
    if let Some(dir) = cache_path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(cache_path, html)
}

/// Whether `cached` exists and `src` was not modified after it.
///
/// Any metadata error counts as a miss.
fn is_fresh(src: &Path, cached: &Path) -> bool {
    let Ok(src_time) = src.metadata().and_then(|m| m.modified()) else {
        return false;
    };
    let Ok(cache_time) = cached.metadata().and_then(|m| m.modified()) else {
        return false;
    };
    src_time <= cache_time
}
