//! Content discovery.
//!
//! Scans one directory (non-recursively) for `.md` and `.html` files and
//! turns each into a [`Document`]:
//!
//! | Source        | Body                               |
//! |---------------|------------------------------------|
//! | `name.md`     | HTML from the [`MarkdownCache`]    |
//! | `name.html`   | file contents, verbatim            |
//!
//! `name.json`, when present, is merged on top. Everything else in the
//! directory, including the `_cache` folder and the sidecars themselves,
//! is skipped. Any I/O or metadata error aborts the load.

use super::{
    cache::MarkdownCache,
    meta::{Document, Metadata},
};
use crate::error::{Error, IoContext, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Content kinds the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Markdown,
    Html,
}

impl SourceKind {
    fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("md") => Some(Self::Markdown),
            Some("html") => Some(Self::Html),
            _ => None,
        }
    }
}

/// Load every document in `dir`.
///
/// Entries are visited in file-name order so repeated builds see the same
/// sequence; callers that need chronological order link the result.
pub fn load_all(dir: &Path, cache: &MarkdownCache<'_>) -> Result<Vec<Document>> {
    let mut sources = Vec::new();
    for entry in fs::read_dir(dir).fs_context("failed to list", dir)? {
        let entry = entry.fs_context("failed to list", dir)?;
        let file_type = entry.file_type().fs_context("failed to stat", &entry.path())?;
        let path = entry.path();
        if file_type.is_dir() {
            continue;
        }
        if let Some(kind) = SourceKind::of(&path) {
            sources.push((path, kind));
        }
    }
    sources.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));

    sources
        .into_iter()
        .map(|(path, kind)| load_one(dir, &path, kind, cache))
        .collect()
}

fn load_one(dir: &Path, path: &Path, kind: SourceKind, cache: &MarkdownCache<'_>) -> Result<Document> {
    let stem = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();

    let contents = match kind {
        SourceKind::Markdown => cache.convert(path)?,
        SourceKind::Html => fs::read_to_string(path).fs_context("failed to read", path)?,
    };

    let mut doc = Document {
        path: stem.clone(),
        contents,
        ..Document::default()
    };

    let sidecar = sidecar_path(dir, &stem);
    if sidecar.is_file() {
        let meta = read_metadata(&sidecar)?;
        if let Some(header_path) = meta.apply(&mut doc) {
            let header_path = dir.join(header_path);
            let header = fs::read_to_string(&header_path).fs_context("failed to read header", &header_path)?;
            doc.header = Some(header);
        }
    }

    Ok(doc)
}

fn sidecar_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.json"))
}

fn read_metadata(path: &Path) -> Result<Metadata> {
    let raw = fs::read_to_string(path).fs_context("failed to read", path)?;
    serde_json::from_str(&raw).map_err(|source| Error::Metadata {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::cache::{CACHE_DIR, tests::CountingConverter};
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    fn load(dir: &TempDir) -> Result<Vec<Document>> {
        let converter = CountingConverter::default();
        let cache = MarkdownCache::new(&converter, false);
        load_all(dir.path(), &cache)
    }

    #[test]
    fn test_markdown_and_html() {
        let dir = TempDir::new().unwrap();
        write(&dir, "about.md", "about me");
        write(&dir, "raw.html", "<b>trusted & raw</b>");

        let docs = load(&dir).unwrap();
        assert_eq!(docs.len(), 2);

        assert_eq!(docs[0].path, "about");
        assert_eq!(docs[0].contents, "<p>about me</p>");
        assert_eq!(docs[0].title, "");
        assert!(!docs[0].is_homepage);

        assert_eq!(docs[1].path, "raw");
        assert_eq!(docs[1].contents, "<b>trusted & raw</b>");
    }

    #[test]
    fn test_skips_other_entries() {
        let dir = TempDir::new().unwrap();
        write(&dir, "post.md", "x");
        write(&dir, "post.json", r#"{"title": "Post"}"#);
        write(&dir, "notes.txt", "ignored");
        write(&dir, "image.png", "ignored");
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let docs = load(&dir).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Post");
        // Converting created the cache folder, which a second load skips
        assert!(dir.path().join(CACHE_DIR).is_dir());
        assert_eq!(load(&dir).unwrap().len(), 1);
    }

    #[test]
    fn test_sidecar_overrides() {
        let dir = TempDir::new().unwrap();
        write(&dir, "2023-04-01-hello.md", "hello");
        write(
            &dir,
            "2023-04-01-hello.json",
            r#"{"title": "Hello", "date": "2023-04-01 10:00:00", "path": "greeting", "is_homepage": true}"#,
        );

        let docs = load(&dir).unwrap();
        let doc = &docs[0];
        assert_eq!(doc.title, "Hello");
        assert_eq!(doc.date, "2023-04-01 10:00:00");
        assert_eq!(doc.path, "greeting");
        assert!(doc.is_homepage);
        assert_eq!(doc.contents, "<p>hello</p>");
    }

    #[test]
    fn test_header_resolved_relative_to_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("headers")).unwrap();
        write(&dir, "headers/fancy.html", "<style>h1{}</style>");
        write(&dir, "page.html", "<p>p</p>");
        write(&dir, "page.json", r#"{"header_path": "headers/fancy.html"}"#);

        let docs = load(&dir).unwrap();
        assert_eq!(docs[0].header.as_deref(), Some("<style>h1{}</style>"));
    }

    #[test]
    fn test_missing_header_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(&dir, "page.html", "<p>p</p>");
        write(&dir, "page.json", r#"{"header_path": "nope.html"}"#);

        let err = load(&dir).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
        assert!(err.to_string().contains("nope.html"));
    }

    #[test]
    fn test_malformed_sidecar_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(&dir, "page.html", "<p>p</p>");
        write(&dir, "page.json", "{ title: ");

        assert!(matches!(load(&dir).unwrap_err(), Error::Metadata { .. }));
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let converter = CountingConverter::default();
        let cache = MarkdownCache::new(&converter, false);

        let err = load_all(&dir.path().join("posts"), &cache).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }

    #[test]
    fn test_file_name_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.html", "b");
        write(&dir, "a.html", "a");
        write(&dir, "c.md", "c");

        let paths: Vec<_> = load(&dir).unwrap().into_iter().map(|d| d.path).collect();
        assert_eq!(paths, ["a", "b", "c"]);
    }
}
