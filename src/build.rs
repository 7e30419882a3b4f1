//! Site building orchestration.
//!
//! One linear pass; each stage finishes before the next starts and any
//! error aborts the build.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── OutputTree::clean() ──► empty static/
//!     ├── link_static_files() ──► public/ hard-linked into static/
//!     ├── Templates::load() ────► page.html, post.html, paginate.html
//!     │
//!     ├── write_pages() ────────► pages/*  → static/{path}/
//!     │
//!     ├── load posts + link_chronologically()
//!     ├── write_posts() ────────► posts/*  → static/blog/{y}/{m}/{d}/{slug}/
//!     ├── write_listings() ─────► static/blog/page/{n}/ (+ blog/, /)
//!     └── build_feeds() ────────► static/feed.xml, static/feed.json
//! ```

use crate::{
    compiler::{
        Document, MarkdownCache, link_chronologically, link_static_files, load_all, markdown,
        paginate,
    },
    config::SiteConfig,
    error::Result,
    generator::build_feeds,
    log,
    output::{OutputTree, PAGE_TEMPLATE, PAGINATE_TEMPLATE, POST_TEMPLATE, Templates},
};

/// What a build produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub assets: usize,
    pub pages: usize,
    pub posts: usize,
    pub listings: usize,
}

/// Build the whole site described by `config` into its output directory.
pub fn build_site(config: &SiteConfig) -> Result<BuildStats> {
    let tree = OutputTree::clean(&config.output_dir())?;
    let assets = link_static_files(&config.public_dir(), tree.root())?;
    let templates = Templates::load(&config.templates_dir(), &config.site)?;

    let converter = markdown::from_config(&config.build);
    let cache = MarkdownCache::new(converter.as_ref(), config.build.ignore_cache);

    let pages = load_all(&config.pages_dir(), &cache)?;
    write_pages(&pages, &templates, &tree)?;

    let mut posts = load_all(&config.posts_dir(), &cache)?;
    link_chronologically(&mut posts);
    write_posts(&posts, &templates, &tree)?;
    let listings = write_listings(&posts, config.build.page_size, &templates, &tree)?;

    build_feeds(&config.site, &posts, config.build.feed_size, tree.root())?;

    let stats = BuildStats {
        assets,
        pages: pages.len(),
        posts: posts.len(),
        listings,
    };
    log!(
        "build";
        "done: {} pages, {} posts, {} listing pages, {} assets",
        stats.pages,
        stats.posts,
        stats.listings,
        stats.assets
    );
    Ok(stats)
}

// ============================================================================
// Stages
// ============================================================================

/// Standalone pages: `page.html` only, at their own path.
fn write_pages(pages: &[Document], templates: &Templates<'_>, tree: &OutputTree) -> Result<()> {
    for page in pages {
        let html = templates.render(PAGE_TEMPLATE, &page.view(&[]))?;
        let out = tree.write(&page.path, &html, &[])?;
        log!("page"; "{} -> {}", page.title, out.display());
    }
    Ok(())
}

/// Posts: `post.html` with history links, wrapped in `page.html`, at the
/// unpadded date path with the zero-padded one as an alias.
fn write_posts(posts: &[Document], templates: &Templates<'_>, tree: &OutputTree) -> Result<()> {
    for post in posts {
        let view = post.view(posts).with_show_history(true);
        let body = templates.render(POST_TEMPLATE, &view)?;
        let html = templates.render(PAGE_TEMPLATE, &view.with_contents(body))?;

        let padded = post.post_path_padded();
        let out = tree.write(&post.post_path(), &html, &[padded.as_str()])?;
        log!("post"; "{} -> {}", post.title, out.display());
    }
    Ok(())
}

/// Listing pages, newest post first. Returns how many were written.
fn write_listings(
    posts: &[Document],
    page_size: usize,
    templates: &Templates<'_>,
    tree: &OutputTree,
) -> Result<usize> {
    let bodies = posts
        .iter()
        .rev()
        .map(|post| templates.render(POST_TEMPLATE, &post.view(posts).with_show_history(false)))
        .collect::<Result<Vec<_>>>()?;

    let listings = paginate(bodies, page_size);
    for listing in &listings {
        let body = templates.render(PAGINATE_TEMPLATE, listing)?;
        let shell = Document {
            title: listing.title(),
            path: listing.path(),
            is_homepage: listing.is_homepage,
            ..Document::default()
        };
        let html = templates.render(PAGE_TEMPLATE, &shell.view(&[]).with_contents(body))?;

        let out = tree.write(&listing.path(), &html, listing.aliases())?;
        log!("paginate"; "{} -> {}", shell.title, out.display());
    }
    Ok(listings.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ConverterKind, error::Error};
    use std::{
        collections::BTreeMap,
        fs,
        path::{Path, PathBuf},
    };
    use tempfile::TempDir;
    use walkdir::WalkDir;

    const PAGE: &str = r#"<html><head><title>{{ title }} | {{ site.title }}</title>{{ header | safe }}</head>
<body class="{% if is_homepage %}home{% endif %}">{{ contents | safe }}</body></html>"#;

    const POST: &str = r#"<article><h1>{{ title }}</h1><time>{{ pretty_date }}</time>{{ contents | safe }}
{% if show_history %}{% if has_prev %}<a class="prev" href="/{{ prev.post_path }}">{{ prev.title }}</a>{% endif %}{% if has_next %}<a class="next" href="/{{ next.post_path }}">{{ next.title }}</a>{% endif %}{% endif %}</article>"#;

    const PAGINATE: &str = r#"{% for post in posts %}{{ post | safe }}{% endfor %}
{% if has_newer %}<a href="{{ newer }}">newer</a>{% endif %}{% if has_older %}<a href="{{ older }}">older</a>{% endif %}"#;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// A small site using the embedded converter.
    fn site(posts: usize) -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(root, "templates/page.html", PAGE);
        write(root, "templates/post.html", POST);
        write(root, "templates/paginate.html", PAGINATE);
        write(root, "public/css/site.css", "body {}");
        write(root, "pages/about.md", "# About\n\nHello *there*.");
        write(root, "pages/about.json", r#"{"title": "About", "header_path": "headers/about.html"}"#);
        write(root, "pages/headers/about.html", "<meta name=\"x\">");
        write(root, "pages/links.html", "<ul><li>raw</li></ul>");
        fs::create_dir_all(root.join("posts")).unwrap();

        for i in 0..posts {
            let day = i + 1;
            let name = format!("2023-01-{day:02}-post-{i}");
            write(root, &format!("posts/{name}.md"), &format!("Post number {i}."));
            write(
                root,
                &format!("posts/{name}.json"),
                &format!(r#"{{"title": "Post {i}", "date": "2023-01-{day:02} 08:00:00"}}"#),
            );
        }

        let mut config = SiteConfig::from_str(
            r#"{
                "title": "Notes",
                "url": "https://example.com",
                "author": "Alice",
                "email": "alice@example.com",
                "build": { "converter": "embedded" }
            }"#,
        )
        .unwrap();
        config.root = root.to_path_buf();
        assert_eq!(config.build.converter, ConverterKind::Embedded);
        (dir, config)
    }

    fn read(config: &SiteConfig, rel: &str) -> String {
        fs::read_to_string(config.output_dir().join(rel)).unwrap()
    }

    fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
                (rel, fs::read(e.path()).unwrap())
            })
            .collect()
    }

    #[test]
    fn test_full_build() {
        let (_dir, config) = site(3);
        let stats = build_site(&config).unwrap();

        assert_eq!(
            stats,
            BuildStats {
                assets: 1,
                pages: 2,
                posts: 3,
                listings: 1,
            }
        );

        let about = read(&config, "about/index.html");
        assert!(about.contains("<title>About | Notes</title>"));
        assert!(about.contains("<meta name=\"x\">"));
        assert!(about.contains("<em>there</em>"));
        assert!(read(&config, "links/index.html").contains("<li>raw</li>"));

        assert_eq!(read(&config, "css/site.css"), "body {}");
    }

    #[test]
    fn test_posts_and_aliases() {
        let (_dir, config) = site(3);
        build_site(&config).unwrap();

        let middle = read(&config, "blog/2023/1/2/post-1/index.html");
        assert_eq!(middle, read(&config, "blog/2023/01/02/post-1/index.html"));
        assert!(middle.contains("<h1>Post 1</h1>"));
        assert!(middle.contains("January 2, 2023"));
        assert!(middle.contains(r#"<a class="prev" href="/blog/2023/1/1/post-0">Post 0</a>"#));
        assert!(middle.contains(r#"<a class="next" href="/blog/2023/1/3/post-2">Post 2</a>"#));

        let first = read(&config, "blog/2023/1/1/post-0/index.html");
        assert!(!first.contains("class=\"prev\""));
    }

    #[test]
    fn test_listing_pages() {
        let (_dir, config) = site(12);
        let stats = build_site(&config).unwrap();
        assert_eq!(stats.listings, 2);

        let home = read(&config, "index.html");
        assert_eq!(home, read(&config, "blog/index.html"));
        assert_eq!(home, read(&config, "blog/page/1/index.html"));
        assert!(home.contains("<title>Blog | Notes</title>"));
        assert!(home.contains("class=\"home\""));
        assert!(home.contains(r#"<a href="/blog/page/2">older</a>"#));
        // newest first, no history links in listings
        assert!(home.find("Post 11").unwrap() < home.find("Post 10").unwrap());
        assert!(!home.contains("class=\"prev\""));

        let second = read(&config, "blog/page/2/index.html");
        assert!(second.contains("<title>Page 2 | Notes</title>"));
        assert!(second.contains(r#"<a href="/">newer</a>"#));
        assert!(second.contains("Post 0"));
    }

    #[test]
    fn test_feeds_written() {
        let (_dir, config) = site(12);
        build_site(&config).unwrap();

        let json: serde_json::Value = serde_json::from_str(&read(&config, "feed.json")).unwrap();
        assert_eq!(json["items"].as_array().unwrap().len(), 10);
        assert_eq!(json["items"][0]["title"], "Post 11");

        let rss = rss::Channel::read_from(read(&config, "feed.xml").as_bytes()).unwrap();
        assert_eq!(rss.items().len(), 10);
        assert_eq!(rss.items()[0].title(), Some("Post 11"));
    }

    #[test]
    fn test_rebuild_is_identical() {
        let (_dir, config) = site(4);
        build_site(&config).unwrap();
        let first = snapshot(&config.output_dir());

        build_site(&config).unwrap();
        assert_eq!(first, snapshot(&config.output_dir()));
        assert!(config.posts_dir().join("_cache/2023-01-01-post-0.html").is_file());
    }

    #[test]
    fn test_stale_output_removed() {
        let (_dir, config) = site(1);
        write(&config.output_dir(), "old/index.html", "stale");

        build_site(&config).unwrap();
        assert!(!config.output_dir().join("old").exists());
    }

    #[test]
    fn test_no_posts() {
        let (_dir, config) = site(0);
        let stats = build_site(&config).unwrap();

        assert_eq!(stats.listings, 0);
        assert!(config.output_dir().join("feed.xml").is_file());
        assert!(!config.output_dir().join("index.html").exists());
    }

    #[test]
    fn test_missing_posts_dir_is_fatal() {
        let (_dir, config) = site(0);
        fs::remove_dir(config.posts_dir()).unwrap();
        let err = build_site(&config).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }

    #[test]
    fn test_demo_site_builds() {
        let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/site");
        let dir = TempDir::new().unwrap();
        for entry in WalkDir::new(&demo).min_depth(1) {
            let entry = entry.unwrap();
            let target = dir.path().join(entry.path().strip_prefix(&demo).unwrap());
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).unwrap();
            } else {
                fs::copy(entry.path(), &target).unwrap();
            }
        }

        let config = SiteConfig::load(dir.path(), Path::new("config.json")).unwrap();
        config.validate().unwrap();
        build_site(&config).unwrap();

        let post = read(&config, "blog/2024/1/15/hello-world/index.html");
        assert!(post.contains("Hello, World | Notes"));
        assert!(read(&config, "index.html").contains("January 15, 2024"));
    }

    #[test]
    fn test_missing_templates_are_fatal() {
        let (_dir, config) = site(1);
        fs::remove_file(config.templates_dir().join("paginate.html")).unwrap();
        assert!(build_site(&config).is_err());
    }
}
