//! Template rendering and the output tree.
//!
//! # Layout
//!
//! Every URL path maps to a directory holding one `index.html`:
//!
//! ```text
//! write("blog/2023/4/1/hello", html, ["blog/2023/04/01/hello"])
//!
//! static/blog/2023/4/1/hello/index.html   ◄── written
//! static/blog/2023/04/01/hello/index.html ◄── hard link, same inode
//! ```
//!
//! The tree is removed and recreated at the start of every build, so a
//! hard link never outlives the file it points to.

use crate::{
    config::SiteInfo,
    error::{IoContext, Result},
    log,
};
use serde::Serialize;
use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};
use tera::{Context, Tera};

/// Outer shell for every page, post and listing.
pub const PAGE_TEMPLATE: &str = "page.html";
/// Body of a single post.
pub const POST_TEMPLATE: &str = "post.html";
/// Body of a listing page.
pub const PAGINATE_TEMPLATE: &str = "paginate.html";

const TEMPLATE_NAMES: [&str; 3] = [PAGE_TEMPLATE, POST_TEMPLATE, PAGINATE_TEMPLATE];

const INDEX_FILE: &str = "index.html";

// ============================================================================
// Templates
// ============================================================================

/// The three named templates, plus the site identity every render sees
/// as `site`.
pub struct Templates<'a> {
    tera: Tera,
    site: &'a SiteInfo,
}

impl<'a> Templates<'a> {
    /// Load `page.html`, `post.html` and `paginate.html` from `dir`.
    ///
    /// All three must exist. Autoescaping stays on, so templates mark
    /// pre-rendered HTML fields with `| safe`.
    pub fn load(dir: &Path, site: &'a SiteInfo) -> Result<Self> {
        let mut tera = Tera::default();
        tera.set_escape_fn(escape_html);
        for name in TEMPLATE_NAMES {
            let path = dir.join(name);
            let source = fs::read_to_string(&path).fs_context("failed to read template", &path)?;
            tera.add_raw_template(name, &source)?;
        }
        Ok(Self { tera, site })
    }

    /// Render template `name` with the fields of `view` at the top level.
    pub fn render(&self, name: &str, view: &impl Serialize) -> Result<String> {
        let mut context = Context::from_serialize(view)?;
        context.insert("site", self.site);
        Ok(self.tera.render(name, &context)?)
    }
}

/// Escape `&<>"'` only. Tera's default also encodes `/`, which would
/// mangle every link in the templates.
fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ============================================================================
// Output tree
// ============================================================================

/// Writes rendered HTML under the output directory.
#[derive(Debug, Clone)]
pub struct OutputTree {
    root: PathBuf,
}

impl OutputTree {
    /// Remove everything under `root` and start an empty tree.
    pub fn clean(root: &Path) -> Result<Self> {
        if root.exists() {
            fs::remove_dir_all(root).fs_context("failed to clear output directory", root)?;
        }
        fs::create_dir_all(root).fs_context("failed to create directory", root)?;
        log!("clean"; "{}", root.display());

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `{root}/{path}/index.html`. Leading and trailing slashes are ignored,
    /// so `""` and `"/"` both name the site root. Paths with `.` or `..`
    /// components are rejected so nothing lands outside the tree.
    pub fn index_path(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path.trim_matches('/'));
        if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must stay inside the output directory",
            ))
            .fs_context("refusing to write", relative);
        }
        Ok(self.root.join(relative).join(INDEX_FILE))
    }

    /// Write `html` at `path`, then hard-link it at each alias.
    ///
    /// Aliases that resolve to the canonical file are skipped. A file
    /// already present at any target is replaced with a warning; later
    /// writes win.
    pub fn write(&self, path: &str, html: &str, aliases: &[&str]) -> Result<PathBuf> {
        let canonical = self.index_path(path)?;
        prepare_target(&canonical)?;
        fs::write(&canonical, html).fs_context("failed to write", &canonical)?;

        for alias in aliases {
            let target = self.index_path(alias)?;
            if target == canonical {
                continue;
            }
            prepare_target(&target)?;
            fs::hard_link(&canonical, &target).fs_context("failed to link", &target)?;
        }

        Ok(canonical)
    }
}

/// Create parent directories and unlink whatever occupies `target`.
///
/// Unlinking first keeps an overwrite from truncating a file that is
/// hard-linked elsewhere in the tree.
fn prepare_target(target: &Path) -> Result<()> {
    if target.is_file() {
        log!("warn"; "overwriting {}", target.display());
        fs::remove_file(target).fs_context("failed to replace", target)?;
    } else if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).fs_context("failed to create directory", parent)?;
    }
    Ok(())
}
