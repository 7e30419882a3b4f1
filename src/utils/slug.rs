//! Slug helpers.
//!
//! Post files are named `YYYY-MM-DD-some-title.md`. The date prefix keeps
//! the `posts/` directory sorted on disk but is dropped from the public
//! URL, which already carries the date as `blog/{y}/{m}/{d}/`.

use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

static RE_DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}-").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s").unwrap());

static RE_UNSAFE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap());

/// Strip a leading `YYYY-MM-DD-` from a slug. Other slugs pass through.
pub fn strip_date_prefix(slug: &str) -> Cow<'_, str> {
    RE_DATE_PREFIX.replace(slug, "")
}

/// Turn a post title into a file-name-safe slug.
///
/// Non-ASCII text is transliterated first so `"Café Olé"` becomes
/// `"cafe-ole"` rather than `"caf-ol"`.
pub fn slugify_title(title: &str) -> String {
    let ascii = deunicode::deunicode(title.trim()).to_lowercase();
    let dashed = RE_WHITESPACE.replace_all(&ascii, "-");
    RE_UNSAFE.replace_all(&dashed, "").into_owned()
}
