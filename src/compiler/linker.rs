//! Chronological linking of the post collection.
//!
//! Runs once per build, after loading and before pagination and feeds:
//! both of those read the final order and the final slugs.

use super::meta::Document;
use crate::{log, utils::slug::strip_date_prefix};

/// Sort `docs` by publication time (ascending), wire `prev`/`next` to the
/// adjacent indices and strip `YYYY-MM-DD-` prefixes from slugs.
///
/// Documents with an unparsable date sort as the Unix epoch; each one is
/// reported with a warning. The sort is stable, so equal timestamps keep
/// their load order.
pub fn link_chronologically(docs: &mut [Document]) {
    for doc in docs.iter().filter(|d| d.time().is_none()) {
        log!("warn"; "`{}` has no valid date (\"{}\"), treating it as 1970-01-01", doc.path, doc.date);
    }

    docs.sort_by_cached_key(Document::timestamp);

    let last = docs.len().saturating_sub(1);
    for (i, doc) in docs.iter_mut().enumerate() {
        doc.prev = i.checked_sub(1);
        doc.next = (i < last).then_some(i + 1);

        doc.path = strip_date_prefix(&doc.path).into_owned();
    }
}
