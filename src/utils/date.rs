//! Post timestamps.
//!
//! Sidecar dates use one fixed format, `YYYY-MM-DD HH:MM:SS`, interpreted
//! as UTC. Everything downstream (sort order, dated URLs, feed dates)
//! derives from the parsed value.

use chrono::{DateTime, Local, NaiveDateTime};

/// `strftime` pattern for sidecar `date` fields.
pub const POST_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `strftime` pattern for the date prefix of new post file names.
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a sidecar date string.
///
/// Surrounding whitespace is ignored, so a stray newline in a hand-edited
/// sidecar still yields the intended date.
pub fn parse_post_date(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), POST_DATE_FORMAT).ok()
}

/// Timestamp used for documents whose date is missing or unparsable.
///
/// The Unix epoch rather than year 1, so undated posts land under
/// `blog/1970/1/1/` and still produce valid RFC 2822 feed dates.
pub fn epoch() -> NaiveDateTime {
    DateTime::UNIX_EPOCH.naive_utc()
}

/// Human readable date for templates, e.g. `April 1, 2023`.
pub fn pretty(time: NaiveDateTime) -> String {
    time.format("%B %-d, %Y").to_string()
}

/// RSS `pubDate` format.
pub fn to_rfc2822(time: NaiveDateTime) -> String {
    time.and_utc().to_rfc2822()
}

/// JSON Feed `date_published` format.
pub fn to_rfc3339(time: NaiveDateTime) -> String {
    time.and_utc().to_rfc3339()
}

/// Current local time, formatted for a new sidecar and a new file name.
pub fn now_stamps() -> (String, String) {
    let now = Local::now();
    (
        now.format(POST_DATE_FORMAT).to_string(),
        now.format(FILE_DATE_FORMAT).to_string(),
    )
}
