//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization and by
//! `educe` for `Default` impls, so both paths agree.

// ============================================================================
// `build` Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn pandoc_command() -> Vec<String> {
        ["pandoc", "-f", "markdown", "-t", "html5"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Seconds
    pub fn converter_timeout() -> u64 {
        60
    }

    pub fn page_size() -> usize {
        10
    }

    pub fn feed_size() -> usize {
        10
    }

    pub fn pages() -> PathBuf {
        "pages".into()
    }

    pub fn posts() -> PathBuf {
        "posts".into()
    }

    pub fn public() -> PathBuf {
        "public".into()
    }

    pub fn templates() -> PathBuf {
        "templates".into()
    }

    pub fn output() -> PathBuf {
        "static".into()
    }
}

// ============================================================================
// `serve` Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        8080
    }
}
