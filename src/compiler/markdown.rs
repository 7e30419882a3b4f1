//! Markdown-to-HTML conversion engines.
//!
//! The rest of the pipeline only sees the [`Converter`] trait. Two
//! engines exist:
//!
//! - [`Pandoc`]: runs an external command (pandoc by default) with the
//!   source path appended, under a deadline.
//! - [`Embedded`]: in-process CommonMark via `pulldown-cmark`.

use crate::{
    config::{BuildConfig, ConverterKind},
    error::ConversionError,
    utils::exec::exec_with_timeout,
};
use pulldown_cmark::{Options, Parser, html::push_html};
use std::{fs, path::Path, time::Duration};

/// Convert one Markdown file to an HTML fragment.
pub trait Converter {
    fn convert(&self, source: &Path) -> Result<String, ConversionError>;
}

/// Pick the engine named in the config.
pub fn from_config(build: &BuildConfig) -> Box<dyn Converter> {
    match build.converter {
        ConverterKind::Pandoc => Box::new(Pandoc::new(
            build.pandoc_command.clone(),
            Duration::from_secs(build.converter_timeout),
        )),
        ConverterKind::Embedded => Box::new(Embedded),
    }
}

// ============================================================================
// External process
// ============================================================================

/// External converter process.
///
/// A non-zero exit and an expired deadline are both conversion errors,
/// reported as different [`ExecError`](crate::utils::exec::ExecError) variants.
#[derive(Debug, Clone)]
pub struct Pandoc {
    command: Vec<String>,
    timeout: Duration,
}

impl Pandoc {
    pub fn new(command: Vec<String>, timeout: Duration) -> Self {
        Self { command, timeout }
    }
}

impl Converter for Pandoc {
    fn convert(&self, source: &Path) -> Result<String, ConversionError> {
        let stdout = exec_with_timeout(
            &self.command,
            &[source.as_os_str().to_owned()],
            self.timeout,
        )?;
        Ok(String::from_utf8(stdout)?)
    }
}

// ============================================================================
// In-process
// ============================================================================

/// `pulldown-cmark` with GFM tables, strikethrough, task lists and
/// footnotes. Raw HTML passes through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Embedded;

impl Embedded {
    pub fn render(markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES;

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        push_html(&mut html, Parser::new_ext(markdown, options));
        html
    }
}

impl Converter for Embedded {
    fn convert(&self, source: &Path) -> Result<String, ConversionError> {
        let markdown = fs::read_to_string(source).map_err(ConversionError::Read)?;
        Ok(Self::render(&markdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::exec::ExecError;
    use tempfile::TempDir;

    fn write_md(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("note.md");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_embedded_render() {
        let html = Embedded::render("# Title\n\nSome *emphasis*.\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_embedded_keeps_raw_html() {
        let html = Embedded::render("<div class=\"x\">raw</div>\n");
        assert!(html.contains("<div class=\"x\">raw</div>"));
    }

    #[test]
    fn test_embedded_tables() {
        let html = Embedded::render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_embedded_convert_missing_file() {
        let err = Embedded.convert(Path::new("/nonexistent/note.md")).unwrap_err();
        assert!(matches!(err, ConversionError::Read(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_converter_appends_path() {
        let dir = TempDir::new().unwrap();
        let path = write_md(&dir, "<p>from cat</p>");

        let cat = Pandoc::new(vec!["cat".into()], Duration::from_secs(5));
        assert_eq!(cat.convert(&path).unwrap(), "<p>from cat</p>");
    }

    #[cfg(unix)]
    #[test]
    fn test_process_converter_failure() {
        let dir = TempDir::new().unwrap();
        let path = write_md(&dir, "x");

        let failing = Pandoc::new(
            vec!["sh".into(), "-c".into(), "exit 1".into()],
            Duration::from_secs(5),
        );
        let err = failing.convert(&path).unwrap_err();
        assert!(matches!(err, ConversionError::Process(ExecError::Failed { .. })));
        assert!(!err.is_timeout());
    }

    #[cfg(unix)]
    #[test]
    fn test_process_converter_timeout() {
        let dir = TempDir::new().unwrap();
        let path = write_md(&dir, "x");

        let hung = Pandoc::new(
            vec!["sh".into(), "-c".into(), "sleep 3; true".into()],
            Duration::from_millis(100),
        );
        let started = std::time::Instant::now();
        assert!(hung.convert(&path).unwrap_err().is_timeout());
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_from_config() {
        let mut build = BuildConfig::default();
        build.converter = ConverterKind::Embedded;
        let converter = from_config(&build);

        let dir = TempDir::new().unwrap();
        let path = write_md(&dir, "**bold**");
        assert!(converter.convert(&path).unwrap().contains("<strong>bold</strong>"));
    }
}
