//! Terminal logging with colored module prefixes.
//!
//! Every build step reports through the `log!` macro:
//!
//! ```ignore
//! log!("post"; "{} created at {}", title, path.display());
//! log!("warn"; "unparsable date `{}` in {}", date, slug);
//! ```
//!
//! Lines are written to stdout, prefixed with `[module]`, and truncated to
//! the terminal width so long output paths never wrap.

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stdout},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Width assumed when the terminal cannot be queried (pipes, CI).
const FALLBACK_WIDTH: u16 = 120;

/// "[" + "]" + trailing space
const PREFIX_OVERHEAD: usize = 3;

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::utils::log::log($module, &format!($($arg)*))
    }};
}

#[inline]
const fn prefix_len(module_len: usize) -> usize {
    module_len + PREFIX_OVERHEAD
}

fn terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(FALLBACK_WIDTH))
}

/// Write one log line. Use the `log!` macro instead of calling this directly.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let max_msg_len = (terminal_width() as usize).saturating_sub(prefix_len(module.len()));

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();

    // Multi-line messages (converter stderr) keep their own layout
    let message = if message.contains('\n') {
        message
    } else {
        truncate_str(message, max_msg_len)
    };

    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Pick a prefix color from the module name.
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "serve" => prefix.bright_blue().bold(),
        "feed" => prefix.bright_magenta().bold(),
        "convert" | "assets" => prefix.bright_cyan().bold(),
        "warn" => prefix.yellow().bold(),
        "error" => prefix.bright_red().bold(),
        "new" => prefix.bright_green().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate to at most `max_len` bytes on a UTF-8 boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
