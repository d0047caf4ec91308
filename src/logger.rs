//! Colored, width-aware terminal logging for the index.
//!
//! The index is normally embedded in a larger build, so output is muted until
//! the host calls [`set_enabled`]. Lines go to stderr to keep stdout free for
//! whatever the host renders.
//!
//! ```ignore
//! logger::set_enabled(true);
//! log!("registry"; "indexed {} items", count);
//! // [registry] indexed 42 items
//! ```

use colored::{Color, Colorize};
use crossterm::terminal::size;
use std::{
    io::{Write, stderr},
    sync::{
        OnceLock,
        atomic::{AtomicBool, Ordering},
    },
};

static ENABLED: AtomicBool = AtomicBool::new(false);

static COLUMNS: OnceLock<usize> = OnceLock::new();

/// Used when the terminal size cannot be queried (pipes, CI).
const FALLBACK_COLUMNS: usize = 120;

/// Prefix colors per module; anything unlisted is yellow.
const MODULE_COLORS: &[(&str, Color)] = &[
    ("registry", Color::BrightBlue),
    ("config", Color::BrightGreen),
    ("error", Color::BrightRed),
];

/// Log a line with a colored `[module]` prefix.
///
/// ```ignore
/// log!("config"; "collection `{}` ({})", plural, name);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_enabled() {
            $crate::logger::log($module, &format!($($arg)*));
        }
    }};
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Write one line, clipped to the terminal width.
///
/// Multi-line messages are written untouched.
pub fn log(module: &str, message: &str) {
    let prefix = format!("[{module}]").color(module_color(module)).bold();
    let budget = columns().saturating_sub(module.len() + "[] ".len());
    let body = if message.contains('\n') {
        message
    } else {
        clip(message, budget)
    };

    let mut out = stderr().lock();
    writeln!(out, "{prefix} {body}").ok();
}

fn columns() -> usize {
    *COLUMNS.get_or_init(|| {
        size()
            .map(|(cols, _)| usize::from(cols))
            .unwrap_or(FALLBACK_COLUMNS)
    })
}

fn module_color(module: &str) -> Color {
    MODULE_COLORS
        .iter()
        .find(|(name, _)| module.eq_ignore_ascii_case(name))
        .map_or(Color::BrightYellow, |&(_, color)| color)
}

/// Longest prefix of `s` that fits in `max_bytes` without splitting a char.
fn clip(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let end = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= max_bytes)
        .last()
        .unwrap_or(0);
    &s[..end]
}
