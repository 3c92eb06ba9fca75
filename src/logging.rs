//! Debug logging sinks.
//!
//! All output is env-gated: without `YOS_TUI_DEBUG_LOG` every call is a
//! no-op. Lines are appended to the configured file, never written to the
//! terminal (the output gate owns stdout).

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

static DEBUG_LOG_PATH: Lazy<Option<String>> = Lazy::new(|| {
    std::env::var("YOS_TUI_DEBUG_LOG").ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
});

static DEBUG_REDRAW: Lazy<bool> =
    Lazy::new(|| std::env::var("YOS_DEBUG_REDRAW").map(|v| v == "1").unwrap_or(false));

static SINK: Mutex<()> = Mutex::new(());

pub fn tui_debug_enabled() -> bool {
    DEBUG_LOG_PATH.is_some()
}

pub fn debug_redraw_enabled() -> bool {
    *DEBUG_REDRAW && tui_debug_enabled()
}

/// Appends one timestamped line to the debug log. Failures are swallowed;
/// logging must never take the runtime down.
pub fn log_tui_debug(message: &str) {
    let Some(path) = DEBUG_LOG_PATH.as_deref() else {
        return;
    };

    let _guard = match SINK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "[{timestamp}] {message}");
    }
}

/// Records why a full redraw happened instead of a line diff.
pub fn log_debug_redraw(reason: &str, previous_lines: usize, next_lines: usize, height: usize) {
    if !debug_redraw_enabled() {
        return;
    }
    log_tui_debug(&format!(
        "full redraw: {reason} (previous={previous_lines} next={next_lines} height={height})"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_is_noop_without_env() {
        // DEBUG_LOG_PATH is captured lazily; in the test environment the
        // variable is unset, so these must be silent no-ops.
        if !tui_debug_enabled() {
            log_tui_debug("ignored");
            log_debug_redraw("ignored", 0, 0, 0);
        }
    }
}
