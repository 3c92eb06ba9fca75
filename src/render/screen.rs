//! Alternate-screen diff renderer.
//!
//! Tracks the last painted frame and repaints only the rows that changed,
//! addressing each row absolutely. A full clear-and-repaint happens on the
//! first frame, on any size change, and (optionally) when the frame shrinks.
//! Every emitted buffer is wrapped in synchronized-update markers so the
//! terminal applies it atomically.

use crate::core::output::TerminalCmd;
use crate::logging::{debug_redraw_enabled, log_debug_redraw};
use crate::render::width::{clamp_to_width, visible_width};

const RESET: &str = "\x1b[0m";
const SYNC_START: &str = "\x1b[?2026h";
const SYNC_END: &str = "\x1b[?2026l";
const CLEAR_ALL: &str = "\x1b[3J\x1b[2J\x1b[H";

#[derive(Debug, Default)]
pub struct ScreenRenderer {
    previous_lines: Vec<String>,
    previous_width: usize,
    previous_height: usize,
    force_full_redraw_next: bool,
}

impl ScreenRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_full_redraw_next(&mut self) {
        self.force_full_redraw_next = true;
    }

    pub fn previous_lines_len(&self) -> usize {
        self.previous_lines.len()
    }

    fn full_render(&mut self, lines: &[String], width: usize, height: usize) -> String {
        let mut buffer = String::from(SYNC_START);
        buffer.push_str(CLEAR_ALL);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                buffer.push_str("\r\n");
            }
            buffer.push_str(line);
        }
        buffer.push_str(SYNC_END);

        self.previous_lines = lines.to_vec();
        self.previous_width = width;
        self.previous_height = height;

        buffer
    }

    pub fn render(
        &mut self,
        frame_lines: Vec<String>,
        width: usize,
        height: usize,
        clear_on_shrink: bool,
    ) -> Vec<TerminalCmd> {
        let mut lines: Vec<String> = frame_lines
            .into_iter()
            .take(height)
            .map(|line| {
                if visible_width(&line) > width {
                    clamp_to_width(&line, width)
                } else {
                    line
                }
            })
            .collect();
        apply_line_resets(&mut lines);

        let mut cmds = Vec::new();
        let force_full_redraw_next = std::mem::take(&mut self.force_full_redraw_next);

        let size_changed = (self.previous_width != 0 && self.previous_width != width)
            || (self.previous_height != 0 && self.previous_height != height);

        if self.previous_lines.is_empty() || size_changed || force_full_redraw_next {
            if debug_redraw_enabled() {
                let reason = if self.previous_lines.is_empty() {
                    "first render".to_string()
                } else if size_changed {
                    format!(
                        "size changed ({}x{} -> {}x{})",
                        self.previous_width, self.previous_height, width, height
                    )
                } else {
                    "forced".to_string()
                };
                log_debug_redraw(&reason, self.previous_lines.len(), lines.len(), height);
            }
            let buffer = self.full_render(&lines, width, height);
            cmds.push(TerminalCmd::Bytes(buffer));
            return cmds;
        }

        if clear_on_shrink && lines.len() < self.previous_lines.len() {
            if debug_redraw_enabled() {
                let reason = format!("clearOnShrink (previous={})", self.previous_lines.len());
                log_debug_redraw(&reason, self.previous_lines.len(), lines.len(), height);
            }
            let buffer = self.full_render(&lines, width, height);
            cmds.push(TerminalCmd::Bytes(buffer));
            return cmds;
        }

        let mut buffer = String::new();
        let max_rows = lines.len().max(self.previous_lines.len());
        for row in 0..max_rows {
            let old_line = self.previous_lines.get(row).map(String::as_str).unwrap_or("");
            let new_line = lines.get(row).map(String::as_str).unwrap_or("");
            if old_line == new_line {
                continue;
            }
            // Rows are 1-based in cursor addressing.
            buffer.push_str(&format!("\x1b[{};1H\x1b[2K", row + 1));
            buffer.push_str(new_line);
        }

        if !buffer.is_empty() {
            let mut wrapped = String::from(SYNC_START);
            wrapped.push_str(&buffer);
            wrapped.push_str(SYNC_END);
            cmds.push(TerminalCmd::Bytes(wrapped));
        }

        self.previous_lines = lines;
        self.previous_width = width;
        self.previous_height = height;

        cmds
    }
}

fn apply_line_resets(lines: &mut [String]) {
    for line in lines.iter_mut() {
        if !line.is_empty() && !line.ends_with(RESET) {
            line.push_str(RESET);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ScreenRenderer, CLEAR_ALL, SYNC_END, SYNC_START};
    use crate::core::output::TerminalCmd;

    fn cmds_to_bytes(cmds: Vec<TerminalCmd>) -> String {
        let mut out = String::new();
        for cmd in cmds {
            match cmd {
                TerminalCmd::Bytes(data) => out.push_str(&data),
                TerminalCmd::BytesStatic(data) => out.push_str(data),
                TerminalCmd::HideCursor => out.push_str("\x1b[?25l"),
                TerminalCmd::ShowCursor => out.push_str("\x1b[?25h"),
                TerminalCmd::EnterAltScreen => out.push_str("\x1b[?1049h"),
                TerminalCmd::LeaveAltScreen => out.push_str("\x1b[?1049l"),
                TerminalCmd::BracketedPasteEnable => out.push_str("\x1b[?2004h"),
                TerminalCmd::BracketedPasteDisable => out.push_str("\x1b[?2004l"),
            }
        }
        out
    }

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn first_render_clears_and_paints_full_screen() {
        let mut renderer = ScreenRenderer::new();
        let output = cmds_to_bytes(renderer.render(lines(&["one", "two"]), 10, 5, false));
        assert_eq!(
            output,
            format!("{SYNC_START}{CLEAR_ALL}one\x1b[0m\r\ntwo\x1b[0m{SYNC_END}")
        );
    }

    #[test]
    fn diff_repaints_only_changed_rows() {
        let mut renderer = ScreenRenderer::new();
        renderer.render(lines(&["one", "two", "three"]), 10, 5, false);
        let output = cmds_to_bytes(renderer.render(lines(&["one", "TWO", "three"]), 10, 5, false));
        assert_eq!(output, format!("{SYNC_START}\x1b[2;1H\x1b[2KTWO\x1b[0m{SYNC_END}"));
    }

    #[test]
    fn identical_render_produces_no_output() {
        let mut renderer = ScreenRenderer::new();
        renderer.render(lines(&["same"]), 10, 5, false);
        let output = cmds_to_bytes(renderer.render(lines(&["same"]), 10, 5, false));
        assert!(output.is_empty());
    }

    #[test]
    fn size_change_triggers_full_clear() {
        let mut renderer = ScreenRenderer::new();
        renderer.render(lines(&["line"]), 10, 5, false);
        let output = cmds_to_bytes(renderer.render(lines(&["line"]), 20, 5, false));
        assert!(output.contains(CLEAR_ALL));
    }

    #[test]
    fn shrink_clears_stale_rows_in_diff_mode() {
        let mut renderer = ScreenRenderer::new();
        renderer.render(lines(&["one", "two", "three"]), 10, 5, false);
        let output = cmds_to_bytes(renderer.render(lines(&["one", "two"]), 10, 5, false));
        // Row 3 no longer has content: it must be erased, not left behind.
        assert_eq!(output, format!("{SYNC_START}\x1b[3;1H\x1b[2K{SYNC_END}"));
    }

    #[test]
    fn clear_on_shrink_forces_full_repaint() {
        let mut renderer = ScreenRenderer::new();
        renderer.render(lines(&["one", "two", "three"]), 10, 5, true);
        let output = cmds_to_bytes(renderer.render(lines(&["one", "two"]), 10, 5, true));
        assert!(output.contains(CLEAR_ALL));
    }

    #[test]
    fn force_full_redraw_emits_output_even_if_identical() {
        let mut renderer = ScreenRenderer::new();
        renderer.render(lines(&["same"]), 10, 5, false);
        renderer.request_full_redraw_next();
        let output = cmds_to_bytes(renderer.render(lines(&["same"]), 10, 5, false));
        assert!(output.contains(CLEAR_ALL));
    }

    #[test]
    fn overlong_line_is_clamped_to_width() {
        let mut renderer = ScreenRenderer::new();
        let output = cmds_to_bytes(renderer.render(lines(&["abcdefghij"]), 4, 5, false));
        assert!(output.contains("abcd"));
        assert!(!output.contains("abcde"));
    }

    #[test]
    fn rows_beyond_height_are_dropped() {
        let mut renderer = ScreenRenderer::new();
        let output = cmds_to_bytes(renderer.render(lines(&["a", "b", "c"]), 10, 2, false));
        assert!(output.contains('a'));
        assert!(output.contains('b'));
        assert!(!output.contains('c'));
    }
}
