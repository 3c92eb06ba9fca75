//! Root screen interface.

use crate::core::input_event::InputEvent;

/// The runtime's single render/input seam.
///
/// The runtime owns exactly one root screen. It delivers every parsed input
/// event to it and, when a render is due, asks it for the full frame as lines
/// (top to bottom, styled with escape sequences). Lines wider than the
/// terminal are clamped by the renderer; missing trailing lines render empty.
pub trait Screen {
    fn handle_event(&mut self, event: &InputEvent);
    fn render(&mut self, width: usize, height: usize) -> Vec<String>;
}
