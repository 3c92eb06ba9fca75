//! Full-screen terminal runtime for YohannesOS.
//!
//! Invariant: single output gate — only `core::output::OutputGate::flush(..)`
//! writes to the terminal.
//!
//! # Public API Overview
//! - Implement [`Screen`] for the root view and drive it with [`TUI`].
//! - Parse/inspect input with [`parse_input_events`] and [`InputEvent`].
//! - Schedule deterministic ticks with [`TimerService`].
//! - Measure and clamp styled lines with the width helpers.
//!
//! # Runtime Alias
//! [`TUI`] is a type alias for `runtime::tui::TuiRuntime<T>`.

pub mod config;
pub mod logging;

pub mod core;
pub mod platform;
pub mod render;
pub mod runtime;

/// Root screen contract.
pub use crate::core::screen::Screen;

/// Keyboard input parsing.
pub use crate::core::input_event::{parse_input_events, InputEvent};

/// Terminal seam.
pub use crate::core::terminal::Terminal;

/// Output gate primitives.
pub use crate::core::output::{OutputGate, TerminalCmd};

/// Width helpers for styled lines.
pub use crate::render::width::{clamp_to_width, visible_width};

/// Timer scheduling.
pub use crate::runtime::timer::{TimerHandle, TimerId, TimerService};

/// Runtime wake handle and root-screen cell.
pub use crate::runtime::tui::{RenderHandle, ScreenRc};

pub use crate::platform::ProcessTerminal;

/// Convenience alias for the runtime.
pub type TUI<T> = runtime::tui::TuiRuntime<T>;
