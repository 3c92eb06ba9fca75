//! Runtime loop, wake plumbing, and timers.

pub mod timer;
pub mod tui;

pub use timer::{TimerHandle, TimerId, TimerService};
pub use tui::{RenderHandle, ScreenRc, TuiRuntime};
