//! YohannesOS: a portfolio desktop that boots, runs games, and drops into a
//! faux shell, all inside a full-screen terminal frame.

pub mod app;
pub mod boot;
pub mod content;
pub mod controller;
pub mod screen;
pub mod theme;
pub mod view;

pub use app::{App, HostOps, Mode, TimerPurpose};
pub use controller::Controller;
pub use screen::YosScreen;
