//! Full-screen diff rendering.

pub mod screen;
pub mod width;

pub use screen::ScreenRenderer;
pub use width::visible_width;
