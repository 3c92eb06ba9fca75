//! Core interfaces and types.

pub mod terminal;
pub mod input;
pub mod input_event;
pub mod output;
pub mod screen;
