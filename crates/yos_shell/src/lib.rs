//! The terminal session: command interpreter, transcript, history recall.

pub mod clock;
pub mod command;
pub mod content;
pub mod history;
pub mod session;

pub use clock::{Clock, SystemClock};
pub use command::Action;
pub use session::{Session, TranscriptEntry};
