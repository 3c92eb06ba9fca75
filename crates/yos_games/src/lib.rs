//! Pure game engines for the desktop arcade screens.
//!
//! Each engine owns its board state and exposes a small step/steer API with
//! no rendering or timing concerns. Randomness is injected by the caller so
//! every engine is deterministic under a seeded RNG.

pub mod checkers;
pub mod snake;
pub mod tetris;

pub use checkers::{CheckersGame, IllegalMove, Move, Side};
pub use snake::{Direction, SnakeGame};
pub use tetris::{PieceColor, TetrisGame};
