//! Core game logic: the gravity-drop board engine with its undo stack,
//! player types, and the player-relative state fingerprint.

pub mod board;
mod fingerprint;
mod player;

pub use board::{Board, Cell, GameResult, DEFAULT_HEIGHT, DEFAULT_WIDTH, NUM_IN_A_ROW};
pub use fingerprint::Fingerprint;
pub use player::Player;
