//! # Connect Four RL
//!
//! An N-in-a-row gravity-drop game engine with two decision engines built on
//! top of it: depth-bounded minimax with alpha-beta pruning, and a tabular
//! Q-learner trained by self-play. Both agents share one mutable board and
//! explore it through reversible `play`/`undo`.
//!
//! ## Modules
//!
//! - [`game`] — Board engine: grid, turn state, undo stack, fingerprints
//! - [`ai`] — Agent trait, minimax search, tabular Q-learning, value table
//! - [`training`] — Self-play trainer and episode metrics
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod training;
