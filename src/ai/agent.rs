use crate::error::GameError;
use crate::game::Board;

/// Capability interface for anything that can pick a column to play.
///
/// Agents never own a board. They receive exclusive access to the shared one
/// and may explore it speculatively through `play`/`undo`, but must hand it
/// back exactly as they found it.
pub trait Agent {
    /// Select a column for the current player, or fail with
    /// [`GameError::NoMovesAvailable`] when the board has no legal moves.
    fn select_move(&mut self, board: &mut Board) -> Result<usize, GameError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
