use crate::error::GameError;

use super::fingerprint::Fingerprint;
use super::Player;

pub const DEFAULT_WIDTH: usize = 8;
pub const DEFAULT_HEIGHT: usize = 8;

/// Number of contiguous same-player pieces that wins the game.
pub const NUM_IN_A_ROW: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Win(Player),
    Stalemate,
}

impl GameResult {
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }
}

/// The mutable game engine: grid, turn state, result, and an undo stack.
///
/// This is the single source of truth for a game in progress. The search and
/// learning agents explore by mutating it through `play` and restoring it
/// through `undo`; any sequence of plays followed by the same number of undos
/// leaves the board exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major grid. Row 0 is the top, row `height - 1` is the bottom.
    cells: Vec<Cell>,
    current_turn: Option<Player>,
    turn_count: usize,
    result: GameResult,
    /// `(row, column)` of every play, in order. Used only by `undo`.
    history: Vec<(usize, usize)>,
}

impl Board {
    /// Create an empty default-size board with Red to move.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT, Player::Red)
    }

    /// Create an empty board of the given dimensions.
    pub fn with_size(width: usize, height: usize, starting_player: Player) -> Self {
        Board {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            current_turn: Some(starting_player),
            turn_count: 0,
            result: GameResult::InProgress,
            history: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position.
    /// Row 0 is the top, row `height - 1` is the bottom.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.width + col] = cell;
    }

    pub fn current_turn(&self) -> Option<Player> {
        self.current_turn
    }

    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Check if a column has no room left.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.width {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Columns that can still receive a piece, in ascending order.
    /// Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.result.is_terminal() {
            return Vec::new();
        }
        (0..self.width)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Drop a piece for the current player into `col`. Returns the landing row.
    ///
    /// The piece falls to the lowest empty cell (gravity). On success the move
    /// is recorded on the undo stack, the result is re-evaluated, and the turn
    /// passes to the other player (or to nobody if the game just ended).
    pub fn play(&mut self, col: usize) -> Result<usize, GameError> {
        if self.result.is_terminal() {
            return Err(GameError::GameFinished);
        }
        if col >= self.width || self.is_column_full(col) {
            return Err(GameError::InvalidMove(col));
        }

        // current_turn is always Some while the game is in progress
        let mover = self.current_turn.ok_or(GameError::GameFinished)?;

        // Find the lowest empty row in this column
        let mut row = 0;
        for r in (0..self.height).rev() {
            if self.get(r, col) == Cell::Empty {
                row = r;
                break;
            }
        }
        self.set(row, col, mover.to_cell());
        self.history.push((row, col));

        self.result = if self.wins_through(row, col) {
            GameResult::Win(mover)
        } else if (0..self.width).all(|c| self.is_column_full(c)) {
            GameResult::Stalemate
        } else {
            GameResult::InProgress
        };

        self.turn_count += 1;
        self.current_turn = match self.result {
            GameResult::InProgress => Some(mover.other()),
            _ => None,
        };

        Ok(row)
    }

    /// Revert the most recent play.
    ///
    /// Clears the cell, re-runs end detection (a win or stalemate reverts back
    /// to an in-progress game), and hands the turn back to whoever made the
    /// undone move.
    pub fn undo(&mut self) -> Result<(), GameError> {
        let (row, col) = self.history.pop().ok_or(GameError::EmptyHistory)?;
        let mover = match self.get(row, col) {
            Cell::Red => Player::Red,
            Cell::Yellow => Player::Yellow,
            Cell::Empty => return Err(GameError::EmptyHistory),
        };
        self.set(row, col, Cell::Empty);

        self.result = self.scan_result();
        self.turn_count -= 1;
        self.current_turn = Some(mover);
        Ok(())
    }

    /// A canonical key over grid contents relative to the player about to
    /// move. Two boards with identical contents and the same player to move
    /// always produce the same fingerprint.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self)
    }

    /// Check whether any line through `(row, col)` holds `NUM_IN_A_ROW`
    /// pieces of the color at that cell.
    fn wins_through(&self, row: usize, col: usize) -> bool {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }
        // (dr, dc) per direction: horizontal, vertical, both diagonals
        const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.run_length(row, col, dr, dc, cell) >= NUM_IN_A_ROW)
    }

    /// Count contiguous cells of `cell` along +/- one direction through
    /// `(row, col)`, including the cell itself.
    fn run_length(&self, row: usize, col: usize, dr: i32, dc: i32, cell: Cell) -> usize {
        let mut count = 1;
        for step in [(dr, dc), (-dr, -dc)] {
            let mut r = row as i32 + step.0;
            let mut c = col as i32 + step.1;
            while r >= 0
                && (r as usize) < self.height
                && c >= 0
                && (c as usize) < self.width
                && self.get(r as usize, c as usize) == cell
            {
                count += 1;
                r += step.0;
                c += step.1;
            }
        }
        count
    }

    /// Full-board end detection, used after an undo where the last-played
    /// cell is no longer known.
    fn scan_result(&self) -> GameResult {
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = self.get(row, col);
                if cell != Cell::Empty && self.wins_through(row, col) {
                    let winner = match cell {
                        Cell::Red => Player::Red,
                        Cell::Yellow => Player::Yellow,
                        Cell::Empty => unreachable!(),
                    };
                    return GameResult::Win(winner);
                }
            }
        }
        if (0..self.width).all(|c| self.is_column_full(c)) {
            GameResult::Stalemate
        } else {
            GameResult::InProgress
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
