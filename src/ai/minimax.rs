use crate::error::GameError;
use crate::game::{Board, GameResult};

use super::agent::Agent;

/// Depth-bounded minimax agent with alpha-beta pruning.
///
/// Searches by mutating the shared board through `play` and restoring it with
/// `undo`. Each speculative play is undone before anything else happens to the
/// result of the recursion, so the board comes back untouched even when a
/// child evaluation fails.
pub struct MinimaxAgent {
    depth: usize,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        MinimaxAgent { depth }
    }

    fn best_move(&self, board: &mut Board) -> Result<usize, GameError> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(GameError::NoMovesAvailable);
        }

        let (best, _value) =
            self.minimax(board, self.depth, true, f64::NEG_INFINITY, f64::INFINITY)?;
        // At depth 0 the search evaluates the root statically and reports no
        // move (value 0); fall back to the first legal column.
        Ok(best.unwrap_or(moves[0]))
    }

    /// Returns the best column (if any) and its value from the perspective of
    /// the player the agent is maximizing for.
    fn minimax(
        &self,
        board: &mut Board,
        depth: usize,
        my_turn: bool,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<(Option<usize>, f64), GameError> {
        let moves = board.legal_moves();
        let sign = if my_turn { 1.0 } else { -1.0 };

        if depth == 0 || moves.is_empty() {
            let value = match board.result() {
                // Horizon cut-off or stalemate: neutral
                GameResult::InProgress | GameResult::Stalemate => 0.0,
                // A decided game always favors the player who just moved,
                // i.e. the opponent of this node's mover. Weighting by the
                // remaining depth rewards the faster win and the later loss.
                GameResult::Win(_) => (depth as f64 + 1.0) * -sign,
            };
            return Ok((None, value));
        }

        let mut best_value = if my_turn {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_move = None;

        for col in moves {
            board.play(col)?;
            let child = self.minimax(board, depth - 1, !my_turn, alpha, beta);
            board.undo()?;
            let (_, value) = child?;

            if my_turn {
                // Strictly greater: the first move reaching a value keeps it
                if value > best_value {
                    best_value = value;
                    best_move = Some(col);
                    alpha = alpha.max(best_value);
                    if alpha >= beta {
                        break;
                    }
                }
            } else if value < best_value {
                best_value = value;
                best_move = Some(col);
                beta = beta.min(best_value);
                if beta <= alpha {
                    break;
                }
            }
        }

        Ok((best_move, best_value))
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, board: &mut Board) -> Result<usize, GameError> {
        self.best_move(board)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::{GameResult, Player};

    #[test]
    fn selects_legal_move() {
        let mut agent = MinimaxAgent::new(4);
        let mut board = Board::new();
        let legal = board.legal_moves();
        let col = agent.select_move(&mut board).unwrap();
        assert!(legal.contains(&col), "Column {col} is not legal");
    }

    #[test]
    fn leaves_board_untouched() {
        let mut agent = MinimaxAgent::new(4);
        let mut board = Board::new();
        for col in [3, 3, 4, 2] {
            board.play(col).unwrap();
        }
        let snapshot = board.clone();
        agent.select_move(&mut board).unwrap();
        assert_eq!(board, snapshot);
    }

    #[test]
    fn completes_vertical_win() {
        // Red has three stacked in column 0 with room above
        let mut board = Board::new();
        for _ in 0..3 {
            board.play(0).unwrap(); // Red
            board.play(1).unwrap(); // Yellow
        }
        let mut agent = MinimaxAgent::new(3);
        let col = agent.select_move(&mut board).unwrap();
        assert_eq!(col, 0, "Should complete the vertical four in column 0");
    }

    #[test]
    fn completes_horizontal_win() {
        // Red holds columns 0..3 on the bottom row; column 3 wins
        let mut board = Board::new();
        for col in 0..3 {
            board.play(col).unwrap(); // Red
            board.play(col).unwrap(); // Yellow
        }
        let mut agent = MinimaxAgent::new(3);
        let col = agent.select_move(&mut board).unwrap();
        assert_eq!(col, 3, "Should take the winning move in column 3");
    }

    #[test]
    fn blocks_vertical_win() {
        // Red has three stacked in column 0 and Yellow is to move
        let mut board = Board::new();
        for _ in 0..2 {
            board.play(0).unwrap(); // Red
            board.play(1).unwrap(); // Yellow
        }
        board.play(0).unwrap(); // Red's third piece; Yellow to move
        let mut agent = MinimaxAgent::new(3);
        let col = agent.select_move(&mut board).unwrap();
        assert_eq!(col, 0, "Should block the vertical threat in column 0");
    }

    #[test]
    fn blocks_horizontal_win() {
        // Red holds columns 0..2 on the bottom row and Yellow is to move
        let mut board = Board::new();
        for col in 0..2 {
            board.play(col).unwrap(); // Red
            board.play(col).unwrap(); // Yellow
        }
        board.play(2).unwrap(); // Red's third piece; Yellow to move
        let mut agent = MinimaxAgent::new(3);
        let col = agent.select_move(&mut board).unwrap();
        assert_eq!(col, 3, "Should block the horizontal threat in column 3");
    }

    #[test]
    fn errors_with_no_moves() {
        let mut board = Board::new();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            board.play(col).unwrap();
        }
        let mut agent = MinimaxAgent::new(4);
        assert_eq!(
            agent.select_move(&mut board),
            Err(GameError::NoMovesAvailable)
        );
    }

    #[test]
    fn depth_zero_still_returns_a_move() {
        let mut agent = MinimaxAgent::new(0);
        let mut board = Board::new();
        let col = agent.select_move(&mut board).unwrap();
        assert!(board.legal_moves().contains(&col));
    }

    #[test]
    fn full_game_vs_self_completes() {
        let mut agent1 = MinimaxAgent::new(3);
        let mut agent2 = MinimaxAgent::new(3);
        let mut board = Board::new();
        let mut turn = 0;

        while board.result() == GameResult::InProgress && turn < 64 {
            let col = if turn % 2 == 0 {
                agent1.select_move(&mut board).unwrap()
            } else {
                agent2.select_move(&mut board).unwrap()
            };
            board.play(col).unwrap();
            turn += 1;
        }

        assert!(board.result().is_terminal(), "Game should complete");
    }

    #[test]
    fn beats_random_agent() {
        let games_per_color = 10;
        let mut minimax_wins = 0;
        let total = games_per_color * 2;

        for game_idx in 0..total {
            let minimax_is_red = game_idx % 2 == 0;
            let mut minimax = MinimaxAgent::new(4);
            let mut random = RandomAgent::with_seed(game_idx as u64);
            let mut board = Board::new();

            while board.result() == GameResult::InProgress {
                let minimax_turn =
                    (board.current_turn() == Some(Player::Red)) == minimax_is_red;
                let col = if minimax_turn {
                    minimax.select_move(&mut board).unwrap()
                } else {
                    random.select_move(&mut board).unwrap()
                };
                board.play(col).unwrap();
            }

            if let GameResult::Win(winner) = board.result() {
                if (winner == Player::Red) == minimax_is_red {
                    minimax_wins += 1;
                }
            }
        }

        let win_rate = minimax_wins as f64 / total as f64;
        assert!(
            win_rate > 0.80,
            "Minimax should beat random >80% of the time, got {:.0}% ({minimax_wins}/{total})",
            win_rate * 100.0
        );
    }
}
