use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::GameError;
use crate::game::Board;

use super::agent::Agent;

/// An agent that selects uniformly at random from legal moves.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic variant for tests.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, board: &mut Board) -> Result<usize, GameError> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(GameError::NoMovesAvailable);
        }
        let idx = self.rng.random_range(0..moves.len());
        Ok(moves[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameResult;

    #[test]
    fn test_random_agent_selects_legal_move() {
        let mut agent = RandomAgent::new();
        let mut board = Board::new();
        let legal = board.legal_moves();

        for _ in 0..100 {
            let col = agent.select_move(&mut board).unwrap();
            assert!(legal.contains(&col), "Column {} is not legal", col);
        }
    }

    #[test]
    fn test_random_agent_plays_full_game() {
        let mut agent1 = RandomAgent::new();
        let mut agent2 = RandomAgent::new();
        let mut board = Board::new();

        let mut turn = 0;
        while board.result() == GameResult::InProgress {
            let col = if turn % 2 == 0 {
                agent1.select_move(&mut board).unwrap()
            } else {
                agent2.select_move(&mut board).unwrap()
            };
            board.play(col).unwrap();
            turn += 1;
        }

        assert!(board.result().is_terminal());
    }

    #[test]
    fn test_errors_on_finished_game() {
        let mut agent = RandomAgent::new();
        let mut board = Board::new();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            board.play(col).unwrap();
        }
        assert_eq!(
            agent.select_move(&mut board),
            Err(GameError::NoMovesAvailable)
        );
    }
}
