use log::{debug, info, warn};

use crate::ai::{Agent, QLearner, RandomAgent};
use crate::error::GameError;
use crate::game::{Board, GameResult, Player, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::training::metrics::{EpisodeResult, TrainingMetrics};

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub num_episodes: usize,
    /// Board dimensions used for the self-play episodes.
    pub board_width: usize,
    pub board_height: usize,
    /// Abort an episode after this many turns. Most games stay well under it.
    pub max_turns: usize,
    pub log_interval: usize,
    pub eval_interval: usize,
    pub eval_games: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_episodes: 1_000,
            board_width: DEFAULT_WIDTH,
            board_height: DEFAULT_HEIGHT,
            max_turns: 100,
            log_interval: 100,
            eval_interval: 500,
            eval_games: 50,
        }
    }
}

/// Self-play trainer for the tabular Q-learner.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    /// Run the full training loop: the learner plays both sides of a fresh
    /// board each episode with its training exploration, learning on every
    /// move selection. The learner's play-time exploration is restored on
    /// exit, error or not.
    pub fn train(&self, learner: &mut QLearner) -> Result<(), GameError> {
        let saved_exploration = learner.exploration();
        learner.set_exploration(learner.config().training_exploration);
        let result = self.run_episodes(learner);
        learner.set_exploration(saved_exploration);
        result
    }

    fn run_episodes(&self, learner: &mut QLearner) -> Result<(), GameError> {
        let mut metrics = TrainingMetrics::new();

        info!(
            "Starting Q-learning self-play for {} episodes on a {}x{} board",
            self.config.num_episodes, self.config.board_width, self.config.board_height
        );

        for episode in 1..=self.config.num_episodes {
            let result = self.play_episode(learner)?;
            metrics.record_episode(result);

            if episode % self.config.log_interval == 0 {
                let window = self.config.log_interval;
                info!(
                    "Episode {}/{} | states: {} | win_rate({}): {:.1}% | draw: {:.1}% | avg_len: {:.1}",
                    episode,
                    self.config.num_episodes,
                    learner.table().len(),
                    window,
                    metrics.win_rate(window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                    metrics.average_game_length(window),
                );
            }

            if episode % self.config.eval_interval == 0 {
                let win_rate = self.evaluate(learner)?;
                info!(
                    "  >> Eval vs Random ({} games): {:.1}% win rate",
                    self.config.eval_games,
                    win_rate * 100.0
                );
            }
        }

        info!(
            "Training complete. Episodes: {}, states valued: {}",
            metrics.total_episodes(),
            learner.table().len()
        );
        Ok(())
    }

    /// Play one self-play episode with learning enabled on every selection.
    fn play_episode(&self, learner: &mut QLearner) -> Result<EpisodeResult, GameError> {
        let mut board = Board::with_size(
            self.config.board_width,
            self.config.board_height,
            Player::Red,
        );

        while board.result() == GameResult::InProgress {
            if board.turn_count() >= self.config.max_turns {
                warn!("Episode hit the {}-turn safety cap", self.config.max_turns);
                break;
            }
            let col = learner.decide(&mut board, true)?;
            board.play(col)?;
        }

        let winner = match board.result() {
            GameResult::Win(player) => {
                debug!("Episode won by {} in {} turns", player, board.turn_count());
                Some(player)
            }
            _ => None,
        };
        Ok(EpisodeResult {
            winner,
            game_length: board.turn_count(),
        })
    }

    /// Greedy evaluation against the random baseline, alternating colors.
    /// Exploration and learning are both disabled for the duration.
    pub fn evaluate(&self, learner: &mut QLearner) -> Result<f64, GameError> {
        let saved_exploration = learner.exploration();
        learner.set_exploration(0.0);
        let result = self.run_eval_games(learner);
        learner.set_exploration(saved_exploration);
        result
    }

    fn run_eval_games(&self, learner: &mut QLearner) -> Result<f64, GameError> {
        let mut random = RandomAgent::new();
        let mut wins = 0;

        for game_idx in 0..self.config.eval_games {
            let learner_is_red = game_idx % 2 == 0;
            let mut board = Board::with_size(
                self.config.board_width,
                self.config.board_height,
                Player::Red,
            );

            while board.result() == GameResult::InProgress {
                let learner_turn =
                    (board.current_turn() == Some(Player::Red)) == learner_is_red;
                let col = if learner_turn {
                    learner.decide(&mut board, false)?
                } else {
                    random.select_move(&mut board)?
                };
                board.play(col)?;
            }

            if let GameResult::Win(winner) = board.result() {
                if (winner == Player::Red) == learner_is_red {
                    wins += 1;
                }
            }
        }

        Ok(wins as f64 / self.config.eval_games as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{LearnerConfig, MinimaxAgent};

    fn small_trainer(episodes: usize) -> Trainer {
        Trainer::new(TrainerConfig {
            num_episodes: episodes,
            board_width: 6,
            board_height: 6,
            eval_interval: usize::MAX,
            log_interval: usize::MAX,
            eval_games: 4,
            ..TrainerConfig::default()
        })
    }

    fn learner() -> QLearner {
        QLearner::with_seed(
            LearnerConfig::default(),
            Box::new(MinimaxAgent::new(2)),
            123,
        )
    }

    #[test]
    fn test_training_populates_table() {
        let trainer = small_trainer(3);
        let mut learner = learner();
        trainer.train(&mut learner).unwrap();
        assert!(
            !learner.table().is_empty(),
            "Self-play should store value estimates"
        );
    }

    #[test]
    fn test_training_restores_exploration() {
        let trainer = small_trainer(2);
        let mut learner = learner();
        let before = learner.exploration();
        trainer.train(&mut learner).unwrap();
        assert_eq!(learner.exploration(), before);
    }

    #[test]
    fn test_evaluate_returns_rate_in_unit_interval() {
        let trainer = small_trainer(1);
        let mut learner = learner();
        let rate = trainer.evaluate(&mut learner).unwrap();
        assert!((0.0..=1.0).contains(&rate));
    }
}
