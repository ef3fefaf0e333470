use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::GameError;
use crate::game::{Board, Fingerprint, GameResult};

use super::agent::Agent;
use super::value_table::ValueTable;

/// Tabular learner parameters. The reward magnitudes mirror the constants the
/// learner was originally tuned with; they are plain config values rather
/// than hard-coded.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Value assumed for any state/column with no stored estimate.
    pub default_value: f64,
    pub discount_factor: f64,
    pub learning_rate: f64,
    /// Probability of a uniformly random move during normal play.
    pub exploration: f64,
    /// Exploration used while self-play training (restored afterwards).
    pub training_exploration: f64,
    /// Reward for a move that wins on the spot.
    pub win_reward: f64,
    /// Reward contribution of an opponent reply that would win for them.
    pub defeat_reward: f64,
    /// Reward for a stalemating move, and for any quiet opponent reply.
    pub stalemate_reward: f64,
    /// Whether `select_move` through the `Agent` trait also updates values.
    pub learn_during_play: bool,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        LearnerConfig {
            default_value: 0.0,
            discount_factor: 0.8,
            learning_rate: 0.7,
            exploration: 0.0,
            training_exploration: 0.8,
            win_reward: 10.0,
            defeat_reward: -100.0,
            stalemate_reward: -1.0,
            learn_during_play: true,
        }
    }
}

/// Tabular Q-learning agent.
///
/// Keeps per-state, per-column value estimates in a [`ValueTable`] keyed by
/// the board's player-relative fingerprint, and updates them with a one-step
/// bootstrapped rule shaped by a one-ply lookahead reward. States it has
/// never valued are delegated to a fallback agent (minimax, typically).
///
/// Like the search agent, it explores by mutating the shared board and always
/// restores it before returning.
pub struct QLearner {
    config: LearnerConfig,
    table: ValueTable,
    fallback: Box<dyn Agent>,
    exploration: f64,
    rng: StdRng,
}

impl QLearner {
    pub fn new(config: LearnerConfig, fallback: Box<dyn Agent>) -> Self {
        let exploration = config.exploration;
        QLearner {
            config,
            table: ValueTable::new(),
            fallback,
            exploration,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic variant for tests.
    pub fn with_seed(config: LearnerConfig, fallback: Box<dyn Agent>, seed: u64) -> Self {
        let mut learner = Self::new(config, fallback);
        learner.rng = StdRng::seed_from_u64(seed);
        learner
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    /// Replace the value table, e.g. with one loaded from disk.
    pub fn set_table(&mut self, table: ValueTable) {
        self.table = table;
    }

    pub fn exploration(&self) -> f64 {
        self.exploration
    }

    pub fn set_exploration(&mut self, exploration: f64) {
        self.exploration = exploration;
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    /// The stored estimate for playing `column` from `state`, or the
    /// configured default.
    pub fn estimate(&self, state: Fingerprint, column: usize) -> f64 {
        self.table
            .get(state, column)
            .unwrap_or(self.config.default_value)
    }

    /// Best stored value over the board's current legal moves, or the
    /// default when none of them has an estimate.
    pub fn best_known_value(&self, board: &Board) -> f64 {
        let moves = board.legal_moves();
        self.table
            .best_value(board.fingerprint(), &moves)
            .unwrap_or(self.config.default_value)
    }

    /// Apply one bootstrapped value update for playing `column` from the
    /// board's current state:
    ///
    /// `new = old + learning_rate * (reward + discount_factor * best_next - old)`
    ///
    /// where `best_next` is the best known value of the opponent's resulting
    /// state. The board is restored before returning.
    pub fn update(&mut self, board: &mut Board, column: usize) -> Result<(), GameError> {
        let state = board.fingerprint();
        let old = self.estimate(state, column);

        let reward = self.immediate_reward(board, column)?;

        board.play(column)?;
        let best_next = self.best_known_value(board);
        board.undo()?;

        let new = old
            + self.config.learning_rate
                * (reward + self.config.discount_factor * best_next - old);
        self.table.set(state, column, new);
        Ok(())
    }

    /// One-ply shaped reward for playing `column` from the current state.
    ///
    /// Winning on the spot is worth `win_reward` and stalemating
    /// `stalemate_reward`. Otherwise the reward is the worst case over the
    /// opponent's immediate replies: `defeat_reward` if any reply wins for
    /// them, `stalemate_reward` per quiet reply, minimized.
    fn immediate_reward(&self, board: &mut Board, column: usize) -> Result<f64, GameError> {
        board.play(column)?;
        let reward = match board.result() {
            GameResult::Win(_) => Ok(self.config.win_reward),
            GameResult::Stalemate => Ok(self.config.stalemate_reward),
            GameResult::InProgress => self.worst_opponent_reply(board),
        };
        // Mandatory cleanup before the reward (or any error) propagates
        board.undo()?;
        reward
    }

    fn worst_opponent_reply(&self, board: &mut Board) -> Result<f64, GameError> {
        let mut worst = f64::INFINITY;
        for reply in board.legal_moves() {
            board.play(reply)?;
            let branch = match board.result() {
                GameResult::Win(_) => self.config.defeat_reward,
                _ => self.config.stalemate_reward,
            };
            board.undo()?;
            worst = worst.min(branch);
        }
        Ok(worst)
    }

    /// Pick a column: explore uniformly with probability `exploration`,
    /// otherwise exploit the best stored value for the current state, falling
    /// back to the configured agent when the state has never been valued.
    /// With `learning`, the chosen move is also fed through [`update`],
    /// coupling acting and learning.
    ///
    /// [`update`]: QLearner::update
    pub fn decide(&mut self, board: &mut Board, learning: bool) -> Result<usize, GameError> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(GameError::NoMovesAvailable);
        }

        let column = if self.rng.random::<f64>() < self.exploration {
            moves[self.rng.random_range(0..moves.len())]
        } else {
            match self.table.best_move(board.fingerprint()) {
                Some((col, _)) => col,
                None => {
                    log::trace!("No stored values here, deferring to {}", self.fallback.name());
                    self.fallback.select_move(board)?
                }
            }
        };

        if learning {
            self.update(board, column)?;
        }
        Ok(column)
    }
}

impl Agent for QLearner {
    fn select_move(&mut self, board: &mut Board) -> Result<usize, GameError> {
        let learning = self.config.learn_during_play;
        self.decide(board, learning)
    }

    fn name(&self) -> &str {
        "QLearner"
    }
}
