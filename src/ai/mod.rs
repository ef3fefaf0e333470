//! Decision engines: the agent capability trait, minimax search, the tabular
//! Q-learner with its value table, and a random baseline.

mod agent;
mod minimax;
mod qlearning;
mod random;
mod value_table;

pub use agent::Agent;
pub use minimax::MinimaxAgent;
pub use qlearning::{LearnerConfig, QLearner};
pub use random::RandomAgent;
pub use value_table::ValueTable;
