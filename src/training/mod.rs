//! Self-play training loop and episode metrics.

pub mod metrics;
pub mod trainer;

pub use metrics::{EpisodeResult, TrainingMetrics};
pub use trainer::{Trainer, TrainerConfig};
