use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use connect_four_rl::ai::{MinimaxAgent, QLearner, ValueTable};
use connect_four_rl::config::AppConfig;
use connect_four_rl::training::Trainer;

/// Train the tabular Q-learner via self-play.
#[derive(Parser)]
#[command(name = "train", about = "Train a Connect Four Q-learning agent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Path of the value table to load (if present) and save
    #[arg(long, default_value = "values.json")]
    table: PathBuf,

    /// Override number of training episodes
    #[arg(long)]
    episodes: Option<usize>,

    /// Override learning rate
    #[arg(long)]
    lr: Option<f64>,

    /// Start from an empty value table even if one exists
    #[arg(long)]
    fresh: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if let Some(episodes) = cli.episodes {
        config.training.num_episodes = episodes;
    }
    if let Some(lr) = cli.lr {
        config.learner.learning_rate = lr;
    }
    config
        .validate()
        .context("validating configuration after overrides")?;

    let fallback = MinimaxAgent::new(config.search.depth);
    let mut learner = QLearner::new(config.learner.clone(), Box::new(fallback));

    if !cli.fresh && cli.table.exists() {
        let table = ValueTable::load(&cli.table)
            .with_context(|| format!("loading value table from {}", cli.table.display()))?;
        log::info!(
            "Resuming with {} previously valued states from {}",
            table.len(),
            cli.table.display()
        );
        learner.set_table(table);
    }

    let trainer = Trainer::new(config.training.clone());
    trainer.train(&mut learner).context("training failed")?;

    let final_win_rate = trainer
        .evaluate(&mut learner)
        .context("final evaluation failed")?;
    log::info!("Final eval vs Random: {:.1}% win rate", final_win_rate * 100.0);

    learner
        .table()
        .save(&cli.table)
        .with_context(|| format!("saving value table to {}", cli.table.display()))?;
    log::info!(
        "Saved {} valued states to {}",
        learner.table().len(),
        cli.table.display()
    );

    Ok(())
}
