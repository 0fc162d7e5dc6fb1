use anyhow::Result;
use clap::{ArgAction, Parser};
use log::info;
use std::path::PathBuf;
use tdlab::{run_experiment, ExperimentConfig};

/// Train and evaluate a tabular agent
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// `qlearning` or `sarsa`
    #[arg(long, default_value = "qlearning")]
    algorithm: String,

    /// Environment name, e.g. FrozenLake-v1, FrozenLake8x8-v1 or Taxi-v3
    #[arg(long, default_value = "FrozenLake-v1")]
    env: String,

    /// Seed of the run
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// The number of training episodes
    #[arg(long, default_value_t = 5000)]
    episodes_train: usize,

    /// The number of greedy evaluation episodes
    #[arg(long, default_value_t = 200)]
    episodes_eval: usize,

    /// Learning rate
    #[arg(long, default_value_t = 0.1)]
    alpha: f32,

    /// Discount factor
    #[arg(long, default_value_t = 0.99)]
    gamma: f32,

    /// Initial exploration rate
    #[arg(long, default_value_t = 1.0)]
    eps_start: f32,

    /// Floor of the exploration rate
    #[arg(long, default_value_t = 0.05)]
    eps_end: f32,

    /// Decay of the exploration rate per episode
    #[arg(long, default_value_t = 0.995)]
    eps_decay: f32,

    /// Slippery FrozenLake
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    is_slippery: bool,

    /// Output directory
    #[arg(long, default_value = "results")]
    out_dir: PathBuf,

    /// Read the whole configuration from a YAML file, ignoring the flags above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the configuration of the run to a YAML file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

impl Args {
    fn experiment_config(&self) -> Result<ExperimentConfig> {
        if let Some(path) = &self.config {
            info!("Load config from {:?}", path);
            return ExperimentConfig::load(path);
        }
        Ok(ExperimentConfig::default()
            .algorithm(self.algorithm.as_str())
            .env(self.env.as_str())
            .seed(self.seed)
            .episodes_train(self.episodes_train)
            .episodes_eval(self.episodes_eval)
            .alpha(self.alpha)
            .gamma(self.gamma)
            .epsilon(self.eps_start, self.eps_end, self.eps_decay)
            .is_slippery(self.is_slippery)
            .out_dir(&self.out_dir))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = args.experiment_config()?;
    if let Some(path) = &args.save_config {
        config.save(path)?;
        info!("Saved config to {:?}", path);
    }

    let summary = run_experiment(&config)?;
    println!(
        "{} on {} (seed {}): success rate = {:.4}, mean return = {:.4} ± {:.4}, mean length = {:.2}",
        summary.algorithm,
        summary.env,
        summary.seed,
        summary.eval_success_rate,
        summary.eval_mean_return,
        summary.eval_std_return,
        summary.eval_mean_length
    );

    Ok(())
}
