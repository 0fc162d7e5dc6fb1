use anyhow::Result;
use clap::{ArgAction, Parser};
use log::info;
use std::path::PathBuf;
use tdlab::{run_experiment, ExperimentConfig};

/// Run every algorithm on every environment for several seeds
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seeds
    #[arg(long, value_delimiter = ',', default_value = "0,1,2,3,4")]
    seeds: Vec<u64>,

    /// Environment names
    #[arg(long, value_delimiter = ',', default_value = "FrozenLake-v1,Taxi-v3")]
    envs: Vec<String>,

    /// Algorithm names
    #[arg(long, value_delimiter = ',', default_value = "qlearning,sarsa")]
    algorithms: Vec<String>,

    /// The number of training episodes
    #[arg(long, default_value_t = 5000)]
    episodes_train: usize,

    /// The number of greedy evaluation episodes
    #[arg(long, default_value_t = 200)]
    episodes_eval: usize,

    /// Slippery FrozenLake
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    is_slippery: bool,

    /// Output directory
    #[arg(long, default_value = "results")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let base = ExperimentConfig::default()
        .episodes_train(args.episodes_train)
        .episodes_eval(args.episodes_eval)
        .is_slippery(args.is_slippery)
        .out_dir(&args.out_dir);

    let n_runs = args.envs.len() * args.algorithms.len() * args.seeds.len();
    let mut i = 0;
    for env in args.envs.iter() {
        for algorithm in args.algorithms.iter() {
            for &seed in args.seeds.iter() {
                i += 1;
                info!("[{}/{}] {} on {}, seed = {}", i, n_runs, algorithm, env, seed);
                let config = base
                    .clone()
                    .env(env.as_str())
                    .algorithm(algorithm.as_str())
                    .seed(seed);
                run_experiment(&config)?;
            }
        }
    }
    info!("Wrote {} summaries to {:?}", n_runs, args.out_dir);

    Ok(())
}
