//! A single training and evaluation run.
use crate::{
    io::{file_stem, write_summary, write_train_log, Summary},
    Algorithm, ExperimentConfig,
};
use anyhow::Result;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use std::fs;
use tdlab_core::{DefaultEvaluator, Env, EvalStats, Evaluator};
use tdlab_tabular_agent::{GreedyPolicy, QLearning, Sarsa, TrainOutcome};
use tdlab_toy_env::{EnvKind, FrozenLake, Taxi};

/// Trains with the configured algorithm, evaluates the greedy policy and
/// writes `<stem>_train.csv` and `<stem>_summary.csv` into `config.out_dir`,
/// where `<stem>` is given by [`file_stem`].
///
/// The algorithm name, the environment name and the hyperparameters are all
/// checked before anything is written.
pub fn run_experiment(config: &ExperimentConfig) -> Result<Summary> {
    let algorithm: Algorithm = config.algorithm.parse()?;
    let kind = EnvKind::from_name(&config.env, config.is_slippery)?;
    config.validate()?;

    info!(
        "Running {} on {} with seed {}",
        algorithm, config.env, config.seed
    );
    fs::create_dir_all(&config.out_dir)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let (outcome, eval) = match kind {
        EnvKind::FrozenLake(env_config) => {
            train_and_evaluate::<FrozenLake>(&env_config, algorithm, config, &mut rng)?
        }
        EnvKind::Taxi(env_config) => {
            train_and_evaluate::<Taxi>(&env_config, algorithm, config, &mut rng)?
        }
    };

    let stem = file_stem(algorithm.name(), &config.env, config.seed);
    write_train_log(
        config.out_dir.join(format!("{}_train.csv", stem)),
        &outcome.stats,
    )?;

    let summary = Summary {
        algorithm: algorithm.name().to_string(),
        env: config.env.clone(),
        seed: config.seed,
        alpha: config.alpha,
        gamma: config.gamma,
        eps_start: config.eps_start,
        eps_end: config.eps_end,
        eps_decay: config.eps_decay,
        eval_mean_return: eval.mean_return,
        eval_std_return: eval.std_return,
        eval_mean_length: eval.mean_length,
        eval_success_rate: eval.success_rate,
    };
    write_summary(
        config.out_dir.join(format!("{}_summary.csv", stem)),
        &summary,
    )?;

    info!(
        "{} on {} (seed {}): success rate = {:.4}, mean return = {:.4}, mean length = {:.2}",
        algorithm, config.env, config.seed, eval.success_rate, eval.mean_return, eval.mean_length
    );

    Ok(summary)
}

fn train_and_evaluate<E: Env>(
    env_config: &E::Config,
    algorithm: Algorithm,
    config: &ExperimentConfig,
    rng: &mut StdRng,
) -> Result<(TrainOutcome, EvalStats)> {
    let mut env = E::build(env_config, config.seed)?;
    let outcome = match algorithm {
        Algorithm::QLearning => QLearning::new(config.td_config()).train(&mut env, rng)?,
        Algorithm::Sarsa => Sarsa::new(config.td_config()).train(&mut env, rng)?,
    };
    env.close()?;

    let mut evaluator = {
        let env = E::build(env_config, config.seed)?;
        DefaultEvaluator::new(env, config.episodes_eval, config.eval_seed_base())?
    };
    let eval = evaluator.evaluate(&mut GreedyPolicy::new(&outcome.q))?;
    evaluator.into_env()?;

    Ok((outcome, eval))
}
