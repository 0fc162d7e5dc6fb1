//! Default implementation of the [`Evaluator`] trait.
//!
//! This module provides a simple evaluator that runs a fixed number of episodes
//! and summarizes their returns, lengths and successes.
use super::{EvalStats, Evaluator};
use crate::{
    stats::{mean, std_population, EpisodeStats, EpisodeTracker},
    Env, Policy, PositiveTerminalReward, SuccessCriterion, TdlabError,
};
use anyhow::Result;
use log::{debug, trace};

/// A default implementation of the [`Evaluator`] trait.
///
/// Episode `i` is reset with index `seed_base + i`, so two evaluations with
/// the same `seed_base` see the same sequence of initial states.
///
/// # Examples
///
/// ```ignore
/// let env = FrozenLake::build(&config, 0)?;
/// let mut evaluator = DefaultEvaluator::new(env, 50, 10_000)?;
/// let stats = evaluator.evaluate(&mut GreedyPolicy::new(&q))?;
/// println!("success rate: {}", stats.success_rate);
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// Index of the first episode's reset.
    seed_base: u64,

    /// The environment instance used for evaluation.
    env: E,

    criterion: Box<dyn SuccessCriterion>,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    /// Runs the evaluation episodes with the given policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment fails to reset or step.
    fn evaluate<P: Policy<E>>(&mut self, policy: &mut P) -> Result<EvalStats> {
        let stats = self.run_episodes(policy)?;
        let returns: Vec<f64> = stats.returns.iter().map(|&r| r as f64).collect();
        let lengths: Vec<f64> = stats.lengths.iter().map(|&l| l as f64).collect();
        let successes: Vec<f64> = stats.successes.iter().map(|&s| s as f64).collect();

        Ok(EvalStats {
            mean_return: mean(&returns),
            std_return: std_population(&returns),
            mean_length: mean(&lengths),
            success_rate: mean(&successes),
        })
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// * `env` - Environment used for evaluation
    /// * `n_episodes` - Number of episodes to run during evaluation
    /// * `seed_base` - Reset index of the first episode
    ///
    /// Fails if `n_episodes` is zero or the last reset index exceeds `u64::MAX`.
    pub fn new(env: E, n_episodes: usize, seed_base: u64) -> Result<Self> {
        if n_episodes == 0 {
            return Err(TdlabError::EmptyEvaluation.into());
        }
        if seed_base.checked_add(n_episodes as u64 - 1).is_none() {
            return Err(TdlabError::InvalidConfig(format!(
                "reset indices from {} for {} episodes overflow u64",
                seed_base, n_episodes
            ))
            .into());
        }
        Ok(Self {
            n_episodes,
            seed_base,
            env,
            criterion: Box::new(PositiveTerminalReward),
        })
    }

    /// Replaces the criterion deciding whether an episode succeeded.
    pub fn with_success_criterion(mut self, criterion: impl SuccessCriterion + 'static) -> Self {
        self.criterion = Box::new(criterion);
        self
    }

    /// Runs the evaluation episodes and returns the per-episode statistics.
    pub fn run_episodes<P: Policy<E>>(&mut self, policy: &mut P) -> Result<EpisodeStats> {
        let mut stats = EpisodeStats::with_capacity(self.n_episodes);

        for ix in 0..self.n_episodes {
            let (mut obs, _) = self.env.reset_with_index(self.seed_base + ix as u64)?;
            let mut episode = EpisodeTracker::new();

            loop {
                let act = policy.sample(obs);
                let step = self.env.step(act)?;
                trace!("eval episode {}: {} -({})-> {}", ix, obs, act, step.obs);
                episode.record(
                    self.criterion.as_ref(),
                    step.reward,
                    step.is_terminated,
                    step.is_truncated,
                );
                if step.is_done() {
                    break;
                }
                obs = step.obs;
            }

            debug!(
                "eval episode {}: return = {}, length = {}",
                ix,
                episode.ret(),
                episode.length()
            );
            stats.push(episode);
        }

        Ok(stats)
    }

    /// Closes the environment and returns it.
    pub fn into_env(mut self) -> Result<E> {
        self.env.close()?;
        Ok(self.env)
    }
}
