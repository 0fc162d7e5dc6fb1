//! Q-learning.
use crate::{epsilon_greedy, trainer::train_episodes, QTable, TdConfig, TrainOutcome};
use anyhow::Result;
use log::trace;
use rand::Rng;
use tdlab_core::{stats::EpisodeTracker, Env, PositiveTerminalReward, SuccessCriterion};

/// Off-policy tabular control.
///
/// Actions are chosen epsilon-greedily; the target bootstraps from the best
/// action of the next state, whatever action is actually taken there.
pub struct QLearning {
    config: TdConfig,
    criterion: Box<dyn SuccessCriterion>,
}

impl QLearning {
    /// Creates a trainer with the default success criterion.
    pub fn new(config: TdConfig) -> Self {
        Self {
            config,
            criterion: Box::new(PositiveTerminalReward),
        }
    }

    /// Replaces the criterion deciding whether an episode succeeded.
    pub fn with_success_criterion(mut self, criterion: impl SuccessCriterion + 'static) -> Self {
        self.criterion = Box::new(criterion);
        self
    }

    /// Applies one update for the transition `(s, a, r, s_next)` and returns the TD error.
    ///
    /// The target is `r + gamma * max_a' Q[s_next, a']`. Terminal states are
    /// bootstrapped too: their rows are never updated and stay at zero.
    pub fn update(&self, q: &mut QTable, s: usize, a: usize, r: f32, s_next: usize) -> f32 {
        let target = r + self.config.gamma * q.max(s_next);
        let td_error = target - q.get(s, a);
        q.add(s, a, self.config.alpha * td_error);
        td_error
    }

    /// Trains a fresh table on `env`.
    ///
    /// All exploration entropy comes from `rng`.
    pub fn train<E: Env, R: Rng>(&self, env: &mut E, rng: &mut R) -> Result<TrainOutcome> {
        train_episodes("Q-learning", &self.config, env, rng, |env, q, mut obs, eps, rng| {
            let mut episode = EpisodeTracker::new();
            loop {
                let act = epsilon_greedy(q, obs, eps, rng);
                let step = env.step(act)?;
                let td_error = self.update(q, obs, act, step.reward, step.obs);
                trace!(
                    "s = {}, a = {}, r = {}, s' = {}, td_error = {}",
                    obs,
                    act,
                    step.reward,
                    step.obs,
                    td_error
                );
                episode.record(
                    self.criterion.as_ref(),
                    step.reward,
                    step.is_terminated,
                    step.is_truncated,
                );
                if step.is_done() {
                    return Ok(episode);
                }
                obs = step.obs;
            }
        })
    }
}
