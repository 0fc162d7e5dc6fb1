//! SARSA.
use crate::{epsilon_greedy, trainer::train_episodes, QTable, TdConfig, TrainOutcome};
use anyhow::Result;
use log::trace;
use rand::Rng;
use tdlab_core::{stats::EpisodeTracker, Env, PositiveTerminalReward, SuccessCriterion};

/// On-policy tabular control.
///
/// The next action is chosen epsilon-greedily before the update, and the
/// target bootstraps from the value of that action.
pub struct Sarsa {
    config: TdConfig,
    criterion: Box<dyn SuccessCriterion>,
}

impl Sarsa {
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

    /// Applies one update for the transition `(s, a, r, s_next, a_next)` and returns the TD error.
    ///
    /// `a_next` is `None` when the episode ended with this transition, in
    /// which case the target is `r` alone.
    pub fn update(
        &self,
        q: &mut QTable,
        s: usize,
        a: usize,
        r: f32,
        s_next: usize,
        a_next: Option<usize>,
    ) -> f32 {
        let target = match a_next {
            Some(a_next) => r + self.config.gamma * q.get(s_next, a_next),
            None => r,
        };
        let td_error = target - q.get(s, a);
        q.add(s, a, self.config.alpha * td_error);
        td_error
    }

    /// Trains a fresh table on `env`.
    ///
    /// All exploration entropy comes from `rng`.
    pub fn train<E: Env, R: Rng>(&self, env: &mut E, rng: &mut R) -> Result<TrainOutcome> {
        train_episodes("SARSA", &self.config, env, rng, |env, q, mut obs, eps, rng| {
            let mut episode = EpisodeTracker::new();
            let mut act = epsilon_greedy(q, obs, eps, rng);
            loop {
                let step = env.step(act)?;
                let act_next = if step.is_done() {
                    None
                } else {
                    Some(epsilon_greedy(q, step.obs, eps, rng))
                };
                let td_error = self.update(q, obs, act, step.reward, step.obs, act_next);
                trace!(
                    "s = {}, a = {}, r = {}, s' = {}, a' = {:?}, td_error = {}",
                    obs,
                    act,
                    step.reward,
                    step.obs,
                    act_next,
                    td_error
                );
                episode.record(
                    self.criterion.as_ref(),
                    step.reward,
                    step.is_terminated,
                    step.is_truncated,
                );
                match act_next {
                    Some(a) => {
                        obs = step.obs;
                        act = a;
                    }
                    None => return Ok(episode),
                }
            }
        })
    }
}
