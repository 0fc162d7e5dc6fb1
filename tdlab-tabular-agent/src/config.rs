//! Configuration of the tabular trainers.
use serde::{Deserialize, Serialize};

/// Exponentially decaying exploration rate.
///
/// The rate starts at `start` and is multiplied by `decay` after every
/// episode, never going below `end`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub struct EpsilonSchedule {
    /// Exploration rate of the first episode.
    pub start: f32,

    /// Floor of the exploration rate.
    pub end: f32,

    /// Multiplicative decay per episode.
    pub decay: f32,
}

impl Default for EpsilonSchedule {
    fn default() -> Self {
        Self {
            start: 1.0,
            end: 0.05,
            decay: 0.995,
        }
    }
}

impl EpsilonSchedule {
    /// The rate for the episode after one that used `eps`.
    pub fn next(&self, eps: f32) -> f32 {
        (eps * self.decay).max(self.end)
    }
}

/// Configuration of [`QLearning`](crate::QLearning) and [`Sarsa`](crate::Sarsa).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TdConfig {
    /// The number of training episodes.
    pub n_episodes: usize,

    /// Learning rate.
    pub alpha: f32,

    /// Discount factor.
    pub gamma: f32,

    /// Exploration schedule.
    pub epsilon: EpsilonSchedule,

    /// Episode `i` is reset with seed `seed + i`.
    pub seed: u64,
}

impl Default for TdConfig {
    fn default() -> Self {
        Self {
            n_episodes: 5000,
            alpha: 0.1,
            gamma: 0.99,
            epsilon: EpsilonSchedule::default(),
            seed: 0,
        }
    }
}

impl TdConfig {
    /// Sets the number of training episodes.
    pub fn n_episodes(mut self, v: usize) -> Self {
        self.n_episodes = v;
        self
    }

    /// Sets the learning rate.
    pub fn alpha(mut self, v: f32) -> Self {
        self.alpha = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f32) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the exploration schedule.
    pub fn epsilon(mut self, start: f32, end: f32, decay: f32) -> Self {
        self.epsilon = EpsilonSchedule { start, end, decay };
        self
    }

    /// Sets the seed of episode resets.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }
}
