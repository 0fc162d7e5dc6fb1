//! This module is used for tests.
//!
//! [`Corridor`] is a deterministic walk on a line of cells: the agent starts
//! in cell 0, action 0 moves left, action 1 moves right, and reaching the last
//! cell terminates the episode with reward 1.
use crate::{Env, ResetOutcome, StepOutcome, TdlabError};
use anyhow::Result;

/// Configuration of [`Corridor`].
#[derive(Clone, Debug)]
pub struct CorridorConfig {
    /// The number of cells.
    pub len: usize,

    /// Steps after which an episode is truncated.
    pub max_steps: usize,

    /// Report transitions in the four-element legacy shape.
    pub legacy: bool,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            len: 5,
            max_steps: 50,
            legacy: false,
        }
    }
}

/// A deterministic corridor.
pub struct Corridor {
    config: CorridorConfig,
    pos: usize,
    steps: usize,
    /// Seeds passed to resets, in call order.
    pub reset_seeds: Vec<Option<u64>>,
}

impl Env for Corridor {
    type Config = CorridorConfig;
    type Info = ();

    fn build(config: &Self::Config, _seed: u64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            pos: 0,
            steps: 0,
            reset_seeds: vec![],
        })
    }

    fn n_states(&self) -> usize {
        self.config.len
    }

    fn n_actions(&self) -> usize {
        2
    }

    fn reset_raw(&mut self, seed: Option<u64>) -> Result<ResetOutcome<()>> {
        self.reset_seeds.push(seed);
        self.pos = 0;
        self.steps = 0;
        match self.config.legacy {
            true => Ok(ResetOutcome::Obs(self.pos)),
            false => Ok(ResetOutcome::ObsInfo(self.pos, ())),
        }
    }

    fn step_raw(&mut self, act: usize) -> Result<StepOutcome<()>> {
        match act {
            0 => self.pos = self.pos.saturating_sub(1),
            1 => self.pos = (self.pos + 1).min(self.config.len - 1),
            _ => {
                return Err(TdlabError::InvalidAction {
                    act,
                    n_actions: 2,
                }
                .into())
            }
        }
        self.steps += 1;

        let terminated = self.pos == self.config.len - 1;
        let truncated = !terminated && self.steps >= self.config.max_steps;
        let reward = if terminated { 1.0 } else { 0.0 };

        match self.config.legacy {
            true => Ok(StepOutcome::Legacy {
                obs: self.pos,
                reward,
                done: terminated || truncated,
                info: (),
            }),
            false => Ok(StepOutcome::Gymnasium {
                obs: self.pos,
                reward,
                terminated,
                truncated,
                info: (),
            }),
        }
    }
}
