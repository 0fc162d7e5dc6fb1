//! Environment.
use super::{Info, ResetOutcome, Step, StepOutcome};
use anyhow::Result;

/// Represents an environment with finite state and action spaces, typically an MDP.
///
/// States and actions are indices in `0..n_states()` and `0..n_actions()`.
/// Implementors provide the raw protocol ([`Env::reset_raw`], [`Env::step_raw`]);
/// learners use the normalized methods [`Env::reset_with_index`] and [`Env::step`].
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    ///
    /// The seed drives the environment's own random number generator until the
    /// first reset with an explicit seed.
    fn build(config: &Self::Config, seed: u64) -> Result<Self>
    where
        Self: Sized;

    /// The number of discrete states.
    fn n_states(&self) -> usize;

    /// The number of discrete actions.
    fn n_actions(&self) -> usize;

    /// Resets the environment, reseeding it if `seed` is given.
    fn reset_raw(&mut self, seed: Option<u64>) -> Result<ResetOutcome<Self::Info>>;

    /// Performs an environment step in the environment's own protocol.
    fn step_raw(&mut self, act: usize) -> Result<StepOutcome<Self::Info>>;

    /// Releases resources held by the environment.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    /// Resets the environment with a given index.
    ///
    /// The index is used as the random seed of the episode, which makes
    /// episodes reproducible.
    fn reset_with_index(&mut self, ix: u64) -> Result<(usize, Self::Info)> {
        Ok(self.reset_raw(Some(ix))?.normalize())
    }

    /// Performs an environment step, normalizing the result into a [`Step`].
    fn step(&mut self, act: usize) -> Result<Step<Self>>
    where
        Self: Sized,
    {
        let (obs, reward, is_terminated, is_truncated, info) = self.step_raw(act)?.normalize();
        Ok(Step::new(obs, act, reward, is_terminated, is_truncated, info))
    }
}
