//! Adapter to the four-element step protocol.
use anyhow::Result;
use tdlab_core::{Env, ResetOutcome, StepOutcome};

/// Wraps an environment so that it reports transitions the way older gym
/// versions did: `(obs, reward, done, info)` on step and a bare state on reset.
///
/// Learners never see the difference, because [`Env::step`] and
/// [`Env::reset_with_index`] normalize both protocols. Truncation is folded
/// into `done` and therefore reads as termination after normalization.
pub struct LegacyStepApi<E: Env> {
    inner: E,
}

impl<E: Env> LegacyStepApi<E> {
    /// Wraps `inner`.
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    /// Returns the wrapped environment.
    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Env> Env for LegacyStepApi<E> {
    type Config = E::Config;
    type Info = E::Info;

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        Ok(Self::new(E::build(config, seed)?))
    }

    fn n_states(&self) -> usize {
        self.inner.n_states()
    }

    fn n_actions(&self) -> usize {
        self.inner.n_actions()
    }

    fn reset_raw(&mut self, seed: Option<u64>) -> Result<ResetOutcome<Self::Info>> {
        let (obs, _) = self.inner.reset_raw(seed)?.normalize();
        Ok(ResetOutcome::Obs(obs))
    }

    fn step_raw(&mut self, act: usize) -> Result<StepOutcome<Self::Info>> {
        let (obs, reward, terminated, truncated, info) = self.inner.step_raw(act)?.normalize();
        Ok(StepOutcome::Legacy {
            obs,
            reward,
            done: terminated || truncated,
            info,
        })
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }
}
