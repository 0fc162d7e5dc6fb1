//! Evaluate [`Policy`].
use crate::{Env, Policy};
use anyhow::Result;
use serde::{Deserialize, Serialize};
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Aggregate statistics of evaluation episodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalStats {
    /// Mean of the episode returns.
    pub mean_return: f64,

    /// Population standard deviation of the episode returns.
    pub std_return: f64,

    /// Mean of the episode lengths.
    pub mean_length: f64,

    /// Fraction of episodes that reached the goal, in `[0, 1]`.
    pub success_rate: f64,
}

/// Evaluate [`Policy`].
pub trait Evaluator<E: Env> {
    /// Evaluate [`Policy`].
    ///
    /// The policy is expected to be frozen: evaluation never updates it.
    fn evaluate<P: Policy<E>>(&mut self, policy: &mut P) -> Result<EvalStats>;
}
