//! Policy.
use super::Env;

/// A policy on an environment.
///
/// Policy is a mapping from a state to an action.
/// The mapping can be either of deterministic or stochastic.
pub trait Policy<E: Env> {
    /// Sample an action given a state.
    fn sample(&mut self, obs: usize) -> usize;
}
