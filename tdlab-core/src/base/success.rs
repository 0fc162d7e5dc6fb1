//! Success of an episode.

/// Decides whether a transition means the episode reached its goal.
///
/// An episode is counted as a success if any of its transitions satisfies
/// the criterion.
pub trait SuccessCriterion {
    /// Returns `true` if the transition counts as a success.
    fn is_success(&self, reward: f32, is_terminated: bool, is_truncated: bool) -> bool;
}

/// An episode succeeds when it terminates with a strictly positive reward.
///
/// This holds for FrozenLake (reward 1 only at the goal) and Taxi
/// (reward 20 only on a correct dropoff), but not for environments in general.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositiveTerminalReward;

impl SuccessCriterion for PositiveTerminalReward {
    fn is_success(&self, reward: f32, is_terminated: bool, _is_truncated: bool) -> bool {
        is_terminated && reward > 0.0
    }
}

impl<F> SuccessCriterion for F
where
    F: Fn(f32, bool, bool) -> bool,
{
    fn is_success(&self, reward: f32, is_terminated: bool, is_truncated: bool) -> bool {
        self(reward, is_terminated, is_truncated)
    }
}
