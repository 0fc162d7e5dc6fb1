//! Exploration.
use crate::QTable;
use rand::Rng;

/// Epsilon-greedy action selection.
///
/// With probability `epsilon` returns a uniformly random action, otherwise
/// the greedy action of `state` (ties go to the lowest index). Entropy is
/// drawn from `rng` only.
pub fn epsilon_greedy<R: Rng + ?Sized>(q: &QTable, state: usize, epsilon: f32, rng: &mut R) -> usize {
    if rng.gen::<f32>() < epsilon {
        rng.gen_range(0..q.n_actions())
    } else {
        q.argmax(state)
    }
}
