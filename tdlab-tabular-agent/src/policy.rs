use crate::QTable;
use tdlab_core::{Env, Policy};

/// Always takes the action with the largest value, ties going to the lowest index.
pub struct GreedyPolicy<'a> {
    q: &'a QTable,
}

impl<'a> GreedyPolicy<'a> {
    /// Creates a policy reading from a frozen table.
    pub fn new(q: &'a QTable) -> Self {
        Self { q }
    }
}

impl<'a, E: Env> Policy<E> for GreedyPolicy<'a> {
    fn sample(&mut self, obs: usize) -> usize {
        self.q.argmax(obs)
    }
}
