//! Value table.
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Action values indexed by `(state, action)`.
///
/// The shape is fixed at construction. All entries start at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable(Array2<f32>);

impl QTable {
    /// Creates a zero table of shape `(n_states, n_actions)`.
    pub fn new(n_states: usize, n_actions: usize) -> Self {
        Self(Array2::zeros((n_states, n_actions)))
    }

    /// `(n_states, n_actions)`.
    pub fn shape(&self) -> (usize, usize) {
        self.0.dim()
    }

    /// The number of states.
    pub fn n_states(&self) -> usize {
        self.0.nrows()
    }

    /// The number of actions.
    pub fn n_actions(&self) -> usize {
        self.0.ncols()
    }

    /// Value of action `a` in state `s`.
    pub fn get(&self, s: usize, a: usize) -> f32 {
        self.0[[s, a]]
    }

    /// Sets the value of action `a` in state `s`.
    pub fn set(&mut self, s: usize, a: usize, v: f32) {
        self.0[[s, a]] = v;
    }

    /// Adds `delta` to the value of action `a` in state `s`.
    pub fn add(&mut self, s: usize, a: usize, delta: f32) {
        self.0[[s, a]] += delta;
    }

    /// Action values of state `s`.
    pub fn row(&self, s: usize) -> ArrayView1<f32> {
        self.0.row(s)
    }

    /// The largest action value of state `s`.
    pub fn max(&self, s: usize) -> f32 {
        self.row(s)
            .iter()
            .fold(f32::NEG_INFINITY, |m, &v| m.max(v))
    }

    /// The action with the largest value in state `s`.
    ///
    /// Ties go to the lowest action index.
    pub fn argmax(&self, s: usize) -> usize {
        let mut best = 0;
        let mut best_v = f32::NEG_INFINITY;
        for (a, &v) in self.row(s).iter().enumerate() {
            if v > best_v {
                best = a;
                best_v = v;
            }
        }
        best
    }

    /// The underlying array.
    pub fn as_array(&self) -> &Array2<f32> {
        &self.0
    }
}
