#![warn(missing_docs)]
//! Core abstractions for tabular reinforcement learning experiments.
//!
//! The crate defines the boundary between learners and environments:
//!
//! * [`Env`] - a discrete-state, discrete-action environment. Environments
//!   speak one of two step protocols (see [`StepOutcome`]), which [`Env::step`]
//!   normalizes into a single [`Step`] shape.
//! * [`Policy`] - a mapping from a state index to an action index.
//! * [`SuccessCriterion`] - decides whether a transition counts as reaching the goal.
//! * [`Evaluator`] - runs episodes with a frozen policy and reports [`EvalStats`].
//!
//! Episode bookkeeping shared by trainers and evaluators lives in [`stats`].
pub mod dummy;
pub mod error;
pub mod stats;

mod base;
pub use base::{
    Env, Info, Policy, PositiveTerminalReward, ResetOutcome, Step, StepOutcome, SuccessCriterion,
};

mod evaluator;
pub use evaluator::{DefaultEvaluator, EvalStats, Evaluator};

pub use error::TdlabError;
