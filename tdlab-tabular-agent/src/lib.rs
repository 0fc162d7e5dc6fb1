//! Tabular temporal-difference control.
//!
//! Two trainers share the same episode loop and differ only in the update rule:
//!
//! * [`QLearning`] - off-policy, bootstraps from the best action of the next state.
//! * [`Sarsa`] - on-policy, bootstraps from the action actually taken next.
//!
//! Both explore with [`epsilon_greedy`] under an exponentially decaying
//! [`EpsilonSchedule`] and return a [`TrainOutcome`] whose [`QTable`] can be
//! evaluated with [`GreedyPolicy`].
//!
//! ```no_run
//! use anyhow::Result;
//! use rand::{rngs::StdRng, SeedableRng};
//! use tdlab_core::{DefaultEvaluator, Env, Evaluator};
//! use tdlab_tabular_agent::{GreedyPolicy, QLearning, TdConfig};
//! use tdlab_toy_env::{FrozenLake, FrozenLakeConfig};
//!
//! fn main() -> Result<()> {
//!     let env_config = FrozenLakeConfig::default().slippery(false);
//!     let mut env = FrozenLake::build(&env_config, 0)?;
//!     let mut rng = StdRng::seed_from_u64(0);
//!     let outcome = QLearning::new(TdConfig::default().n_episodes(2000)).train(&mut env, &mut rng)?;
//!
//!     let mut evaluator = DefaultEvaluator::new(FrozenLake::build(&env_config, 0)?, 50, 10_000)?;
//!     let stats = evaluator.evaluate(&mut GreedyPolicy::new(&outcome.q))?;
//!     println!("success rate = {}", stats.success_rate);
//!     Ok(())
//! }
//! ```
mod config;
mod explorer;
mod policy;
mod q_learning;
mod q_table;
mod sarsa;
mod trainer;

pub use config::{EpsilonSchedule, TdConfig};
pub use explorer::epsilon_greedy;
pub use policy::GreedyPolicy;
pub use q_learning::QLearning;
pub use q_table::QTable;
pub use sarsa::Sarsa;
pub use trainer::TrainOutcome;
