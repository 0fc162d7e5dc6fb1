//! Grid-world environments for tdlab.
//!
//! Two environments are provided, both following the dynamics of their
//! well-known gymnasium counterparts:
//!
//! * [`FrozenLake`] - walk across a frozen lake from `S` to `G` without
//!   falling into a hole `H`. With slipperiness enabled, the agent moves in the
//!   intended direction only one time in three.
//! * [`Taxi`] - pick up a passenger at one of four stands and drop them off at
//!   their destination.
//!
//! Environments are selected by name with [`EnvKind::from_name`].
//!
//! ```no_run
//! use anyhow::Result;
//! use tdlab_core::Env;
//! use tdlab_toy_env::{FrozenLake, FrozenLakeConfig};
//!
//! fn main() -> Result<()> {
//!     let mut env = FrozenLake::build(&FrozenLakeConfig::default().slippery(false), 0)?;
//!     let (obs, _) = env.reset_with_index(0)?;
//!     let step = env.step(2)?;
//!     assert_eq!((obs, step.obs), (0, 1));
//!     Ok(())
//! }
//! ```
mod frozen_lake;
mod kind;
mod legacy;
mod taxi;
mod time_limit;

pub use frozen_lake::{FrozenLake, FrozenLakeConfig, FrozenLakeInfo, FrozenLakeMap};
pub use kind::EnvKind;
pub use legacy::LegacyStepApi;
pub use taxi::{Taxi, TaxiConfig, TaxiInfo};
