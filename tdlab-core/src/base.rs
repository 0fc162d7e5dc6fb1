//! Core functionalities.
mod env;
mod policy;
mod step;
mod success;
pub use env::Env;
pub use policy::Policy;
pub use step::{Info, ResetOutcome, Step, StepOutcome};
pub use success::{PositiveTerminalReward, SuccessCriterion};
