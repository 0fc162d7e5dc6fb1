//! Environment step.
use super::Env;

/// Additional information returned together with observations.
///
/// A bare reset result, which carries no information, is filled with
/// [`Default::default()`].
pub trait Info: Default {}

impl Info for () {}

/// Represents an action, the next state and the reward `(a_t, s_t+1, r_t)`,
/// with termination flags and some additional information.
///
/// This is the normalized shape of a transition. Environments may report
/// transitions in either shape of [`StepOutcome`]; [`Env::step`] converts
/// them into this struct.
pub struct Step<E: Env> {
    /// Action.
    pub act: usize,

    /// Next state.
    pub obs: usize,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if episode is terminated.
    pub is_terminated: bool,

    /// Flag denoting if episode is truncated.
    pub is_truncated: bool,

    /// Information defined by the environment.
    pub info: E::Info,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(
        obs: usize,
        act: usize,
        reward: f32,
        is_terminated: bool,
        is_truncated: bool,
        info: E::Info,
    ) -> Self {
        Step {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}

/// A transition as reported by an environment.
///
/// Older environments report four values with a single `done` flag, current
/// ones report five values with separate termination and truncation flags.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome<I> {
    /// `(obs, reward, done, info)`.
    Legacy {
        /// Next state.
        obs: usize,
        /// Reward.
        reward: f32,
        /// The episode ended, for whatever reason.
        done: bool,
        /// Additional information.
        info: I,
    },

    /// `(obs, reward, terminated, truncated, info)`.
    Gymnasium {
        /// Next state.
        obs: usize,
        /// Reward.
        reward: f32,
        /// The episode reached a terminal state.
        terminated: bool,
        /// The episode was cut off, typically by a time limit.
        truncated: bool,
        /// Additional information.
        info: I,
    },
}

impl<I> StepOutcome<I> {
    /// Normalizes the outcome into `(obs, reward, terminated, truncated, info)`.
    ///
    /// The legacy `done` flag cannot tell termination and truncation apart,
    /// so it is taken as termination.
    pub fn normalize(self) -> (usize, f32, bool, bool, I) {
        match self {
            Self::Legacy {
                obs,
                reward,
                done,
                info,
            } => (obs, reward, done, false, info),
            Self::Gymnasium {
                obs,
                reward,
                terminated,
                truncated,
                info,
            } => (obs, reward, terminated, truncated, info),
        }
    }
}

/// The initial state as reported by an environment on reset.
#[derive(Debug, Clone, PartialEq)]
pub enum ResetOutcome<I> {
    /// A bare initial state.
    Obs(usize),

    /// An initial state with additional information.
    ObsInfo(usize, I),
}

impl<I: Info> ResetOutcome<I> {
    /// Normalizes the outcome into `(obs, info)`.
    pub fn normalize(self) -> (usize, I) {
        match self {
            Self::Obs(obs) => (obs, I::default()),
            Self::ObsInfo(obs, info) => (obs, info),
        }
    }
}
