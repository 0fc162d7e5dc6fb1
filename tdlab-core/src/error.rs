//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum TdlabError {
    /// The algorithm name is not one of the recognized values.
    #[error("Unknown algorithm: {0} (expected 'qlearning' or 'sarsa')")]
    UnknownAlgorithm(String),

    /// The environment name does not match a known environment.
    #[error("Unknown env: {0}")]
    UnknownEnv(String),

    /// A configuration value is out of its valid range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// No summary files were found for aggregation.
    #[error("No summary files found under: {0}")]
    NoSummaryFiles(String),

    /// An action index outside of the action space was given to an environment.
    #[error("Invalid action {act}, the action space has {n_actions} actions")]
    InvalidAction {
        /// The rejected action.
        act: usize,
        /// Size of the action space.
        n_actions: usize,
    },

    /// Evaluation was requested with zero episodes.
    #[error("Evaluation needs at least one episode")]
    EmptyEvaluation,
}
