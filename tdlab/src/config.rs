//! Configuration of a single experiment.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
    str::FromStr,
};
use tdlab_core::TdlabError;
use tdlab_tabular_agent::{EpsilonSchedule, TdConfig};

/// Learning algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Algorithm {
    /// Off-policy TD control.
    QLearning,

    /// On-policy TD control.
    Sarsa,
}

impl Algorithm {
    /// Name used in file names and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::QLearning => "qlearning",
            Self::Sarsa => "sarsa",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = TdlabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "qlearning" => Ok(Self::QLearning),
            "sarsa" => Ok(Self::Sarsa),
            _ => Err(TdlabError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Configuration of [`run_experiment`](crate::run_experiment).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ExperimentConfig {
    /// `qlearning` or `sarsa`.
    pub algorithm: String,

    /// Environment name, e.g. `FrozenLake-v1` or `Taxi-v3`.
    pub env: String,

    /// Seed of the run.
    pub seed: u64,

    /// The number of training episodes.
    pub episodes_train: usize,

    /// The number of greedy evaluation episodes.
    pub episodes_eval: usize,

    /// Learning rate.
    pub alpha: f32,

    /// Discount factor.
    pub gamma: f32,

    /// Initial exploration rate.
    pub eps_start: f32,

    /// Floor of the exploration rate.
    pub eps_end: f32,

    /// Multiplicative decay of the exploration rate per episode.
    pub eps_decay: f32,

    /// Slippery ice. Only FrozenLake uses it.
    pub is_slippery: bool,

    /// Directory receiving the CSV files.
    pub out_dir: PathBuf,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            algorithm: "qlearning".to_string(),
            env: "FrozenLake-v1".to_string(),
            seed: 0,
            episodes_train: 5000,
            episodes_eval: 200,
            alpha: 0.1,
            gamma: 0.99,
            eps_start: 1.0,
            eps_end: 0.05,
            eps_decay: 0.995,
            is_slippery: true,
            out_dir: PathBuf::from("results"),
        }
    }
}

impl ExperimentConfig {
    /// Sets the algorithm name.
    pub fn algorithm(mut self, v: impl Into<String>) -> Self {
        self.algorithm = v.into();
        self
    }

    /// Sets the environment name.
    pub fn env(mut self, v: impl Into<String>) -> Self {
        self.env = v.into();
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Sets the number of training episodes.
    pub fn episodes_train(mut self, v: usize) -> Self {
        self.episodes_train = v;
        self
    }

    /// Sets the number of evaluation episodes.
    pub fn episodes_eval(mut self, v: usize) -> Self {
        self.episodes_eval = v;
        self
    }

    /// Sets the learning rate.
    pub fn alpha(mut self, v: f32) -> Self {
        self.alpha = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f32) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the exploration schedule.
    pub fn epsilon(mut self, start: f32, end: f32, decay: f32) -> Self {
        self.eps_start = start;
        self.eps_end = end;
        self.eps_decay = decay;
        self
    }

    /// Sets slipperiness of FrozenLake.
    pub fn is_slippery(mut self, v: bool) -> Self {
        self.is_slippery = v;
        self
    }

    /// Sets the output directory.
    pub fn out_dir(mut self, v: impl AsRef<Path>) -> Self {
        self.out_dir = v.as_ref().to_path_buf();
        self
    }

    /// Checks the numeric ranges of the hyperparameters and that every reset
    /// index of the run fits in `u64`.
    pub fn validate(&self) -> Result<(), TdlabError> {
        let invalid = |msg: String| -> Result<(), TdlabError> { Err(TdlabError::InvalidConfig(msg)) };

        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return invalid(format!("alpha must be in (0, 1], got {}", self.alpha));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return invalid(format!("gamma must be in [0, 1], got {}", self.gamma));
        }
        if !(0.0 <= self.eps_end && self.eps_end <= self.eps_start && self.eps_start <= 1.0) {
            return invalid(format!(
                "need 0 <= eps_end <= eps_start <= 1, got eps_start = {}, eps_end = {}",
                self.eps_start, self.eps_end
            ));
        }
        if !(self.eps_decay > 0.0 && self.eps_decay <= 1.0) {
            return invalid(format!("eps_decay must be in (0, 1], got {}", self.eps_decay));
        }
        if self.episodes_eval == 0 {
            return invalid("episodes_eval must be at least 1".to_string());
        }
        let last_eval = self
            .seed
            .checked_add((self.episodes_train as u64).max(10_000))
            .and_then(|base| base.checked_add(self.episodes_eval as u64));
        if last_eval.is_none() {
            return invalid(format!(
                "seed {} too large: training and evaluation reset indices overflow u64",
                self.seed
            ));
        }
        Ok(())
    }

    /// Configuration of the trainer.
    pub fn td_config(&self) -> TdConfig {
        TdConfig {
            n_episodes: self.episodes_train,
            alpha: self.alpha,
            gamma: self.gamma,
            epsilon: EpsilonSchedule {
                start: self.eps_start,
                end: self.eps_end,
                decay: self.eps_decay,
            },
            seed: self.seed,
        }
    }

    /// Reset index of the first evaluation episode.
    ///
    /// Training uses indices `seed..seed + episodes_train`, evaluation starts
    /// past them and never below `seed + 10_000`.
    pub fn eval_seed_base(&self) -> u64 {
        self.seed.saturating_add((self.episodes_train as u64).max(10_000))
    }

    /// Constructs [`ExperimentConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ExperimentConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("qlearning".parse::<Algorithm>(), Ok(Algorithm::QLearning));
        assert_eq!("SARSA".parse::<Algorithm>(), Ok(Algorithm::Sarsa));
        assert_eq!(
            "dqn".parse::<Algorithm>(),
            Err(TdlabError::UnknownAlgorithm("dqn".to_string()))
        );
    }

    #[test]
    fn test_validate() {
        let config = ExperimentConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.clone().alpha(1.0).gamma(0.0).validate(), Ok(()));
        assert_eq!(
            config.clone().seed(u64::MAX - 10_001).episodes_eval(1).validate(),
            Ok(())
        );

        let bad = [
            config.clone().alpha(0.0),
            config.clone().alpha(1.5),
            config.clone().gamma(-0.1),
            config.clone().gamma(1.01),
            config.clone().epsilon(0.5, 0.6, 0.99),
            config.clone().epsilon(1.2, 0.1, 0.99),
            config.clone().epsilon(1.0, -0.1, 0.99),
            config.clone().epsilon(1.0, 0.05, 0.0),
            config.clone().epsilon(1.0, 0.05, 1.1),
            config.clone().episodes_eval(0),
            config.clone().seed(u64::MAX - 5),
            config.clone().seed(u64::MAX - 10_000).episodes_eval(1),
        ];
        for c in bad.iter() {
            assert!(
                matches!(c.validate(), Err(TdlabError::InvalidConfig(_))),
                "{:?}",
                c
            );
        }
    }

    #[test]
    fn test_eval_seed_base() {
        let config = ExperimentConfig::default().seed(3);
        assert_eq!(config.clone().episodes_train(5000).eval_seed_base(), 10_003);
        assert_eq!(config.episodes_train(20_000).eval_seed_base(), 20_003);
    }

    #[test]
    fn test_serde_experiment_config() -> Result<()> {
        let config = ExperimentConfig::default()
            .algorithm("sarsa")
            .env("Taxi-v3")
            .seed(4)
            .epsilon(0.9, 0.1, 0.99)
            .out_dir("some/directory");

        let dir = TempDir::new("experiment_config")?;
        let path = dir.path().join("experiment_config.yaml");
        config.save(&path)?;
        let config_ = ExperimentConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
