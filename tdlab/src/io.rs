//! CSV files of training logs and run summaries.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tdlab_core::stats::EpisodeStats;

/// A row of the training log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainLogRow {
    /// Episode index, starting at zero.
    pub episode: usize,

    /// Sum of rewards.
    #[serde(rename = "return")]
    pub ret: f32,

    /// Number of steps.
    pub length: usize,

    /// `1` if the episode reached its goal.
    pub success: u8,
}

/// Result of one run, i.e., one (algorithm, env, seed) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Algorithm name.
    pub algorithm: String,

    /// Environment name.
    pub env: String,

    /// Seed of the run.
    pub seed: u64,

    /// Learning rate.
    pub alpha: f32,

    /// Discount factor.
    pub gamma: f32,

    /// Initial exploration rate.
    pub eps_start: f32,

    /// Floor of the exploration rate.
    pub eps_end: f32,

    /// Exploration decay per episode.
    pub eps_decay: f32,

    /// Mean return of the greedy evaluation.
    pub eval_mean_return: f64,

    /// Population standard deviation of the evaluation returns.
    pub eval_std_return: f64,

    /// Mean length of the evaluation episodes.
    pub eval_mean_length: f64,

    /// Fraction of successful evaluation episodes.
    pub eval_success_rate: f64,
}

/// Base name of the files of a run, `<algorithm>_<env>_seed<seed>`.
///
/// Path separators in the names are replaced with `_`.
pub fn file_stem(algorithm: &str, env: &str, seed: u64) -> String {
    format!("{}_{}_seed{}", algorithm, env, seed).replace(|c: char| c == '/' || c == '\\', "_")
}

/// Writes one row per training episode.
pub fn write_train_log(path: impl AsRef<Path>, stats: &EpisodeStats) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for (episode, ((&ret, &length), &success)) in stats
        .returns
        .iter()
        .zip(stats.lengths.iter())
        .zip(stats.successes.iter())
        .enumerate()
    {
        wtr.serialize(TrainLogRow {
            episode,
            ret,
            length,
            success,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads a training log.
pub fn read_train_log(path: impl AsRef<Path>) -> Result<Vec<TrainLogRow>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Writes a summary file holding a single row.
pub fn write_summary(path: impl AsRef<Path>, summary: &Summary) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.serialize(summary)?;
    wtr.flush()?;
    Ok(())
}

/// Reads all rows of a summary file.
pub fn read_summary(path: impl AsRef<Path>) -> Result<Vec<Summary>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
