//! Aggregation of run summaries over seeds.
use crate::io::{read_summary, Summary};
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use tdlab_core::{
    stats::{mean, std_sample},
    TdlabError,
};

/// Name of the aggregated table written by [`write_aggregate`].
pub const AGGREGATE_FILE: &str = "aggregated_summary.csv";

const SUMMARY_SUFFIX: &str = "_summary.csv";

/// Statistics across seeds of one (algorithm, env) pair.
///
/// Standard deviations are sample standard deviations and are `None` for a
/// single seed. All values are rounded to 4 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    /// Algorithm name.
    pub algorithm: String,

    /// Environment name.
    pub env: String,

    /// The number of summaries in the group.
    pub n_seeds: usize,

    /// Mean of `eval_mean_return`.
    pub mean_eval_return: f64,

    /// Standard deviation of `eval_mean_return`.
    pub std_eval_return: Option<f64>,

    /// Mean of `eval_mean_length`.
    pub mean_eval_length: f64,

    /// Standard deviation of `eval_mean_length`.
    pub std_eval_length: Option<f64>,

    /// Mean of `eval_success_rate`.
    pub mean_success: f64,

    /// Standard deviation of `eval_success_rate`.
    pub std_success: Option<f64>,
}

fn round4(v: f64) -> f64 {
    (v * 1e4).round() / 1e4
}

/// Reads every `*_summary.csv` in `dir`, in sorted path order.
///
/// The aggregated table is skipped, so it can live next to the summaries.
pub fn load_summaries(dir: impl AsRef<Path>) -> Result<Vec<Summary>> {
    let dir = dir.as_ref();
    let no_files = || {
        let pattern = dir.join(format!("*{}", SUMMARY_SUFFIX));
        TdlabError::NoSummaryFiles(pattern.display().to_string())
    };

    if !dir.is_dir() {
        return Err(no_files().into());
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_summary = path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| {
                name.ends_with(SUMMARY_SUFFIX) && name != AGGREGATE_FILE
            });
        if is_summary && path.is_file() {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(no_files().into());
    }
    paths.sort();

    let mut summaries = Vec::with_capacity(paths.len());
    for path in paths.iter() {
        summaries.extend(read_summary(path)?);
    }
    info!("Loaded {} summaries from {:?}", summaries.len(), dir);

    Ok(summaries)
}

/// Groups summaries by (algorithm, env), in sorted order, and computes
/// statistics over the seeds of each group.
pub fn aggregate_over_seeds(summaries: &[Summary]) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<(&str, &str), Vec<&Summary>> = BTreeMap::new();
    for s in summaries.iter() {
        groups
            .entry((s.algorithm.as_str(), s.env.as_str()))
            .or_default()
            .push(s);
    }

    groups
        .into_iter()
        .map(|((algorithm, env), group)| {
            let returns: Vec<f64> = group.iter().map(|s| s.eval_mean_return).collect();
            let lengths: Vec<f64> = group.iter().map(|s| s.eval_mean_length).collect();
            let successes: Vec<f64> = group.iter().map(|s| s.eval_success_rate).collect();

            AggregateRow {
                algorithm: algorithm.to_string(),
                env: env.to_string(),
                n_seeds: group.len(),
                mean_eval_return: round4(mean(&returns)),
                std_eval_return: std_sample(&returns).map(round4),
                mean_eval_length: round4(mean(&lengths)),
                std_eval_length: std_sample(&lengths).map(round4),
                mean_success: round4(mean(&successes)),
                std_success: std_sample(&successes).map(round4),
            }
        })
        .collect()
}

/// Writes the aggregated table. Missing standard deviations are empty cells.
pub fn write_aggregate(rows: &[AggregateRow], path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows.iter() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    info!("Wrote {:?}", path);
    Ok(path.to_path_buf())
}

/// Reads an aggregated table.
pub fn read_aggregate(path: impl AsRef<Path>) -> Result<Vec<AggregateRow>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// One line per row: `env | alg | Success: m ± s | Return: m ± s | Len: m ± s | n=k`.
pub fn format_table(rows: &[AggregateRow]) -> String {
    let pm = |m: f64, s: Option<f64>| format!("{:.4} ± {:.4}", m, s.unwrap_or(0.0));
    rows.iter()
        .map(|r| {
            format!(
                "{} | {} | Success: {} | Return: {} | Len: {} | n={}",
                r.env,
                r.algorithm,
                pm(r.mean_success, r.std_success),
                pm(r.mean_eval_return, r.std_eval_return),
                pm(r.mean_eval_length, r.std_eval_length),
                r.n_seeds
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(algorithm: &str, env: &str, seed: u64, ret: f64, len: f64, success: f64) -> Summary {
        Summary {
            algorithm: algorithm.to_string(),
            env: env.to_string(),
            seed,
            alpha: 0.1,
            gamma: 0.99,
            eps_start: 1.0,
            eps_end: 0.05,
            eps_decay: 0.995,
            eval_mean_return: ret,
            eval_std_return: 0.0,
            eval_mean_length: len,
            eval_success_rate: success,
        }
    }

    #[test]
    fn test_aggregate_groups_sorted() {
        let rows = aggregate_over_seeds(&[
            summary("sarsa", "Taxi-v3", 0, 7.0, 13.0, 1.0),
            summary("qlearning", "Taxi-v3", 0, 8.0, 12.0, 1.0),
            summary("qlearning", "FrozenLake-v1", 1, 0.5, 30.0, 0.5),
            summary("qlearning", "FrozenLake-v1", 0, 0.7, 40.0, 0.7),
        ]);
        let keys: Vec<_> = rows
            .iter()
            .map(|r| (r.algorithm.as_str(), r.env.as_str(), r.n_seeds))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("qlearning", "FrozenLake-v1", 2),
                ("qlearning", "Taxi-v3", 1),
                ("sarsa", "Taxi-v3", 1),
            ]
        );

        let lake = &rows[0];
        assert_eq!(lake.mean_success, 0.6);
        assert_eq!(lake.mean_eval_length, 35.0);
        // Sample std of {30, 40} is sqrt(50).
        assert_eq!(lake.std_eval_length, Some(7.0711));
        assert_eq!(lake.std_success, Some(0.1414));

        assert_eq!(rows[1].std_eval_return, None);
        assert_eq!(rows[1].mean_eval_return, 8.0);
    }

    #[test]
    fn test_format_table() {
        let rows = aggregate_over_seeds(&[summary("sarsa", "Taxi-v3", 0, 7.5, 13.0, 1.0)]);
        assert_eq!(
            format_table(&rows),
            "Taxi-v3 | sarsa | Success: 1.0000 ± 0.0000 | Return: 7.5000 ± 0.0000 | Len: 13.0000 ± 0.0000 | n=1"
        );
    }
}
