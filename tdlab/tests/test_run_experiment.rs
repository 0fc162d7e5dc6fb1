use anyhow::Result;
use std::fs;
use tdlab::{
    io::{read_summary, read_train_log},
    run_experiment, ExperimentConfig,
};
use tdlab_core::TdlabError;
use tempdir::TempDir;

fn small_config(dir: &TempDir) -> ExperimentConfig {
    ExperimentConfig::default()
        .episodes_train(200)
        .episodes_eval(20)
        .out_dir(dir.path())
}

fn count_files(dir: &TempDir) -> Result<usize> {
    Ok(fs::read_dir(dir.path())?.count())
}

#[test]
fn test_run_writes_log_and_summary() -> Result<()> {
    let dir = TempDir::new("run_experiment")?;
    let config = small_config(&dir).algorithm("sarsa").env("Taxi-v3").seed(3);
    let summary = run_experiment(&config)?;

    let log = read_train_log(dir.path().join("sarsa_Taxi-v3_seed3_train.csv"))?;
    assert_eq!(log.len(), 200);
    assert!(log.iter().enumerate().all(|(i, row)| row.episode == i));
    assert!(log.iter().all(|row| row.length >= 1 && row.success <= 1));

    let summaries = read_summary(dir.path().join("sarsa_Taxi-v3_seed3_summary.csv"))?;
    assert_eq!(summaries, vec![summary.clone()]);

    assert_eq!(summary.algorithm, "sarsa");
    assert_eq!(summary.env, "Taxi-v3");
    assert_eq!(summary.seed, 3);
    assert_eq!(summary.alpha, 0.1);
    assert!((0.0..=1.0).contains(&summary.eval_success_rate));
    assert!(summary.eval_mean_length >= 1.0 && summary.eval_mean_length <= 200.0);
    assert!(summary.eval_std_return >= 0.0);
    Ok(())
}

#[test]
fn test_run_is_deterministic() -> Result<()> {
    let dir1 = TempDir::new("run_experiment_1")?;
    let dir2 = TempDir::new("run_experiment_2")?;
    let s1 = run_experiment(&small_config(&dir1).seed(11))?;
    let s2 = run_experiment(&small_config(&dir2).seed(11))?;
    assert_eq!(s1, s2);

    let name = "qlearning_FrozenLake-v1_seed11_train.csv";
    assert_eq!(
        fs::read_to_string(dir1.path().join(name))?,
        fs::read_to_string(dir2.path().join(name))?
    );
    Ok(())
}

#[test]
fn test_algorithm_name_is_case_insensitive() -> Result<()> {
    let dir = TempDir::new("run_experiment_case")?;
    let summary = run_experiment(&small_config(&dir).algorithm("QLearning"))?;
    assert_eq!(summary.algorithm, "qlearning");
    assert!(dir.path().join("qlearning_FrozenLake-v1_seed0_summary.csv").is_file());
    Ok(())
}

#[test]
fn test_path_separators_in_env_name() -> Result<()> {
    let dir = TempDir::new("run_experiment_sep")?;
    run_experiment(&small_config(&dir).env("FrozenLake/v1"))?;
    assert!(dir.path().join("qlearning_FrozenLake_v1_seed0_train.csv").is_file());
    assert!(dir.path().join("qlearning_FrozenLake_v1_seed0_summary.csv").is_file());
    Ok(())
}

#[test]
fn test_unknown_names_write_nothing() -> Result<()> {
    let dir = TempDir::new("run_experiment_unknown")?;
    let out = dir.path().join("out");

    let err = run_experiment(&small_config(&dir).out_dir(&out).algorithm("dqn")).unwrap_err();
    assert_eq!(
        err.downcast_ref::<TdlabError>(),
        Some(&TdlabError::UnknownAlgorithm("dqn".to_string()))
    );

    let err = run_experiment(&small_config(&dir).out_dir(&out).env("CartPole-v1")).unwrap_err();
    assert_eq!(
        err.downcast_ref::<TdlabError>(),
        Some(&TdlabError::UnknownEnv("CartPole-v1".to_string()))
    );

    let err = run_experiment(&small_config(&dir).out_dir(&out).alpha(0.0)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TdlabError>(),
        Some(TdlabError::InvalidConfig(_))
    ));

    assert!(!out.exists());
    assert_eq!(count_files(&dir)?, 0);
    Ok(())
}

#[test]
fn test_seed_overflow_is_rejected() -> Result<()> {
    let dir = TempDir::new("run_experiment_overflow")?;
    let out = dir.path().join("out");
    let config = ExperimentConfig::default()
        .seed(u64::MAX - 5)
        .episodes_train(10)
        .episodes_eval(2)
        .out_dir(&out);

    let err = run_experiment(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TdlabError>(),
        Some(TdlabError::InvalidConfig(_))
    ));
    assert!(!out.exists());
    Ok(())
}

#[test]
fn test_largest_seed_runs() -> Result<()> {
    let dir = TempDir::new("run_experiment_max_seed")?;
    let seed = u64::MAX - 10_002;
    let config = ExperimentConfig::default()
        .seed(seed)
        .episodes_train(10)
        .episodes_eval(2)
        .out_dir(dir.path());

    let summary = run_experiment(&config)?;
    assert_eq!(summary.seed, seed);
    let log = read_train_log(dir.path().join(format!("qlearning_FrozenLake-v1_seed{}_train.csv", seed)))?;
    assert_eq!(log.len(), 10);
    Ok(())
}
