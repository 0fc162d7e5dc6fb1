use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use tdlab_core::{
    dummy::{Corridor, CorridorConfig},
    DefaultEvaluator, Env, Evaluator, ResetOutcome, StepOutcome, TdlabError,
};
use tdlab_tabular_agent::{
    epsilon_greedy, GreedyPolicy, QLearning, QTable, Sarsa, TdConfig, TrainOutcome,
};
use tdlab_toy_env::{FrozenLake, FrozenLakeConfig, LegacyStepApi, Taxi, TaxiConfig};
use test_log::test;

fn deterministic_lake() -> FrozenLakeConfig {
    FrozenLakeConfig::default().slippery(false)
}

fn train_q<E: Env>(env_config: &E::Config, config: TdConfig) -> Result<TrainOutcome> {
    let mut env = E::build(env_config, config.seed)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    QLearning::new(config).train(&mut env, &mut rng)
}

fn train_sarsa<E: Env>(env_config: &E::Config, config: TdConfig) -> Result<TrainOutcome> {
    let mut env = E::build(env_config, config.seed)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    Sarsa::new(config).train(&mut env, &mut rng)
}

fn check_stats(outcome: &TrainOutcome, n: usize) {
    let stats = &outcome.stats;
    assert_eq!(stats.len(), n);
    assert_eq!(stats.returns.len(), n);
    assert_eq!(stats.lengths.len(), n);
    assert_eq!(stats.successes.len(), n);
    assert_eq!(outcome.epsilons.len(), n);
    assert!(stats.lengths.iter().all(|&l| l >= 1));
    assert!(stats.successes.iter().all(|&s| s == 0 || s == 1));
}

#[test]
fn test_statistics_have_one_entry_per_episode() -> Result<()> {
    let config = TdConfig::default().n_episodes(300).seed(3);
    check_stats(&train_q::<FrozenLake>(&FrozenLakeConfig::default(), config.clone())?, 300);
    check_stats(&train_sarsa::<FrozenLake>(&FrozenLakeConfig::default(), config)?, 300);

    let config = TdConfig::default().n_episodes(50).seed(1);
    check_stats(&train_q::<Taxi>(&TaxiConfig::default(), config.clone())?, 50);
    check_stats(&train_sarsa::<Taxi>(&TaxiConfig::default(), config)?, 50);
    Ok(())
}

#[test]
fn test_training_is_deterministic() -> Result<()> {
    let config = TdConfig::default().n_episodes(500).seed(42);
    let lake = FrozenLakeConfig::default();

    assert_eq!(
        train_q::<FrozenLake>(&lake, config.clone())?,
        train_q::<FrozenLake>(&lake, config.clone())?
    );
    assert_eq!(
        train_sarsa::<FrozenLake>(&lake, config.clone())?,
        train_sarsa::<FrozenLake>(&lake, config)?
    );

    let config = TdConfig::default().n_episodes(100).seed(7);
    assert_eq!(
        train_q::<Taxi>(&TaxiConfig::default(), config.clone())?,
        train_q::<Taxi>(&TaxiConfig::default(), config)?
    );
    Ok(())
}

#[test]
fn test_different_seeds_differ() -> Result<()> {
    let lake = FrozenLakeConfig::default();
    let a = train_q::<FrozenLake>(&lake, TdConfig::default().n_episodes(200).seed(0))?;
    let b = train_q::<FrozenLake>(&lake, TdConfig::default().n_episodes(200).seed(1))?;
    assert_ne!(a.stats, b.stats);
    Ok(())
}

#[test]
fn test_epsilon_is_non_increasing_and_floored() -> Result<()> {
    let config = TdConfig::default()
        .n_episodes(1000)
        .epsilon(1.0, 0.1, 0.99);
    let outcome = train_sarsa::<FrozenLake>(&FrozenLakeConfig::default(), config)?;

    assert_eq!(outcome.epsilons[0], 1.0);
    assert!(outcome.epsilons.windows(2).all(|w| w[1] <= w[0]));
    assert!(outcome.epsilons.iter().all(|&e| e >= 0.1));
    assert_eq!(*outcome.epsilons.last().unwrap(), 0.1);
    Ok(())
}

#[test]
fn test_q_learning_solves_deterministic_lake() -> Result<()> {
    let config = TdConfig::default()
        .n_episodes(2000)
        .alpha(0.2)
        .gamma(0.99)
        .epsilon(1.0, 0.05, 0.9995)
        .seed(0);
    let outcome = train_q::<FrozenLake>(&deterministic_lake(), config)?;

    let env = FrozenLake::build(&deterministic_lake(), 0)?;
    let mut evaluator = DefaultEvaluator::new(env, 50, 10_000)?;
    let stats = evaluator.evaluate(&mut GreedyPolicy::new(&outcome.q))?;

    assert_eq!(stats.success_rate, 1.0);
    assert_eq!(stats.mean_return, 1.0);
    assert_eq!(stats.std_return, 0.0);
    assert!(stats.mean_length >= 6.0);
    Ok(())
}

#[test]
fn test_legacy_protocol_trains_identically() -> Result<()> {
    // On FrozenLake the reward of a truncated step is zero, so reading
    // truncation as termination changes neither the updates nor the successes.
    let config = TdConfig::default().n_episodes(300).seed(5);
    let lake = FrozenLakeConfig::default();
    assert_eq!(
        train_q::<FrozenLake>(&lake, config.clone())?,
        train_q::<LegacyStepApi<FrozenLake>>(&lake, config)?
    );
    Ok(())
}

#[test]
fn test_custom_success_criterion() -> Result<()> {
    let config = TdConfig::default().n_episodes(30);
    let mut env = Taxi::build(&TaxiConfig::default(), 0)?;
    let mut rng = StdRng::seed_from_u64(0);
    let outcome = QLearning::new(config)
        .with_success_criterion(|_r: f32, _terminated: bool, truncated: bool| truncated)
        .train(&mut env, &mut rng)?;

    // Every episode of a fresh table either times out or delivers the passenger.
    for (&len, &success) in outcome.stats.lengths.iter().zip(outcome.stats.successes.iter()) {
        assert_eq!(success == 1, len == 200);
    }
    Ok(())
}

/// [`Corridor`] remembering every action it was stepped with.
struct Recorded {
    inner: Corridor,
    acts: Vec<usize>,
}

impl Env for Recorded {
    type Config = CorridorConfig;
    type Info = ();

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        Ok(Self {
            inner: Corridor::build(config, seed)?,
            acts: vec![],
        })
    }

    fn n_states(&self) -> usize {
        self.inner.n_states()
    }

    fn n_actions(&self) -> usize {
        self.inner.n_actions()
    }

    fn reset_raw(&mut self, seed: Option<u64>) -> Result<ResetOutcome<()>> {
        self.inner.reset_raw(seed)
    }

    fn step_raw(&mut self, act: usize) -> Result<StepOutcome<()>> {
        self.acts.push(act);
        self.inner.step_raw(act)
    }
}

#[test]
fn test_sarsa_steps_with_the_action_it_bootstrapped_from() -> Result<()> {
    let config = TdConfig::default()
        .n_episodes(40)
        .alpha(0.5)
        .gamma(0.9)
        .epsilon(0.6, 0.1, 0.95)
        .seed(5);
    let corridor = CorridorConfig {
        max_steps: 12,
        ..CorridorConfig::default()
    };
    let sarsa = Sarsa::new(config.clone());
    let mut env = Recorded::build(&corridor, 0)?;
    let outcome = sarsa.train(&mut env, &mut StdRng::seed_from_u64(5))?;

    // Replays the on-policy loop: a' is drawn once, before the update, and
    // is the action of the next step.
    let mut replay = Corridor::build(&corridor, 0)?;
    let mut rng = StdRng::seed_from_u64(5);
    let mut q = QTable::new(replay.n_states(), replay.n_actions());
    let mut acts = vec![];
    for (ep, &eps) in outcome.epsilons.iter().enumerate() {
        let (mut obs, _) = replay.reset_with_index(config.seed + ep as u64)?;
        let mut act = epsilon_greedy(&q, obs, eps, &mut rng);
        loop {
            acts.push(act);
            let step = replay.step(act)?;
            let act_next = match step.is_done() {
                true => None,
                false => Some(epsilon_greedy(&q, step.obs, eps, &mut rng)),
            };
            sarsa.update(&mut q, obs, act, step.reward, step.obs, act_next);
            match act_next {
                Some(a) => {
                    obs = step.obs;
                    act = a;
                }
                None => break,
            }
        }
    }

    assert_eq!(env.acts, acts);
    assert_eq!(outcome.q, q);
    assert_eq!(env.acts.len(), outcome.stats.lengths.iter().sum::<usize>());
    Ok(())
}

#[test]
fn test_reset_index_overflow_is_an_error() -> Result<()> {
    let config = TdConfig::default().n_episodes(2).seed(u64::MAX);
    let mut env = Corridor::build(&CorridorConfig::default(), 0)?;
    let mut rng = StdRng::seed_from_u64(0);

    for err in [
        QLearning::new(config.clone()).train(&mut env, &mut rng).unwrap_err(),
        Sarsa::new(config.clone()).train(&mut env, &mut rng).unwrap_err(),
    ] {
        assert!(matches!(
            err.downcast_ref::<TdlabError>(),
            Some(TdlabError::InvalidConfig(_))
        ));
    }
    assert!(env.reset_seeds.is_empty());

    // A single episode at the largest seed still fits.
    let outcome = Sarsa::new(config.n_episodes(1)).train(&mut env, &mut rng)?;
    assert_eq!(outcome.stats.len(), 1);
    assert_eq!(env.reset_seeds, vec![Some(u64::MAX)]);
    Ok(())
}
