//! Episode loop shared by the tabular trainers.
use crate::{QTable, TdConfig};
use anyhow::Result;
use log::{debug, info};
use rand::Rng;
use tdlab_core::{
    stats::{EpisodeStats, EpisodeTracker},
    Env, TdlabError,
};

/// Episodes between two progress messages.
const LOG_INTERVAL: usize = 1000;

/// Result of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    /// The learned action values.
    pub q: QTable,

    /// Return, length and success of every training episode.
    pub stats: EpisodeStats,

    /// Exploration rate used in every training episode.
    pub epsilons: Vec<f32>,
}

/// Runs `config.n_episodes` episodes.
///
/// The loop owns everything between episodes: resetting with index
/// `config.seed + ep`, the exploration schedule, bookkeeping and logging.
/// `run_episode` plays one episode from the given initial state with the
/// given exploration rate, updating the table as it goes.
///
/// Fails before the first episode if the last reset index exceeds `u64::MAX`.
pub(crate) fn train_episodes<E, R, F>(
    name: &str,
    config: &TdConfig,
    env: &mut E,
    rng: &mut R,
    mut run_episode: F,
) -> Result<TrainOutcome>
where
    E: Env,
    R: Rng,
    F: FnMut(&mut E, &mut QTable, usize, f32, &mut R) -> Result<EpisodeTracker>,
{
    if config.n_episodes > 0 && config.seed.checked_add(config.n_episodes as u64 - 1).is_none() {
        return Err(TdlabError::InvalidConfig(format!(
            "reset indices from seed {} for {} episodes overflow u64",
            config.seed, config.n_episodes
        ))
        .into());
    }

    let mut q = QTable::new(env.n_states(), env.n_actions());
    let mut stats = EpisodeStats::with_capacity(config.n_episodes);
    let mut epsilons = Vec::with_capacity(config.n_episodes);
    let mut eps = config.epsilon.start;

    info!(
        "{}: {} episodes, {} states, {} actions",
        name,
        config.n_episodes,
        q.n_states(),
        q.n_actions()
    );

    for ep in 0..config.n_episodes {
        let (obs, _) = env.reset_with_index(config.seed + ep as u64)?;
        let episode = run_episode(&mut *env, &mut q, obs, eps, &mut *rng)?;
        stats.push(episode);
        epsilons.push(eps);

        if (ep + 1) % LOG_INTERVAL == 0 {
            debug!(
                "{}: episode {}, epsilon = {:.4}, mean return (last {}) = {:.4}",
                name,
                ep + 1,
                eps,
                LOG_INTERVAL,
                stats.recent_mean_return(LOG_INTERVAL)
            );
        }

        eps = config.epsilon.next(eps);
    }

    info!(
        "{}: done, mean return (last {}) = {:.4}",
        name,
        LOG_INTERVAL,
        stats.recent_mean_return(LOG_INTERVAL)
    );

    Ok(TrainOutcome { q, stats, epsilons })
}
