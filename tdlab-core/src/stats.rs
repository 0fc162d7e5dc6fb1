//! Per-episode bookkeeping shared by trainers and evaluators.
use crate::SuccessCriterion;

/// Statistics of completed episodes, in episode order.
///
/// The three sequences are parallel: the `i`-th entry of each belongs to the
/// `i`-th episode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeStats {
    /// Sum of rewards of each episode.
    pub returns: Vec<f32>,

    /// Number of steps of each episode.
    pub lengths: Vec<usize>,

    /// `1` if the episode reached its goal, `0` otherwise.
    pub successes: Vec<u8>,
}

impl EpisodeStats {
    /// Creates empty statistics with room for `n` episodes.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            returns: Vec::with_capacity(n),
            lengths: Vec::with_capacity(n),
            successes: Vec::with_capacity(n),
        }
    }

    /// Appends the result of a finished episode.
    pub fn push(&mut self, episode: EpisodeTracker) {
        self.returns.push(episode.ret);
        self.lengths.push(episode.length);
        self.successes.push(episode.success as u8);
    }

    /// The number of recorded episodes.
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    /// Returns `true` if no episode has been recorded.
    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Mean return over the last `n` episodes, or all of them if fewer.
    pub fn recent_mean_return(&self, n: usize) -> f32 {
        let start = self.returns.len().saturating_sub(n);
        let recent = &self.returns[start..];
        if recent.is_empty() {
            0.0
        } else {
            recent.iter().sum::<f32>() / recent.len() as f32
        }
    }
}

/// Accumulates return, length and success of the episode in progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpisodeTracker {
    ret: f32,
    length: usize,
    success: bool,
}

impl EpisodeTracker {
    /// Starts a new episode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a transition.
    pub fn record<S: SuccessCriterion + ?Sized>(
        &mut self,
        criterion: &S,
        reward: f32,
        is_terminated: bool,
        is_truncated: bool,
    ) {
        self.ret += reward;
        self.length += 1;
        if criterion.is_success(reward, is_terminated, is_truncated) {
            self.success = true;
        }
    }

    /// Return accumulated so far.
    pub fn ret(&self) -> f32 {
        self.ret
    }

    /// Steps taken so far.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Whether a successful transition has been observed.
    pub fn success(&self) -> bool {
        self.success
    }
}

/// Mean of the values, `0` for an empty slice.
pub fn mean(vs: &[f64]) -> f64 {
    if vs.is_empty() {
        0.0
    } else {
        vs.iter().sum::<f64>() / vs.len() as f64
    }
}

/// Population standard deviation (divides by `n`).
pub fn std_population(vs: &[f64]) -> f64 {
    if vs.is_empty() {
        return 0.0;
    }
    let m = mean(vs);
    (vs.iter().map(|v| (v - m).powi(2)).sum::<f64>() / vs.len() as f64).sqrt()
}

/// Sample standard deviation (divides by `n - 1`), `None` for fewer than two values.
pub fn std_sample(vs: &[f64]) -> Option<f64> {
    if vs.len() < 2 {
        return None;
    }
    let m = mean(vs);
    Some((vs.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (vs.len() - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PositiveTerminalReward;

    #[test]
    fn test_tracker_accumulates() {
        let mut t = EpisodeTracker::new();
        t.record(&PositiveTerminalReward, -1.0, false, false);
        t.record(&PositiveTerminalReward, 20.0, true, false);
        assert_eq!(t.ret(), 19.0);
        assert_eq!(t.length(), 2);
        assert!(t.success());

        let mut stats = EpisodeStats::default();
        stats.push(t);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats.successes, vec![1]);
    }

    #[test]
    fn test_truncation_is_not_success() {
        let mut t = EpisodeTracker::new();
        t.record(&PositiveTerminalReward, 1.0, false, true);
        assert!(!t.success());
    }

    #[test]
    fn test_std() {
        let vs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&vs), 5.0);
        assert_eq!(std_population(&vs), 2.0);
        assert!((std_sample(&vs).unwrap() - 2.138089935).abs() < 1e-8);
        assert_eq!(std_sample(&[1.0]), None);
    }

    #[test]
    fn test_recent_mean_return() {
        let stats = EpisodeStats {
            returns: vec![0.0, 1.0, 1.0, 0.0],
            lengths: vec![1; 4],
            successes: vec![0, 1, 1, 0],
        };
        assert_eq!(stats.recent_mean_return(2), 0.5);
        assert_eq!(stats.recent_mean_return(100), 0.5);
    }
}
