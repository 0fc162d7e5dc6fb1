//! FrozenLake.
use crate::time_limit::TimeLimit;
use anyhow::Result;
use log::trace;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tdlab_core::{Env, Info, ResetOutcome, StepOutcome, TdlabError};

const MAP_4X4: [&str; 4] = ["SFFF", "FHFH", "FFFH", "HFFG"];

const MAP_8X8: [&str; 8] = [
    "SFFFFFFF", "FFFFFFFF", "FFFHFFFF", "FFFFFHFF", "FFFHFFFF", "FHHFFFHF", "FHFFHFHF", "FFFHFFFG",
];

const LEFT: usize = 0;
const DOWN: usize = 1;
const RIGHT: usize = 2;
const UP: usize = 3;

/// Built-in maps of [`FrozenLake`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrozenLakeMap {
    /// 4x4 map, episodes are truncated after 100 steps.
    FourByFour,

    /// 8x8 map, episodes are truncated after 200 steps.
    EightByEight,
}

impl FrozenLakeMap {
    fn rows(&self) -> &'static [&'static str] {
        match self {
            Self::FourByFour => &MAP_4X4,
            Self::EightByEight => &MAP_8X8,
        }
    }

    fn default_max_steps(&self) -> usize {
        match self {
            Self::FourByFour => 100,
            Self::EightByEight => 200,
        }
    }
}

/// Configuration of [`FrozenLake`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrozenLakeConfig {
    pub(crate) map: FrozenLakeMap,
    pub(crate) is_slippery: bool,
    pub(crate) max_steps: Option<usize>,
}

impl Default for FrozenLakeConfig {
    fn default() -> Self {
        Self {
            map: FrozenLakeMap::FourByFour,
            is_slippery: true,
            max_steps: Some(FrozenLakeMap::FourByFour.default_max_steps()),
        }
    }
}

impl FrozenLakeConfig {
    /// Sets the map. The step limit is reset to the map's default.
    pub fn map(mut self, map: FrozenLakeMap) -> Self {
        self.map = map;
        self.max_steps = Some(map.default_max_steps());
        self
    }

    /// Enables or disables slippery transitions.
    pub fn slippery(mut self, v: bool) -> Self {
        self.is_slippery = v;
        self
    }

    /// Sets the maximum number of steps in an episode, `None` for no limit.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }
}

/// Information given at every step of [`FrozenLake`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrozenLakeInfo {
    /// Probability of the realized transition.
    pub prob: f32,
}

impl Default for FrozenLakeInfo {
    fn default() -> Self {
        Self { prob: 1.0 }
    }
}

impl Info for FrozenLakeInfo {}

/// The frozen lake environment.
///
/// States are `row * ncol + col`. Actions are 0 (left), 1 (down), 2 (right)
/// and 3 (up). Reaching `G` gives reward 1; reaching `G` or `H` terminates.
pub struct FrozenLake {
    desc: Vec<Vec<u8>>,
    nrow: usize,
    ncol: usize,
    is_slippery: bool,
    pos: usize,
    time_limit: TimeLimit,
    rng: StdRng,
}

impl FrozenLake {
    fn cell(&self, s: usize) -> u8 {
        self.desc[s / self.ncol][s % self.ncol]
    }

    fn start(&self) -> usize {
        (0..self.nrow * self.ncol)
            .find(|&s| self.cell(s) == b'S')
            .unwrap_or(0)
    }

    fn moved(&self, s: usize, a: usize) -> usize {
        let (mut row, mut col) = (s / self.ncol, s % self.ncol);
        match a {
            LEFT => col = col.saturating_sub(1),
            DOWN => row = (row + 1).min(self.nrow - 1),
            RIGHT => col = (col + 1).min(self.ncol - 1),
            UP => row = row.saturating_sub(1),
            _ => unreachable!(),
        }
        row * self.ncol + col
    }

    /// Renders the map with the agent's position marked by brackets.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (row, line) in self.desc.iter().enumerate() {
            for (col, &c) in line.iter().enumerate() {
                if row * self.ncol + col == self.pos {
                    out.push('[');
                    out.push(c as char);
                    out.push(']');
                } else {
                    out.push(' ');
                    out.push(c as char);
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out
    }
}

impl Env for FrozenLake {
    type Config = FrozenLakeConfig;
    type Info = FrozenLakeInfo;

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        let desc: Vec<Vec<u8>> = config
            .map
            .rows()
            .iter()
            .map(|r| r.as_bytes().to_vec())
            .collect();
        let nrow = desc.len();
        let ncol = desc[0].len();
        let mut env = Self {
            desc,
            nrow,
            ncol,
            is_slippery: config.is_slippery,
            pos: 0,
            time_limit: TimeLimit::new(config.max_steps),
            rng: StdRng::seed_from_u64(seed),
        };
        env.pos = env.start();
        Ok(env)
    }

    fn n_states(&self) -> usize {
        self.nrow * self.ncol
    }

    fn n_actions(&self) -> usize {
        4
    }

    fn reset_raw(&mut self, seed: Option<u64>) -> Result<ResetOutcome<Self::Info>> {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.time_limit.reset();
        self.pos = self.start();
        Ok(ResetOutcome::ObsInfo(self.pos, FrozenLakeInfo { prob: 1.0 }))
    }

    fn step_raw(&mut self, act: usize) -> Result<StepOutcome<Self::Info>> {
        if act >= 4 {
            return Err(TdlabError::InvalidAction { act, n_actions: 4 }.into());
        }

        let (dir, prob) = if self.is_slippery {
            let dir = match self.rng.gen_range(0..3) {
                0 => (act + 3) % 4,
                1 => act,
                _ => (act + 1) % 4,
            };
            (dir, 1.0 / 3.0)
        } else {
            (act, 1.0)
        };

        let next = self.moved(self.pos, dir);
        trace!("FrozenLake: {} -({}, slid to {})-> {}", self.pos, act, dir, next);
        self.pos = next;

        let cell = self.cell(next);
        let terminated = cell == b'G' || cell == b'H';
        let reward = if cell == b'G' { 1.0 } else { 0.0 };
        let truncated = self.time_limit.tick();

        Ok(StepOutcome::Gymnasium {
            obs: next,
            reward,
            terminated,
            truncated,
            info: FrozenLakeInfo { prob },
        })
    }
}
