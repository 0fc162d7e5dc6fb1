//! Taxi.
use crate::time_limit::TimeLimit;
use anyhow::Result;
use log::trace;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tdlab_core::{Env, Info, ResetOutcome, StepOutcome, TdlabError};

const MAP: [&str; 7] = [
    "+---------+",
    "|R: | : :G|",
    "| : | : : |",
    "| : : : : |",
    "| | : | : |",
    "|Y| : |B: |",
    "+---------+",
];

/// Stands R, G, Y and B as `(row, col)`.
const LOCS: [(usize, usize); 4] = [(0, 0), (0, 4), (4, 0), (4, 3)];

const IN_TAXI: usize = 4;
const N_ROWS: usize = 5;
const N_COLS: usize = 5;

const SOUTH: usize = 0;
const NORTH: usize = 1;
const EAST: usize = 2;
const WEST: usize = 3;
const PICKUP: usize = 4;
const DROPOFF: usize = 5;

/// Configuration of [`Taxi`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxiConfig {
    pub(crate) max_steps: Option<usize>,
}

impl Default for TaxiConfig {
    fn default() -> Self {
        Self {
            max_steps: Some(200),
        }
    }
}

impl TaxiConfig {
    /// Sets the maximum number of steps in an episode, `None` for no limit.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }
}

/// Information given at every step of [`Taxi`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TaxiInfo {
    /// Actions that change the state (or end the episode) from the current state.
    pub action_mask: [bool; 6],
}

impl Info for TaxiInfo {}

/// The taxi environment.
///
/// A state encodes `(taxi_row, taxi_col, passenger, destination)` as
/// `((taxi_row * 5 + taxi_col) * 5 + passenger) * 4 + destination`, where
/// `passenger` is a stand index or 4 when the passenger rides in the taxi.
/// Actions are south, north, east, west, pickup and dropoff.
///
/// Every step costs 1, an illegal pickup or dropoff costs 10, and delivering
/// the passenger to the destination gives 20 and terminates the episode.
pub struct Taxi {
    state: usize,
    time_limit: TimeLimit,
    rng: StdRng,
}

impl Taxi {
    /// Encodes a state.
    pub fn encode(taxi_row: usize, taxi_col: usize, pass_loc: usize, dest_idx: usize) -> usize {
        ((taxi_row * N_COLS + taxi_col) * 5 + pass_loc) * 4 + dest_idx
    }

    /// Decodes a state into `(taxi_row, taxi_col, pass_loc, dest_idx)`.
    pub fn decode(state: usize) -> (usize, usize, usize, usize) {
        let dest_idx = state % 4;
        let state = state / 4;
        let pass_loc = state % 5;
        let state = state / 5;
        (state / N_COLS, state % N_COLS, pass_loc, dest_idx)
    }

    fn wall_free(row: usize, col_char: usize) -> bool {
        MAP[1 + row].as_bytes()[col_char] == b':'
    }

    /// Actions that have an effect in the given state.
    pub fn action_mask(state: usize) -> [bool; 6] {
        let (row, col, pass_loc, dest_idx) = Self::decode(state);
        let taxi_loc = (row, col);
        [
            row < N_ROWS - 1,
            row > 0,
            col < N_COLS - 1 && Self::wall_free(row, 2 * col + 2),
            col > 0 && Self::wall_free(row, 2 * col),
            pass_loc < IN_TAXI && taxi_loc == LOCS[pass_loc],
            pass_loc == IN_TAXI && (taxi_loc == LOCS[dest_idx] || LOCS.contains(&taxi_loc)),
        ]
    }

    fn sample_initial_state(&mut self) -> usize {
        // Uniform over taxi positions, and over passenger/destination pairs
        // where the passenger is not already at the destination.
        let row = self.rng.gen_range(0..N_ROWS);
        let col = self.rng.gen_range(0..N_COLS);
        let pair = self.rng.gen_range(0..12);
        let pass_loc = pair / 3;
        let dest_idx = {
            let d = pair % 3;
            if d >= pass_loc {
                d + 1
            } else {
                d
            }
        };
        Self::encode(row, col, pass_loc, dest_idx)
    }

    /// Renders the map with the taxi's position, passenger and destination.
    pub fn render(&self) -> String {
        let (row, col, pass_loc, dest_idx) = Self::decode(self.state);
        let mut lines: Vec<Vec<char>> = MAP.iter().map(|l| l.chars().collect()).collect();
        let cell = |r: usize, c: usize| (1 + r, 2 * c + 1);

        let (dr, dc) = cell(LOCS[dest_idx].0, LOCS[dest_idx].1);
        lines[dr][dc] = lines[dr][dc].to_ascii_lowercase();
        if pass_loc < IN_TAXI {
            let (pr, pc) = cell(LOCS[pass_loc].0, LOCS[pass_loc].1);
            lines[pr][pc] = '*';
        }
        let (tr, tc) = cell(row, col);
        lines[tr][tc] = if pass_loc == IN_TAXI { '@' } else { 'T' };

        lines
            .into_iter()
            .map(|l| l.into_iter().collect::<String>() + "\n")
            .collect()
    }
}

impl Env for Taxi {
    type Config = TaxiConfig;
    type Info = TaxiInfo;

    fn build(config: &Self::Config, seed: u64) -> Result<Self> {
        let mut env = Self {
            state: 0,
            time_limit: TimeLimit::new(config.max_steps),
            rng: StdRng::seed_from_u64(seed),
        };
        env.state = env.sample_initial_state();
        Ok(env)
    }

    fn n_states(&self) -> usize {
        500
    }

    fn n_actions(&self) -> usize {
        6
    }

    fn reset_raw(&mut self, seed: Option<u64>) -> Result<ResetOutcome<Self::Info>> {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.time_limit.reset();
        self.state = self.sample_initial_state();
        Ok(ResetOutcome::ObsInfo(
            self.state,
            TaxiInfo {
                action_mask: Self::action_mask(self.state),
            },
        ))
    }

    fn step_raw(&mut self, act: usize) -> Result<StepOutcome<Self::Info>> {
        let (row, col, pass_loc, dest_idx) = Self::decode(self.state);
        let taxi_loc = (row, col);
        let (mut new_row, mut new_col, mut new_pass_loc) = (row, col, pass_loc);
        let mut reward = -1.0;
        let mut terminated = false;

        match act {
            SOUTH => new_row = (row + 1).min(N_ROWS - 1),
            NORTH => new_row = row.saturating_sub(1),
            EAST if Self::wall_free(row, 2 * col + 2) => new_col = (col + 1).min(N_COLS - 1),
            WEST if Self::wall_free(row, 2 * col) => new_col = col.saturating_sub(1),
            EAST | WEST => {}
            PICKUP => {
                if pass_loc < IN_TAXI && taxi_loc == LOCS[pass_loc] {
                    new_pass_loc = IN_TAXI;
                } else {
                    reward = -10.0;
                }
            }
            DROPOFF => {
                if taxi_loc == LOCS[dest_idx] && pass_loc == IN_TAXI {
                    new_pass_loc = dest_idx;
                    terminated = true;
                    reward = 20.0;
                } else if pass_loc == IN_TAXI && LOCS.contains(&taxi_loc) {
                    new_pass_loc = LOCS.iter().position(|&l| l == taxi_loc).unwrap_or(IN_TAXI);
                } else {
                    reward = -10.0;
                }
            }
            _ => return Err(TdlabError::InvalidAction { act, n_actions: 6 }.into()),
        }

        let next = Self::encode(new_row, new_col, new_pass_loc, dest_idx);
        trace!("Taxi: {} -({})-> {}, reward = {}", self.state, act, next, reward);
        self.state = next;
        let truncated = self.time_limit.tick();

        Ok(StepOutcome::Gymnasium {
            obs: next,
            reward,
            terminated,
            truncated,
            info: TaxiInfo {
                action_mask: Self::action_mask(next),
            },
        })
    }
}
