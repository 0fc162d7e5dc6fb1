//! Experiments with tabular temporal-difference control.
//!
//! * [`run_experiment`] trains one algorithm on one environment with one seed,
//!   evaluates the greedy policy and writes a training log and a summary as CSV.
//! * [`aggregate`] collects the summaries of many runs, computes statistics
//!   over seeds and [`plot`] renders them as bar charts.
//!
//! The binaries `run_experiment`, `run_all` and `analyze_results` drive these
//! from the command line.
//!
//! ```no_run
//! use anyhow::Result;
//! use tdlab::{run_experiment, ExperimentConfig};
//!
//! fn main() -> Result<()> {
//!     let config = ExperimentConfig::default()
//!         .algorithm("sarsa")
//!         .env("Taxi-v3")
//!         .seed(1)
//!         .out_dir("results");
//!     let summary = run_experiment(&config)?;
//!     println!("success rate = {}", summary.eval_success_rate);
//!     Ok(())
//! }
//! ```
pub mod aggregate;
mod config;
pub mod io;
pub mod plot;
mod runner;

pub use config::{Algorithm, ExperimentConfig};
pub use io::Summary;
pub use runner::run_experiment;
