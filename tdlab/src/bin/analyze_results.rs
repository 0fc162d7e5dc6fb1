use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tdlab::{
    aggregate::{aggregate_over_seeds, format_table, load_summaries, write_aggregate, AGGREGATE_FILE},
    plot::create_plots,
};

/// Aggregate run summaries over seeds and plot them
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory containing `*_summary.csv` files
    #[arg(long, default_value = "results")]
    results_dir: PathBuf,

    /// Directory receiving the charts
    #[arg(long, default_value = "figures")]
    figures_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let summaries = load_summaries(&args.results_dir)?;
    let rows = aggregate_over_seeds(&summaries);
    write_aggregate(&rows, args.results_dir.join(AGGREGATE_FILE))?;
    create_plots(&rows, &args.figures_dir)?;

    println!("{}", format_table(&rows));

    Ok(())
}
