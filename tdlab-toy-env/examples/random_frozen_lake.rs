use anyhow::Result;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tdlab_core::Env as _;
use tdlab_toy_env::{FrozenLake, FrozenLakeConfig};

const N_STEPS: usize = 5;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let mut rng = StdRng::seed_from_u64(42);

    let mut env = FrozenLake::build(&FrozenLakeConfig::default().slippery(true), 0)?;
    let (obs, _) = env.reset_with_index(0)?;
    info!("Start state: {}", obs);
    info!("\n{}", env.render());

    for _ in 0..N_STEPS {
        let act = rng.gen_range(0..env.n_actions());
        let step = env.step(act)?;
        info!(
            "{} {} {} {}",
            step.obs, step.reward, step.is_terminated, step.is_truncated
        );
        if step.is_done() {
            break;
        }
    }
    info!("\n{}", env.render());

    env.close()?;
    Ok(())
}
