use std::error::Error;

use log::info;
use rand::{rngs::StdRng, SeedableRng};
use tdzero::{
    algo::{TdZeroAgent, TdZeroAgentConfig},
    gym::FrozenLake,
    viz,
};

const NUM_EPISODES: u32 = 100_000;
const UPDATE_EVERY: u32 = 100;
const SEED: u64 = 0;

fn main() -> Result<(), Box<dyn Error>> {
    let mut env = FrozenLake::new();
    let mut agent = TdZeroAgent::from_env(TdZeroAgentConfig::default(), &env)?;
    let mut rng = StdRng::seed_from_u64(SEED);

    let (handle, tx) = viz::init(
        env.report.keys(),
        NUM_EPISODES,
        env.shape(),
        env.terminal_states(),
    );

    // running sums of the report metrics over the last `UPDATE_EVERY` episodes
    let mut window = vec![0.0; env.report.keys().len()];

    for i in 1..=NUM_EPISODES {
        agent.go(&mut env, &mut rng)?;

        let report = env.report.take();
        for (sum, key) in window.iter_mut().zip(env.report.keys()) {
            *sum += report[key];
        }

        if i % UPDATE_EVERY != 0 {
            continue;
        }

        let update = viz::Update {
            episode: i,
            data: window.iter().map(|x| x / f64::from(UPDATE_EVERY)).collect(),
            values: agent.values().as_slice().to_vec(),
        };
        window.iter_mut().for_each(|x| *x = 0.0);

        if tx.send(update).is_err() {
            info!("Viz closed, stopping after {i} episodes");
            break;
        }
    }

    drop(tx);
    handle.join().map_err(|_| "viz thread panicked")??;

    Ok(())
}
