use std::{error::Error, fs, path::Path};

use rand::{rngs::StdRng, SeedableRng};
use tdzero::{
    algo::{TdZeroAgent, TdZeroAgentConfig},
    gym::FrozenLake,
};

const NUM_EPISODES: u32 = 100_000;
const SEED: u64 = 0;

fn main() -> Result<(), Box<dyn Error>> {
    let path = Path::new("demos/td_zero_value_grid/out");

    let mut env = FrozenLake::new();
    let mut agent = TdZeroAgent::from_env(
        TdZeroAgentConfig {
            alpha: 0.01,
            ..Default::default()
        },
        &env,
    )?;
    let mut rng = StdRng::seed_from_u64(SEED);

    fs::create_dir_all(path)?;

    // Per-episode metrics

    let mut wtr = csv::Writer::from_path(path.join("episodes.csv"))?;
    let mut header = vec!["episode"];
    header.extend(env.report.keys());
    wtr.write_record(&header)?;

    for i in 0..NUM_EPISODES {
        agent.go(&mut env, &mut rng)?;
        let values = env.report.values();
        env.report.take();

        let mut record = vec![i.to_string()];
        record.extend(values.iter().map(|x| x.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;

    // Final state values, one grid row per record

    let (_, ncol) = env.shape();
    let mut wtr = csv::Writer::from_path(path.join("values.csv"))?;
    for row in agent.values().rows(ncol) {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;

    println!("State values after {NUM_EPISODES} episodes:");
    println!("{:.3}", agent.values().grid(ncol));

    Ok(())
}
